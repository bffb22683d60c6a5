mod sha_response;
mod state;
mod upsert_file_response;

pub use sha_response::ContentsResponse;
pub use upsert_file_response::UpsertFileResponse;

pub use state::AsyncFrom;
pub use state::ErrorResponse;
pub use state::Response;
