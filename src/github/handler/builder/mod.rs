pub mod upsert_file_builder;

use crate::relay::RelayError;

pub trait BuilderExecutor {
    type Output;

    async fn execute(self) -> Result<Self::Output, RelayError>;
}
