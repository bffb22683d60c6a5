use crate::relay::RelayError;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryId {
    pub owner: String,
    pub name: String,
}

impl RepositoryId {
    /// Parses `owner/name`. Anything other than exactly two non-empty
    /// segments is rejected, as is a `.` or `..` segment.
    pub fn parse(value: &str) -> Result<Self, RelayError> {
        let segments: Vec<&str> = value.trim().split('/').map(str::trim).collect();

        match segments.as_slice() {
            [owner, name] if is_segment(owner) && is_segment(name) => Ok(RepositoryId {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            _ => Err(RelayError::Validation(format!(
                "Invalid repository {value:?}, expected the owner/name format"
            ))),
        }
    }
}

fn is_segment(value: &str) -> bool {
    !matches!(value, "" | "." | "..")
}

impl fmt::Display for RepositoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
