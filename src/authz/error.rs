use super::role::Role;

pub type PolicyResult<T> = Result<T, PolicyError>;

#[derive(thiserror::Error, Debug)]
pub enum PolicyError {
    #[error("unknown role: {0}")]
    UnknownRole(String),
    #[error("registry has no entry for role {0}")]
    IncompleteRegistry(Role),
    #[error("invalid policy: {0}")]
    InvalidPolicy(String),
    #[error("invalid role change: {0}")]
    InvalidRoleChange(String),
    #[error("failed to read policy file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse policy document: {0}")]
    Parse(#[from] serde_json::Error),
}

impl PolicyError {
    pub fn unknown_role(raw: impl Into<String>) -> Self {
        Self::UnknownRole(raw.into())
    }

    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy(message.into())
    }

    pub fn invalid_role_change(reason: impl Into<String>) -> Self {
        Self::InvalidRoleChange(reason.into())
    }
}
