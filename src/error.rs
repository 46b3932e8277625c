use derive_more::Display;

/// Errors surfaced by every mutation in the crate.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// User-facing validation message, e.g. a blank reason.
    #[display(fmt = "{}", _0)]
    Validation(String),

    #[display(fmt = "{} not found: {}", entity, id)]
    NotFound { entity: &'static str, id: String },

    #[display(fmt = "cannot {} {} in state {}", action, entity, from)]
    InvalidStateTransition {
        entity: &'static str,
        from: String,
        action: &'static str,
    },
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        DomainError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn transition(entity: &'static str, from: impl ToString, action: &'static str) -> Self {
        DomainError::InvalidStateTransition {
            entity,
            from: from.to_string(),
            action,
        }
    }

    /// Message suitable for an `error_message` field on a screen.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::Validation(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}
