use super::model::CustomerType;

// ============================================================================
// Customer Errors
// ============================================================================
//
// Rule violations carry a machine-readable code and an HTTP status hint so the
// transport layer can map them without inspecting messages. Store failures are
// passed through unchanged.
//
// ============================================================================

/// Broad class of a failure, used for metrics labels and status mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NotFound,
    Conflict,
    Store,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Conflict => "conflict",
            ErrorKind::Store => "store",
        }
    }
}

/// Malformed, missing or inconsistent input
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Field '{0}' is required")]
    MissingField(&'static str),

    #[error("Field '{0}' cannot be empty")]
    BlankField(&'static str),

    #[error("Birthday is required for person customers")]
    BirthdayRequired,

    #[error("Birthday is only allowed for person customers")]
    BirthdayNotAllowed,

    #[error("Company customers must provide an authorized signer list")]
    SignersRequired,

    #[error("Authorized signers are only allowed for company customers")]
    SignersNotAllowed,

    #[error("Customer type cannot change from {stored} to {requested}")]
    CustomerTypeChanged {
        stored: CustomerType,
        requested: CustomerType,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum CustomerError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("User already registered: {0}")]
    AlreadyRegistered(String),

    #[error("Customer {0} has no authorized signers")]
    NoAuthorizedSigners(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl CustomerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CustomerError::Validation(_) => ErrorKind::Validation,
            CustomerError::NotFound(_) => ErrorKind::NotFound,
            CustomerError::AlreadyRegistered(_) | CustomerError::NoAuthorizedSigners(_) => {
                ErrorKind::Conflict
            }
            CustomerError::Store(_) => ErrorKind::Store,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CustomerError::Validation(_) => "VALIDATION_ERROR",
            CustomerError::NotFound(_) => "NOT_FOUND",
            CustomerError::AlreadyRegistered(_) => "ALREADY_REGISTERED",
            CustomerError::NoAuthorizedSigners(_) => "NO_AUTHORIZED_SIGNERS",
            CustomerError::Store(_) => "STORE_ERROR",
        }
    }

    /// HTTP status the transport layer should answer with
    pub fn status(&self) -> u16 {
        match self.kind() {
            ErrorKind::Validation => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Conflict => 409,
            ErrorKind::Store => 500,
        }
    }
}
