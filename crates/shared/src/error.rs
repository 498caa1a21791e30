use strum::{AsRefStr, Display};

/// Coarse classification every [`Error`] falls into. The HTTP layer maps it to
/// a status code, callers use it to decide whether a retry makes sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    Conflict,
    Unauthorized,
    Forbidden,
    Unavailable,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("{0}")]
    InvalidInput(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("access code already exists")]
    DuplicateAccessCode,

    #[error("already checked in to this event")]
    AlreadyCheckedIn,

    #[error("invalid access code")]
    InvalidAccessCode,

    #[error("not authenticated")]
    Unauthenticated,

    #[error("forbidden")]
    Forbidden,

    #[error("no access code configured for this event")]
    NoAccessCodeConfigured,

    #[error("check-in window is not open yet")]
    WindowNotOpen,

    #[error("check-in window is closed")]
    WindowClosed,

    #[error("{0}")]
    Unavailable(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Validate(_) | Error::InvalidInput(_) => ErrorKind::InvalidInput,
            Error::NotFound(_) => ErrorKind::NotFound,
            Error::DuplicateAccessCode | Error::AlreadyCheckedIn => ErrorKind::Conflict,
            Error::InvalidAccessCode | Error::Unauthenticated => ErrorKind::Unauthorized,
            Error::Forbidden
            | Error::NoAccessCodeConfigured
            | Error::WindowNotOpen
            | Error::WindowClosed => ErrorKind::Forbidden,
            Error::Unavailable(_) => ErrorKind::Unavailable,
            Error::Unknown(_) => ErrorKind::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Unavailable(value.to_string())
    }
}

/// True when the statement was rejected by a UNIQUE or PRIMARY KEY index.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    let Some(db_err) = err.as_database_error() else {
        return false;
    };

    if db_err.is_unique_violation() {
        return true;
    }

    let by_code = db_err
        .code()
        .map(|code| code.as_ref() == "2067" || code.as_ref() == "1555")
        .unwrap_or(false);

    by_code || db_err.message().contains("UNIQUE constraint failed")
}

/// True when the statement was rejected by a FOREIGN KEY constraint.
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    let Some(db_err) = err.as_database_error() else {
        return false;
    };

    if db_err.is_foreign_key_violation() {
        return true;
    }

    let by_code = db_err
        .code()
        .map(|code| code.as_ref() == "787")
        .unwrap_or(false);

    by_code || db_err.message().contains("FOREIGN KEY constraint failed")
}

#[macro_export]
macro_rules! invalid {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::InvalidInput(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::InvalidInput(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::InvalidInput(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_check_ins_are_distinguishable() {
        assert_eq!(Error::InvalidAccessCode.kind(), ErrorKind::Unauthorized);
        assert_eq!(Error::AlreadyCheckedIn.kind(), ErrorKind::Conflict);
        assert_eq!(Error::WindowNotOpen.kind(), ErrorKind::Forbidden);
        assert_eq!(Error::WindowClosed.kind(), ErrorKind::Forbidden);
        assert_eq!(Error::NoAccessCodeConfigured.kind(), ErrorKind::Forbidden);
        assert_eq!(Error::NotFound("event").kind(), ErrorKind::NotFound);
        assert_eq!(Error::DuplicateAccessCode.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn storage_faults_are_unavailable() {
        let err: Error = sqlx::Error::PoolTimedOut.into();
        assert_eq!(err.kind(), ErrorKind::Unavailable);
        assert!(!is_unique_violation(&sqlx::Error::PoolTimedOut));
    }
}
