use derive_more::Display;

pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Display)]
pub struct UnknownError(BoxedError);

impl std::error::Error for UnknownError {}

impl UnknownError {
    pub fn new(err: BoxedError) -> Self {
        Self(err)
    }
}

impl From<sqlx::error::Error> for UnknownError {
    fn from(err: sqlx::error::Error) -> Self {
        Self::new(err.into())
    }
}

pub mod app {
    use derive_more::Display;
    use salvo::{
        http::StatusCode,
        prelude::StatusError,
        writer::{Json, Text},
        Piece,
    };

    use super::{
        http::{BadRequest, ErrorResponse},
        persistence::{PersistenceError, UNIQUE_VIOLATION},
        resource::{ConflictError, InvalidInputError, NotFoundError},
        security::UnauthorizedError,
        UnknownError,
    };

    #[derive(Debug, Display)]
    pub enum ApplicationError {
        InvalidInput(InvalidInputError),
        NotFound(NotFoundError),
        Conflict(ConflictError),
        Unauthorized(UnauthorizedError),
        BadRequest(BadRequest),
        Persistence(PersistenceError),
        Unknown(UnknownError),
    }

    impl std::error::Error for ApplicationError {}

    impl ApplicationError {
        pub fn status_code(&self) -> StatusCode {
            match self {
                ApplicationError::InvalidInput(_) | ApplicationError::BadRequest(_) => {
                    StatusCode::BAD_REQUEST
                }
                ApplicationError::NotFound(_) => StatusCode::NOT_FOUND,
                ApplicationError::Conflict(_) => StatusCode::CONFLICT,
                ApplicationError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
                ApplicationError::Persistence(_) => StatusCode::SERVICE_UNAVAILABLE,
                ApplicationError::Unknown(_) => StatusCode::INTERNAL_SERVER_ERROR,
            }
        }
    }

    impl From<InvalidInputError> for ApplicationError {
        fn from(err: InvalidInputError) -> Self {
            Self::InvalidInput(err)
        }
    }

    impl From<NotFoundError> for ApplicationError {
        fn from(err: NotFoundError) -> Self {
            Self::NotFound(err)
        }
    }

    impl From<ConflictError> for ApplicationError {
        fn from(err: ConflictError) -> Self {
            Self::Conflict(err)
        }
    }

    impl From<UnauthorizedError> for ApplicationError {
        fn from(err: UnauthorizedError) -> Self {
            Self::Unauthorized(err)
        }
    }

    impl From<BadRequest> for ApplicationError {
        fn from(err: BadRequest) -> Self {
            Self::BadRequest(err)
        }
    }

    impl From<UnknownError> for ApplicationError {
        fn from(err: UnknownError) -> Self {
            Self::Unknown(err)
        }
    }

    impl From<PersistenceError> for ApplicationError {
        fn from(err: PersistenceError) -> Self {
            match err {
                PersistenceError::Database(Some(ref code)) if code == UNIQUE_VIOLATION => {
                    Self::Conflict(ConflictError::new("This value is already taken by another resource"))
                }
                PersistenceError::NotFound => {
                    Self::NotFound(NotFoundError::new("The requested resource no longer exists"))
                }
                err => Self::Persistence(err),
            }
        }
    }

    impl Piece for ApplicationError {
        fn render(self, res: &mut salvo::Response) {
            let code = self.status_code();
            match self {
                ApplicationError::InvalidInput(InvalidInputError(message))
                | ApplicationError::NotFound(NotFoundError(message))
                | ApplicationError::Conflict(ConflictError(message)) => {
                    res.render(Text::Plain(message));
                }
                ApplicationError::Unauthorized(err) => {
                    let status = StatusError::unauthorized();
                    res.render(Json(ErrorResponse::from_status_error(&status, err)));
                }
                ApplicationError::BadRequest(err) => {
                    let status = StatusError::bad_request();
                    res.render(Json(ErrorResponse::from_status_error(&status, err)));
                }
                ApplicationError::Persistence(_) => {
                    let status = StatusError::service_unavailable();
                    res.render(Json(ErrorResponse::from_status_error(&status, ())));
                }
                ApplicationError::Unknown(_) => {
                    let status = StatusError::internal_server_error();
                    res.render(Json(ErrorResponse::from_status_error(&status, ())));
                }
            }
            res.set_status_code(code);
        }
    }
}

pub mod service {
    use derive_more::Display;

    use crate::error::UnknownError;

    #[derive(Debug, Display)]
    pub enum DispatchError {
        #[display(fmt = "Dispatched operation timed out in {_0:?}")]
        Timeout(Option<std::time::Duration>),
        #[display(fmt = "IO error dispatching {_0}")]
        IO(std::io::Error),
        #[display(fmt = "Unknown dispatch error {_0}")]
        Unknown(UnknownError),
    }

    impl std::error::Error for DispatchError {}
}

pub mod persistence {
    use std::io;

    use derive_more::Display;

    use super::{service::DispatchError, UnknownError};

    pub type SqlState = String;

    /// SQLSTATE raised when a unique constraint rejects a write.
    pub const UNIQUE_VIOLATION: &str = "23505";

    #[derive(Debug, Display)]
    pub enum PersistenceError {
        #[display(fmt = "database persistence error: SQLSTATE {_0:?}")]
        Database(Option<SqlState>),
        #[display(fmt = "persistence layer connection error: {_0}")]
        Connection(DispatchError),
        #[display(fmt = "PersistenceError data not found")]
        NotFound,
        #[display(fmt = "PersistenceError decoding data")]
        DecodeData,
        #[display(fmt = "PersistenceError data migration")]
        DataMigration,
        #[display(fmt = "unknown persistence error: {_0}")]
        Unknown(UnknownError),
    }

    impl std::error::Error for PersistenceError {}

    impl PersistenceError {
        pub fn unique_violation() -> Self {
            Self::Database(Some(UNIQUE_VIOLATION.into()))
        }
    }

    type SqlxError = sqlx::error::Error;

    impl From<SqlxError> for PersistenceError {
        fn from(err: SqlxError) -> Self {
            match err {
                SqlxError::Configuration(_) => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::InvalidInput.into()))
                }
                SqlxError::Database(db) => Self::Database(db.code().map(|code| code.into())),
                SqlxError::Io(io) => Self::Connection(DispatchError::IO(io)),
                SqlxError::Tls(_) => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::ConnectionRefused.into()))
                }
                SqlxError::Protocol(msg) => Self::Connection(DispatchError::IO(io::Error::new(
                    io::ErrorKind::InvalidData,
                    msg,
                ))),
                SqlxError::RowNotFound => Self::NotFound,
                SqlxError::TypeNotFound { .. } => Self::DecodeData,
                SqlxError::ColumnIndexOutOfBounds { .. } => Self::DecodeData,
                SqlxError::ColumnNotFound(_) => Self::NotFound,
                SqlxError::ColumnDecode { .. } => Self::DecodeData,
                SqlxError::Decode(_) => Self::DecodeData,
                SqlxError::PoolTimedOut => Self::Connection(DispatchError::Timeout(None)),
                SqlxError::PoolClosed => {
                    Self::Connection(DispatchError::IO(io::ErrorKind::NotConnected.into()))
                }
                SqlxError::WorkerCrashed => {
                    tracing::error!("sqlx background worker crashed");
                    Self::Connection(DispatchError::Unknown(err.into()))
                }
                SqlxError::Migrate(_) => Self::DataMigration,
                _ => PersistenceError::Unknown(err.into()),
            }
        }
    }
}

pub mod resource {
    use derive_more::{Display, Error};

    /// A guard rejected the request input.
    #[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
    #[display(fmt = "{_0}")]
    pub struct InvalidInputError(#[error(not(source))] pub String);

    impl InvalidInputError {
        pub fn new(message: impl Into<String>) -> Self {
            Self(message.into())
        }
    }

    /// A lookup found nothing to operate on.
    #[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
    #[display(fmt = "{_0}")]
    pub struct NotFoundError(#[error(not(source))] pub String);

    impl NotFoundError {
        pub fn new(message: impl Into<String>) -> Self {
            Self(message.into())
        }
    }

    /// The store refused a write that would duplicate a unique value.
    #[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
    #[display(fmt = "{_0}")]
    pub struct ConflictError(#[error(not(source))] pub String);

    impl ConflictError {
        pub fn new(message: impl Into<String>) -> Self {
            Self(message.into())
        }
    }
}

pub mod security {
    use derive_more::Display;
    use serde::Serialize;

    /// Unauthorized access to a resource.
    #[derive(Debug, Display, Serialize)]
    pub enum UnauthorizedError {
        /// Authorization header is not present.
        #[display(fmt = "token_not_present")]
        TokenNotPresent,

        /// Authorization header does not hold the shared secret.
        #[display(fmt = "invalid_token")]
        InvalidToken,
    }

    #[derive(Debug, Display)]
    pub enum PasswordHashError {
        #[display(fmt = "password hashing failed: {_0}")]
        Hash(password_hash::Error),
    }

    impl std::error::Error for PasswordHashError {}

    impl From<password_hash::Error> for PasswordHashError {
        fn from(err: password_hash::Error) -> Self {
            Self::Hash(err)
        }
    }
}

pub mod http {
    use derive_more::{Display, Error};
    use salvo::{http::ParseError, prelude::StatusError};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Display, Clone, Error, Serialize, Deserialize)]
    pub enum BadRequest {
        InvalidContent,
    }

    #[derive(Debug, Display, Clone, Error, Serialize, Deserialize)]
    #[display(fmt = "Response error: {title}, {message}")]
    pub struct ErrorResponse<T> {
        pub title: String,
        pub message: String,
        pub error: T,
    }

    impl<T> ErrorResponse<T> {
        pub fn from_status_error(status: &StatusError, err: T) -> Self {
            Self {
                title: status.name.clone(),
                message: status
                    .summary
                    .clone()
                    .unwrap_or_else(|| status.name.clone()),
                error: err,
            }
        }
    }

    impl From<ParseError> for BadRequest {
        fn from(_: ParseError) -> Self {
            BadRequest::InvalidContent
        }
    }
}
