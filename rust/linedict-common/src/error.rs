use thiserror::Error;

#[derive(Debug, Error)]
#[error(transparent)]
pub struct Error(Box<ErrorKind>);

impl Error {
    pub fn kind(&self) -> &ErrorKind {
        self.0.as_ref()
    }

    pub fn into_kind(self) -> ErrorKind {
        *self.0
    }

    pub fn invalid_config(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidConfig {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn corrupt_artifact(element: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::CorruptArtifact {
                element: element.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn invalid_operation(name: impl Into<String>, message: impl Into<String>) -> Error {
        Error(
            ErrorKind::InvalidOperation {
                name: name.into(),
                message: message.into(),
            }
            .into(),
        )
    }

    pub fn limit_exceeded(what: impl Into<String>) -> Error {
        Error(ErrorKind::LimitExceeded { what: what.into() }.into())
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Error {
        Error(
            ErrorKind::Io {
                context: context.into(),
                source,
            }
            .into(),
        )
    }

    pub fn is_io(&self) -> bool {
        matches!(self.kind(), ErrorKind::Io { .. })
    }

    pub fn is_invalid_config(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidConfig { .. })
    }

    pub fn is_corrupt_artifact(&self) -> bool {
        matches!(self.kind(), ErrorKind::CorruptArtifact { .. })
    }

    pub fn is_limit_exceeded(&self) -> bool {
        matches!(self.kind(), ErrorKind::LimitExceeded { .. })
    }

    pub fn is_invalid_operation(&self) -> bool {
        matches!(self.kind(), ErrorKind::InvalidOperation { .. })
    }
}

#[derive(Debug, Error)]
pub enum ErrorKind {
    #[error("invalid configuration {name}: {message}")]
    InvalidConfig { name: String, message: String },

    #[error("corrupt artifact, '{element}': {message}")]
    CorruptArtifact { element: String, message: String },

    #[error("invalid operation {name}: {message}")]
    InvalidOperation { name: String, message: String },

    #[error("limit exceeded: {what}")]
    LimitExceeded { what: String },

    #[error("IO error for '{context}': {source}")]
    Io {
        context: String,
        source: std::io::Error,
    },
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error(kind.into())
    }
}
