use thiserror::Error;

/// Why a lookup against an enum's serialized names failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The text matches neither a serialized name nor a raw member identifier.
    #[error("no matching member")]
    NoMatchingMember,
    /// The numeric literal does not fit the enum's backing integer type.
    #[error("invalid numeric literal")]
    InvalidNumericLiteral,
    /// No value was supplied.
    #[error("null or missing input")]
    NullOrMissingInput,
}

/// Default error returned by the enum naming strategies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot convert {input:?} to {type_name}: {kind}")]
pub struct NamingError {
    kind: ErrorKind,
    type_name: &'static str,
    input: String,
}

impl NamingError {
    pub fn new(kind: ErrorKind, type_name: &'static str, input: impl Into<String>) -> Self {
        Self {
            kind,
            type_name,
            input: input.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn input(&self) -> &str {
        &self.input
    }
}

/// Errors surfaced by the JSON converters.
#[derive(Error, Debug)]
pub enum ConvertError {
    #[error(transparent)]
    Naming(#[from] NamingError),

    /// The token is neither a string nor a number.
    #[error("unsupported token type for {type_name}: expected a string or a number")]
    UnsupportedToken { type_name: &'static str },

    /// The strategy does not convert this type, e.g. because it is a flags enum.
    #[error("{type_name} is not supported by this naming strategy")]
    Unsupported { type_name: &'static str },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ConvertError {
    /// The lookup failure kind, if the error came from the naming strategy.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Self::Naming(err) => Some(err.kind()),
            _ => None,
        }
    }
}

/// Errors returned synchronously by the model binder.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindError {
    #[error("binding context is missing")]
    MissingContext,
}
