use std::borrow::Cow;

use halftime::NormalizationError;

/// All possible error kinds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Errors encountered while contacting the service.
    Transport,
    /// Errors caused by a caller-supplied identifier or parameter which the
    /// service rejected.
    InvalidParameter,
    /// Errors encountered while normalizing a payload into a record.
    Normalization,
    /// The transport returned a payload of a different shape than the one
    /// requested.
    UnexpectedPayload,
    /// Errors reported by the software catalog.
    Catalog,
    /// Errors encountered while building or entering the scheduler of a
    /// blocking facade.
    Scheduler,
}

impl ErrorKind {
    pub(crate) const fn description(self) -> &'static str {
        match self {
            Self::Transport => "Transport",
            Self::InvalidParameter => "Invalid Parameter",
            Self::Normalization => "Normalization",
            Self::UnexpectedPayload => "Unexpected Payload",
            Self::Catalog => "Catalog",
            Self::Scheduler => "Scheduler",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.description().fmt(f)
    }
}

/// Client error.
///
/// Errors are never logged nor retried by the client, they are always
/// returned to the caller.
#[derive(PartialEq, Eq)]
pub struct Error {
    kind: ErrorKind,
    description: Cow<'static, str>,
    normalization: Option<NormalizationError>,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.format(f)
    }
}

impl std::fmt::Debug for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.format(f)
    }
}

impl Error {
    /// Creates an [`Error`] from an [`ErrorKind`] and a description.
    #[inline]
    pub fn new(kind: ErrorKind, description: impl Into<Cow<'static, str>>) -> Self {
        Self {
            kind,
            description: description.into(),
            normalization: None,
        }
    }

    /// Returns the [`ErrorKind`].
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the record name and the field path of a normalization error.
    ///
    /// If [`None`], the error has not been raised while normalizing a
    /// payload.
    #[must_use]
    pub fn location(&self) -> Option<(&'static str, &str)> {
        self.normalization
            .as_ref()
            .map(|error| (error.record(), error.field()))
    }

    fn format(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.description)
    }
}

impl From<NormalizationError> for Error {
    fn from(e: NormalizationError) -> Self {
        Self {
            kind: ErrorKind::Normalization,
            description: e.to_string().into(),
            normalization: Some(e),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        // A request which cannot even be built carries a malformed URL.
        let kind = if e.is_builder() {
            ErrorKind::InvalidParameter
        } else {
            ErrorKind::Transport
        };
        Self::new(kind, e.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::new(ErrorKind::Scheduler, e.to_string())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.normalization
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// A specialized [`Result`] type for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
