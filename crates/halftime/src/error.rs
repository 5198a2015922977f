use std::borrow::Cow;

/// The reason a payload could not be normalized into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizationCause {
    /// A required field is absent.
    Missing,
    /// A field holds a value the record does not accept, such as a value of
    /// the wrong type or a timestamp in a format other than
    /// `YYYY-MM-DDTHH:MM:SSZ`.
    Invalid {
        /// Why the value was rejected.
        reason: String,
    },
    /// The payload is not a JSON object.
    NotAnObject,
    /// The payload is not a JSON array.
    NotAList,
}

/// A payload shape mismatch.
///
/// It always names the record being built and the offending field. Fields of
/// nested records are reported as paths, such as `firmwares[1].signed`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizationError {
    record: &'static str,
    field: Cow<'static, str>,
    cause: NormalizationCause,
}

impl NormalizationError {
    /// Creates a [`NormalizationError`].
    #[must_use]
    #[inline]
    pub fn new(
        record: &'static str,
        field: impl Into<Cow<'static, str>>,
        cause: NormalizationCause,
    ) -> Self {
        Self {
            record,
            field: field.into(),
            cause,
        }
    }

    /// Returns the name of the record which could not be built.
    #[must_use]
    pub const fn record(&self) -> &'static str {
        self.record
    }

    /// Returns the path of the offending field.
    ///
    /// The path is empty when the whole payload has the wrong shape.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Returns the [`NormalizationCause`].
    #[must_use]
    pub const fn cause(&self) -> &NormalizationCause {
        &self.cause
    }

    pub(crate) fn from_deserializer(
        record: &'static str,
        error: serde_path_to_error::Error<serde_json::Error>,
    ) -> Self {
        let parent = if error.path().iter().next().is_none() {
            String::new()
        } else {
            error.path().to_string()
        };
        let reason = error.into_inner().to_string();

        // Missing fields are reported on the enclosing object.
        match missing_field(&reason) {
            Some(name) if parent.is_empty() => {
                Self::new(record, name.to_owned(), NormalizationCause::Missing)
            }
            Some(name) => Self::new(
                record,
                format!("{parent}.{name}"),
                NormalizationCause::Missing,
            ),
            None => Self::new(record, parent, NormalizationCause::Invalid { reason }),
        }
    }
}

fn missing_field(reason: &str) -> Option<&str> {
    reason.strip_prefix("missing field `")?.split('`').next()
}

impl std::fmt::Display for NormalizationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.record)?;

        let field = &self.field;
        match &self.cause {
            NormalizationCause::Missing => write!(f, "field `{field}` is missing"),
            NormalizationCause::Invalid { reason } if field.is_empty() => {
                write!(f, "payload is invalid: {reason}")
            }
            NormalizationCause::Invalid { reason } => {
                write!(f, "field `{field}` is invalid: {reason}")
            }
            NormalizationCause::NotAnObject => "payload is not an object".fmt(f),
            NormalizationCause::NotAList => "payload is not a list".fmt(f),
        }
    }
}

impl std::error::Error for NormalizationError {}
