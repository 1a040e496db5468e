//! Error types for sqlforge

use std::borrow::Cow;
use std::sync::Arc;

use thiserror::Error;

/// Result type alias for sqlforge operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Errors produced while building or rendering a statement.
///
/// Every variant is cheap to clone so that a dataset can carry its first
/// error through any number of derived copies.
#[derive(Debug, Clone, Error)]
pub enum BuildError {
    /// The dialect lacks a capability the statement needs.
    #[error("builder: dialect does not support {feature} [dialect={dialect}]")]
    UnsupportedFeature {
        feature: Cow<'static, str>,
        dialect: String,
    },

    /// An identifier with no schema, table or column part.
    #[error(
        "builder: a empty identifier was encountered, please specify a \"schema\", \"table\" or \"column\""
    )]
    EmptyIdentifier,

    /// An operator the dialect has no token for.
    #[error("builder: {kind} operator '{op}' not supported")]
    UnsupportedOperator { kind: &'static str, op: String },

    /// An `Op` key that names no known comparison.
    #[error("builder: unsupported expression type {0}")]
    UnsupportedExpression(String),

    /// Multi-row inserts whose rows disagree on columns.
    #[error("builder: {0}")]
    RowShape(String),

    /// A join kind that needs ON/USING was given neither.
    #[error("builder: join condition required for conditioned join {0}")]
    JoinConditionRequired(String),

    /// A regular expression that cannot be expressed as a LIKE pattern.
    #[error("builder: unable to translate regular expression '{0}' into a LIKE pattern")]
    InvalidPattern(String),

    /// A value that could not be encoded as SQL.
    #[error("builder_encode_error: Unable to encode value {0}")]
    Encode(String),

    /// Error attached by the caller with `set_error`.
    #[error("{0}")]
    Custom(Arc<dyn std::error::Error + Send + Sync>),

    /// Other errors
    #[error("builder: {0}")]
    Message(String),
}

impl BuildError {
    /// Create an unsupported-feature error for a dialect.
    pub fn unsupported(feature: impl Into<Cow<'static, str>>, dialect: impl Into<String>) -> Self {
        Self::UnsupportedFeature {
            feature: feature.into(),
            dialect: dialect.into(),
        }
    }

    /// Create a row shape error.
    pub fn row_shape(message: impl Into<String>) -> Self {
        Self::RowShape(message.into())
    }

    /// Create an encode error from anything printable.
    pub fn encode(value: impl std::fmt::Debug) -> Self {
        Self::Encode(format!("{value:?}"))
    }

    /// Wrap a caller-supplied error.
    pub fn custom<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(err))
    }

    /// Create an ad-hoc error with the `builder: ` prefix.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }

    /// Check if this is an unsupported dialect feature error
    pub fn is_unsupported_feature(&self) -> bool {
        matches!(self, Self::UnsupportedFeature { .. })
    }

    /// Check if this is an empty identifier error
    pub fn is_empty_identifier(&self) -> bool {
        matches!(self, Self::EmptyIdentifier)
    }

    /// Check if this is a row shape error
    pub fn is_row_shape(&self) -> bool {
        matches!(self, Self::RowShape(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_feature_message() {
        let err = BuildError::unsupported("RETURNING clause", "mysql");
        assert_eq!(
            err.to_string(),
            "builder: dialect does not support RETURNING clause [dialect=mysql]"
        );
        assert!(err.is_unsupported_feature());
    }

    #[test]
    fn empty_identifier_message() {
        assert_eq!(
            BuildError::EmptyIdentifier.to_string(),
            r#"builder: a empty identifier was encountered, please specify a "schema", "table" or "column""#
        );
    }

    #[test]
    fn encode_message() {
        let err = BuildError::encode("NaN");
        assert_eq!(
            err.to_string(),
            "builder_encode_error: Unable to encode value \"NaN\""
        );
    }

    #[test]
    fn custom_error_is_displayed_verbatim() {
        let io = std::io::Error::other("boom");
        let err = BuildError::custom(io);
        assert_eq!(err.to_string(), "boom");
        let cloned = err.clone();
        assert_eq!(cloned.to_string(), "boom");
    }
}
