//! Error types for sqlcraft

use thiserror::Error;

/// Result type alias for sqlcraft operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Error types for building, parsing and mapping SQL.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SqlError {
    /// Builder misuse: missing separator, missing prefix/suffix, or a
    /// write-once clause invoked twice.
    #[error("Builder misuse: {0}")]
    Builder(String),

    /// SQL text could not be split into clauses or reduced into a builder.
    #[error("Parse error: {message} (chunks: [{}]) in `{sql}`", .chunks.join(", "))]
    Parse {
        message: String,
        chunks: Vec<String>,
        sql: String,
    },

    /// More values were supplied than the template has placeholders for.
    #[error("Too many parameters: `{template}` has {slots} placeholder(s), {given} supplied")]
    TooManyParameters {
        template: String,
        slots: usize,
        given: usize,
    },

    /// Fewer values were supplied than the template has placeholders for.
    #[error("Too few parameters: `{template}` has {slots} placeholder(s), {given} supplied")]
    TooFewParameters {
        template: String,
        slots: usize,
        given: usize,
    },

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// A value could not be converted to the requested Rust type.
    #[error("Conversion error: expected {expected}, found {found}")]
    Conversion { expected: String, found: String },

    /// Script loading error
    #[error("I/O error: {0}")]
    Io(String),
}

impl SqlError {
    /// Create a builder-misuse error
    pub fn builder(message: impl Into<String>) -> Self {
        Self::Builder(message.into())
    }

    /// Create a parse error carrying the offending chunk sequence and source text.
    pub fn parse(message: impl Into<String>, chunks: Vec<String>, sql: impl Into<String>) -> Self {
        Self::Parse {
            message: message.into(),
            chunks,
            sql: sql.into(),
        }
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Create a conversion error
    pub fn conversion(expected: impl Into<String>, found: impl Into<String>) -> Self {
        Self::Conversion {
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Compare a template's placeholder count with the number of supplied
    /// values, returning the matching parameter-count error on mismatch.
    pub fn check_parameter_count(template: &str, slots: usize, given: usize) -> SqlResult<()> {
        if slots == given {
            return Ok(());
        }
        let template = template.to_string();
        if given > slots {
            Err(Self::TooManyParameters {
                template,
                slots,
                given,
            })
        } else {
            Err(Self::TooFewParameters {
                template,
                slots,
                given,
            })
        }
    }

    /// Check if this is a builder-misuse error
    pub fn is_builder(&self) -> bool {
        matches!(self, Self::Builder(_))
    }

    /// Check if this is a parse error
    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    /// Check if this is a parameter-count error
    pub fn is_parameter_count(&self) -> bool {
        matches!(
            self,
            Self::TooManyParameters { .. } | Self::TooFewParameters { .. }
        )
    }
}

impl From<std::io::Error> for SqlError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
