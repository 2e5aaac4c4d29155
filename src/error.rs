use thiserror::Error;

/// Errors raised by the transformation core.
///
/// Every operation is a single pure pass, so an error simply aborts that
/// computation; there is no partial state left behind.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OctsError {
    /// Misaligned, non-monotonic, out-of-range or non-finite input sequences
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Statistics requested on zero observations
    #[error("cannot summarise an empty sample")]
    EmptySample,

    /// Colour name not present in the named-colour table
    #[error("unknown colour name: {0:?}")]
    UnknownColor(String),

    /// Line style name not one of solid / dotted / dashed
    #[error("unknown line style: {0:?}")]
    UnknownStyle(String),

    /// Plot identifier the series builder cannot dispatch on
    #[error("unsupported plot kind: {0:?}")]
    UnsupportedPlotKind(String),
}

/// Type alias for Results using OctsError
pub type Result<T> = std::result::Result<T, OctsError>;
