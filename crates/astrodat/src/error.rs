use thiserror::Error;

/// A fault recorded by a [`BufferedSource`](crate::source::BufferedSource).
///
/// Source errors are sticky: once one occurs, every subsequent read reports
/// end of input and the error stays queryable until the source is dropped.
/// This lets callers tell a clean end of stream from a truncated one.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The underlying reader reported an I/O fault.
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),

    /// A single token grew past the source's buffer capacity.
    #[error("token exceeds buffer capacity of {0} bytes")]
    TokenTooLong(usize),
}
