/// Classification of failures for the fallback chain.
///
/// Used to decide whether a failed source should end the request or hand
/// over to the next priority source.
///
/// # Behavior Summary
///
/// | Class | Try Next Source? | Surfaced to Caller? |
/// |-------|------------------|---------------------|
/// | `InvalidInput` | No | Yes |
/// | `SourceEmpty` | Yes | No |
/// | `SourceUnreachable` | Yes (logged) | No |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The request itself is malformed (e.g. bad VIN length).
    /// Rejected before any I/O; no source can help.
    InvalidInput,

    /// The source answered with zero usable records.
    /// Silently falls through to the next source.
    SourceEmpty,

    /// Network failure, timeout or error payload.
    /// Logged, then treated exactly like `SourceEmpty`.
    SourceUnreachable,
}

impl ErrorClass {
    /// Whether the chain should continue with the next source.
    pub fn falls_through(self) -> bool {
        !matches!(self, Self::InvalidInput)
    }
}
