//! Error types for PER decoding and encoding.

use thiserror::Error;

/// The closed set of failure kinds the codec reports.
///
/// Decoding fails fast: the first operation that cannot make progress
/// returns one of these kinds and no partial value is produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A read was attempted past the end of the backing buffer.
    #[error("end of buffer")]
    EndOfBuffer,

    /// A size or range constraint was not honored by the input, or the
    /// nesting depth limit was exceeded.
    #[error("constraint violation")]
    ConstraintViolation,

    /// A root CHOICE index outside the declared alternatives.
    #[error("invalid choice index")]
    InvalidChoiceIndex,

    /// An enumeration value outside the root set, under strict decoding.
    #[error("invalid enumeration value")]
    InvalidEnumerationValue,

    /// A length determinant that would address past the end of the buffer
    /// or past platform-representable sizes.
    #[error("length overflow")]
    LengthOverflow,

    /// The allocator declined to reserve space for a decoded value.
    #[error("allocation failure")]
    AllocationFailure,
}

/// A codec failure: the kind, plus the octet offset at which it was raised.
///
/// The offset is relative to the buffer the failing cursor was reading;
/// for a failure inside an open type that is the offset within the
/// container, not within the outermost message.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind} at byte {offset}")]
pub struct Error {
    pub kind: ErrorKind,
    pub offset: usize,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

/// Result type alias for all codec operations.
pub type Result<T> = std::result::Result<T, Error>;
