//! Error and result types returned from the extension runtime.

use std::error::Error as ErrorTrait;
use std::fmt::{Display, Formatter};

/// The result type returned from most functions in this crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The error type for a single extension-function invocation.
///
/// Every variant is local to the invocation that produced it: a failed call
/// leaves the resource tables and the camera/window state exactly as they
/// were for every other handle and field.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The argument buffer did not match the function's field schema: it
    /// ran out of bytes mid-field, a string field had no NUL terminator
    /// inside the buffer, a string field was not valid UTF-8, or an
    /// enumeration field carried an unknown discriminant.
    MalformedArguments(ArgumentFault),
    /// A resource handle was negative, outside the table's capacity, or
    /// referred to an empty slot.
    InvalidHandle(i32),
    /// The result buffer could not be allocated. No partial buffer is ever
    /// handed to the caller.
    AllocationFailure(usize),
    /// The dispatch registry has no function registered under this name.
    UnknownFunction(String),
    /// The function requires an open window but `initwindow` has not been
    /// called on this runtime.
    WindowNotReady,
}

/// The specific way an argument buffer failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ArgumentFault {
    /// A fixed-width field needed more bytes than remained in the buffer.
    Truncated {
        /// Bytes the field required.
        needed: usize,
        /// Bytes left in the buffer at the field's offset.
        remaining: usize,
    },
    /// A string field reached the end of the buffer without a NUL byte.
    UnterminatedString,
    /// A string field's bytes were not valid UTF-8.
    InvalidStringEncoding,
    /// An enumeration field carried a value outside the closed set.
    UnknownEnumValue(i32),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::MalformedArguments(fault) => {
                write!(f, "malformed argument buffer: {fault}")
            }
            Error::InvalidHandle(handle) => write!(f, "invalid resource handle {handle}"),
            Error::AllocationFailure(len) => {
                write!(f, "failed to allocate {len}-byte result buffer")
            }
            Error::UnknownFunction(name) => write!(f, "no extension function named `{name}`"),
            Error::WindowNotReady => write!(f, "window has not been initialized"),
        }
    }
}

impl Display for ArgumentFault {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ArgumentFault::Truncated { needed, remaining } => write!(
                f,
                "field needs {needed} byte(s) but only {remaining} remain"
            ),
            ArgumentFault::UnterminatedString => {
                write!(f, "string field has no NUL terminator")
            }
            ArgumentFault::InvalidStringEncoding => {
                write!(f, "string field is not valid UTF-8")
            }
            ArgumentFault::UnknownEnumValue(value) => {
                write!(f, "enumeration field has unknown value {value}")
            }
        }
    }
}

impl ErrorTrait for Error {}

impl From<ArgumentFault> for Error {
    fn from(fault: ArgumentFault) -> Self {
        Error::MalformedArguments(fault)
    }
}
