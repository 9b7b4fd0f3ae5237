//! Owned result buffers handed back to the caller.

use crate::error::{Error, Result};

/// A result buffer produced by an extension function.
///
/// The buffer is freshly allocated by the callee and its ownership
/// transfers to the caller at return; in the safe API that is ordinary
/// move semantics, and across the C boundary it is the
/// [`write_result`](crate::ffi::write_result) /
/// [`extray_buffer_free`](crate::ffi::extray_buffer_free) pair.
///
/// Allocation is all-or-nothing: if the bytes cannot be allocated the
/// invocation fails with [`Error::AllocationFailure`] and no partial
/// buffer escapes.
///
/// Fixed-width scalar results use the same width and byte-order
/// conventions as [`FieldCursor`](crate::args::FieldCursor) reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutBuf {
    bytes: Vec<u8>,
}

impl OutBuf {
    /// Allocates a buffer holding a copy of `bytes`.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] if the allocation fails.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(bytes.len())
            .map_err(|_| Error::AllocationFailure(bytes.len()))?;
        buf.extend_from_slice(bytes);
        Ok(Self { bytes: buf })
    }

    /// A 1-byte buffer holding `value`.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] if the allocation fails.
    pub fn from_u8(value: u8) -> Result<Self> {
        Self::from_bytes(&[value])
    }

    /// A 4-byte buffer holding `value` in host byte order.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] if the allocation fails.
    pub fn from_i32(value: i32) -> Result<Self> {
        Self::from_bytes(&value.to_ne_bytes())
    }

    /// A 4-byte buffer holding `value` in host byte order.
    ///
    /// # Errors
    ///
    /// [`Error::AllocationFailure`] if the allocation fails.
    pub fn from_f32(value: f32) -> Result<Self> {
        Self::from_bytes(&value.to_ne_bytes())
    }

    /// Length of the buffer in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the buffer is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The buffer contents.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the buffer, yielding its bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Consumes the buffer, yielding a boxed slice sized exactly to its
    /// length. Used by the FFI layer to hand ownership across the C
    /// boundary.
    #[must_use]
    pub fn into_boxed_slice(self) -> Box<[u8]> {
        self.bytes.into_boxed_slice()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_buffers_are_exactly_sizeof() {
        assert_eq!(OutBuf::from_u8(1).unwrap().len(), 1);
        assert_eq!(OutBuf::from_i32(42).unwrap().len(), 4);
        assert_eq!(OutBuf::from_f32(6.75).unwrap().len(), 4);
    }

    #[test]
    fn float_buffer_round_trips() {
        let buf = OutBuf::from_f32(6.75).unwrap();
        let bytes: [u8; 4] = buf.as_slice().try_into().unwrap();
        assert_eq!(f32::from_ne_bytes(bytes), 6.75);
    }

    #[test]
    fn boxed_slice_has_no_spare_capacity() {
        let boxed = OutBuf::from_i32(9).unwrap().into_boxed_slice();
        assert_eq!(boxed.len(), 4);
    }
}
