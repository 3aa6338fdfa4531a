//! Utility functions for moving values in and out of [`Bytes`].
//!

use anyhow::{ensure, Result};
use bytes::{Buf, Bytes};

/// Read an entire [`Bytes`] slice into a [`String`].
///
/// Note that the entire slice will be read into the string.
/// It is the caller's responsibility to ensure the slice is
/// of the correct length. Failure to do so may result in
/// an error being returned, or the string data being incorrect.
///
/// Returns an error if the slice contains invalid UTF-8.
pub fn string_from_bytes(buf: Bytes) -> Result<String> {
    Ok(String::from_utf8(buf.as_ref().into())?)
}

/// Encode an intermediate count as 8 big-endian bytes.
#[inline]
pub fn count_to_bytes(count: u64) -> Bytes {
    Bytes::copy_from_slice(&count.to_be_bytes())
}

/// Decode an intermediate count written by [`count_to_bytes`].
///
/// Returns an error unless `buf` is exactly 8 bytes long.
pub fn count_from_bytes(mut buf: Bytes) -> Result<u64> {
    ensure!(
        buf.len() == 8,
        "expected an 8-byte count, got {} bytes",
        buf.len()
    );
    Ok(buf.get_u64())
}

/// Serialize workload arguments the way the engine hands them over.
pub fn args_to_bytes(args: &[String]) -> Result<Bytes> {
    Ok(Bytes::from(serde_json::to_vec(args)?))
}
