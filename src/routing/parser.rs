//! Request path parsing.
//!
//! # Responsibilities
//! - Split `/service/rest...` into a service token and a remainder path
//! - Runs on the hot path for every request: zero-copy, no allocation
//!
//! # Design Decisions
//! - Both outputs are subslices of the input buffer
//! - The remainder keeps its leading separator and is forwarded verbatim
//!   as the upstream request path

use crate::error::GatewayError;

/// Minimum parsable shape is `/x/y`.
const MIN_PATH_LEN: usize = 4;

/// Split a request path into `(service token, remainder path)`.
///
/// The leading separator is stripped, then the first `/` in what remains
/// marks the boundary: bytes before it are the service token, bytes from it
/// onward (inclusive) are the remainder.
///
/// Fails with [`GatewayError::PathTooShort`] for inputs under 4 bytes and
/// [`GatewayError::MalformedPath`] when no boundary separator exists.
pub fn parse(path: &[u8]) -> Result<(&[u8], &[u8]), GatewayError> {
    if path.len() < MIN_PATH_LEN {
        return Err(GatewayError::PathTooShort);
    }

    let stripped = &path[1..];

    match stripped.iter().position(|&b| b == b'/') {
        Some(index) => Ok((&stripped[..index], &stripped[index..])),
        None => Err(GatewayError::MalformedPath),
    }
}
