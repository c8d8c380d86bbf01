//! A collection of modules that implement LZSS expansion.
//!
//! A compressed stream interleaves control bytes with tokens. Each control
//! byte selects, one bit per token, between a literal byte and a two-byte
//! back-reference into a 4096-byte sliding window of recently decoded output.
//! The stream carries no terminator, so the caller supplies the decoded size.

mod decoder;
mod flags;
pub mod legacy;
mod window;

pub use decoder::LzssDecoder;
pub use flags::{BitOrder, FlagCursor};
pub use window::Window;

use crate::utils::cursor::ByteCursor;
use crate::{DecodeError, Decoder};

/// The number of bits in a window position.
pub const INDEX_BITS: usize = 12;
/// The number of bits in an encoded match length.
pub const LENGTH_BITS: usize = 4;
pub const WINDOW_SIZE: usize = 1 << INDEX_BITS;
/// Matches shorter than this are cheaper to store as literals.
pub const BREAK_EVEN: usize = (1 + INDEX_BITS + LENGTH_BITS) / 9;

/// How a back-reference to a window slot that was never written is handled.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RefPolicy {
    /// Abort the decode with `DecodeError::InvalidBackReference`.
    #[default]
    Strict,
    /// Emit a zero byte in place of the missing data and keep decoding.
    ZeroFill,
}

/// The error for a stream that ran out at the cursor position.
fn truncated(stream: &ByteCursor, produced: usize) -> DecodeError {
    DecodeError::MalformedInput {
        offset: stream.position(),
        produced,
    }
}

/// Expand 'input' into exactly 'target_len' bytes, rejecting any reference
/// to unwritten window data.
pub fn expand(input: &[u8], target_len: usize) -> Result<Vec<u8>, DecodeError> {
    let mut output = Vec::new();
    LzssDecoder::new(input, &mut output, target_len).decode()?;
    Ok(output)
}

#[test]
fn test_break_even() {
    assert_eq!(BREAK_EVEN, 1);
    assert_eq!(WINDOW_SIZE, 4096);
}
