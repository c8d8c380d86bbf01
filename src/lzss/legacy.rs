//! The legacy LZSS variant.
//!
//! This is a second, incompatible framing of the same codec family that was
//! never wired into payload processing. Control bits are consumed most
//! significant bit first, and a back-reference is two bytes holding a
//! relative distance and a length:
//!
//! ```text
//!   hi: DDDD DDDD   lo: DDDD LLLL
//! ```
//!
//! The distance counts back from the current output position and the copy
//! is `L + 3` bytes long. It is kept only to compare against archive samples
//! and must not be mixed with `LzssDecoder`.

use super::flags::{BitOrder, FlagCursor};
use super::window::Window;
use super::{truncated, RefPolicy};
use crate::utils::cursor::ByteCursor;
use crate::{DecodeError, Decoder};

/// The length of the shortest match.
pub const MIN_MATCH: usize = 3;

/// A Decoder for the legacy variant.
pub struct LegacyDecoder<'a> {
    /// The compressed input.
    input: &'a [u8],
    /// The output stream.
    output: &'a mut Vec<u8>,
    /// The exact number of bytes to produce.
    target_len: usize,
    /// What to do with references that reach before the start of the output.
    policy: RefPolicy,
}

impl<'a> LegacyDecoder<'a> {
    /// Sets the handling of references to unwritten window slots.
    pub fn set_policy(&mut self, policy: RefPolicy) {
        self.policy = policy
    }

    fn expand_into(&mut self) -> Result<(usize, usize), DecodeError> {
        let mut stream = ByteCursor::new(self.input);
        let mut flags = FlagCursor::new(BitOrder::MsbFirst);
        let mut window = Window::new();
        let mut written = 0;

        while written < self.target_len {
            let is_literal = flags
                .next_bit(&mut stream)
                .ok_or_else(|| truncated(&stream, written))?;

            if is_literal {
                let c = stream
                    .read_u8()
                    .ok_or_else(|| truncated(&stream, written))?;
                self.output.push(c);
                window.write(c);
                written += 1;
                continue;
            }

            let pair = stream
                .take(2)
                .ok_or_else(|| truncated(&stream, written))?;
            let distance = ((pair[0] as usize) << 4) | (pair[1] as usize >> 4);
            let length = (pair[1] & 0xf) as usize + MIN_MATCH;
            let count = length.min(self.target_len - written);

            // A reference is judged as a whole: one that reaches before the
            // start of the output is replaced by 'count' zeros.
            if distance == 0 || distance > written {
                if self.policy == RefPolicy::Strict {
                    return Err(DecodeError::InvalidBackReference {
                        position: distance,
                        produced: written,
                    });
                }
                log::warn!(
                    "Zero-filling {} bytes for a reference {} bytes back at output byte {}",
                    count,
                    distance,
                    written
                );
                for _ in 0..count {
                    self.output.push(0);
                    window.write(0);
                }
                written += count;
                continue;
            }

            for i in 0..count {
                let c = window.read(distance).ok_or(
                    DecodeError::InvalidBackReference {
                        position: distance,
                        produced: written + i,
                    },
                )?;
                self.output.push(c);
                window.write(c);
            }
            written += count;
        }

        Ok((stream.position(), written))
    }
}

impl<'a> Decoder<'a> for LegacyDecoder<'a> {
    fn new(input: &'a [u8], output: &'a mut Vec<u8>, target_len: usize) -> Self {
        Self {
            input,
            output,
            target_len,
            policy: RefPolicy::Strict,
        }
    }

    fn decode(&mut self) -> Result<(usize, usize), DecodeError> {
        let start = self.output.len();
        let res = self.expand_into();
        if res.is_err() {
            self.output.truncate(start);
        }
        res
    }
}

/// Expand 'input' with the legacy framing into exactly 'target_len' bytes.
pub fn expand(input: &[u8], target_len: usize) -> Result<Vec<u8>, DecodeError> {
    let mut output = Vec::new();
    LegacyDecoder::new(input, &mut output, target_len).decode()?;
    Ok(output)
}
