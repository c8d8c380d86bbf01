//! The payload decoder. Control bits are consumed least significant bit
//! first, a set bit selects a literal, and a back-reference is two bytes:
//!
//! ```text
//!   b0: LLLL PPPP   b1: PPPP PPPP
//! ```
//!
//! where P is an absolute 12-bit window slot and L a biased match length.

use super::flags::{BitOrder, FlagCursor};
use super::window::Window;
use super::{truncated, RefPolicy, BREAK_EVEN, WINDOW_SIZE};
use crate::utils::cursor::ByteCursor;
use crate::{DecodeError, Decoder};

/// An upper bound on the output produced per input byte. A two byte match
/// copies at most 17 bytes.
const MAX_EXPANSION: usize = 17;

/// An LZSS Decoder.
pub struct LzssDecoder<'a> {
    /// The compressed input.
    input: &'a [u8],
    /// The output stream.
    output: &'a mut Vec<u8>,
    /// The exact number of bytes to produce.
    target_len: usize,
    /// What to do with references to unwritten window slots.
    policy: RefPolicy,
}

impl<'a> LzssDecoder<'a> {
    /// Sets the handling of references to unwritten window slots.
    pub fn set_policy(&mut self, policy: RefPolicy) {
        self.policy = policy
    }

    /// Resolve a read of the unwritten window slot 'slot'.
    fn unwritten_slot(
        &self,
        slot: usize,
        produced: usize,
    ) -> Result<u8, DecodeError> {
        match self.policy {
            RefPolicy::Strict => Err(DecodeError::InvalidBackReference {
                position: slot,
                produced,
            }),
            RefPolicy::ZeroFill => {
                log::warn!(
                    "Zero-filling unwritten window slot {} at output byte {}",
                    slot,
                    produced
                );
                Ok(0)
            }
        }
    }

    fn expand_into(&mut self) -> Result<(usize, usize), DecodeError> {
        let mut stream = ByteCursor::new(self.input);
        let mut flags = FlagCursor::new(BitOrder::LsbFirst);
        let mut window = Window::new();
        let mut remaining = self.target_len;
        let mut written = 0;

        while remaining > 0 {
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
                remaining -= 1;
                continue;
            }

            let pair = stream
                .take(2)
                .ok_or_else(|| truncated(&stream, written))?;
            let position = ((pair[0] as usize & 0xf) << 8) | pair[1] as usize;
            let match_len = (pair[0] >> 4) as usize + BREAK_EVEN;

            // A match copies one byte more than its length, except for the
            // one that reaches the end of the output, which is cut to the
            // remaining budget.
            let count = if match_len < remaining {
                match_len + 1
            } else {
                remaining
            };

            // Each copied byte is written to the window before the next one is
            // read, which lets a match overlap the bytes it produces.
            for i in 0..count {
                let slot = (position + i) & (WINDOW_SIZE - 1);
                let c = match window.get(slot) {
                    Some(c) => c,
                    None => self.unwritten_slot(slot, written + i)?,
                };
                self.output.push(c);
                window.write(c);
            }
            written += count;
            remaining -= count;
        }

        Ok((stream.position(), written))
    }

    /// Decode the input. Returns the number of bytes consumed and the number
    /// of bytes written if the operation succeeded.
    fn decode_impl(&mut self) -> Result<(usize, usize), DecodeError> {
        let start = self.output.len();
        // The target length is not trusted, so only reserve what the input
        // could possibly expand to.
        self.output.reserve(
            self.target_len
                .min(self.input.len().saturating_mul(MAX_EXPANSION)),
        );
        let res = self.expand_into();
        match &res {
            Ok((read, written)) => log::debug!(
                "Expanded {} compressed bytes into {} bytes",
                read,
                written
            ),
            Err(_) => self.output.truncate(start),
        }
        res
    }
}

impl<'a> Decoder<'a> for LzssDecoder<'a> {
    fn new(input: &'a [u8], output: &'a mut Vec<u8>, target_len: usize) -> Self {
        Self {
            input,
            output,
            target_len,
            policy: RefPolicy::Strict,
        }
    }

    fn decode(&mut self) -> Result<(usize, usize), DecodeError> {
        self.decode_impl()
    }
}
