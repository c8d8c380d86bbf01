//! Unit files (.uni) carry an LZSS payload behind a ten byte preamble:
//! four reserved bytes, the number of units (i16), and the decompressed size
//! (i32), both little endian.

use crate::lzss::LzssDecoder;
use crate::utils::cursor::ByteCursor;
use crate::{ArchiveError, Context, DecodeError, Decoder};

/// The number of bytes before the compressed stream.
pub const PREAMBLE_LEN: usize = 10;

/// The fields of the preamble.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UniHeader {
    pub num_units: i16,
    pub decompressed_size: i32,
}

impl UniHeader {
    pub fn parse(input: &[u8]) -> Result<Self, ArchiveError> {
        let truncated = ArchiveError::Truncated {
            what: "unit file preamble",
            offset: input.len(),
        };
        let mut cursor = ByteCursor::new(input);
        let mut fields = || {
            // Reserved.
            cursor.take(4)?;
            Some((cursor.read_i16_le()?, cursor.read_i32_le()?))
        };
        let (num_units, decompressed_size) = fields().ok_or(truncated)?;
        Ok(Self {
            num_units,
            decompressed_size,
        })
    }

    /// Check the decompressed size against the limit in 'ctx'. The header is
    /// not authenticated, so zero, negative and oversized values are refused
    /// before anything is allocated.
    pub fn target_len(&self, ctx: Context) -> Result<usize, DecodeError> {
        let requested = self.decompressed_size as i64;
        let invalid = DecodeError::InvalidRequest {
            requested,
            limit: ctx.max_output(),
        };
        match usize::try_from(self.decompressed_size) {
            Ok(len) if len > 0 && len <= ctx.max_output() => Ok(len),
            _ => Err(invalid),
        }
    }
}

/// A decoded unit file.
#[derive(Clone, Debug)]
pub struct UniFile {
    pub header: UniHeader,
    pub data: Vec<u8>,
}

impl UniFile {
    /// Parse the preamble of 'input' and expand the payload that follows it.
    pub fn decode(input: &[u8], ctx: Context) -> Result<Self, ArchiveError> {
        let header = UniHeader::parse(input)?;
        let target_len = header.target_len(ctx)?;
        let payload = &input[PREAMBLE_LEN..];
        log::debug!(
            "Unit file header: {} units, {} bytes decompressed, {} bytes compressed",
            header.num_units,
            target_len,
            payload.len()
        );

        let mut data = Vec::new();
        let mut decoder = LzssDecoder::new(payload, &mut data, target_len);
        decoder.set_policy(ctx.policy());
        let (read, _) = decoder.decode()?;
        if read < payload.len() {
            log::debug!(
                "Ignoring {} trailing bytes after the payload",
                payload.len() - read
            );
        }

        Ok(Self { header, data })
    }
}
