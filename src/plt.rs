//! Pilot files (.plt) hold fixed-layout pilot records followed by callsign
//! data:
//!
//! ```text
//!   i16 num_pilots
//!   num_pilots x { i16 usage | u8 voice_id | u8 photo_id }
//!   i16 num_callsigns
//!   num_callsigns bytes
//! ```

use std::fmt;

use crate::utils::cursor::ByteCursor;
use crate::ArchiveError;

const PILOT_RECORD_LEN: usize = 4;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PilotInfo {
    pub usage: i16,
    pub voice_id: u8,
    pub photo_id: u8,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PltFile {
    pub pilots: Vec<PilotInfo>,
    pub callsigns: Vec<u8>,
}

/// Read a record count and check that 'cursor' holds 'record_len' bytes for
/// each record.
fn read_count(
    cursor: &mut ByteCursor,
    what: &'static str,
    record_len: usize,
) -> Result<usize, ArchiveError> {
    let offset = cursor.position();
    let count = cursor
        .read_i16_le()
        .ok_or(ArchiveError::Truncated { what, offset })?;
    let bad_count = ArchiveError::BadCount {
        what,
        count: count as i64,
    };
    let count = usize::try_from(count).map_err(|_| bad_count)?;
    if count * record_len > cursor.remaining() {
        return Err(ArchiveError::Truncated {
            what,
            offset: cursor.position(),
        });
    }
    Ok(count)
}

impl PltFile {
    pub fn parse(input: &[u8]) -> Result<Self, ArchiveError> {
        let mut cursor = ByteCursor::new(input);

        let num_pilots = read_count(&mut cursor, "pilot", PILOT_RECORD_LEN)?;
        let mut pilots = Vec::with_capacity(num_pilots);
        for _ in 0..num_pilots {
            let record = cursor.take(PILOT_RECORD_LEN).ok_or(
                ArchiveError::Truncated {
                    what: "pilot",
                    offset: cursor.position(),
                },
            )?;
            pilots.push(PilotInfo {
                usage: i16::from_le_bytes([record[0], record[1]]),
                voice_id: record[2],
                photo_id: record[3],
            });
        }

        let num_callsigns = read_count(&mut cursor, "callsign", 1)?;
        let callsigns = cursor
            .take(num_callsigns)
            .ok_or(ArchiveError::Truncated {
                what: "callsign",
                offset: cursor.position(),
            })?
            .to_vec();

        if !cursor.is_empty() {
            log::debug!(
                "Ignoring {} trailing bytes in pilot file",
                cursor.remaining()
            );
        }
        Ok(Self { pilots, callsigns })
    }

    /// Serialize the records in the layout that 'parse' reads.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArchiveError> {
        let count = |what, len: usize| {
            i16::try_from(len).map_err(|_| ArchiveError::BadCount {
                what,
                count: len as i64,
            })
        };
        let num_pilots = count("pilot", self.pilots.len())?;
        let num_callsigns = count("callsign", self.callsigns.len())?;

        let mut out = Vec::with_capacity(
            4 + self.pilots.len() * PILOT_RECORD_LEN + self.callsigns.len(),
        );
        out.extend(num_pilots.to_le_bytes());
        for pilot in &self.pilots {
            out.extend(pilot.usage.to_le_bytes());
            out.push(pilot.voice_id);
            out.push(pilot.photo_id);
        }
        out.extend(num_callsigns.to_le_bytes());
        out.extend(&self.callsigns);
        Ok(out)
    }
}

impl fmt::Display for PltFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of pilots: {}", self.pilots.len())?;
        for (i, pilot) in self.pilots.iter().enumerate() {
            writeln!(
                f,
                "Pilot {}: Usage={}, Voice ID={}, Photo ID={}",
                i, pilot.usage, pilot.voice_id, pilot.photo_id
            )?;
        }
        writeln!(f, "Number of callsigns: {}", self.callsigns.len())?;
        write!(f, "Callsign data: {:?}", self.callsigns)
    }
}
