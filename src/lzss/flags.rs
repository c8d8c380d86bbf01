//! The control bits that select between literals and back-references.

use crate::utils::cursor::ByteCursor;

/// The order in which the bits of a control byte are handed out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BitOrder {
    /// Bit 0 first. This is the order used by archive payloads.
    LsbFirst,
    /// Bit 7 first. Only the legacy decoder reads control bytes this way.
    MsbFirst,
}

/// The mask value that signals that every bit of the control byte was used.
const RELOAD: u16 = 0x100;

/// Hands out one control bit at a time, pulling a fresh control byte from the
/// compressed stream after every eight bits.
#[derive(Clone, Debug)]
pub struct FlagCursor {
    order: BitOrder,
    /// The current control byte, stored so that the next bit is always tested
    /// by 'mask' regardless of the bit order.
    control: u8,
    /// Selects the next bit of 'control': 1, 2, 4 .. 128, then RELOAD.
    mask: u16,
}

impl FlagCursor {
    /// Creates a cursor with no control byte loaded. The first call to
    /// 'next_bit' reads one.
    pub fn new(order: BitOrder) -> Self {
        Self {
            order,
            control: 0,
            mask: RELOAD,
        }
    }

    /// Returns the next control bit, or None if a control byte was needed and
    /// 'input' is exhausted.
    pub fn next_bit(&mut self, input: &mut ByteCursor) -> Option<bool> {
        if self.mask == RELOAD {
            let byte = input.read_u8()?;
            self.control = match self.order {
                BitOrder::LsbFirst => byte,
                BitOrder::MsbFirst => byte.reverse_bits(),
            };
            self.mask = 1;
        }
        let bit = u16::from(self.control) & self.mask != 0;
        self.mask <<= 1;
        Some(bit)
    }
}

#[test]
fn test_flags_lsb_first() {
    let input = [0b1010_0011, 0x01];
    let mut stream = ByteCursor::new(&input);
    let mut flags = FlagCursor::new(BitOrder::LsbFirst);
    let bits: Vec<bool> = (0..8).map(|_| flags.next_bit(&mut stream).unwrap()).collect();
    assert_eq!(
        bits,
        [true, true, false, false, false, true, false, true]
    );
    assert_eq!(stream.position(), 1);
    // The ninth bit comes from the second control byte.
    assert_eq!(flags.next_bit(&mut stream), Some(true));
    assert_eq!(stream.position(), 2);
}

#[test]
fn test_flags_msb_first() {
    let input = [0b1010_0011];
    let mut stream = ByteCursor::new(&input);
    let mut flags = FlagCursor::new(BitOrder::MsbFirst);
    let bits: Vec<bool> = (0..8).map(|_| flags.next_bit(&mut stream).unwrap()).collect();
    assert_eq!(
        bits,
        [true, false, true, false, false, false, true, true]
    );
}

#[test]
fn test_flags_exhausted() {
    let mut stream = ByteCursor::new(&[]);
    let mut flags = FlagCursor::new(BitOrder::LsbFirst);
    assert_eq!(flags.next_bit(&mut stream), None);

    let input = [0xff];
    let mut stream = ByteCursor::new(&input);
    for _ in 0..8 {
        assert_eq!(flags.next_bit(&mut stream), Some(true));
    }
    assert_eq!(flags.next_bit(&mut stream), None);
}
