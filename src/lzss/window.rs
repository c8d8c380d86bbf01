//! The sliding window dictionary.

use super::WINDOW_SIZE;

const MASK: usize = WINDOW_SIZE - 1;

/// A circular buffer that holds the most recently decoded bytes. Decoding
/// writes every output byte into the window, and back-references read from
/// it, possibly from slots that were written earlier in the same match.
#[derive(Clone)]
pub struct Window {
    slots: [u8; WINDOW_SIZE],
    /// The next slot to be overwritten. Slot 0 is skipped by the first pass,
    /// so writing starts at 1.
    pos: usize,
    /// The number of bytes written, saturating at WINDOW_SIZE.
    filled: usize,
}

impl Default for Window {
    fn default() -> Self {
        Self::new()
    }
}

impl Window {
    pub fn new() -> Self {
        Self {
            slots: [0; WINDOW_SIZE],
            pos: 1,
            filled: 0,
        }
    }

    /// The slot that the next write goes to.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Append 'byte' and advance the write position.
    pub fn write(&mut self, byte: u8) {
        self.slots[self.pos] = byte;
        self.pos = (self.pos + 1) & MASK;
        if self.filled < WINDOW_SIZE {
            self.filled += 1;
        }
    }

    /// Returns true if 'slot' holds a byte written by this decode.
    pub fn is_written(&self, slot: usize) -> bool {
        // Slots are filled in order starting at 1, so the age of a slot is
        // its distance from slot 1.
        self.filled == WINDOW_SIZE || ((slot & MASK) + MASK) & MASK < self.filled
    }

    /// Returns the byte in 'slot' (taken modulo the window size), or None if
    /// the slot was never written.
    pub fn get(&self, slot: usize) -> Option<u8> {
        let slot = slot & MASK;
        if !self.is_written(slot) {
            return None;
        }
        Some(self.slots[slot])
    }

    /// Returns the byte written 'distance' slots before the write position.
    /// A distance of zero or one that reaches past the written data is
    /// rejected.
    pub fn read(&self, distance: usize) -> Option<u8> {
        if distance == 0 || distance >= WINDOW_SIZE {
            return None;
        }
        self.get((self.pos + WINDOW_SIZE - distance) & MASK)
    }
}

#[test]
fn test_window_fresh() {
    let window = Window::new();
    assert_eq!(window.pos(), 1);
    for slot in [0, 1, 2, MASK] {
        assert_eq!(window.get(slot), None);
    }
    assert_eq!(window.read(1), None);
}

#[test]
fn test_window_read_by_distance() {
    let mut window = Window::new();
    for byte in b"abc" {
        window.write(*byte);
    }
    assert_eq!(window.pos(), 4);
    assert_eq!(window.read(1), Some(b'c'));
    assert_eq!(window.read(3), Some(b'a'));
    assert_eq!(window.read(4), None);
    assert_eq!(window.read(0), None);
    assert_eq!(window.get(1), Some(b'a'));
    assert_eq!(window.get(0), None);
    assert_eq!(window.get(4), None);
}

#[test]
fn test_window_wraps() {
    let mut window = Window::new();
    for i in 0..WINDOW_SIZE - 1 {
        window.write(i as u8);
    }
    // Every slot but 0 is written and the write position wrapped to 0.
    assert_eq!(window.pos(), 0);
    assert_eq!(window.get(0), None);
    assert_eq!(window.get(MASK), Some((WINDOW_SIZE - 2) as u8));

    window.write(0xaa);
    assert_eq!(window.pos(), 1);
    assert_eq!(window.get(0), Some(0xaa));
    assert_eq!(window.read(1), Some(0xaa));

    // Overwrite slot 1, the oldest byte.
    window.write(0xbb);
    assert_eq!(window.get(1), Some(0xbb));
    assert_eq!(window.read(WINDOW_SIZE - 1), Some(2));
}
