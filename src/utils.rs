//! A collection of utilities for reading binary records and naming files.

/// File extensions of the records that are post-processed after extraction.
pub mod extensions {
    pub const PLT_EXT: &str = "plt";
    pub const UNI_EXT: &str = "uni";
    /// Appended to the name of a decoded unit file.
    pub const DECODED_EXT: &str = "dec";
    /// Appended to the name of a rendered pilot file.
    pub const TEXT_EXT: &str = "txt";
}

/// A bounds-checked read cursor over an immutable byte slice.
pub mod cursor {
    /// Reads bytes and little-endian numbers from 'input', front to back.
    /// A read that would run past the end of the input fails and leaves the
    /// cursor where it was.
    #[derive(Clone, Debug)]
    pub struct ByteCursor<'a> {
        input: &'a [u8],
        pos: usize,
    }

    impl<'a> ByteCursor<'a> {
        pub fn new(input: &'a [u8]) -> Self {
            Self { input, pos: 0 }
        }

        /// Creates a cursor that starts at byte 'pos' of 'input'. Returns None
        /// if 'pos' is past the end of the input.
        pub fn at(input: &'a [u8], pos: usize) -> Option<Self> {
            if pos > input.len() {
                return None;
            }
            Some(Self { input, pos })
        }

        /// The offset of the next byte to be read.
        pub fn position(&self) -> usize {
            self.pos
        }

        /// The number of bytes left to read.
        pub fn remaining(&self) -> usize {
            self.input.len() - self.pos
        }

        pub fn is_empty(&self) -> bool {
            self.remaining() == 0
        }

        /// The unread part of the input.
        pub fn rest(&self) -> &'a [u8] {
            &self.input[self.pos..]
        }

        pub fn read_u8(&mut self) -> Option<u8> {
            let byte = *self.input.get(self.pos)?;
            self.pos += 1;
            Some(byte)
        }

        /// Read the next 'len' bytes.
        pub fn take(&mut self, len: usize) -> Option<&'a [u8]> {
            let end = self.pos.checked_add(len)?;
            let bytes = self.input.get(self.pos..end)?;
            self.pos = end;
            Some(bytes)
        }

        fn take_array<const N: usize>(&mut self) -> Option<[u8; N]> {
            self.take(N)?.try_into().ok()
        }

        pub fn read_i16_le(&mut self) -> Option<i16> {
            Some(i16::from_le_bytes(self.take_array()?))
        }

        pub fn read_u32_le(&mut self) -> Option<u32> {
            Some(u32::from_le_bytes(self.take_array()?))
        }

        pub fn read_i32_le(&mut self) -> Option<i32> {
            Some(i32::from_le_bytes(self.take_array()?))
        }
    }

    #[test]
    fn test_cursor_reads() {
        let input = [0x01, 0x02, 0x03, 0x04, 0xfe, 0xff, 0x7f];
        let mut cursor = ByteCursor::new(&input);
        assert_eq!(cursor.read_u32_le(), Some(0x04030201));
        assert_eq!(cursor.read_i16_le(), Some(-2));
        assert_eq!(cursor.position(), 6);
        assert_eq!(cursor.remaining(), 1);
        assert_eq!(cursor.rest(), &[0x7f]);
        assert_eq!(cursor.read_u8(), Some(0x7f));
        assert!(cursor.is_empty());
        assert_eq!(cursor.read_u8(), None);
    }

    #[test]
    fn test_cursor_short_read_does_not_advance() {
        let input = [0xaa, 0xbb, 0xcc];
        let mut cursor = ByteCursor::new(&input);
        assert_eq!(cursor.read_u8(), Some(0xaa));
        assert_eq!(cursor.read_i32_le(), None);
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.take(usize::MAX), None);
        assert_eq!(cursor.take(2), Some(&input[1..]));
    }

    #[test]
    fn test_cursor_at() {
        let input = [1, 2, 3];
        assert!(ByteCursor::at(&input, 4).is_none());
        let mut cursor = ByteCursor::at(&input, 3).unwrap();
        assert!(cursor.is_empty());
        assert_eq!(cursor.read_u8(), None);
        let mut cursor = ByteCursor::at(&input, 1).unwrap();
        assert_eq!(cursor.read_u8(), Some(2));
    }
}
