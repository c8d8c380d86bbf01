#![no_main]

use camunpack::lzss::LzssDecoder;
use camunpack::Decoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    // The first two bytes pick the output length.
    let target = u16::from_le_bytes([data[0], data[1]]) as usize;
    let mut decompressed: Vec<u8> = Vec::new();
    {
        let mut decoder = LzssDecoder::new(&data[2..], &mut decompressed, target);
        if decoder.decode().is_ok() {
            assert_eq!(decompressed.len(), target);
        } else {
            assert!(decompressed.is_empty());
        }
    }
});
