#![no_main]

use camunpack::lzss::legacy::LegacyDecoder;
use camunpack::Decoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let target = u16::from_le_bytes([data[0], data[1]]) as usize;
    let mut decompressed: Vec<u8> = Vec::new();
    {
        let mut decoder = LegacyDecoder::new(&data[2..], &mut decompressed, target);
        let _ = decoder.decode();
    }
});
