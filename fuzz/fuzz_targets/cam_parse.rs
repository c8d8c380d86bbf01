#![no_main]

use camunpack::cam::CamArchive;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(archive) = CamArchive::parse(data) {
        for entry in archive.entries() {
            let _ = archive.contents(entry);
            let _ = entry.relative_path();
        }
    }
});
