use std::fs;

use camunpack::batch::{extract_all, process_file, process_tree, Report};
use camunpack::cam::CamArchive;
use camunpack::{ArchiveError, Context, DecodeError};

mod common;
use common::build_archive;

const PLT: [u8; 10] = [1, 0, 4, 0, 2, 3, 2, 0, 0x41, 0x00];

/// A unit file that decodes to "AAAAA".
const UNI: [u8; 14] = [0, 0, 0, 0, 1, 0, 5, 0, 0, 0, 0x01, 0x41, 0x20, 0x01];

/// A unit file whose payload stops after one byte.
const BROKEN_UNI: [u8; 12] = [0, 0, 0, 0, 1, 0, 5, 0, 0, 0, 0xff, 0x41];

#[test]
fn test_extract_and_process() {
    let archive_bytes = build_archive(&[
        ("campaign.plt", &PLT),
        ("units\\theater.uni", &UNI),
        ("broken.uni", &BROKEN_UNI),
        ("readme.txt", b"hello"),
        ("../escape.bin", b"nope"),
    ]);
    let archive = CamArchive::parse(&archive_bytes).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("out");

    let mut report = Report::default();
    extract_all(&archive, &out, &mut report).unwrap();
    assert_eq!(report.extracted.len(), 4);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        report.failures[0].error,
        ArchiveError::UnsafeName { .. }
    ));
    assert!(!dir.path().join("escape.bin").exists());
    assert_eq!(fs::read(out.join("readme.txt")).unwrap(), b"hello");
    assert_eq!(fs::read(out.join("units/theater.uni")).unwrap(), UNI);

    process_tree(&out, Context::default(), &mut report);
    assert_eq!(report.processed.len(), 2);
    assert_eq!(report.failures.len(), 2);
    assert!(!report.is_clean());

    let failure = &report.failures[1];
    assert_eq!(failure.path, out.join("broken.uni"));
    assert!(matches!(
        failure.error,
        ArchiveError::Decode(DecodeError::MalformedInput { .. })
    ));
    assert!(!out.join("broken.uni.dec").exists());

    assert_eq!(
        fs::read(out.join("units/theater.uni.dec")).unwrap(),
        b"AAAAA"
    );
    let text = fs::read_to_string(out.join("campaign.plt.txt")).unwrap();
    assert!(text.starts_with("Number of pilots: 1\n"));
    assert!(text.contains("Pilot 0: Usage=4, Voice ID=2, Photo ID=3"));
    assert!(text.ends_with("Callsign data: [65, 0]"));
}

#[test]
fn test_process_file_kinds() {
    let dir = tempfile::tempdir().unwrap();
    let other = dir.path().join("notes.txt");
    fs::write(&other, b"x").unwrap();
    assert!(process_file(&other, Context::default()).unwrap().is_none());

    let upper = dir.path().join("THEATER.UNI");
    fs::write(&upper, UNI).unwrap();
    let written = process_file(&upper, Context::default()).unwrap().unwrap();
    assert_eq!(written, dir.path().join("THEATER.UNI.dec"));

    let missing = dir.path().join("missing.plt");
    assert!(matches!(
        process_file(&missing, Context::default()),
        Err(ArchiveError::Io { .. })
    ));
}

#[test]
fn test_process_empty_tree() {
    let dir = tempfile::tempdir().unwrap();
    let mut report = Report::default();
    process_tree(dir.path(), Context::default(), &mut report);
    assert!(report.is_clean());
    assert!(report.processed.is_empty());
}
