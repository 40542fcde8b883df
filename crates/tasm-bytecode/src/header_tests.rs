use super::*;

#[test]
fn header_roundtrip() {
    let header = Header::new(0x0102_0304);
    let bytes = header.to_bytes();

    assert_eq!(&bytes[0..4], b"TASM");
    assert_eq!(bytes[4..8], [0, 4, 0, 0]);
    assert_eq!(bytes[8..12], [4, 3, 2, 1]);
    assert_eq!(Header::from_bytes(&bytes), header);
}

#[test]
fn version_ordering() {
    let v = |major, minor| Version { major, minor };
    assert!(v(0, 3) < v(0, 4));
    assert!(v(0, 9) < v(1, 0));
    assert!(v(1, 0) > VERSION);
}

#[test]
fn older_and_equal_versions_are_compatible() {
    let mut header = Header::default();
    assert!(header.validate_version());

    header.version = Version { major: 0, minor: 1 };
    assert!(header.validate_version());
}

#[test]
fn newer_minor_is_rejected() {
    let header = Header {
        version: Version { major: 0, minor: 5 },
        ..Header::default()
    };
    assert!(header.validate_magic());
    assert!(!header.validate_version());
}

#[test]
fn newer_major_is_rejected() {
    let header = Header {
        version: Version { major: 1, minor: 0 },
        ..Header::default()
    };
    assert!(!header.validate_version());
}

#[test]
fn bad_magic() {
    let header = Header {
        magic: *b"TASN",
        ..Header::default()
    };
    assert!(!header.validate_magic());
}
