use super::*;

fn image(version: Version, code_size: u32, body: &[u8]) -> Vec<u8> {
    let header = Header {
        version,
        code_size,
        ..Header::default()
    };
    let mut bytes = header.to_bytes().to_vec();
    bytes.extend_from_slice(body);
    bytes
}

#[test]
fn load_valid_image() {
    let program = Program::from_bytes(&image(VERSION, 2, &[1, 0])).unwrap();
    assert_eq!(program.code(), &[1, 0]);
    assert_eq!(program.version(), VERSION);
}

#[test]
fn trailing_bytes_are_ignored() {
    let program = Program::from_bytes(&image(VERSION, 2, &[1, 0, 0xFF, 0xFF])).unwrap();
    assert_eq!(program.code(), &[1, 0]);
}

#[test]
fn older_version_loads() {
    let old = Version { major: 0, minor: 2 };
    let program = Program::from_bytes(&image(old, 0, &[])).unwrap();
    assert_eq!(program.version(), old);
}

#[test]
fn newer_minor_version_is_rejected() {
    let newer = Version {
        major: VERSION.major,
        minor: VERSION.minor + 1,
    };
    let err = Program::from_bytes(&image(newer, 0, &[])).unwrap_err();
    assert!(matches!(err, ProgramError::UnsupportedVersion { found, .. } if found == newer));
    assert_eq!(err.kind(), ErrorKind::BadArgument);
}

#[test]
fn short_file_is_rejected() {
    let err = Program::from_bytes(b"TASM").unwrap_err();
    assert!(matches!(err, ProgramError::FileTooSmall(4)));
}

#[test]
fn bad_magic_is_rejected() {
    let mut bytes = image(VERSION, 0, &[]);
    bytes[0] = b'X';
    let err = Program::from_bytes(&bytes).unwrap_err();
    assert_eq!(err.to_string(), "invalid magic: expected TASM");
}

#[test]
fn truncated_code_is_rejected() {
    let err = Program::from_bytes(&image(VERSION, 10, &[1, 0])).unwrap_err();
    assert!(matches!(
        err,
        ProgramError::CodeTruncated {
            declared: 10,
            actual: 2
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Corruption);
}

#[test]
fn to_bytes_roundtrip() {
    let program = Program::from_code(vec![1, 0]).unwrap();
    let reloaded = Program::from_bytes(&program.to_bytes()).unwrap();
    assert_eq!(reloaded, program);
}
