use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(FitError::config("x").to_string().contains("config error:"));
    assert!(FitError::ratio("x").to_string().contains("ratio error:"));
    assert!(
        FitError::no_input("photos")
            .to_string()
            .contains("no input:")
    );
    assert!(
        FitError::unsupported_format("a.jpg", "bad magic")
            .to_string()
            .contains("unsupported format 'a.jpg'")
    );
    assert!(
        FitError::io("out", "permission denied")
            .to_string()
            .contains("io error 'out'")
    );
}

#[test]
fn fatal_kinds_abort_before_dispatch() {
    assert!(FitError::config("x").is_fatal());
    assert!(FitError::no_input("d").is_fatal());
    assert!(FitError::ratio("x").is_fatal());
    assert!(!FitError::unsupported_format("a.jpg", "x").is_fatal());
    assert!(!FitError::io("a.jpg", "x").is_fatal());
}

#[test]
fn path_and_message_are_exposed() {
    let err = FitError::io("out/a.jpg", "disk full");
    assert_eq!(err.kind(), ErrorKind::Io);
    assert_eq!(err.path(), Some(Path::new("out/a.jpg")));
    assert_eq!(err.message(), "disk full");
    assert_eq!(FitError::ratio("zero").path(), None);
}

#[test]
fn kind_names_match_report_tags() {
    assert_eq!(
        ErrorKind::UnsupportedFormat.to_string(),
        "UnsupportedFormatError"
    );
    assert_eq!(ErrorKind::Io.to_string(), "IOError");
}
