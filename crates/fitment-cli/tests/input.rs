//! Integration tests for batch input handling.

use std::io::Write;

use fitment_cli::input::{parse_applications, read_applications};
use tempfile::NamedTempFile;

#[test]
fn skips_blank_lines_and_comments() {
    let apps = parse_applications(
        "# brake pads\n\
         2005-2010 Honda Accord (Front Left)\n\
         \n\
         \t2020-2020 Universal Widget  \n\
         #2001-2002 Ford Focus\n",
    );
    assert_eq!(
        apps,
        vec![
            "2005-2010 Honda Accord (Front Left)".to_string(),
            "2020-2020 Universal Widget".to_string(),
        ]
    );
}

#[test]
fn reads_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "2005-2010 Honda Accord (Front Left)").unwrap();
    writeln!(file, "2008-2008 Honda Civic").unwrap();
    let apps = read_applications(file.path()).unwrap();
    assert_eq!(apps.len(), 2);
}

#[test]
fn missing_file_is_reported() {
    let err = read_applications(std::path::Path::new("/nonexistent/apps.txt")).unwrap_err();
    assert!(err.to_string().contains("Failed to read applications"));
}
