use std::io;

use splicegen::error::Error;
use splicegen::substitute::MarkerError;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::TemplatesFailed { count: 2 };
    assert_eq!(err.to_string(), "2 template(s) failed to generate.");
}

#[test]
fn test_marker_error_names_template_and_marker() {
    let err = Error::MarkerError {
        template: "src/utils.template.c".to_string(),
        source: MarkerError::Missing {
            marker: "{{GENERATE_BSON}}".to_string(),
            generator: "bson".to_string(),
        },
    };
    assert_eq!(
        err.to_string(),
        "Template 'src/utils.template.c': marker '{{GENERATE_BSON}}' for generator 'bson' not found."
    );
}
