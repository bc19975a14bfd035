//! Display implementations for error types

use super::types::Error;
use std::fmt;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(f, "invalid value '{value}' for '{field}': {message}")
            }
            Error::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "file system error during {} on '{}': {}",
                    operation,
                    path.display(),
                    source
                )
            }
            Error::Json { message, .. } => {
                write!(f, "JSON error: {message}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;
    use std::io;

    #[test]
    fn test_invalid_value_names_field_and_value() {
        let err = Error::invalid_value("times", "lots", "expected a number");
        assert_eq!(
            err.to_string(),
            "invalid value 'lots' for 'times': expected a number"
        );
        assert!(err.source().is_none());
    }

    #[test]
    fn test_file_system_keeps_io_source() {
        let err = Error::file_system(
            "/etc/reattempt.json",
            "read",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(
            err.to_string(),
            "file system error during read on '/etc/reattempt.json': missing"
        );
        assert_eq!(err.source().unwrap().to_string(), "missing");
    }

    #[test]
    fn test_json_keeps_parser_source() {
        let parse_error = serde_json::from_str::<u32>("{").unwrap_err();
        let err = Error::json("invalid retry settings", parse_error);
        assert_eq!(err.to_string(), "JSON error: invalid retry settings");
        assert!(err.source().is_some());
    }
}
