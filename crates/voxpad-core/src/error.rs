use thiserror::Error;

/// Top-level error type for the Voxpad system.
///
/// Each variant wraps a subsystem-specific failure. Subsystem crates return
/// `VoxpadError` directly so that the `?` operator works seamlessly across
/// crate boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VoxpadError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Recognition error: {0}")]
    Recognition(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Dictation error: {0}")]
    Dictation(String),

    #[error("Unsupported locale: {tag}")]
    UnsupportedLocale { tag: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for VoxpadError {
    fn from(err: toml::de::Error) -> Self {
        VoxpadError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for VoxpadError {
    fn from(err: toml::ser::Error) -> Self {
        VoxpadError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for VoxpadError {
    fn from(err: serde_json::Error) -> Self {
        VoxpadError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Voxpad operations.
pub type Result<T> = std::result::Result<T, VoxpadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VoxpadError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_error_display_all_variants() {
        let cases: Vec<(VoxpadError, &str)> = vec![
            (
                VoxpadError::Config("bad key".to_string()),
                "Configuration error: bad key",
            ),
            (
                VoxpadError::Recognition("engine gone".to_string()),
                "Recognition error: engine gone",
            ),
            (
                VoxpadError::Synthesis("no voice".to_string()),
                "Synthesis error: no voice",
            ),
            (
                VoxpadError::Dictation("invalid transition".to_string()),
                "Dictation error: invalid transition",
            ),
            (
                VoxpadError::UnsupportedLocale {
                    tag: "fr-FR".to_string(),
                },
                "Unsupported locale: fr-FR",
            ),
            (
                VoxpadError::Serialization("invalid json".to_string()),
                "Serialization error: invalid json",
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.to_string(), expected);
        }
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let voxpad_err: VoxpadError = io_err.into();
        assert!(matches!(voxpad_err, VoxpadError::Io(_)));
        assert!(voxpad_err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let bad_toml = "invalid = [[[";
        let err: std::result::Result<toml::Value, _> = toml::from_str(bad_toml);
        assert!(err.is_err());
        let voxpad_err: VoxpadError = err.unwrap_err().into();
        assert!(matches!(voxpad_err, VoxpadError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let bad_json = "{ invalid json }";
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str(bad_json);
        assert!(err.is_err());
        let voxpad_err: VoxpadError = err.unwrap_err().into();
        assert!(matches!(voxpad_err, VoxpadError::Serialization(_)));
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_ok() -> Result<i32> {
            Ok(42)
        }

        fn returns_err() -> Result<i32> {
            Err(VoxpadError::Dictation("fail".to_string()))
        }

        assert_eq!(returns_ok().unwrap(), 42);
        assert!(returns_err().is_err());
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let _value = io_result?;
            Ok("success".to_string())
        }

        assert_eq!(inner().unwrap(), "success");
    }

    #[test]
    fn test_error_debug_impl() {
        let err = VoxpadError::UnsupportedLocale {
            tag: "xx-XX".to_string(),
        };
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("UnsupportedLocale"));
        assert!(debug_str.contains("xx-XX"));
    }
}
