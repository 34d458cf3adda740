//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use slotwise::SlotwiseError;
    use slotwise::io::error::{file_system, invalid_parameter, missing_input};
    use std::error::Error;

    // Tests error source chaining for file system failures
    // Verified by returning None from source for every variant
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = file_system("/tmp/rules.json", "read", io_error);

        assert!(error.source().is_some());
        let message = error.to_string();
        assert!(message.contains("/tmp/rules.json"));
        assert!(message.contains("read"));
        assert!(message.contains("file not found"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("precision", &-0.5, &"must be greater than zero");

        let message = error.to_string();
        assert!(message.contains("precision"));
        assert!(message.contains("-0.5"));
        assert!(message.contains("must be greater than zero"));
        assert!(error.source().is_none());
    }

    // Tests that a missing input is distinct from a parameter error
    // Verified by constructing InvalidParameter from missing_input
    #[test]
    fn test_missing_input_error() {
        let error = missing_input("modules");

        assert!(matches!(
            error,
            SlotwiseError::MissingRequiredInput { input: "modules" }
        ));
        assert!(error.to_string().contains("modules"));
    }

    // Tests malformed document errors keep the parser error as source
    // Verified by dropping the path from the message
    #[test]
    fn test_document_error() {
        let source = serde_json::from_str::<u8>("{").unwrap_err();
        let error = SlotwiseError::Document {
            path: "shapes.json".into(),
            source,
        };

        assert!(error.to_string().contains("shapes.json"));
        assert!(error.source().is_some());
    }

    // Tests conversion from a bare I/O error
    // Verified by discarding the I/O error in the conversion
    #[test]
    fn test_from_io_error() {
        let error: SlotwiseError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied").into();

        assert!(matches!(error, SlotwiseError::FileSystem { .. }));
        assert!(error.to_string().contains("access denied"));
    }
}
