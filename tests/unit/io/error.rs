//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use polypack::PackingError;
    use polypack::io::error::{WithPath, invalid_parameter, parse_error};
    use std::error::Error;
    use std::path::Path;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = PackingError::FileSystem {
            path: "/tmp/puzzle.txt".into(),
            operation: "read",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("/tmp/puzzle.txt"));
        assert!(error.to_string().contains("file not found"));
    }

    // Tests parse errors report 1-based line numbers
    // Verified by reporting the raw 0-based index
    #[test]
    fn test_parse_error_message() {
        let error = parse_error(4, "12y5: 1", &"expected '<width>x<height>:'");
        let message = error.to_string();
        assert!(message.contains("line 5"));
        assert!(message.contains("12y5: 1"));
        assert!(message.contains("<width>x<height>"));
        assert!(error.source().is_none());
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("timeout", &-1.5, &"must be non-negative");
        let message = error.to_string();
        assert!(message.contains("timeout"));
        assert!(message.contains("-1.5"));
        assert!(message.contains("must be non-negative"));
    }

    // Tests with_path attaches the path to I/O failures only
    // Verified by attaching the path to successful results
    #[test]
    fn test_with_path() {
        let ok: Result<u8, std::io::Error> = Ok(3);
        assert_eq!(ok.with_path(Path::new("a.txt"), "read").unwrap(), 3);

        let failed: Result<u8, std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let error = failed.with_path(Path::new("b.txt"), "read").unwrap_err();
        assert!(error.to_string().contains("b.txt"));
        assert!(error.to_string().contains("during read"));
    }

    // Tests thread pool failures keep their source
    // Verified by omitting the job count from the message
    #[test]
    fn test_thread_pool_error() {
        // The second global initialization always fails
        let source = rayon::ThreadPoolBuilder::new()
            .build_global()
            .and_then(|()| rayon::ThreadPoolBuilder::new().build_global())
            .unwrap_err();
        let error = PackingError::ThreadPool { jobs: 1, source };
        assert!(error.to_string().contains("1 worker threads"));
        assert!(error.source().is_some());
    }
}
