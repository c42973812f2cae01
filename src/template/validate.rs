//! Pre-execution validation of template sources

use super::source::SourceLocator;

/// Check that a source is usable, aggregating every discovered problem.
///
/// Existence is checked first; readability only once existence holds, so at
/// most one of the two messages appears per call. An empty result means the
/// source is valid.
pub fn validate(source: &dyn SourceLocator) -> Vec<String> {
    let mut errors = Vec::new();

    if !source.exists() {
        errors.push("source does not exist".to_string());
    } else if !source.readable() {
        errors.push("source is not readable".to_string());
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::source::{FileSource, InMemorySource};

    #[test]
    fn test_valid_source_has_no_errors() {
        let source = InMemorySource::new("ok.tpl", "body");
        assert!(validate(&source).is_empty());
    }

    #[test]
    fn test_missing_source() {
        let source = FileSource::new("/no/such/missing.tpl");
        assert_eq!(validate(&source), vec!["source does not exist".to_string()]);
    }

    #[test]
    fn test_unreadable_source_reports_only_readability() {
        // A directory exists but cannot be read as a template body.
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path());
        assert_eq!(
            validate(&source),
            vec!["source is not readable".to_string()]
        );
    }

    #[test]
    fn test_readable_file_passes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.tpl");
        std::fs::write(&path, "x").unwrap();
        assert!(validate(&FileSource::new(&path)).is_empty());
    }
}
