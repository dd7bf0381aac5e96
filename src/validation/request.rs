use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::utils::ExtractError;

/// Validates request filenames and resolves them inside the configured
/// image root.
pub struct RequestValidator;

impl RequestValidator {
    /// Reject anything that is not a bare basename with an allowed
    /// extension, then resolve it under the image root and confirm the
    /// resolved path never escapes it.
    pub fn validate_and_resolve(
        settings: &Settings,
        filename: &str,
    ) -> Result<PathBuf, ExtractError> {
        if filename.contains('/') || filename.contains('\\') || !Self::is_basename(filename) {
            return Err(ExtractError::PathTraversal(
                "filename must be a basename without directories".to_string(),
            ));
        }

        let extension = Path::new(filename)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();
        if !settings.allowed_extensions.iter().any(|a| *a == extension) {
            return Err(ExtractError::InvalidFileExtension(format!(
                "unsupported extension '{}'. Allowed extensions: {}",
                extension,
                settings.allowed_extensions.join(", ")
            )));
        }

        let image_root = settings.image_directory.canonicalize().map_err(|_| {
            ExtractError::SourceFileNotFound(format!(
                "image directory not found: {}",
                settings.image_directory.display()
            ))
        })?;

        let candidate = image_root.join(filename);
        let resolved = candidate
            .canonicalize()
            .map_err(|_| ExtractError::SourceFileNotFound(format!("source file not found: {}", filename)))?;

        if !resolved.starts_with(&image_root) {
            return Err(ExtractError::PathTraversal(
                "resolved file path escapes configured image directory".to_string(),
            ));
        }

        if !resolved.is_file() {
            return Err(ExtractError::SourceFileNotFound(format!(
                "source file not found: {}",
                filename
            )));
        }

        Ok(resolved)
    }

    fn is_basename(filename: &str) -> bool {
        Path::new(filename)
            .file_name()
            .map(|name| name == filename && filename != "." && filename != "..")
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings_for(dir: &Path) -> Settings {
        Settings {
            image_directory: dir.to_path_buf(),
            ..Settings::default()
        }
    }

    #[test]
    fn test_traversal_filenames_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_for(dir.path());
        for filename in ["../secret.png", "a/b.png", "..\\evil.png", ".."] {
            let err = RequestValidator::validate_and_resolve(&settings, filename).unwrap_err();
            assert_eq!(err.code(), "PATH_TRAVERSAL", "filename: {}", filename);
        }
    }

    #[test]
    fn test_disallowed_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_for(dir.path());
        let err = RequestValidator::validate_and_resolve(&settings, "sample.pdf").unwrap_err();
        assert_eq!(err.code(), "INVALID_FILE_EXTENSION");

        let err = RequestValidator::validate_and_resolve(&settings, "noextension").unwrap_err();
        assert_eq!(err.code(), "INVALID_FILE_EXTENSION");
    }

    #[test]
    fn test_missing_file_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let settings = settings_for(dir.path());
        let err = RequestValidator::validate_and_resolve(&settings, "missing.png").unwrap_err();
        assert_eq!(err.code(), "SOURCE_FILE_NOT_FOUND");
    }

    #[test]
    fn test_existing_file_resolves() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("sample.png"), b"fake").unwrap();
        let settings = settings_for(dir.path());

        let resolved = RequestValidator::validate_and_resolve(&settings, "sample.png").unwrap();
        assert!(resolved.is_file());
        assert!(resolved.ends_with("sample.png"));
    }

    #[test]
    fn test_uppercase_extension_allowed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("scan.PNG"), b"fake").unwrap();
        let settings = settings_for(dir.path());

        assert!(RequestValidator::validate_and_resolve(&settings, "scan.PNG").is_ok());
    }
}
