use std::env;
use std::path::PathBuf;

/// Runtime configuration, with environment-variable overrides.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Root directory request filenames are resolved under.
    pub image_directory: PathBuf,
    /// Lower-cased extensions (with dot) accepted for extraction requests.
    pub allowed_extensions: Vec<String>,
    /// Maximum length of the OCR text preview in the response.
    pub ocr_preview_chars: usize,
    /// Language passed to the OCR backend.
    pub ocr_language: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            image_directory: PathBuf::from("./img"),
            allowed_extensions: [".png", ".jpg", ".jpeg", ".webp", ".tif", ".tiff", ".bmp"]
                .iter()
                .map(|e| e.to_string())
                .collect(),
            ocr_preview_chars: 240,
            ocr_language: "eng".to_string(),
        }
    }
}

impl Settings {
    /// Defaults overridden by IMAGE_DIRECTORY, ALLOWED_EXTENSIONS
    /// (comma-separated), OCR_PREVIEW_CHARS and OCR_LANGUAGE.
    pub fn from_env() -> Self {
        let mut settings = Settings::default();

        if let Ok(dir) = env::var("IMAGE_DIRECTORY") {
            settings.image_directory = PathBuf::from(dir);
        }

        if let Ok(extensions) = env::var("ALLOWED_EXTENSIONS") {
            let parsed: Vec<String> = extensions
                .split(',')
                .map(|e| e.trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .map(|e| if e.starts_with('.') { e } else { format!(".{}", e) })
                .collect();
            if parsed.is_empty() {
                log::warn!("ALLOWED_EXTENSIONS is empty; keeping defaults");
            } else {
                settings.allowed_extensions = parsed;
            }
        }

        if let Ok(chars) = env::var("OCR_PREVIEW_CHARS") {
            match chars.parse::<usize>() {
                Ok(value) => settings.ocr_preview_chars = value,
                Err(_) => log::warn!("ignoring unparsable OCR_PREVIEW_CHARS '{}'", chars),
            }
        }

        if let Ok(language) = env::var("OCR_LANGUAGE") {
            settings.ocr_language = language;
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.ocr_preview_chars, 240);
        assert!(settings.allowed_extensions.contains(&".png".to_string()));
        assert!(!settings.allowed_extensions.contains(&".pdf".to_string()));
    }
}
