use std::path::Path;
use std::process::Command;

use crate::utils::ExtractError;

/// Boundary to the external OCR engine: takes a local image file, returns
/// plain text. Implementations may fail; failures surface as
/// `ExtractError::OcrProvider` and never reach the classification core.
pub trait OcrProvider {
    fn extract_text(&self, image_path: &Path) -> Result<String, ExtractError>;
}

/// OCR via the system `tesseract` binary.
pub struct TesseractOcr {
    language: String,
}

impl TesseractOcr {
    pub fn new() -> Self {
        TesseractOcr {
            language: "eng".to_string(),
        }
    }

    pub fn with_language(language: &str) -> Self {
        TesseractOcr {
            language: language.to_string(),
        }
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrProvider for TesseractOcr {
    fn extract_text(&self, image_path: &Path) -> Result<String, ExtractError> {
        log::debug!("running tesseract on {}", image_path.display());

        let output = Command::new("tesseract")
            .arg(image_path)
            .arg("stdout")
            .args(["-l", &self.language])
            .output();

        match output {
            Ok(output) if output.status.success() => {
                Ok(String::from_utf8_lossy(&output.stdout).to_string())
            }
            Ok(output) => {
                let stderr = String::from_utf8_lossy(&output.stderr);
                Err(ExtractError::OcrProvider(format!(
                    "tesseract failed: {}",
                    stderr.trim()
                )))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ExtractError::OcrProvider(
                "tesseract not found (install tesseract-ocr)".to_string(),
            )),
            Err(e) => Err(ExtractError::OcrProvider(format!(
                "unable to launch tesseract: {}",
                e
            ))),
        }
    }
}
