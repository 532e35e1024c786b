use std::io::Write;
use std::time::Duration;

use async_trait::async_trait;
use image::{ColorType, ImageFormat};

use crate::application::ports::{FileParser, FileParserError};
use crate::domain::{ContentDetails, FileType, ImageMetadata, ParsedContent, UploadedFile};

pub const OCR_UNAVAILABLE: &str = "OCR not available (install tesseract)";

/// Reads image metadata with the `image` crate and extracts text by running an
/// external OCR binary (`<command> <image> stdout`).
pub struct ImageOcrAdapter {
    ocr_command: String,
    timeout: Duration,
}

impl ImageOcrAdapter {
    pub fn new(ocr_command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            ocr_command: ocr_command.into(),
            timeout,
        }
    }

    pub fn read_metadata(data: &[u8]) -> Result<ImageMetadata, FileParserError> {
        let format = image::guess_format(data)
            .map_err(|e| FileParserError::ExtractionFailed(format!("unknown image format: {e}")))?;
        let decoded = image::load_from_memory_with_format(data, format)
            .map_err(|e| FileParserError::ExtractionFailed(format!("failed to decode image: {e}")))?;

        Ok(ImageMetadata {
            format: format_name(format),
            width: decoded.width(),
            height: decoded.height(),
            mode: color_mode(decoded.color()),
        })
    }

    async fn run_ocr(&self, data: &[u8], extension: &str) -> OcrOutcome {
        let temp_file = tempfile::Builder::new()
            .suffix(&format!(".{}", extension))
            .tempfile()
            .and_then(|mut f| f.write_all(data).map(|_| f));

        let temp_file = match temp_file {
            Ok(f) => f,
            Err(e) => return OcrOutcome::Failed(e.to_string()),
        };

        let output = tokio::time::timeout(
            self.timeout,
            tokio::process::Command::new(&self.ocr_command)
                .arg(temp_file.path())
                .arg("stdout")
                .kill_on_drop(true)
                .output(),
        )
        .await;

        match output {
            Err(_) => OcrOutcome::Failed("timed out".to_string()),
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => OcrOutcome::Unavailable,
            Ok(Err(e)) => OcrOutcome::Failed(e.to_string()),
            Ok(Ok(out)) if !out.status.success() => {
                OcrOutcome::Failed(String::from_utf8_lossy(&out.stderr).trim().to_string())
            }
            Ok(Ok(out)) => {
                OcrOutcome::Text(String::from_utf8_lossy(&out.stdout).trim().to_string())
            }
        }
    }
}

enum OcrOutcome {
    Text(String),
    Unavailable,
    Failed(String),
}

impl OcrOutcome {
    /// Text reported to the client and whether it came from a successful OCR run.
    fn into_extracted(self) -> (String, bool) {
        match self {
            OcrOutcome::Text(text) => {
                let has_text = !text.is_empty();
                (text, has_text)
            }
            OcrOutcome::Unavailable => (OCR_UNAVAILABLE.to_string(), false),
            OcrOutcome::Failed(reason) => {
                tracing::warn!(reason = %reason, "OCR failed");
                (format!("OCR failed: {}", reason), false)
            }
        }
    }
}

fn format_name(format: ImageFormat) -> String {
    format!("{:?}", format).to_uppercase()
}

fn color_mode(color: ColorType) -> String {
    match color {
        ColorType::L8 => "L".to_string(),
        ColorType::La8 => "LA".to_string(),
        ColorType::Rgb8 => "RGB".to_string(),
        ColorType::Rgba8 => "RGBA".to_string(),
        ColorType::L16 => "I;16".to_string(),
        other => format!("{:?}", other),
    }
}

#[async_trait]
impl FileParser for ImageOcrAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %file.filename))]
    async fn parse(
        &self,
        data: &[u8],
        file: &UploadedFile,
    ) -> Result<ParsedContent, FileParserError> {
        if file.file_type != FileType::Image {
            return Err(FileParserError::UnsupportedFileType(file.extension.clone()));
        }

        let owned = data.to_vec();
        let metadata = tokio::task::spawn_blocking(move || Self::read_metadata(&owned))
            .await
            .map_err(|e| FileParserError::ExtractionFailed(format!("task join error: {e}")))??;

        let (extracted_text, has_text) = self
            .run_ocr(data, &file.extension)
            .await
            .into_extracted();

        tracing::info!(
            width = metadata.width,
            height = metadata.height,
            has_text,
            "Image processed"
        );

        Ok(ParsedContent {
            kind: file.file_type.content_tag().to_string(),
            summary: format!(
                "Image \"{}\" ({}x{}) processed successfully",
                file.filename, metadata.width, metadata.height
            ),
            text_content: None,
            details: ContentDetails::Image {
                metadata,
                extracted_text,
                has_text,
            },
        })
    }
}
