use std::io::Cursor;
use std::time::Duration;

use image::{ImageFormat, RgbImage, RgbaImage};
use nexus::application::ports::{FileParser, FileParserError};
use nexus::domain::{ContentDetails, UploadedFile};
use nexus::infrastructure::text_processing::{ImageOcrAdapter, OCR_UNAVAILABLE};

fn png_rgb(width: u32, height: u32) -> Vec<u8> {
    let mut out = Cursor::new(Vec::new());
    RgbImage::new(width, height)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

#[test]
fn given_rgb_png_when_reading_metadata_then_reports_format_size_and_mode() {
    let metadata = ImageOcrAdapter::read_metadata(&png_rgb(4, 3)).unwrap();

    assert_eq!(metadata.format, "PNG");
    assert_eq!(metadata.width, 4);
    assert_eq!(metadata.height, 3);
    assert_eq!(metadata.mode, "RGB");
}

#[test]
fn given_rgba_png_when_reading_metadata_then_mode_is_rgba() {
    let mut out = Cursor::new(Vec::new());
    RgbaImage::new(2, 2)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();

    let metadata = ImageOcrAdapter::read_metadata(&out.into_inner()).unwrap();

    assert_eq!(metadata.mode, "RGBA");
}

#[test]
fn given_random_bytes_when_reading_metadata_then_extraction_fails() {
    let result = ImageOcrAdapter::read_metadata(b"no image here");

    assert!(matches!(result, Err(FileParserError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_missing_ocr_binary_when_parsing_then_reports_ocr_unavailable() {
    let adapter = ImageOcrAdapter::new("nexus-missing-ocr-binary", Duration::from_secs(5));
    let data = png_rgb(8, 8);
    let file = UploadedFile::new("diagram.png", data.len() as u64).unwrap();

    let content = adapter.parse(&data, &file).await.unwrap();

    assert_eq!(content.kind, "image");
    assert_eq!(
        content.summary,
        "Image \"diagram.png\" (8x8) processed successfully"
    );
    match &content.details {
        ContentDetails::Image {
            extracted_text,
            has_text,
            metadata,
        } => {
            assert_eq!(extracted_text, OCR_UNAVAILABLE);
            assert!(!*has_text);
            assert_eq!(metadata.width, 8);
        }
        other => panic!("expected image details, got {other:?}"),
    }
    assert!(content.text_content.is_none());
}

#[cfg(unix)]
fn fake_ocr_command(dir: &std::path::Path, script: &str) -> String {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-ocr");
    std::fs::write(&path, script).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
}

#[cfg(unix)]
async fn parse_with_command(command: String) -> (String, bool) {
    let adapter = ImageOcrAdapter::new(command, Duration::from_secs(5));
    let data = png_rgb(8, 8);
    let file = UploadedFile::new("slide.png", data.len() as u64).unwrap();

    match adapter.parse(&data, &file).await.unwrap().details {
        ContentDetails::Image {
            extracted_text,
            has_text,
            ..
        } => (extracted_text, has_text),
        other => panic!("expected image details, got {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn given_ocr_output_mentioning_ocr_when_parsing_then_text_is_kept() {
    let dir = tempfile::tempdir().unwrap();
    let command = fake_ocr_command(dir.path(), "#!/bin/sh\necho \"Intro to OCR pipelines\"\n");

    let (extracted_text, has_text) = parse_with_command(command).await;

    assert_eq!(extracted_text, "Intro to OCR pipelines");
    assert!(has_text);
}

#[cfg(unix)]
#[tokio::test]
async fn given_ocr_command_exits_with_error_when_parsing_then_has_no_text() {
    let dir = tempfile::tempdir().unwrap();
    let command = fake_ocr_command(dir.path(), "#!/bin/sh\necho \"bad image\" >&2\nexit 1\n");

    let (extracted_text, has_text) = parse_with_command(command).await;

    assert_eq!(extracted_text, "OCR failed: bad image");
    assert!(!has_text);
}

#[cfg(unix)]
#[tokio::test]
async fn given_ocr_command_prints_nothing_when_parsing_then_has_no_text() {
    let dir = tempfile::tempdir().unwrap();
    let command = fake_ocr_command(dir.path(), "#!/bin/sh\nexit 0\n");

    let (extracted_text, has_text) = parse_with_command(command).await;

    assert!(extracted_text.is_empty());
    assert!(!has_text);
}
