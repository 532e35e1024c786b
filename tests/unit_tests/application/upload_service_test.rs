use std::sync::Arc;

use nexus::application::ports::FileParser;
use nexus::application::services::{SessionFileStore, UploadError, UploadService};
use nexus::domain::{ContentDetails, FileType, SessionId};
use nexus::infrastructure::text_processing::{CompositeFileParser, PlainTextAdapter};

const LIMIT: u64 = 16 * 1024 * 1024;

fn service_with_limit(limit: u64) -> (UploadService, Arc<SessionFileStore>) {
    let text: Arc<dyn FileParser> = Arc::new(PlainTextAdapter);
    let parser = CompositeFileParser::new(vec![(FileType::Text, text)]);
    let files = Arc::new(SessionFileStore::new());
    (
        UploadService::new(Arc::new(parser), files.clone(), limit),
        files,
    )
}

fn session() -> SessionId {
    SessionId::parse("upload-session").unwrap()
}

#[tokio::test]
async fn given_text_file_when_processing_then_returns_parsed_content_and_stores_it() {
    let (service, files) = service_with_limit(LIMIT);

    let outcome = service
        .process("notes.txt", b"hello world", Some(&session()))
        .await
        .unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.file_type, "txt");
    assert_eq!(outcome.filename, "notes.txt");
    assert_eq!(
        outcome.message,
        "File \"notes.txt\" processed successfully by Nexus!"
    );
    assert_eq!(outcome.content.kind, "text");
    assert!(matches!(
        outcome.content.details,
        ContentDetails::Text { word_count: 2, .. }
    ));

    let stored = files.files(&session());
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].file_id, outcome.file_id);
}

#[tokio::test]
async fn given_no_session_when_processing_then_file_is_not_stored() {
    let (service, files) = service_with_limit(LIMIT);

    service.process("notes.txt", b"hello", None).await.unwrap();

    assert_eq!(files.session_count(), 0);
}

#[tokio::test]
async fn given_blank_filename_when_processing_then_returns_empty_filename() {
    let (service, _) = service_with_limit(LIMIT);

    let result = service.process("  ", b"data", None).await;

    assert!(matches!(result, Err(UploadError::EmptyFilename)));
}

#[tokio::test]
async fn given_disallowed_extension_when_processing_then_error_lists_allowed_types() {
    let (service, _) = service_with_limit(LIMIT);

    let err = service.process("virus.exe", b"MZ", None).await.unwrap_err();

    assert!(matches!(err, UploadError::UnsupportedExtension(ref ext) if ext == "exe"));
    let message = err.to_string();
    assert!(message.starts_with("File type not supported"));
    assert!(message.contains("pdf, txt, docx"));
}

#[tokio::test]
async fn given_oversized_file_when_processing_then_returns_too_large() {
    let (service, _) = service_with_limit(LIMIT);
    let data = vec![b'a'; LIMIT as usize + 1];

    let err = service.process("big.txt", &data, None).await.unwrap_err();

    assert!(matches!(err, UploadError::TooLarge { limit: LIMIT }));
    assert_eq!(err.to_string(), "File too large. Maximum size: 16MB");
}

#[tokio::test]
async fn given_file_of_exactly_the_limit_when_processing_then_it_is_accepted() {
    let (service, _) = service_with_limit(8);

    let outcome = service.process("tiny.txt", b"abcd efg", None).await;

    assert!(outcome.is_ok());
}

#[tokio::test]
async fn given_whitespace_only_text_when_processing_then_failure_is_reported_in_content() {
    let (service, _) = service_with_limit(LIMIT);

    let outcome = service.process("empty.txt", b"   \n  ", None).await.unwrap();

    assert!(outcome.success);
    assert_eq!(outcome.content.summary, "File processing failed");
    match outcome.content.details {
        ContentDetails::Failed { error } => {
            assert_eq!(error, "Error processing empty.txt: no text found in: empty.txt")
        }
        other => panic!("expected failed content, got {other:?}"),
    }
}

#[tokio::test]
async fn given_type_without_registered_parser_when_processing_then_failure_is_reported() {
    let (service, _) = service_with_limit(LIMIT);

    let outcome = service.process("scan.pdf", b"%PDF-1.4", None).await.unwrap();

    assert_eq!(outcome.content.kind, "pdf");
    assert!(matches!(outcome.content.details, ContentDetails::Failed { .. }));
}

#[test]
fn given_supported_formats_when_listed_then_includes_every_family() {
    let formats = UploadService::supported_formats();

    for ext in ["pdf", "txt", "docx", "doc", "xlsx", "xls", "pptx", "ppt", "png", "webp"] {
        assert!(formats.contains(&ext), "missing {ext}");
    }
}
