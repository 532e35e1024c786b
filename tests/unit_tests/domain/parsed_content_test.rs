use nexus::domain::{
    ContentDetails, ImageMetadata, Language, MessageMetadata, ParsedContent, SubjectArea,
    word_count,
};
use serde_json::json;

#[test]
fn given_failed_content_when_serialized_then_carries_type_summary_and_error() {
    let content = ParsedContent::failed("pdf", "notes.pdf", "broken xref table");

    let value = serde_json::to_value(&content).unwrap();

    assert_eq!(
        value,
        json!({
            "type": "pdf",
            "summary": "File processing failed",
            "error": "Error processing notes.pdf: broken xref table",
        })
    );
}

#[test]
fn given_unparsed_content_when_serialized_then_lists_requirement() {
    let content = ParsedContent::unparsed(
        "doc",
        "Word document \"old.doc\" uploaded".to_string(),
        "conversion to .docx",
    );

    let value = serde_json::to_value(&content).unwrap();

    assert_eq!(value["type"], "doc");
    assert_eq!(value["requires"], "conversion to .docx");
    assert!(value.get("text_content").is_none());
}

#[test]
fn given_text_content_when_serialized_then_details_are_flattened() {
    let content = ParsedContent {
        kind: "text".to_string(),
        summary: "Text file with 2 words processed successfully".to_string(),
        text_content: Some("hello world".to_string()),
        details: ContentDetails::Text {
            word_count: 2,
            character_count: 11,
            line_count: 1,
        },
    };

    let value = serde_json::to_value(&content).unwrap();

    assert_eq!(value["word_count"], 2);
    assert_eq!(value["character_count"], 11);
    assert_eq!(value["text_content"], "hello world");
}

#[test]
fn given_image_with_ocr_text_when_serialized_then_nests_metadata() {
    let content = ParsedContent {
        kind: "image".to_string(),
        summary: "Image".to_string(),
        text_content: None,
        details: ContentDetails::Image {
            metadata: ImageMetadata {
                format: "PNG".to_string(),
                width: 10,
                height: 10,
                mode: "RGB".to_string(),
            },
            extracted_text: "scanned words".to_string(),
            has_text: true,
        },
    };

    let value = serde_json::to_value(&content).unwrap();

    assert_eq!(value["metadata"]["width"], 10);
    assert_eq!(value["metadata"]["mode"], "RGB");
    assert_eq!(value["extracted_text"], "scanned words");
    assert_eq!(value["has_text"], true);
    assert!(value.get("text_content").is_none());
}

#[test]
fn given_classification_metadata_when_serialized_then_omits_file_content() {
    let metadata = MessageMetadata::classification(Language::Hindi, SubjectArea::Mathematics);

    let value = serde_json::to_value(&metadata).unwrap();

    assert_eq!(
        value,
        json!({"detected_language": "hi", "subject_area": "mathematics"})
    );
}

#[test]
fn given_irregular_whitespace_when_counting_words_then_splits_on_any_whitespace() {
    assert_eq!(word_count("  one\ttwo\n\nthree  "), 3);
    assert_eq!(word_count(""), 0);
}
