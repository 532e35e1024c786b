use std::sync::Arc;

use nexus::application::services::LanguageDetector;
use nexus::domain::Language;

use crate::support::StubIdentifier;

#[test]
fn given_input_shorter_than_three_chars_when_detecting_then_returns_english_without_identifying() {
    let identifier = Arc::new(StubIdentifier::returning("hi"));
    let detector = LanguageDetector::new(identifier.clone());

    let language = detector.detect(" ok ");

    assert_eq!(language, Language::English);
    assert!(identifier.inputs().is_empty());
}

#[test]
fn given_indic_code_when_detecting_then_returns_that_language() {
    let detector = LanguageDetector::new(Arc::new(StubIdentifier::returning("hin")));

    assert_eq!(detector.detect("मुझे गणित समझाओ"), Language::Hindi);
}

#[test]
fn given_non_indic_code_when_detecting_then_returns_english() {
    let detector = LanguageDetector::new(Arc::new(StubIdentifier::returning("fr")));

    assert_eq!(detector.detect("Bonjour tout le monde"), Language::English);
}

#[test]
fn given_identifier_failure_when_detecting_then_returns_english() {
    let detector = LanguageDetector::new(Arc::new(StubIdentifier::failing()));

    assert_eq!(detector.detect("????????"), Language::English);
}

#[test]
fn given_code_tokens_when_detecting_then_identifier_sees_filtered_text() {
    let identifier = Arc::new(StubIdentifier::returning("en"));
    let detector = LanguageDetector::new(identifier.clone());

    detector.detect("def Sort return values");

    assert_eq!(identifier.inputs(), vec!["sort values".to_string()]);
}

#[test]
fn given_only_code_tokens_when_detecting_then_identifier_sees_original_text() {
    let identifier = Arc::new(StubIdentifier::returning("en"));
    let detector = LanguageDetector::new(identifier.clone());

    detector.detect("import class");

    assert_eq!(identifier.inputs(), vec!["import class".to_string()]);
}
