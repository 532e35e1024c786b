use nexus::domain::Language;

#[test]
fn given_two_and_three_letter_codes_when_parsing_then_both_resolve() {
    assert_eq!(Language::from_code("hi"), Some(Language::Hindi));
    assert_eq!(Language::from_code("hin"), Some(Language::Hindi));
    assert_eq!(Language::from_code("TAM"), Some(Language::Tamil));
    assert_eq!(Language::from_code(" or "), Some(Language::Odia));
    assert_eq!(Language::from_code("eng"), Some(Language::English));
}

#[test]
fn given_unsupported_code_when_parsing_then_returns_none() {
    assert_eq!(Language::from_code("fr"), None);
    assert_eq!(Language::from_code("deu"), None);
}

#[test]
fn given_default_language_when_checked_then_is_english() {
    assert_eq!(Language::default(), Language::English);
    assert!(Language::English.is_default());
    assert!(!Language::INDIC.iter().any(Language::is_default));
}

#[test]
fn given_language_when_serialized_then_uses_iso_code() {
    let json = serde_json::to_string(&Language::Malayalam).unwrap();

    assert_eq!(json, "\"ml\"");
    assert_eq!(Language::Malayalam.name(), "Malayalam");
}
