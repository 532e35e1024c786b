use nexus::domain::{FileType, UploadedFile, extension_of, sanitize_filename};

#[test]
fn given_path_traversal_when_sanitizing_then_keeps_basename_only() {
    assert_eq!(sanitize_filename("../../etc/pass wd.txt"), "pass_wd.txt");
    assert_eq!(sanitize_filename("C:\\Users\\me\\notes.pdf"), "notes.pdf");
}

#[test]
fn given_non_ascii_and_hidden_names_when_sanitizing_then_strips_them() {
    assert_eq!(sanitize_filename("résumé.pdf"), "rsum.pdf");
    assert_eq!(sanitize_filename(".hidden.txt"), "hidden.txt");
}

#[test]
fn given_mixed_case_extension_when_creating_then_normalizes_to_lowercase() {
    let file = UploadedFile::new("Notes.PDF", 10).unwrap();

    assert_eq!(file.extension, "pdf");
    assert_eq!(file.file_type, FileType::Pdf);
    assert_eq!(file.filename, "Notes.PDF");
    assert_eq!(file.original_filename, "Notes.PDF");
}

#[test]
fn given_name_that_sanitizes_away_when_creating_then_uses_placeholder_name() {
    let file = UploadedFile::new("日本.txt", 3).unwrap();

    assert_eq!(file.filename, "upload.txt");
    assert_eq!(file.file_type, FileType::Text);
}

#[test]
fn given_disallowed_or_missing_extension_when_creating_then_returns_none() {
    assert!(UploadedFile::new("setup.exe", 1).is_none());
    assert!(UploadedFile::new("README", 1).is_none());
    assert!(UploadedFile::new(".txt", 1).is_none());
}

#[test]
fn given_office_and_image_extensions_when_mapping_then_routes_to_parser_family() {
    assert_eq!(FileType::from_extension("xls"), Some(FileType::Spreadsheet));
    assert_eq!(FileType::from_extension("ppt"), Some(FileType::LegacyPpt));
    assert_eq!(FileType::from_extension("WEBP"), Some(FileType::Image));
    assert_eq!(FileType::Spreadsheet.content_tag(), "excel");
    assert_eq!(extension_of("archive.tar.GZ").as_deref(), Some("gz"));
}
