mod composite_file_parser;
mod docx_adapter;
mod file_parser_factory;
mod image_ocr_adapter;
mod legacy_office_adapter;
mod ooxml;
mod pdf_adapter;
mod plain_text_adapter;
mod pptx_adapter;
mod spreadsheet_adapter;
mod text_sanitizer;

pub use composite_file_parser::CompositeFileParser;
pub use docx_adapter::{DocxAdapter, DocxBody};
pub use file_parser_factory::FileParserFactory;
pub use image_ocr_adapter::{ImageOcrAdapter, OCR_UNAVAILABLE};
pub use legacy_office_adapter::LegacyOfficeAdapter;
pub use ooxml::MAX_XML_BYTES;
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use pptx_adapter::PptxAdapter;
pub use spreadsheet_adapter::{SheetPreview, SpreadsheetAdapter};
pub use text_sanitizer::sanitize_extracted_text;
