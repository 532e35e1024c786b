use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::FileParser;
use crate::domain::FileType;
use crate::presentation::config::UploadSettings;

use super::{
    CompositeFileParser, DocxAdapter, ImageOcrAdapter, LegacyOfficeAdapter, PdfAdapter,
    PlainTextAdapter, PptxAdapter, SpreadsheetAdapter,
};

pub struct FileParserFactory;

impl FileParserFactory {
    pub fn create(settings: &UploadSettings) -> CompositeFileParser {
        let timeout = Duration::from_secs(settings.parse_timeout_seconds);
        let legacy = shared(LegacyOfficeAdapter);

        tracing::info!(ocr_command = %settings.ocr_command, "Registering file parsers");

        CompositeFileParser::new(vec![
            (FileType::Text, shared(PlainTextAdapter)),
            (FileType::Pdf, shared(PdfAdapter::new(timeout))),
            (FileType::Docx, shared(DocxAdapter)),
            (FileType::Spreadsheet, shared(SpreadsheetAdapter)),
            (FileType::Pptx, shared(PptxAdapter)),
            (
                FileType::Image,
                shared(ImageOcrAdapter::new(settings.ocr_command.clone(), timeout)),
            ),
            (FileType::LegacyDoc, Arc::clone(&legacy)),
            (FileType::LegacyPpt, legacy),
        ])
    }
}

fn shared(parser: impl FileParser + 'static) -> Arc<dyn FileParser> {
    Arc::new(parser)
}
