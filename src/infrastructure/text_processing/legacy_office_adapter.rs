use async_trait::async_trait;

use crate::application::ports::{FileParser, FileParserError};
use crate::domain::{FileType, ParsedContent, UploadedFile};

/// Binary `.doc` and `.ppt` files are accepted but not parsed.
pub struct LegacyOfficeAdapter;

#[async_trait]
impl FileParser for LegacyOfficeAdapter {
    async fn parse(
        &self,
        _data: &[u8],
        file: &UploadedFile,
    ) -> Result<ParsedContent, FileParserError> {
        let (label, requires) = match file.file_type {
            FileType::LegacyDoc => ("Word document", "conversion to .docx"),
            FileType::LegacyPpt => ("PowerPoint", "conversion to .pptx"),
            _ => return Err(FileParserError::UnsupportedFileType(file.extension.clone())),
        };

        Ok(ParsedContent::unparsed(
            file.file_type.content_tag(),
            format!(
                "{} \"{}\" uploaded (legacy .{} format not parsed)",
                label, file.filename, file.extension
            ),
            requires,
        ))
    }
}
