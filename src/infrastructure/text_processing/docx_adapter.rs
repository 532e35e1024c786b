use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::application::ports::{FileParser, FileParserError};
use crate::domain::{ContentDetails, FileType, ParsedContent, UploadedFile, word_count};

use super::ooxml::{
    MAX_XML_BYTES, open_archive, read_entry, resolve_reference, text_of, xml_error,
};

const DOCUMENT_PART: &str = "word/document.xml";

pub struct DocxAdapter;

#[derive(Debug, Default, PartialEq)]
pub struct DocxBody {
    pub paragraphs: Vec<String>,
    pub tables: Vec<Vec<Vec<String>>>,
}

type Table = Vec<Vec<String>>;

#[derive(Default)]
struct BodyBuilder {
    body: DocxBody,
    paragraph: String,
    in_text: bool,
    table_depth: usize,
    table: Table,
    row: Vec<String>,
    cell: Vec<String>,
}

impl BodyBuilder {
    fn end_paragraph(&mut self) {
        let text = std::mem::take(&mut self.paragraph);
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        if self.table_depth > 0 {
            self.cell.push(text.to_string());
        } else {
            self.body.paragraphs.push(text.to_string());
        }
    }
}

impl DocxAdapter {
    /// Body paragraphs outside tables, and every top-level table as rows of cell text.
    pub fn parse_document_xml(xml: &str) -> Result<DocxBody, FileParserError> {
        let mut reader = Reader::from_str(xml);
        let mut b = BodyBuilder::default();

        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"w:t" => b.in_text = true,
                    b"w:tbl" => {
                        b.table_depth += 1;
                    }
                    _ => {}
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"w:tab" => b.paragraph.push('\t'),
                    b"w:br" | b"w:cr" => b.paragraph.push('\n'),
                    _ => {}
                },
                Event::Text(t) if b.in_text => b.paragraph.push_str(&text_of(&t)),
                Event::GeneralRef(r) if b.in_text => b.paragraph.push_str(&resolve_reference(&r)),
                Event::End(e) => match e.name().as_ref() {
                    b"w:t" => b.in_text = false,
                    b"w:p" => b.end_paragraph(),
                    b"w:tc" if b.table_depth == 1 => {
                        let cell = std::mem::take(&mut b.cell).join("\n");
                        b.row.push(cell);
                    }
                    b"w:tr" if b.table_depth == 1 => {
                        let row = std::mem::take(&mut b.row);
                        b.table.push(row);
                    }
                    b"w:tbl" => {
                        b.table_depth = b.table_depth.saturating_sub(1);
                        if b.table_depth == 0 {
                            let table = std::mem::take(&mut b.table);
                            b.body.tables.push(table);
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(b.body)
    }

    fn extract(data: Vec<u8>) -> Result<DocxBody, FileParserError> {
        let mut archive = open_archive(data)?;
        let mut budget = MAX_XML_BYTES;
        let xml = read_entry(&mut archive, DOCUMENT_PART, &mut budget)?;
        Self::parse_document_xml(&xml)
    }
}

#[async_trait]
impl FileParser for DocxAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %file.filename))]
    async fn parse(
        &self,
        data: &[u8],
        file: &UploadedFile,
    ) -> Result<ParsedContent, FileParserError> {
        if file.file_type != FileType::Docx {
            return Err(FileParserError::UnsupportedFileType(file.extension.clone()));
        }

        let data = data.to_vec();
        let body = tokio::task::spawn_blocking(move || Self::extract(data))
            .await
            .map_err(|e| FileParserError::ExtractionFailed(format!("task join error: {e}")))??;

        let full_text = body.paragraphs.join("\n\n");
        let paragraph_count = body.paragraphs.len();

        tracing::info!(
            paragraph_count,
            table_count = body.tables.len(),
            "Word document extraction complete"
        );

        Ok(ParsedContent {
            kind: file.file_type.content_tag().to_string(),
            summary: format!(
                "Word document with {} paragraphs processed successfully",
                paragraph_count
            ),
            details: ContentDetails::Docx {
                paragraph_count,
                table_count: body.tables.len(),
                word_count: word_count(&full_text),
                tables: body.tables,
            },
            text_content: Some(full_text),
        })
    }
}
