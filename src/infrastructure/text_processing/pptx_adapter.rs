use async_trait::async_trait;
use quick_xml::Reader;
use quick_xml::events::Event;

use crate::application::ports::{FileParser, FileParserError};
use crate::domain::{ContentDetails, FileType, ParsedContent, SlideContent, UploadedFile};

use super::ooxml::{
    MAX_XML_BYTES, OoxmlArchive, open_archive, read_entry, resolve_reference, text_of, xml_error,
};

const SLIDE_PREFIX: &str = "ppt/slides/slide";
const SLIDE_SUFFIX: &str = ".xml";

pub struct PptxAdapter;

impl PptxAdapter {
    /// Text of each shape on a slide, one entry per non-empty shape.
    pub fn parse_slide_xml(xml: &str) -> Result<Vec<String>, FileParserError> {
        let mut reader = Reader::from_str(xml);
        let mut shapes = Vec::new();
        let mut shape_depth = 0usize;
        let mut paragraphs: Vec<String> = Vec::new();
        let mut paragraph = String::new();
        let mut in_text = false;

        loop {
            match reader.read_event().map_err(xml_error)? {
                Event::Start(e) => match e.name().as_ref() {
                    b"p:sp" => shape_depth += 1,
                    b"a:t" => in_text = shape_depth > 0,
                    _ => {}
                },
                Event::Empty(e) if e.name().as_ref() == b"a:br" => paragraph.push('\n'),
                Event::Text(t) if in_text => paragraph.push_str(&text_of(&t)),
                Event::GeneralRef(r) if in_text => paragraph.push_str(&resolve_reference(&r)),
                Event::End(e) => match e.name().as_ref() {
                    b"a:t" => in_text = false,
                    b"a:p" if shape_depth > 0 => paragraphs.push(std::mem::take(&mut paragraph)),
                    b"p:sp" => {
                        shape_depth = shape_depth.saturating_sub(1);
                        let text = std::mem::take(&mut paragraphs).join("\n");
                        let text = text.trim();
                        if !text.is_empty() {
                            shapes.push(text.to_string());
                        }
                    }
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(shapes)
    }

    fn slide_entries(archive: &OoxmlArchive) -> Vec<(usize, String)> {
        let mut slides: Vec<(usize, String)> = archive
            .file_names()
            .filter_map(|name| {
                let number = name
                    .strip_prefix(SLIDE_PREFIX)?
                    .strip_suffix(SLIDE_SUFFIX)?
                    .parse::<usize>()
                    .ok()?;
                Some((number, name.to_string()))
            })
            .collect();
        slides.sort_by_key(|(number, _)| *number);
        slides
    }

    fn extract(data: Vec<u8>) -> Result<Vec<SlideContent>, FileParserError> {
        let mut archive = open_archive(data)?;
        let entries = Self::slide_entries(&archive);

        let mut budget = MAX_XML_BYTES;
        let mut slides = Vec::new();
        for (index, (_, name)) in entries.iter().enumerate() {
            let xml = read_entry(&mut archive, name, &mut budget)?;
            let content = Self::parse_slide_xml(&xml)?;
            if content.is_empty() {
                continue;
            }
            slides.push(SlideContent {
                slide_number: index + 1,
                text: content.join("\n"),
                content,
            });
        }

        Ok(slides)
    }
}

#[async_trait]
impl FileParser for PptxAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %file.filename))]
    async fn parse(
        &self,
        data: &[u8],
        file: &UploadedFile,
    ) -> Result<ParsedContent, FileParserError> {
        if file.file_type != FileType::Pptx {
            return Err(FileParserError::UnsupportedFileType(file.extension.clone()));
        }

        let data = data.to_vec();
        let slides = tokio::task::spawn_blocking(move || Self::extract(data))
            .await
            .map_err(|e| FileParserError::ExtractionFailed(format!("task join error: {e}")))??;

        let all_text = slides
            .iter()
            .map(|slide| slide.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let total_slides = slides.len();

        tracing::info!(total_slides, "PowerPoint extraction complete");

        Ok(ParsedContent {
            kind: file.file_type.content_tag().to_string(),
            summary: format!("PowerPoint with {} slides processed successfully", total_slides),
            text_content: Some(all_text),
            details: ContentDetails::Presentation {
                slides,
                total_slides,
            },
        })
    }
}
