use std::io::Cursor;

use async_trait::async_trait;
use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};
use serde_json::{Map, Number, Value};

use crate::application::ports::{FileParser, FileParserError};
use crate::domain::{ContentDetails, FileType, ParsedContent, UploadedFile};

const PREVIEW_ROWS: usize = 5;

pub struct SpreadsheetAdapter;

#[derive(Debug, PartialEq)]
pub struct SheetPreview {
    pub columns: Vec<String>,
    pub rows: usize,
    pub data_preview: Vec<Map<String, Value>>,
}

impl SpreadsheetAdapter {
    /// First row is the header; the remaining rows are data.
    pub fn preview(range: &Range<Data>) -> SheetPreview {
        let mut rows = range.rows();

        let columns: Vec<String> = match rows.next() {
            Some(header) => header
                .iter()
                .enumerate()
                .map(|(i, cell)| match cell {
                    Data::Empty => format!("Unnamed: {}", i),
                    other => other.to_string(),
                })
                .collect(),
            None => Vec::new(),
        };

        let data_rows: Vec<&[Data]> = rows.collect();
        let data_preview = data_rows
            .iter()
            .take(PREVIEW_ROWS)
            .map(|row| {
                columns
                    .iter()
                    .enumerate()
                    .map(|(i, column)| {
                        let value = row.get(i).map(cell_value).unwrap_or(Value::Null);
                        (column.clone(), value)
                    })
                    .collect::<Map<String, Value>>()
            })
            .collect();

        SheetPreview {
            columns,
            rows: data_rows.len(),
            data_preview,
        }
    }

    fn extract(data: Vec<u8>) -> Result<(SheetPreview, Vec<String>), FileParserError> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(data)).map_err(|e| {
            FileParserError::ExtractionFailed(format!("failed to open workbook: {e}"))
        })?;

        let sheet_names = workbook.sheet_names();
        let first = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| FileParserError::NoTextFound("workbook has no sheets".to_string()))?;

        let range = workbook.worksheet_range(&first).map_err(|e| {
            FileParserError::ExtractionFailed(format!("failed to read sheet {first}: {e}"))
        })?;

        Ok((Self::preview(&range), sheet_names))
    }
}

fn cell_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::Int(i) => Value::Number((*i).into()),
        Data::Float(f) => Number::from_f64(*f).map(Value::Number).unwrap_or(Value::Null),
        Data::Bool(b) => Value::Bool(*b),
        Data::String(s) => Value::String(s.clone()),
        other => Value::String(other.to_string()),
    }
}

#[async_trait]
impl FileParser for SpreadsheetAdapter {
    #[tracing::instrument(skip(self, data), fields(filename = %file.filename))]
    async fn parse(
        &self,
        data: &[u8],
        file: &UploadedFile,
    ) -> Result<ParsedContent, FileParserError> {
        if file.file_type != FileType::Spreadsheet {
            return Err(FileParserError::UnsupportedFileType(file.extension.clone()));
        }

        let data = data.to_vec();
        let (preview, sheet_names) = tokio::task::spawn_blocking(move || Self::extract(data))
            .await
            .map_err(|e| FileParserError::ExtractionFailed(format!("task join error: {e}")))??;

        let shape = [preview.rows, preview.columns.len()];
        tracing::info!(rows = shape[0], columns = shape[1], "Spreadsheet extraction complete");

        Ok(ParsedContent {
            kind: file.file_type.content_tag().to_string(),
            summary: format!(
                "Excel file with {} rows and {} columns processed",
                shape[0], shape[1]
            ),
            text_content: None,
            details: ContentDetails::Spreadsheet {
                columns: preview.columns,
                shape,
                data_preview: preview.data_preview,
                sheet_names,
            },
        })
    }
}
