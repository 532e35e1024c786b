use std::io::{Cursor, Read};

use quick_xml::events::{BytesRef, BytesText};
use zip::ZipArchive;

use crate::application::ports::FileParserError;

pub type OoxmlArchive = ZipArchive<Cursor<Vec<u8>>>;

pub fn open_archive(data: Vec<u8>) -> Result<OoxmlArchive, FileParserError> {
    ZipArchive::new(Cursor::new(data))
        .map_err(|e| FileParserError::ExtractionFailed(format!("not a valid OOXML package: {e}")))
}

/// Upper bound on the decompressed XML read from one package, across all parts.
pub const MAX_XML_BYTES: u64 = 32 * 1024 * 1024;

/// Reads a part as UTF-8 and charges its decompressed size to `remaining`.
pub fn read_entry(
    archive: &mut OoxmlArchive,
    name: &str,
    remaining: &mut u64,
) -> Result<String, FileParserError> {
    let entry = archive
        .by_name(name)
        .map_err(|e| FileParserError::ExtractionFailed(format!("missing {name}: {e}")))?;

    if entry.size() > *remaining {
        return Err(too_large(name));
    }

    // Declared sizes can lie, so the read itself is capped too.
    let mut xml = String::new();
    entry
        .take(*remaining + 1)
        .read_to_string(&mut xml)
        .map_err(|e| FileParserError::ExtractionFailed(format!("failed to read {name}: {e}")))?;

    let read = xml.len() as u64;
    if read > *remaining {
        return Err(too_large(name));
    }
    *remaining -= read;
    Ok(xml)
}

fn too_large(name: &str) -> FileParserError {
    FileParserError::ExtractionFailed(format!(
        "{name} exceeds the {} MB decompressed XML limit",
        MAX_XML_BYTES / (1024 * 1024)
    ))
}

pub fn xml_error(e: quick_xml::Error) -> FileParserError {
    FileParserError::ExtractionFailed(format!("malformed XML: {e}"))
}

pub fn text_of(text: &BytesText<'_>) -> String {
    let raw = String::from_utf8_lossy(text);
    match quick_xml::escape::unescape(&raw) {
        Ok(unescaped) => unescaped.into_owned(),
        Err(_) => raw.into_owned(),
    }
}

/// Resolves `&name;` references split out of text nodes.
pub fn resolve_reference(reference: &BytesRef<'_>) -> String {
    let name = String::from_utf8_lossy(reference);

    if let Some(numeric) = name.strip_prefix('#') {
        let code = match numeric.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => numeric.parse::<u32>().ok(),
        };
        return code
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_default();
    }

    match name.as_ref() {
        "amp" => "&",
        "lt" => "<",
        "gt" => ">",
        "quot" => "\"",
        "apos" => "'",
        _ => "",
    }
    .to_string()
}
