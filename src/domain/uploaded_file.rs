use uuid::Uuid;

pub const ALLOWED_EXTENSIONS: [&str; 15] = [
    "pdf", "txt", "docx", "doc", "xlsx", "xls", "pptx", "ppt", "jpg", "jpeg", "png", "gif", "bmp",
    "tiff", "webp",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId(Uuid);

impl FileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

/// Parser family an upload is routed to, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Text,
    Pdf,
    Docx,
    LegacyDoc,
    Spreadsheet,
    Pptx,
    LegacyPpt,
    Image,
}

impl FileType {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "txt" => Some(Self::Text),
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "doc" => Some(Self::LegacyDoc),
            "xlsx" | "xls" => Some(Self::Spreadsheet),
            "pptx" => Some(Self::Pptx),
            "ppt" => Some(Self::LegacyPpt),
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "tiff" | "webp" => Some(Self::Image),
            _ => None,
        }
    }

    /// Value of the `type` tag in parsed content.
    pub fn content_tag(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::LegacyDoc => "doc",
            Self::Spreadsheet => "excel",
            Self::Pptx => "pptx",
            Self::LegacyPpt => "ppt",
            Self::Image => "image",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadedFile {
    pub id: FileId,
    pub original_filename: String,
    pub filename: String,
    pub extension: String,
    pub file_type: FileType,
    pub size_bytes: u64,
}

impl UploadedFile {
    /// Returns `None` when the extension is missing or not in [`ALLOWED_EXTENSIONS`].
    pub fn new(original_filename: &str, size_bytes: u64) -> Option<Self> {
        let extension = extension_of(original_filename)?;
        let file_type = FileType::from_extension(&extension)?;

        let mut filename = sanitize_filename(original_filename);
        if extension_of(&filename).as_deref() != Some(extension.as_str()) {
            filename = format!("upload.{}", extension);
        }

        Some(Self {
            id: FileId::new(),
            original_filename: original_filename.to_string(),
            filename,
            extension,
            file_type,
            size_bytes,
        })
    }
}

pub fn extension_of(filename: &str) -> Option<String> {
    let basename = filename.rsplit(['/', '\\']).next()?;
    let (stem, ext) = basename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Reduces a client-supplied filename to a safe ASCII basename.
pub fn sanitize_filename(raw: &str) -> String {
    let basename = raw.rsplit(['/', '\\']).next().unwrap_or_default();

    let mut sanitized = String::with_capacity(basename.len());
    for ch in basename.chars() {
        if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '-' | '_') {
            sanitized.push(ch);
        } else if ch.is_whitespace() {
            sanitized.push('_');
        }
    }

    sanitized.trim_start_matches(['.', '_']).to_string()
}
