use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::SubjectArea;

const SECTION_DELIMITER: &str = "***";
const TEMPLATE_HEADING: &str = "### Template";
const FALLBACK_FORMAT: &str = "general";

static SIX_BACKTICKS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"``````").unwrap());
static MATH_STEP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Step (\d+):\*\*").unwrap());
static MATH_FINAL_ANSWER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*Final Answer:\*\*").unwrap());
static DOCUMENT_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"##\s*([^#\n]+)").unwrap());
static FILLER_PHRASES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?is)Hey there!.*?!",
        r"(?is)I'm super excited.*?!",
        r"(?is)Don't worry.*?!",
        r"(?is)Let's dive into.*?!",
        r"(?is)I'm thrilled to.*?!",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});
static HEADING_WITHOUT_SPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##([^#])").unwrap());
static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());
static HORIZONTAL_WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatDefinition {
    pub instructions: Vec<String>,
    pub template: String,
}

/// Prompt instructions per subject area and post-processing of model output.
#[derive(Debug, Clone)]
pub struct ContentFormatter {
    formats: HashMap<String, FormatDefinition>,
    source: Option<PathBuf>,
}

impl ContentFormatter {
    /// Loads definitions from `path`. Any failure falls back to the built-in formats.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        let mut formats = match std::fs::read_to_string(path) {
            Ok(content) => {
                let parsed = parse_definitions(&content);
                if parsed.is_empty() {
                    tracing::warn!(path = %path.display(), "No content formats parsed, using defaults");
                    default_formats()
                } else {
                    parsed
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Content formats file not found, using defaults");
                default_formats()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read content formats, using defaults");
                default_formats()
            }
        };

        if !formats.contains_key(FALLBACK_FORMAT) {
            if let Some(general) = default_formats().remove(FALLBACK_FORMAT) {
                formats.insert(FALLBACK_FORMAT.to_string(), general);
            }
        }

        tracing::info!(count = formats.len(), "Loaded content formats");

        Self {
            formats,
            source: Some(path.to_path_buf()),
        }
    }

    pub fn with_defaults() -> Self {
        Self {
            formats: default_formats(),
            source: None,
        }
    }

    /// Re-reads the definition file this formatter was loaded from.
    pub fn reload(&self) -> Self {
        match &self.source {
            Some(path) => Self::load(path),
            None => Self::with_defaults(),
        }
    }

    pub fn available_formats(&self) -> Vec<String> {
        let mut names: Vec<String> = self.formats.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn definition(&self, category: &str) -> Option<&FormatDefinition> {
        self.formats.get(category)
    }

    pub fn get_format_instructions(&self, category: &str) -> String {
        let (name, definition) = match self.formats.get(category) {
            Some(definition) => (category, definition),
            None => match self.formats.get(FALLBACK_FORMAT) {
                Some(definition) => (FALLBACK_FORMAT, definition),
                None => return String::new(),
            },
        };

        let instructions = definition
            .instructions
            .iter()
            .map(|i| format!("- {}", i))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "\nCONTENT TYPE: {}\n\nFORMAT REQUIREMENTS:\n{}\n\nEXAMPLE STRUCTURE:\n{}\n",
            name.to_uppercase(),
            instructions,
            definition.template
        )
    }

    pub fn format_response(&self, response: &str, subject: SubjectArea) -> String {
        let processed = match subject {
            SubjectArea::Programming => SIX_BACKTICKS.replace_all(response, "").into_owned(),
            SubjectArea::Mathematics => {
                let stepped = MATH_STEP.replace_all(response, "\n**Step ${1}:**");
                MATH_FINAL_ANSWER
                    .replace_all(&stepped, "\n**🎯 Final Answer:**")
                    .into_owned()
            }
            SubjectArea::DocumentAnalysis => {
                DOCUMENT_HEADING.replace_all(response, "## ${1}").into_owned()
            }
            _ => strip_filler(response),
        };

        clean_response(&processed)
    }
}

fn strip_filler(response: &str) -> String {
    FILLER_PHRASES
        .iter()
        .fold(response.to_string(), |text, pattern| {
            pattern.replace_all(&text, "").into_owned()
        })
}

fn clean_response(response: &str) -> String {
    let headed = HEADING_WITHOUT_SPACE.replace_all(response, "## ${1}");
    let collapsed = EXCESS_NEWLINES.replace_all(&headed, "\n\n");
    let spaced = HORIZONTAL_WHITESPACE.replace_all(&collapsed, " ");
    spaced.trim().to_string()
}

/// Parses `***`-delimited sections of `## Name`, `- instruction` lines and a
/// `### Template` block. Headings inside the template belong to the template.
pub fn parse_definitions(content: &str) -> HashMap<String, FormatDefinition> {
    let mut formats = HashMap::new();

    for section in content.split(SECTION_DELIMITER) {
        let section = section.trim();
        if section.is_empty() {
            continue;
        }

        let mut name: Option<String> = None;
        let mut instructions = Vec::new();
        let mut template = Vec::new();
        let mut in_template = false;

        for line in section.lines() {
            if !in_template && line.starts_with("## ") {
                name = Some(line[3..].trim().to_string());
            } else if line.trim() == TEMPLATE_HEADING {
                in_template = true;
            } else if line.starts_with("```") {
                continue;
            } else if in_template {
                template.push(line);
            } else if let Some(instruction) = line.strip_prefix("- ") {
                instructions.push(instruction.to_string());
            }
        }

        if let Some(name) = name.filter(|n| !n.is_empty()) {
            formats.insert(
                name,
                FormatDefinition {
                    instructions,
                    template: template.join("\n").trim().to_string(),
                },
            );
        }
    }

    formats
}

fn default_formats() -> HashMap<String, FormatDefinition> {
    HashMap::from([
        (
            "programming".to_string(),
            FormatDefinition {
                instructions: vec![
                    "Provide working code in ``` blocks".to_string(),
                    "Include essential comments".to_string(),
                    "Show example usage".to_string(),
                ],
                template: "## 🔧 SOLUTION\n```\n\n## 🚀 USAGE\n```".to_string(),
            },
        ),
        (
            FALLBACK_FORMAT.to_string(),
            FormatDefinition {
                instructions: vec![
                    "Use clear structure".to_string(),
                    "Include bullet points".to_string(),
                    "Keep concise".to_string(),
                ],
                template: "## 🎯 RESPONSE\n\n- Point 1\n- Point 2".to_string(),
            },
        ),
    ])
}
