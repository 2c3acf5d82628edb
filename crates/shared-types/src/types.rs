use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Serialize, Serializer};

/// Source format family of an extracted document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    WordDocument,
    Pdf,
    Spreadsheet,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::WordDocument,
        DocumentKind::Pdf,
        DocumentKind::Spreadsheet,
    ];

    /// Resolve a file extension (without the dot) to a document kind
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "docx" => Some(DocumentKind::WordDocument),
            "pdf" => Some(DocumentKind::Pdf),
            "xlsx" | "xls" | "xltm" => Some(DocumentKind::Spreadsheet),
            _ => None,
        }
    }

    /// Label used in extraction failure messages
    pub fn label(&self) -> &'static str {
        match self {
            DocumentKind::WordDocument => "Word document",
            DocumentKind::Pdf => "PDF",
            DocumentKind::Spreadsheet => "Excel",
        }
    }
}

/// Normalized text + metadata view of a parsed file
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    pub kind: DocumentKind,
    #[serde(default)]
    pub text: String, // Newline-joined pages / paragraphs / cells
    #[serde(default, deserialize_with = "non_empty_field")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "non_empty_field")]
    pub author: Option<String>,
    #[serde(default)]
    pub page_count: Option<u32>,
    #[serde(default)]
    pub row_count: Option<u32>,
    #[serde(default)]
    pub column_count: Option<u32>,
}

impl Document {
    pub fn new(kind: DocumentKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            title: None,
            author: None,
            page_count: None,
            row_count: None,
            column_count: None,
        }
    }

    /// Set the title; an empty value leaves the field absent
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(title.into());
        self
    }

    /// Set the author; an empty value leaves the field absent
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = non_empty(author.into());
        self
    }

    pub fn with_page_count(mut self, pages: u32) -> Self {
        self.page_count = Some(pages);
        self
    }

    pub fn with_dimensions(mut self, rows: u32, columns: u32) -> Self {
        self.row_count = Some(rows);
        self.column_count = Some(columns);
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn non_empty_field<'de, D: serde::Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.and_then(non_empty))
}

/// Output language for rule messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    En,
    #[default]
    De,
}

impl Locale {
    /// Parse a language code. Only the exact code `en` selects English;
    /// every other value, including `EN`, falls back to German.
    pub fn from_code(code: &str) -> Self {
        if code == "en" {
            Locale::En
        } else {
            Locale::De
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::De => "de",
        }
    }
}

impl Serialize for Locale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for Locale {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(Locale::from_code(&code))
    }
}

/// Supporting content shown next to a rule verdict
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Evidence {
    None,
    Text(String),
    Matches(Vec<String>),
    Count(u64),
}

impl From<Option<String>> for Evidence {
    fn from(value: Option<String>) -> Self {
        value.map(Evidence::Text).unwrap_or(Evidence::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RuleResult {
    pub rule_id: String,
    pub passed: bool,
    pub message: String, // Already localized
    pub evidence: Evidence,
}

/// Ordered rule id -> result mapping for one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub kind: DocumentKind,
    pub locale: Locale,
    pub results: Vec<RuleResult>,
}

impl VerificationReport {
    pub fn get(&self, rule_id: &str) -> Option<&RuleResult> {
        self.results.iter().find(|r| r.rule_id == rule_id)
    }

    pub fn rule_ids(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.rule_id.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }
}

/// Entry body of the serialized results object (the id is the key)
#[derive(Serialize)]
struct ResultEntry<'a> {
    passed: bool,
    message: &'a str,
    evidence: &'a Evidence,
}

struct OrderedResults<'a>(&'a [RuleResult]);

impl Serialize for OrderedResults<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for result in self.0 {
            map.serialize_entry(
                &result.rule_id,
                &ResultEntry {
                    passed: result.passed,
                    message: &result.message,
                    evidence: &result.evidence,
                },
            )?;
        }
        map.end()
    }
}

impl Serialize for VerificationReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut report = serializer.serialize_struct("VerificationReport", 3)?;
        report.serialize_field("kind", &self.kind)?;
        report.serialize_field("locale", &self.locale)?;
        report.serialize_field("results", &OrderedResults(&self.results))?;
        report.end()
    }
}
