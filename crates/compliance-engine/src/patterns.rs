//! Named patterns and keyword vocabularies used by the compliance rules
//!
//! Rules never inline their own regexes; everything they match against lives
//! here so each pattern has a single definition.

use lazy_static::lazy_static;
use regex::Regex;

/// Approval markers
pub const APPROVAL_KEYWORDS: &[&str] = &["approved", "validated", "freigegeben", "release"];

/// Ownership notices
pub const OWNERSHIP_KEYWORDS: &[&str] = &[
    "confidential",
    "geschäftsgeheimnis",
    "business secret",
    "© alstom",
];

/// Organizational units that may be named as the creating unit
pub const ORGANIZATIONAL_UNIT_KEYWORDS: &[&str] =
    &["alstom", "produktlinie", "standort", "dach region"];

/// Alstom Management System references
pub const AMS_KEYWORDS: &[&str] = &["alstom management system", "ams", "management handbook"];

lazy_static! {
    /// Process-wide pattern library, compiled on first use
    pub static ref PATTERNS: PatternLibrary = PatternLibrary::new();
}

/// One identification numbering scheme, matched against whole tokens
#[derive(Debug)]
pub struct NumberingScheme {
    pub name: &'static str,
    pattern: Regex,
}

impl NumberingScheme {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).unwrap(),
        }
    }

    pub fn matches(&self, token: &str) -> bool {
        self.pattern.is_match(token)
    }
}

/// Closed, case-insensitive keyword vocabulary
#[derive(Debug)]
pub struct KeywordSet {
    keywords: &'static [&'static str],
    matcher: Regex,
}

impl KeywordSet {
    fn new(keywords: &'static [&'static str]) -> Self {
        let alternation = keywords
            .iter()
            .map(|kw| regex::escape(kw))
            .collect::<Vec<_>>()
            .join("|");

        Self {
            keywords,
            matcher: Regex::new(&format!("(?i)(?:{})", alternation)).unwrap(),
        }
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        self.keywords
    }

    /// True if any keyword occurs in the lower-cased text
    pub fn occurs_in(&self, text: &str) -> bool {
        let text_lower = text.to_lowercase();
        self.keywords
            .iter()
            .any(|kw| text_lower.contains(&kw.to_lowercase()))
    }

    /// Every keyword occurrence, in document order and original casing
    pub fn find_all(&self, text: &str) -> Vec<String> {
        self.matcher
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[derive(Debug)]
pub struct PatternLibrary {
    /// Central, country and site/product-line schemes (case-sensitive)
    pub identification_numbers: Vec<NumberingScheme>,
    /// Unanchored central-scheme shape, used for numbering evidence
    pub central_number_shape: Regex,
    pub revision: Regex,
    pub dates: Vec<Regex>,
    pub page_numbers: Vec<Regex>,
    pub approval: KeywordSet,
    pub ownership: KeywordSet,
    pub organizational_units: KeywordSet,
    pub ams: KeywordSet,
}

impl PatternLibrary {
    fn new() -> Self {
        Self {
            identification_numbers: vec![
                NumberingScheme::new("central", r"^[A-Z]{3}-[A-Z]{3}-\d{3}$"),
                NumberingScheme::new("country", r"^[A-Z]{3}-[A-Z]{2}-[A-Z]{3}-\d{3}$"),
                NumberingScheme::new(
                    "site_product_line",
                    r"^[A-Z]{3}-[A-Z]{2}-[A-Z]{3}-[A-Z]{3}-\d{3}$",
                ),
            ],
            central_number_shape: Regex::new(r"[A-Z]{3}-[A-Z]{3}-\d{3}").unwrap(),
            revision: Regex::new(r"(?i)version:?\s?[a-d]").unwrap(),
            dates: vec![
                Regex::new(r"\d{2}\.\d{2}\.\d{4}").unwrap(),
                Regex::new(r"\d{4}-\d{2}-\d{2}").unwrap(),
            ],
            page_numbers: vec![
                Regex::new(r"(?i)page\s+\d+\s+of\s+\d+").unwrap(),
                Regex::new(r"\d+/\d+").unwrap(),
            ],
            approval: KeywordSet::new(APPROVAL_KEYWORDS),
            ownership: KeywordSet::new(OWNERSHIP_KEYWORDS),
            organizational_units: KeywordSet::new(ORGANIZATIONAL_UNIT_KEYWORDS),
            ams: KeywordSet::new(AMS_KEYWORDS),
        }
    }

    /// Scheme name for a token, if it is a well-formed identification number
    pub fn numbering_scheme(&self, token: &str) -> Option<&'static str> {
        self.identification_numbers
            .iter()
            .find(|scheme| scheme.matches(token))
            .map(|scheme| scheme.name)
    }

    /// All tokens of `text` that follow one of the numbering schemes
    pub fn identification_numbers_in<'t>(&self, text: &'t str) -> Vec<&'t str> {
        tokens(text)
            .filter(|token| self.numbering_scheme(token).is_some())
            .collect()
    }

    pub fn has_date(&self, text: &str) -> bool {
        self.dates.iter().any(|re| re.is_match(text))
    }

    /// Date-shaped substrings in document order
    pub fn find_dates(&self, text: &str) -> Vec<String> {
        let mut found: Vec<(usize, &str)> = self
            .dates
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| (m.start(), m.as_str())))
            .collect();
        found.sort_by_key(|(start, _)| *start);
        found.into_iter().map(|(_, s)| s.to_string()).collect()
    }

    pub fn is_page_number_line(&self, line: &str) -> bool {
        self.page_numbers.iter().any(|re| re.is_match(line))
    }
}

/// Maximal runs of ASCII letters, digits and hyphens
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .filter(|token| !token.is_empty())
}
