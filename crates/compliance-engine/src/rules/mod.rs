//! Compliance rules as data
//!
//! A [`Rule`] is a named pure predicate plus an independent evidence
//! extractor and a bilingual message. Rules are grouped into ordered
//! [`RuleSet`]s, one per [`DocumentKind`]; adding a rule means adding a
//! table entry in [`catalog`], not new dispatch code.

pub mod catalog;
pub mod metadata;
pub mod text;

use std::fmt;

use shared_types::{Document, DocumentKind, Evidence};

pub type Predicate = fn(&Document) -> bool;
pub type EvidenceExtractor = fn(&Document) -> Evidence;

/// Rule description in every supported language
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Messages {
    pub en: &'static str,
    pub de: &'static str,
}

#[derive(Clone, Copy)]
pub struct Rule {
    pub id: &'static str,
    pub predicate: Predicate,
    pub evidence: EvidenceExtractor,
    pub messages: Messages,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("messages", &self.messages)
            .finish_non_exhaustive()
    }
}

/// Ordered rules applicable to one document kind
#[derive(Debug, Clone)]
pub struct RuleSet {
    kind: DocumentKind,
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn new(kind: DocumentKind, rules: Vec<Rule>) -> Self {
        Self { kind, rules }
    }

    /// Standard rule set for a document kind
    pub fn for_kind(kind: DocumentKind) -> Self {
        let rules = match kind {
            DocumentKind::WordDocument => catalog::WORD_DOCUMENT_RULES,
            DocumentKind::Pdf => catalog::PDF_RULES,
            DocumentKind::Spreadsheet => catalog::SPREADSHEET_RULES,
        };
        Self::new(kind, rules.to_vec())
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn ids(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.id).collect()
    }

    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
