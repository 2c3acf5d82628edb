//! Predicates and evidence extractors over the document text

use shared_types::{Document, Evidence};

use crate::confidentiality::ConfidentialityLevel;
use crate::patterns::PATTERNS;

pub fn has_identification_number(doc: &Document) -> bool {
    !PATTERNS.identification_numbers_in(&doc.text).is_empty()
}

pub fn identification_numbers(doc: &Document) -> Evidence {
    Evidence::Matches(
        PATTERNS
            .identification_numbers_in(&doc.text)
            .into_iter()
            .map(str::to_string)
            .collect(),
    )
}

/// Central-scheme shapes anywhere in the text, including inside longer tokens
pub fn numbering_shapes(doc: &Document) -> Evidence {
    Evidence::Matches(
        PATTERNS
            .central_number_shape
            .find_iter(&doc.text)
            .map(|m| m.as_str().to_string())
            .collect(),
    )
}

pub fn has_page_numbers(doc: &Document) -> bool {
    doc.text
        .lines()
        .any(|line| PATTERNS.is_page_number_line(line))
}

pub fn page_number_status(doc: &Document) -> Evidence {
    let status = if has_page_numbers(doc) {
        "Page numbers detected"
    } else {
        "No page numbers found"
    };
    Evidence::Text(status.to_string())
}

pub fn has_revision_status(doc: &Document) -> bool {
    PATTERNS.revision.is_match(&doc.text)
}

pub fn revision_markers(doc: &Document) -> Evidence {
    Evidence::Matches(
        PATTERNS
            .revision
            .find_iter(&doc.text)
            .map(|m| m.as_str().to_string())
            .collect(),
    )
}

pub fn has_approval(doc: &Document) -> bool {
    PATTERNS.approval.occurs_in(&doc.text)
}

pub fn approval_markers(doc: &Document) -> Evidence {
    Evidence::Matches(PATTERNS.approval.find_all(&doc.text))
}

pub fn has_effective_date(doc: &Document) -> bool {
    PATTERNS.has_date(&doc.text)
}

pub fn effective_dates(doc: &Document) -> Evidence {
    Evidence::Matches(PATTERNS.find_dates(&doc.text))
}

pub fn has_ownership_notice(doc: &Document) -> bool {
    PATTERNS.ownership.occurs_in(&doc.text)
}

pub fn ownership_notices(doc: &Document) -> Evidence {
    Evidence::Matches(PATTERNS.ownership.find_all(&doc.text))
}

pub fn has_creating_unit(doc: &Document) -> bool {
    PATTERNS.organizational_units.occurs_in(&doc.text)
}

pub fn creating_units(doc: &Document) -> Evidence {
    Evidence::Matches(PATTERNS.organizational_units.find_all(&doc.text))
}

pub fn has_confidentiality_level(doc: &Document) -> bool {
    ConfidentialityLevel::detect(&doc.text).is_some()
}

pub fn confidentiality_level(doc: &Document) -> Evidence {
    match ConfidentialityLevel::detect(&doc.text) {
        Some(level) => Evidence::Text(level.name().to_string()),
        None => Evidence::None,
    }
}

pub fn has_ams_reference(doc: &Document) -> bool {
    PATTERNS.ams.occurs_in(&doc.text)
}

pub fn ams_references(doc: &Document) -> Evidence {
    Evidence::Matches(PATTERNS.ams.find_all(&doc.text))
}
