//! Predicates over format-supplied metadata (title, author, counts)

use shared_types::{Document, Evidence};

const MIN_TITLE_CHARS: usize = 6;
const MIN_AUTHOR_CHARS: usize = 3;

pub fn has_meaningful_title(doc: &Document) -> bool {
    doc.title
        .as_deref()
        .is_some_and(|title| title.chars().count() >= MIN_TITLE_CHARS)
}

pub fn title(doc: &Document) -> Evidence {
    doc.title.clone().into()
}

pub fn has_author(doc: &Document) -> bool {
    doc.author
        .as_deref()
        .is_some_and(|author| author.chars().count() >= MIN_AUTHOR_CHARS)
}

pub fn author(doc: &Document) -> Evidence {
    doc.author.clone().into()
}

/// Title and author both present, independent of their length thresholds
pub fn follows_template(doc: &Document) -> bool {
    let present = |field: &Option<String>| field.as_deref().is_some_and(|v| !v.is_empty());
    present(&doc.title) && present(&doc.author)
}

pub fn template_status(doc: &Document) -> Evidence {
    let status = if follows_template(doc) {
        "Template used"
    } else {
        "No template detected"
    };
    Evidence::Text(status.to_string())
}

pub fn has_pages(doc: &Document) -> bool {
    doc.page_count.unwrap_or(0) > 0
}

pub fn page_count(doc: &Document) -> Evidence {
    Evidence::Count(u64::from(doc.page_count.unwrap_or(0)))
}

pub fn has_rows(doc: &Document) -> bool {
    doc.row_count.unwrap_or(0) > 0
}

pub fn row_count(doc: &Document) -> Evidence {
    Evidence::Text(format!("Rows: {}", doc.row_count.unwrap_or(0)))
}

pub fn has_columns(doc: &Document) -> bool {
    doc.column_count.unwrap_or(0) > 0
}

pub fn column_count(doc: &Document) -> Evidence {
    Evidence::Text(format!("Columns: {}", doc.column_count.unwrap_or(0)))
}
