//! Spreadsheet (`.xlsx`, `.xltm`) extraction
//!
//! Reads the first worksheet of the workbook. The first populated row is the
//! header: it defines the column count and is not part of the data rows or
//! the extracted text.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use shared_types::{Document, DocumentKind, Extractor};
use tracing::debug;

use crate::error::{xml_error, ExtractError, ExtractResult};
use crate::package::Package;

const WORKBOOK_PART: &str = "xl/workbook.xml";
const WORKBOOK_RELS_PART: &str = "xl/_rels/workbook.xml.rels";
const SHARED_STRINGS_PART: &str = "xl/sharedStrings.xml";
const DEFAULT_SHEET_PART: &str = "xl/worksheets/sheet1.xml";

pub struct SpreadsheetExtractor;

impl SpreadsheetExtractor {
    pub fn read(&self, path: &Path) -> ExtractResult<Document> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        if extension == "xls" {
            return Err(ExtractError::UnsupportedLegacyFormat(extension));
        }

        let mut package = Package::open(path)?;

        let sheet_part = first_sheet_part(&mut package)?;
        let shared_strings = match package.read_optional_part(SHARED_STRINGS_PART)? {
            Some(xml) => parse_shared_strings(&xml)?,
            None => Vec::new(),
        };
        let sheet_xml = package.read_part(&sheet_part)?;
        let rows = parse_sheet(&sheet_part, &sheet_xml, &shared_strings)?;

        let table = Table::from_rows(rows);
        debug!(
            "Extracted {} rows x {} columns from {}",
            table.row_count,
            table.column_count,
            path.display()
        );

        Ok(Document::new(DocumentKind::Spreadsheet, table.text)
            .with_dimensions(table.row_count, table.column_count))
    }
}

impl Extractor for SpreadsheetExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::Spreadsheet
    }

    fn extract(&self, path: &Path) -> anyhow::Result<Document> {
        Ok(self.read(path)?)
    }
}

/// Header-aware summary of a worksheet
#[derive(Debug, PartialEq)]
struct Table {
    row_count: u32,
    column_count: u32,
    text: String,
}

impl Table {
    fn from_rows(rows: Vec<BTreeMap<u32, String>>) -> Self {
        let mut populated = rows
            .into_iter()
            .filter(|row| row.values().any(|value| !value.is_empty()));

        let header = match populated.next() {
            Some(header) => header,
            None => {
                return Self {
                    row_count: 0,
                    column_count: 0,
                    text: String::new(),
                }
            }
        };
        let data: Vec<_> = populated.collect();

        let column_count = header
            .keys()
            .chain(data.iter().flat_map(|row| row.keys()))
            .max()
            .map_or(0, |last| last + 1);

        let text = data
            .iter()
            .flat_map(|row| row.values())
            .filter(|value| !value.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            row_count: data.len() as u32,
            column_count,
            text,
        }
    }
}

/// Resolve the part name of the workbook's first sheet
fn first_sheet_part(package: &mut Package) -> ExtractResult<String> {
    let workbook = match package.read_optional_part(WORKBOOK_PART)? {
        Some(xml) => xml,
        None => return Ok(DEFAULT_SHEET_PART.to_string()),
    };

    let relationship_id = match first_sheet_relationship(&workbook)? {
        Some(id) => id,
        None => return Ok(DEFAULT_SHEET_PART.to_string()),
    };

    let rels = match package.read_optional_part(WORKBOOK_RELS_PART)? {
        Some(xml) => xml,
        None => return Ok(DEFAULT_SHEET_PART.to_string()),
    };

    Ok(relationship_targets(&rels)?
        .remove(&relationship_id)
        .map(|target| resolve_target(&target))
        .unwrap_or_else(|| DEFAULT_SHEET_PART.to_string()))
}

fn first_sheet_relationship(xml: &str) -> ExtractResult<Option<String>> {
    let mut reader = Reader::from_str(xml);
    loop {
        match reader.read_event().map_err(|e| xml_error(WORKBOOK_PART, e))? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"sheet" => {
                return attribute(&e, b"id", WORKBOOK_PART);
            }
            Event::Eof => return Ok(None),
            _ => {}
        }
    }
}

fn relationship_targets(xml: &str) -> ExtractResult<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    let mut targets = HashMap::new();
    loop {
        match reader
            .read_event()
            .map_err(|e| xml_error(WORKBOOK_RELS_PART, e))?
        {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"Relationship" => {
                let id = attribute(&e, b"Id", WORKBOOK_RELS_PART)?;
                let target = attribute(&e, b"Target", WORKBOOK_RELS_PART)?;
                if let (Some(id), Some(target)) = (id, target) {
                    targets.insert(id, target);
                }
            }
            Event::Eof => return Ok(targets),
            _ => {}
        }
    }
}

/// Relationship targets are relative to `xl/` unless absolute
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("xl/{}", target),
    }
}

/// Attribute value by local name (namespace prefix ignored)
fn attribute(element: &BytesStart, local_name: &[u8], part: &str) -> ExtractResult<Option<String>> {
    for attr in element.attributes() {
        let attr = attr.map_err(|e| xml_error(part, e))?;
        if attr.key.local_name().as_ref() == local_name {
            let value = attr.unescape_value().map_err(|e| xml_error(part, e))?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// Shared string table; rich-text runs are concatenated, phonetic runs skipped
fn parse_shared_strings(xml: &str) -> ExtractResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut strings = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    let mut in_phonetic = false;

    loop {
        match reader
            .read_event()
            .map_err(|e| xml_error(SHARED_STRINGS_PART, e))?
        {
            Event::Start(e) => match e.local_name().as_ref() {
                b"si" => current.clear(),
                b"t" => in_text = true,
                b"rPh" => in_phonetic = true,
                _ => {}
            },
            Event::Empty(e) if e.local_name().as_ref() == b"si" => strings.push(String::new()),
            Event::Text(text) if in_text && !in_phonetic => {
                let text = text
                    .unescape()
                    .map_err(|e| xml_error(SHARED_STRINGS_PART, e))?;
                current.push_str(&text);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"rPh" => in_phonetic = false,
                b"si" => strings.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(strings)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CellType {
    Number,
    SharedString,
    InlineString,
    FormulaString,
    Boolean,
    Error,
}

impl CellType {
    fn from_attribute(value: Option<&str>) -> Self {
        match value {
            Some("s") => CellType::SharedString,
            Some("inlineStr") => CellType::InlineString,
            Some("str") => CellType::FormulaString,
            Some("b") => CellType::Boolean,
            Some("e") => CellType::Error,
            _ => CellType::Number,
        }
    }
}

/// Rows of the worksheet as column index -> display value
fn parse_sheet(
    part: &str,
    xml: &str,
    shared_strings: &[String],
) -> ExtractResult<Vec<BTreeMap<u32, String>>> {
    let mut reader = Reader::from_str(xml);
    let mut rows = Vec::new();
    let mut row: BTreeMap<u32, String> = BTreeMap::new();
    let mut next_column = 0u32;
    let mut cell: Option<(u32, CellType)> = None;
    let mut raw = String::new();
    let mut in_value = false;

    loop {
        match reader.read_event().map_err(|e| xml_error(part, e))? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"row" => {
                    row = BTreeMap::new();
                    next_column = 0;
                }
                b"c" => {
                    let column = attribute(&e, b"r", part)?
                        .and_then(|reference| column_index(&reference))
                        .unwrap_or(next_column);
                    let cell_type = CellType::from_attribute(attribute(&e, b"t", part)?.as_deref());
                    cell = Some((column, cell_type));
                    next_column = column + 1;
                    raw.clear();
                }
                b"v" | b"t" => in_value = true,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"row" => rows.push(BTreeMap::new()),
                b"c" => {
                    next_column = attribute(&e, b"r", part)?
                        .and_then(|reference| column_index(&reference))
                        .unwrap_or(next_column)
                        + 1;
                }
                _ => {}
            },
            Event::Text(text) if in_value => {
                let text = text.unescape().map_err(|e| xml_error(part, e))?;
                raw.push_str(&text);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"v" | b"t" => in_value = false,
                b"c" => {
                    if let Some((column, cell_type)) = cell.take() {
                        let value = display_value(cell_type, &raw, shared_strings);
                        row.insert(column, value);
                    }
                }
                b"row" => rows.push(std::mem::take(&mut row)),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(rows)
}

fn display_value(cell_type: CellType, raw: &str, shared_strings: &[String]) -> String {
    match cell_type {
        CellType::SharedString => raw
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|index| shared_strings.get(index))
            .cloned()
            .unwrap_or_default(),
        CellType::Boolean => match raw.trim() {
            "1" => "True".to_string(),
            "0" => "False".to_string(),
            other => other.to_string(),
        },
        CellType::Number | CellType::InlineString | CellType::FormulaString | CellType::Error => {
            raw.to_string()
        }
    }
}

/// Zero-based column index of an A1-style reference ("C7" -> 2)
fn column_index(reference: &str) -> Option<u32> {
    let letters: Vec<u8> = reference
        .bytes()
        .take_while(|b| b.is_ascii_alphabetic())
        .collect();
    if letters.is_empty() {
        return None;
    }

    letters
        .iter()
        .try_fold(0u32, |acc, letter| {
            acc.checked_mul(26)?
                .checked_add(u32::from(letter.to_ascii_uppercase() - b'A') + 1)
        })
        .map(|one_based| one_based - 1)
}
