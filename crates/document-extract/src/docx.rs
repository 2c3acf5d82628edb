//! Word-processor (`.docx`) extraction
//!
//! Paragraph text comes from `word/document.xml`, one output line per
//! `w:p`. Title and author come from the package's core properties.

use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;
use shared_types::{Document, DocumentKind, Extractor};
use tracing::debug;

use crate::error::{xml_error, ExtractResult};
use crate::package::Package;

const DOCUMENT_PART: &str = "word/document.xml";
const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

pub struct DocxExtractor;

impl DocxExtractor {
    pub fn read(&self, path: &Path) -> ExtractResult<Document> {
        let mut package = Package::open(path)?;

        let body = package.read_part(DOCUMENT_PART)?;
        let paragraphs = parse_paragraphs(&body)?;

        let properties = match package.read_optional_part(CORE_PROPERTIES_PART)? {
            Some(xml) => parse_core_properties(&xml)?,
            None => CoreProperties::default(),
        };

        debug!(
            "Extracted {} paragraphs from {}",
            paragraphs.len(),
            path.display()
        );

        let mut document = Document::new(DocumentKind::WordDocument, paragraphs.join("\n"));
        if let Some(title) = properties.title {
            document = document.with_title(title);
        }
        if let Some(author) = properties.creator {
            document = document.with_author(author);
        }
        Ok(document)
    }
}

impl Extractor for DocxExtractor {
    fn kind(&self) -> DocumentKind {
        DocumentKind::WordDocument
    }

    fn extract(&self, path: &Path) -> anyhow::Result<Document> {
        Ok(self.read(path)?)
    }
}

/// Text of every body paragraph in order
///
/// Text boxes (`w:txbxContent`) hold paragraphs of their own nested inside a
/// body paragraph; their subtrees are skipped so the enclosing paragraph
/// keeps its text.
fn parse_paragraphs(xml: &str) -> ExtractResult<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current = String::new();
    let mut in_text_run = false;
    let mut text_box_depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| xml_error(DOCUMENT_PART, e))?;

        if text_box_depth > 0 {
            match &event {
                Event::Start(e) if e.local_name().as_ref() == b"txbxContent" => {
                    text_box_depth += 1
                }
                Event::End(e) if e.local_name().as_ref() == b"txbxContent" => {
                    text_box_depth -= 1
                }
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(e) => match e.local_name().as_ref() {
                b"p" => current.clear(),
                b"t" => in_text_run = true,
                b"txbxContent" => text_box_depth = 1,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"p" => paragraphs.push(String::new()),
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                _ => {}
            },
            Event::Text(text) if in_text_run => {
                let text = text.unescape().map_err(|e| xml_error(DOCUMENT_PART, e))?;
                current.push_str(&text);
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"t" => in_text_run = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

#[derive(Debug, Default, PartialEq)]
struct CoreProperties {
    title: Option<String>,
    creator: Option<String>,
}

fn parse_core_properties(xml: &str) -> ExtractResult<CoreProperties> {
    let mut reader = Reader::from_str(xml);
    let mut properties = CoreProperties::default();
    let mut field: Option<Vec<u8>> = None;

    loop {
        match reader
            .read_event()
            .map_err(|e| xml_error(CORE_PROPERTIES_PART, e))?
        {
            Event::Start(e) => field = Some(e.local_name().as_ref().to_vec()),
            Event::End(_) => field = None,
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|e| xml_error(CORE_PROPERTIES_PART, e))?;
                match field.as_deref() {
                    Some(b"title") => properties.title = Some(value.into_owned()),
                    Some(b"creator") => properties.creator = Some(value.into_owned()),
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_package;
    use pretty_assertions::assert_eq;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Quality Manual</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Number: </w:t></w:r><w:r><w:t>ALS-ENG-001</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>A</w:t><w:tab/><w:t>B &amp; C</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

    const CORE: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/">
  <dc:title>Quality Manual</dc:title>
  <dc:creator>J. Smith</dc:creator>
  <cp:lastModifiedBy>Someone Else</cp:lastModifiedBy>
</cp:coreProperties>"#;

    #[test]
    fn test_paragraphs_joined_by_newline() {
        let paragraphs = parse_paragraphs(BODY).unwrap();
        assert_eq!(
            paragraphs,
            vec!["Quality Manual", "Number: ALS-ENG-001", "", "A\tB & C"]
        );
    }

    #[test]
    fn test_text_box_does_not_clobber_enclosing_paragraph() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:r><w:t>Page 1 of 10</w:t></w:r><w:r><w:pict><w:txbxContent><w:p><w:r><w:t>Box</w:t></w:r></w:p></w:txbxContent></w:pict></w:r><w:r><w:t> end</w:t></w:r></w:p>
<w:p><w:r><w:t>ALS-ENG-001</w:t></w:r></w:p>
</w:body></w:document>"#;

        let paragraphs = parse_paragraphs(xml).unwrap();
        assert_eq!(paragraphs, vec!["Page 1 of 10 end", "ALS-ENG-001"]);
    }

    #[test]
    fn test_nested_text_boxes_are_skipped_whole() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>
<w:p><w:r><w:t>Outer</w:t></w:r><w:r><w:txbxContent><w:p><w:r><w:txbxContent><w:p><w:r><w:t>Deep</w:t></w:r></w:p></w:txbxContent></w:r></w:p><w:p><w:r><w:t>Shallow</w:t></w:r></w:p></w:txbxContent></w:r></w:p>
</w:body></w:document>"#;

        let paragraphs = parse_paragraphs(xml).unwrap();
        assert_eq!(paragraphs, vec!["Outer"]);
    }

    #[test]
    fn test_core_properties() {
        let properties = parse_core_properties(CORE).unwrap();
        assert_eq!(properties.title.as_deref(), Some("Quality Manual"));
        assert_eq!(properties.creator.as_deref(), Some("J. Smith"));
    }

    #[test]
    fn test_reads_package() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manual.docx");
        write_package(&path, &[(DOCUMENT_PART, BODY), (CORE_PROPERTIES_PART, CORE)]);

        let doc = DocxExtractor.read(&path).unwrap();
        assert_eq!(doc.kind, DocumentKind::WordDocument);
        assert_eq!(doc.title.as_deref(), Some("Quality Manual"));
        assert_eq!(doc.author.as_deref(), Some("J. Smith"));
        assert!(doc.text.contains("ALS-ENG-001"));
        assert_eq!(doc.page_count, None);
    }

    #[test]
    fn test_missing_core_properties_leave_metadata_absent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bare.docx");
        write_package(&path, &[(DOCUMENT_PART, BODY)]);

        let doc = DocxExtractor.read(&path).unwrap();
        assert_eq!(doc.title, None);
        assert_eq!(doc.author, None);
    }

    #[test]
    fn test_missing_body_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.docx");
        write_package(&path, &[(CORE_PROPERTIES_PART, CORE)]);

        let err = DocxExtractor.read(&path).unwrap_err();
        assert_eq!(err.to_string(), "Missing package part: word/document.xml");
    }

    #[test]
    fn test_non_zip_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plain.docx");
        std::fs::write(&path, "just text").unwrap();

        assert!(DocxExtractor.extract(&path).is_err());
    }
}
