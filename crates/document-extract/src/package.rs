//! Read access to the parts of an OOXML (zip) package

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{ExtractError, ExtractResult};

/// Uncompressed size cap for a single package part
const MAX_PART_BYTES: u64 = 64 * 1024 * 1024;

pub(crate) struct Package {
    archive: ZipArchive<File>,
}

impl Package {
    pub fn open(path: &Path) -> ExtractResult<Self> {
        let file = File::open(path)?;
        Ok(Self {
            archive: ZipArchive::new(file)?,
        })
    }

    /// Read a part as UTF-8 text; a missing part is an error
    pub fn read_part(&mut self, name: &str) -> ExtractResult<String> {
        self.read_optional_part(name)?
            .ok_or_else(|| ExtractError::MissingPart(name.to_string()))
    }

    pub fn read_optional_part(&mut self, name: &str) -> ExtractResult<Option<String>> {
        self.read_optional_part_limited(name, MAX_PART_BYTES)
    }

    /// Read at most `limit` uncompressed bytes of a part
    fn read_optional_part_limited(
        &mut self,
        name: &str,
        limit: u64,
    ) -> ExtractResult<Option<String>> {
        let entry = match self.archive.by_name(name) {
            Ok(entry) => entry,
            Err(ZipError::FileNotFound) => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let mut bytes = Vec::new();
        entry.take(limit + 1).read_to_end(&mut bytes)?;
        if bytes.len() as u64 > limit {
            return Err(ExtractError::PartTooLarge {
                part: name.to_string(),
                limit,
            });
        }

        let content =
            String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Some(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::write_package;

    #[test]
    fn test_missing_optional_part_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.zip");
        write_package(&path, &[("a.xml", "<a/>")]);

        let mut package = Package::open(&path).unwrap();
        assert_eq!(package.read_optional_part("b.xml").unwrap(), None);
        assert_eq!(package.read_part("a.xml").unwrap(), "<a/>");
    }

    #[test]
    fn test_part_over_limit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bomb.zip");
        let body = "x".repeat(4096);
        write_package(&path, &[("word/document.xml", body.as_str())]);

        let mut package = Package::open(&path).unwrap();
        let err = package
            .read_optional_part_limited("word/document.xml", 1024)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Package part word/document.xml exceeds 1024 bytes uncompressed"
        );

        let exact = package
            .read_optional_part_limited("word/document.xml", 4096)
            .unwrap();
        assert_eq!(exact.map(|content| content.len()), Some(4096));
    }
}
