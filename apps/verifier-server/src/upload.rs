//! Storage of uploaded files for the duration of one verification

use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Extension of an uploaded file name, without the dot
pub fn extension(file_name: &str) -> &str {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
}

/// Reduce a client-supplied file name to a safe single path component.
///
/// Keeps ASCII letters, digits, `.`, `_` and `-`; whitespace becomes `_`;
/// path separators split components; leading and trailing `.`/`_` are
/// stripped so the result can never be `..` or a hidden file.
pub fn sanitize_filename(file_name: &str) -> String {
    let joined = file_name
        .split(['/', '\\'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let cleaned: String = joined
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
        .collect();

    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Write an upload under `dir` with a unique name that keeps its extension
pub async fn store(dir: &Path, file_name: &str, data: &[u8]) -> std::io::Result<PathBuf> {
    let ext = extension(file_name);
    let mut name = format!("{}_{}", Uuid::new_v4().simple(), sanitize_filename(file_name));
    let suffix = format!(".{}", ext).to_ascii_lowercase();
    if !name.to_ascii_lowercase().ends_with(&suffix) {
        name.push('.');
        name.push_str(ext);
    }

    let path = dir.join(name);
    tokio::fs::write(&path, data).await?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filename() {
        assert_eq!(sanitize_filename("My cool report.pdf"), "My_cool_report.pdf");
        assert_eq!(sanitize_filename("../../etc/passwd"), "etc_passwd");
        assert_eq!(sanitize_filename("C:\\Users\\qm\\manual.docx"), "C_Users_qm_manual.docx");
        assert_eq!(sanitize_filename(".hidden.xlsx"), "hidden.xlsx");
        assert_eq!(sanitize_filename("Prüfbericht.pdf"), "Prfbericht.pdf");
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("manual.DOCX"), "DOCX");
        assert_eq!(extension("archive.tar.gz"), "gz");
        assert_eq!(extension("README"), "");
    }

    #[tokio::test]
    async fn test_store_keeps_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = store(dir.path(), "Отчет.PDF", b"%PDF").await.unwrap();

        let name = path.file_name().unwrap().to_str().unwrap().to_string();
        assert!(name.ends_with(".PDF"), "{}", name);
        assert_eq!(path.parent().unwrap(), dir.path());
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF");
    }
}
