pub mod confidentiality;
pub mod engine;
pub mod error;
pub mod locale;
pub mod patterns;
pub mod rules;

use std::path::Path;

use shared_types::{Document, DocumentKind, Extractor, Locale, VerificationReport};
use tracing::{info, warn};

pub use confidentiality::ConfidentialityLevel;
pub use engine::RuleEngine;
pub use error::{VerificationError, VerificationErrorKind};
pub use locale::Localizer;
pub use rules::{Messages, Rule, RuleSet};

/// ComplianceEngine entry point
///
/// Holds one immutable [`RuleSet`] per document kind; safe to share between
/// threads and reuse for any number of verifications.
pub struct ComplianceEngine {
    word_document: RuleSet,
    pdf: RuleSet,
    spreadsheet: RuleSet,
}

impl ComplianceEngine {
    pub fn new() -> Self {
        Self {
            word_document: RuleSet::for_kind(DocumentKind::WordDocument),
            pdf: RuleSet::for_kind(DocumentKind::Pdf),
            spreadsheet: RuleSet::for_kind(DocumentKind::Spreadsheet),
        }
    }

    pub fn rule_set(&self, kind: DocumentKind) -> &RuleSet {
        match kind {
            DocumentKind::WordDocument => &self.word_document,
            DocumentKind::Pdf => &self.pdf,
            DocumentKind::Spreadsheet => &self.spreadsheet,
        }
    }

    /// Check an already-extracted document against its kind's rule set
    pub fn verify(&self, document: &Document, locale: Locale) -> VerificationReport {
        let report = RuleEngine::evaluate(document, self.rule_set(document.kind), locale);
        info!(
            "Verified {}: {}/{} rules passed",
            document.kind.label(),
            report.passed_count(),
            report.len()
        );
        report
    }

    /// Extract the file at `path` with the matching extractor and verify it
    ///
    /// The extension is checked before the filesystem is touched; any error
    /// raised by the extractor becomes [`VerificationError::ExtractionFailure`].
    pub fn verify_path(
        &self,
        path: &Path,
        locale: Locale,
        extractors: &[Box<dyn Extractor>],
    ) -> Result<VerificationReport, VerificationError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();

        let kind = DocumentKind::from_extension(extension).ok_or_else(|| {
            VerificationError::UnsupportedFormat {
                extension: extension.to_string(),
            }
        })?;

        if !path.exists() {
            return Err(VerificationError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let extraction_failure = |cause: String| {
            warn!("Extraction of {} failed: {}", path.display(), cause);
            VerificationError::ExtractionFailure {
                format_label: kind.label(),
                cause,
            }
        };

        let extractor = extractors
            .iter()
            .find(|extractor| extractor.kind() == kind)
            .ok_or_else(|| extraction_failure("no extractor registered".to_string()))?;

        let document = extractor
            .extract(path)
            .map_err(|err| extraction_failure(format!("{:#}", err)))?;

        Ok(self.verify(&document, locale))
    }
}

impl Default for ComplianceEngine {
    fn default() -> Self {
        Self::new()
    }
}
