pub mod extract;
pub mod types;

pub use extract::Extractor;
pub use types::{
    Document, DocumentKind, Evidence, Locale, RuleResult, VerificationReport,
};
