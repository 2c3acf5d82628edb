//! Applies a rule set to a document

use shared_types::{Document, Locale, RuleResult, VerificationReport};
use tracing::debug;

use crate::locale::Localizer;
use crate::rules::RuleSet;

pub struct RuleEngine;

impl RuleEngine {
    /// Evaluate every rule of `rule_set` against `document`, in order.
    ///
    /// Total: each rule yields exactly one result and no rule can stop the
    /// ones after it. Predicates are expected never to panic; if one does,
    /// the panic is not caught here.
    pub fn evaluate(document: &Document, rule_set: &RuleSet, locale: Locale) -> VerificationReport {
        let results = rule_set
            .rules()
            .iter()
            .map(|rule| {
                let passed = (rule.predicate)(document);
                let evidence = (rule.evidence)(document);
                debug!("Rule {}: passed={}", rule.id, passed);

                RuleResult {
                    rule_id: rule.id.to_string(),
                    passed,
                    message: Localizer::resolve(&rule.messages, locale).to_string(),
                    evidence,
                }
            })
            .collect();

        VerificationReport {
            kind: document.kind,
            locale,
            results,
        }
    }
}
