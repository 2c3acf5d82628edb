//! Message localization

use shared_types::Locale;

use crate::rules::Messages;

pub struct Localizer;

impl Localizer {
    /// Pick the message variant for `locale`
    pub fn resolve(messages: &Messages, locale: Locale) -> &'static str {
        match locale {
            Locale::En => messages.en,
            Locale::De => messages.de,
        }
    }

    /// Resolve from a raw language code; unknown codes get German
    pub fn resolve_code(messages: &Messages, code: &str) -> &'static str {
        Self::resolve(messages, Locale::from_code(code))
    }
}
