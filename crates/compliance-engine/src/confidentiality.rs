//! Confidentiality classification detection

/// Closed set of classification levels, in scan order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfidentialityLevel {
    Public,
    Restricted,
    Confidential,
    Secret,
}

impl ConfidentialityLevel {
    pub const ALL: [ConfidentialityLevel; 4] = [
        ConfidentialityLevel::Public,
        ConfidentialityLevel::Restricted,
        ConfidentialityLevel::Confidential,
        ConfidentialityLevel::Secret,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ConfidentialityLevel::Public => "Public",
            ConfidentialityLevel::Restricted => "Restricted",
            ConfidentialityLevel::Confidential => "Confidential",
            ConfidentialityLevel::Secret => "Secret",
        }
    }

    /// Resolve the declared level of a text.
    ///
    /// Levels are tried in declaration order and the first one mentioned
    /// anywhere (case-insensitive) wins, regardless of where it appears.
    pub fn detect(text: &str) -> Option<Self> {
        let text_lower = text.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|level| text_lower.contains(&level.name().to_lowercase()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_single_level() {
        assert_eq!(
            ConfidentialityLevel::detect("Classification: CONFIDENTIAL"),
            Some(ConfidentialityLevel::Confidential)
        );
        assert_eq!(ConfidentialityLevel::detect("no marking here"), None);
    }

    #[test]
    fn test_declaration_order_wins_over_position() {
        let text = "Secret annex, otherwise public";
        assert_eq!(
            ConfidentialityLevel::detect(text),
            Some(ConfidentialityLevel::Public)
        );
    }
}
