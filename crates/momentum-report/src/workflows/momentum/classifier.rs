use super::domain::StatusBucket;

/// Keyword table driving status classification. Every keyword is lower-case
/// and matched as a substring of the lower-cased, trimmed status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusRules {
    pub active: &'static [&'static str],
    /// Any of these disqualifies an otherwise active-looking status.
    pub active_exclusions: &'static [&'static str],
    pub pending: &'static [&'static str],
    pub sold: &'static [&'static str],
    /// Whole-value match checked after every substring rule.
    pub exact_active: &'static str,
}

impl StatusRules {
    pub const fn standard() -> Self {
        Self {
            active: &["active", "coming soon", "back on market", "a/"],
            active_exclusions: &["under contract", "pending"],
            pending: &["pending", "under contract", "a/i", "accepting backup"],
            sold: &["closed", "sold"],
            exact_active: "active",
        }
    }
}

impl Default for StatusRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Maps free-text MLS statuses onto [`StatusBucket`]s. First matching rule wins.
#[derive(Debug, Clone, Default)]
pub struct StatusClassifier {
    rules: StatusRules,
}

impl StatusClassifier {
    pub fn new(rules: StatusRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &StatusRules {
        &self.rules
    }

    pub fn classify(&self, raw_status: Option<&str>) -> StatusBucket {
        let status = match raw_status.map(str::trim) {
            Some(status) if !status.is_empty() => status.to_lowercase(),
            _ => return StatusBucket::Unknown,
        };

        let rules = &self.rules;
        if contains_any(&status, rules.active) && !contains_any(&status, rules.active_exclusions) {
            return StatusBucket::Active;
        }
        if contains_any(&status, rules.pending) {
            return StatusBucket::Pending;
        }
        if contains_any(&status, rules.sold) {
            return StatusBucket::Sold;
        }
        if status == rules.exact_active {
            return StatusBucket::Active;
        }

        StatusBucket::Other
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}
