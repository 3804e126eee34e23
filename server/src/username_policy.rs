use std::collections::HashSet;

use crate::server_config::UsernamePolicyConfig;

/// Decides whether a requested username may be registered.
#[derive(Debug, Clone)]
pub struct UsernamePolicy {
    min_length: usize,
    max_length: usize,
    blocked_terms: Vec<String>,
    reserved_names: HashSet<String>,
}

impl UsernamePolicy {
    pub fn new(config: &UsernamePolicyConfig) -> Self {
        let clean = |s: &String| {
            let v = s.trim().to_lowercase();
            (!v.is_empty()).then_some(v)
        };
        Self {
            min_length: config.min_length,
            max_length: config.max_length,
            blocked_terms: config.blocked_terms.iter().filter_map(clean).map(|t| normalize(&t)).collect(),
            reserved_names: config.reserved_names.iter().filter_map(clean).map(|n| normalize(&n)).collect(),
        }
    }

    /// `None` when acceptable, otherwise the reason shown to the user.
    pub fn validate(&self, username: &str) -> Option<String> {
        if username.is_empty() {
            return Some("Username is required".to_string());
        }

        let length = username.chars().count();
        if length < self.min_length {
            return Some("Username too short".to_string());
        }
        if length > self.max_length {
            return Some("Username too long".to_string());
        }

        if !username.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
            return Some("Only letters, digits, '_' and '-' allowed".to_string());
        }

        let normalized = normalize(&username.to_lowercase());

        if self.reserved_names.contains(&normalized) {
            return Some("Reserved name not allowed".to_string());
        }

        if self.blocked_terms.iter().any(|term| normalized.contains(term.as_str())) {
            return Some("Username contains prohibited term".to_string());
        }

        None
    }
}

impl Default for UsernamePolicy {
    fn default() -> Self {
        Self::new(&UsernamePolicyConfig::default())
    }
}

// Folds common leetspeak and drops separators so obfuscated terms still match.
fn normalize(s: &str) -> String {
    s.chars()
        .filter_map(|c| match c {
            '4' | '@' => Some('a'),
            '1' | '!' => Some('i'),
            '0' => Some('o'),
            '3' => Some('e'),
            '5' | '$' => Some('s'),
            '7' => Some('t'),
            '.' | '_' | '-' | ' ' => None,
            other => Some(other),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy() -> UsernamePolicy {
        UsernamePolicy::new(&UsernamePolicyConfig {
            min_length: 3,
            max_length: 12,
            blocked_terms: vec!["cheat".to_string()],
            reserved_names: vec!["Admin".to_string()],
        })
    }

    #[test]
    fn test_accepts_plain_names() {
        assert_eq!(policy().validate("alice"), None);
        assert_eq!(policy().validate("bob_42"), None);
        assert_eq!(policy().validate("x-y-z"), None);
    }

    #[test]
    fn test_length_limits() {
        assert_eq!(policy().validate(""), Some("Username is required".to_string()));
        assert_eq!(policy().validate("ab"), Some("Username too short".to_string()));
        assert_eq!(policy().validate("abcdefghijklm"), Some("Username too long".to_string()));
    }

    #[test]
    fn test_charset() {
        assert_eq!(
            policy().validate("al ice"),
            Some("Only letters, digits, '_' and '-' allowed".to_string())
        );
        assert!(policy().validate("ålice").is_some());
    }

    #[test]
    fn test_reserved_names_after_normalization() {
        assert_eq!(policy().validate("ADMIN"), Some("Reserved name not allowed".to_string()));
        assert_eq!(policy().validate("4dm1n"), Some("Reserved name not allowed".to_string()));
        assert_eq!(policy().validate("ad_min"), Some("Reserved name not allowed".to_string()));
    }

    #[test]
    fn test_blocked_terms_as_substrings() {
        let reason = Some("Username contains prohibited term".to_string());
        assert_eq!(policy().validate("bigcheater"), reason);
        assert_eq!(policy().validate("ch3-at"), reason);
    }
}
