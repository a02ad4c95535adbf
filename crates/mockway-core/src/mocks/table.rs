//! Immutable, ordered table of mock rules.

use crate::types::method::HttpMethod;
use crate::types::rule::MockRule;
use std::collections::HashSet;

/// Ordered mock rules, fixed for the lifetime of the process.
///
/// Lookups scan in declaration order and the first enabled match wins, so two
/// enabled rules sharing a `(path, method)` pair resolve deterministically to
/// the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MockTable {
    rules: Vec<MockRule>,
}

impl MockTable {
    pub fn new(rules: Vec<MockRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[MockRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Number of rules that can currently fire.
    pub fn enabled_count(&self) -> usize {
        self.rules.iter().filter(|rule| rule.enabled).count()
    }

    /// First enabled rule for `method path`.
    pub fn find(&self, method: HttpMethod, path: &str) -> Option<&MockRule> {
        self.rules.iter().find(|rule| rule.matches(method, path))
    }

    /// Whether any enabled rule, of any method, is declared for `path`.
    pub fn has_path(&self, path: &str) -> bool {
        self.rules.iter().any(|rule| rule.covers_path(path))
    }

    /// Enabled rules hidden behind an earlier enabled rule with the same
    /// `(path, method)`. These never fire.
    pub fn shadowed(&self) -> Vec<&MockRule> {
        let mut seen = HashSet::new();
        self.rules
            .iter()
            .filter(|rule| rule.enabled)
            .filter(|rule| !seen.insert((rule.method, rule.path.as_str())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rule(method: HttpMethod, path: &str, fixture: &str, enabled: bool) -> MockRule {
        MockRule {
            path: path.to_string(),
            method,
            enabled,
            fixture: fixture.to_string(),
            status: 200,
        }
    }

    #[rstest]
    fn test_find_first_match_wins() {
        let table = MockTable::new(vec![
            rule(HttpMethod::Get, "/api/v1/user", "first.json", true),
            rule(HttpMethod::Get, "/api/v1/user", "second.json", true),
        ]);

        let found = table.find(HttpMethod::Get, "/api/v1/user").expect("Should match");
        assert_eq!(found.fixture, "first.json");
    }

    #[rstest]
    fn test_find_skips_disabled_rule() {
        let table = MockTable::new(vec![
            rule(HttpMethod::Get, "/api/v1/user", "disabled.json", false),
            rule(HttpMethod::Get, "/api/v1/user", "enabled.json", true),
        ]);

        let found = table.find(HttpMethod::Get, "/api/v1/user").expect("Should match");
        assert_eq!(found.fixture, "enabled.json");
    }

    #[rstest]
    #[case(HttpMethod::Get, "/api/v1/user", Some("get.json"))]
    #[case(HttpMethod::Post, "/api/v1/user", Some("post.json"))]
    #[case(HttpMethod::Put, "/api/v1/user", None)]
    #[case(HttpMethod::Get, "/api/v1/config", None)]
    fn test_find_by_method(
        #[case] method: HttpMethod,
        #[case] path: &str,
        #[case] expected: Option<&str>,
    ) {
        let table = MockTable::new(vec![
            rule(HttpMethod::Get, "/api/v1/user", "get.json", true),
            rule(HttpMethod::Post, "/api/v1/user", "post.json", true),
            rule(HttpMethod::Get, "/api/v1/config", "config.json", false),
        ]);

        let found = table.find(method, path).map(|r| r.fixture.as_str());
        assert_eq!(found, expected);
    }

    #[rstest]
    fn test_has_path_ignores_disabled_rules() {
        let table = MockTable::new(vec![
            rule(HttpMethod::Post, "/api/v1/user", "post.json", true),
            rule(HttpMethod::Get, "/api/v1/config", "config.json", false),
        ]);

        assert!(table.has_path("/api/v1/user"));
        assert!(!table.has_path("/api/v1/config"));
        assert!(!table.has_path("/api/v1/other"));
    }

    #[rstest]
    fn test_shadowed_reports_unreachable_duplicates() {
        let table = MockTable::new(vec![
            rule(HttpMethod::Get, "/a", "a1.json", true),
            rule(HttpMethod::Post, "/a", "a-post.json", true),
            rule(HttpMethod::Get, "/a", "a2.json", true),
            rule(HttpMethod::Get, "/a", "a3.json", false),
            rule(HttpMethod::Get, "/b", "b.json", true),
        ]);

        let shadowed: Vec<&str> = table.shadowed().iter().map(|r| r.fixture.as_str()).collect();
        assert_eq!(shadowed, vec!["a2.json"]);
        assert_eq!(table.enabled_count(), 4);
        assert_eq!(table.len(), 5);
    }

    #[rstest]
    fn test_empty_table_matches_nothing() {
        let table = MockTable::default();
        assert!(table.is_empty());
        assert!(table.find(HttpMethod::Get, "/").is_none());
        assert!(!table.has_path("/"));
    }
}
