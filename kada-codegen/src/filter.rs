//! Table name filters applied before any per-table work

use std::collections::HashSet;

/// Decides whether a table takes part in a generation run
pub trait TableNameFilter: Send + Sync {
    fn accept(&self, table_name: &str) -> bool;
}

impl<F> TableNameFilter for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn accept(&self, table_name: &str) -> bool {
        self(table_name)
    }
}

/// Include/exclude lists of table names.
///
/// Both lists are comma-separated. `*` (or an empty include list) accepts
/// every table; an entry ending in `*` matches by prefix, so `log_*`
/// covers `log_2023` and `log_2024`. Exclusion wins over inclusion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatternFilter {
    include_all: bool,
    include: Patterns,
    exclude: Patterns,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Patterns {
    exact: HashSet<String>,
    prefixes: Vec<String>,
}

impl Patterns {
    fn parse(list: &str) -> Self {
        let mut patterns = Patterns::default();
        for entry in list.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match entry.strip_suffix('*') {
                Some(prefix) => patterns.prefixes.push(prefix.to_string()),
                None => {
                    patterns.exact.insert(entry.to_string());
                }
            }
        }
        patterns
    }

    fn matches(&self, name: &str) -> bool {
        self.exact.contains(name) || self.prefixes.iter().any(|p| name.starts_with(p.as_str()))
    }
}

impl PatternFilter {
    pub fn new(include: &str, exclude: &str) -> Self {
        let include = include.trim();
        Self {
            include_all: include == "*" || include.is_empty(),
            include: Patterns::parse(include),
            exclude: Patterns::parse(exclude),
        }
    }

    /// Accept every table
    pub fn all() -> Self {
        Self::new("*", "")
    }
}

impl TableNameFilter for PatternFilter {
    fn accept(&self, table_name: &str) -> bool {
        let included = self.include_all || self.include.matches(table_name);
        included && !self.exclude.matches(table_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_all() {
        let filter = PatternFilter::all();
        assert!(filter.accept("users"));
        assert!(filter.accept("audit_log"));

        let filter = PatternFilter::new("", "");
        assert!(filter.accept("users"));
    }

    #[test]
    fn test_include_list() {
        let filter = PatternFilter::new("users, orders", "");
        assert!(filter.accept("users"));
        assert!(filter.accept("orders"));
        assert!(!filter.accept("audit_log"));
    }

    #[test]
    fn test_exclude_wins() {
        let filter = PatternFilter::new("*", "audit_log");
        assert!(filter.accept("users"));
        assert!(!filter.accept("audit_log"));

        let filter = PatternFilter::new("users,audit_log", "audit_log");
        assert!(!filter.accept("audit_log"));
    }

    #[test]
    fn test_prefix_patterns() {
        let filter = PatternFilter::new("t_*", "t_tmp*");
        assert!(filter.accept("t_user"));
        assert!(!filter.accept("t_tmp_import"));
        assert!(!filter.accept("users"));
    }

    #[test]
    fn test_closure_filter() {
        let filter = |name: &str| name != "audit_log";
        assert!(filter.accept("users"));
        assert!(!TableNameFilter::accept(&filter, "audit_log"));
    }
}
