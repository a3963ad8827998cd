//! Row entity-identifier resolution
//!
//! Sheets that carry a canonical entity id column (the inventory "VM ID")
//! hand that value to the strategies as row context.

use crate::domain::Row;

/// Locates the column holding each row's canonical entity identifier
pub trait RowIdentifierResolver {
    /// Index of the identifier column in `headers`, if the sheet has one
    fn identifier_column(&self, sheet: &str, headers: &[String]) -> Option<usize>;

    /// The row's identifier value, trimmed; blank cells resolve to `None`
    fn resolve<'r>(&self, row: &'r Row, column: Option<usize>) -> Option<&'r str> {
        column
            .and_then(|idx| row.get(idx))
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Resolves the identifier column by header name on every sheet
#[derive(Debug, Clone)]
pub struct HeaderIdentifierResolver {
    header: String,
}

impl HeaderIdentifierResolver {
    /// Resolver for the given header (e.g. `VM ID`)
    pub fn new(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
        }
    }

    /// Header this resolver looks for
    pub fn header(&self) -> &str {
        &self.header
    }
}

impl RowIdentifierResolver for HeaderIdentifierResolver {
    fn identifier_column(&self, _sheet: &str, headers: &[String]) -> Option<usize> {
        let wanted = self.header.trim();
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(wanted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_identifier_column_by_header() {
        let resolver = HeaderIdentifierResolver::new("VM ID");
        assert_eq!(
            resolver.identifier_column("vInfo", &headers(&["VM", " vm id ", "Host"])),
            Some(1)
        );
        assert_eq!(resolver.identifier_column("vHost", &headers(&["Host"])), None);
    }

    #[test]
    fn test_resolve_value() {
        let resolver = HeaderIdentifierResolver::new("VM ID");
        let row = Row::from_values(vec!["web01".to_string(), " vm-1042 ".to_string()]);
        let blank = Row::from_values(vec!["web02".to_string(), "   ".to_string()]);

        assert_eq!(resolver.resolve(&row, Some(1)), Some("vm-1042"));
        assert_eq!(resolver.resolve(&blank, Some(1)), None);
        assert_eq!(resolver.resolve(&row, Some(9)), None);
        assert_eq!(resolver.resolve(&row, None), None);
    }
}
