use std::sync::OnceLock;

use regex::Regex;

/// Extracts structured information from PostgreSQL constraint violations.
///
/// Callers pass the primary message and the `DETAIL` line joined together,
/// since PostgreSQL reports the offending key only in the detail.
pub struct ConstraintParser;

/// Parsed foreign key violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForeignKeyViolation {
    /// Table owning the constraint
    pub table: String,
    /// Referencing column, e.g. `category_id`
    pub field: String,
    pub value: String,
    /// A delete was refused because rows still reference the key
    pub still_referenced: bool,
}

struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
}

impl RegexPatterns {
    fn new() -> Self {
        Self {
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").expect("key/value pattern"),
            column_name: Regex::new(r#"column "([^"]+)""#).expect("column pattern"),
            table_name: Regex::new(r#"(?:table|relation) "([^"]+)""#).expect("table pattern"),
        }
    }
}

static REGEX_PATTERNS: OnceLock<RegexPatterns> = OnceLock::new();

/// Suffixes PostgreSQL appends to generated constraint names
const CONSTRAINT_SUFFIXES: &[&str] = &["_fkey", "_pkey", "_key", "_check", "_idx"];

impl ConstraintParser {
    fn patterns() -> &'static RegexPatterns {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new)
    }

    /// Returns `(table, column, value)` for a unique violation.
    pub fn parse_unique_violation(
        text: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let key_value = Self::extract_key_value(text);

        if let Some((table, column)) = constraint_name.and_then(Self::parse_constraint_name) {
            let value = key_value
                .map(|(_, value)| value)
                .unwrap_or_else(|| "duplicate_value".to_string());
            return Some((table, column, value));
        }

        let (column, value) = key_value?;
        let table = Self::extract_table(text).unwrap_or_else(|| "resource".to_string());
        Some((table, column, value))
    }

    /// Returns `(table, column)` for a not-null violation.
    pub fn parse_not_null_violation(text: &str) -> Option<(String, String)> {
        let column = Self::extract_column(text)?;
        let table = Self::extract_table(text).unwrap_or_else(|| "resource".to_string());
        Some((table, column))
    }

    pub fn parse_foreign_key_violation(
        text: &str,
        constraint_name: Option<&str>,
    ) -> Option<ForeignKeyViolation> {
        let still_referenced = text.contains("still referenced");
        let key_value = Self::extract_key_value(text);

        let (table, field) = match constraint_name.and_then(Self::parse_constraint_name) {
            Some(parsed) => parsed,
            None => {
                let (column, _) = key_value.clone()?;
                (Self::extract_table(text)?, column)
            }
        };

        Some(ForeignKeyViolation {
            table,
            field,
            value: key_value
                .map(|(_, value)| value)
                .unwrap_or_else(|| "invalid_reference".to_string()),
            still_referenced,
        })
    }

    /// Returns `(table, column)` for a check violation.
    pub fn parse_check_violation(
        text: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        constraint_name
            .and_then(Self::parse_constraint_name)
            .or_else(|| {
                let column = Self::extract_column(text)?;
                let table = Self::extract_table(text).unwrap_or_else(|| "resource".to_string());
                Some((table, column))
            })
    }

    /// Splits a generated constraint name into `(table, column)`.
    ///
    /// - `users_email_key` -> `("users", "email")`
    /// - `products_category_id_fkey` -> `("products", "category_id")`
    /// - `products_price_check` -> `("products", "price")`
    ///
    /// Table names are assumed to contain no underscore.
    pub fn parse_constraint_name(constraint_name: &str) -> Option<(String, String)> {
        let stem = CONSTRAINT_SUFFIXES
            .iter()
            .find_map(|suffix| constraint_name.strip_suffix(suffix))?;
        let (table, column) = stem.split_once('_')?;
        if table.is_empty() || column.is_empty() {
            return None;
        }
        Some((table.to_string(), column.to_string()))
    }

    /// `Key (email)=(a@b.c)` -> `("email", "a@b.c")`
    pub fn extract_key_value(text: &str) -> Option<(String, String)> {
        Self::patterns()
            .key_value
            .captures(text)
            .map(|caps| (caps[1].to_string(), caps[2].to_string()))
    }

    pub fn extract_column(text: &str) -> Option<String> {
        Self::patterns()
            .column_name
            .captures(text)
            .map(|caps| caps[1].to_string())
    }

    pub fn extract_table(text: &str) -> Option<String> {
        Self::patterns()
            .table_name
            .captures(text)
            .map(|caps| caps[1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_constraint_name() {
        assert_eq!(
            ConstraintParser::parse_constraint_name("users_email_key"),
            Some(("users".to_string(), "email".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("products_category_id_fkey"),
            Some(("products".to_string(), "category_id".to_string()))
        );
        assert_eq!(
            ConstraintParser::parse_constraint_name("products_price_check"),
            Some(("products".to_string(), "price".to_string()))
        );
        assert_eq!(ConstraintParser::parse_constraint_name("weird"), None);
        assert_eq!(ConstraintParser::parse_constraint_name("_key"), None);
    }

    #[test]
    fn test_unique_violation_reads_detail() {
        let text = "duplicate key value violates unique constraint \"categories_slug_key\"\n\
                    Key (slug)=(fresh-fruits) already exists.";
        assert_eq!(
            ConstraintParser::parse_unique_violation(text, Some("categories_slug_key")),
            Some((
                "categories".to_string(),
                "slug".to_string(),
                "fresh-fruits".to_string()
            ))
        );
    }

    #[test]
    fn test_unique_violation_without_constraint_name() {
        let text = "duplicate key value violates unique constraint on table \"users\"\n\
                    Key (nickname)=(johnny) already exists.";
        assert_eq!(
            ConstraintParser::parse_unique_violation(text, None),
            Some(("users".to_string(), "nickname".to_string(), "johnny".to_string()))
        );
    }

    #[test]
    fn test_foreign_key_violation_on_insert() {
        let text = "insert or update on table \"products\" violates foreign key constraint \"products_category_id_fkey\"\n\
                    Key (category_id)=(8f0c) is not present in table \"categories\".";
        let parsed =
            ConstraintParser::parse_foreign_key_violation(text, Some("products_category_id_fkey"))
                .unwrap();
        assert_eq!(parsed.table, "products");
        assert_eq!(parsed.field, "category_id");
        assert_eq!(parsed.value, "8f0c");
        assert!(!parsed.still_referenced);
    }

    #[test]
    fn test_foreign_key_violation_on_delete() {
        let text = "update or delete on table \"categories\" violates foreign key constraint \"products_category_id_fkey\" on table \"products\"\n\
                    Key (id)=(8f0c) is still referenced from table \"products\".";
        let parsed =
            ConstraintParser::parse_foreign_key_violation(text, Some("products_category_id_fkey"))
                .unwrap();
        assert!(parsed.still_referenced);
        assert_eq!(parsed.table, "products");
    }

    #[test]
    fn test_not_null_violation() {
        let text = "null value in column \"description\" of relation \"products\" violates not-null constraint";
        assert_eq!(
            ConstraintParser::parse_not_null_violation(text),
            Some(("products".to_string(), "description".to_string()))
        );
    }
}
