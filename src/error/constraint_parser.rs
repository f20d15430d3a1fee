use regex::Regex;
use std::sync::OnceLock;

/// Utility for parsing PostgreSQL constraint violation messages.
///
/// PostgreSQL reports the offending key as `Key (column)=(value)` in the
/// message detail and names constraints `{table}_{column}_{suffix}`. Columns
/// may contain underscores themselves, so the table is recovered by stripping
/// the known `_{column}_{suffix}` tail rather than splitting on `_`.
pub struct ConstraintParser;

/// Compiled regex patterns for constraint parsing, cached for performance
struct RegexPatterns {
    key_value: Regex,
    column_name: Regex,
    table_name: Regex,
    relation_name: Regex,
}

impl RegexPatterns {
    fn new() -> Option<Self> {
        Some(Self {
            key_value: Regex::new(r"Key \(([^)]+)\)=\(([^)]*)\)").ok()?,
            column_name: Regex::new(r#"column "([^"]+)""#).ok()?,
            table_name: Regex::new(r#"table "([^"]+)""#).ok()?,
            relation_name: Regex::new(r#"relation "([^"]+)""#).ok()?,
        })
    }
}

static REGEX_PATTERNS: OnceLock<Option<RegexPatterns>> = OnceLock::new();

/// Suffixes PostgreSQL appends to generated constraint names.
const CONSTRAINT_SUFFIXES: &[&str] = &["_key", "_fkey", "_check", "_idx", "_pkey"];

impl ConstraintParser {
    fn patterns() -> Option<&'static RegexPatterns> {
        REGEX_PATTERNS.get_or_init(RegexPatterns::new).as_ref()
    }

    /// Parses a unique constraint violation into `(entity, field, value)`.
    ///
    /// ```
    /// use event_management::error::ConstraintParser;
    ///
    /// let message = "duplicate key value violates unique constraint \"categories_category_name_key\"\nDETAIL: Key (category_name)=(Music) already exists.";
    /// let parsed = ConstraintParser::parse_unique_violation(message, Some("categories_category_name_key"));
    /// assert_eq!(
    ///     parsed,
    ///     Some(("categories".to_string(), "category_name".to_string(), "Music".to_string()))
    /// );
    /// ```
    pub fn parse_unique_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let (field, value) = Self::extract_key_value_from_message(message)?;
        let entity = constraint_name
            .and_then(|c| Self::entity_from_constraint(c, &field))
            .or_else(|| Self::extract_table_from_message(message))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a foreign key violation into `(entity, field, referenced_value)`.
    pub fn parse_foreign_key_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String, String)> {
        let (field, value) = Self::extract_key_value_from_message(message)?;
        let entity = constraint_name
            .and_then(|c| Self::entity_from_constraint(c, &field))
            .or_else(|| Self::extract_table_from_message(message))
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field, value))
    }

    /// Parses a not-null violation into `(entity, field)`.
    pub fn parse_not_null_violation(message: &str) -> Option<(String, String)> {
        let field = Self::extract_column_from_message(message)?;
        let entity = Self::extract_relation_from_message(message)
            .unwrap_or_else(|| "resource".to_string());
        Some((entity, field))
    }

    /// Parses a check violation into `(entity, field)` using the constraint name.
    ///
    /// Check constraints carry no column in the message, so the field is the
    /// part of the constraint name between the relation and `_check`.
    pub fn parse_check_violation(
        message: &str,
        constraint_name: Option<&str>,
    ) -> Option<(String, String)> {
        let entity = Self::extract_relation_from_message(message)?;
        let field = constraint_name
            .and_then(|c| c.strip_prefix(&format!("{}_", entity)))
            .and_then(|rest| rest.strip_suffix("_check"))
            .unwrap_or("value")
            .to_string();
        Some((entity, field))
    }

    /// Recovers the table name from `{table}_{field}_{suffix}`.
    pub fn entity_from_constraint(constraint_name: &str, field: &str) -> Option<String> {
        CONSTRAINT_SUFFIXES.iter().find_map(|suffix| {
            constraint_name
                .strip_suffix(suffix)
                .and_then(|rest| rest.strip_suffix(field))
                .and_then(|rest| rest.strip_suffix('_'))
                .filter(|table| !table.is_empty())
                .map(str::to_string)
        })
    }

    pub fn extract_column_from_message(message: &str) -> Option<String> {
        Self::patterns()?
            .column_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_table_from_message(message: &str) -> Option<String> {
        Self::patterns()?
            .table_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn extract_relation_from_message(message: &str) -> Option<String> {
        Self::patterns()?
            .relation_name
            .captures(message)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    /// Extracts `(field, value)` from `Key (field)=(value)`.
    pub fn extract_key_value_from_message(message: &str) -> Option<(String, String)> {
        Self::patterns()?.key_value.captures(message).and_then(|caps| {
            let field = caps.get(1)?.as_str().to_string();
            let value = caps.get(2)?.as_str().to_string();
            Some((field, value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNIQUE_MESSAGE: &str = "duplicate key value violates unique constraint \"categories_category_name_key\"\nDETAIL: Key (category_name)=(Concert) already exists.";

    const FK_MESSAGE: &str = "insert or update on table \"event_details\" violates foreign key constraint \"event_details_venue_id_fkey\"\nDETAIL: Key (venue_id)=(999) is not present in table \"venues\".";

    #[test]
    fn test_parse_unique_violation_with_multi_part_column() {
        let result =
            ConstraintParser::parse_unique_violation(UNIQUE_MESSAGE, Some("categories_category_name_key"));
        assert_eq!(
            result,
            Some((
                "categories".to_string(),
                "category_name".to_string(),
                "Concert".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_unique_violation_without_constraint_name() {
        let message = "duplicate key value violates unique constraint\nDETAIL: Key (category_name)=(Jazz) already exists.";
        let result = ConstraintParser::parse_unique_violation(message, None);
        assert_eq!(
            result,
            Some((
                "resource".to_string(),
                "category_name".to_string(),
                "Jazz".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_foreign_key_violation() {
        let result =
            ConstraintParser::parse_foreign_key_violation(FK_MESSAGE, Some("event_details_venue_id_fkey"));
        assert_eq!(
            result,
            Some((
                "event_details".to_string(),
                "venue_id".to_string(),
                "999".to_string()
            ))
        );
    }

    #[test]
    fn test_parse_not_null_violation() {
        let message =
            "null value in column \"venue_name\" of relation \"venues\" violates not-null constraint";
        let result = ConstraintParser::parse_not_null_violation(message);
        assert_eq!(result, Some(("venues".to_string(), "venue_name".to_string())));
    }

    #[test]
    fn test_parse_check_violation() {
        let message = "new row for relation \"venues\" violates check constraint \"venues_capacity_check\"";
        let result = ConstraintParser::parse_check_violation(message, Some("venues_capacity_check"));
        assert_eq!(result, Some(("venues".to_string(), "capacity".to_string())));
    }

    #[test]
    fn test_entity_from_constraint() {
        assert_eq!(
            ConstraintParser::entity_from_constraint("event_category_category_id_fkey", "category_id"),
            Some("event_category".to_string())
        );
        assert_eq!(
            ConstraintParser::entity_from_constraint("categories_category_name_key", "category_name"),
            Some("categories".to_string())
        );
        assert_eq!(ConstraintParser::entity_from_constraint("category_name_key", "category_name"), None);
        assert_eq!(ConstraintParser::entity_from_constraint("whatever", "category_name"), None);
    }

    #[test]
    fn test_graceful_parsing_failures() {
        let message = "completely unrelated error message";
        assert_eq!(ConstraintParser::parse_unique_violation(message, None), None);
        assert_eq!(ConstraintParser::parse_foreign_key_violation(message, None), None);
        assert_eq!(ConstraintParser::parse_not_null_violation(message), None);
        assert_eq!(ConstraintParser::parse_check_violation(message, None), None);
    }
}
