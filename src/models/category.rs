use diesel::prelude::*;

/// Category row as stored in `categories`.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(primary_key(category_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Category {
    pub category_id: i64,
    pub category_name: String,
    pub category_note: Option<String>,
}

/// Column values written on insert and on full update.
///
/// `treat_none_as_null` makes an update overwrite every column, so a missing
/// note clears the stored one.
#[derive(Debug, Insertable, AsChangeset, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::categories)]
#[diesel(treat_none_as_null = true)]
pub struct NewCategory {
    pub category_name: String,
    pub category_note: Option<String>,
}
