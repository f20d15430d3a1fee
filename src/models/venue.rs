use diesel::prelude::*;

/// Venue row as stored in `venues`.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::venues)]
#[diesel(primary_key(venue_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Venue {
    pub venue_id: i64,
    pub venue_name: String,
    pub capacity: Option<i32>,
    pub venue_address: Option<String>,
    pub venue_city: Option<String>,
    pub venue_zip: Option<String>,
    pub venue_note: Option<String>,
}

/// Column values written on insert and on full update.
#[derive(Debug, Insertable, AsChangeset, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::venues)]
#[diesel(treat_none_as_null = true)]
pub struct NewVenue {
    pub venue_name: String,
    pub capacity: Option<i32>,
    pub venue_address: Option<String>,
    pub venue_city: Option<String>,
    pub venue_zip: Option<String>,
    pub venue_note: Option<String>,
}
