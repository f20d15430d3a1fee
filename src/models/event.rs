use diesel::prelude::*;

/// Event row as stored in `events`.
#[derive(Debug, Queryable, Selectable, Identifiable, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::events)]
#[diesel(primary_key(event_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Event {
    pub event_id: i64,
    pub event_name: String,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub event_note: Option<String>,
}

/// Column values written on insert and on full update.
#[derive(Debug, Insertable, AsChangeset, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::events)]
#[diesel(treat_none_as_null = true)]
pub struct NewEvent {
    pub event_name: String,
    pub frequency: Option<String>,
    pub duration: Option<String>,
    pub event_note: Option<String>,
}

/// Link row between an event and one of its categories.
#[derive(Debug, Queryable, Insertable, Clone, Copy, PartialEq, Eq)]
#[diesel(table_name = crate::schema::event_category)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct EventCategory {
    pub event_id: i64,
    pub category_id: i64,
}
