//! Diesel row models for identity persistence.

use super::schema::{benefactors, charities, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Row model for user records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// User identifier.
    pub id: uuid::Uuid,
    /// Unique login name.
    pub username: String,
    /// SHA-256 digest of the bearer token.
    pub token_digest: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row model for benefactor records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = benefactors)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BenefactorRow {
    /// Benefactor identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Experience level.
    pub experience: i16,
    /// Weekly availability in hours.
    pub free_time_per_week: i16,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}

/// Row model for charity records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = charities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CharityRow {
    /// Charity identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub user_id: uuid::Uuid,
    /// Display name.
    pub name: String,
    /// Registration number.
    pub reg_number: String,
    /// Registration timestamp.
    pub created_at: DateTime<Utc>,
}
