//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

/// Row model for task records.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Owning charity.
    pub charity_id: uuid::Uuid,
    /// Benefactor attached while waiting or assigned.
    pub assigned_benefactor_id: Option<uuid::Uuid>,
    /// Benefactor that completed the task.
    pub completed_by_id: Option<uuid::Uuid>,
    /// Lifecycle state code.
    pub state: String,
    /// Transition counter.
    pub version: i64,
    /// Task title.
    pub title: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Date the task takes place.
    pub date: Option<NaiveDate>,
    /// Lower age bound.
    pub age_limit_from: Option<i32>,
    /// Upper age bound.
    pub age_limit_to: Option<i32>,
    /// Gender limit code.
    pub gender_limit: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Changeset written by a guarded lifecycle transition.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskTransitionChanges {
    /// New benefactor attachment.
    pub assigned_benefactor_id: Option<uuid::Uuid>,
    /// New completion record.
    pub completed_by_id: Option<uuid::Uuid>,
    /// New lifecycle state code.
    pub state: String,
    /// New transition counter.
    pub version: i64,
    /// Transition timestamp.
    pub updated_at: DateTime<Utc>,
}
