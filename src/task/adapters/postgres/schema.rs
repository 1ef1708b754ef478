//! Diesel schema for task lifecycle persistence.

diesel::table! {
    /// Task records owned by charities.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Owning charity.
        charity_id -> Uuid,
        /// Benefactor attached while waiting or assigned.
        assigned_benefactor_id -> Nullable<Uuid>,
        /// Benefactor that completed the task.
        completed_by_id -> Nullable<Uuid>,
        /// Task lifecycle state code.
        #[max_length = 1]
        state -> Varchar,
        /// Number of transitions applied so far.
        version -> Int8,
        /// Task title.
        #[max_length = 60]
        title -> Varchar,
        /// Free-form description.
        description -> Nullable<Text>,
        /// Date the task takes place.
        date -> Nullable<Date>,
        /// Lower age bound.
        age_limit_from -> Nullable<Int4>,
        /// Upper age bound.
        age_limit_to -> Nullable<Int4>,
        /// Gender limit code.
        #[max_length = 2]
        gender_limit -> Nullable<Varchar>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
