//! Diesel schema for identity persistence.

diesel::table! {
    /// Registered users and their token digests.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Unique login name.
        #[max_length = 150]
        username -> Varchar,
        /// SHA-256 digest of the bearer token.
        #[max_length = 64]
        token_digest -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Benefactor profiles, one per user.
    benefactors (id) {
        /// Benefactor identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Experience level (0 to 2).
        experience -> Int2,
        /// Weekly availability in hours.
        free_time_per_week -> Int2,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Charity profiles, one per user.
    charities (id) {
        /// Charity identifier.
        id -> Uuid,
        /// Owning user.
        user_id -> Uuid,
        /// Display name.
        #[max_length = 50]
        name -> Varchar,
        /// Ten-digit registration number.
        #[max_length = 10]
        reg_number -> Varchar,
        /// Registration timestamp.
        created_at -> Timestamptz,
    }
}
