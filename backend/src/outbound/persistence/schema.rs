//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. When migrations
//! change, regenerate with `diesel print-schema` or update by hand.

diesel::table! {
    /// Registered accounts.
    users (id) {
        id -> Uuid,
        display_name -> Text,
        email -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Alumni and student profiles, each owned by one account.
    profiles (id) {
        id -> Uuid,
        user_id -> Uuid,
        /// `alumni` or `student`.
        kind -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Mentor-owned programs. `capacity` is positive and never updated.
    programs (id) {
        id -> Uuid,
        mentor_id -> Uuid,
        subject -> Text,
        description -> Nullable<Text>,
        community_link -> Text,
        capacity -> Int4,
        active -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Mentee memberships; unique per (program_id, mentee_id) and bounded by
    /// the `program_enrollments_capacity` trigger.
    program_enrollments (id) {
        id -> Uuid,
        program_id -> Uuid,
        mentee_id -> Uuid,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// In-app notifications.
    notifications (id) {
        id -> Uuid,
        user_id -> Uuid,
        title -> Text,
        message -> Text,
        category -> Text,
        is_read -> Bool,
        created_at -> Timestamptz,
    }
}

diesel::joinable!(profiles -> users (user_id));
diesel::joinable!(programs -> users (mentor_id));
diesel::joinable!(program_enrollments -> programs (program_id));
diesel::joinable!(notifications -> users (user_id));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    profiles,
    programs,
    program_enrollments,
    notifications,
);
