//! Diesel table definitions.
//!
//! Must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `username` carries a UNIQUE constraint.
    users (id) {
        id -> Int4,
        username -> Varchar,
        /// Argon2id PHC string.
        password_hash -> Text,
    }
}

diesel::table! {
    /// Classes; `user_id` is the owner.
    classes (id) {
        id -> Int4,
        user_id -> Int4,
        name -> Varchar,
    }
}

diesel::table! {
    /// Students; removed with their class (`ON DELETE CASCADE`).
    students (id) {
        id -> Int4,
        class_id -> Int4,
        name -> Varchar,
        age -> Int4,
    }
}

diesel::joinable!(classes -> users (user_id));
diesel::joinable!(students -> classes (class_id));

diesel::allow_tables_to_appear_in_same_query!(users, classes, students);
