//! Diesel schema for the audit record collection.

diesel::table! {
    /// Append-only audit documents. No foreign key to `tasks`.
    audit_logs (id) {
        /// Record identifier.
        id -> Uuid,
        /// Kind of entity referenced.
        #[max_length = 50]
        entity_type -> Varchar,
        /// String form of the referenced entity identifier.
        #[max_length = 64]
        entity_id -> Varchar,
        /// Recorded action.
        #[max_length = 50]
        action -> Varchar,
        /// Action payload document.
        data -> Jsonb,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}
