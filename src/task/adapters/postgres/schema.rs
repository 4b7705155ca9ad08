//! Diesel schema for task persistence.

diesel::table! {
    /// Application users.
    users (id) {
        /// User identifier.
        id -> Uuid,
        /// Display name.
        #[max_length = 255]
        name -> Varchar,
        /// Contact email.
        #[max_length = 255]
        email -> Varchar,
        /// Organisation role.
        #[max_length = 50]
        role -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Free-form description.
        description -> Text,
        /// Workflow status.
        #[max_length = 50]
        status -> Varchar,
        /// Priority.
        #[max_length = 50]
        priority -> Varchar,
        /// Assigned user.
        assigned_to -> Nullable<Uuid>,
        /// Creating user.
        created_by -> Uuid,
        /// Planned start date.
        start_date -> Nullable<Date>,
        /// Due date.
        due_date -> Nullable<Date>,
        /// Estimated effort in hours.
        estimated_hours -> Float8,
        /// Accumulated time in hours.
        time_spent -> Float8,
        /// Creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Append-only task activity log.
    task_logs (id) {
        /// Entry identifier.
        id -> Uuid,
        /// Task the action was performed on.
        task_id -> Uuid,
        /// Acting user.
        user_id -> Uuid,
        /// Recorded action.
        #[max_length = 50]
        action -> Varchar,
        /// Logged duration in hours.
        duration -> Nullable<Float8>,
        /// Entry timestamp.
        created_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, tasks, task_logs);
