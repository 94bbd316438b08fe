//! Diesel schema for analytics driver configuration persistence.

diesel::table! {
    /// Analytics driver configuration rows.
    analytics (id) {
        /// Configuration identifier.
        id -> Int8,
        /// Selected driver name.
        #[max_length = 100]
        driver -> Varchar,
        /// Driver options with their schema discriminator, as JSONB.
        options -> Jsonb,
    }
}
