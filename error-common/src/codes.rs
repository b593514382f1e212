// Error codes implementation
// Stable codes returned in API error bodies

pub mod validation {
    pub const INVALID_FORMAT: &str = "VALIDATION_1003";
}

pub mod database {
    pub const CONNECTION_FAILED: &str = "DB_4001";
    pub const QUERY_FAILED: &str = "DB_4002";
    pub const CONSTRAINT_VIOLATION: &str = "DB_4003";
}

pub mod resource {
    pub const NOT_FOUND: &str = "RESOURCE_5001";
}
