//! Route path constants
//!
//! Handlers redirect to the listing paths defined here, so the router and the
//! redirects cannot drift apart.

/// Index and health endpoints
pub mod health {
    pub const INDEX: &str = "/";
    pub const HEALTH: &str = "/health";
}

pub mod patients {
    pub const LIST: &str = "/patients";
    pub const ADD: &str = "/add_patient";
    pub const DELETE: &str = "/delete_patient/:id";
    pub const UPDATE: &str = "/update_patient/:id";
}

pub mod doctors {
    pub const LIST: &str = "/doctors";
    pub const ADD: &str = "/add_doctor";
    pub const DELETE: &str = "/delete_doctor/:id";
    pub const UPDATE: &str = "/update_doctor/:id";
}

pub mod appointments {
    pub const LIST: &str = "/appointments";
    pub const ADD: &str = "/add_appointment";
    pub const DELETE: &str = "/delete_appointment/:id";
    pub const UPDATE: &str = "/update_appointment/:id";
}

pub mod billing {
    pub const LIST: &str = "/billing";
    pub const ADD: &str = "/add_bill";
    pub const DELETE: &str = "/delete_bill/:id";
    pub const UPDATE: &str = "/update_bill/:id";
}
