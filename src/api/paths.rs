//! Route templates shared by the router and the access policy

pub const HEALTH: &str = "/api/health";

pub const REGISTER: &str = "/api/auth/register";
pub const LOGIN: &str = "/api/auth/login";
pub const AUTH_CREATE: &str = "/api/auth/create";

pub const COMPANIES: &str = "/api/admin/companies";
pub const COMPANY: &str = "/api/admin/companies/{id}";
pub const METHODS: &str = "/api/admin/communication-methods";
pub const METHOD: &str = "/api/admin/communication-methods/{id}";

pub const DASHBOARD: &str = "/api/user/dashboard";
pub const COMMUNICATION: &str = "/api/user/communication";
pub const NOTIFICATIONS: &str = "/api/user/notifications";
pub const CALENDAR: &str = "/api/user/calendar";
