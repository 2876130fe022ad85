//! Companies, communication methods and communication logs

pub mod companies;
pub mod logs;
pub mod methods;
mod models;
pub mod notifications;

pub use logs::{end_of_day, parse_communication_date, record_communication, record_communication_at, start_of_day};
pub use models::*;
pub use notifications::{
    compute_calendar, compute_dashboard, compute_notifications, Calendar, CompanySummary,
    Notifications,
};
