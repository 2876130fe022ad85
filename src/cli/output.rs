//! CLI output formatting utilities

use chrono::{DateTime, Utc};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

use crate::tracking::{CommunicationLog, CompanySummary, Notifications};

/// Print a success message
pub fn success(message: &str) {
    println!("{} {}", "✓".green(), message);
}

/// Print an error message
pub fn error(message: &str) {
    eprintln!("{} {}", "✗".red(), message);
}

/// Print a warning message
pub fn warn(message: &str) {
    println!("{} {}", "⚠".yellow(), message);
}

/// Print an info message
pub fn info(message: &str) {
    println!("{} {}", "ℹ".blue(), message);
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d %H:%M").to_string()
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles.iter().map(|t| Cell::new(t).fg(Color::Cyan)).collect()
}

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn log_row(log: &CommunicationLog, status: &str, color: Color) -> Vec<Cell> {
    vec![
        Cell::new(status).fg(color),
        Cell::new(format_date(log.communication_date)),
        Cell::new(&log.communication_type),
        Cell::new(&log.company_id),
        Cell::new(log.notes.as_deref().unwrap_or("-")),
    ]
}

/// Print overdue and due-today communications in one table
pub fn print_notifications_table(notifications: &Notifications) {
    if notifications.overdue.is_empty() && notifications.due_today.is_empty() {
        success("Nothing overdue or due today");
        return;
    }

    let mut table = new_table();
    table.set_header(header(&["Status", "Date", "Type", "Company", "Notes"]));

    for log in &notifications.overdue {
        table.add_row(log_row(log, "overdue", Color::Red));
    }
    for log in &notifications.due_today {
        table.add_row(log_row(log, "due today", Color::Yellow));
    }

    println!("{table}");
}

/// Print one row per company with its latest and next communication
pub fn print_dashboard_table(dashboard: &[CompanySummary]) {
    if dashboard.is_empty() {
        info("No companies found. Add one with POST /api/admin/companies");
        return;
    }

    let mut table = new_table();
    table.set_header(header(&["Company", "Last", "Recent", "Next"]));

    for summary in dashboard {
        let last = summary
            .last_communications
            .first()
            .map(|log| format!("{} ({})", format_date(log.communication_date), log.communication_type))
            .unwrap_or_else(|| "-".to_string());

        let next = summary
            .next_communication
            .as_ref()
            .map(|log| format!("{} ({})", format_date(log.communication_date), log.communication_type))
            .unwrap_or_else(|| "-".to_string());

        table.add_row(vec![
            Cell::new(&summary.company_name),
            Cell::new(last),
            Cell::new(summary.last_communications.len()),
            Cell::new(next).fg(Color::Green),
        ]);
    }

    println!("{table}");
}
