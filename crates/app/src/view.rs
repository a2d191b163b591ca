//! Row view-model for the automation table.
//!
//! Turns domain records into display strings; layout is left to the host.

use chrono::{Local, TimeZone};

use autopanel_domain::automation::Automation;
use autopanel_domain::automation_list::AutomationList;
use autopanel_domain::time::Timestamp;

/// Column headers, in display order.
pub const COLUMNS: [&str; 6] = [
    "ID",
    "Name",
    "Description",
    "Status",
    "Created Date",
    "Updated Date",
];

/// Message shown instead of the table when the list is empty.
pub const EMPTY_MESSAGE: &str = "No automations found.";

/// Visual treatment of the status cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusBadge {
    /// Highlighted; used for `active`.
    Default,
    /// Muted; used for every other status.
    Secondary,
}

/// One rendered table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutomationRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub badge: StatusBadge,
    pub created: String,
    pub updated: String,
}

impl AutomationRow {
    /// Project `automation` using the local time zone.
    #[must_use]
    pub fn new(automation: &Automation) -> Self {
        Self::in_zone(automation, &Local)
    }

    /// Project `automation`, rendering timestamps in `zone`.
    #[must_use]
    pub fn in_zone<Tz>(automation: &Automation, zone: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        let badge = if automation.status.is_active() {
            StatusBadge::Default
        } else {
            StatusBadge::Secondary
        };
        Self {
            id: automation.id.to_string(),
            name: automation.name.clone(),
            description: automation.description.clone(),
            status: automation.status.to_string(),
            badge,
            created: format_timestamp(&automation.created_at, zone),
            updated: format_timestamp(&automation.updated_at, zone),
        }
    }

    /// Cells in [`COLUMNS`] order.
    #[must_use]
    pub fn cells(&self) -> [&str; 6] {
        [
            self.id.as_str(),
            self.name.as_str(),
            self.description.as_str(),
            self.status.as_str(),
            self.created.as_str(),
            self.updated.as_str(),
        ]
    }
}

/// Project a whole list.
#[must_use]
pub fn rows(list: &AutomationList) -> Vec<AutomationRow> {
    list.iter().map(AutomationRow::new).collect()
}

fn format_timestamp<Tz>(ts: &Timestamp, zone: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    ts.with_timezone(zone)
        .format("%Y-%m-%d %H:%M:%S")
        .to_string()
}
