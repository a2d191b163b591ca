//! Terminal rendering of the automation table, edit drafts and notices.

use tabled::builder::Builder;
use tabled::settings::Style;

use autopanel_app::notices::{Notice, NoticeLevel};
use autopanel_app::view::{AutomationRow, COLUMNS, EMPTY_MESSAGE, StatusBadge};
use autopanel_domain::edit_session::EditSession;

/// Render rows as a table, or the empty-state message.
#[must_use]
pub fn table(rows: &[AutomationRow]) -> String {
    if rows.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }
    let mut builder = Builder::default();
    builder.push_record(COLUMNS);
    for row in rows {
        let [id, name, description, _, created, updated] = row.cells();
        let status = badge(row);
        builder.push_record([id, name, description, status.as_str(), created, updated]);
    }
    builder.build().with(Style::rounded()).to_string()
}

fn badge(row: &AutomationRow) -> String {
    match row.badge {
        StatusBadge::Default => format!("● {}", row.status),
        StatusBadge::Secondary => format!("○ {}", row.status),
    }
}

/// Render the open edit session, if any.
#[must_use]
pub fn session(session: &EditSession) -> String {
    match (session.original(), session.draft()) {
        (Some(original), Some(draft)) => format!(
            "editing {}\n  name:        {}\n  description: {}\n  status:      {}",
            original.id, draft.name, draft.description, draft.status
        ),
        _ => "no automation is being edited".to_string(),
    }
}

/// Render a notice as a single line.
#[must_use]
pub fn notice(notice: &Notice) -> String {
    let level = match notice.level {
        NoticeLevel::Info => "info",
        NoticeLevel::Error => "error",
    };
    match &notice.automation_id {
        Some(id) => format!("{level}: {} ({id})", notice.text),
        None => format!("{level}: {}", notice.text),
    }
}
