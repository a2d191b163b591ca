//! One-shot commands run against a freshly loaded panel.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tokio::task::JoinSet;

use autopanel_adapter_http_reqwest::HttpAutomationGateway;
use autopanel_app::services::automation_panel::{ActionOutcome, AutomationPanel};
use autopanel_app::services::edit_form::GatewayEditForm;
use autopanel_domain::id::AutomationId;

use crate::cli::EditArgs;
use crate::render;

/// The panel as wired by the binary.
pub type Panel = AutomationPanel<HttpAutomationGateway, GatewayEditForm<HttpAutomationGateway>>;

/// Print the automation table.
pub fn list(panel: &Panel) -> ExitCode {
    println!("{}", render::table(&panel.rows()));
    ExitCode::SUCCESS
}

/// Delete every automation in `ids`, concurrently.
///
/// Repeated ids are sent once. Reports each outcome and fails when any
/// delete was not confirmed.
///
/// # Errors
///
/// Returns an error if an id is blank or a delete task panicked.
pub async fn delete(panel: &Arc<Panel>, ids: Vec<String>) -> anyhow::Result<ExitCode> {
    let mut unique: Vec<AutomationId> = Vec::with_capacity(ids.len());
    for raw in ids {
        let id = AutomationId::new(raw).context("invalid automation id")?;
        if !unique.contains(&id) {
            unique.push(id);
        }
    }

    let mut tasks = JoinSet::new();
    for id in unique {
        let panel = Arc::clone(panel);
        tasks.spawn(async move {
            let outcome = panel.delete(&id).await;
            (id, outcome)
        });
    }

    let mut failed = 0_usize;
    while let Some(joined) = tasks.join_next().await {
        let (id, outcome) = joined.context("delete task failed")?;
        match outcome {
            ActionOutcome::Applied => println!("deleted {id}"),
            ActionOutcome::Busy | ActionOutcome::Ignored => {
                println!("skipped {id}, a change is already in progress");
            }
            ActionOutcome::Failed(err) => {
                failed += 1;
                eprintln!("Failed to delete automation {id}: {err}");
            }
        }
    }

    println!("{}", render::table(&panel.rows()));
    Ok(if failed == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Apply the given field changes to one automation.
///
/// # Errors
///
/// Returns an error if the id is blank, the automation is not listed or no
/// field was given.
pub async fn edit(panel: &Panel, args: EditArgs) -> anyhow::Result<ExitCode> {
    if !args.has_changes() {
        anyhow::bail!("nothing to change, pass --name, --description or --status");
    }
    let id = AutomationId::new(args.id).context("invalid automation id")?;
    if panel.edit(&id).is_none() {
        anyhow::bail!("automation {id} not found");
    }

    let EditArgs {
        name,
        description,
        status,
        ..
    } = args;
    panel.revise_draft(|draft| {
        if let Some(name) = name {
            draft.name = name;
        }
        if let Some(description) = description {
            draft.description = description;
        }
        if let Some(status) = status {
            draft.status = status.into();
        }
    });

    match panel.save_edit().await {
        ActionOutcome::Applied => {
            println!("updated {id}");
            println!("{}", render::table(&panel.rows()));
            Ok(ExitCode::SUCCESS)
        }
        ActionOutcome::Failed(err) => {
            eprintln!("Failed to update automation {id}: {err}");
            Ok(ExitCode::FAILURE)
        }
        outcome => {
            if let Some(reason) = not_saved_reason(&outcome) {
                eprintln!("Automation {id} was not updated, {reason}");
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn not_saved_reason(outcome: &ActionOutcome) -> Option<&'static str> {
    match outcome {
        ActionOutcome::Busy => Some("a change is already in progress"),
        ActionOutcome::Ignored => Some("no edit is open"),
        ActionOutcome::Applied | ActionOutcome::Failed(_) => None,
    }
}
