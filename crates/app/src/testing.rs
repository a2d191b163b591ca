//! Test doubles shared by the unit tests of this crate.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use autopanel_domain::automation::{Automation, AutomationChanges};
use autopanel_domain::error::{NotFoundError, PanelError};
use autopanel_domain::id::AutomationId;
use autopanel_domain::time;

use crate::ports::AutomationGateway;

pub(crate) fn id(value: &str) -> AutomationId {
    AutomationId::new(value).unwrap()
}

/// A record with fixed timestamps, so two calls compare equal.
pub(crate) fn job(id: &str, name: &str, status: &str) -> Automation {
    let created = chrono::DateTime::from_timestamp(1_714_550_400, 0).unwrap();
    Automation::builder()
        .id(AutomationId::new(id).unwrap())
        .name(name)
        .description(format!("{name} description"))
        .status(status)
        .created_at(created)
        .build()
        .unwrap()
}

fn backend_error(message: &str) -> PanelError {
    PanelError::Gateway(Box::new(std::io::Error::other(message.to_string())))
}

/// In-memory backend with scriptable failures.
///
/// Updates trim the submitted name, standing in for server-side
/// normalization.
#[derive(Default)]
pub(crate) struct StubGateway {
    records: Mutex<Vec<Automation>>,
    failing: Mutex<HashSet<AutomationId>>,
    gate: Option<Arc<Notify>>,
    pub deletes: Mutex<Vec<AutomationId>>,
    pub updates: Mutex<Vec<(AutomationId, AutomationChanges)>>,
}

impl StubGateway {
    pub fn with_records(records: Vec<Automation>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Make every request for `id` fail.
    pub fn failing(self, id: &AutomationId) -> Self {
        self.failing.lock().unwrap().insert(id.clone());
        self
    }

    /// Hold every delete/update until `gate` is notified.
    pub fn gated(mut self, gate: Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.lock().unwrap().len()
    }

    pub fn update_count(&self) -> usize {
        self.updates.lock().unwrap().len()
    }

    async fn wait_gate(&self) {
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
    }

    fn is_failing(&self, id: &AutomationId) -> bool {
        self.failing.lock().unwrap().contains(id)
    }
}

impl AutomationGateway for StubGateway {
    fn list(&self) -> impl Future<Output = Result<Vec<Automation>, PanelError>> + Send {
        let records = self.records.lock().unwrap().clone();
        async { Ok(records) }
    }

    fn delete(&self, id: &AutomationId) -> impl Future<Output = Result<(), PanelError>> + Send {
        async move {
            self.deletes.lock().unwrap().push(id.clone());
            self.wait_gate().await;
            if self.is_failing(id) {
                return Err(backend_error("HTTP 500"));
            }
            self.records.lock().unwrap().retain(|a| &a.id != id);
            Ok(())
        }
    }

    fn update(
        &self,
        id: &AutomationId,
        changes: &AutomationChanges,
    ) -> impl Future<Output = Result<Automation, PanelError>> + Send {
        async move {
            self.updates
                .lock()
                .unwrap()
                .push((id.clone(), changes.clone()));
            self.wait_gate().await;
            if self.is_failing(id) {
                return Err(backend_error("HTTP 403"));
            }
            let mut records = self.records.lock().unwrap();
            let Some(record) = records.iter_mut().find(|a| &a.id == id) else {
                return Err(NotFoundError {
                    entity: "Automation",
                    id: id.to_string(),
                }
                .into());
            };
            let mut confirmed = changes.apply_to(record);
            confirmed.name = confirmed.name.trim().to_string();
            confirmed.updated_at = time::now();
            *record = confirmed.clone();
            Ok(confirmed)
        }
    }
}
