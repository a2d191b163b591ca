//! Edit form backed by the automation gateway.

use std::future::Future;

use autopanel_domain::automation::{Automation, AutomationChanges};
use autopanel_domain::error::{PanelError, ValidationError};

use crate::ports::{AutomationGateway, EditForm};

/// [`EditForm`] that validates the change set and submits it through an
/// [`AutomationGateway`].
#[derive(Clone)]
pub struct GatewayEditForm<G> {
    gateway: G,
}

impl<G> GatewayEditForm<G> {
    pub fn new(gateway: G) -> Self {
        Self { gateway }
    }
}

impl<G: AutomationGateway + Sync> EditForm for GatewayEditForm<G> {
    fn submit(
        &self,
        original: &Automation,
        changes: AutomationChanges,
    ) -> impl Future<Output = Result<Automation, PanelError>> + Send {
        async move {
            changes.validate()?;
            let confirmed = self.gateway.update(&original.id, &changes).await?;
            if confirmed.id != original.id {
                return Err(ValidationError::IdentityMismatch {
                    expected: original.id.to_string(),
                    actual: confirmed.id.to_string(),
                }
                .into());
            }
            Ok(confirmed)
        }
    }
}
