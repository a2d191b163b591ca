//! reqwest implementation of [`AutomationGateway`].
//!
//! Endpoints, relative to the configured base URL:
//!
//! | Operation | Request                      | Success                    |
//! |-----------|------------------------------|----------------------------|
//! | list      | `GET /automations`           | JSON array of automations  |
//! | delete    | `DELETE /automations/{id}`   | any 2xx, body ignored      |
//! | update    | `PUT /automations/{id}`      | the updated automation     |

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response, Url};

use autopanel_app::ports::AutomationGateway;
use autopanel_domain::automation::{Automation, AutomationChanges};
use autopanel_domain::error::PanelError;
use autopanel_domain::id::AutomationId;

use crate::error::HttpError;

/// HTTP-backed automation gateway.
///
/// Cloning is cheap and shares the underlying connection pool and cookie
/// store.
#[derive(Debug, Clone)]
pub struct HttpAutomationGateway {
    client: Client,
    base: Url,
}

impl HttpAutomationGateway {
    /// Create a gateway on top of a configured client.
    ///
    /// Prefer [`Config::build`](crate::Config::build), which sets the timeout
    /// and credentials.
    #[must_use]
    pub fn new(client: Client, base: Url) -> Self {
        Self { client, base }
    }

    /// Backend origin without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        self.base.as_str().trim_end_matches('/')
    }

    fn url(&self, id: Option<&AutomationId>) -> Result<Url, HttpError> {
        let mut url = self.base.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|()| HttpError::InvalidUrl {
                url: self.base.to_string(),
            })?;
            segments.pop_if_empty().push("automations");
            if let Some(id) = id {
                segments.push(id.as_str());
            }
        }
        Ok(url)
    }

    async fn send(request: RequestBuilder) -> Result<Response, HttpError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(HttpError::Status { status, body })
    }
}

impl AutomationGateway for HttpAutomationGateway {
    #[tracing::instrument(skip_all)]
    async fn list(&self) -> Result<Vec<Automation>, PanelError> {
        let url = self.url(None)?;
        let response = Self::send(self.client.get(url)).await?;
        let automations: Vec<Automation> = response.json().await.map_err(HttpError::from)?;
        tracing::debug!(count = automations.len(), "fetched automations");
        Ok(automations)
    }

    #[tracing::instrument(skip_all, fields(automation_id = %id))]
    async fn delete(&self, id: &AutomationId) -> Result<(), PanelError> {
        let url = self.url(Some(id))?;
        let request = self
            .client
            .delete(url)
            .header(CONTENT_TYPE, "application/json");
        let response = Self::send(request).await?;
        tracing::debug!(status = %response.status(), "backend confirmed delete");
        Ok(())
    }

    #[tracing::instrument(skip_all, fields(automation_id = %id))]
    async fn update(
        &self,
        id: &AutomationId,
        changes: &AutomationChanges,
    ) -> Result<Automation, PanelError> {
        let url = self.url(Some(id))?;
        let response = Self::send(self.client.put(url).json(changes)).await?;
        let automation: Automation = response.json().await.map_err(HttpError::from)?;
        tracing::debug!("backend confirmed update");
        Ok(automation)
    }
}
