//! # autopanel-adapter-http-reqwest
//!
//! HTTP backend adapter using [reqwest](https://docs.rs/reqwest).
//!
//! ## Responsibilities
//! - Implement the [`AutomationGateway`](autopanel_app::ports::AutomationGateway)
//!   port against the automation backend's REST endpoints
//! - Own the HTTP client lifecycle (timeout, session cookie, cookie store)
//! - Map transport failures and non-success statuses into `PanelError`
//!
//! ## Dependency rule
//! Depends on `autopanel-app` (for port traits) and `autopanel-domain` (for domain types).
//! The `app` and `domain` crates must never reference this adapter.

pub mod config;
pub mod error;
pub mod gateway;

pub use config::Config;
pub use error::HttpError;
pub use gateway::HttpAutomationGateway;
