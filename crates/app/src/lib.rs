//! # autopanel-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `AutomationGateway` — list, delete and update automations on the backend
//!   - `EditForm` — submit an edit and yield the backend-confirmed record
//! - Define **driving/inbound ports** as use-case structs:
//!   - `MutationDispatcher` — one confirmed mutation at a time per automation
//!   - `AutomationPanel` — list, edit session and user actions for one view
//! - Provide **in-process infrastructure** that doesn't need IO: the
//!   watch-backed list store, the in-flight registry and the notice bus
//! - Keep local state strictly behind backend confirmations
//!
//! ## Dependency rule
//! Depends on `autopanel-domain` only (plus `tokio::sync` for channels).
//! Never imports adapter crates. Adapters depend on *this* crate, not the reverse.

pub mod in_flight;
pub mod notices;
pub mod ports;
pub mod services;
pub mod store;
pub mod view;

#[cfg(test)]
mod testing;
