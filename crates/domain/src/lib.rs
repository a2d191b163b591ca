//! # autopanel-domain
//!
//! Pure domain model for the autopanel automation console.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **Automations** (backend-owned job definitions) and the
//!   **changes** a user may submit for them
//! - Define the **automation list** (ordered, one record per identity)
//! - Define the **edit session** state machine (one record edited at a time)
//! - Contain all invariant enforcement and domain logic
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod automation;
pub mod automation_list;
pub mod edit_session;
