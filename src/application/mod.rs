//! Application layer managing state and business workflows.
//!
//! This module coordinates between the domain layer and presentation layer,
//! owning the in-memory roster and the add-employee workflow.

pub mod state;

pub use state::*;
