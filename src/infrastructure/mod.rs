//! Infrastructure layer providing external service integrations.
//!
//! This module contains implementations for external concerns: the
//! identity collaborator, the email delivery service, and durable
//! roster storage on disk.

pub mod identity;
pub mod notification;
pub mod persistence;

pub use identity::*;
pub use notification::*;
pub use persistence::*;

/// External collaborators threaded through the input handler.
pub struct Services<'a> {
    pub identity: &'a IdentityProvider,
    pub gateway: &'a dyn NotificationGateway,
    pub store: &'a RosterStore,
}
