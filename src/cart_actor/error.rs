//! Error types for the Cart actor.

use thiserror::Error;

/// Errors a [`CartClient`](crate::clients::CartClient) call can return.
///
/// Cart operations themselves never fail and storage failures are never
/// surfaced; what remains is losing contact with the actor.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    /// An error occurred while communicating with the actor system.
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),

    /// The actor answered with a reply that does not match the command.
    #[error("Unexpected reply to {0}")]
    UnexpectedReply(&'static str),
}
