//! # Framework Errors
//!
//! Errors between a client and its actor. Storage failures are deliberately
//! absent: they are logged where they happen and never travel back to callers.

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Persister closed")]
    PersisterClosed,
    #[error("Aggregate error: {0}")]
    AggregateError(Box<dyn std::error::Error + Send + Sync>),
}
