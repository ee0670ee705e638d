//! # Generic Messages
//!
//! The message types passed from an [`AggregateClient`](crate::framework::AggregateClient)
//! to its actor.

use crate::framework::aggregate::Aggregate;
use crate::framework::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor.
///
/// - **Execute**: apply one [`Aggregate::Command`] and reply with its result.
/// - **Flush**: reply once every snapshot queued before this message has been
///   written (or has failed and been dropped).
#[derive(Debug)]
pub enum AggregateRequest<A: Aggregate> {
    Execute {
        command: A::Command,
        respond_to: Response<A::Reply>,
    },
    Flush {
        respond_to: Response<()>,
    },
}

/// Hydration state of an aggregate.
///
/// Moves from `Loading` to `Ready` exactly once, when the initial storage read
/// finishes, whether it succeeded or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Loading,
    Ready,
}
