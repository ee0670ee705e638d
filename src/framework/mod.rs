//! Generic actor framework for persisted state containers.
//!
//! # Main Components
//!
//! - [`Aggregate`] - Trait that state types implement to be owned by an actor
//! - [`AggregateActor`] - Generic actor: hydrates, applies commands, persists
//! - [`AggregateClient`] - Type-safe, cloneable handle to an actor
//! - [`WriteBehind`] - Ordered, single-writer persistence task
//! - [`FrameworkError`] - Channel-level errors
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod actor;
pub mod aggregate;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod persist;

// Re-export core types for convenience
pub use actor::AggregateActor;
pub use aggregate::Aggregate;
pub use client::AggregateClient;
pub use error::FrameworkError;
pub use message::{AggregateRequest, Lifecycle, Response};
pub use persist::{PersistRequest, WriteBehind, WriteBehindHandle};
