//! # System Lifecycle & Orchestration
//!
//! This module owns the construction/teardown boundary of the application.
//!
//! There is no global cart. [`StorefrontSystem::start`] creates the cart actor,
//! injects its notifier, spawns it, and hands out clients; every consumer
//! receives a cloned [`CartClient`](crate::clients::CartClient) instead of
//! reaching for shared state. [`StorefrontSystem::shutdown`] drops the clients
//! and waits until the actor and its persister have finished, so every queued
//! write has landed before it returns.
//!
//! ## Observability & Tracing
//!
//! [`setup_tracing`] installs the subscriber. Call it once, from the binary.
//!
//! ```bash
//! RUST_LOG=info cargo run      # Compact logs
//! RUST_LOG=debug cargo run     # Full payloads
//! ```

pub mod storefront_system;
pub mod tracing;

pub use self::tracing::*;
pub use storefront_system::*;
