//! # Filament Cart
//!
//! > **The shopping cart of a filament storefront, as an actor with write-behind persistence.**
//!
//! The cart is an insertion-ordered list of line items owned by a single Tokio
//! task. Screens talk to it through a cloneable client; every mutation is
//! applied in memory immediately and then mirrored, as one JSON blob, to a
//! key/value store by a dedicated writer task.
//!
//! ## 🏗️ Design
//!
//! ### One owner, one writer
//! The cart actor processes its messages sequentially, so the cart needs no
//! locks. Persistence goes through a second task that drains an ordered queue,
//! so writes never overlap and the last mutation is always the last write.
//!
//! ### Hydrate first
//! On startup the actor reads the persisted blob before it takes the first
//! message. Anything sent while it is still loading waits in the channel and is
//! applied afterwards; nothing done by the user can be clobbered by a late load.
//!
//! ### Failures stay local
//! A failed read means an empty cart. A failed write is logged and dropped; the
//! in-memory cart is unaffected and the next write is attempted normally.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! The generic [`AggregateActor`](framework::AggregateActor), its client, and
//! the [`WriteBehind`](framework::WriteBehind) persister.
//!
//! ### 2. The Cart ([`model`], [`cart_actor`])
//! [`Cart`](model::Cart) holds the business rules; `cart_actor` plugs it into
//! the framework and raises "Added to Cart" / "Cart Updated" notices.
//!
//! ### 3. The Interface ([`clients`])
//! [`CartClient`](clients::CartClient) exposes one async method per operation.
//!
//! ### 4. Around it ([`storage`], [`checkout`], [`config`], [`lifecycle`])
//! Storage backends, the simulated checkout that empties the cart, environment
//! configuration, and the [`StorefrontSystem`](lifecycle::StorefrontSystem)
//! that wires it all up.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Run the demo with info logs
//! RUST_LOG=info cargo run
//! ```

pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod storage;
