//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! The compact format hides the module prefix (`with_target(false)`); every
//! actor event carries an `aggregate` field instead. Levels come from `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Actor Lifecycle**: start, hydration result, shutdown
//! - **Commands**: every cart command at `debug`, with its payload
//! - **Persistence**: each write at `debug`, failures at `warn`, totals on shutdown
//! - **Checkout**: order processing and the issued order number
//!
//! **With `RUST_LOG=info`**:
//!
//! ```text
//! INFO Actor started aggregate="Cart" key=@protopasta_cart
//! INFO Persister started key=@protopasta_cart
//! INFO Hydrated aggregate="Cart" key=@protopasta_cart
//! INFO Added to Cart title=Added to Cart
//! INFO place_order: Processing order lines=2 total=107.16
//! INFO place_order: Order placed order_number=#PP-4821
//! INFO Persister shutdown key=@protopasta_cart written=4 failed=0
//! ```
//!
//! **With `RUST_LOG=debug`** each command shows up once with its payload:
//!
//! ```text
//! DEBUG add_items: Sending request id="5" product=ProductRef { id: "5", .. } quantity=2
//! DEBUG Execute aggregate="Cart" command=Add { product: ProductRef { .. }, quantity: 2 }
//! DEBUG Persisted key=@protopasta_cart bytes=131
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - we use the aggregate field instead
        .compact() // Compact format shows spans inline (e.g., "place_order")
        .init();
}
