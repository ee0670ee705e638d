//! Demo: fill a cart, check out, and leave the persisted blob behind.
//!
//! Run it twice to see hydration: the second run starts from whatever the first
//! one left in `CART_STORAGE_DIR` (an empty cart, after checkout).

use filament_cart::cart_actor::LogNotifier;
use filament_cart::clients::ActorClient;
use filament_cart::config::StorefrontConfig;
use filament_cart::lifecycle::{setup_tracing, StorefrontSystem};
use filament_cart::model::ProductRef;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StorefrontConfig::from_env()?;
    info!(dir = %config.storage_dir.display(), "Starting storefront");

    let system = StorefrontSystem::with_file_storage(&config, Arc::new(LogNotifier));
    let cart = system.cart_client.clone();

    cart.wait_ready().await?;
    info!(items = cart.item_count().await?, "Cart hydrated");

    let iron = ProductRef::new(
        "5",
        "Magnetic Iron PLA Composite",
        Decimal::new(2999, 2),
        "https://images.unsplash.com/photo-1558618666-fcd25c85cd64?w=400&h=400&fit=crop",
    );
    let copper = ProductRef::new(
        "7",
        "Copper Metal Composite PLA",
        Decimal::new(3999, 2),
        "https://images.unsplash.com/photo-1617791160505-6f00504e3519?w=400&h=400&fit=crop",
    );

    let span = tracing::info_span!("shopping");
    async {
        cart.add_item(iron.clone()).await?;
        cart.add_items(iron, 2).await?;
        cart.add_item(copper).await?;
        cart.set_quantity("7", 2).await?;
        Ok::<_, filament_cart::cart_actor::CartError>(())
    }
    .instrument(span)
    .await?;

    let summary = system.checkout.summary().await?;
    info!(
        items = cart.item_count().await?,
        subtotal = %summary.subtotal,
        tax = %summary.tax,
        shipping = %summary.shipping,
        total = %summary.total,
        "Ready to check out"
    );

    match system.checkout.place_order("maker@example.com").await {
        Ok(confirmation) => info!(
            order_number = %confirmation.order_number,
            email = %confirmation.email,
            total = %confirmation.summary.total,
            "Order confirmed"
        ),
        Err(e) => error!(error = %e, "Checkout failed"),
    }

    drop(cart);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
