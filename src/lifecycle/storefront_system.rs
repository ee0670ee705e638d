use crate::cart_actor::{self, CartContext};
use crate::checkout::CheckoutService;
use crate::clients::CartClient;
use crate::config::StorefrontConfig;
use crate::storage::{FileStorage, Storage};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Actor task failed: {0}")]
    TaskFailed(#[from] tokio::task::JoinError),
}

/// The runtime orchestrator for the storefront's client-side state.
///
/// `StorefrontSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the cart actor
/// - **Dependency Wiring**: Injecting storage and the notifier, handing the
///   cart client to checkout
///
/// # Example
///
/// ```ignore
/// let system = StorefrontSystem::start(&config, storage, Arc::new(LogNotifier));
///
/// system.cart_client.add_item(product).await?;
/// let confirmation = system.checkout.place_order("maker@example.com").await?;
///
/// // Gracefully shut down when done
/// system.shutdown().await?;
/// ```
pub struct StorefrontSystem {
    /// Client for interacting with the cart actor
    pub cart_client: CartClient,

    /// Checkout flow bound to the same cart
    pub checkout: CheckoutService,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl StorefrontSystem {
    /// Creates the cart actor on `storage` and spawns it.
    ///
    /// Returns immediately; the cart hydrates in the background. Calls made
    /// before hydration finishes are queued and applied after it.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(config: &StorefrontConfig, storage: Arc<dyn Storage>, notifier: CartContext) -> Self {
        let (cart_actor, cart_client) =
            cart_actor::new(config.channel_capacity, storage, config.storage_key.clone());
        let cart_handle = tokio::spawn(cart_actor.run(notifier));

        let checkout = CheckoutService::new(cart_client.clone(), config.checkout.clone());
        info!(key = %config.storage_key, "System started");

        Self {
            cart_client,
            checkout,
            handles: vec![cart_handle],
        }
    }

    /// Like [`start`](Self::start), persisting to files under `config.storage_dir`.
    pub fn with_file_storage(config: &StorefrontConfig, notifier: CartContext) -> Self {
        let storage = Arc::new(FileStorage::new(config.storage_dir.clone()));
        Self::start(config, storage, notifier)
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the clients closes the actor's channel. The actor finishes the
    /// messages already queued, closes its persister, and waits for it, so by
    /// the time this returns storage holds the final cart.
    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down system...");

        drop(self.cart_client);
        drop(self.checkout);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
