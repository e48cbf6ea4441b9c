use crate::auth::AccessGuard;
use crate::clients::{ParcelClient, PaymentClient, RiderClient, TrackingClient, UserClient};
use crate::config::DeskConfig;
use tracing::{error, info};

/// Owns the running actors and hands out their clients.
///
/// # Architecture
///
/// Five actors, wired so every dependency points one way:
///
/// ```text
/// payment -> parcel -> rider -> user
///              \-> tracking
/// ```
///
/// - **User**: accounts and roles (no dependencies)
/// - **Tracking**: the append-only ledger (no dependencies)
/// - **Rider**: applications and availability; promotes users on activation
/// - **Parcel**: the delivery state machine; drives rider availability and tracking
/// - **Payment**: records payments; marks parcels paid
///
/// # Example
///
/// ```ignore
/// let system = DeliverySystem::new(&DeskConfig::default());
/// let parcel = system.parcel_client.create_parcel(params).await?;
/// system.shutdown().await?;
/// ```
pub struct DeliverySystem {
    pub user_client: UserClient,
    pub rider_client: RiderClient,
    pub parcel_client: ParcelClient,
    pub tracking_client: TrackingClient,
    pub payment_client: PaymentClient,

    /// Role checks backed by the user actor.
    pub guard: AccessGuard,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl DeliverySystem {
    /// Spawns every actor with its dependencies. Must be called inside a Tokio runtime.
    pub fn new(config: &DeskConfig) -> Self {
        let capacity = config.channel_capacity;

        // 1. Create actors
        let (user_actor, user_client) = crate::user_actor::new(capacity);
        let (tracking_actor, tracking_client) = crate::tracking_actor::new(capacity);
        let (rider_actor, rider_client) = crate::rider_actor::new(capacity);
        let (parcel_actor, parcel_client) = crate::parcel_actor::new(capacity);
        let (payment_actor, payment_client) = crate::payment_actor::new(capacity);

        // 2. Start actors with injected context
        let handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(tracking_actor.run(())),
            tokio::spawn(rider_actor.run(user_client.clone())),
            tokio::spawn(parcel_actor.run((rider_client.clone(), tracking_client.clone()))),
            tokio::spawn(payment_actor.run(parcel_client.clone())),
        ];
        info!(capacity, "Delivery system started");

        Self {
            guard: AccessGuard::new(user_client.clone()),
            user_client,
            rider_client,
            parcel_client,
            tracking_client,
            payment_client,
            handles,
        }
    }

    /// Drops every client held here and waits for the actors to drain.
    ///
    /// An actor stops once all clients of it are gone, including the copies held as
    /// context by the actors depending on it, so the chain unwinds from payment down
    /// to user. Clones held elsewhere keep their actors (and this call) waiting.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.guard);
        drop(self.payment_client);
        drop(self.parcel_client);
        drop(self.rider_client);
        drop(self.tracking_client);
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
