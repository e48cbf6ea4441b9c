//! Demo: one parcel from creation to cashout.
//!
//! Walks a customer, an admin and a rider through the happy path, then shows a
//! second payment for the same parcel being refused.

use parcel_desk::auth::Resource;
use parcel_desk::config::DeskConfig;
use parcel_desk::lifecycle::tracing::setup_tracing;
use parcel_desk::lifecycle::DeliverySystem;
use parcel_desk::model::{
    DeliveryStatus, ParcelCreate, PaymentCreate, RiderCreate, RiderParcelGroup, RiderStatus, Role,
};
use rust_decimal_macros::dec;
use tracing::{info, warn, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = DeskConfig::from_env()?;
    let system = DeliverySystem::new(&config);

    let admin = "admin@desk.io";
    let customer = "alice@example.com";
    let rider_email = "rafi@example.com";

    // Everyone logs in once; the admin is promoted out of band.
    let admin_user = system.user_client.upsert_on_login(admin).await?;
    for email in [customer, rider_email] {
        system.user_client.upsert_on_login(email).await?;
    }
    system.user_client.set_role(admin_user.id, Role::Admin).await?;

    let parcel_id = async {
        system
            .guard
            .authorize(customer, Role::User, Resource::OwnedBy(customer))
            .await?;
        let id = system
            .parcel_client
            .create_parcel(ParcelCreate {
                created_by: customer.to_string(),
                title: "Box of books".to_string(),
                cost: dec!(150),
                tracking_id: None,
            })
            .await?;
        Ok::<_, Box<dyn std::error::Error>>(id)
    }
    .instrument(tracing::info_span!("create_parcel"))
    .await?;
    info!(%parcel_id, "Parcel created");

    let rider_id = async {
        let id = system
            .rider_client
            .register_rider(RiderCreate {
                name: "Rafi".to_string(),
                email: rider_email.to_string(),
                district: "Dhaka".to_string(),
            })
            .await?;
        system.guard.authorize(admin, Role::Admin, Resource::Any).await?;
        system
            .rider_client
            .set_rider_status(id, RiderStatus::Active)
            .await?;
        Ok::<_, Box<dyn std::error::Error>>(id)
    }
    .instrument(tracing::info_span!("onboard_rider"))
    .await?;
    let role = system.user_client.get_role(rider_email).await?;
    info!(%rider_id, %role, "Rider activated");

    let available = system.rider_client.list_available("Dhaka").await?;
    info!(count = available.len(), "Riders available in Dhaka");

    async {
        system
            .parcel_client
            .assign_rider(parcel_id, rider_id, admin)
            .await?;
        system
            .guard
            .authorize(rider_email, Role::Rider, Resource::AssignedTo(rider_email))
            .await?;
        system
            .parcel_client
            .update_delivery_status(parcel_id, DeliveryStatus::InTransit, rider_email)
            .await?;
        system
            .parcel_client
            .update_delivery_status(parcel_id, DeliveryStatus::Delivered, rider_email)
            .await?;
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(tracing::info_span!("deliver"))
    .await?;

    let payment = PaymentCreate {
        parcel_id,
        payer_email: customer.to_string(),
        amount: dec!(150),
        method: "card".to_string(),
        transaction_id: "txn_0001".to_string(),
    };
    let record = system.payment_client.record_payment(payment.clone()).await?;
    info!(payment_id = %record.id, amount = %record.amount, "Payment recorded");

    let replay = PaymentCreate {
        transaction_id: "txn_0002".to_string(),
        ..payment
    };
    if let Err(e) = system.payment_client.record_payment(replay).await {
        warn!(error = %e, kind = ?e.kind(), "Second payment refused");
    }

    let parcel = system.parcel_client.mark_cashed_out(parcel_id).await?;
    info!(cashout = %parcel.cashout_status, "Rider cashed out");

    let completed = system
        .parcel_client
        .list_for_rider(rider_email, RiderParcelGroup::Completed)
        .await?;
    info!(count = completed.len(), "Completed deliveries");

    for event in system.tracking_client.history(&parcel.tracking_id).await? {
        info!(status = %event.status, by = %event.updated_by, "{}", event.message);
    }
    for (status, count) in system.parcel_client.status_counts().await? {
        info!(%status, count, "Parcels by status");
    }

    system.shutdown().await?;
    info!("Demo completed");
    Ok(())
}
