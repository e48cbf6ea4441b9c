use entity_store::EntityClient;
use parcel_desk::auth::Resource;
use parcel_desk::config::DeskConfig;
use parcel_desk::error::{DeliveryError, ErrorKind};
use parcel_desk::lifecycle::DeliverySystem;
use parcel_desk::model::{
    CashoutStatus, DeliveryStatus, ParcelCreate, ParcelFilter, ParcelId, PaymentCreate, PaymentId,
    PaymentStatus, RiderCreate, RiderId, RiderParcelGroup, RiderStatus, Role, TrackingEventId,
    WorkStatus,
};
use parcel_desk::parcel_actor::ParcelError;
use parcel_desk::payment_actor::PaymentError;
use parcel_desk::rider_actor::RiderError;
use rust_decimal_macros::dec;

const ADMIN: &str = "admin@desk.io";
const CUSTOMER: &str = "a@x.com";
const RIDER: &str = "r@x.com";

async fn new_parcel(system: &DeliverySystem, title: &str) -> ParcelId {
    system
        .parcel_client
        .create_parcel(ParcelCreate {
            created_by: CUSTOMER.to_string(),
            title: title.to_string(),
            cost: dec!(150),
            tracking_id: None,
        })
        .await
        .unwrap()
}

async fn active_rider(system: &DeliverySystem, email: &str, district: &str) -> RiderId {
    system.user_client.upsert_on_login(email).await.unwrap();
    let id = system
        .rider_client
        .register_rider(RiderCreate {
            name: "Rafi".to_string(),
            email: email.to_string(),
            district: district.to_string(),
        })
        .await
        .unwrap();
    system
        .rider_client
        .set_rider_status(id, RiderStatus::Active)
        .await
        .unwrap();
    id
}

fn payment(parcel_id: ParcelId, transaction_id: &str) -> PaymentCreate {
    PaymentCreate {
        parcel_id,
        payer_email: CUSTOMER.to_string(),
        amount: dec!(150),
        method: "card".to_string(),
        transaction_id: transaction_id.to_string(),
    }
}

#[tokio::test]
async fn test_parcel_lifecycle_end_to_end() {
    let system = DeliverySystem::new(&DeskConfig::default());

    let parcel_id = new_parcel(&system, "Books").await;
    let parcel = system.parcel_client.fetch(parcel_id).await.unwrap();
    assert_eq!(parcel.delivery_status, DeliveryStatus::Created);
    assert_eq!(parcel.payment_status, PaymentStatus::Unpaid);
    assert_eq!(parcel.cashout_status, CashoutStatus::NotCashedOut);
    assert!(parcel.assigned_rider.is_none());
    assert_eq!(parcel.tracking_id, "TRK-000001");

    let rider_id = active_rider(&system, RIDER, "Dhaka").await;
    assert_eq!(system.user_client.get_role(RIDER).await.unwrap(), Role::Rider);

    let assigned = system
        .parcel_client
        .assign_rider(parcel_id, rider_id, ADMIN)
        .await
        .unwrap();
    assert_eq!(assigned.delivery_status, DeliveryStatus::RiderAssigned);
    let rider = assigned.assigned_rider.unwrap();
    assert_eq!((rider.id, rider.email.as_str()), (rider_id, RIDER));
    let rider = system.rider_client.fetch(rider_id).await.unwrap();
    assert_eq!(rider.work_status, WorkStatus::InDelivery);

    let record = system
        .payment_client
        .record_payment(payment(parcel_id, "txn_1"))
        .await
        .unwrap();
    assert_eq!(record.parcel_id, parcel_id);
    let parcel = system.parcel_client.fetch(parcel_id).await.unwrap();
    assert_eq!(parcel.payment_status, PaymentStatus::Paid);
    assert_eq!(parcel.paid_at, Some(record.paid_at));

    let err = system
        .payment_client
        .record_payment(payment(parcel_id, "txn_2"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(system.payment_client.history(None).await.unwrap().len(), 1);

    let in_transit = system
        .parcel_client
        .update_delivery_status(parcel_id, DeliveryStatus::InTransit, RIDER)
        .await
        .unwrap();
    assert!(in_transit.picked_at.is_some());

    let delivered = system
        .parcel_client
        .update_delivery_status(parcel_id, DeliveryStatus::Delivered, RIDER)
        .await
        .unwrap();
    assert!(delivered.delivered_at.is_some());
    let rider = system.rider_client.fetch(rider_id).await.unwrap();
    assert_eq!(rider.work_status, WorkStatus::Available);

    let cashed = system.parcel_client.mark_cashed_out(parcel_id).await.unwrap();
    assert_eq!(cashed.cashout_status, CashoutStatus::CashedOut);
    let err = system.parcel_client.mark_cashed_out(parcel_id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let history = system
        .tracking_client
        .history(&cashed.tracking_id)
        .await
        .unwrap();
    let statuses: Vec<_> = history.iter().map(|e| e.status.as_str()).collect();
    assert_eq!(
        statuses,
        vec!["created", "rider_assigned", "in_transit", "delivered"]
    );
    assert!(history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_illegal_transitions_are_conflicts() {
    let system = DeliverySystem::new(&DeskConfig::default());
    let parcel_id = new_parcel(&system, "Lamp").await;

    let err = system
        .parcel_client
        .update_delivery_status(parcel_id, DeliveryStatus::Delivered, RIDER)
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ParcelError::InvalidTransition {
            from: DeliveryStatus::Created,
            to: DeliveryStatus::Delivered,
        }
    );

    let err = system
        .parcel_client
        .update_delivery_status(parcel_id, DeliveryStatus::RiderAssigned, ADMIN)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let unknown = "lost_at_sea".parse::<DeliveryStatus>().map_err(ParcelError::from);
    assert_eq!(unknown.unwrap_err().kind(), ErrorKind::Validation);

    let parcel = system.parcel_client.fetch(parcel_id).await.unwrap();
    assert_eq!(parcel.delivery_status, DeliveryStatus::Created);
}

#[tokio::test]
async fn test_assigning_an_inactive_rider_leaves_parcel_untouched() {
    let system = DeliverySystem::new(&DeskConfig::default());
    let parcel_id = new_parcel(&system, "Shoes").await;
    let pending = system
        .rider_client
        .register_rider(RiderCreate {
            name: "Nadia".to_string(),
            email: "n@x.com".to_string(),
            district: "Khulna".to_string(),
        })
        .await
        .unwrap();

    let err = system
        .parcel_client
        .assign_rider(parcel_id, pending, ADMIN)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ParcelError::Rider { source: RiderError::NotActive(id), .. } if id == pending
    ));
    assert_eq!(err.kind(), ErrorKind::Conflict);

    let parcel = system.parcel_client.fetch(parcel_id).await.unwrap();
    assert_eq!(parcel.delivery_status, DeliveryStatus::Created);
    assert!(parcel.assigned_rider.is_none());

    let history = system.tracking_client.history(&parcel.tracking_id).await.unwrap();
    assert_eq!(history.len(), 1);
}

#[tokio::test]
async fn test_activation_without_user_account_is_not_found() {
    let system = DeliverySystem::new(&DeskConfig::default());
    let id = system
        .rider_client
        .register_rider(RiderCreate {
            name: "Ghost".to_string(),
            email: "ghost@x.com".to_string(),
            district: "Dhaka".to_string(),
        })
        .await
        .unwrap();

    let err = system
        .rider_client
        .set_rider_status(id, RiderStatus::Active)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let rider = system.rider_client.fetch(id).await.unwrap();
    assert_eq!(rider.status, RiderStatus::Pending);
}

#[tokio::test]
async fn test_busy_rider_cannot_be_deactivated() {
    let system = DeliverySystem::new(&DeskConfig::default());
    let rider_id = active_rider(&system, RIDER, "Dhaka").await;
    let parcel_id = new_parcel(&system, "Chair").await;
    system
        .parcel_client
        .assign_rider(parcel_id, rider_id, ADMIN)
        .await
        .unwrap();

    let err = system
        .rider_client
        .set_rider_status(rider_id, RiderStatus::Rejected)
        .await
        .unwrap_err();
    assert_eq!(err, RiderError::Busy(rider_id));

    let err = system.parcel_client.delete(parcel_id).await.unwrap_err();
    assert!(matches!(err, ParcelError::Locked { .. }));
}

#[tokio::test]
async fn test_availability_by_district() {
    let system = DeliverySystem::new(&DeskConfig::default());
    let dhaka = active_rider(&system, RIDER, "Dhaka").await;
    active_rider(&system, "s@x.com", "Sylhet").await;

    let available = system.rider_client.list_available(" Dhaka ").await.unwrap();
    assert_eq!(available.iter().map(|r| r.id).collect::<Vec<_>>(), vec![dhaka]);

    let parcel_id = new_parcel(&system, "Fan").await;
    system
        .parcel_client
        .assign_rider(parcel_id, dhaka, ADMIN)
        .await
        .unwrap();
    assert!(system.rider_client.list_available("Dhaka").await.unwrap().is_empty());

    let active = system
        .rider_client
        .list_by_status(RiderStatus::Active)
        .await
        .unwrap();
    assert_eq!(active.len(), 2);
}

#[tokio::test]
async fn test_rider_groups_and_status_counts() {
    let system = DeliverySystem::new(&DeskConfig::default());
    assert!(system.parcel_client.status_counts().await.unwrap().is_empty());

    let rider_id = active_rider(&system, RIDER, "Dhaka").await;
    let done = new_parcel(&system, "Done").await;
    system.parcel_client.assign_rider(done, rider_id, ADMIN).await.unwrap();
    for status in [DeliveryStatus::InTransit, DeliveryStatus::ServiceCenterDelivered] {
        system
            .parcel_client
            .update_delivery_status(done, status, RIDER)
            .await
            .unwrap();
    }
    let open = new_parcel(&system, "Open").await;
    system.parcel_client.assign_rider(open, rider_id, ADMIN).await.unwrap();
    new_parcel(&system, "Waiting").await;

    let pending = system
        .parcel_client
        .list_for_rider(RIDER, RiderParcelGroup::Pending)
        .await
        .unwrap();
    assert_eq!(pending.iter().map(|p| p.id).collect::<Vec<_>>(), vec![open]);

    let completed = system
        .parcel_client
        .list_for_rider("R@X.com", RiderParcelGroup::Completed)
        .await
        .unwrap();
    assert_eq!(completed.iter().map(|p| p.id).collect::<Vec<_>>(), vec![done]);

    let counts = system.parcel_client.status_counts().await.unwrap();
    assert_eq!(
        counts,
        vec![
            (DeliveryStatus::Created, 1),
            (DeliveryStatus::RiderAssigned, 1),
            (DeliveryStatus::ServiceCenterDelivered, 1),
        ]
    );
    assert_eq!(counts.iter().map(|(_, n)| n).sum::<usize>(), 3);
}

#[tokio::test]
async fn test_filters_combine() {
    let system = DeliverySystem::new(&DeskConfig::default());
    let first = new_parcel(&system, "One").await;
    let second = new_parcel(&system, "Two").await;
    system
        .payment_client
        .record_payment(payment(second, "txn_9"))
        .await
        .unwrap();

    let mine = system
        .parcel_client
        .list_by_filters(ParcelFilter {
            created_by: Some(CUSTOMER.to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(mine.iter().map(|p| p.id).collect::<Vec<_>>(), vec![second, first]);

    let unpaid = system
        .parcel_client
        .list_by_filters(ParcelFilter {
            created_by: Some(CUSTOMER.to_string()),
            payment_status: Some(PaymentStatus::Unpaid),
            delivery_status: Some(DeliveryStatus::Created),
        })
        .await
        .unwrap();
    assert_eq!(unpaid.iter().map(|p| p.id).collect::<Vec<_>>(), vec![first]);

    let theirs = system
        .parcel_client
        .list_by_filters(ParcelFilter {
            created_by: Some("b@x.com".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(theirs.is_empty());
}

#[tokio::test]
async fn test_payment_for_missing_parcel_is_conflict() {
    let system = DeliverySystem::new(&DeskConfig::default());
    let err = system
        .payment_client
        .record_payment(payment(ParcelId(42), "txn_1"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        PaymentError::Conflict("parcel_42 not found or already paid".to_string())
    );
    assert!(system.payment_client.history(None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_guard_checks_roles_and_ownership() {
    let system = DeliverySystem::new(&DeskConfig::default());
    let admin = system.user_client.upsert_on_login(ADMIN).await.unwrap();
    system.user_client.set_role(admin.id, Role::Admin).await.unwrap();
    system.user_client.upsert_on_login(CUSTOMER).await.unwrap();

    system
        .guard
        .authorize(ADMIN, Role::Admin, Resource::Any)
        .await
        .unwrap();
    system
        .guard
        .authorize(CUSTOMER, Role::User, Resource::OwnedBy(CUSTOMER))
        .await
        .unwrap();

    let err = system
        .guard
        .authorize(CUSTOMER, Role::Admin, Resource::Any)
        .await
        .unwrap_err();
    assert!(matches!(err, DeliveryError::Forbidden(_)));

    let err = system
        .guard
        .authorize("stranger@x.com", Role::User, Resource::Any)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Forbidden);
}

#[tokio::test]
async fn test_users_and_roles() {
    let system = DeliverySystem::new(&DeskConfig::default());
    let first = system.user_client.upsert_on_login(" Alice@X.com ").await.unwrap();
    let again = system.user_client.upsert_on_login("alice@x.com").await.unwrap();
    assert_eq!(first.id, again.id);
    assert!(again.last_log_in >= first.last_log_in);
    assert_eq!(first.role, Role::User);

    system.user_client.upsert_on_login("bob@y.com").await.unwrap();
    assert_eq!(system.user_client.list_users().await.unwrap().len(), 2);
    let found = system.user_client.search("ALICE").await.unwrap();
    assert_eq!(found.iter().map(|u| u.id).collect::<Vec<_>>(), vec![first.id]);

    let err = "superuser".parse::<Role>().map_err(parcel_desk::user_actor::UserError::from);
    assert_eq!(err.unwrap_err().kind(), ErrorKind::Conflict);

    let err = system.user_client.get_role("nobody@x.com").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn test_tracking_and_payments_are_immutable() {
    let system = DeliverySystem::new(&DeskConfig::default());
    let parcel_id = new_parcel(&system, "Vase").await;
    let record = system
        .payment_client
        .record_payment(payment(parcel_id, "txn_1"))
        .await
        .unwrap();
    assert_eq!(
        system.payment_client.delete(record.id).await.unwrap_err(),
        PaymentError::Immutable
    );

    let parcel = system.parcel_client.fetch(parcel_id).await.unwrap();
    let history = system.tracking_client.history(&parcel.tracking_id).await.unwrap();
    let err = system.tracking_client.delete(history[0].id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[tokio::test]
async fn test_missing_events_and_records_are_not_found() {
    let system = DeliverySystem::new(&DeskConfig::default());

    let err = system
        .tracking_client
        .fetch(TrackingEventId(99))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = system
        .tracking_client
        .delete(TrackingEventId(99))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = system.payment_client.fetch(PaymentId(99)).await.unwrap_err();
    assert_eq!(err, PaymentError::NotFound("payment_99".into()));
    let err = system.payment_client.delete(PaymentId(99)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_supplied_tracking_id_cannot_take_an_issued_one() {
    let system = DeliverySystem::new(&DeskConfig::default());
    let create = |tracking_id: Option<&str>| ParcelCreate {
        created_by: CUSTOMER.to_string(),
        title: "Lamp".to_string(),
        cost: dec!(90),
        tracking_id: tracking_id.map(str::to_string),
    };

    let err = system
        .parcel_client
        .create_parcel(create(Some("TRK-000002")))
        .await
        .unwrap_err();
    assert!(matches!(err, ParcelError::ValidationError(_)));
    assert_eq!(err.kind(), ErrorKind::Validation);

    let own = system
        .parcel_client
        .create_parcel(create(Some("ACME-000002")))
        .await
        .unwrap();
    for _ in 0..3 {
        system.parcel_client.create_parcel(create(None)).await.unwrap();
    }
    let own = system.parcel_client.fetch(own).await.unwrap();
    assert_eq!(own.tracking_id, "ACME-000002");
    let issued = system.parcel_client.fetch(ParcelId(2)).await.unwrap();
    assert_eq!(issued.tracking_id, "TRK-000002");

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rider_holding_two_parcels_stays_busy_until_both_finish() {
    let system = DeliverySystem::new(&DeskConfig::default());
    let rider_id = active_rider(&system, RIDER, "Dhaka").await;
    let first = new_parcel(&system, "Kettle").await;
    let second = new_parcel(&system, "Toaster").await;
    for parcel_id in [first, second] {
        system
            .parcel_client
            .assign_rider(parcel_id, rider_id, ADMIN)
            .await
            .unwrap();
    }
    assert_eq!(system.rider_client.fetch(rider_id).await.unwrap().held_parcels, 2);

    for status in [DeliveryStatus::InTransit, DeliveryStatus::Delivered] {
        system
            .parcel_client
            .update_delivery_status(first, status, RIDER)
            .await
            .unwrap();
    }
    let rider = system.rider_client.fetch(rider_id).await.unwrap();
    assert_eq!(rider.work_status, WorkStatus::InDelivery);
    assert_eq!(rider.held_parcels, 1);
    assert!(system.rider_client.list_available("Dhaka").await.unwrap().is_empty());

    let err = system
        .rider_client
        .set_rider_status(rider_id, RiderStatus::Rejected)
        .await
        .unwrap_err();
    assert_eq!(err, RiderError::Busy(rider_id));

    for status in [DeliveryStatus::InTransit, DeliveryStatus::ServiceCenterDelivered] {
        system
            .parcel_client
            .update_delivery_status(second, status, RIDER)
            .await
            .unwrap();
    }
    let rider = system.rider_client.fetch(rider_id).await.unwrap();
    assert_eq!(rider.work_status, WorkStatus::Available);
    assert_eq!(rider.held_parcels, 0);
    assert_eq!(
        system.rider_client.list_available("Dhaka").await.unwrap().len(),
        1
    );

    system.shutdown().await.unwrap();
}
