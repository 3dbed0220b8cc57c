use futures::future::BoxFuture;
use log::*;
use pcl_engine::{
    events::{EventHandlers, EventHooks, NotificationCreatedEvent, PaymentCapturedEvent},
    pcl_api::notification_api::PushRequest,
    NotificationApi,
    SqliteDatabase,
};

use crate::integrations::fcm::FcmClient;

/// Assigns the background event handlers of the server.
///
/// 1. NotificationCreatedEvent - Every in-app notification the engine stores is also sent as a push message to the
///    recipient's active devices. Failures are logged and never reach the request that created the notification.
/// 2. PaymentCapturedEvent - The bookings created for a captured payment are logged for the payout audit trail.
pub fn create_push_event_handlers(db: SqliteDatabase, fcm: FcmClient, buffer_size: usize) -> EventHandlers {
    let mut hooks = EventHooks::default();
    // --- On NotificationCreated Handler ---
    hooks.on_notification_created(move |ev| {
        let NotificationCreatedEvent { notification } = ev;
        if !fcm.is_configured() {
            return no_op();
        }
        let api = NotificationApi::new(db.clone());
        let fcm = fcm.clone();
        Box::pin(async move {
            let id = notification.id;
            match api.send_push(&fcm, PushRequest::for_notification(&notification)).await {
                Ok(report) => debug!(
                    "📲️ Notification #{id} pushed to {}. {} sent, {} failed",
                    notification.user_id, report.sent_count, report.error_count
                ),
                Err(e) => warn!("📲️ Could not push notification #{id} to {}. {e}", notification.user_id),
            }
        })
    });
    // --- On PaymentCaptured Handler ---
    hooks.on_payment_captured(move |ev| {
        let PaymentCapturedEvent { payment, bookings } = ev;
        if bookings.is_empty() {
            info!("💸️ Payment {} captured. It is not linked to a match, so no bookings were made.", payment.id);
            return no_op();
        }
        for booking in &bookings {
            info!(
                "💸️ Booking #{} confirmed for match {}: {} {} (net payout {})",
                booking.id, booking.match_id, booking.booking_type, booking.resource_id, booking.net_payout
            );
        }
        no_op()
    });
    EventHandlers::new(buffer_size, hooks)
}

fn no_op() -> BoxFuture<'static, ()> {
    Box::pin(async {})
}
