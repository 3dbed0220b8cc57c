use serde::{Deserialize, Serialize};

use crate::db_types::{Booking, Notification, Payment};

/// Published for every notification row the engine stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationCreatedEvent {
    pub notification: Notification,
}

impl NotificationCreatedEvent {
    pub fn new(notification: Notification) -> Self {
        Self { notification }
    }
}

/// Published once a captured payment has been turned into bookings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentCapturedEvent {
    pub payment: Payment,
    pub bookings: Vec<Booking>,
}

impl PaymentCapturedEvent {
    pub fn new(payment: Payment, bookings: Vec<Booking>) -> Self {
        Self { payment, bookings }
    }
}
