use serde_json::Value;

use crate::{
    db_types::{Booking, Notification, Payment, UserId},
    helpers::AadhaarAddress,
};

/// The records written when a captured payment is processed.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureResult {
    pub payment: Payment,
    pub bookings: Vec<Booking>,
    pub notifications: Vec<Notification>,
    /// The payment had already been captured by an earlier delivery of the same webhook.
    pub redelivered: bool,
}

/// A verified Aadhaar identity, ready to be stored against a user (and optionally their club).
#[derive(Debug, Clone, PartialEq)]
pub struct AadhaarVerification {
    pub user_id: UserId,
    pub request_id: String,
    pub aadhaar_number: String,
    /// Set for club owners verifying on behalf of their club.
    pub club_id: Option<i64>,
    /// Players also get their player profile updated and made visible to scouts.
    pub update_player: bool,
    pub name: Option<String>,
    pub date_of_birth: Option<String>,
    pub address: AadhaarAddress,
    pub verified_data: Value,
}
