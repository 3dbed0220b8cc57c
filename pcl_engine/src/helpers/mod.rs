//! Pure business rules, free of any database access.
mod aadhaar;
mod ids;
pub mod notifications;
mod payments;
mod signatures;
mod validation;

pub use aadhaar::{
    bank_verification_status,
    extract_aadhaar_data,
    extract_request_id,
    is_valid_otp,
    mask_aadhaar,
    match_account_holder,
    names_match,
    normalize_aadhaar,
    normalize_dob,
    parse_aadhaar_address,
    split_full_name,
    AadhaarAddress,
    AadhaarData,
    NameMatchResult,
};
pub use ids::{generate_profile_id, new_player_id, new_referee_id, new_staff_id};
pub use payments::{
    calculate_payment_breakdown,
    calculate_refund_amount,
    payout_period,
    plan_bookings,
    plan_payout_credits,
    Payees,
    PaymentBreakdown,
    RefundQuote,
    COMMISSION_RATE,
};
pub use signatures::{hmac_sha256_hex, verify_hmac_sha256_hex, verify_payment_signature, verify_webhook_signature};
pub use validation::{is_blank, is_valid_email};
