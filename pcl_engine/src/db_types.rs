use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use pcl_common::Paise;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{types::Json, FromRow, Type};
use thiserror::Error;

const IST_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

#[derive(Debug, Clone, Error)]
#[error("Conversion error: {0}")]
pub struct ConversionError(pub String);

/// Declares a status-style enum that is stored as lowercase TEXT and serialized with the same text on the wire.
macro_rules! text_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Type, Serialize, Deserialize)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[sqlx(rename = $text)]
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ConversionError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(ConversionError(format!("Invalid {}: {other}", stringify!($name)))),
                }
            }
        }
    };
}

//--------------------------------------      UserId       -----------------------------------------------------------
/// The identifier the identity provider assigns to an authenticated user. It is used as the primary key of `users`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<S: Into<String>> From<S> for UserId {
    fn from(value: S) -> Self {
        Self(value.into())
    }
}

//--------------------------------------     Enumerations     --------------------------------------------------------
text_enum!(
    /// The role a user signs up with. `Admin` passes every access check.
    UserRole {
        Player => "player",
        ClubOwner => "club_owner",
        Referee => "referee",
        Staff => "staff",
        StadiumOwner => "stadium_owner",
        Admin => "admin",
    }
);

impl UserRole {
    /// The url slug used by the web client for this role.
    pub fn slug(&self) -> &'static str {
        match self {
            UserRole::Player => "player",
            UserRole::ClubOwner => "club-owner",
            UserRole::Referee => "referee",
            UserRole::Staff => "staff",
            UserRole::StadiumOwner => "stadium-owner",
            UserRole::Admin => "admin",
        }
    }

    pub fn dashboard_path(&self) -> String {
        format!("/dashboard/{}", self.slug())
    }

    pub fn onboarding_path(&self) -> String {
        format!("/onboarding/{}", self.slug())
    }
}

text_enum!(KycStatus { Pending => "pending", Verified => "verified", Rejected => "rejected" });

text_enum!(ContractStatus {
    Pending => "pending",
    Active => "active",
    Terminated => "terminated",
    Amended => "amended",
    Rejected => "rejected",
});

text_enum!(MatchFormat {
    Friendly => "friendly",
    FiveASide => "5-a-side",
    SevenASide => "7-a-side",
    ElevenASide => "11-a-side",
});

text_enum!(MatchStatus {
    Pending => "pending",
    Scheduled => "scheduled",
    Ongoing => "ongoing",
    Completed => "completed",
    Cancelled => "cancelled",
});

impl MatchStatus {
    /// Only matches that have not kicked off may be cancelled.
    pub fn is_cancellable(&self) -> bool {
        matches!(self, MatchStatus::Pending | MatchStatus::Scheduled)
    }
}

text_enum!(MatchPaymentStatus { Unpaid => "unpaid", Paid => "paid", Refunded => "refunded" });

text_enum!(PaymentStatus {
    Pending => "pending",
    Completed => "completed",
    Failed => "failed",
    Refunded => "refunded",
});

text_enum!(RefundStatus { Partial => "partial", Full => "full" });

text_enum!(BookingType { Stadium => "stadium", Referee => "referee", Staff => "staff" });

text_enum!(BookingStatus { Confirmed => "confirmed", Cancelled => "cancelled" });

text_enum!(AadhaarRequestStatus { Pending => "pending", Verified => "verified", Expired => "expired" });

text_enum!(BankVerificationStatus {
    Pending => "pending",
    Verified => "verified",
    Failed => "failed",
    PendingReview => "pending_review",
});

text_enum!(DocumentVerificationStatus { PendingReview => "pending_review", DocumentsVerified => "documents_verified" });

text_enum!(ClubStatus { PendingReview => "pending_review", Active => "active" });

//--------------------------------------        User          --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub role: UserRole,
    pub kyc_status: KycStatus,
    pub kyc_verified_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing)]
    pub aadhaar_number: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// The name to compare against identity documents: `full_name`, or the first and last names joined.
    pub fn display_name(&self) -> Option<String> {
        if let Some(name) = self.full_name.as_ref().filter(|s| !s.trim().is_empty()) {
            return Some(name.clone());
        }
        let parts = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();
        (!parts.is_empty()).then(|| parts.join(" "))
    }

    pub fn is_kyc_verified(&self) -> bool {
        self.kyc_status == KycStatus::Verified
    }
}

/// The fields a user may set on their own profile. The id and role come from the access token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub id: UserId,
    pub role: UserRole,
    pub profile: UserProfile,
}

//--------------------------------------        Club          --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Club {
    pub id: i64,
    pub owner_id: UserId,
    pub club_name: String,
    pub club_type: Option<String>,
    pub registration_number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
    pub kyc_verified: bool,
    pub status: ClubStatus,
    pub document_verification_status: Option<DocumentVerificationStatus>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Club {
    /// A club counts as registered when it says so and carries a registration number.
    pub fn is_registered(&self) -> bool {
        self.club_type.as_deref() == Some("Registered") &&
            self.registration_number.as_deref().is_some_and(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewClub {
    pub club_name: String,
    pub club_type: Option<String>,
    pub registration_number: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub district: Option<String>,
    pub country: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub description: Option<String>,
}

//--------------------------------------     Team / Squad     --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Team {
    pub id: i64,
    pub club_id: i64,
    pub team_name: String,
    pub formation: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewTeam {
    pub team_name: String,
    pub formation: Option<String>,
}

//--------------------------------------       Player         --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Player {
    pub id: i64,
    pub user_id: UserId,
    pub unique_player_id: String,
    pub position: Option<String>,
    pub jersey_number: Option<i64>,
    pub date_of_birth: Option<String>,
    pub nationality: Option<String>,
    pub address: Option<String>,
    pub district: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub current_club_id: Option<i64>,
    pub is_available_for_scout: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerProfile {
    pub position: Option<String>,
    pub jersey_number: Option<i64>,
    pub date_of_birth: Option<String>,
    pub nationality: Option<String>,
}

//--------------------------------------   Referee / Staff    --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Referee {
    pub id: i64,
    pub user_id: UserId,
    pub unique_referee_id: String,
    pub certification_level: Option<String>,
    pub experience_years: i64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RefereeProfile {
    pub certification_level: Option<String>,
    #[serde(default)]
    pub experience_years: i64,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Staff {
    pub id: i64,
    pub user_id: UserId,
    pub unique_staff_id: String,
    pub role_type: Option<String>,
    pub experience_years: i64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StaffProfile {
    pub role_type: Option<String>,
    #[serde(default)]
    pub experience_years: i64,
}

//--------------------------------------  Stadium / Tournament --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Stadium {
    pub id: i64,
    pub owner_id: UserId,
    pub stadium_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub capacity: Option<i64>,
    pub hourly_rate: Option<Paise>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewStadium {
    pub stadium_name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub capacity: Option<i64>,
    pub hourly_rate: Option<Paise>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Tournament {
    pub id: i64,
    pub organizer_id: UserId,
    pub tournament_name: String,
    pub match_format: MatchFormat,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_teams: Option<i64>,
    pub entry_fee: Option<Paise>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTournament {
    pub tournament_name: String,
    pub match_format: MatchFormat,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub max_teams: Option<i64>,
    pub entry_fee: Option<Paise>,
}

//--------------------------------------        Match         --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Match {
    pub id: i64,
    pub tournament_id: Option<i64>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub match_format: MatchFormat,
    pub match_date: NaiveDate,
    pub match_time: Option<String>,
    pub stadium_id: Option<i64>,
    pub referee_user_id: Option<UserId>,
    pub status: MatchStatus,
    pub payment_status: MatchPaymentStatus,
    pub payment_id: Option<i64>,
    pub created_by: UserId,
    pub canceled_at: Option<DateTime<Utc>>,
    pub canceled_by: Option<UserId>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Match {
    /// Kick-off time. Match dates and times are local Indian Standard Time (UTC+05:30). A missing or unparseable time
    /// is treated as midnight.
    pub fn kickoff(&self) -> Option<DateTime<Utc>> {
        let midnight = NaiveTime::from_hms_opt(0, 0, 0)?;
        let time = self
            .match_time
            .as_deref()
            .and_then(|t| {
                NaiveTime::parse_from_str(t, "%H:%M:%S").or_else(|_| NaiveTime::parse_from_str(t, "%H:%M")).ok()
            })
            .unwrap_or(midnight);
        let ist = FixedOffset::east_opt(IST_OFFSET_SECONDS)?;
        ist.from_local_datetime(&self.match_date.and_time(time)).single().map(|dt| dt.with_timezone(&Utc))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMatch {
    pub tournament_id: Option<i64>,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub match_format: MatchFormat,
    pub match_date: NaiveDate,
    pub match_time: Option<String>,
    pub stadium_id: Option<i64>,
    pub referee_user_id: Option<UserId>,
    #[serde(default)]
    pub staff_user_ids: Vec<UserId>,
}

/// Everyone with a stake in a match: the teams' club owners, the stadium owner and the squad players of both teams.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchParties {
    pub home_club_id: i64,
    pub away_club_id: i64,
    pub home_owner_id: Option<UserId>,
    pub away_owner_id: Option<UserId>,
    pub home_team_name: String,
    pub away_team_name: String,
    pub stadium_owner_id: Option<UserId>,
    pub stadium_name: Option<String>,
    pub squad_user_ids: Vec<UserId>,
    pub staff_user_ids: Vec<UserId>,
}

//--------------------------------------      Contract        --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Contract {
    pub id: i64,
    pub player_id: i64,
    pub club_id: i64,
    pub status: ContractStatus,
    pub contract_start_date: NaiveDate,
    pub contract_end_date: NaiveDate,
    pub salary_monthly: Option<Paise>,
    pub position_assigned: Option<String>,
    pub jersey_number: Option<i64>,
    pub terms_conditions: Option<String>,
    pub created_by: UserId,
    pub signing_status: Option<String>,
    pub player_signature_timestamp: Option<DateTime<Utc>>,
    pub player_signature_data: Option<String>,
    pub read_by_player: bool,
    pub player_read_at: Option<DateTime<Utc>>,
    pub terminated_at: Option<DateTime<Utc>>,
    pub terminated_by: Option<UserId>,
    pub termination_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewContract {
    pub player_id: i64,
    pub club_id: i64,
    pub contract_start_date: NaiveDate,
    pub contract_end_date: NaiveDate,
    pub salary_monthly: Option<Paise>,
    pub position_assigned: Option<String>,
    pub jersey_number: Option<i64>,
    pub terms_conditions: Option<String>,
}

/// The people on either side of a contract.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct ContractParties {
    pub player_user_id: UserId,
    pub player_name: Option<String>,
    pub club_owner_id: UserId,
    pub club_name: String,
}

//--------------------------------------    Notifications     --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Notification {
    pub id: i64,
    pub user_id: UserId,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub contract_id: Option<i64>,
    pub match_id: Option<i64>,
    pub action_url: Option<String>,
    pub is_read: bool,
    pub read_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewNotification {
    pub user_id: UserId,
    pub notification_type: String,
    pub title: String,
    pub message: String,
    pub contract_id: Option<i64>,
    pub match_id: Option<i64>,
    pub action_url: Option<String>,
}

impl NewNotification {
    pub fn new(user_id: UserId, notification_type: &str, title: &str, message: String) -> Self {
        Self {
            user_id,
            notification_type: notification_type.to_string(),
            title: title.to_string(),
            message,
            contract_id: None,
            match_id: None,
            action_url: None,
        }
    }

    pub fn for_match(mut self, match_id: i64) -> Self {
        self.match_id = Some(match_id);
        self
    }

    pub fn for_contract(mut self, contract_id: i64) -> Self {
        self.contract_id = Some(contract_id);
        self
    }

    pub fn with_action_url<S: Into<String>>(mut self, url: S) -> Self {
        self.action_url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PushToken {
    pub id: i64,
    pub user_id: UserId,
    pub token: String,
    pub platform: Option<String>,
    pub is_active: bool,
    pub last_used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------       Payment        --------------------------------------------------------
/// The per-category split of a match payment. Commission is withheld by the league from each category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountBreakdown {
    pub stadium: Paise,
    pub stadium_commission: Paise,
    pub referee: Paise,
    pub referee_commission: Paise,
    pub staff: Paise,
    pub staff_commission: Paise,
}

impl AmountBreakdown {
    pub fn total_commission(&self) -> Paise {
        self.stadium_commission + self.referee_commission + self.staff_commission
    }
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub razorpay_order_id: String,
    pub razorpay_payment_id: Option<String>,
    pub match_id: Option<i64>,
    pub club_id: Option<i64>,
    pub amount: Paise,
    pub currency: String,
    pub status: PaymentStatus,
    pub stadium: Paise,
    pub stadium_commission: Paise,
    pub referee: Paise,
    pub referee_commission: Paise,
    pub staff: Paise,
    pub staff_commission: Paise,
    pub payment_method: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
    pub refund_status: Option<RefundStatus>,
    pub refunded_amount: Paise,
    pub refunded_at: Option<DateTime<Utc>>,
    pub notes: Option<Json<Value>>,
    pub webhook_received: bool,
    pub webhook_data: Option<Json<Value>>,
    pub webhook_received_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Payment {
    pub fn breakdown(&self) -> AmountBreakdown {
        AmountBreakdown {
            stadium: self.stadium,
            stadium_commission: self.stadium_commission,
            referee: self.referee,
            referee_commission: self.referee_commission,
            staff: self.staff,
            staff_commission: self.staff_commission,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPayment {
    pub razorpay_order_id: String,
    pub match_id: Option<i64>,
    pub club_id: Option<i64>,
    pub amount: Paise,
    pub currency: String,
    pub breakdown: AmountBreakdown,
    pub notes: Option<Value>,
}

/// A `payment.captured` event from the payment gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedPayment {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub amount: Paise,
    pub method: Option<String>,
    pub webhook_data: Value,
}

/// A `payment.failed` event from the payment gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct FailedPayment {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: Option<String>,
    pub error_code: Option<String>,
    pub error_description: Option<String>,
    pub webhook_data: Value,
}

/// A `refund.processed` event from the payment gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedRefund {
    pub razorpay_refund_id: String,
    pub razorpay_payment_id: String,
    pub amount: Paise,
    pub webhook_data: Value,
}

//--------------------------------------   Bookings / Payouts --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub payment_id: i64,
    pub match_id: i64,
    pub booking_type: BookingType,
    pub resource_id: UserId,
    pub amount: Paise,
    pub commission: Paise,
    pub net_payout: Paise,
    pub status: BookingStatus,
    pub confirmed_at: Option<DateTime<Utc>>,
    pub refund_processed: bool,
    pub refund_amount: Option<Paise>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub booking_type: BookingType,
    pub resource_id: UserId,
    pub amount: Paise,
    pub commission: Paise,
}

impl NewBooking {
    pub fn net_payout(&self) -> Paise {
        self.amount - self.commission
    }
}

/// An amount owed to a payee, accumulated into their monthly payout summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayoutCredit {
    pub user_id: UserId,
    pub role: UserRole,
    pub amount: Paise,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PayoutSummary {
    pub id: i64,
    pub user_id: UserId,
    pub user_role: UserRole,
    pub payout_period_start: NaiveDate,
    pub payout_period_end: NaiveDate,
    pub total_pending_amount: Paise,
    pub total_pending_count: i64,
    pub last_updated: DateTime<Utc>,
}

//--------------------------------------         KYC          --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct AadhaarRequest {
    pub id: i64,
    pub user_id: UserId,
    pub club_id: Option<i64>,
    pub request_id: String,
    #[serde(skip_serializing)]
    pub aadhaar_number: String,
    pub status: AadhaarRequestStatus,
    pub created_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAadhaarRequest {
    pub user_id: UserId,
    pub club_id: Option<i64>,
    pub request_id: String,
    pub aadhaar_number: String,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct KycDocument {
    pub id: i64,
    pub user_id: UserId,
    pub club_id: Option<i64>,
    pub document_type: String,
    pub verification_status: String,
    pub verified_data: Option<Json<Value>>,
    pub document_status: Option<String>,
    pub documents_uploaded: Option<Json<Value>>,
    pub documents_upload_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A document that has been stored in the object store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedDocument {
    pub file_name: String,
    pub path: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct PayoutAccount {
    pub id: i64,
    pub user_id: UserId,
    pub account_number: String,
    pub ifsc_code: String,
    pub account_holder: String,
    pub verification_status: BankVerificationStatus,
    pub verification_method: Option<String>,
    pub verification_id: Option<String>,
    pub verification_details: Option<Json<Value>>,
    pub verified_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPayoutAccount {
    pub account_number: String,
    pub ifsc_code: String,
    pub account_holder: String,
}

impl NewPayoutAccount {
    /// Trims every field and upper-cases the IFSC code.
    pub fn normalized(self) -> Self {
        Self {
            account_number: self.account_number.trim().to_string(),
            ifsc_code: self.ifsc_code.trim().to_uppercase(),
            account_holder: self.account_holder.trim().to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !(self.account_number.trim().is_empty() ||
            self.ifsc_code.trim().is_empty() ||
            self.account_holder.trim().is_empty())
    }
}

/// The outcome of a bank account verification attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct BankVerificationRecord {
    pub status: BankVerificationStatus,
    pub verification_id: Option<String>,
    pub details: Value,
}

//--------------------------------------       Contact        --------------------------------------------------------
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub status: String,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewContactSubmission {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}
