//! # Backend contracts
//!
//! This module defines the behaviour that database backends must expose in order to support the PCL league server,
//! along with the contracts for the third-party services it integrates with.
//!
//! * [`AccountManagement`] looks up users and the clubs they own. Most other traits build on it.
//! * [`LeagueManagement`] is CRUD over clubs, teams, profiles, stadiums and tournaments.
//! * [`PaymentGatewayDatabase`] records match payments and applies payment gateway webhooks.
//! * [`KycManagement`] stores identity verifications, club documents and payout accounts.
//! * [`MatchManagement`] and [`ContractManagement`] cover fixtures and player contracts.
//! * [`NotificationManagement`] stores in-app notifications and push tokens.
//!
//! The vendor-facing traits are [`PaymentProvider`], [`IdentityVerifier`], [`PushSender`] and [`ObjectStore`].
mod account_management;
mod contract_management;
mod data_objects;
mod integrations;
mod kyc_management;
mod league_management;
mod match_management;
mod notification_management;
mod payment_gateway_database;

pub use account_management::{AccountApiError, AccountManagement};
pub use contract_management::{ContractApiError, ContractManagement};
pub use data_objects::{AadhaarVerification, CaptureResult};
pub use integrations::{
    BankAccountCheck,
    GatewayOrder,
    GatewayOrderRequest,
    IdentityVerifier,
    IntegrationError,
    ObjectStore,
    PaymentProvider,
    PushMessage,
    PushSender,
};
pub use kyc_management::{KycApiError, KycManagement};
pub use league_management::{LeagueApiError, LeagueManagement};
pub use match_management::{MatchApiError, MatchManagement};
pub use notification_management::{NotificationApiError, NotificationManagement};
pub use payment_gateway_database::{PaymentGatewayDatabase, PaymentGatewayError};
