//! PCL Engine
//!
//! The PCL engine holds the business logic of the Professional Club League: clubs, players, matches, contracts,
//! match payments, identity verification and notifications. It knows nothing about HTTP.
//!
//! The library is divided into three main sections:
//! 1. The backend contracts ([`mod@traits`]) and their SQLite implementation. You should never need to touch the
//!    database directly. Instead, use the public API. The exception is the data types stored in the database. These
//!    are defined in the [`mod@db_types`] module and are public.
//! 2. Pure business rules in [`mod@helpers`]: payment splits, the refund policy, Aadhaar parsing and matching, and
//!    signature checks.
//! 3. The public API ([`mod@pcl_api`]). Each API wraps a backend and exposes the operations of one area of the
//!    league.
//!
//! The engine also publishes events when notifications are created and payments are captured. A small actor
//! framework in [`mod@events`] lets the server hook into them, for example to deliver push messages.
pub mod db_types;
pub mod events;
pub mod helpers;
pub mod pcl_api;
pub mod traits;

#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "sqlite")]
pub use sqlite::{db, SqliteDatabase};
pub use pcl_api::{
    accounts_api::{AccountApi, DashboardRoute},
    contract_api::ContractApi,
    kyc_api::KycApi,
    league_api::LeagueApi,
    match_api::MatchApi,
    notification_api::NotificationApi,
    payment_flow_api::PaymentFlowApi,
};
pub use traits::*;
