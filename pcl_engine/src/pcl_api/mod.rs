//! # PCL engine public API
//!
//! The `pcl_api` module exposes the programmatic API of the league engine. Each API covers one area of the league
//! and is built on top of the backend traits it needs, so clients can pick the parts they use.
//!
//! * [`accounts_api`] looks up users and routes them to their dashboard.
//! * [`league_api`] covers clubs, teams, profiles, stadiums, tournaments and the contact form.
//! * [`payment_flow_api`] creates payment gateway orders and applies the gateway's webhooks.
//! * [`kyc_api`] handles Aadhaar verification, club documents and payout bank accounts.
//! * [`match_api`] and [`contract_api`] manage fixtures and player contracts.
//! * [`notification_api`] serves in-app notifications and fans push messages out to devices.
//!
//! APIs that talk to a third-party service take the vendor client as a method argument (`&impl PaymentProvider`,
//! `&impl IdentityVerifier` and so on), so that the same API instance works against real and mocked vendors.
//!
//! # API usage
//!
//! ```rust,ignore
//! use pcl_engine::{LeagueApi, SqliteDatabase};
//! let db = SqliteDatabase::new_with_url("sqlite://data/pcl_store.db", 5).await?;
//! // SqliteDatabase implements LeagueManagement
//! let api = LeagueApi::new(db);
//! let clubs = api.clubs().await?;
//! ```
pub mod accounts_api;
pub mod contract_api;
pub mod kyc_api;
pub mod kyc_objects;
pub mod league_api;
pub mod match_api;
pub mod notification_api;
pub mod payment_flow_api;
pub mod payment_objects;
