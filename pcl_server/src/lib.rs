//! # PCL server
//! This crate hosts the HTTP server of the Professional Club League. It is responsible for:
//! * Authenticating callers with the access tokens issued by the identity provider.
//! * Exposing the league, payment, KYC, match, contract and notification APIs of `pcl_engine` over JSON.
//! * Receiving payment gateway webhooks and checking their signatures.
//! * Talking to the vendors: Razorpay, Cashfree, Firebase Cloud Messaging and object storage.
//! * Expiring stale Aadhaar OTP requests in the background.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! The server exposes the following routes:
//! * `/health`: A health check route that returns a 200 OK response.
//! * `/api/contact`: The public contact form.
//! * `/api/webhooks/razorpay`: The Razorpay webhook receiver. Requests must carry a valid `X-Razorpay-Signature`.
//! * `/api/...`: Everything else. Requests must carry a valid access token. See [routes](routes/index.html).

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod expiry_worker;
pub mod helpers;
pub mod integrations;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
