mod helpers;
mod mocks;

mod accounts;
mod admin;
mod kyc;
mod notifications;
mod payments;
mod webhooks;
