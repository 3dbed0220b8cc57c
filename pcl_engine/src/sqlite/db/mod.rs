//! # SQLite Database methods
//!
//! This module contains "low-level" SQLite database interactions.
//!
//! All these interaction are maintained by simple functions (rather than stateful structs) that accept a
//! `&mut SqliteConnection` argument. Callers can obtain a connection from a pool,
//! or create an atomic transaction as the need arises and call through to the functions without any other changes.
use std::env;

use log::info;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Error as SqlxError, Sqlite, SqlitePool};

pub mod clubs;
pub mod contact;
pub mod contracts;
pub mod kyc;
pub mod matches;
pub mod notifications;
pub mod payments;
pub mod profiles;
pub mod users;
pub mod venues;

const SQLITE_DB_URL: &str = "sqlite://data/pcl_store.db";

pub fn db_url() -> String {
    let result = env::var("PCL_DATABASE_URL").unwrap_or_else(|_| {
        info!("PCL_DATABASE_URL is not set. Using the default.");
        SQLITE_DB_URL.to_string()
    });
    info!("Using database URL: {result}");
    result
}

/// Opens a connection pool, creating the database file first if it does not exist yet.
pub async fn new_pool(url: &str, max_connections: u32) -> Result<SqlitePool, SqlxError> {
    if !Sqlite::database_exists(url).await? {
        info!("🗃️ Creating new database at {url}");
        Sqlite::create_database(url).await?;
    }
    let pool = SqlitePoolOptions::new().max_connections(max_connections).connect(url).await?;
    Ok(pool)
}
