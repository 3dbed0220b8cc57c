//! SQLite backend for the PCL league engine.
//!
//! [`SqliteDatabase`] implements every backend trait in [`crate::traits`]. The free functions in [`db`] do the actual
//! work and can be composed inside a single transaction.
mod sqlite_impl;

pub mod db;
pub use sqlite_impl::SqliteDatabase;
