//! # Database module — PostgreSQL pool and the SQL-backed store
//!
//! - [`connect`] opens a [`sqlx::PgPool`] sized from [`crate::settings::Database`].
//! - [`migrate`] applies the embedded migrations in `packages/api/migrations`
//!   (the five tables: `users`, `people`, `planet`, `fav_people`, `fav_planet`).
//! - [`PgStore`] implements [`crate::store::Store`] on top of the pool.
//!
//! All queries are built at runtime with `sqlx::query_as`, so compiling the crate never
//! needs a live database.

mod pool;
mod postgres;

pub use pool::{connect, migrate};
pub use postgres::PgStore;
