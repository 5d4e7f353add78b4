//! # API crate — people, planets, users and their favorites over HTTP
//!
//! This crate holds everything the server binary serves: the data models, the storage
//! seam and its backends, the favorites rules, and the axum router.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`db`] | PostgreSQL pool, embedded migrations, and the SQL-backed [`PgStore`] |
//! | [`error`] | [`ApiError`], the one error type handlers return, rendered as `{"message", "status_code"}` |
//! | [`favorites`] | Adding, removing and listing a user's favorite people and planets |
//! | [`models`] | `User`/`UserInfo`, `People`, `Planet` and the two favorite join records |
//! | [`routes`] | The axum [`Router`](axum::Router), handlers, and the acting-user extractor |
//! | [`settings`] | Layered configuration (defaults, `config.toml`, environment) |
//! | [`store`] | The [`Store`] trait and the in-memory [`MemoryStore`] |

pub mod db;
pub mod error;
pub mod favorites;
pub mod models;
pub mod routes;
pub mod settings;
pub mod store;

pub use db::PgStore;
pub use error::{ApiError, ApiResult};
pub use routes::{router, AppState};
pub use settings::Settings;
pub use store::{MemoryStore, Store};
