//! # Store — the persistence seam behind every handler
//!
//! Handlers never talk to SQL directly. All reads and writes go through the [`Store`]
//! trait, so the same routes run against PostgreSQL in production
//! ([`crate::db::PgStore`]) and against [`MemoryStore`] in tests.
//!
//! ## Write semantics
//!
//! | Method family | Returns | Meaning of the "empty" case |
//! |---------------|---------|-----------------------------|
//! | `insert_*` | `Option<T>` | `None` when the primary key or the `(user, target)` pair already exists. Nothing is written. |
//! | `update_*` | `Option<T>` | `None` when no row has that id. |
//! | `delete_*` | `bool` | `false` when no row matched. |
//!
//! Conflicts are detected by the insert itself (`ON CONFLICT DO NOTHING` in SQL), never by
//! a separate lookup, so two concurrent requests cannot both succeed.
//!
//! Deleting a person or planet also removes every favorite that points at it.

use async_trait::async_trait;

use crate::models::{FavPeople, FavPlanet, People, Planet, User};

mod memory;
pub use memory::MemoryStore;

pub type StoreResult<T> = Result<T, sqlx::Error>;

#[async_trait]
pub trait Store: Send + Sync {
    async fn list_people(&self) -> StoreResult<Vec<People>>;
    async fn get_people(&self, id: i32) -> StoreResult<Option<People>>;
    async fn insert_people(&self, people: &People) -> StoreResult<Option<People>>;
    async fn update_people(&self, people: &People) -> StoreResult<Option<People>>;
    async fn delete_people(&self, id: i32) -> StoreResult<bool>;

    async fn list_planets(&self) -> StoreResult<Vec<Planet>>;
    async fn get_planet(&self, id: i32) -> StoreResult<Option<Planet>>;
    async fn insert_planet(&self, planet: &Planet) -> StoreResult<Option<Planet>>;
    async fn update_planet(&self, planet: &Planet) -> StoreResult<Option<Planet>>;
    async fn delete_planet(&self, id: i32) -> StoreResult<bool>;

    async fn list_users(&self) -> StoreResult<Vec<User>>;
    async fn get_user(&self, id: i32) -> StoreResult<Option<User>>;
    /// Lowest-id user with `is_active` set.
    async fn first_active_user(&self) -> StoreResult<Option<User>>;

    /// People favorited by `user_id`, in favorite insertion order.
    async fn favorite_people(&self, user_id: i32) -> StoreResult<Vec<People>>;
    /// Planets favorited by `user_id`, in favorite insertion order.
    async fn favorite_planets(&self, user_id: i32) -> StoreResult<Vec<Planet>>;
    async fn insert_fav_people(&self, user_id: i32, people_id: i32) -> StoreResult<Option<FavPeople>>;
    async fn insert_fav_planet(&self, user_id: i32, planet_id: i32) -> StoreResult<Option<FavPlanet>>;
    async fn delete_fav_people(&self, user_id: i32, people_id: i32) -> StoreResult<bool>;
    async fn delete_fav_planet(&self, user_id: i32, planet_id: i32) -> StoreResult<bool>;
}
