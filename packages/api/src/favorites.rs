//! # Favorites — the association rules between a user and people/planets
//!
//! Every function takes the acting [`User`] explicitly; resolving who that is belongs to
//! the HTTP layer ([`crate::routes::CurrentUser`]).
//!
//! - A favorite can only point at an existing record: [`ApiError::NotFound`] otherwise.
//! - A `(user, target)` pair exists at most once. The store enforces this on insert, and
//!   a rejected insert surfaces as [`ApiError::AlreadyExists`].
//! - Removing a pair that is not there is [`ApiError::NotFound`].
//! - Listing returns favorite people first, then favorite planets, each in the order
//!   they were added.

use crate::error::{ApiError, ApiResult};
use crate::models::{FavPeople, FavPlanet, Favorite, User};
use crate::store::Store;

/// Map an insert failure. A foreign-key violation means the target was deleted after
/// the existence check, which is reported the same way as a missing target.
fn insert_error(err: sqlx::Error, not_found: impl FnOnce() -> ApiError) -> ApiError {
    match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => not_found(),
        _ => ApiError::Database(err),
    }
}

/// All favorites of `user`, resolved to their records.
pub async fn list(store: &dyn Store, user: &User) -> ApiResult<Vec<Favorite>> {
    let people = store.favorite_people(user.id).await?;
    let planets = store.favorite_planets(user.id).await?;

    Ok(people
        .into_iter()
        .map(Favorite::People)
        .chain(planets.into_iter().map(Favorite::Planet))
        .collect())
}

pub async fn add_people(store: &dyn Store, user: &User, people_id: i32) -> ApiResult<FavPeople> {
    let not_found = || ApiError::NotFound(format!("People {people_id} not found"));

    if store.get_people(people_id).await?.is_none() {
        return Err(not_found());
    }

    let fav = store
        .insert_fav_people(user.id, people_id)
        .await
        .map_err(|e| insert_error(e, not_found))?
        .ok_or_else(|| {
            ApiError::AlreadyExists(format!(
                "People {people_id} already exists in favorite people of user {}",
                user.id
            ))
        })?;

    tracing::info!(user_id = user.id, people_id, "favorite people added");
    Ok(fav)
}

pub async fn add_planet(store: &dyn Store, user: &User, planet_id: i32) -> ApiResult<FavPlanet> {
    let not_found = || ApiError::NotFound(format!("Planet {planet_id} not found"));

    if store.get_planet(planet_id).await?.is_none() {
        return Err(not_found());
    }

    let fav = store
        .insert_fav_planet(user.id, planet_id)
        .await
        .map_err(|e| insert_error(e, not_found))?
        .ok_or_else(|| {
            ApiError::AlreadyExists(format!(
                "Planet {planet_id} already exists in favorite planets of user {}",
                user.id
            ))
        })?;

    tracing::info!(user_id = user.id, planet_id, "favorite planet added");
    Ok(fav)
}

pub async fn remove_people(store: &dyn Store, user: &User, people_id: i32) -> ApiResult<()> {
    if store.get_people(people_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("People {people_id} not found")));
    }
    if !store.delete_fav_people(user.id, people_id).await? {
        return Err(ApiError::NotFound("favorite not found".into()));
    }

    tracing::info!(user_id = user.id, people_id, "favorite people deleted");
    Ok(())
}

pub async fn remove_planet(store: &dyn Store, user: &User, planet_id: i32) -> ApiResult<()> {
    if store.get_planet(planet_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("Planet {planet_id} not found")));
    }
    if !store.delete_fav_planet(user.id, planet_id).await? {
        return Err(ApiError::NotFound("favorite not found".into()));
    }

    tracing::info!(user_id = user.id, planet_id, "favorite planet deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{People, Planet};
    use crate::store::MemoryStore;

    async fn seeded() -> (MemoryStore, User) {
        let store = MemoryStore::new();
        let user = store.insert_user("luke@rebellion.org", "x-wing", true);
        store
            .insert_people(&People {
                id: 3,
                name: "R2-D2".into(),
                gender: None,
                haircolor: None,
                eyescolor: Some("red".into()),
            })
            .await
            .unwrap();
        store
            .insert_planet(&Planet {
                id: 5,
                name: "Tatooine".into(),
                population: Some(200_000),
                terrain: Some("desert".into()),
            })
            .await
            .unwrap();
        (store, user)
    }

    #[tokio::test]
    async fn test_list_orders_people_before_planets() {
        let (store, user) = seeded().await;

        add_planet(&store, &user, 5).await.unwrap();
        add_people(&store, &user, 3).await.unwrap();

        let favorites = list(&store, &user).await.unwrap();
        assert_eq!(favorites.len(), 2);
        assert!(matches!(&favorites[0], Favorite::People(p) if p.id == 3));
        assert!(matches!(&favorites[1], Favorite::Planet(p) if p.id == 5));
    }

    #[tokio::test]
    async fn test_add_twice_is_rejected() {
        let (store, user) = seeded().await;

        let fav = add_planet(&store, &user, 5).await.unwrap();
        assert_eq!((fav.id_user, fav.id_planet), (user.id, 5));

        let err = add_planet(&store, &user, 5).await.unwrap_err();
        assert!(matches!(err, ApiError::AlreadyExists(_)));
        assert_eq!(store.favorite_counts(), (0, 1));
    }

    #[tokio::test]
    async fn test_add_missing_target() {
        let (store, user) = seeded().await;

        let err = add_people(&store, &user, 99).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(store.favorite_counts(), (0, 0));
    }

    #[tokio::test]
    async fn test_remove_favorite() {
        let (store, user) = seeded().await;

        let err = remove_people(&store, &user, 3).await.unwrap_err();
        assert_eq!(err.to_string(), "favorite not found");

        add_people(&store, &user, 3).await.unwrap();
        remove_people(&store, &user, 3).await.unwrap();
        assert!(list(&store, &user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_favorites_are_per_user() {
        let (store, luke) = seeded().await;
        let leia = store.insert_user("leia@alderaan.gov", "hope", true);

        add_planet(&store, &luke, 5).await.unwrap();
        add_planet(&store, &leia, 5).await.unwrap();
        remove_planet(&store, &luke, 5).await.unwrap();

        assert!(list(&store, &luke).await.unwrap().is_empty());
        assert_eq!(list(&store, &leia).await.unwrap().len(), 1);
    }

    #[derive(Debug, thiserror::Error)]
    #[error("constraint violated")]
    struct ConstraintError {
        foreign_key: bool,
    }

    impl sqlx::error::DatabaseError for ConstraintError {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn as_error(&self) -> &(dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn std::error::Error + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn std::error::Error + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            if self.foreign_key {
                sqlx::error::ErrorKind::ForeignKeyViolation
            } else {
                sqlx::error::ErrorKind::Other
            }
        }
    }

    fn constraint(foreign_key: bool) -> sqlx::Error {
        sqlx::Error::Database(Box::new(ConstraintError { foreign_key }))
    }

    #[test]
    fn test_insert_on_deleted_target_is_not_found() {
        let not_found = || ApiError::NotFound("Planet 5 not found".into());

        let err = insert_error(constraint(true), not_found);
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Planet 5 not found"));

        let err = insert_error(constraint(false), not_found);
        assert!(matches!(err, ApiError::Database(_)));

        let err = insert_error(sqlx::Error::PoolTimedOut, not_found);
        assert!(matches!(err, ApiError::Database(_)));
    }
}
