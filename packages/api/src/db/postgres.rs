use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{FavPeople, FavPlanet, People, Planet, User};
use crate::store::{Store, StoreResult};

const PEOPLE_COLUMNS: &str = "id, name, gender, haircolor, eyescolor";
const PLANET_COLUMNS: &str = "id, name, population, terrain";
const USER_COLUMNS: &str = "id, email, password, is_active";

/// [`Store`] backed by PostgreSQL.
#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_people(&self) -> StoreResult<Vec<People>> {
        sqlx::query_as(&format!("SELECT {PEOPLE_COLUMNS} FROM people ORDER BY id"))
            .fetch_all(&self.pool)
            .await
    }

    async fn get_people(&self, id: i32) -> StoreResult<Option<People>> {
        sqlx::query_as(&format!("SELECT {PEOPLE_COLUMNS} FROM people WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert_people(&self, people: &People) -> StoreResult<Option<People>> {
        sqlx::query_as(&format!(
            "INSERT INTO people ({PEOPLE_COLUMNS}) VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (id) DO NOTHING
             RETURNING {PEOPLE_COLUMNS}"
        ))
        .bind(people.id)
        .bind(&people.name)
        .bind(&people.gender)
        .bind(&people.haircolor)
        .bind(&people.eyescolor)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_people(&self, people: &People) -> StoreResult<Option<People>> {
        sqlx::query_as(&format!(
            "UPDATE people SET name = $2, gender = $3, haircolor = $4, eyescolor = $5
             WHERE id = $1
             RETURNING {PEOPLE_COLUMNS}"
        ))
        .bind(people.id)
        .bind(&people.name)
        .bind(&people.gender)
        .bind(&people.haircolor)
        .bind(&people.eyescolor)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_people(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM people WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_planets(&self) -> StoreResult<Vec<Planet>> {
        sqlx::query_as(&format!("SELECT {PLANET_COLUMNS} FROM planet ORDER BY id"))
            .fetch_all(&self.pool)
            .await
    }

    async fn get_planet(&self, id: i32) -> StoreResult<Option<Planet>> {
        sqlx::query_as(&format!("SELECT {PLANET_COLUMNS} FROM planet WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert_planet(&self, planet: &Planet) -> StoreResult<Option<Planet>> {
        sqlx::query_as(&format!(
            "INSERT INTO planet ({PLANET_COLUMNS}) VALUES ($1, $2, $3, $4)
             ON CONFLICT (id) DO NOTHING
             RETURNING {PLANET_COLUMNS}"
        ))
        .bind(planet.id)
        .bind(&planet.name)
        .bind(planet.population)
        .bind(&planet.terrain)
        .fetch_optional(&self.pool)
        .await
    }

    async fn update_planet(&self, planet: &Planet) -> StoreResult<Option<Planet>> {
        sqlx::query_as(&format!(
            "UPDATE planet SET name = $2, population = $3, terrain = $4
             WHERE id = $1
             RETURNING {PLANET_COLUMNS}"
        ))
        .bind(planet.id)
        .bind(&planet.name)
        .bind(planet.population)
        .bind(&planet.terrain)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_planet(&self, id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM planet WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY id"))
            .fetch_all(&self.pool)
            .await
    }

    async fn get_user(&self, id: i32) -> StoreResult<Option<User>> {
        sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn first_active_user(&self) -> StoreResult<Option<User>> {
        sqlx::query_as(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE is_active ORDER BY id LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await
    }

    async fn favorite_people(&self, user_id: i32) -> StoreResult<Vec<People>> {
        sqlx::query_as(
            "SELECT p.id, p.name, p.gender, p.haircolor, p.eyescolor
             FROM fav_people f
             JOIN people p ON p.id = f.people_id
             WHERE f.user_id = $1
             ORDER BY f.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn favorite_planets(&self, user_id: i32) -> StoreResult<Vec<Planet>> {
        sqlx::query_as(
            "SELECT p.id, p.name, p.population, p.terrain
             FROM fav_planet f
             JOIN planet p ON p.id = f.planet_id
             WHERE f.user_id = $1
             ORDER BY f.id",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
    }

    async fn insert_fav_people(&self, user_id: i32, people_id: i32) -> StoreResult<Option<FavPeople>> {
        sqlx::query_as(
            "INSERT INTO fav_people (user_id, people_id) VALUES ($1, $2)
             ON CONFLICT (user_id, people_id) DO NOTHING
             RETURNING id, user_id, people_id",
        )
        .bind(user_id)
        .bind(people_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn insert_fav_planet(&self, user_id: i32, planet_id: i32) -> StoreResult<Option<FavPlanet>> {
        sqlx::query_as(
            "INSERT INTO fav_planet (user_id, planet_id) VALUES ($1, $2)
             ON CONFLICT (user_id, planet_id) DO NOTHING
             RETURNING id, user_id, planet_id",
        )
        .bind(user_id)
        .bind(planet_id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn delete_fav_people(&self, user_id: i32, people_id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM fav_people WHERE user_id = $1 AND people_id = $2")
            .bind(user_id)
            .bind(people_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_fav_planet(&self, user_id: i32, planet_id: i32) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM fav_planet WHERE user_id = $1 AND planet_id = $2")
            .bind(user_id)
            .bind(planet_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn seed_user(pool: &PgPool, email: &str, is_active: bool) -> i32 {
        let (id,): (i32,) = sqlx::query_as(
            "INSERT INTO users (email, password, is_active) VALUES ($1, 'secret', $2) RETURNING id",
        )
        .bind(email)
        .bind(is_active)
        .fetch_one(pool)
        .await
        .unwrap();
        id
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_insert_people_conflict(pool: PgPool) {
        let store = PgStore::new(pool);
        let yoda = People {
            id: 20,
            name: "Yoda".into(),
            gender: Some("male".into()),
            haircolor: Some("white".into()),
            eyescolor: Some("brown".into()),
        };

        assert_eq!(store.insert_people(&yoda).await.unwrap(), Some(yoda.clone()));
        assert!(store.insert_people(&yoda).await.unwrap().is_none());
        assert_eq!(store.list_people().await.unwrap().len(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_favorite_unique_and_cascade(pool: PgPool) {
        let user_id = seed_user(&pool, "luke@rebellion.org", true).await;
        let store = PgStore::new(pool);
        let tatooine = Planet {
            id: 5,
            name: "Tatooine".into(),
            population: Some(200_000),
            terrain: Some("desert".into()),
        };
        store.insert_planet(&tatooine).await.unwrap();

        let fav = store.insert_fav_planet(user_id, 5).await.unwrap().unwrap();
        assert_eq!(fav.id_user, user_id);
        assert!(store.insert_fav_planet(user_id, 5).await.unwrap().is_none());
        assert_eq!(store.favorite_planets(user_id).await.unwrap(), vec![tatooine]);

        assert!(store.delete_planet(5).await.unwrap());
        assert!(store.favorite_planets(user_id).await.unwrap().is_empty());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_first_active_user(pool: PgPool) {
        seed_user(&pool, "vader@empire.gov", false).await;
        let leia = seed_user(&pool, "leia@alderaan.gov", true).await;
        let store = PgStore::new(pool);

        let active = store.first_active_user().await.unwrap().unwrap();
        assert_eq!(active.id, leia);
        assert_eq!(store.list_users().await.unwrap().len(), 2);
    }
}
