use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::models::{FavPeople, FavPlanet, People, Planet, User};
use crate::store::{Store, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    users: BTreeMap<i32, User>,
    people: BTreeMap<i32, People>,
    planets: BTreeMap<i32, Planet>,
    fav_people: Vec<FavPeople>,
    fav_planets: Vec<FavPlanet>,
    next_user_id: i32,
    next_fav_id: i32,
}

/// In-memory Store for testing and local runs without PostgreSQL.
///
/// Every operation holds one lock over all tables, which gives the same
/// single-statement atomicity the SQL backend relies on.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user row. Users have no HTTP write path, so tests and fixtures seed them here.
    pub fn insert_user(&self, email: &str, password: &str, is_active: bool) -> User {
        let mut tables = self.tables.lock().unwrap();
        tables.next_user_id += 1;
        let user = User {
            id: tables.next_user_id,
            email: email.to_string(),
            password: password.to_string(),
            is_active,
        };
        tables.users.insert(user.id, user.clone());
        user
    }

    /// Number of `(favorite people, favorite planet)` rows across all users.
    #[cfg(test)]
    pub(crate) fn favorite_counts(&self) -> (usize, usize) {
        let tables = self.tables.lock().unwrap();
        (tables.fav_people.len(), tables.fav_planets.len())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_people(&self) -> StoreResult<Vec<People>> {
        Ok(self.tables.lock().unwrap().people.values().cloned().collect())
    }

    async fn get_people(&self, id: i32) -> StoreResult<Option<People>> {
        Ok(self.tables.lock().unwrap().people.get(&id).cloned())
    }

    async fn insert_people(&self, people: &People) -> StoreResult<Option<People>> {
        let mut tables = self.tables.lock().unwrap();
        if tables.people.contains_key(&people.id) {
            return Ok(None);
        }
        tables.people.insert(people.id, people.clone());
        Ok(Some(people.clone()))
    }

    async fn update_people(&self, people: &People) -> StoreResult<Option<People>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.people.get_mut(&people.id).map(|row| {
            *row = people.clone();
            row.clone()
        }))
    }

    async fn delete_people(&self, id: i32) -> StoreResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        if tables.people.remove(&id).is_none() {
            return Ok(false);
        }
        tables.fav_people.retain(|fav| fav.id_people != id);
        Ok(true)
    }

    async fn list_planets(&self) -> StoreResult<Vec<Planet>> {
        Ok(self.tables.lock().unwrap().planets.values().cloned().collect())
    }

    async fn get_planet(&self, id: i32) -> StoreResult<Option<Planet>> {
        Ok(self.tables.lock().unwrap().planets.get(&id).cloned())
    }

    async fn insert_planet(&self, planet: &Planet) -> StoreResult<Option<Planet>> {
        let mut tables = self.tables.lock().unwrap();
        if tables.planets.contains_key(&planet.id) {
            return Ok(None);
        }
        tables.planets.insert(planet.id, planet.clone());
        Ok(Some(planet.clone()))
    }

    async fn update_planet(&self, planet: &Planet) -> StoreResult<Option<Planet>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.planets.get_mut(&planet.id).map(|row| {
            *row = planet.clone();
            row.clone()
        }))
    }

    async fn delete_planet(&self, id: i32) -> StoreResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        if tables.planets.remove(&id).is_none() {
            return Ok(false);
        }
        tables.fav_planets.retain(|fav| fav.id_planet != id);
        Ok(true)
    }

    async fn list_users(&self) -> StoreResult<Vec<User>> {
        Ok(self.tables.lock().unwrap().users.values().cloned().collect())
    }

    async fn get_user(&self, id: i32) -> StoreResult<Option<User>> {
        Ok(self.tables.lock().unwrap().users.get(&id).cloned())
    }

    async fn first_active_user(&self) -> StoreResult<Option<User>> {
        Ok(self
            .tables
            .lock()
            .unwrap()
            .users
            .values()
            .find(|user| user.is_active)
            .cloned())
    }

    async fn favorite_people(&self, user_id: i32) -> StoreResult<Vec<People>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .fav_people
            .iter()
            .filter(|fav| fav.id_user == user_id)
            .filter_map(|fav| tables.people.get(&fav.id_people).cloned())
            .collect())
    }

    async fn favorite_planets(&self, user_id: i32) -> StoreResult<Vec<Planet>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .fav_planets
            .iter()
            .filter(|fav| fav.id_user == user_id)
            .filter_map(|fav| tables.planets.get(&fav.id_planet).cloned())
            .collect())
    }

    async fn insert_fav_people(&self, user_id: i32, people_id: i32) -> StoreResult<Option<FavPeople>> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .fav_people
            .iter()
            .any(|fav| fav.id_user == user_id && fav.id_people == people_id)
        {
            return Ok(None);
        }
        tables.next_fav_id += 1;
        let fav = FavPeople {
            id: tables.next_fav_id,
            id_user: user_id,
            id_people: people_id,
        };
        tables.fav_people.push(fav.clone());
        Ok(Some(fav))
    }

    async fn insert_fav_planet(&self, user_id: i32, planet_id: i32) -> StoreResult<Option<FavPlanet>> {
        let mut tables = self.tables.lock().unwrap();
        if tables
            .fav_planets
            .iter()
            .any(|fav| fav.id_user == user_id && fav.id_planet == planet_id)
        {
            return Ok(None);
        }
        tables.next_fav_id += 1;
        let fav = FavPlanet {
            id: tables.next_fav_id,
            id_user: user_id,
            id_planet: planet_id,
        };
        tables.fav_planets.push(fav.clone());
        Ok(Some(fav))
    }

    async fn delete_fav_people(&self, user_id: i32, people_id: i32) -> StoreResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.fav_people.len();
        tables
            .fav_people
            .retain(|fav| !(fav.id_user == user_id && fav.id_people == people_id));
        Ok(tables.fav_people.len() != before)
    }

    async fn delete_fav_planet(&self, user_id: i32, planet_id: i32) -> StoreResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.fav_planets.len();
        tables
            .fav_planets
            .retain(|fav| !(fav.id_user == user_id && fav.id_planet == planet_id));
        Ok(tables.fav_planets.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tatooine() -> Planet {
        Planet {
            id: 5,
            name: "Tatooine".into(),
            population: Some(200_000),
            terrain: Some("desert".into()),
        }
    }

    #[tokio::test]
    async fn test_insert_conflict_keeps_original() {
        let store = MemoryStore::new();

        assert_eq!(store.insert_planet(&tatooine()).await.unwrap(), Some(tatooine()));

        let mut other = tatooine();
        other.name = "Hoth".into();
        assert!(store.insert_planet(&other).await.unwrap().is_none());

        let planets = store.list_planets().await.unwrap();
        assert_eq!(planets, vec![tatooine()]);
    }

    #[tokio::test]
    async fn test_update_missing_row() {
        let store = MemoryStore::new();
        assert!(store.update_planet(&tatooine()).await.unwrap().is_none());
        assert!(store.list_planets().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_first_active_user() {
        let store = MemoryStore::new();
        assert!(store.first_active_user().await.unwrap().is_none());

        store.insert_user("vader@empire.gov", "dark", false);
        let leia = store.insert_user("leia@alderaan.gov", "hope", true);
        store.insert_user("han@falcon.net", "shot-first", true);

        let active = store.first_active_user().await.unwrap().unwrap();
        assert_eq!(active.id, leia.id);
    }

    #[tokio::test]
    async fn test_favorite_pair_is_unique() {
        let store = MemoryStore::new();
        let user = store.insert_user("luke@rebellion.org", "x-wing", true);
        store.insert_planet(&tatooine()).await.unwrap();

        assert!(store.insert_fav_planet(user.id, 5).await.unwrap().is_some());
        assert!(store.insert_fav_planet(user.id, 5).await.unwrap().is_none());
        assert_eq!(store.favorite_counts(), (0, 1));
    }

    #[tokio::test]
    async fn test_delete_cascades_to_favorites() {
        let store = MemoryStore::new();
        let user = store.insert_user("luke@rebellion.org", "x-wing", true);
        store.insert_planet(&tatooine()).await.unwrap();
        store.insert_fav_planet(user.id, 5).await.unwrap();

        assert!(store.delete_planet(5).await.unwrap());
        assert_eq!(store.favorite_counts(), (0, 0));
        assert!(store.favorite_planets(user.id).await.unwrap().is_empty());

        assert!(!store.delete_planet(5).await.unwrap());
    }

    #[tokio::test]
    async fn test_delete_favorite_only_touches_pair() {
        let store = MemoryStore::new();
        let luke = store.insert_user("luke@rebellion.org", "x-wing", true);
        let leia = store.insert_user("leia@alderaan.gov", "hope", false);
        store.insert_planet(&tatooine()).await.unwrap();
        store.insert_fav_planet(luke.id, 5).await.unwrap();
        store.insert_fav_planet(leia.id, 5).await.unwrap();

        assert!(store.delete_fav_planet(luke.id, 5).await.unwrap());
        assert!(!store.delete_fav_planet(luke.id, 5).await.unwrap());
        assert_eq!(store.favorite_planets(leia.id).await.unwrap(), vec![tatooine()]);
    }
}
