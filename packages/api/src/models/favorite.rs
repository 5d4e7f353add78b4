//! Favorite join records and the resolved favorite returned to clients.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{People, Planet};

/// `fav_people` row: user `id_user` favorited person `id_people`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FavPeople {
    pub id: i32,
    #[serde(rename = "idUser")]
    #[sqlx(rename = "user_id")]
    pub id_user: i32,
    #[serde(rename = "idPeople")]
    #[sqlx(rename = "people_id")]
    pub id_people: i32,
}

/// `fav_planet` row: user `id_user` favorited planet `id_planet`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FavPlanet {
    pub id: i32,
    #[serde(rename = "idUser")]
    #[sqlx(rename = "user_id")]
    pub id_user: i32,
    #[serde(rename = "idPlanet")]
    #[sqlx(rename = "planet_id")]
    pub id_planet: i32,
}

/// A favorite resolved to the record it points at. Serializes as the bare record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Favorite {
    People(People),
    Planet(Planet),
}
