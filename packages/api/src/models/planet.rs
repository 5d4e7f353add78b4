use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `planet` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Planet {
    pub id: i32,
    pub name: String,
    pub population: Option<i64>,
    pub terrain: Option<String>,
}

/// Request body for creating or replacing a [`Planet`] record.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanetInput {
    pub name: String,
    #[serde(default)]
    pub population: Option<i64>,
    #[serde(default)]
    pub terrain: Option<String>,
}

impl PlanetInput {
    pub fn into_planet(self, id: i32) -> Planet {
        Planet {
            id,
            name: self.name,
            population: self.population,
            terrain: self.terrain,
        }
    }
}
