//! Data models for the application.

mod favorite;
mod people;
mod planet;
mod user;

pub use favorite::{FavPeople, FavPlanet, Favorite};
pub use people::{People, PeopleInput};
pub use planet::{Planet, PlanetInput};
pub use user::{User, UserInfo};

/// Longest value the `VARCHAR(50)` text columns accept, in characters.
pub const MAX_TEXT_LEN: usize = 50;
