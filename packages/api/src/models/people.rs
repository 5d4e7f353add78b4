use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A character row from the `people` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct People {
    pub id: i32,
    pub name: String,
    pub gender: Option<String>,
    pub haircolor: Option<String>,
    pub eyescolor: Option<String>,
}

/// Request body for creating or replacing a [`People`] record.
///
/// Optional fields missing from the body deserialize to `None`, so applying an input
/// always replaces every column.
#[derive(Debug, Clone, Deserialize)]
pub struct PeopleInput {
    pub name: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub haircolor: Option<String>,
    #[serde(default)]
    pub eyescolor: Option<String>,
}

impl PeopleInput {
    pub fn into_people(self, id: i32) -> People {
        People {
            id,
            name: self.name,
            gender: self.gender,
            haircolor: self.haircolor,
            eyescolor: self.eyescolor,
        }
    }
}
