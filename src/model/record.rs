use serde::{Deserialize, Serialize};

/// A recipe as stored in the realtime database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Backend generated key. Attached on read, stripped before writes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_path: String,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub amount: f64,
}

impl Record {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            image_path: String::new(),
            ingredients: Vec::new(),
        }
    }

    pub fn with_ingredient(mut self, name: impl Into<String>, amount: f64) -> Self {
        self.ingredients.push(Ingredient {
            name: name.into(),
            amount,
        });
        self
    }
}
