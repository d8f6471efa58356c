use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

mod entities;

pub use entities::Recipe;
use entities::StoredRecipe;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read recipe file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse recipe file '{path}': {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Recipe data must be a JSON array or object of records, found {0}")]
    UnexpectedShape(&'static str),
    #[error("Duplicate recipe id {0}")]
    DuplicateId(i64),
}

/// Read access to the recipe collection
///
/// Implementations must be safe to share between concurrent requests.
pub trait RecipeStore: Send + Sync {
    /// All recipes in store order
    fn list(&self) -> Result<Vec<Recipe>, StoreError>;

    fn get(&self, id: i64) -> Result<Option<Recipe>, StoreError>;
}

/// Recipe store held entirely in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    recipes: Vec<Recipe>,
    by_id: HashMap<i64, usize>,
}

impl MemoryStore {
    pub fn new(recipes: Vec<Recipe>) -> Result<Self, StoreError> {
        let mut by_id = HashMap::with_capacity(recipes.len());
        for (idx, recipe) in recipes.iter().enumerate() {
            if by_id.insert(recipe.id, idx).is_some() {
                return Err(StoreError::DuplicateId(recipe.id));
            }
        }

        Ok(Self { recipes, by_id })
    }

    /// Load recipes from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let path_display = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path_display.clone(),
            source,
        })?;

        let document: Value = serde_json::from_str(&raw).map_err(|source| StoreError::Parse {
            path: path_display.clone(),
            source,
        })?;

        let store = Self::new(parse_recipes(document)?)?;
        info!(path = %path_display, recipes = store.len(), "loaded recipe store");
        Ok(store)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, StoreError> {
        let document: Value = serde_json::from_str(raw).map_err(|source| StoreError::Parse {
            path: "<inline>".to_string(),
            source,
        })?;
        Self::new(parse_recipes(document)?)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}

impl RecipeStore for MemoryStore {
    fn list(&self) -> Result<Vec<Recipe>, StoreError> {
        Ok(self.recipes.clone())
    }

    fn get(&self, id: i64) -> Result<Option<Recipe>, StoreError> {
        Ok(self.by_id.get(&id).map(|&idx| self.recipes[idx].clone()))
    }
}

/// Turn a JSON document into recipes
///
/// Accepts an array of records or an object keyed by arbitrary labels whose
/// values are records (object order is preserved). Records that do not fit
/// the recipe shape are skipped. Records without an id get sequential ids
/// after the largest explicit one.
fn parse_recipes(document: Value) -> Result<Vec<Recipe>, StoreError> {
    let entries: Vec<(String, Value)> = match document {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| (idx.to_string(), item))
            .collect(),
        Value::Object(map) => map.into_iter().collect(),
        Value::Null => return Err(StoreError::UnexpectedShape("null")),
        Value::Bool(_) => return Err(StoreError::UnexpectedShape("a boolean")),
        Value::Number(_) => return Err(StoreError::UnexpectedShape("a number")),
        Value::String(_) => return Err(StoreError::UnexpectedShape("a string")),
    };

    let mut stored = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        match serde_json::from_value::<StoredRecipe>(value) {
            Ok(record) => stored.push(record),
            Err(error) => warn!(key = %key, %error, "skipping malformed recipe record"),
        }
    }

    let mut next_id = stored.iter().filter_map(|r| r.id).max().unwrap_or(0) + 1;
    let recipes: Vec<Recipe> = stored
        .into_iter()
        .map(|record| {
            let id = record.id.unwrap_or_else(|| {
                let id = next_id;
                next_id += 1;
                id
            });
            record.into_recipe(id)
        })
        .collect();

    debug!(count = recipes.len(), "parsed recipe records");
    Ok(recipes)
}
