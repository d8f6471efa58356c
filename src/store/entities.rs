use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A single recipe record as served by the query API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    /// Unique, stable identifier
    pub id: i64,
    pub title: String,
    pub cuisine: Option<String>,
    /// Average rating; `None` when the source had no usable rating
    pub rating: Option<f64>,
    /// Minutes
    pub prep_time: Option<i64>,
    pub cook_time: Option<i64>,
    pub total_time: Option<i64>,
    pub description: String,
    /// Nutrient name to free-text amount (e.g. `"calories" => "389 kcal"`)
    pub nutrients: Option<BTreeMap<String, String>>,
    pub serves: Option<String>,
}

impl Recipe {
    /// Look up a nutrient's raw text value
    pub fn nutrient(&self, name: &str) -> Option<&str> {
        self.nutrients
            .as_ref()
            .and_then(|bag| bag.get(name))
            .map(String::as_str)
    }

    pub fn calories(&self) -> Option<&str> {
        self.nutrient("calories")
    }
}

/// On-disk shape of a recipe; the id may be missing and is assigned on load
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct StoredRecipe {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default, deserialize_with = "lenient_float")]
    pub rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub prep_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub cook_time: Option<i64>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub total_time: Option<i64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    #[serde(default, deserialize_with = "text_nutrients")]
    pub nutrients: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub serves: Option<String>,
}

impl StoredRecipe {
    pub fn into_recipe(self, id: i64) -> Recipe {
        Recipe {
            id,
            title: self.title,
            cuisine: self.cuisine,
            rating: self.rating,
            prep_time: self.prep_time,
            cook_time: self.cook_time,
            total_time: self.total_time,
            description: self.description,
            nutrients: self.nutrients,
            serves: self.serves,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// A finite number, or a string holding one; anything else reads as absent
fn finite_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn lenient_float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(finite_number))
}

/// Whole minutes; fractional values are truncated
fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(|value| match value {
        Value::Number(number) if number.is_i64() => number.as_i64(),
        _ => finite_number(value)
            .filter(|minutes| *minutes >= i64::MIN as f64 && *minutes < i64::MAX as f64)
            .map(|minutes| minutes.trunc() as i64),
    }))
}

/// Keep only textual nutrient values; numbers and nulls carry no unit text
fn text_nutrients<'de, D>(deserializer: D) -> Result<Option<BTreeMap<String, String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, Value>>::deserialize(deserializer)?;
    Ok(raw.map(|bag| {
        bag.into_iter()
            .filter_map(|(name, value)| match value {
                Value::String(text) => Some((name, text)),
                _ => None,
            })
            .collect()
    }))
}
