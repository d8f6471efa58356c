use super::error::FilterParseError;
use super::extract::extract_number;
use super::parser::{Bound, Comparison};
use crate::store::Recipe;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

/// Fields that can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Title,
    Cuisine,
    Rating,
    TotalTime,
    Calories,
}

impl FilterField {
    pub const ALL: [FilterField; 5] = [
        FilterField::Title,
        FilterField::Cuisine,
        FilterField::Rating,
        FilterField::TotalTime,
        FilterField::Calories,
    ];

    /// Get the canonical name of this field, as used in query parameters
    pub fn canonical_name(&self) -> &'static str {
        match self {
            FilterField::Title => "title",
            FilterField::Cuisine => "cuisine",
            FilterField::Rating => "rating",
            FilterField::TotalTime => "total_time",
            FilterField::Calories => "calories",
        }
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

/// A typed, ready-to-evaluate filter on one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldFilter {
    /// Case-insensitive substring of the title
    Title(String),
    /// Case-insensitive substring of the cuisine
    Cuisine(String),
    Rating { bound: Bound, value: f64 },
    TotalTime { bound: Bound, minutes: i64 },
    /// Compared against the number found in the `calories` nutrient text
    Calories { bound: Bound, value: f64 },
}

impl FieldFilter {
    /// Build a filter from a non-empty raw value
    ///
    /// Text fields use the raw value as the needle. Numeric fields parse a
    /// [`Comparison`] first and then coerce its operand.
    pub fn build(field: FilterField, raw: &str) -> Result<Self, FilterParseError> {
        match field {
            FilterField::Title => Ok(FieldFilter::Title(raw.to_lowercase())),
            FilterField::Cuisine => Ok(FieldFilter::Cuisine(raw.to_lowercase())),
            FilterField::Rating => {
                let comparison = Comparison::parse(raw);
                let value = coerce_float(field, &comparison.operand)?;
                Ok(FieldFilter::Rating {
                    bound: comparison.bound(),
                    value,
                })
            }
            FilterField::TotalTime => {
                let comparison = Comparison::parse(raw);
                let minutes = coerce_truncated_int(field, &comparison.operand)?;
                Ok(FieldFilter::TotalTime {
                    bound: comparison.bound(),
                    minutes,
                })
            }
            FilterField::Calories => {
                let comparison = Comparison::parse(raw);
                let value = coerce_float(field, &comparison.operand)?;
                Ok(FieldFilter::Calories {
                    bound: comparison.bound(),
                    value,
                })
            }
        }
    }

    pub fn field(&self) -> FilterField {
        match self {
            FieldFilter::Title(_) => FilterField::Title,
            FieldFilter::Cuisine(_) => FilterField::Cuisine,
            FieldFilter::Rating { .. } => FilterField::Rating,
            FieldFilter::TotalTime { .. } => FilterField::TotalTime,
            FieldFilter::Calories { .. } => FilterField::Calories,
        }
    }

    pub fn matches(&self, recipe: &Recipe) -> bool {
        match self {
            FieldFilter::Title(needle) => recipe.title.to_lowercase().contains(needle.as_str()),
            FieldFilter::Cuisine(needle) => recipe
                .cuisine
                .as_ref()
                .is_some_and(|cuisine| cuisine.to_lowercase().contains(needle.as_str())),
            FieldFilter::Rating { bound, value } => recipe
                .rating
                .is_some_and(|rating| bound.holds(rating, *value)),
            FieldFilter::TotalTime { bound, minutes } => recipe
                .total_time
                .is_some_and(|total| bound.holds(total, *minutes)),
            FieldFilter::Calories { bound, value } => recipe
                .calories()
                .and_then(extract_number)
                .is_some_and(|calories| bound.holds(calories, *value)),
        }
    }
}

impl fmt::Display for FieldFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldFilter::Title(needle) | FieldFilter::Cuisine(needle) => {
                write!(f, "{} contains '{}'", self.field(), needle)
            }
            FieldFilter::Rating { bound, value } | FieldFilter::Calories { bound, value } => {
                write!(f, "{} {} {}", self.field(), bound.symbol(), value)
            }
            FieldFilter::TotalTime { bound, minutes } => {
                write!(f, "{} {} {}", self.field(), bound.symbol(), minutes)
            }
        }
    }
}

fn coerce_float(field: FilterField, operand: &str) -> Result<f64, FilterParseError> {
    operand
        .trim()
        .parse::<f64>()
        .map_err(|_| FilterParseError::InvalidNumber {
            field: field.canonical_name(),
            operand: operand.to_string(),
        })
}

/// Accepts `"30"` as well as `"30.0"` or `"30.9"` (truncated to 30)
fn coerce_truncated_int(field: FilterField, operand: &str) -> Result<i64, FilterParseError> {
    let value = coerce_float(field, operand)?;
    if !value.is_finite() || value < i64::MIN as f64 || value >= i64::MAX as f64 {
        return Err(FilterParseError::OutOfRange {
            field: field.canonical_name(),
            operand: operand.to_string(),
        });
    }
    Ok(value.trunc() as i64)
}

/// Why a field contributes no constraint to a query
#[derive(Debug, Clone, PartialEq)]
pub enum InactiveReason {
    /// No value, or an empty one, was supplied
    Absent,
    /// A value was supplied but could not be coerced
    Unparseable(FilterParseError),
}

/// Outcome of building the filter for one field
#[derive(Debug, Clone, PartialEq)]
pub enum FilterState {
    Active(FieldFilter),
    Inactive(InactiveReason),
}

impl FilterState {
    pub fn into_active(self) -> Option<FieldFilter> {
        match self {
            FilterState::Active(filter) => Some(filter),
            FilterState::Inactive(_) => None,
        }
    }
}

/// Build the filter for one field from its optional raw value
pub fn build_filter(field: FilterField, raw: Option<&str>) -> FilterState {
    let Some(raw) = raw.filter(|value| !value.is_empty()) else {
        return FilterState::Inactive(InactiveReason::Absent);
    };

    match FieldFilter::build(field, raw) {
        Ok(filter) => FilterState::Active(filter),
        Err(error) => {
            debug!(field = %field, raw, %error, "ignoring unusable filter value");
            FilterState::Inactive(InactiveReason::Unparseable(error))
        }
    }
}

/// Raw, unparsed filter values for a search, one per field
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    pub title: Option<String>,
    pub cuisine: Option<String>,
    pub rating: Option<String>,
    pub total_time: Option<String>,
    pub calories: Option<String>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_cuisine(mut self, cuisine: impl Into<String>) -> Self {
        self.cuisine = Some(cuisine.into());
        self
    }

    pub fn with_rating(mut self, rating: impl Into<String>) -> Self {
        self.rating = Some(rating.into());
        self
    }

    pub fn with_total_time(mut self, total_time: impl Into<String>) -> Self {
        self.total_time = Some(total_time.into());
        self
    }

    pub fn with_calories(mut self, calories: impl Into<String>) -> Self {
        self.calories = Some(calories.into());
        self
    }

    pub fn raw(&self, field: FilterField) -> Option<&str> {
        match field {
            FilterField::Title => self.title.as_deref(),
            FilterField::Cuisine => self.cuisine.as_deref(),
            FilterField::Rating => self.rating.as_deref(),
            FilterField::TotalTime => self.total_time.as_deref(),
            FilterField::Calories => self.calories.as_deref(),
        }
    }
}

/// The active filters of a query, combined with AND logic
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    filters: Vec<FieldFilter>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every field's filter, keeping only the active ones
    pub fn from_params(params: &SearchParams) -> Self {
        let filters = FilterField::ALL
            .iter()
            .filter_map(|&field| build_filter(field, params.raw(field)).into_active())
            .collect();
        Self { filters }
    }

    pub(crate) fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn get(&self, field: FilterField) -> Option<&FieldFilter> {
        self.filters.iter().find(|filter| filter.field() == field)
    }

    /// True when every active filter matches; vacuously true when empty
    pub fn matches(&self, recipe: &Recipe) -> bool {
        self.filters.iter().all(|filter| filter.matches(recipe))
    }
}
