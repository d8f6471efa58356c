use crate::filter::{FilterField, FilterSet};
use crate::store::Recipe;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PageError {
    #[error("page must be at least 1, got {0}")]
    PageTooSmall(i64),
    #[error("limit must be at least 1, got {0}")]
    LimitTooSmall(i64),
    #[error("limit must be at most {max}, got {limit}")]
    LimitTooLarge { limit: i64, max: usize },
}

/// A validated page of results to return
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: usize,
    limit: usize,
}

impl PageRequest {
    /// Validate a 1-based page number and a limit no larger than `max_limit`
    ///
    /// `None` leaves the limit unbounded above.
    pub fn new(page: i64, limit: i64, max_limit: Option<usize>) -> Result<Self, PageError> {
        if page < 1 {
            return Err(PageError::PageTooSmall(page));
        }
        if limit < 1 {
            return Err(PageError::LimitTooSmall(limit));
        }
        let limit_usize = usize::try_from(limit).unwrap_or(usize::MAX);
        if let Some(max) = max_limit.filter(|max| limit_usize > *max) {
            return Err(PageError::LimitTooLarge { limit, max });
        }

        Ok(Self {
            page: usize::try_from(page).unwrap_or(usize::MAX),
            limit: limit_usize,
        })
    }

    pub fn first(limit: usize) -> Self {
        Self {
            page: 1,
            limit: limit.max(1),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn next(&self) -> Self {
        Self {
            page: self.page.saturating_add(1),
            limit: self.limit,
        }
    }
}

/// Matches for one query: the total before paging and the requested page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryResult {
    pub total: usize,
    pub records: Vec<Recipe>,
}

impl QueryResult {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Keep the recipes every filter accepts, ordered best-rated first
pub fn evaluate(records: Vec<Recipe>, filters: &FilterSet) -> Vec<Recipe> {
    let mut matched: Vec<Recipe> = records
        .into_iter()
        .filter(|recipe| filters.matches(recipe))
        .collect();
    sort_by_rating(&mut matched);
    matched
}

/// Highest rating first, unrated recipes last; ties keep their order
pub fn sort_by_rating(records: &mut [Recipe]) {
    records.sort_by(|a, b| compare_rating_desc(a.rating, b.rating));
}

fn compare_rating_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        // -0.0 and 0.0 are one rating; NaN cannot come from JSON
        (Some(a), Some(b)) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Slice out one page, clipping to what is available
pub fn paginate(matched: Vec<Recipe>, page: &PageRequest) -> QueryResult {
    let total = matched.len();
    let records = matched
        .into_iter()
        .skip(page.offset())
        .take(page.limit())
        .collect();
    QueryResult { total, records }
}

/// Run a full query: filter, sort, count and paginate
///
/// When a calories filter is active and no recipe in the whole collection
/// satisfies it, the result is empty straight away, before any other filter
/// is looked at.
pub fn execute(records: Vec<Recipe>, filters: &FilterSet, page: &PageRequest) -> QueryResult {
    let unmatched_calories = filters
        .get(FilterField::Calories)
        .filter(|calories| !records.iter().any(|recipe| calories.matches(recipe)));
    if let Some(calories) = unmatched_calories {
        debug!(filter = %calories, "no recipe satisfies the calories filter");
        return QueryResult::empty();
    }

    let matched = evaluate(records, filters);
    debug!(
        filters = filters.len(),
        matched = matched.len(),
        page = page.page(),
        limit = page.limit(),
        "evaluated recipe query"
    );
    paginate(matched, page)
}
