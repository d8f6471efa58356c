use crate::filter::{FilterSet, SearchParams};
use crate::query::{self, PageRequest};
use crate::store::{Recipe, RecipeStore, StoreError};
use serde::Serialize;
use std::sync::Arc;

/// Default number of description characters kept in listings
pub const DESCRIPTION_PREVIEW_CHARS: usize = 300;

/// One page of recipes together with the paging that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipePage {
    pub page: usize,
    pub limit: usize,
    pub total: usize,
    pub data: Vec<Recipe>,
}

impl RecipePage {
    fn new(page: &PageRequest, total: usize, data: Vec<Recipe>) -> Self {
        Self {
            page: page.page(),
            limit: page.limit(),
            total,
            data,
        }
    }
}

/// Entry point for recipe queries over a shared store
pub struct RecipeService<S> {
    store: Arc<S>,
    preview_chars: usize,
}

impl<S> Clone for RecipeService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            preview_chars: self.preview_chars,
        }
    }
}

impl<S: RecipeStore> RecipeService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            preview_chars: DESCRIPTION_PREVIEW_CHARS,
        }
    }

    pub fn with_preview_chars(mut self, preview_chars: usize) -> Self {
        self.preview_chars = preview_chars;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every recipe, best-rated first, with shortened descriptions
    pub fn list_recipes(&self, page: PageRequest) -> Result<RecipePage, StoreError> {
        let result = query::execute(self.store.list()?, &FilterSet::new(), &page);
        let data = result
            .records
            .into_iter()
            .map(|mut recipe| {
                recipe.description = truncate_description(&recipe.description, self.preview_chars);
                recipe
            })
            .collect();
        Ok(RecipePage::new(&page, result.total, data))
    }

    /// Recipes matching every supplied filter, best-rated first
    pub fn search_recipes(
        &self,
        params: &SearchParams,
        page: PageRequest,
    ) -> Result<RecipePage, StoreError> {
        let filters = FilterSet::from_params(params);
        let result = query::execute(self.store.list()?, &filters, &page);
        Ok(RecipePage::new(&page, result.total, result.records))
    }

    pub fn get_recipe(&self, id: i64) -> Result<Option<Recipe>, StoreError> {
        self.store.get(id)
    }
}

/// Cut a description to `max_chars` characters, marking the cut with `...`
pub fn truncate_description(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
