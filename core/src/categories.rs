use crate::{
    client::ApiClient,
    err::{Error, Result},
};
use serde::Deserialize;
use std::collections::HashMap;

/// One node of the remote part-category tree. `pathstring` is the
/// slash-joined full name (a child's pathstring is its parent's pathstring
/// plus `/` plus its own name) and doubles as the table name at the SQL
/// layer.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub pk: i64,
    pub name: String,
    pub parent: Option<i64>,
    pub pathstring: String,
}

/// The category forest fetched at connect time, indexed by pathstring.
/// Lookups are case-sensitive.
#[derive(Debug, Default)]
pub struct CategoryIndex {
    categories: Vec<Category>,
    by_path: HashMap<String, i64>,
}

impl CategoryIndex {
    pub fn new(categories: Vec<Category>) -> CategoryIndex {
        let by_path = categories
            .iter()
            .map(|c| (c.pathstring.clone(), c.pk))
            .collect();
        CategoryIndex {
            categories,
            by_path,
        }
    }

    /// Fetches `/api/part/category/` and builds the index.
    pub fn fetch(client: &ApiClient) -> Result<CategoryIndex> {
        let categories: Vec<Category> = client
            .get_json("/api/part/category/", &[])
            .map_err(|e| Error::CategoryList(e.to_string()))?;
        Ok(CategoryIndex::new(categories))
    }

    pub fn resolve(&self, pathstring: &str) -> Option<i64> {
        self.by_path.get(pathstring).copied()
    }

    /// Pathstrings in the order the remote returned them.
    pub fn pathstrings(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.pathstring.as_str())
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
