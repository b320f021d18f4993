use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::model::Category;
use crate::error::TrackerError;

/// Upper bound on items returned for one listing.
pub const LIBRARY_VIEW_LIMIT: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryItem {
    pub id: String,
    pub name: String,
    pub category: Category,
}

impl LibraryItem {
    pub fn new(name: impl Into<String>, category: Category) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            category,
        }
    }

    /// New item from user input; the name is trimmed and must not be empty.
    pub fn named(name: &str, category: Category) -> Result<Self, TrackerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(TrackerError::EmptyName);
        }
        Ok(Self::new(name, category))
    }
}

pub fn default_library() -> Vec<LibraryItem> {
    [
        ("Omelette", Category::Dish),
        ("Cottage cheese 5%", Category::Dish),
        ("Unsweetened yogurt", Category::Drink),
        ("Buckwheat", Category::Dish),
        ("Salmon", Category::Dish),
        ("Cod", Category::Dish),
        ("Vegetable salad", Category::Produce),
        ("Black coffee", Category::Drink),
        ("Water", Category::Drink),
    ]
    .into_iter()
    .map(|(name, category)| LibraryItem::new(name, category))
    .collect()
}

/// New items go to the front.
pub fn add_to_library(library: &[LibraryItem], item: LibraryItem) -> Vec<LibraryItem> {
    let mut next = Vec::with_capacity(library.len() + 1);
    next.push(item);
    next.extend_from_slice(library);
    next
}

pub fn filter_library(library: &[LibraryItem], category: Option<Category>) -> Vec<&LibraryItem> {
    library
        .iter()
        .filter(|item| category.map_or(true, |c| item.category == c))
        .take(LIBRARY_VIEW_LIMIT)
        .collect()
}
