//! Resource catalog - the built-in data set and loading of catalog files.

use crate::error::CatalogError;
use crate::models::{Level, Resource};
use itertools::Itertools;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Category used when a listing request names none.
pub const DEFAULT_CATEGORY: &str = "web-development";

/// Immutable mapping from category name to its ordered resources.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: HashMap<String, Vec<Resource>>,
}

impl Catalog {
    pub fn new(categories: HashMap<String, Vec<Resource>>) -> Self {
        Self { categories }
    }

    /// The catalog the service ships with.
    pub fn builtin() -> Self {
        let categories = HashMap::from([
            (
                "web-development".to_string(),
                vec![
                    resource(
                        1,
                        "HTML & CSS Fundamentals",
                        "course",
                        "freeCodeCamp",
                        "8 hours",
                        Level::Beginner,
                        "https://www.freecodecamp.org/learn",
                        &["frontend", "html", "css"],
                    ),
                    resource(
                        2,
                        "JavaScript: The Advanced Concepts",
                        "course",
                        "Udemy",
                        "25 hours",
                        Level::Advanced,
                        "https://www.udemy.com/course/advanced-javascript-concepts/",
                        &["javascript", "frontend", "backend"],
                    ),
                    resource(
                        3,
                        "Full Stack Open",
                        "course",
                        "University of Helsinki",
                        "150 hours",
                        Level::Intermediate,
                        "https://fullstackopen.com/en/",
                        &["fullstack", "react", "node"],
                    ),
                ],
            ),
            (
                "data-science".to_string(),
                vec![
                    resource(
                        4,
                        "Python for Data Science",
                        "course",
                        "Coursera",
                        "35 hours",
                        Level::Beginner,
                        "https://www.coursera.org/specializations/data-science-python",
                        &["python", "data-science", "beginner"],
                    ),
                    resource(
                        5,
                        "Machine Learning Specialization",
                        "specialization",
                        "Coursera",
                        "80 hours",
                        Level::Intermediate,
                        "https://www.coursera.org/specializations/machine-learning-introduction",
                        &["machine-learning", "ai", "intermediate"],
                    ),
                    resource(
                        6,
                        "Deep Learning",
                        "book",
                        "MIT Press",
                        "40 hours",
                        Level::Advanced,
                        "https://www.deeplearningbook.org/",
                        &["deep-learning", "ai", "advanced"],
                    ),
                ],
            ),
            (
                "mobile-development".to_string(),
                vec![
                    resource(
                        7,
                        "Flutter Development Bootcamp",
                        "course",
                        "Udemy",
                        "30 hours",
                        Level::Beginner,
                        "https://www.udemy.com/course/flutter-bootcamp-with-dart/",
                        &["flutter", "mobile", "dart"],
                    ),
                    resource(
                        8,
                        "iOS Development with SwiftUI",
                        "course",
                        "Stanford University",
                        "40 hours",
                        Level::Intermediate,
                        "https://cs193p.sites.stanford.edu/",
                        &["ios", "swift", "mobile"],
                    ),
                ],
            ),
        ]);
        Self { categories }
    }

    /// Resources of `category` in catalog order; empty for unknown categories.
    pub fn list_by_category(&self, category: &str) -> &[Resource] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of resources across every category.
    pub fn total_resources(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    /// Category names, sorted.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.keys().map(String::as_str).sorted().collect()
    }

    /// Checks the invariants every catalog must hold.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidCatalog` naming the first offending entry.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let all = self.categories.values().flatten();

        let duplicates: Vec<u32> = all.clone().map(|r| r.id).duplicates().sorted().collect();
        if !duplicates.is_empty() {
            return Err(CatalogError::InvalidCatalog(format!(
                "duplicate resource ids: {}",
                duplicates.iter().join(", ")
            )));
        }

        for r in all {
            if r.id == 0 {
                return Err(CatalogError::InvalidCatalog(format!(
                    "resource '{}' has id 0",
                    r.title
                )));
            }
            if r.title.trim().is_empty() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "resource {} has an empty title",
                    r.id
                )));
            }
            if r.tags.is_empty() {
                return Err(CatalogError::InvalidCatalog(format!(
                    "resource {} has no tags",
                    r.id
                )));
            }
        }
        Ok(())
    }
}

#[allow(clippy::too_many_arguments)]
fn resource(
    id: u32,
    title: &str,
    kind: &str,
    platform: &str,
    duration: &str,
    level: Level,
    url: &str,
    tags: &[&str],
) -> Resource {
    Resource {
        id,
        title: title.into(),
        kind: kind.into(),
        platform: platform.into(),
        duration: duration.into(),
        level,
        url: url.into(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// Loads a catalog from a JSON file shaped as `{ "category": [Resource, ...] }`.
///
/// # Errors
///
/// Returns `CatalogError::Io` if the file cannot be read,
/// `CatalogError::JsonParse` if the JSON is malformed, and
/// `CatalogError::InvalidCatalog` if the data breaks catalog invariants.
pub fn load_catalog(path: &Path) -> Result<Catalog, CatalogError> {
    let content = fs::read_to_string(path)?;
    let categories: HashMap<String, Vec<Resource>> = serde_json::from_str(&content)?;
    let catalog = Catalog::new(categories);
    catalog.validate()?;
    Ok(catalog)
}
