use async_trait::async_trait;
use tokio::sync::RwLock;

use pharmacy_core::domain::{Category, DEFAULT_CATEGORIES};
use pharmacy_core::error::RepoError;
use pharmacy_core::ports::CategoryRepository;

pub struct InMemoryCategoryRepository {
    categories: RwLock<Vec<Category>>,
}

impl InMemoryCategoryRepository {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: RwLock::new(categories),
        }
    }

    /// Preloaded with the default categories.
    pub fn seeded() -> Self {
        Self::new(
            DEFAULT_CATEGORIES
                .iter()
                .map(|(name, slug)| Category::new(name, slug))
                .collect(),
        )
    }
}

impl Default for InMemoryCategoryRepository {
    fn default() -> Self {
        Self::seeded()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, RepoError> {
        let mut categories = self.categories.read().await.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_categories_sorted_by_name() {
        let repo = InMemoryCategoryRepository::seeded();
        let names: Vec<_> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();

        assert_eq!(names, ["Health Tips", "Immunizations", "Pharmacy Services"]);
    }
}
