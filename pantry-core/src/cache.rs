//! In-memory recipe cache.
//!
//! Keyed by the ingredient multiset and button state. Entries live for the life of the
//! process; there is no eviction.

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::types::{ButtonState, StructuredRecipe};

/// Cache key: sorted ingredient names plus the button state.
///
/// Two requests naming the same ingredients in any order, with the same button state,
/// produce equal keys. Duplicate names are kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    ingredients: Vec<String>,
    button_state: ButtonState,
}

impl CacheKey {
    pub fn new(ingredients: &[String], button_state: ButtonState) -> Self {
        let mut ingredients = ingredients.to_vec();
        ingredients.sort();
        Self {
            ingredients,
            button_state,
        }
    }
}

/// Renders as `"basil,garlic,tomato-3"`.
impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.ingredients.join(","), self.button_state)
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Process-wide store of generated recipes.
///
/// Concurrent misses on the same key may both run their producer; the last insert wins.
#[derive(Debug)]
pub struct RecipeCache {
    entries: RwLock<HashMap<CacheKey, StructuredRecipe>>,
    /// Whether parse-failure records are stored like any other recipe.
    cache_parse_failures: bool,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl Default for RecipeCache {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RecipeCache {
    pub fn new(cache_parse_failures: bool) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            cache_parse_failures,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<CacheKey, StructuredRecipe>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<CacheKey, StructuredRecipe>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get a cached recipe if one exists.
    pub fn get(&self, key: &CacheKey) -> Option<StructuredRecipe> {
        self.read().get(key).cloned()
    }

    /// Store a recipe, replacing any existing entry.
    ///
    /// Returns false when the recipe is a parse failure and those are not being cached.
    pub fn insert(&self, key: CacheKey, recipe: StructuredRecipe) -> bool {
        if recipe.is_parse_failure() && !self.cache_parse_failures {
            tracing::debug!(key = %key, "Not caching parse failure");
            return false;
        }
        self.write().insert(key, recipe);
        true
    }

    /// Return the cached recipe for `key`, or run `producer` and cache what it returns.
    ///
    /// Producer errors are returned as-is and nothing is stored. No lock is held while the
    /// producer runs.
    pub async fn get_or_create<F, Fut, E>(
        &self,
        key: CacheKey,
        producer: F,
    ) -> Result<StructuredRecipe, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<StructuredRecipe, E>>,
    {
        if let Some(recipe) = self.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(key = %key, "Recipe cache hit");
            return Ok(recipe);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(key = %key, "Recipe cache miss");

        let recipe = producer().await?;
        self.insert(key, recipe.clone());
        Ok(recipe)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Clear all cached recipes. Hit and miss counters are kept.
    pub fn clear(&self) {
        self.write().clear();
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_recipe;
    use std::convert::Infallible;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_key_order_independent() {
        let a = CacheKey::new(&names(&["tomato", "basil", "garlic"]), ButtonState::new(3));
        let b = CacheKey::new(&names(&["garlic", "tomato", "basil"]), ButtonState::new(3));
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "basil,garlic,tomato-3");
    }

    #[test]
    fn test_key_distinguishes_state_and_multiset() {
        let base = CacheKey::new(&names(&["egg", "milk"]), ButtonState::new(0));
        assert_ne!(
            base,
            CacheKey::new(&names(&["egg", "milk"]), ButtonState::new(1))
        );
        assert_ne!(
            base,
            CacheKey::new(&names(&["egg", "milk", "milk"]), ButtonState::new(0))
        );
        // Joined rendering would collide here; the structured key does not
        assert_ne!(
            CacheKey::new(&names(&["a,b"]), ButtonState::new(0)),
            CacheKey::new(&names(&["a", "b"]), ButtonState::new(0))
        );
    }

    #[tokio::test]
    async fn test_get_or_create_runs_producer_once() {
        let cache = RecipeCache::default();
        let key = CacheKey::new(&names(&["egg"]), ButtonState::new(0));

        let first = cache
            .get_or_create(key.clone(), || async {
                Ok::<_, Infallible>(parse_recipe("Omelette"))
            })
            .await
            .unwrap();
        let second = cache
            .get_or_create(key, || async {
                Ok::<_, Infallible>(parse_recipe("Something Else"))
            })
            .await
            .unwrap();

        assert_eq!(first.title, "Omelette");
        assert_eq!(second, first);
        assert_eq!(
            cache.stats(),
            CacheStats {
                entries: 1,
                hits: 1,
                misses: 1
            }
        );
    }

    #[tokio::test]
    async fn test_producer_error_not_cached() {
        let cache = RecipeCache::default();
        let key = CacheKey::new(&names(&["egg"]), ButtonState::new(0));

        let result = cache
            .get_or_create(key.clone(), || async { Err::<StructuredRecipe, _>("down") })
            .await;
        assert_eq!(result.unwrap_err(), "down");
        assert!(cache.get(&key).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_parse_failure_policy() {
        let key = CacheKey::new(&names(&["egg"]), ButtonState::new(0));

        let caching = RecipeCache::new(true);
        assert!(caching.insert(key.clone(), StructuredRecipe::parse_failure("bad")));
        assert!(caching.get(&key).unwrap().is_parse_failure());

        let skipping = RecipeCache::new(false);
        assert!(!skipping.insert(key.clone(), StructuredRecipe::parse_failure("bad")));
        assert!(skipping.get(&key).is_none());
        assert!(skipping.insert(key.clone(), parse_recipe("Fine")));
        assert_eq!(skipping.len(), 1);
    }

    #[test]
    fn test_last_writer_wins_and_clear() {
        let cache = RecipeCache::default();
        let key = CacheKey::new(&names(&["egg"]), ButtonState::new(0));
        cache.insert(key.clone(), parse_recipe("First"));
        cache.insert(key.clone(), parse_recipe("Second"));
        assert_eq!(cache.get(&key).unwrap().title, "Second");
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
