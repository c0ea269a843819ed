//! Catalog configuration

use serde::{Deserialize, Serialize};

use super::errors::{CatalogError, CatalogResult};
use crate::reservation::DEFAULT_CAPACITY;

/// Tunables for a `LibraryCatalog`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Maximum pending reservations per book (default: 20)
    #[serde(default = "default_waitlist_capacity")]
    pub waitlist_capacity: usize,
}

fn default_waitlist_capacity() -> usize {
    DEFAULT_CAPACITY
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            waitlist_capacity: default_waitlist_capacity(),
        }
    }
}

impl CatalogConfig {
    pub fn with_waitlist_capacity(waitlist_capacity: usize) -> Self {
        Self { waitlist_capacity }
    }

    pub fn validate(&self) -> CatalogResult<()> {
        if self.waitlist_capacity == 0 {
            return Err(CatalogError::InvalidConfig(
                "waitlist_capacity must be > 0".to_string(),
            ));
        }
        Ok(())
    }
}
