use crate::domain::model::Item;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Filters understood by the candidate store. Text fields are matched
/// case-insensitively; `None` means "no constraint".
#[derive(Debug, Clone, Default)]
pub struct CandidateFilter {
    pub available: Option<bool>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub max_rate: Option<f64>,
}

impl CandidateFilter {
    pub fn available_only() -> Self {
        Self {
            available: Some(true),
            ..Self::default()
        }
    }
}

/// 1-based pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub number: usize,
    pub size: usize,
}

impl Page {
    pub fn first(size: usize) -> Self {
        Self { number: 1, size }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            number: 1,
            size: 50,
        }
    }
}

/// Read-only access to the rentable-item population. Implementations may
/// return any finite subset; the caller ranks whatever it is given.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn search(&self, filter: &CandidateFilter, page: Page) -> Result<Vec<Item>>;
}
