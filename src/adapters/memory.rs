use async_trait::async_trait;
use regex::RegexBuilder;

use crate::domain::model::Item;
use crate::domain::ports::{CandidateFilter, CandidateSource, Page};
use crate::utils::error::{ResolveError, Result};

/// Candidate source backed by a plain vector, seeded once at construction.
///
/// Filter semantics mirror the production store: text fields match a
/// case-insensitive regex, `max_rate` is an upper bound on the daily rate,
/// and pagination is skip/limit over the filtered list.
pub struct InMemoryCandidateSource {
    items: Vec<Item>,
}

impl InMemoryCandidateSource {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn text_matcher(field: &str, pattern: &str) -> Result<regex::Regex> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| ResolveError::InvalidInput {
                message: format!("bad {} filter '{}': {}", field, pattern, e),
            })
    }
}

#[async_trait]
impl CandidateSource for InMemoryCandidateSource {
    async fn search(&self, filter: &CandidateFilter, page: Page) -> Result<Vec<Item>> {
        let name = filter
            .name
            .as_deref()
            .map(|p| Self::text_matcher("name", p))
            .transpose()?;
        let category = filter
            .category
            .as_deref()
            .map(|p| Self::text_matcher("category", p))
            .transpose()?;
        let location = filter
            .location
            .as_deref()
            .map(|p| Self::text_matcher("location", p))
            .transpose()?;

        let skip = page.number.saturating_sub(1) * page.size;

        let matches: Vec<Item> = self
            .items
            .iter()
            .filter(|item| filter.available.map_or(true, |a| item.available == a))
            .filter(|item| filter.max_rate.map_or(true, |max| item.daily_rate <= max))
            .filter(|item| name.as_ref().map_or(true, |re| re.is_match(&item.name)))
            .filter(|item| {
                category
                    .as_ref()
                    .map_or(true, |re| re.is_match(&item.category))
            })
            .filter(|item| {
                location
                    .as_ref()
                    .map_or(true, |re| re.is_match(&item.location))
            })
            .skip(skip)
            .take(page.size)
            .cloned()
            .collect();

        Ok(matches)
    }
}
