//! Page-walking over the search endpoints

use super::traits::{AccessToken, AlvysApi};
use crate::domain::{EntityKind, RawRecord, Result};
use serde_json::{json, Map, Value};

/// Fetches every page of an entity search
///
/// Pages are requested sequentially starting at page 0. The walk stops
/// when a page comes back empty or short, when the server-reported total
/// has been collected, or when `max_items` records have accumulated. The
/// result is truncated to `max_items`.
pub struct Paginator<'a, A: AlvysApi + ?Sized> {
    api: &'a A,
    page_size: usize,
    max_items: Option<usize>,
}

impl<'a, A: AlvysApi + ?Sized> Paginator<'a, A> {
    pub fn new(api: &'a A, page_size: usize) -> Self {
        Self {
            api,
            page_size: page_size.max(1),
            max_items: None,
        }
    }

    /// Caps the number of returned records; zero means no cap
    pub fn with_max_items(mut self, max_items: Option<usize>) -> Self {
        self.max_items = max_items.filter(|n| *n > 0);
        self
    }

    /// Walks all pages of `entity` using `base_payload` as the request body
    ///
    /// `on_page` is called with the page number before each request.
    ///
    /// # Errors
    ///
    /// The first failing page aborts the walk; nothing collected so far is
    /// returned.
    pub async fn fetch_all(
        &self,
        entity: EntityKind,
        token: &AccessToken,
        base_payload: &Map<String, Value>,
        on_page: &mut (dyn FnMut(u32) + Send),
    ) -> Result<Vec<RawRecord>> {
        let mut page: u32 = 0;
        let mut items: Vec<RawRecord> = Vec::new();

        loop {
            let mut payload = base_payload.clone();
            payload.insert("page".to_string(), json!(page));
            payload.insert("pageSize".to_string(), json!(self.page_size));

            on_page(page);
            let result = self.api.search(entity, token, &payload).await?;
            let received = result.items.len();

            tracing::debug!(
                entity = %entity,
                page = page,
                received = received,
                total = ?result.total,
                "Fetched search page"
            );

            if received == 0 {
                break;
            }
            items.extend(result.items);

            if received < self.page_size {
                break;
            }
            if self.max_items.is_some_and(|cap| items.len() >= cap) {
                break;
            }
            if result.total.is_some_and(|total| items.len() as u64 >= total) {
                break;
            }

            page += 1;
        }

        if let Some(cap) = self.max_items {
            items.truncate(cap);
        }

        tracing::info!(
            entity = %entity,
            pages = page + 1,
            records = items.len(),
            "Search complete"
        );

        Ok(items)
    }
}
