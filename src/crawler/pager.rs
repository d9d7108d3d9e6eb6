//! Bundle pagination
//!
//! A search result is a chain of Bundle pages linked by `next` relations. The
//! pager walks that chain with an explicit cursor, one page per call.

use crate::crawler::FhirClient;
use crate::fhir::Bundle;
use crate::url::fixup_url;
use crate::Result;

/// Pull-based cursor over the pages of one search
///
/// Each call to [`Pager::next_page`] fetches exactly one page. The sequence is
/// finite only if the server's `next` chain is; there is no cycle detection
/// and no page cap. Once the pager returns `None` or an error it is
/// exhausted and cannot be restarted.
#[derive(Debug)]
pub struct Pager<'a> {
    client: &'a FhirClient,
    cursor: Option<String>,
    pages_fetched: usize,
}

impl<'a> Pager<'a> {
    /// Creates a pager whose first request goes to `start_url`
    pub fn new(client: &'a FhirClient, start_url: impl Into<String>) -> Self {
        Self {
            client,
            cursor: Some(start_url.into()),
            pages_fetched: 0,
        }
    }

    /// Fetches the next page
    ///
    /// The cursor is rewritten onto the client's base URL before the request.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Bundle))` - The next page
    /// * `Ok(None)` - The previous page had no `next` link
    /// * `Err(WalkError)` - The fetch failed; the pager is now exhausted
    pub async fn next_page(&mut self) -> Result<Option<Bundle>> {
        let Some(cursor) = self.cursor.take() else {
            return Ok(None);
        };

        let url = fixup_url(&cursor, self.client.base_url())?;
        let page: Bundle = self.client.get_json(&url, &[]).await?;

        self.cursor = page.next_link().map(str::to_string);
        self.pages_fetched += 1;

        tracing::trace!(
            "Page {} from {}: {} entries, next: {:?}",
            self.pages_fetched,
            url,
            page.entry.len(),
            self.cursor
        );

        Ok(Some(page))
    }

    /// Returns the number of pages yielded so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Returns true if no further page will be fetched
    pub fn is_exhausted(&self) -> bool {
        self.cursor.is_none()
    }
}
