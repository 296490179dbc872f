//! Caller-owned paging state for a product listing.
//!
//! The client never deduplicates requests. A `ListingSession` is the guard a
//! caller keeps to avoid asking for the same page twice: it is either idle or
//! loading, advances one page at a time and only ever appends items.

use crate::core::client::MarketClient;
use crate::domain::model::{Product, ProductPage};
use crate::domain::ports::{PageObserver, Transport};
use crate::utils::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
}

#[derive(Debug, Clone)]
pub struct ListingSession {
    items_per_page: u32,
    next_page: u32,
    has_next: bool,
    state: LoadState,
    items: Vec<Product>,
}

impl ListingSession {
    pub fn new(items_per_page: u32) -> Self {
        Self {
            items_per_page: items_per_page.max(1),
            next_page: 1,
            has_next: true,
            state: LoadState::Idle,
            items: Vec::new(),
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn items_per_page(&self) -> u32 {
        self.items_per_page
    }

    pub fn has_more(&self) -> bool {
        self.has_next
    }

    /// Marks the session as loading and returns the page to request, or
    /// `None` while a request is outstanding or after the last page.
    pub fn begin_fetch(&mut self) -> Option<u32> {
        if self.state == LoadState::Loading || !self.has_next {
            return None;
        }
        self.state = LoadState::Loading;
        Some(self.next_page)
    }

    /// Appends a loaded page. A page older than the one requested is not
    /// appended and ends the session, so page numbers never go backwards.
    pub fn complete(&mut self, page: &ProductPage) -> Result<(), ClientError> {
        self.state = LoadState::Idle;
        if page.page_number < self.next_page {
            self.has_next = false;
            return Err(ClientError::DecodeFailure(format!(
                "requested page {} but received page {}",
                self.next_page, page.page_number
            )));
        }
        self.items.extend(page.items.iter().cloned());
        match page.page_number.checked_add(1) {
            Some(next_page) => {
                self.next_page = next_page;
                self.has_next = page.has_next_page;
            }
            None => self.has_next = false,
        }
        Ok(())
    }

    /// Returns to idle after a failed fetch; the same page is requested next.
    pub fn fail(&mut self) {
        self.state = LoadState::Idle;
    }

    /// Fetches the next page through `client` and reports to `observer`.
    /// Returns `false` when nothing was requested.
    pub async fn load_next<T, O>(&mut self, client: &MarketClient<T>, observer: &mut O) -> bool
    where
        T: Transport + 'static,
        O: PageObserver + ?Sized,
    {
        let Some(page_no) = self.begin_fetch() else {
            return false;
        };

        match client.list_page(page_no, self.items_per_page).await {
            Ok(page) => match self.complete(&page) {
                Ok(()) => observer.on_page_loaded(&page),
                Err(error) => observer.on_error(&error),
            },
            Err(error) => {
                self.fail();
                observer.on_error(&error);
            }
        }
        true
    }
}

/// Observer that keeps everything it is told; handy for callers that only
/// want the final outcome.
#[derive(Debug, Default)]
pub struct CollectingObserver {
    pub pages: Vec<ProductPage>,
    pub errors: Vec<ClientError>,
}

impl PageObserver for CollectingObserver {
    fn on_page_loaded(&mut self, page: &ProductPage) {
        self.pages.push(page.clone());
    }

    fn on_error(&mut self, error: &ClientError) {
        self.errors.push(error.clone());
    }
}
