//! Page loading.
//!
//! A [`Pager`] owns the focus, page size and generation counter. Each
//! navigation produces a [`PageLoad`] that fetches its own slots and yields a
//! [`Page`] tagged with the generation it was started under, so a page from a
//! superseded load can be recognised and dropped.

use crate::comic_client::{ComicSource, FetchError};
use crate::models::{ApiTarget, Comic, PageRequest, PageSize};
use crate::normalize::{normalize, slot_numbers};
use futures::future::join_all;
use log::{debug, error, info};
use std::num::NonZeroU32;
use std::time::Duration;

#[derive(Debug)]
pub struct Pager {
    total: NonZeroU32,
    focus: u32,
    page_size: PageSize,
    generation: u64,
}

impl Pager {
    /// Start focused on the latest comic, `total`.
    pub fn new(total: NonZeroU32, page_size: PageSize) -> Self {
        Self {
            total,
            focus: total.get(),
            page_size,
            generation: 0,
        }
    }

    pub fn total(&self) -> u32 {
        self.total.get()
    }

    pub fn focus(&self) -> u32 {
        self.focus
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Apply a navigation request and describe the page to fetch.
    ///
    /// Every call starts a new generation, superseding loads still in flight.
    pub fn begin(&mut self, request: PageRequest) -> PageLoad {
        if let Some(size) = request.page_size {
            self.page_size = size;
        }

        self.focus = match request.target {
            Some(target) => normalize(i64::from(target), self.total),
            None => {
                let offset = request.movement.saturating_mul(self.page_size.get() as i64);
                normalize(i64::from(self.focus).saturating_add(offset), self.total)
            }
        };

        self.generation += 1;
        let numbers = slot_numbers(self.focus, self.page_size, self.total);
        info!(
            "Loading page {} around #{} ({} comics)",
            self.generation, self.focus, self.page_size
        );
        debug!("Slots {:?}", numbers);

        PageLoad {
            generation: self.generation,
            focus: self.focus,
            page_size: self.page_size,
            numbers,
        }
    }

    /// Whether `page` belongs to the most recent load.
    pub fn is_current(&self, page: &Page) -> bool {
        page.generation == self.generation
    }
}

/// One generation's worth of slots waiting to be fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLoad {
    pub generation: u64,
    pub focus: u32,
    pub page_size: PageSize,
    pub numbers: Vec<u32>,
}

impl PageLoad {
    /// Fetch every slot concurrently and wait until all of them settle.
    ///
    /// Failures and timeouts are logged and kept in their slot; they never
    /// hold the page back.
    pub async fn fetch<S: ComicSource>(self, source: &S, slot_timeout: Duration) -> Page {
        let fetches: Vec<_> = self
            .numbers
            .iter()
            .map(|&num| fetch_slot(source, num, slot_timeout))
            .collect();
        let slots = join_all(fetches).await;

        Page {
            generation: self.generation,
            focus: self.focus,
            page_size: self.page_size,
            slots,
        }
    }
}

async fn fetch_slot<S: ComicSource>(source: &S, num: u32, slot_timeout: Duration) -> Slot {
    let request = source.fetch(ApiTarget::Number(num));
    let result = tokio::time::timeout(slot_timeout, request)
        .await
        .unwrap_or(Err(FetchError::Timeout));
    match result {
        Ok(comic) => Slot::Ready { num, comic },
        Err(e) => {
            error!("Request for comic #{} failed: {}", num, e);
            Slot::Failed { num, error: e }
        }
    }
}

#[derive(Debug)]
pub enum Slot {
    Ready { num: u32, comic: Comic },
    Failed { num: u32, error: FetchError },
}

impl Slot {
    /// The comic number this slot was asked for.
    pub fn num(&self) -> u32 {
        match self {
            Slot::Ready { num, .. } | Slot::Failed { num, .. } => *num,
        }
    }

    pub fn comic(&self) -> Option<&Comic> {
        match self {
            Slot::Ready { comic, .. } => Some(comic),
            Slot::Failed { .. } => None,
        }
    }
}

/// A settled page, slots in display order.
#[derive(Debug)]
pub struct Page {
    pub generation: u64,
    pub focus: u32,
    pub page_size: PageSize,
    pub slots: Vec<Slot>,
}

impl Page {
    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.comic().is_some())
    }

    pub fn failed(&self) -> usize {
        self.slots.iter().filter(|s| s.comic().is_none()).count()
    }

    pub fn numbers(&self) -> Vec<u32> {
        self.slots.iter().map(Slot::num).collect()
    }
}
