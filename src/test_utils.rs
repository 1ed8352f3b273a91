use crate::comic_client::{ComicSource, FetchError};
use crate::models::{ApiTarget, Comic};
use crate::pager::Page;
use crate::view::PageView;
use anyhow::anyhow;
use serde_json::Map;
use std::collections::{HashMap, HashSet};
use std::future::Future;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use url::Url;

pub fn comic(num: u32) -> Comic {
    Comic {
        num,
        title: format!("Comic {}", num),
        img: Url::parse(&format!("https://imgs.example.com/{}.png", num)).unwrap(),
        extra: Map::new(),
    }
}

/// In-memory feed of `total` comics with per-comic failures and delays.
#[derive(Default)]
pub struct FakeSource {
    total: u32,
    fail: HashSet<u32>,
    fail_latest: bool,
    answer_with: Option<u32>,
    hang: HashSet<u32>,
    delays: HashMap<u32, Duration>,
    calls: Mutex<Vec<ApiTarget>>,
}

impl FakeSource {
    pub fn new(total: u32) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn fail(mut self, num: u32) -> Self {
        self.fail.insert(num);
        self
    }

    pub fn fail_latest(mut self) -> Self {
        self.fail_latest = true;
        self
    }

    /// Reply with comic `num` whatever number is asked for.
    pub fn answer_with(mut self, num: u32) -> Self {
        self.answer_with = Some(num);
        self
    }

    pub fn hang(mut self, num: u32) -> Self {
        self.hang.insert(num);
        self
    }

    pub fn delay(mut self, num: u32, delay: Duration) -> Self {
        self.delays.insert(num, delay);
        self
    }

    pub fn calls(&self) -> Vec<ApiTarget> {
        self.calls.lock().unwrap().clone()
    }
}

impl ComicSource for FakeSource {
    fn fetch(&self, target: ApiTarget) -> impl Future<Output = Result<Comic, FetchError>> + Send {
        self.calls.lock().unwrap().push(target);
        let (num, fail) = match target {
            ApiTarget::Latest => (self.total, self.fail_latest),
            ApiTarget::Number(n) => (n, self.fail.contains(&n)),
        };
        let hang = self.hang.contains(&num);
        let delay = self.delays.get(&num).copied();
        let num = match target {
            ApiTarget::Number(_) => self.answer_with.unwrap_or(num),
            ApiTarget::Latest => num,
        };

        async move {
            if hang {
                std::future::pending::<()>().await;
            }
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            if fail {
                return Err(FetchError::Transport(reqwest_middleware::Error::Middleware(
                    anyhow!("connection reset"),
                )));
            }
            Ok(comic(num))
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Loading(bool),
    Rendered(Vec<u32>),
    Message(String),
}

/// Remembers everything it was asked to show.
#[derive(Default)]
pub struct RecordingView {
    pub events: Vec<Event>,
    ready: Vec<Vec<u32>>,
}

impl RecordingView {
    pub fn renders(&self) -> Vec<Vec<u32>> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Rendered(numbers) => Some(numbers.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Message(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    /// Numbers of the comics that actually loaded on the last rendered page.
    pub fn ready_in_last_render(&self) -> Vec<u32> {
        self.ready.last().cloned().unwrap_or_default()
    }
}

impl PageView for RecordingView {
    fn loading(&mut self, busy: bool) -> io::Result<()> {
        self.events.push(Event::Loading(busy));
        Ok(())
    }

    fn render(&mut self, page: &Page) -> io::Result<()> {
        self.events.push(Event::Rendered(page.numbers()));
        self.ready
            .push(page.slots.iter().filter_map(|s| s.comic()).map(|c| c.num).collect());
        Ok(())
    }

    fn message(&mut self, text: &str) -> io::Result<()> {
        self.events.push(Event::Message(text.into()));
        Ok(())
    }
}
