use crate::command::{Command, HELP};
use crate::comic_client::{ComicSource, HttpComicSource};
use crate::configuration::Settings;
use crate::models::{ApiTarget, Cli, PageRequest, PageSize};
use crate::pager::{Page, Pager};
use crate::view::{PageView, TerminalView};
use anyhow::{anyhow, Context};
use log::{debug, error, info};
use rand::Rng;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

pub async fn run(settings: Settings, cli: Cli) -> anyhow::Result<()> {
    info!("Comic API: {}", settings.api_url);
    let source = Arc::new(HttpComicSource::new(&settings)?);
    let view = TerminalView::new(std::io::stdout());
    let page_size = cli.page_size.unwrap_or(settings.page_size);

    let mut session = Session::start(source, view, &settings, page_size).await?;
    let first = match cli.comic {
        Some(num) => session.jump_request(num)?,
        None => PageRequest::default(),
    };

    if cli.once {
        session.show(first).await?;
    } else {
        session.load(first)?;
        let stdin = BufReader::new(tokio::io::stdin());
        session.interact(stdin).await?;
    }

    info!("Finished!");
    Ok(())
}

/// A browsing session: one pager, one view, and the loads in flight.
pub struct Session<S, V> {
    source: Arc<S>,
    view: V,
    pager: Pager,
    slot_timeout: Duration,
    render_partial: bool,
    pages_tx: mpsc::UnboundedSender<Page>,
    pages_rx: mpsc::UnboundedReceiver<Page>,
    // generation shown as loading but not rendered yet
    awaiting: Option<u64>,
}

impl<S: ComicSource, V: PageView> Session<S, V> {
    /// Ask the source for the latest comic to learn how many there are.
    pub async fn start(
        source: Arc<S>,
        view: V,
        settings: &Settings,
        page_size: PageSize,
    ) -> anyhow::Result<Self> {
        let latest = source
            .fetch(ApiTarget::Latest)
            .await
            .context("Unable to fetch the latest comic")?;
        let total = NonZeroU32::new(latest.num)
            .ok_or_else(|| anyhow!("API reported the latest comic as #0"))?;
        info!("{} comics available, latest is \"{}\"", total, latest.title);

        let (pages_tx, pages_rx) = mpsc::unbounded_channel();
        Ok(Self {
            source,
            view,
            pager: Pager::new(total, page_size),
            slot_timeout: settings.slot_timeout(),
            render_partial: settings.render_partial,
            pages_tx,
            pages_rx,
            awaiting: None,
        })
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Jump to `num`, where 0 means the latest comic.
    pub fn jump_request(&self, num: u32) -> anyhow::Result<PageRequest> {
        let total = self.pager.total();
        if num > total {
            return Err(anyhow!(
                "Please enter a number in the range from 0 to {}.",
                total
            ));
        }
        Ok(PageRequest::jump(if num == 0 { total } else { num }))
    }

    /// Start loading a page in the background.
    pub fn load(&mut self, request: PageRequest) -> anyhow::Result<()> {
        self.view.loading(true)?;
        let load = self.pager.begin(request);
        self.awaiting = Some(load.generation);

        let source = Arc::clone(&self.source);
        let tx = self.pages_tx.clone();
        let slot_timeout = self.slot_timeout;
        tokio::spawn(async move {
            let page = load.fetch(source.as_ref(), slot_timeout).await;
            // receiver is gone once the session ends
            let _ = tx.send(page);
        });
        Ok(())
    }

    /// Wait for the next page from any load, current or not.
    pub async fn next_page(&mut self) -> Option<Page> {
        self.pages_rx.recv().await
    }

    /// Render `page` if it is still the one the user asked for last.
    ///
    /// Returns whether it was rendered.
    pub fn settle(&mut self, page: Page) -> anyhow::Result<bool> {
        if !self.pager.is_current(&page) {
            debug!(
                "Dropping stale page {} (current is {})",
                page.generation,
                self.pager.generation()
            );
            return Ok(false);
        }
        self.awaiting = None;

        if !page.is_complete() && !self.render_partial {
            error!(
                "Page {} has {} failed comics, not rendering",
                page.generation,
                page.failed()
            );
            self.view.loading(false)?;
            return Ok(false);
        }

        self.view.render(&page)?;
        self.view.loading(false)?;
        Ok(true)
    }

    /// Load one page and render it.
    pub async fn show(&mut self, request: PageRequest) -> anyhow::Result<bool> {
        self.load(request)?;
        self.wait_for_current().await
    }

    async fn wait_for_current(&mut self) -> anyhow::Result<bool> {
        while self.awaiting.is_some() {
            let Some(page) = self.next_page().await else {
                break;
            };
            let rendered = self.settle(page)?;
            if self.awaiting.is_none() {
                return Ok(rendered);
            }
        }
        Ok(false)
    }

    /// Read commands until `quit` or end of input.
    ///
    /// Pages render as they arrive, so a new command may supersede a load
    /// that is still running. At end of input the latest load is still shown.
    pub async fn interact<R: AsyncBufRead + Unpin>(&mut self, input: R) -> anyhow::Result<()> {
        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        self.wait_for_current().await?;
                        return Ok(());
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    if !self.handle(&line)? {
                        return Ok(());
                    }
                }
                Some(page) = self.pages_rx.recv() => {
                    self.settle(page)?;
                }
            }
        }
    }

    /// Act on one prompt line. Returns `false` when the session should end.
    fn handle(&mut self, line: &str) -> anyhow::Result<bool> {
        let command = match line.parse::<Command>() {
            Ok(c) => c,
            Err(e) => {
                self.view.message(&e.to_string())?;
                return Ok(true);
            }
        };

        let request = match command {
            Command::Next => PageRequest::next(),
            Command::Previous => PageRequest::previous(),
            Command::Size(size) => PageRequest::resize(size),
            Command::Random => {
                let num = rand::thread_rng().gen_range(1..=self.pager.total());
                PageRequest::jump(num)
            }
            Command::Go(num) => match self.jump_request(num) {
                Ok(r) => r,
                Err(e) => {
                    self.view.message(&e.to_string())?;
                    return Ok(true);
                }
            },
            Command::Help => {
                self.view.message(HELP)?;
                return Ok(true);
            }
            Command::Quit => return Ok(false),
        };

        self.load(request)?;
        Ok(true)
    }
}
