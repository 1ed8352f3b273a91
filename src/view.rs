use crate::pager::{Page, Slot};
use std::io::{self, Write};

/// Where pages and prompt feedback end up.
pub trait PageView: Send {
    /// `true` when a page load starts, `false` once it has been shown.
    fn loading(&mut self, busy: bool) -> io::Result<()>;
    fn render(&mut self, page: &Page) -> io::Result<()>;
    fn message(&mut self, text: &str) -> io::Result<()>;
}

/// Plain text view, one block per slot.
pub struct TerminalView<W> {
    out: W,
}

impl<W: Write + Send> TerminalView<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write + Send> PageView for TerminalView<W> {
    fn loading(&mut self, busy: bool) -> io::Result<()> {
        if busy {
            writeln!(self.out, "Loading...")?;
        }
        self.out.flush()
    }

    fn render(&mut self, page: &Page) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "Page of {} around #{}", page.page_size, page.focus)?;
        for slot in &page.slots {
            match slot {
                Slot::Ready { num, comic } => {
                    let marker = if *num == page.focus { ">" } else { " " };
                    writeln!(self.out, "{} #{} {}", marker, comic.num, comic.title)?;
                    writeln!(self.out, "    {}", comic.img)?;
                }
                Slot::Failed { num, error } => {
                    writeln!(self.out, "  #{} could not be loaded ({})", num, error)?;
                }
            }
        }
        writeln!(self.out)?;
        self.out.flush()
    }

    fn message(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comic_client::FetchError;
    use crate::models::PageSize;
    use crate::test_utils::comic;

    #[test]
    fn renders_slots_in_order() {
        let page = Page {
            generation: 1,
            focus: 100,
            page_size: PageSize::Three,
            slots: vec![
                Slot::Ready {
                    num: 99,
                    comic: comic(99),
                },
                Slot::Ready {
                    num: 100,
                    comic: comic(100),
                },
                Slot::Failed {
                    num: 1,
                    error: FetchError::Timeout,
                },
            ],
        };
        let mut view = TerminalView::new(Vec::new());
        view.render(&page).unwrap();
        let text = String::from_utf8(view.into_inner()).unwrap();

        let expected = "\nPage of 3 around #100\n\
                        \x20 #99 Comic 99\n    https://imgs.example.com/99.png\n\
                        > #100 Comic 100\n    https://imgs.example.com/100.png\n\
                        \x20 #1 could not be loaded (timed out)\n\n";
        assert_eq!(expected, text);
    }

    #[test]
    fn loading_only_announces_start() {
        let mut view = TerminalView::new(Vec::new());
        view.loading(true).unwrap();
        view.loading(false).unwrap();

        assert_eq!("Loading...\n", String::from_utf8(view.into_inner()).unwrap());
    }
}
