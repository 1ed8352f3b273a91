use crate::models::PageSize;
use clap::Parser;

/// Browse a circular comic feed a page at a time.
#[derive(clap::Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    #[arg(short, long, default_value = "comics")]
    pub config_file: String,

    /// Comic to focus on first, latest when omitted
    #[arg(short = 'n', long)]
    pub comic: Option<u32>,

    /// Initial page size (1, 3 or 5), overrides the config file
    #[arg(short, long)]
    pub page_size: Option<PageSize>,

    /// Render a single page and exit
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self::new()
    }
}
