// src/cli.rs
use std::{fs, path::{Path, PathBuf}};

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use color_eyre::eyre::{Result, WrapErr};
use tracing::{info, warn};

use crate::{
    config::{
        self,
        consts::{CONFIG_FILE, LOG_FILE},
        options::{ExportFormat, RecordKind, SourceKind},
    },
    core::html,
    data::PageResult,
    engine::{self, PageSpec},
    file, log,
    progress::Progress,
    scrape,
    specs::EntityType,
    store,
};

/// Paged review scraper: review and entity records as JSON Lines.
#[derive(Parser, Debug)]
#[command(name = "review_scrape", version, about)]
pub struct Cli {
    /// Config file (TOML). Missing is fine; defaults apply.
    #[arg(short, long, global = true, default_value = CONFIG_FILE)]
    pub config: PathBuf,

    /// More output (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Also append logs to debug.log in the store directory.
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Walk every page of each id and write the record store.
    Scrape {
        /// Entity ids (the join key written on every record).
        ids: Vec<String>,
        /// Entity type: attraction or restaurant.
        #[arg(short = 't', long)]
        entity_type: Option<String>,
        /// Read captured pages from <DIR>/<id>/<n>.html.
        #[arg(long, conflicts_with = "url")]
        pages: Option<PathBuf>,
        /// Fetch live pages; {id}, {page} and {offset} are filled in.
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        max_pages: Option<usize>,
        #[arg(long)]
        workers: Option<usize>,
        /// Base pause between requests, in milliseconds.
        #[arg(long)]
        pause_ms: Option<u64>,
        /// Record store path (JSON Lines).
        #[arg(long)]
        store: Option<PathBuf>,
        /// Also export after scraping.
        #[arg(short, long, value_enum)]
        format: Option<FormatArg>,
        /// Export file or directory.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Extract one saved HTML page and print its records as JSON lines.
    Extract {
        file: PathBuf,
        #[arg(long)]
        id: String,
        #[arg(short = 't', long)]
        entity_type: String,
    },
    /// Convert the record store to CSV/TSV (or copy it as JSONL).
    Export {
        #[arg(long)]
        store: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = FormatArg::Csv)]
        format: FormatArg,
        #[arg(short, long, value_enum, default_value_t = RecordsArg::Reviews)]
        records: RecordsArg,
        #[arg(short, long)]
        out: Option<PathBuf>,
        #[arg(long)]
        no_headers: bool,
    },
    /// Print the effective selector set for an entity type as TOML.
    Selectors {
        entity_type: String,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum FormatArg {
    Jsonl,
    Csv,
    Tsv,
}

impl From<FormatArg> for ExportFormat {
    fn from(f: FormatArg) -> Self {
        match f {
            FormatArg::Jsonl => ExportFormat::Jsonl,
            FormatArg::Csv => ExportFormat::Csv,
            FormatArg::Tsv => ExportFormat::Tsv,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum RecordsArg {
    Reviews,
    Entities,
}

impl From<RecordsArg> for RecordKind {
    fn from(r: RecordsArg) -> Self {
        match r {
            RecordsArg::Reviews => RecordKind::Reviews,
            RecordsArg::Entities => RecordKind::Entities,
        }
    }
}

/// Progress lines through the log.
struct LogProgress {
    done: usize,
    failed: usize,
    total: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }
    fn log(&mut self, msg: &str) {
        info!("{msg}");
    }
    fn item_done(&mut self, id: &str, records: usize) {
        self.done += 1;
        info!("{id}: {records} records ({}/{})", self.done + self.failed, self.total);
    }
    fn item_failed(&mut self, id: &str, msg: &str) {
        self.failed += 1;
        warn!("{id}: failed: {msg} ({}/{})", self.done + self.failed, self.total);
    }
    fn finish(&mut self) {
        info!("scrape complete: {} ok, {} failed", self.done, self.failed);
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut opts = config::file::load(&cli.config)
        .wrap_err_with(|| format!("loading {}", cli.config.display()))?;

    let log_path = cli.log_file.then(|| store_dir(&opts.export.store_path).join(LOG_FILE));
    log::init(cli.verbose, log_path.as_deref())?;

    match cli.command {
        Command::Scrape { ids, entity_type, pages, url, max_pages, workers, pause_ms, store: store_path, format, out } => {
            if !ids.is_empty() { opts.scrape.ids = ids; }
            if let Some(t) = entity_type { opts.scrape.entity_type = t.parse()?; }
            if let Some(dir) = pages { opts.scrape.source = SourceKind::Dir(dir); }
            if let Some(template) = url { opts.scrape.source = SourceKind::Url(template); }
            if max_pages.is_some() { opts.scrape.max_pages = max_pages; }
            if let Some(n) = workers { opts.scrape.workers = n; }
            if let Some(ms) = pause_ms { opts.scrape.request_pause_ms = ms; }
            if let Some(p) = store_path { opts.export.store_path = p; }
            if let Some(f) = format { opts.export.format = f.into(); }
            if out.is_some() { opts.export.out_path = out.clone(); }

            let mut progress = LogProgress { done: 0, failed: 0, total: 0 };
            let summary = scrape::run(&opts, Some(&mut progress))?;
            if !summary.failed.is_empty() {
                warn!("failed ids: {}", summary.failed.join(","));
            }

            if format.is_some() || out.is_some() {
                let path = file::export_records(&opts.export, &summary.records)?;
                println!("{}", path.display());
            } else {
                println!("{}", summary.store_path.display());
            }
        }
        Command::Extract { file, id, entity_type } => {
            let kind: EntityType = entity_type.parse()?;
            let spec = PageSpec::try_from(&opts.selectors_for(kind))?;
            let text = fs::read_to_string(&file)
                .wrap_err_with(|| format!("reading {}", file.display()))?;
            let doc = html::parse(&text);

            match engine::extract(&spec, &doc, &id)? {
                PageResult::EndOfContent => info!("no reviews on {}", file.display()),
                PageResult::Records(records) => {
                    for r in &records {
                        println!("{}", serde_json::to_string(r)?);
                    }
                }
            }
        }
        Command::Export { store: store_path, format, records, out, no_headers } => {
            if let Some(p) = store_path { opts.export.store_path = p; }
            opts.export.format = format.into();
            opts.export.records = records.into();
            opts.export.include_headers = !no_headers;
            if out.is_some() { opts.export.out_path = out; }

            let all = store::load_records(&opts.export.store_path)?;
            let path = file::export_records(&opts.export, &all)?;
            println!("{}", path.display());
        }
        Command::Selectors { entity_type } => {
            let kind: EntityType = entity_type.parse()?;
            print!("{}", toml::to_string_pretty(&opts.selectors_for(kind))?);
        }
    }

    Ok(())
}

fn store_dir(store_path: &Path) -> PathBuf {
    store_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn scrape_args_parse() {
        let cli = Cli::try_parse_from([
            "review_scrape", "-vv", "scrape", "d1", "d2", "-t", "restaurant", "--pages", "caps", "--max-pages", "3",
        ]).unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Scrape { ids, entity_type, pages, max_pages, .. } => {
                assert_eq!(ids, vec!["d1", "d2"]);
                assert_eq!(entity_type.as_deref(), Some("restaurant"));
                assert_eq!(pages, Some(PathBuf::from("caps")));
                assert_eq!(max_pages, Some(3));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn pages_and_url_conflict() {
        assert!(Cli::try_parse_from([
            "review_scrape", "scrape", "d1", "--pages", "p", "--url", "http://x/{id}",
        ]).is_err());
    }

    #[test]
    fn store_dir_of_bare_file_is_cwd() {
        assert_eq!(store_dir(Path::new("reviews.jsonl")), PathBuf::from("."));
        assert_eq!(store_dir(Path::new(".store/reviews.jsonl")), PathBuf::from(".store"));
    }
}
