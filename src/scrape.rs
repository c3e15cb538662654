// src/scrape.rs
use std::{
    collections::HashSet, path::PathBuf, thread,
    sync::{ mpsc, atomic::{ AtomicUsize, Ordering }}
};

use tracing::{debug, error, info};

use crate::{
    config::options::{AppOptions, ScrapeOptions, SourceKind},
    core::html,
    data::{PageResult, Record},
    engine::{self, PageSpec},
    error::{Error, Result},
    progress::Progress,
    source::{DirSource, PageSource},
    store,
};

/// Summary of what a run produced.
pub struct RunSummary {
    pub store_path: PathBuf,
    pub entities: usize,
    pub failed: Vec<String>,
    pub records: Vec<Record>,
}

/// Top-level: open the configured source, scrape every id, write the store.
pub fn run(
    opts: &AppOptions,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let source = open_source(&opts.scrape)?;
    info!(source = %source.describe(), entity_type = %opts.scrape.entity_type, "scraping {} ids", opts.scrape.ids.len());

    let per_entity = collect_all(opts, source.as_ref(), progress)?;

    let done: HashSet<&str> = per_entity.iter().map(|(id, _)| id.as_str()).collect();
    let failed: Vec<String> = opts.scrape.ids
        .iter()
        .filter(|id| !done.contains(id.as_str()))
        .cloned()
        .collect();
    let entities = per_entity.len();
    let records: Vec<Record> = per_entity.into_iter().flat_map(|(_, r)| r).collect();

    let store_path = opts.export.store_path.clone();
    store::write_records(&store_path, &records)?;
    info!(path = %store_path.display(), "stored {} records for {} ids", records.len(), entities);

    Ok(RunSummary { store_path, entities, failed, records })
}

/// Build the page source named by the options.
pub fn open_source(scrape: &ScrapeOptions) -> Result<Box<dyn PageSource>> {
    match &scrape.source {
        SourceKind::Dir(root) => Ok(Box::new(DirSource::new(root))),
        #[cfg(feature = "http")]
        SourceKind::Url(template) => Ok(Box::new(crate::source::HttpSource::new(
            template,
            scrape.page_size,
            &scrape.user_agent,
            scrape.timeout(),
        )?)),
        #[cfg(not(feature = "http"))]
        SourceKind::Url(_) => Err(Error::Options(s!("URL sources need the `http` feature"))),
    }
}

/// Walk the pages of one entity until the listing runs out.
///
/// Stops on `EndOfContent`, on a page the source doesn't have, or after
/// `max_pages`. Only the first metadata record is kept.
pub fn collect_entity(
    spec: &PageSpec,
    source: &dyn PageSource,
    id: &str,
    scrape: &ScrapeOptions,
) -> Result<Vec<Record>> {
    let mut out: Vec<Record> = Vec::new();
    let mut have_entity = false;

    for page_index in 0.. {
        if scrape.max_pages.is_some_and(|max| page_index >= max) {
            debug!(id, page_index, "page limit reached");
            break;
        }
        if page_index > 0 {
            thread::sleep(scrape.pause_for(id, page_index)); // be polite
        }

        let Some(text) = source.fetch(id, page_index)? else {
            debug!(id, page_index, "source has no more pages");
            break;
        };
        let doc = html::parse(&text);

        let records = match engine::extract(spec, &doc, id)? {
            PageResult::EndOfContent => break,
            PageResult::Records(records) => records,
        };
        debug!(id, page_index, "page yielded {} records", records.len());

        for record in records {
            if let Record::Entity(_) = record {
                if have_entity { continue; }
                have_entity = true;
            }
            out.push(record);
        }
    }

    Ok(out)
}

/// Scrape every configured id on a small worker pool.
///
/// Results come back in configured id order. An id that fails is logged and
/// reported to `progress`, and left out of the result.
pub fn collect_all(
    opts: &AppOptions,
    source: &dyn PageSource,
    mut progress: Option<&mut dyn Progress>,
) -> Result<Vec<(String, Vec<Record>)>> {
    let scrape = &opts.scrape;
    let ids = &scrape.ids;
    if ids.is_empty() {
        return Err(Error::Options(s!("no entity ids to scrape")));
    }
    scrape.validate_ids()?;

    // Fail fast on bad selectors before any request goes out.
    let selectors = opts.selectors_for(scrape.entity_type);
    PageSpec::try_from(&selectors)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(ids.len());
        p.log(&format!("Scraping {} {} ids from {}", ids.len(), scrape.entity_type, source.describe()));
    }

    type Outcome = (usize, std::result::Result<Vec<Record>, String>);

    let counter = AtomicUsize::new(0);
    let (res_tx, res_rx) = mpsc::channel::<Outcome>();
    let workers = scrape.workers.min(ids.len()).max(1);

    let mut slots: Vec<Option<Vec<Record>>> = vec![None; ids.len()];

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = res_tx.clone();
            let counter = &counter;
            let selectors = &selectors;

            scope.spawn(move || {
                // Compiled per worker; nothing parsed crosses threads.
                let spec = PageSpec::try_from(selectors);
                loop {
                    let i = counter.fetch_add(1, Ordering::Relaxed);
                    if i >= ids.len() {
                        break;
                    }
                    let id = &ids[i];
                    let result = match &spec {
                        Ok(spec) => collect_entity(spec, source, id, scrape).map_err(|e| e.to_string()),
                        Err(e) => Err(e.to_string()),
                    };
                    let _ = tx.send((i, result));
                    if i + workers < ids.len() {
                        thread::sleep(scrape.pause_for(id, 0));
                    }
                }
            });
        }
        drop(res_tx); // main thread is sole receiver now

        for (i, result) in res_rx.iter() {
            let id = ids[i].as_str();
            match result {
                Ok(records) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_done(id, records.len());
                    }
                    slots[i] = Some(records);
                }
                Err(msg) => {
                    error!(id, "scrape failed: {msg}");
                    if let Some(p) = progress.as_deref_mut() {
                        p.item_failed(id, &msg);
                    }
                }
            }
        }
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }

    Ok(ids
        .iter()
        .zip(slots)
        .filter_map(|(id, records)| records.map(|r| (id.clone(), r)))
        .collect())
}
