// src/config/file.rs
//
// Optional TOML config file overlaying the defaults. Every table and key is
// optional; absent ones keep their `Default`.
//
//   [scrape]
//   entity_type = "restaurant"
//   ids = ["d1234", "d5678"]
//   source = { url = "https://example.test/Reviews-{id}-or{offset}.html" }
//   max_pages = 20
//
//   [export]
//   format = "csv"
//
//   [selectors.restaurant]
//   review = "div.review-container"
//   ...

use std::{fs, io, path::Path};

use tracing::debug;

use super::options::AppOptions;
use crate::error::{Error, Result};

/// Load options from `path`. A missing file gives the defaults; a file that
/// exists but does not parse (or names an unknown entity type) is an error.
pub fn load(path: &Path) -> Result<AppOptions> {
    let text = match fs::read_to_string(path) {
        Ok(t) => t,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(AppOptions::default());
        }
        Err(e) => return Err(Error::io(path, e)),
    };
    let opts = parse(&text).map_err(|source| Error::Config { path: path.to_path_buf(), source })?;
    opts.validate()?;
    debug!(path = %path.display(), "loaded config");
    Ok(opts)
}

pub fn parse(text: &str) -> Result<AppOptions, toml::de::Error> {
    toml::from_str(text)
}

pub fn save(path: &Path, opts: &AppOptions) -> Result<()> {
    let text = toml::to_string_pretty(opts)?;
    if let Some(parent) = path.parent() {
        crate::file::ensure_directory(parent)?;
    }
    fs::write(path, text).map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::{ExportFormat, SourceKind};
    use crate::specs::EntityType;

    #[test]
    fn missing_file_gives_defaults() {
        let tmp = tempfile::tempdir().unwrap();
        let opts = load(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(opts, AppOptions::default());
    }

    #[test]
    fn partial_file_overlays_defaults() {
        let opts = parse(r#"
            [scrape]
            entity_type = "restaurant"
            ids = ["d1", "d2"]
            source = { url = "https://example.test/{id}/{offset}" }

            [export]
            format = "tsv"

            [selectors.restaurant]
            review = "li.review"
            date = { selector = "span.when", read = { attr = "title" } }
            rating = { selector = "span.bubble", read = { class_token = 1 } }
            title = { selector = "h4" }
            body = { selector = "p" }
        "#).unwrap();

        assert_eq!(opts.scrape.entity_type, EntityType::Restaurant);
        assert_eq!(opts.scrape.ids, vec!["d1", "d2"]);
        assert_eq!(opts.scrape.source, SourceKind::Url(s!("https://example.test/{id}/{offset}")));
        assert_eq!(opts.scrape.page_size, crate::config::consts::PAGE_SIZE);
        assert_eq!(opts.export.format, ExportFormat::Tsv);
        assert_eq!(opts.selectors_for(EntityType::Restaurant).review, "li.review");
        assert!(opts.selectors_for(EntityType::Restaurant).address.is_none());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bad.toml");
        fs::write(&path, "[scrape\nids = 3").unwrap();
        assert!(matches!(load(&path), Err(Error::Config { .. })));
    }

    #[test]
    fn saved_file_loads_back() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cfg").join("review_scrape.toml");
        let mut opts = AppOptions::default();
        opts.scrape.ids = vec![s!("d9")];
        opts.scrape.max_pages = Some(3);
        save(&path, &opts).unwrap();
        assert_eq!(load(&path).unwrap(), opts);
    }
}
