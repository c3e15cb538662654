// src/source.rs
//! Where review pages come from.
//!
//! The driver asks a [`PageSource`] for page `n` of an entity and treats
//! `Ok(None)` exactly like an exhausted listing.

use std::{fs, io, path::PathBuf};

use crate::core::sanitize::sanitize_id_filename;
use crate::error::{Error, Result};

pub trait PageSource: Sync {
    /// Raw HTML of page `page_index` (0-based) for entity `id`, or `None` when
    /// the source has no such page.
    fn fetch(&self, id: &str, page_index: usize) -> Result<Option<String>>;

    /// Short human label for logs.
    fn describe(&self) -> String;
}

/// Offline pages captured to disk: `<root>/<id>/<page_index>.html`.
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn page_path(&self, id: &str, page_index: usize) -> PathBuf {
        self.root
            .join(sanitize_id_filename(id))
            .join(format!("{page_index}.html"))
    }
}

impl PageSource for DirSource {
    fn fetch(&self, id: &str, page_index: usize) -> Result<Option<String>> {
        let path = self.page_path(id, page_index);
        match fs::read_to_string(&path) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Error::io(path, e)),
        }
    }

    fn describe(&self) -> String {
        format!("dir {}", self.root.display())
    }
}

/// Fill `{id}`, `{page}` and `{offset}` in a URL template.
/// `offset` is `page_index * page_size`, the usual "skip N reviews" paging.
pub fn build_url(template: &str, id: &str, page_index: usize, page_size: usize) -> String {
    template
        .replace("{id}", id)
        .replace("{page}", &page_index.to_string())
        .replace("{offset}", &(page_index * page_size).to_string())
}

#[cfg(feature = "http")]
pub use http::HttpSource;

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use reqwest::blocking::Client;

    use super::{build_url, PageSource};
    use crate::core::net;
    use crate::error::Result;

    /// Live pages over HTTP from a URL template.
    pub struct HttpSource {
        client: Client,
        template: String,
        page_size: usize,
    }

    impl HttpSource {
        pub fn new(template: &str, page_size: usize, user_agent: &str, timeout: Duration) -> Result<Self> {
            Ok(Self {
                client: net::client(user_agent, timeout)?,
                template: s!(template),
                page_size,
            })
        }
    }

    impl PageSource for HttpSource {
        fn fetch(&self, id: &str, page_index: usize) -> Result<Option<String>> {
            let url = build_url(&self.template, id, page_index, self.page_size);
            net::http_get(&self.client, &url)
        }

        fn describe(&self) -> String {
            format!("http {}", self.template)
        }
    }
}
