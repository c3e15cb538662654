// src/core/net.rs
//
// Blocking HTTP GET for live review pages.

use std::time::Duration;

use reqwest::{blocking::Client, StatusCode};
use tracing::debug;

use crate::error::{Error, Result};

pub fn client(user_agent: &str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|source| Error::Http { url: s!("<client>"), source })
}

/// GET `url` as text. A 404 is `Ok(None)`: the listing has no such page.
pub fn http_get(client: &Client, url: &str) -> Result<Option<String>> {
    let resp = client
        .get(url)
        .send()
        .map_err(|source| Error::Http { url: s!(url), source })?;

    let status = resp.status();
    debug!(url, status = status.as_u16(), "fetched");
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        return Err(Error::HttpStatus { url: s!(url), status: status.as_u16() });
    }

    resp.text()
        .map(Some)
        .map_err(|source| Error::Http { url: s!(url), source })
}
