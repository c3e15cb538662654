// tests/common/mod.rs
//
// HTML fixtures shaped like the built-in selectors expect.
#![allow(dead_code)]

use std::fs;
use std::path::Path;

use review_scrape::core::sanitize::sanitize_id_filename;

pub struct Review<'a> {
    pub date: Option<&'a str>,
    pub rating: Option<&'a str>,
    pub title: Option<&'a str>,
    pub body: Option<&'a str>,
}

impl<'a> Review<'a> {
    pub fn full(title: &'a str, body: &'a str) -> Self {
        Self { date: Some("May 2023"), rating: Some("4"), title: Some(title), body: Some(body) }
    }

    pub fn without_title(body: &'a str) -> Self {
        Self { title: None, ..Self::full("", body) }
    }
}

pub fn attraction_page(about: Option<&str>, address: Option<&str>, reviews: &[Review]) -> String {
    let mut html = String::from("<html><body>");
    if let Some(a) = about {
        html.push_str(&format!("<div class=\"about-section\">{a}</div>"));
    }
    if let Some(a) = address {
        html.push_str(&format!("<div class=\"address-section\"><span>{a}</span></div>"));
    }
    for r in reviews {
        html.push_str("<div data-review=\"card\">");
        if let Some(d) = r.date {
            html.push_str(&format!("<div class=\"review-date\">{d}</div>"));
        }
        if let Some(x) = r.rating {
            html.push_str(&format!("<svg class=\"review-rating\" aria-label=\"{x}.0 of 5 bubbles\"></svg>"));
        }
        if let Some(t) = r.title {
            html.push_str(&format!("<div class=\"review-title\">{t}</div>"));
        }
        if let Some(b) = r.body {
            html.push_str(&format!("<div class=\"review-body\">{b}</div>"));
        }
        html.push_str("</div>");
    }
    html.push_str("</body></html>");
    html
}

pub fn restaurant_page(address: Option<&str>, reviews: &[Review]) -> String {
    let mut html = String::from("<html><body>");
    if let Some(a) = address {
        html.push_str(&format!("<span class=\"restaurant-address\">{a}</span>"));
    }
    for r in reviews {
        html.push_str("<div class=\"review-container\">");
        if let Some(d) = r.date {
            html.push_str(&format!("<span class=\"rating-date\" title=\"{d}\">2 weeks ago</span>"));
        }
        if let Some(x) = r.rating {
            html.push_str(&format!("<span class=\"bubble-rating bubble_{x}0\"></span>"));
        }
        if let Some(t) = r.title {
            html.push_str(&format!("<span class=\"review-title\">{t}</span>"));
        }
        if let Some(b) = r.body {
            html.push_str(&format!("<p class=\"review-text\">{b}</p>"));
        }
        html.push_str("</div>");
    }
    html.push_str("</body></html>");
    html
}

/// Lay pages out the way `DirSource` reads them.
pub fn write_pages(root: &Path, id: &str, pages: &[String]) {
    let dir = root.join(sanitize_id_filename(id));
    fs::create_dir_all(&dir).unwrap();
    for (i, html) in pages.iter().enumerate() {
        fs::write(dir.join(format!("{i}.html")), html).unwrap();
    }
}
