// src/specs/attraction.rs
//
// Attraction listings: review cards with an aria-labelled rating widget, plus
// an "about" blurb and an address block once per page.
//
// Layout assumed by the defaults:
//   <div class="about-section">…</div>
//   <div class="address-section"><span>street, city</span></div>
//   <div data-review="card">
//     <div class="review-date">Written May 3, 2023</div>
//     <svg class="review-rating" aria-label="5.0 of 5 bubbles">…</svg>
//     <div class="review-title">…</div>
//     <div class="review-body">…</div>
//   </div>

use crate::engine::{FieldSpec, SelectorSet};

pub fn selectors() -> SelectorSet {
    SelectorSet {
        review: s!(r#"div[data-review="card"]"#),
        date: FieldSpec::text("div.review-date"),
        rating: FieldSpec::attr("svg.review-rating", "aria-label"),
        title: FieldSpec::text("div.review-title"),
        body: FieldSpec::text("div.review-body"),
        about: Some(FieldSpec::text("div.about-section")),
        address: Some(FieldSpec::text("div.address-section span")),
    }
}
