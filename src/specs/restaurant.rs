// src/specs/restaurant.rs
//
// Restaurant listings: review containers with the date in a `title`
// attribute and the score encoded as the second class token of the bubble
// widget (`bubble-rating bubble_45`). No about section; address only.
//
//   <span class="restaurant-address">…</span>
//   <div class="review-container">
//     <span class="rating-date" title="May 3, 2023">…</span>
//     <span class="bubble-rating bubble_45"></span>
//     <span class="review-title">…</span>
//     <p class="review-text">…</p>
//   </div>

use crate::engine::{FieldSpec, SelectorSet};

pub fn selectors() -> SelectorSet {
    SelectorSet {
        review: s!("div.review-container"),
        date: FieldSpec::attr("span.rating-date", "title"),
        rating: FieldSpec::class_token("span.bubble-rating", 1),
        title: FieldSpec::text("span.review-title"),
        body: FieldSpec::text("p.review-text"),
        about: None,
        address: Some(FieldSpec::text("span.restaurant-address")),
    }
}
