// src/core/mod.rs

pub mod html;
#[cfg(feature = "http")]
pub mod net;
pub mod sanitize;
