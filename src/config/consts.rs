// src/config/consts.rs

// Local store
pub const STORE_DIR: &str = ".store";
pub const STORE_FILE: &str = "reviews.jsonl";
pub const LOG_FILE: &str = "debug.log";
pub const CONFIG_FILE: &str = "review_scrape.toml";

// Sources
pub const DEFAULT_PAGES_DIR: &str = "pages";
pub const PAGE_SIZE: usize = 10; // reviews per listing page
pub const USER_AGENT: &str = "review_scrape/0.3";
pub const TIMEOUT_SECS: u64 = 20;

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "reviews";

// Concurrency
pub const WORKERS: usize = 4;
pub const REQUEST_PAUSE_MS: u64 = 750; // be polite
pub const JITTER_MS: u64 = 250; // extra 0..250 ms
