//! Build-log scraping.
//!
//! `line` holds the pure per-line matcher; `scrape` folds matched lines into a
//! [`Scrape`] for one polling cycle. Nothing here keeps state across cycles.

pub mod line;
pub mod scrape;

pub use line::{parse_duration, LineMatch, LineMatcher, RawTestcase, FAILURE_MARKER};
pub use scrape::{MalformedDuration, Scrape, Scraper, TestTimings};
