use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Deserialize;

use crate::error::{PipewatchError, Result};

use super::line::{parse_duration, LineMatcher};

/// Test name -> last seen duration (seconds), ordered by name.
pub type TestTimings = BTreeMap<String, f64>;

/// What to do with a testcase line whose duration is not a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedDuration {
    /// Abort the scrape with `InvalidDuration`.
    #[default]
    Fail,
    /// Drop the line and count it in `Scrape::skipped_lines`.
    Skip,
}

/// Result of scanning one build log once.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scrape {
    pub timings: TestTimings,
    pub failure_count: u64,
    /// Lines dropped under `MalformedDuration::Skip`.
    pub skipped_lines: u64,
    pub lines: u64,
}

/// Single-pass build-log scanner.
#[derive(Debug, Clone)]
pub struct Scraper {
    matcher: LineMatcher,
    on_malformed: MalformedDuration,
}

impl Scraper {
    pub fn new(on_malformed: MalformedDuration) -> Result<Self> {
        Ok(Self {
            matcher: LineMatcher::new()?,
            on_malformed,
        })
    }

    pub fn scrape_file(&self, path: &Path) -> Result<Scrape> {
        let file = File::open(path)
            .map_err(|e| PipewatchError::LogRead(format!("open {}: {e}", path.display())))?;
        self.scrape_reader(BufReader::new(file))
    }

    pub fn scrape_str(&self, text: &str) -> Result<Scrape> {
        self.scrape_reader(text.as_bytes())
    }

    pub fn scrape_reader<R: BufRead>(&self, reader: R) -> Result<Scrape> {
        let mut out = Scrape::default();

        for line in reader.lines() {
            let line = line.map_err(|e| PipewatchError::LogRead(format!("read line: {e}")))?;
            out.lines += 1;
            self.apply(&line, &mut out)?;
        }

        Ok(out)
    }

    fn apply(&self, line: &str, out: &mut Scrape) -> Result<()> {
        let m = self.matcher.match_line(line);

        if m.failure {
            out.failure_count += 1;
        }

        let Some(tc) = m.testcase else { return Ok(()) };

        match parse_duration(tc.duration) {
            Some(secs) => {
                // Last occurrence wins.
                out.timings.insert(tc.name.to_string(), secs);
            }
            None => match self.on_malformed {
                MalformedDuration::Fail => {
                    return Err(PipewatchError::InvalidDuration {
                        test: tc.name.to_string(),
                        raw: tc.duration.to_string(),
                    });
                }
                MalformedDuration::Skip => {
                    tracing::warn!(
                        test = %tc.name,
                        raw = %tc.duration,
                        "skipping testcase with malformed duration"
                    );
                    out.skipped_lines += 1;
                }
            },
        }

        Ok(())
    }
}
