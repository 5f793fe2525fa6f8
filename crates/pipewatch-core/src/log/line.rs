use regex::Regex;

use crate::error::{PipewatchError, Result};

/// Literal marker counted once per line as a pipeline failure.
pub const FAILURE_MARKER: &str = "Finished: FAILURE";

const TESTCASE_TAG: &str = "Testcase:";
const TIME_TAG: &str = "time=";
const TESTCASE_PATTERN: &str = r"Testcase: (.+?) time=(.+?)s";

/// Raw captures of a testcase line, not yet converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawTestcase<'a> {
    pub name: &'a str,
    pub duration: &'a str,
}

/// What a single log line contributes to a scrape.
///
/// Both fields are evaluated independently; one line may carry a failure
/// marker and a testcase at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineMatch<'a> {
    pub failure: bool,
    pub testcase: Option<RawTestcase<'a>>,
}

impl LineMatch<'_> {
    pub fn is_empty(&self) -> bool {
        !self.failure && self.testcase.is_none()
    }
}

/// Compiled line matcher. Construct once, reuse for every line.
#[derive(Debug, Clone)]
pub struct LineMatcher {
    testcase: Regex,
}

impl LineMatcher {
    pub fn new() -> Result<Self> {
        let testcase = Regex::new(TESTCASE_PATTERN)
            .map_err(|e| PipewatchError::Internal(format!("testcase pattern: {e}")))?;
        Ok(Self { testcase })
    }

    /// Classify one line (without its trailing newline).
    pub fn match_line<'a>(&self, line: &'a str) -> LineMatch<'a> {
        let failure = line.contains(FAILURE_MARKER);

        let testcase = if line.contains(TESTCASE_TAG) && line.contains(TIME_TAG) {
            self.testcase.captures(line).and_then(|caps| {
                let name = caps.get(1)?.as_str();
                let duration = caps.get(2)?.as_str();
                Some(RawTestcase { name, duration })
            })
        } else {
            None
        };

        LineMatch { failure, testcase }
    }
}

/// Convert a captured duration to seconds. Surrounding whitespace is ignored.
pub fn parse_duration(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}
