//! Immutable progress snapshot and its total conversion from raw records.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::status::ProgressStatus;

/// Placeholder title shown before the gallery title is known.
pub const TITLE_PLACEHOLDER: &str = "Preparing...";

/// Optional page range restriction on a download (display only).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRange {
    /// Whether a range restriction is in effect.
    pub enabled: bool,
    /// First page of the range (1-based).
    pub start: u64,
    /// Last page of the range; `None` means open-ended.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<u64>,
}

impl PageRange {
    /// Display text for the range, or `None` when no range is in effect.
    #[must_use]
    pub fn display_text(&self) -> Option<String> {
        if !self.enabled {
            return None;
        }
        match self.end {
            Some(end) => Some(format!("range {}-{}", self.start, end)),
            None => Some(format!("range {}-", self.start)),
        }
    }
}

/// Immutable view of one download task's progress at a point in time.
///
/// Snapshots are "UI safe": `Clone + Debug + Serialize + Deserialize` with no
/// infrastructure dependencies. A new snapshot supersedes the previous one
/// for the same task id; nothing mutates a snapshot in place.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    /// Task identifier (unique key into the state store).
    pub task_id: u64,

    /// Source gallery URL.
    pub url: String,

    /// Gallery title, if already resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Pages downloaded so far.
    pub current: u64,

    /// Total expected pages; 0 means unknown/indeterminate.
    pub total: u64,

    /// Lifecycle status.
    pub status: ProgressStatus,

    /// Elapsed time in seconds; 0 means not started or unknown.
    pub elapsed_secs: f64,

    /// Estimated remaining time in seconds, when computable.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_secs: Option<f64>,

    /// Error detail when `status` is `Error`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Page range restriction, if any.
    #[serde(default)]
    pub page_range: PageRange,
}

impl ProgressSnapshot {
    /// Create a snapshot in initial state.
    pub fn new(task_id: u64, url: impl Into<String>) -> Self {
        Self {
            task_id,
            url: url.into(),
            title: None,
            current: 0,
            total: 0,
            status: ProgressStatus::Waiting,
            elapsed_secs: 0.0,
            remaining_secs: None,
            error: None,
            page_range: PageRange::default(),
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the page counts.
    #[must_use]
    pub const fn with_counts(mut self, current: u64, total: u64) -> Self {
        self.current = current;
        self.total = total;
        self
    }

    /// Set the lifecycle status.
    #[must_use]
    pub const fn with_status(mut self, status: ProgressStatus) -> Self {
        self.status = status;
        self
    }

    /// Set the timing fields.
    #[must_use]
    pub const fn with_timing(mut self, elapsed_secs: f64, remaining_secs: Option<f64>) -> Self {
        self.elapsed_secs = elapsed_secs;
        self.remaining_secs = remaining_secs;
        self
    }

    /// Set the error detail.
    #[must_use]
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Set the page range.
    #[must_use]
    pub const fn with_page_range(mut self, page_range: PageRange) -> Self {
        self.page_range = page_range;
        self
    }

    /// Build a snapshot from a raw store record.
    ///
    /// Conversion is total: the record may be absent, not an object, or
    /// contain null or mistyped fields, and every field independently falls
    /// back to its default. This function never fails and never panics.
    #[must_use]
    pub fn from_raw(task_id: u64, raw: Option<&Value>) -> Self {
        let record = raw.and_then(Value::as_object);
        let field = |key: &str| record.and_then(|map| map.get(key));

        let status = field("status")
            .and_then(Value::as_str)
            .map_or(ProgressStatus::Waiting, ProgressStatus::parse);

        let error = coerce_string(field("error"))
            .or_else(|| coerce_string(field("error_message")))
            .filter(|message| !message.is_empty());

        Self {
            task_id,
            url: coerce_string(field("url")).unwrap_or_default(),
            title: coerce_string(field("title")).filter(|title| !title.is_empty()),
            current: coerce_u64(field("current")).unwrap_or(0),
            total: coerce_u64(field("total")).unwrap_or(0),
            status,
            elapsed_secs: coerce_f64(field("elapsed_time")).unwrap_or(0.0).max(0.0),
            remaining_secs: coerce_f64(field("estimated_remaining")).filter(|secs| *secs > 0.0),
            error,
            page_range: coerce_page_range(field("download_range_info")),
        }
    }

    /// Progress as a percentage, always within `[0.0, 100.0]`.
    ///
    /// Returns `0.0` whenever the total is unknown, regardless of `current`.
    #[must_use]
    pub fn progress_percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[expect(
            clippy::cast_precision_loss,
            reason = "precision loss acceptable for progress percentage"
        )]
        let percent = (self.current as f64 / self.total as f64) * 100.0;
        percent.min(100.0)
    }

    /// Title to display, falling back to a fixed placeholder.
    #[must_use]
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(TITLE_PLACEHOLDER)
    }

    /// Elapsed time formatted as `MM:SS`, when known.
    #[must_use]
    pub fn elapsed_text(&self) -> Option<String> {
        format_clock(self.elapsed_secs)
    }

    /// Estimated remaining time formatted as `MM:SS`, when known.
    #[must_use]
    pub fn remaining_text(&self) -> Option<String> {
        self.remaining_secs.and_then(format_clock)
    }

    /// Composite status line for a progress slot.
    ///
    /// Example: `page 50/100 | elapsed 05:30 | remaining 05:30 | status downloading`.
    /// Never panics on missing fields; the status label is always present.
    #[must_use]
    pub fn status_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        if self.status == ProgressStatus::Paused {
            parts.push("⏸".to_owned());
        }
        if self.total > 0 {
            parts.push(format!("page {}/{}", self.current, self.total));
        }
        if let Some(elapsed) = self.elapsed_text() {
            parts.push(format!("elapsed {elapsed}"));
        }
        // Remaining time is meaningless once the task has finished.
        if !self.status.is_terminal() {
            if let Some(remaining) = self.remaining_text() {
                parts.push(format!("remaining {remaining}"));
            }
        }
        if let Some(range) = self.page_range.display_text() {
            parts.push(range);
        }
        parts.push(format!("status {}", self.status.as_str()));

        parts.join(" | ")
    }
}

/// Coerce a raw field into a string, tolerating absent or non-string values.
fn coerce_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(ToOwned::to_owned)
}

/// Coerce a raw field into a non-negative integer.
///
/// The store has emitted counts as integers, floats, and numeric strings at
/// various points in its history; all three are accepted.
fn coerce_u64(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    if let Some(n) = value.as_u64() {
        return Some(n);
    }
    if let Some(f) = value.as_f64() {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "negative and fractional counts are clamped by design"
        )]
        return Some(f.max(0.0) as u64);
    }
    value.as_str().and_then(|s| s.trim().parse().ok())
}

/// Coerce a raw field into a float, tolerating absent or non-numeric values.
fn coerce_f64(value: Option<&Value>) -> Option<f64> {
    let value = value?;
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Coerce the nested range record, defaulting to "no range" on any mismatch.
fn coerce_page_range(value: Option<&Value>) -> PageRange {
    let Some(map) = value.and_then(Value::as_object) else {
        return PageRange::default();
    };
    PageRange {
        enabled: map.get("enabled").and_then(Value::as_bool).unwrap_or(false),
        start: coerce_u64(map.get("start")).unwrap_or(0),
        end: coerce_u64(map.get("end")),
    }
}

/// Format seconds as `MM:SS`; `None` for zero/negative/non-finite input.
fn format_clock(secs: f64) -> Option<String> {
    if !secs.is_finite() || secs <= 0.0 {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "value checked positive and finite above"
    )]
    let whole = secs as u64;
    Some(format!("{:02}:{:02}", whole / 60, whole % 60))
}
