//! Lifecycle status of a download task.

use serde::{Deserialize, Serialize};

/// Status of a download task as shown on a progress surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    /// Waiting in the queue.
    #[default]
    Waiting,
    /// Currently being downloaded.
    Downloading,
    /// Paused by the user.
    Paused,
    /// Completed successfully.
    Completed,
    /// Skipped (already present or excluded).
    Skipped,
    /// Failed with an error.
    Error,
}

impl ProgressStatus {
    /// Convert to string representation for display and storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Waiting => "waiting",
            Self::Downloading => "downloading",
            Self::Paused => "paused",
            Self::Completed => "completed",
            Self::Skipped => "skipped",
            Self::Error => "error",
        }
    }

    /// Parse from string representation.
    ///
    /// The state store emits Japanese display values; the case-insensitive
    /// English names are accepted alongside them. Unknown values default to
    /// `Waiting`.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "downloading" | "ダウンロード中" => Self::Downloading,
            "paused" | "中断" => Self::Paused,
            "completed" | "完了" => Self::Completed,
            "skipped" | "スキップ" => Self::Skipped,
            "error" | "エラー" => Self::Error,
            // "waiting", "待機中", or unknown values default to Waiting
            _ => Self::Waiting,
        }
    }

    /// Whether this task is still in flight (not yet finished).
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Waiting | Self::Downloading | Self::Paused)
    }

    /// Whether this task has reached a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Skipped | Self::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_values() {
        assert_eq!(ProgressStatus::parse("downloading"), ProgressStatus::Downloading);
        assert_eq!(ProgressStatus::parse("Paused"), ProgressStatus::Paused);
        assert_eq!(ProgressStatus::parse("COMPLETED"), ProgressStatus::Completed);
        assert_eq!(ProgressStatus::parse("error"), ProgressStatus::Error);
        assert_eq!(ProgressStatus::parse("skipped"), ProgressStatus::Skipped);
    }

    #[test]
    fn test_parse_store_display_values() {
        assert_eq!(ProgressStatus::parse("待機中"), ProgressStatus::Waiting);
        assert_eq!(ProgressStatus::parse("ダウンロード中"), ProgressStatus::Downloading);
        assert_eq!(ProgressStatus::parse("中断"), ProgressStatus::Paused);
        assert_eq!(ProgressStatus::parse("完了"), ProgressStatus::Completed);
        assert_eq!(ProgressStatus::parse("スキップ"), ProgressStatus::Skipped);
        assert_eq!(ProgressStatus::parse("エラー"), ProgressStatus::Error);
    }

    #[test]
    fn test_parse_unknown_defaults_to_waiting() {
        assert_eq!(ProgressStatus::parse(""), ProgressStatus::Waiting);
        assert_eq!(ProgressStatus::parse("garbage"), ProgressStatus::Waiting);
        assert_eq!(ProgressStatus::parse("pending"), ProgressStatus::Waiting);
    }

    #[test]
    fn test_active_and_terminal_partition() {
        for status in [
            ProgressStatus::Waiting,
            ProgressStatus::Downloading,
            ProgressStatus::Paused,
            ProgressStatus::Completed,
            ProgressStatus::Skipped,
            ProgressStatus::Error,
        ] {
            assert_ne!(status.is_active(), status.is_terminal());
        }
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&ProgressStatus::Downloading).unwrap();
        assert_eq!(json, "\"downloading\"");
    }
}
