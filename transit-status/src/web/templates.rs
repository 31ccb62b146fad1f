//! Askama templates for the web frontend.

use askama::Template;
use chrono::DateTime;

use crate::poller::StatusSnapshot;
use crate::status::palette;

// ============================================================================
// Page Templates
// ============================================================================

/// The status page.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: StatusView,
}

/// Error page.
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub title: String,
    pub message: String,
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// Everything the status page shows.
#[derive(Debug, Clone)]
pub struct StatusView {
    pub css_class: &'static str,
    pub emoji: &'static str,
    pub message: &'static str,
    /// Page background as `#rrggbb`
    pub background: String,
    /// White body text is below AA contrast, so render it large
    pub large_text: bool,
    pub stale: bool,
    /// Time of the last poll, e.g. "14:05 UTC"
    pub updated: Option<String>,
    pub total_services: usize,
    pub percent_delayed: u32,
    pub percent_cancelled: u32,
    pub categories: Vec<CategoryView>,
}

impl StatusView {
    /// Create from a status snapshot.
    pub fn from_snapshot(snapshot: &StatusSnapshot) -> Self {
        let categories = snapshot
            .by_type
            .iter()
            .map(|(category, counts)| CategoryView {
                label: category.label(),
                delayed: counts.delayed,
                cancelled: counts.cancelled,
            })
            .collect();

        Self {
            css_class: snapshot.display.css_class,
            emoji: snapshot.display.emoji,
            message: snapshot.display.message,
            background: palette::background(snapshot.status).to_string(),
            large_text: !palette::white_text_passes_aa(snapshot.status),
            stale: snapshot.stale,
            updated: snapshot.timestamp.and_then(format_updated),
            total_services: snapshot.metrics.total_services,
            percent_delayed: snapshot.metrics.percent_delayed,
            percent_cancelled: snapshot.metrics.percent_cancelled,
            categories,
        }
    }

    /// Whether there is anything worth breaking down by category.
    pub fn has_data(&self) -> bool {
        self.total_services > 0
    }

    /// Title shown in the browser tab.
    pub fn title(&self) -> String {
        format!("{} Is BVG fucked?", self.emoji)
    }
}

/// Disruption counts for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryView {
    pub label: &'static str,
    pub delayed: usize,
    pub cancelled: usize,
}

impl CategoryView {
    pub fn is_clear(&self) -> bool {
        self.delayed == 0 && self.cancelled == 0
    }
}

fn format_updated(millis: i64) -> Option<String> {
    DateTime::from_timestamp_millis(millis).map(|dt| dt.format("%H:%M UTC").to_string())
}
