//! Human-readable and spoken renderings of a status.

use serde::Serialize;

use crate::domain::Status;

use super::classify::Metrics;

/// Pause before the metrics sentence in SSML.
const METRICS_BREAK: &str = "800ms";

/// Pause before the staleness caveat in SSML.
const STALE_BREAK: &str = "500ms";

const STALE_CAVEAT: &str = "This information may be out of date.";

/// What the web page shows for a status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayText {
    pub css_class: &'static str,
    pub message: &'static str,
    pub emoji: &'static str,
}

/// What a voice assistant says for a status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoiceText {
    pub text: String,
    pub ssml: String,
}

/// Fixed display entry for each status.
fn display_entry(status: Status) -> DisplayText {
    match status {
        Status::Fine => DisplayText {
            css_class: "normal",
            message: "Nope. BVG is running fine.",
            emoji: "✅",
        },
        Status::Degraded => DisplayText {
            css_class: "degraded",
            message: "A bit. Expect some delays.",
            emoji: "⚠️",
        },
        Status::Fucked => DisplayText {
            css_class: "fucked",
            message: "Yes. BVG is properly fucked.",
            emoji: "🔥",
        },
        Status::Unknown => DisplayText {
            css_class: "unknown",
            message: "No idea. There's no current data.",
            emoji: "❓",
        },
    }
}

/// Opening sentence spoken for each status.
fn voice_sentence(status: Status) -> &'static str {
    match status {
        Status::Fine => "BVG is running normally.",
        Status::Degraded => "BVG is a bit disrupted right now.",
        Status::Fucked => "BVG is seriously disrupted right now.",
        Status::Unknown => "I can't tell right now how BVG is doing.",
    }
}

/// Stale data always renders as `Unknown`.
fn effective(status: Status, stale: bool) -> Status {
    if stale { Status::Unknown } else { status }
}

/// Format a status for the web page.
pub fn format_display(status: Status, _metrics: &Metrics, stale: bool) -> DisplayText {
    display_entry(effective(status, stale))
}

/// Format a status for voice assistants, as plain text and SSML.
pub fn format_voice(status: Status, metrics: &Metrics, stale: bool) -> VoiceText {
    let status = effective(status, stale);

    let base = voice_sentence(status);
    let detail = (status != Status::Unknown).then(|| {
        format!(
            "Of {} services, {} percent are affected.",
            metrics.total_services, metrics.percent_disrupted
        )
    });
    let caveat = stale.then_some(STALE_CAVEAT);

    let mut text = base.to_string();
    let mut ssml = format!("<speak>{base}");

    if let Some(detail) = &detail {
        text.push(' ');
        text.push_str(detail);
        ssml.push_str(&format!("<break time=\"{METRICS_BREAK}\"/>{detail}"));
    }

    if let Some(caveat) = caveat {
        text.push(' ');
        text.push_str(caveat);
        ssml.push_str(&format!("<break time=\"{STALE_BREAK}\"/>{caveat}"));
    }

    ssml.push_str("</speak>");

    VoiceText { text, ssml }
}
