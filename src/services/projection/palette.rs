// Color assignments for projected calendar events

use std::collections::BTreeMap;

/// Colors for one rendered event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventColors {
    pub background: String,
    pub border: String,
    pub text: String,
}

impl EventColors {
    fn uniform(color: &str) -> Self {
        Self {
            background: color.to_string(),
            border: color.to_string(),
            text: "#ffffff".to_string(),
        }
    }
}

/// Status id to color lookup with the console's stock assignments.
///
/// 1 scheduled, 2 confirmed, 3 cancelled, 4 done; anything unknown or
/// unset falls back to the default blue. Tenants may override any entry
/// through configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusPalette {
    colors: BTreeMap<i64, String>,
    default_color: String,
}

impl Default for StatusPalette {
    fn default() -> Self {
        let mut colors = BTreeMap::new();
        colors.insert(1, "#1a73e8".to_string());
        colors.insert(2, "#34a853".to_string());
        colors.insert(3, "#ea4335".to_string());
        colors.insert(4, "#9c27b0".to_string());
        Self {
            colors,
            default_color: "#1a73e8".to_string(),
        }
    }
}

impl StatusPalette {
    pub fn set(&mut self, status_id: i64, color: impl Into<String>) {
        self.colors.insert(status_id, color.into());
    }

    pub fn set_default(&mut self, color: impl Into<String>) {
        self.default_color = color.into();
    }

    pub fn color_for(&self, status_id: Option<i64>) -> &str {
        status_id
            .and_then(|id| self.colors.get(&id))
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }

    pub(crate) fn status_colors(&self, status_id: Option<i64>) -> EventColors {
        EventColors::uniform(self.color_for(status_id))
    }
}

/// Fixed gray used for other clients' opaque placeholders.
pub(crate) fn occupied_colors() -> EventColors {
    EventColors {
        background: "#d9d9d9".to_string(),
        border: "#bfbfbf".to_string(),
        text: "#5f6368".to_string(),
    }
}

/// Fixed red used for blocks and synthesized unavailable spans.
pub(crate) fn unavailable_colors() -> EventColors {
    EventColors {
        background: "#c5221f".to_string(),
        border: "#b71c1c".to_string(),
        text: "#ffffff".to_string(),
    }
}

/// Own-appointment blue used on the client view regardless of status.
pub(crate) fn own_appointment_colors() -> EventColors {
    EventColors::uniform("#1a73e8")
}
