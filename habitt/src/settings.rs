use serde::{Deserialize, Serialize};

/// Render-time configuration. Supplied by the embedding host; every
/// field has a default so partial config files work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HabitSettings {
    /// First display column of the week: 0 = Sunday … 6 = Saturday.
    pub start_of_week: u8,
    /// chrono strftime format for the table title.
    pub month_format: String,
    /// Whether the month-title head row is rendered.
    pub display_head: bool,
    /// Whether mark tags are injected as raw markup instead of text.
    pub enable_html: bool,
    /// Weekday display labels, Sunday first.
    pub week_labels: [String; 7],
}

impl Default for HabitSettings {
    fn default() -> Self {
        HabitSettings {
            start_of_week: 0,
            month_format: "%Y-%m".to_owned(),
            display_head: true,
            enable_html: false,
            week_labels: ["SUN", "MON", "TUE", "WED", "THU", "FRI", "SAT"].map(str::to_owned),
        }
    }
}

impl HabitSettings {
    /// Label for a weekday index (0 = Sunday), wrapping mod 7.
    pub fn week_label(&self, weekday: u32) -> &str {
        &self.week_labels[(weekday % 7) as usize]
    }
}
