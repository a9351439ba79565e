//! Rendition list and selection state

use crate::engine::Level;
use crate::view::QualityOption;

/// Label of engine-driven adaptive selection
pub const AUTO: &str = "auto";

/// Level index that hands selection back to the engine
pub const AUTO_LEVEL: i32 = -1;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualityState {
    available: Vec<String>,
    selected: String,
}

impl Default for QualityState {
    fn default() -> Self {
        Self {
            available: Vec::new(),
            selected: AUTO.to_string(),
        }
    }
}

impl QualityState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renditions from an engine: "auto" first, then engine order
    pub fn from_levels(levels: &[Level]) -> Self {
        let mut available = Vec::with_capacity(levels.len() + 1);
        available.push(AUTO.to_string());
        available.extend(levels.iter().map(Level::label));
        Self {
            available,
            selected: AUTO.to_string(),
        }
    }

    /// Native playback offers only the implicit single stream
    pub fn native() -> Self {
        Self {
            available: vec![AUTO.to_string()],
            selected: AUTO.to_string(),
        }
    }

    pub fn available(&self) -> &[String] {
        &self.available
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    pub fn set_selected(&mut self, label: &str) {
        self.selected = label.to_string();
    }

    pub fn options(&self) -> Vec<QualityOption> {
        self.available
            .iter()
            .map(|label| QualityOption::new(label, *label == self.selected))
            .collect()
    }
}

/// Engine level index for `label`, or `None` if no level matches exactly
pub fn level_index(levels: &[Level], label: &str) -> Option<i32> {
    if label == AUTO {
        return Some(AUTO_LEVEL);
    }
    levels
        .iter()
        .position(|level| level.label() == label)
        .and_then(|index| i32::try_from(index).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_order_is_kept() {
        let levels = [Level::new(1080), Level::new(360), Level::new(720)];
        let quality = QualityState::from_levels(&levels);
        assert_eq!(quality.available(), ["auto", "1080p", "360p", "720p"]);
        assert_eq!(quality.selected(), "auto");
    }

    #[test]
    fn test_level_index() {
        let levels = [Level::new(480), Level::new(720)];
        assert_eq!(level_index(&levels, "auto"), Some(-1));
        assert_eq!(level_index(&levels, "720p"), Some(1));
        assert_eq!(level_index(&levels, "1080p"), None);
        assert_eq!(level_index(&levels, "720"), None);
    }

    #[test]
    fn test_options_mark_selection() {
        let mut quality = QualityState::from_levels(&[Level::new(480)]);
        quality.set_selected("480p");
        let options = quality.options();
        assert!(!options[0].selected);
        assert!(options[1].selected);
        assert_eq!(options[0].display, "Auto");
    }
}
