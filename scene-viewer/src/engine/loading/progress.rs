use bevy::prelude::*;

/// Aggregate progress over every tracked asset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadProgress {
    pub items_loaded: u32,
    pub items_total: u32,
}

impl LoadProgress {
    pub fn new(items_loaded: u32, items_total: u32) -> Self {
        Self {
            items_loaded: items_loaded.min(items_total),
            items_total,
        }
    }

    /// Loaded fraction in [0, 1]; zero while nothing is tracked.
    pub fn ratio(&self) -> f32 {
        if self.items_total == 0 {
            return 0.0;
        }
        (self.items_loaded as f32 / self.items_total as f32).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.items_total > 0 && self.items_loaded >= self.items_total
    }

    /// Whole percentage for the indicator label, e.g. `"40 %"`.
    pub fn percentage_label(&self) -> String {
        format!("{} %", (self.ratio() * 100.0).round() as u32)
    }
}

/// One tracked item finished (loaded or failed).
#[derive(Event, Debug, Clone, PartialEq)]
pub struct LoadProgressEvent {
    pub url: String,
    pub progress: LoadProgress,
}

/// Every tracked item has finished. Sent exactly once per session.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct LoadCompleteEvent;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_is_bounded() {
        assert_eq!(LoadProgress::new(0, 0).ratio(), 0.0);
        assert_eq!(LoadProgress::new(0, 4).ratio(), 0.0);
        assert_eq!(LoadProgress::new(2, 4).ratio(), 0.5);
        assert_eq!(LoadProgress::new(4, 4).ratio(), 1.0);
    }

    #[test]
    fn loaded_never_exceeds_total() {
        let progress = LoadProgress::new(7, 4);
        assert_eq!(progress.items_loaded, 4);
        assert_eq!(progress.ratio(), 1.0);
    }

    #[test]
    fn completion_requires_tracked_items() {
        assert!(!LoadProgress::new(0, 0).is_complete());
        assert!(!LoadProgress::new(3, 4).is_complete());
        assert!(LoadProgress::new(4, 4).is_complete());
    }

    #[test]
    fn percentage_rounds_half_away_from_zero() {
        assert_eq!(LoadProgress::new(0, 4).percentage_label(), "0 %");
        assert_eq!(LoadProgress::new(1, 3).percentage_label(), "33 %");
        assert_eq!(LoadProgress::new(2, 3).percentage_label(), "67 %");
        assert_eq!(LoadProgress::new(1, 8).percentage_label(), "13 %");
        assert_eq!(LoadProgress::new(4, 4).percentage_label(), "100 %");
    }
}
