use std::time::Duration;

/// Delay between load completion and the loading indicator being marked as ended.
pub const LOADING_TEARDOWN_DELAY: Duration = Duration::from_millis(500);

/// Delay between load completion and the loading indicator being removed.
pub const LOADING_REMOVAL_DELAY: Duration = Duration::from_millis(5000);

/// Delay between load completion and the scene accepting per-frame interactive work.
pub const SCENE_READY_DELAY: Duration = Duration::from_millis(3500);

/// Length of the canvas indicator fade once it has been marked as ended.
pub const LOADING_FADE_DURATION: Duration = Duration::from_millis(1500);
