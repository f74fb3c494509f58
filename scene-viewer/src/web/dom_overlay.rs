use bevy::prelude::*;

use crate::engine::core::app_state::LoadingIndicatorEvent;
use crate::engine::loading::progress::LoadProgressEvent;
use crate::engine::poi::markers::{MarkerState, PoiMarker, marker_transform_css};

pub const LOADING_BACKGROUND_SELECTOR: &str = ".loading-background";
pub const LOADING_BAR_SELECTOR: &str = ".loading-bar";
pub const PERCENTAGE_SELECTOR: &str = ".percentage";

const INDICATOR_SELECTORS: [&str; 3] = [
    LOADING_BACKGROUND_SELECTOR,
    LOADING_BAR_SELECTOR,
    PERCENTAGE_SELECTOR,
];

const ENDED_CLASS: &str = "ended";
const VISIBLE_CLASS: &str = "visible";

pub fn marker_selector(id: usize) -> String {
    format!(".point-{id}")
}

pub fn loading_bar_transform(ratio: f32) -> String {
    format!("scaleX({ratio})")
}

pub fn mirror_loading_progress(mut progress_events: EventReader<LoadProgressEvent>) {
    let Some(latest) = progress_events.read().last() else {
        return;
    };
    crate::web::dom::set_transform(
        LOADING_BAR_SELECTOR,
        Some(&loading_bar_transform(latest.progress.ratio())),
    );
    crate::web::dom::set_text(PERCENTAGE_SELECTOR, &latest.progress.percentage_label());
}

pub fn mirror_loading_indicator_events(mut indicator_events: EventReader<LoadingIndicatorEvent>) {
    for event in indicator_events.read() {
        for selector in INDICATOR_SELECTORS {
            match event {
                LoadingIndicatorEvent::Teardown => {
                    crate::web::dom::set_class(selector, ENDED_CLASS, true);
                    crate::web::dom::set_transform(selector, None);
                }
                LoadingIndicatorEvent::Remove => crate::web::dom::remove_element(selector),
            }
        }
    }
}

pub fn mirror_markers(markers: Query<(&PoiMarker, &MarkerState), Changed<MarkerState>>) {
    for (marker, state) in &markers {
        let selector = marker_selector(marker.id);
        crate::web::dom::set_class(&selector, VISIBLE_CLASS, state.visible);
        crate::web::dom::set_transform(&selector, Some(&marker_transform_css(state.offset)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selectors_and_transforms() {
        assert_eq!(marker_selector(3), ".point-3");
        assert_eq!(loading_bar_transform(0.25), "scaleX(0.25)");
        assert_eq!(loading_bar_transform(1.0), "scaleX(1)");
    }
}
