use bevy::asset::{RecursiveDependencyLoadState, UntypedHandle};
use bevy::prelude::*;

use crate::engine::loading::progress::{LoadCompleteEvent, LoadProgress, LoadProgressEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemStatus {
    Pending,
    Loaded,
    Failed,
}

#[derive(Debug)]
pub struct TrackedAsset {
    pub url: String,
    pub handle: UntypedHandle,
    finished: bool,
}

/// Aggregates load state over every asset registered at startup.
#[derive(Resource, Debug, Default)]
pub struct AssetLoadTracker {
    items: Vec<TrackedAsset>,
    completion_sent: bool,
}

impl AssetLoadTracker {
    /// Registers an asset. The tracker keeps the handle alive.
    pub fn track<A: Asset>(&mut self, url: impl Into<String>, handle: &Handle<A>) {
        self.items.push(TrackedAsset {
            url: url.into(),
            handle: handle.clone().untyped(),
            finished: false,
        });
    }

    pub fn progress(&self) -> LoadProgress {
        let loaded = self.items.iter().filter(|item| item.finished).count();
        LoadProgress::new(loaded as u32, self.items.len() as u32)
    }

    pub fn is_complete(&self) -> bool {
        self.completion_sent
    }

    /// Polls every unfinished item. Returns one progress event per item that
    /// finished during this poll, plus whether completion was reached now.
    /// Completion is reported once; later polls never report it again.
    pub fn poll(
        &mut self,
        mut status: impl FnMut(&TrackedAsset) -> ItemStatus,
    ) -> (Vec<LoadProgressEvent>, bool) {
        let mut events = Vec::new();

        for index in 0..self.items.len() {
            if self.items[index].finished {
                continue;
            }

            match status(&self.items[index]) {
                ItemStatus::Pending => continue,
                ItemStatus::Loaded => {}
                ItemStatus::Failed => {
                    error!("Failed to load {}", self.items[index].url);
                }
            }

            self.items[index].finished = true;
            events.push(LoadProgressEvent {
                url: self.items[index].url.clone(),
                progress: self.progress(),
            });
        }

        let completed_now = !self.completion_sent && self.progress().is_complete();
        if completed_now {
            self.completion_sent = true;
        }

        (events, completed_now)
    }
}

/// Maps engine load state onto tracker item state. Dependencies count, so a
/// model is only done once its buffers and images are.
fn item_status(asset_server: &AssetServer, item: &TrackedAsset) -> ItemStatus {
    match asset_server.get_recursive_dependency_load_state(item.handle.id()) {
        Some(RecursiveDependencyLoadState::Loaded) => ItemStatus::Loaded,
        Some(RecursiveDependencyLoadState::Failed(err)) => {
            warn!("{}: {}", item.url, err);
            ItemStatus::Failed
        }
        _ => ItemStatus::Pending,
    }
}

pub fn track_asset_loading(
    mut tracker: ResMut<AssetLoadTracker>,
    asset_server: Res<AssetServer>,
    mut progress_events: EventWriter<LoadProgressEvent>,
    mut complete_events: EventWriter<LoadCompleteEvent>,
) {
    if tracker.is_complete() {
        return;
    }

    let (events, completed_now) = tracker.poll(|item| item_status(&asset_server, item));

    for event in events {
        debug!(
            "Loaded {} ({}/{})",
            event.url, event.progress.items_loaded, event.progress.items_total
        );
        progress_events.write(event);
    }

    if completed_now {
        info!("✓ All {} tracked assets loaded", tracker.progress().items_total);
        complete_events.write(LoadCompleteEvent);
    }
}
