use bevy::prelude::*;
use std::time::Duration;

use constants::timing::{LOADING_REMOVAL_DELAY, LOADING_TEARDOWN_DELAY, SCENE_READY_DELAY};

use crate::engine::loading::progress::LoadCompleteEvent;

/// Scene lifecycle. Only moves forward; `Ready` is terminal.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord, States)]
pub enum LifecycleState {
    #[default]
    Loading,
    Transitioning,
    Ready,
}

impl LifecycleState {
    /// The only state reachable from `self`, if any.
    pub fn successor(self) -> Option<Self> {
        match self {
            Self::Loading => Some(Self::Transitioning),
            Self::Transitioning => Some(Self::Ready),
            Self::Ready => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Transitioning => "transitioning",
            Self::Ready => "ready",
        }
    }
}

/// Fired by the lifecycle timers towards the loading indicator sinks.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadingIndicatorEvent {
    /// Mark the indicator as ended and collapse it.
    Teardown,
    /// Remove the indicator elements.
    Remove,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleSignal {
    IndicatorTeardown,
    IndicatorRemoval,
    SceneReady,
}

/// Three independent one-shot timers, all measured from the single load
/// completion timestamp.
#[derive(Resource, Debug)]
pub struct SceneLifecycle {
    completed_at: Option<Duration>,
    timers: Vec<(LifecycleSignal, Timer)>,
}

impl Default for SceneLifecycle {
    fn default() -> Self {
        Self::new(
            LOADING_TEARDOWN_DELAY,
            LOADING_REMOVAL_DELAY,
            SCENE_READY_DELAY,
        )
    }
}

impl SceneLifecycle {
    pub fn new(teardown: Duration, removal: Duration, ready: Duration) -> Self {
        let mut timers = vec![
            (
                LifecycleSignal::IndicatorTeardown,
                Timer::new(teardown, TimerMode::Once),
            ),
            (
                LifecycleSignal::SceneReady,
                Timer::new(ready, TimerMode::Once),
            ),
            (
                LifecycleSignal::IndicatorRemoval,
                Timer::new(removal, TimerMode::Once),
            ),
        ];
        timers.sort_by_key(|(_, timer)| timer.duration());
        Self {
            completed_at: None,
            timers,
        }
    }

    /// Records load completion. Returns false if completion was already seen.
    pub fn start(&mut self, now: Duration) -> bool {
        if self.completed_at.is_some() {
            return false;
        }
        self.completed_at = Some(now);
        true
    }

    pub fn completed_at(&self) -> Option<Duration> {
        self.completed_at
    }

    /// Absolute fire time of `signal`, known once completion was recorded.
    pub fn fire_time(&self, signal: LifecycleSignal) -> Option<Duration> {
        let completed_at = self.completed_at?;
        self.timers
            .iter()
            .find(|(s, _)| *s == signal)
            .map(|(_, timer)| completed_at + timer.duration())
    }

    /// Advances all timers by `delta` and returns the signals that fired,
    /// earliest first. Does nothing before completion.
    pub fn tick(&mut self, delta: Duration) -> Vec<LifecycleSignal> {
        if self.completed_at.is_none() {
            return Vec::new();
        }

        let mut fired = Vec::new();
        for (signal, timer) in &mut self.timers {
            timer.tick(delta);
            if timer.just_finished() {
                fired.push(*signal);
            }
        }
        fired
    }
}

/// Starts the lifecycle timers on load completion and leaves `Loading`.
pub fn begin_transition(
    mut completions: EventReader<LoadCompleteEvent>,
    mut lifecycle: ResMut<SceneLifecycle>,
    state: Res<State<LifecycleState>>,
    mut next_state: ResMut<NextState<LifecycleState>>,
    time: Res<Time>,
) {
    if completions.read().count() == 0 {
        return;
    }

    if !lifecycle.start(time.elapsed()) {
        return;
    }

    if state.get().successor() == Some(LifecycleState::Transitioning) {
        info!("→ Assets loaded, transitioning to scene");
        next_state.set(LifecycleState::Transitioning);
    }
}

/// Ticks the lifecycle timers and dispatches whatever fired this frame.
pub fn advance_lifecycle(
    mut lifecycle: ResMut<SceneLifecycle>,
    state: Res<State<LifecycleState>>,
    mut next_state: ResMut<NextState<LifecycleState>>,
    mut indicator_events: EventWriter<LoadingIndicatorEvent>,
    time: Res<Time>,
) {
    for signal in lifecycle.tick(time.delta()) {
        match signal {
            LifecycleSignal::IndicatorTeardown => {
                indicator_events.write(LoadingIndicatorEvent::Teardown);
            }
            LifecycleSignal::IndicatorRemoval => {
                indicator_events.write(LoadingIndicatorEvent::Remove);
            }
            LifecycleSignal::SceneReady => {
                if state.get().successor() == Some(LifecycleState::Ready) {
                    info!("→ Scene ready");
                    next_state.set(LifecycleState::Ready);
                } else {
                    warn!(
                        "Ready timer fired while {:?}; ignoring",
                        state.get()
                    );
                }
            }
        }
    }
}
