use bevy::prelude::*;

use crate::engine::core::app_state::LifecycleState;

/// Per-frame stages, run in declaration order inside `Update`.
///
/// `Interaction` only runs once the scene is ready; the render itself is
/// issued by the engine after `Update` every frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Lifecycle timers and load tracking.
    Lifecycle,
    /// Camera control damping.
    Controls,
    /// Clip playback and point-of-interest visibility.
    Interaction,
    /// Marker and overlay presentation.
    Presentation,
}

pub struct FrameDriverPlugin;

impl Plugin for FrameDriverPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (
                FrameSet::Lifecycle,
                FrameSet::Controls,
                FrameSet::Interaction.run_if(in_state(LifecycleState::Ready)),
                FrameSet::Presentation,
            )
                .chain(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[derive(Resource, Default)]
    struct InteractionRuns(u32);

    fn count_interaction(mut runs: ResMut<InteractionRuns>) {
        runs.0 += 1;
    }

    fn enter(app: &mut App, state: LifecycleState) {
        app.world_mut()
            .resource_mut::<NextState<LifecycleState>>()
            .set(state);
        app.update();
    }

    #[test]
    fn interaction_waits_for_ready() {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin, FrameDriverPlugin))
            .init_state::<LifecycleState>()
            .init_resource::<InteractionRuns>()
            .add_systems(Update, count_interaction.in_set(FrameSet::Interaction));

        app.update();
        assert_eq!(app.world().resource::<InteractionRuns>().0, 0);

        enter(&mut app, LifecycleState::Transitioning);
        app.update();
        assert_eq!(app.world().resource::<InteractionRuns>().0, 0);

        enter(&mut app, LifecycleState::Ready);
        assert_eq!(app.world().resource::<InteractionRuns>().0, 1);
        app.update();
        assert_eq!(app.world().resource::<InteractionRuns>().0, 2);
    }
}
