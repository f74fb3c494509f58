use bevy::prelude::*;

use constants::render_settings::{LOADING_BAR_HEIGHT, LOADING_PERCENTAGE_FONT_SIZE};
use constants::timing::LOADING_FADE_DURATION;

use crate::engine::core::app_state::LoadingIndicatorEvent;
use crate::engine::loading::progress::{LoadProgress, LoadProgressEvent};
use crate::engine::ui::OverlayTarget;

/// Any node belonging to the loading indicator.
#[derive(Component)]
pub struct LoadingIndicatorPart;

#[derive(Component)]
pub struct LoadingBackground;

#[derive(Component)]
pub struct LoadingBar;

#[derive(Component)]
pub struct LoadingPercentage;

/// Present once the indicator has been marked as ended.
#[derive(Component, Debug)]
pub struct LoadingFade {
    pub timer: Timer,
}

impl LoadingFade {
    /// Remaining opacity in [0, 1].
    pub fn remaining(&self) -> f32 {
        1.0 - self.timer.fraction()
    }
}

pub fn spawn_loading_indicator(mut commands: Commands, overlay: Res<OverlayTarget>) {
    if !overlay.is_canvas() {
        return;
    }

    commands.spawn((
        LoadingIndicatorPart,
        LoadingBackground,
        Name::new("LoadingBackground"),
        BackgroundColor(Color::BLACK),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        GlobalZIndex(1),
    ));

    commands.spawn((
        LoadingIndicatorPart,
        LoadingBar,
        Name::new("LoadingBar"),
        BackgroundColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(50.0),
            left: Val::Px(0.0),
            width: Val::Percent(0.0),
            height: Val::Px(LOADING_BAR_HEIGHT),
            ..default()
        },
        GlobalZIndex(2),
    ));

    commands
        .spawn((
            LoadingIndicatorPart,
            Name::new("LoadingPercentageRow"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Percent(50.0),
                width: Val::Percent(100.0),
                margin: UiRect::top(Val::Px(12.0)),
                justify_content: JustifyContent::Center,
                ..default()
            },
            GlobalZIndex(2),
        ))
        .with_children(|row| {
            row.spawn((
                LoadingIndicatorPart,
                LoadingPercentage,
                Name::new("LoadingPercentage"),
                Text::new(LoadProgress::default().percentage_label()),
                TextFont {
                    font_size: LOADING_PERCENTAGE_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn update_loading_indicator(
    mut progress_events: EventReader<LoadProgressEvent>,
    mut bars: Query<&mut Node, (With<LoadingBar>, Without<LoadingFade>)>,
    mut labels: Query<&mut Text, With<LoadingPercentage>>,
) {
    let Some(latest) = progress_events.read().last() else {
        return;
    };

    for mut node in &mut bars {
        node.width = Val::Percent(latest.progress.ratio() * 100.0);
    }
    for mut text in &mut labels {
        text.0 = latest.progress.percentage_label();
    }
}

pub fn handle_loading_indicator_events(
    mut commands: Commands,
    mut indicator_events: EventReader<LoadingIndicatorEvent>,
    parts: Query<Entity, With<LoadingIndicatorPart>>,
    mut bars: Query<&mut Node, With<LoadingBar>>,
) {
    for event in indicator_events.read() {
        match event {
            LoadingIndicatorEvent::Teardown => {
                for entity in &parts {
                    commands.entity(entity).insert(LoadingFade {
                        timer: Timer::new(LOADING_FADE_DURATION, TimerMode::Once),
                    });
                }
                // The bar collapses towards the right edge.
                for mut node in &mut bars {
                    node.left = Val::Auto;
                    node.right = Val::Px(0.0);
                }
                debug!("Loading indicator ended");
            }
            LoadingIndicatorEvent::Remove => {
                for entity in &parts {
                    commands.entity(entity).try_despawn();
                }
                debug!("Loading indicator removed");
            }
        }
    }
}

pub fn fade_loading_indicator(
    time: Res<Time>,
    mut parts: Query<(
        &mut LoadingFade,
        &mut BackgroundColor,
        Option<&mut TextColor>,
        &mut Node,
        Has<LoadingBackground>,
        Has<LoadingBar>,
    )>,
) {
    for (mut fade, mut background, text_colour, mut node, is_background, is_bar) in &mut parts {
        fade.timer.tick(time.delta());
        let remaining = fade.remaining();

        if is_bar {
            node.width = Val::Percent(100.0 * remaining);
        }
        if is_background {
            background.0.set_alpha(remaining);
        }
        if let Some(mut text_colour) = text_colour {
            text_colour.0.set_alpha(remaining);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indicator_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(OverlayTarget::Canvas)
            .add_event::<LoadProgressEvent>()
            .add_event::<LoadingIndicatorEvent>()
            .add_systems(Startup, spawn_loading_indicator)
            .add_systems(
                Update,
                (
                    update_loading_indicator,
                    handle_loading_indicator_events,
                    fade_loading_indicator,
                )
                    .chain(),
            );
        app.update();
        app
    }

    fn part_count(app: &mut App) -> usize {
        let world = app.world_mut();
        world
            .query_filtered::<Entity, With<LoadingIndicatorPart>>()
            .iter(world)
            .count()
    }

    #[test]
    fn progress_moves_bar_and_label() {
        let mut app = indicator_app();
        app.world_mut().send_event(LoadProgressEvent {
            url: "textures/baked.jpg".into(),
            progress: LoadProgress::new(2, 4),
        });
        app.update();

        let world = app.world_mut();
        let bar = world
            .query_filtered::<&Node, With<LoadingBar>>()
            .single(world)
            .expect("one loading bar");
        assert_eq!(bar.width, Val::Percent(50.0));

        let label = world
            .query_filtered::<&Text, With<LoadingPercentage>>()
            .single(world)
            .expect("one percentage label");
        assert_eq!(label.0, "50 %");
    }

    #[test]
    fn teardown_then_removal() {
        let mut app = indicator_app();
        assert_eq!(part_count(&mut app), 4);

        app.world_mut().send_event(LoadingIndicatorEvent::Teardown);
        app.update();
        let world = app.world_mut();
        let fading = world
            .query_filtered::<Entity, (With<LoadingIndicatorPart>, With<LoadingFade>)>()
            .iter(world)
            .count();
        assert_eq!(fading, 4);

        app.world_mut().send_event(LoadingIndicatorEvent::Remove);
        app.update();
        assert_eq!(part_count(&mut app), 0);
    }

    #[test]
    fn dom_target_spawns_nothing() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(OverlayTarget::Dom)
            .add_systems(Startup, spawn_loading_indicator);
        app.update();
        assert_eq!(part_count(&mut app), 0);
    }
}
