use bevy::prelude::*;
use std::fmt::Write;

use constants::render_settings::DEBUG_PANEL_FONT_SIZE;

use crate::engine::core::debug_settings::DebugSettings;
use crate::engine::poi::registry::{Axis, PointOfInterestRegistry};

const POINT_KEYS: [KeyCode; 4] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
];

const FAST_NUDGE: i32 = 10;

#[derive(Component)]
pub struct DebugPanel;

#[derive(Component)]
pub struct DebugPanelText;

/// Panel body: the flag, then one line per point with the selected
/// coordinate bracketed.
pub fn debug_panel_text(settings: &DebugSettings, registry: &PointOfInterestRegistry) -> String {
    let mut text = format!(
        "[P] show points of interest: {}\n",
        if registry.show_points() { "on" } else { "off" }
    );

    for point in registry.iter() {
        let selected = point.id == settings.selected_point;
        let _ = write!(text, "{} point {}:", if selected { ">" } else { " " }, point.id + 1);
        for axis in Axis::ALL {
            let value = point.anchor[axis.index()];
            if selected && axis == settings.selected_axis {
                let _ = write!(text, " [{}={:.2}]", axis.label(), value);
            } else {
                let _ = write!(text, " {}={:.2}", axis.label(), value);
            }
        }
        text.push('\n');
    }

    text.push_str("[1-4] point  [X/Y/Z] axis  [Up/Down] nudge, shift x10");
    text
}

pub fn spawn_debug_panel(mut commands: Commands, settings: Res<DebugSettings>) {
    if !settings.enabled {
        return;
    }

    commands
        .spawn((
            DebugPanel,
            Name::new("DebugPanel"),
            BackgroundColor(Color::srgba(0.10, 0.11, 0.13, 0.85)),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                padding: UiRect::all(Val::Px(10.0)),
                ..default()
            },
            GlobalZIndex(3),
        ))
        .with_children(|panel| {
            panel.spawn((
                DebugPanelText,
                Text::new(""),
                TextFont {
                    font_size: DEBUG_PANEL_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

pub fn debug_keyboard_controls(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut settings: ResMut<DebugSettings>,
    mut registry: ResMut<PointOfInterestRegistry>,
) {
    if !settings.enabled {
        return;
    }

    if keyboard.just_pressed(KeyCode::KeyP) {
        let show = !registry.show_points();
        registry.set_show_points(show);
    }

    for (id, key) in POINT_KEYS.iter().enumerate() {
        if keyboard.just_pressed(*key) && id < registry.len() {
            settings.selected_point = id;
        }
    }

    for (key, axis) in [
        (KeyCode::KeyX, Axis::X),
        (KeyCode::KeyY, Axis::Y),
        (KeyCode::KeyZ, Axis::Z),
    ] {
        if keyboard.just_pressed(key) {
            settings.selected_axis = axis;
        }
    }

    let mut steps = 0;
    if keyboard.just_pressed(KeyCode::ArrowUp) {
        steps += 1;
    }
    if keyboard.just_pressed(KeyCode::ArrowDown) {
        steps -= 1;
    }
    if steps == 0 {
        return;
    }
    if keyboard.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight]) {
        steps *= FAST_NUDGE;
    }

    match registry.nudge_axis(settings.selected_point, settings.selected_axis, steps) {
        Ok(anchor) => debug!("Point {} moved to {:?}", settings.selected_point, anchor),
        Err(err) => warn!("{err}"),
    }
}

pub fn update_debug_panel(
    settings: Res<DebugSettings>,
    registry: Res<PointOfInterestRegistry>,
    mut texts: Query<&mut Text, With<DebugPanelText>>,
) {
    if !settings.is_changed() && !registry.is_changed() {
        return;
    }
    for mut text in &mut texts {
        text.0 = debug_panel_text(&settings, &registry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn debug_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<PointOfInterestRegistry>()
            .insert_resource(DebugSettings {
                enabled: true,
                ..default()
            })
            .add_systems(Update, debug_keyboard_controls);
        app
    }

    fn tap(app: &mut App, keys: &[KeyCode]) {
        {
            let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            for key in keys {
                input.press(*key);
            }
        }
        app.update();
        let mut input = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        input.release_all();
        input.clear();
    }

    #[test]
    fn p_toggles_flag() {
        let mut app = debug_app();
        tap(&mut app, &[KeyCode::KeyP]);
        assert!(!app.world().resource::<PointOfInterestRegistry>().show_points());
        tap(&mut app, &[KeyCode::KeyP]);
        assert!(app.world().resource::<PointOfInterestRegistry>().show_points());
    }

    #[test]
    fn selection_and_nudge_edit_the_registry() {
        let mut app = debug_app();
        tap(&mut app, &[KeyCode::Digit2]);
        tap(&mut app, &[KeyCode::KeyY]);
        tap(&mut app, &[KeyCode::ArrowUp]);

        let settings = app.world().resource::<DebugSettings>();
        assert_eq!(settings.selected_point, 1);
        assert_eq!(settings.selected_axis, Axis::Y);

        let anchor = app
            .world()
            .resource::<PointOfInterestRegistry>()
            .anchor(1)
            .expect("point 1 exists");
        assert!((anchor.y - 2.29).abs() < 1e-5);

        tap(&mut app, &[KeyCode::ShiftLeft, KeyCode::ArrowDown]);
        let anchor = app
            .world()
            .resource::<PointOfInterestRegistry>()
            .anchor(1)
            .expect("point 1 exists");
        assert!((anchor.y - 2.19).abs() < 1e-5);
    }

    #[test]
    fn disabled_surface_ignores_keys() {
        let mut app = debug_app();
        app.world_mut().resource_mut::<DebugSettings>().enabled = false;
        tap(&mut app, &[KeyCode::KeyP, KeyCode::ArrowUp]);

        let registry = app.world().resource::<PointOfInterestRegistry>();
        assert!(registry.show_points());
        assert_eq!(registry.anchor(0), Ok(Vec3::new(-3.98, 1.69, -3.66)));
    }

    #[test]
    fn panel_lists_all_twelve_coordinates() {
        let settings = DebugSettings {
            enabled: true,
            selected_point: 2,
            selected_axis: Axis::Z,
        };
        let registry = PointOfInterestRegistry::default();
        let text = debug_panel_text(&settings, &registry);

        assert!(text.starts_with("[P] show points of interest: on"));
        assert!(text.contains("> point 3: x=3.90 y=0.78 [z=4.56]"));
        assert!(text.contains("  point 1: x=-3.98 y=1.69 z=-3.66"));
        assert_eq!(text.matches('=').count(), 12);
    }
}
