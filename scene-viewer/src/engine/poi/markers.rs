use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use constants::render_settings::{MARKER_FONT_SIZE, MARKER_SIZE};

use crate::engine::poi::registry::PointOfInterestRegistry;
use crate::engine::ui::OverlayTarget;

/// Binds an entity to the point of interest with the same id.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoiMarker {
    pub id: usize,
}

/// Presentation state written by the resolver. Hidden until first resolved.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct MarkerState {
    pub visible: bool,
    pub offset: Vec2,
}

/// CSS transform placing a marker at `offset` from the viewport centre.
pub fn marker_transform_css(offset: Vec2) -> String {
    format!("translateX({}px) translateY({}px)", offset.x, offset.y)
}

/// Top-left of a marker node of `size` centred at `offset` from the middle
/// of `viewport`.
pub fn marker_top_left(viewport: Vec2, offset: Vec2, size: f32) -> Vec2 {
    viewport * 0.5 + offset - Vec2::splat(size * 0.5)
}

pub fn spawn_poi_markers(
    mut commands: Commands,
    registry: Res<PointOfInterestRegistry>,
    overlay: Res<OverlayTarget>,
) {
    for point in registry.iter() {
        let marker = (
            Name::new(format!("point-{}", point.id)),
            PoiMarker { id: point.id },
            MarkerState::default(),
        );

        match *overlay {
            // The host page owns the `.point-N` elements.
            OverlayTarget::Dom => {
                commands.spawn(marker);
            }
            OverlayTarget::Canvas => {
                commands
                    .spawn((
                        marker,
                        Node {
                            position_type: PositionType::Absolute,
                            width: Val::Px(MARKER_SIZE),
                            height: Val::Px(MARKER_SIZE),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BorderRadius::MAX,
                        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
                        Visibility::Hidden,
                    ))
                    .with_children(|parent| {
                        parent.spawn((
                            Text::new((point.id + 1).to_string()),
                            TextFont {
                                font_size: MARKER_FONT_SIZE,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    });
            }
        }
    }
    info!("✓ {} point of interest markers ({:?})", registry.len(), *overlay);
}

/// Hides every marker while the global flag is off. Runs every frame,
/// after resolution, so it overrides any outcome.
pub fn enforce_show_points_flag(
    registry: Res<PointOfInterestRegistry>,
    mut markers: Query<&mut MarkerState>,
) {
    if registry.show_points() {
        return;
    }
    for mut state in &mut markers {
        if state.visible {
            state.visible = false;
        }
    }
}

pub fn apply_marker_state(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut markers: Query<(&MarkerState, &mut Node, &mut Visibility), With<PoiMarker>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let viewport = Vec2::new(window.width(), window.height());

    for (state, mut node, mut visibility) in &mut markers {
        let top_left = marker_top_left(viewport, state.offset, MARKER_SIZE);
        node.left = Val::Px(top_left.x);
        node.top = Val::Px(top_left.y);
        *visibility = if state.visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}
