use bevy::prelude::*;
use thiserror::Error;

use constants::points_of_interest::{
    ANCHOR_AXIS_MAX, ANCHOR_AXIS_MIN, ANCHOR_STEP, POINT_ANCHORS, SHOW_POINTS_BY_DEFAULT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOfInterest {
    pub id: usize,
    pub anchor: Vec3,
}

#[derive(Debug, Error, PartialEq)]
pub enum PoiError {
    #[error("unknown point of interest {0}")]
    UnknownPoint(usize),
    #[error("coordinate {axis:?} of point {id} is not finite: {value}")]
    NonFiniteCoordinate { id: usize, axis: Axis, value: f32 },
}

/// Clamps to the editable range and snaps to the edit step.
pub fn constrain_coordinate(value: f32) -> f32 {
    let clamped = value.clamp(ANCHOR_AXIS_MIN, ANCHOR_AXIS_MAX);
    let snapped = (clamped / ANCHOR_STEP).round() * ANCHOR_STEP;
    // Snapping can step just past a bound in floating point.
    snapped.clamp(ANCHOR_AXIS_MIN, ANCHOR_AXIS_MAX)
}

/// The session's points of interest, in id order, plus the global show flag.
#[derive(Resource, Debug, Clone)]
pub struct PointOfInterestRegistry {
    points: Vec<PointOfInterest>,
    show_points: bool,
}

impl Default for PointOfInterestRegistry {
    fn default() -> Self {
        Self::from_anchors(&POINT_ANCHORS)
    }
}

impl PointOfInterestRegistry {
    /// Ids follow slice order. Startup anchors are taken as given.
    pub fn from_anchors(anchors: &[Vec3]) -> Self {
        Self {
            points: anchors
                .iter()
                .enumerate()
                .map(|(id, anchor)| PointOfInterest {
                    id,
                    anchor: *anchor,
                })
                .collect(),
            show_points: SHOW_POINTS_BY_DEFAULT,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointOfInterest> {
        self.points.iter()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&PointOfInterest> {
        self.points.get(id)
    }

    pub fn anchor(&self, id: usize) -> Result<Vec3, PoiError> {
        self.get(id)
            .map(|point| point.anchor)
            .ok_or(PoiError::UnknownPoint(id))
    }

    /// Replaces the whole anchor. Nothing changes if any axis is rejected.
    pub fn set_anchor(&mut self, id: usize, anchor: Vec3) -> Result<Vec3, PoiError> {
        let current = self.anchor(id)?;
        let mut next = current;
        for axis in Axis::ALL {
            let value = anchor[axis.index()];
            if !value.is_finite() {
                return Err(PoiError::NonFiniteCoordinate { id, axis, value });
            }
            next[axis.index()] = constrain_coordinate(value);
        }
        self.points[id].anchor = next;
        Ok(next)
    }

    pub fn set_axis(&mut self, id: usize, axis: Axis, value: f32) -> Result<Vec3, PoiError> {
        let mut anchor = self.anchor(id)?;
        if !value.is_finite() {
            return Err(PoiError::NonFiniteCoordinate { id, axis, value });
        }
        anchor[axis.index()] = constrain_coordinate(value);
        self.points[id].anchor = anchor;
        Ok(anchor)
    }

    /// Moves one coordinate by `steps` edit steps.
    pub fn nudge_axis(&mut self, id: usize, axis: Axis, steps: i32) -> Result<Vec3, PoiError> {
        let anchor = self.anchor(id)?;
        self.set_axis(id, axis, anchor[axis.index()] + steps as f32 * ANCHOR_STEP)
    }

    pub fn show_points(&self) -> bool {
        self.show_points
    }

    pub fn set_show_points(&mut self, show: bool) {
        if self.show_points != show {
            info!("Points of interest {}", if show { "shown" } else { "hidden" });
        }
        self.show_points = show;
    }
}
