//! Camera window over the map.

use crate::types::{Dimensions, Position};

/// Top-left corner of a `screen`-sized window centred on a focal point.
///
/// Each axis computes `focal − screen / 2` (integer halving) and clamps it to
/// `[0, map − screen]`, so the window never leaves a map that is at least as
/// large as the screen. If the map is smaller than the screen on an axis, the
/// origin on that axis is pinned to 0.
pub fn compute_origin(
    focal_x: i32,
    focal_y: i32,
    map_width: u32,
    map_height: u32,
    screen_width: u32,
    screen_height: u32,
) -> Position {
    Position::new(
        clamp_axis(focal_x, map_width, screen_width),
        clamp_axis(focal_y, map_height, screen_height),
    )
}

fn clamp_axis(focal: i32, map: u32, screen: u32) -> i32 {
    let centred = i64::from(focal) - i64::from(screen / 2);
    let max_origin = i64::from(map) - i64::from(screen);
    centred.min(max_origin).max(0) as i32
}

/// The visible rectangle `[origin, origin + size)` in world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    origin: Position,
    size: Dimensions,
}

impl Viewport {
    pub fn new(origin: Position, size: Dimensions) -> Self {
        Self { origin, size }
    }

    /// Window of `screen` size that keeps `focus` visible inside `map`.
    pub fn centered_on(focus: Position, map: Dimensions, screen: Dimensions) -> Self {
        let origin = compute_origin(
            focus.x,
            focus.y,
            map.width,
            map.height,
            screen.width,
            screen.height,
        );
        Self::new(origin, screen)
    }

    pub fn origin(&self) -> Position {
        self.origin
    }

    pub fn size(&self) -> Dimensions {
        self.size
    }

    pub fn contains(&self, position: Position) -> bool {
        self.size.contains(Position::new(
            position.x - self.origin.x,
            position.y - self.origin.y,
        ))
    }

    /// Screen-local coordinates of a world position, if it is visible.
    pub fn to_screen(&self, position: Position) -> Option<(u32, u32)> {
        self.contains(position).then(|| {
            (
                (position.x - self.origin.x) as u32,
                (position.y - self.origin.y) as u32,
            )
        })
    }

    /// World positions inside the window, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.size.height as i32).flat_map(move |dy| {
            (0..self.size.width as i32).map(move |dx| self.origin.offset(dx, dy))
        })
    }
}
