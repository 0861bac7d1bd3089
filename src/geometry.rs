use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::ParsePointError;

/// A pair of coordinates, either in image pixels or in screen points
/// depending on which transform produced it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// A landmark counts as set only when neither coordinate is zero.
    pub fn is_set(&self) -> bool {
        self.x != 0.0 && self.y != 0.0 && self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_egui(self) -> egui::Pos2 {
        egui::pos2(self.x, self.y)
    }
}

impl std::ops::Add<egui::Vec2> for Point {
    type Output = Point;

    fn add(self, delta: egui::Vec2) -> Point {
        Point::new(self.x + delta.x, self.y + delta.y)
    }
}

/// Parses `X,Y` as given on the command line.
impl FromStr for Point {
    type Err = ParsePointError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParsePointError {
            input: s.to_string(),
        };
        let (x, y) = s.split_once(',').ok_or_else(invalid)?;
        let x: f32 = x.trim().parse().map_err(|_| invalid())?;
        let y: f32 = y.trim().parse().map_err(|_| invalid())?;
        if !x.is_finite() || !y.is_finite() {
            return Err(invalid());
        }
        Ok(Point::new(x, y))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Both dimensions finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }

    pub fn exceeds(&self, threshold: f32) -> bool {
        self.width > threshold && self.height > threshold
    }
}

impl From<egui::Vec2> for Size {
    fn from(v: egui::Vec2) -> Self {
        Size::new(v.x, v.y)
    }
}

/// Crown and chin landmarks, in image pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CrownChinPointPair {
    pub crown: Point,
    pub chin: Point,
}

impl CrownChinPointPair {
    pub fn new(crown: Point, chin: Point) -> Self {
        Self { crown, chin }
    }

    pub fn is_set(&self) -> bool {
        self.crown.is_set() && self.chin.is_set()
    }
}
