//! Deterministic parametric shapes.

use std::f64::consts::TAU;

use crate::math::Vec3;
use crate::shape::Shape;

/// A single point at the base position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point;

impl Shape for Point {
    fn sample(&self) -> Vec<Vec3> {
        vec![Vec3::ZERO]
    }
}

/// Ring in the horizontal XZ plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub radius: f64,
    pub points: usize,
}

impl Shape for Circle {
    fn sample(&self) -> Vec<Vec3> {
        (0..self.points)
            .map(|i| {
                let angle = TAU * i as f64 / self.points as f64;
                Vec3::new(self.radius * angle.cos(), 0.0, self.radius * angle.sin())
            })
            .collect()
    }
}

/// Helix climbing from the base up to twice its radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spiral {
    pub radius: f64,
    pub turns: u32,
    pub points_per_turn: usize,
}

impl Shape for Spiral {
    fn sample(&self) -> Vec<Vec3> {
        let total = self.turns as usize * self.points_per_turn;
        (0..total)
            .map(|i| {
                let angle = TAU * i as f64 / self.points_per_turn as f64;
                let height = i as f64 / total as f64 * self.radius * 2.0;
                Vec3::new(self.radius * angle.cos(), height, self.radius * angle.sin())
            })
            .collect()
    }
}

/// Vertical segment centred on the base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub length: f64,
    pub points: usize,
}

impl Shape for Line {
    fn sample(&self) -> Vec<Vec3> {
        if self.points < 2 {
            return vec![Vec3::ZERO; self.points];
        }
        (0..self.points)
            .map(|i| {
                let t = i as f64 / (self.points - 1) as f64;
                Vec3::new(0.0, (t - 0.5) * self.length, 0.0)
            })
            .collect()
    }
}

pub fn point() -> Point {
    Point
}

pub fn circle(radius: f64, points: usize) -> Circle {
    Circle { radius, points }
}

pub fn spiral(radius: f64, turns: u32, points_per_turn: usize) -> Spiral {
    Spiral {
        radius,
        turns,
        points_per_turn,
    }
}

pub fn line(length: f64, points: usize) -> Line {
    Line { length, points }
}
