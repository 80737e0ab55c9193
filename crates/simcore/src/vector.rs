//! Planar vector carrying both a polar and a Cartesian view.
//!
//! The physics stages mix the two representations freely: drive forces are
//! naturally expressed as "this much push along the wheel heading", while
//! summing forces is only meaningful on Cartesian components. [`Vector`]
//! keeps the two in lock-step so callers never have to.

use std::ops::{Add, Sub};

use nalgebra::Vector2;

use crate::error::SimError;

/// `atan2` with the degenerate origin mapped to 0.
///
/// `f64::atan2` returns ±π for some signed-zero inputs; a zero vector has no
/// meaningful heading, so it is pinned to 0.
pub fn heading(y: f64, x: f64) -> f64 {
    if x == 0.0 && y == 0.0 {
        0.0
    } else {
        y.atan2(x)
    }
}

/// A 2D vector with magnitude/direction and Cartesian components.
///
/// Invariant: `component == (magnitude * cos(direction), magnitude * sin(direction))`.
/// Vectors built from Cartesian parts have a non-negative magnitude. Polar
/// construction accepts a signed magnitude, which points the component
/// opposite to `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector {
    magnitude: f64,
    direction: f64,
    component: Vector2<f64>,
}

impl Default for Vector {
    fn default() -> Self {
        Vector::zero()
    }
}

impl Vector {
    /// Build from magnitude and direction (radians).
    pub fn polar(magnitude: f64, direction: f64) -> Self {
        Vector {
            magnitude,
            direction,
            component: Vector2::new(magnitude * direction.cos(), magnitude * direction.sin()),
        }
    }

    /// Build from Cartesian components; magnitude and direction are derived.
    pub fn cartesian(x: f64, y: f64) -> Self {
        Vector {
            magnitude: x.hypot(y),
            direction: heading(y, x),
            component: Vector2::new(x, y),
        }
    }

    pub fn zero() -> Self {
        Vector {
            magnitude: 0.0,
            direction: 0.0,
            component: Vector2::zeros(),
        }
    }

    /// Build from whichever representation is available.
    ///
    /// The Cartesian pair takes precedence when both are supplied. Supplying
    /// neither a full polar pair nor a component is an error.
    pub fn try_from_parts(
        magnitude: Option<f64>,
        direction: Option<f64>,
        component: Option<(f64, f64)>,
    ) -> Result<Self, SimError> {
        match (magnitude, direction, component) {
            (_, _, Some((x, y))) => Ok(Vector::cartesian(x, y)),
            (Some(m), Some(d), None) => Ok(Vector::polar(m, d)),
            _ => Err(SimError::invalid_argument(
                "vector needs a magnitude and direction, or a component",
            )),
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    pub fn component(&self) -> Vector2<f64> {
        self.component
    }

    pub fn x(&self) -> f64 {
        self.component[0]
    }

    pub fn y(&self) -> f64 {
        self.component[1]
    }

    pub fn set_magnitude(&mut self, magnitude: f64) {
        self.magnitude = magnitude;
        self.update_component();
    }

    pub fn set_direction(&mut self, direction: f64) {
        self.direction = direction;
        self.update_component();
    }

    /// The part of this vector lying along `angle`, as a vector pointing along `angle`.
    ///
    /// The resulting magnitude is signed: a vector facing away from `angle`
    /// projects to a negative magnitude.
    pub fn project(&self, angle: f64) -> Vector {
        Vector::polar(self.magnitude * (self.direction - angle).cos(), angle)
    }

    fn update_component(&mut self) {
        self.component = Vector2::new(
            self.magnitude * self.direction.cos(),
            self.magnitude * self.direction.sin(),
        );
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        let sum = self.component + rhs.component;
        Vector::cartesian(sum[0], sum[1])
    }
}

impl Sub for Vector {
    type Output = Vector;

    fn sub(self, rhs: Vector) -> Vector {
        let diff = self.component - rhs.component;
        Vector::cartesian(diff[0], diff[1])
    }
}

impl std::iter::Sum for Vector {
    fn sum<I: Iterator<Item = Vector>>(iter: I) -> Vector {
        iter.fold(Vector::zero(), |acc, v| acc + v)
    }
}
