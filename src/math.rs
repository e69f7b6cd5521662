use bevy::math::{DMat2, DVec2};

use crate::config::constants::EPSILON;

pub type Real = f64;

pub type Vector = DVec2;
pub type Matrix = DMat2;
pub type Point = DVec2;

#[inline(always)]
pub fn zero_vector() -> Vector {
    DVec2::ZERO
}

#[inline(always)]
pub fn vector(x: Real, y: Real) -> Vector {
    DVec2::new(x, y)
}

#[inline(always)]
pub fn repeat_vector(value: Real) -> Vector {
    DVec2::splat(value)
}

/// Unit vector in the direction of `v`, or zero when `v` is shorter than [`EPSILON`].
#[inline]
pub fn normalized_or_zero(v: Vector) -> Vector {
    let length = v.length();
    if length < EPSILON {
        zero_vector()
    } else {
        v / length
    }
}

#[inline(always)]
pub fn is_near_zero(v: Vector, eps: Real) -> bool {
    v.x.abs() < eps && v.y.abs() < eps
}

/// Scalar z-component of the 3D cross product.
#[inline(always)]
pub fn cross(a: Vector, b: Vector) -> Real {
    a.x * b.y - a.y * b.x
}

/// `v` rotated 90 degrees counter-clockwise.
#[inline(always)]
pub fn perpendicular(v: Vector) -> Vector {
    DVec2::new(-v.y, v.x)
}

#[inline]
pub fn project_onto(v: Vector, axis: Vector) -> Vector {
    let axis_len_sq = axis.length_squared();
    if axis_len_sq == 0.0 {
        return zero_vector();
    }
    axis * (v.dot(axis) / axis_len_sq)
}

#[inline]
pub fn clamp_length(v: Vector, max_len: Real) -> Vector {
    let len_sq = v.length_squared();
    if len_sq > max_len * max_len {
        v * (max_len / len_sq.sqrt())
    } else {
        v
    }
}

#[inline(always)]
pub fn distance(a: Point, b: Point) -> Real {
    (a - b).length()
}

#[inline(always)]
pub fn distance_squared(a: Point, b: Point) -> Real {
    (a - b).length_squared()
}

#[inline(always)]
pub fn lerp(a: Vector, b: Vector, t: Real) -> Vector {
    a + (b - a) * t
}

/// Counter-clockwise rotation by `angle` radians.
#[inline(always)]
pub fn rotation_matrix(angle: Real) -> Matrix {
    DMat2::from_angle(angle)
}

#[inline(always)]
pub fn matrix_transpose(m: &Matrix) -> Matrix {
    m.transpose()
}

/// Position and orientation of a local frame. Rotation matrices are cached
/// and must be refreshed through [`Transform2::set_angle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2 {
    pub position: Point,
    angle: Real,
    rotation: Matrix,
    rotation_t: Matrix,
}

impl Default for Transform2 {
    fn default() -> Self {
        Self::new(zero_vector(), 0.0)
    }
}

impl Transform2 {
    pub fn new(position: Point, angle: Real) -> Self {
        let rotation = rotation_matrix(angle);
        Self {
            position,
            angle,
            rotation,
            rotation_t: matrix_transpose(&rotation),
        }
    }

    pub fn angle(&self) -> Real {
        self.angle
    }

    pub fn set_angle(&mut self, angle: Real) {
        self.angle = angle;
        self.rotation = rotation_matrix(angle);
        self.rotation_t = matrix_transpose(&self.rotation);
    }

    pub fn local_to_world(&self, point: Point) -> Point {
        self.rotation * point + self.position
    }

    pub fn world_to_local(&self, point: Point) -> Point {
        self.rotation_t * (point - self.position)
    }

    pub fn local_vector_to_world(&self, v: Vector) -> Vector {
        self.rotation * v
    }

    pub fn world_vector_to_local(&self, v: Vector) -> Vector {
        self.rotation_t * v
    }

    pub fn transform_points(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.local_to_world(p)).collect()
    }
}
