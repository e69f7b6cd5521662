use crate::error::{PhysicsError, Result};
use crate::math::{Point, Real, repeat_vector, vector};

/// Axis-aligned bounding box, `min` is the bottom-left corner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Point,
    pub max: Point,
}

impl Aabb {
    pub fn new(min: Point, max: Point) -> Result<Self> {
        if !(min.x <= max.x && min.y <= max.y) {
            return Err(PhysicsError::InvalidBounds);
        }
        Ok(Self { min, max })
    }

    #[inline(always)]
    pub fn from_circle(center: Point, radius: Real) -> Self {
        let extent = repeat_vector(radius.abs());
        Self {
            min: center - extent,
            max: center + extent,
        }
    }

    /// Smallest box enclosing all points; `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self {
            min: *first,
            max: *first,
        };
        for point in rest {
            aabb.min = aabb.min.min(*point);
            aabb.max = aabb.max.max(*point);
        }
        Some(aabb)
    }

    /// Touching boxes count as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }

    pub fn expand(&self, amount: Real) -> Self {
        let extent = repeat_vector(amount);
        Self {
            min: self.min - extent,
            max: self.max + extent,
        }
    }

    pub fn width(&self) -> Real {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> Real {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point {
        vector(
            (self.min.x + self.max.x) * 0.5,
            (self.min.y + self.max.y) * 0.5,
        )
    }

    pub fn contains_point(&self, p: Point) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        assert_eq!(
            Aabb::new(vector(1.0, 0.0), vector(0.0, 1.0)),
            Err(PhysicsError::InvalidBounds)
        );
        assert!(Aabb::new(vector(0.0, 0.0), vector(0.0, 0.0)).is_ok());
    }

    #[test]
    fn overlap_includes_touching() {
        let a = Aabb::new(vector(0.0, 0.0), vector(1.0, 1.0)).unwrap();
        let b = Aabb::new(vector(1.0, 0.5), vector(2.0, 2.0)).unwrap();
        let c = Aabb::new(vector(1.1, 0.0), vector(2.0, 1.0)).unwrap();
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn from_points_and_extents() {
        assert!(Aabb::from_points(&[]).is_none());
        let aabb =
            Aabb::from_points(&[vector(1.0, 5.0), vector(-2.0, 3.0), vector(4.0, -1.0)]).unwrap();
        assert_eq!(aabb.min, vector(-2.0, -1.0));
        assert_eq!(aabb.max, vector(4.0, 5.0));
        assert_eq!(aabb.width(), 6.0);
        assert_eq!(aabb.height(), 6.0);
        assert_eq!(aabb.center(), vector(1.0, 2.0));
        assert!(aabb.contains_point(vector(4.0, 5.0)));
        assert!(!aabb.expand(-1.0).contains_point(vector(4.0, 5.0)));
    }
}
