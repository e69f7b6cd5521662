use bevy::prelude::IVec2;
use indexmap::{IndexMap, IndexSet};

use crate::config::constants::DEFAULT_CELL_SIZE;
use crate::core::{Particle, ParticleHandle};
use crate::error::{PhysicsError, Result};
use crate::geometry::Aabb;
use crate::math::{Point, Real};

pub type PackedCell = u64;

#[inline]
pub fn pack_coords(ix: i32, iy: i32) -> PackedCell {
    ((ix as u64) << 32) | (iy as u32 as u64)
}

#[inline]
pub fn unpack_coords(id: PackedCell) -> (i32, i32) {
    let ix = (id >> 32) as i32;
    let iy = id as u32 as i32;
    (ix, iy)
}

/// Uniform-grid broadphase, rebuilt every step.
///
/// A particle is registered in every cell its bounding box touches. Cells
/// and pairs come out in insertion order, so identical inserts always give
/// identical pair lists.
#[derive(Clone, Debug)]
pub struct SpatialHashGrid {
    cell_size: Real,
    inv_cell_size: Real,
    cells: IndexMap<PackedCell, Vec<ParticleHandle>>,
}

impl Default for SpatialHashGrid {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            inv_cell_size: 1.0 / DEFAULT_CELL_SIZE,
            cells: IndexMap::new(),
        }
    }
}

impl SpatialHashGrid {
    pub fn new(cell_size: Real) -> Result<Self> {
        if !(cell_size.is_finite() && cell_size > 0.0) {
            return Err(PhysicsError::InvalidCellSize { cell_size });
        }
        Ok(Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cells: IndexMap::new(),
        })
    }

    pub fn cell_size(&self) -> Real {
        self.cell_size
    }

    /// Number of occupied cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn cell_of(&self, point: Point) -> IVec2 {
        IVec2::new(
            (point.x * self.inv_cell_size).floor() as i32,
            (point.y * self.inv_cell_size).floor() as i32,
        )
    }

    pub fn insert(&mut self, handle: ParticleHandle, particle: &Particle) {
        self.insert_aabb(handle, particle.aabb());
    }

    /// Registers `handle` in every cell overlapped by `aabb`. Non-finite
    /// boxes are ignored.
    pub fn insert_aabb(&mut self, handle: ParticleHandle, aabb: Aabb) {
        if !(aabb.min.is_finite() && aabb.max.is_finite()) {
            return;
        }

        let lo = self.cell_of(aabb.min);
        let hi = self.cell_of(aabb.max);
        for ix in lo.x..=hi.x {
            for iy in lo.y..=hi.y {
                self.cells
                    .entry(pack_coords(ix, iy))
                    .or_default()
                    .push(handle);
            }
        }
    }

    /// Unique unordered pairs sharing at least one cell, lower handle first.
    pub fn compute_pairs(&self) -> Vec<(ParticleHandle, ParticleHandle)> {
        let mut pairs = IndexSet::new();

        for occupants in self.cells.values() {
            if occupants.len() < 2 {
                continue;
            }
            for (i, &a) in occupants.iter().enumerate() {
                for &b in &occupants[i + 1..] {
                    if a == b {
                        continue;
                    }
                    pairs.insert(if a < b { (a, b) } else { (b, a) });
                }
            }
        }

        pairs.into_iter().collect()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn occupants(&self, cell: IVec2) -> &[ParticleHandle] {
        self.cells
            .get(&pack_coords(cell.x, cell.y))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ParticleSet;
    use crate::math::vector;

    #[test]
    fn pack_roundtrip_negative_coords() {
        for (ix, iy) in [(0, 0), (-1, 5), (7, -3), (i32::MIN, i32::MAX)] {
            assert_eq!(unpack_coords(pack_coords(ix, iy)), (ix, iy));
        }
    }

    #[test]
    fn rejects_bad_cell_size() {
        for cell_size in [0.0, -5.0, Real::NAN, Real::INFINITY] {
            assert!(SpatialHashGrid::new(cell_size).is_err());
        }
    }

    #[test]
    fn cell_of_floors_negative_coordinates() {
        let grid = SpatialHashGrid::new(10.0).unwrap();
        assert_eq!(grid.cell_of(vector(0.0, 9.99)), IVec2::new(0, 0));
        assert_eq!(grid.cell_of(vector(-0.1, 10.0)), IVec2::new(-1, 1));
    }

    #[test]
    fn pair_spanning_several_cells_reported_once() {
        let mut set = ParticleSet::new();
        // Both straddle the corner at the origin, sharing four cells.
        let a = set.insert(Particle::new(vector(0.5, 0.5), 2.0, 1.0).unwrap());
        let b = set.insert(Particle::new(vector(-0.5, -0.5), 2.0, 1.0).unwrap());

        let mut grid = SpatialHashGrid::new(10.0).unwrap();
        for (handle, particle) in set.iter() {
            grid.insert(handle, particle);
        }

        assert_eq!(grid.cell_count(), 4);
        assert_eq!(grid.compute_pairs(), vec![(a, b)]);
    }

    #[test]
    fn lonely_cells_produce_no_pairs_and_clear_releases_everything() {
        let mut set = ParticleSet::new();
        let a = set.insert(Particle::new(vector(5.0, 5.0), 1.0, 1.0).unwrap());
        let b = set.insert(Particle::new(vector(55.0, 5.0), 1.0, 1.0).unwrap());

        let mut grid = SpatialHashGrid::new(10.0).unwrap();
        grid.insert(a, set.get(a).unwrap());
        grid.insert(b, set.get(b).unwrap());
        assert!(grid.compute_pairs().is_empty());
        assert_eq!(grid.occupants(IVec2::new(5, 0)), &[b]);

        grid.clear();
        assert_eq!(grid.cell_count(), 0);
        assert!(grid.occupants(IVec2::new(0, 0)).is_empty());
    }

    #[test]
    fn single_giant_cell_pairs_everything() {
        let mut set = ParticleSet::new();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let position = vector(10.0 + i as Real * 3.0, 500.0);
                set.insert(Particle::new(position, 1.0, 1.0).unwrap())
            })
            .collect();

        let mut grid = SpatialHashGrid::new(1000.0).unwrap();
        for &handle in handles.iter().rev() {
            grid.insert(handle, set.get(handle).unwrap());
        }

        let pairs = grid.compute_pairs();
        assert_eq!(grid.cell_count(), 1);
        assert_eq!(pairs.len(), 6);
        assert!(pairs.iter().all(|(a, b)| a < b));
    }
}
