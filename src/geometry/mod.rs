pub mod aabb;
pub mod narrowphase;
pub mod sp_grid;

pub use aabb::Aabb;
pub use narrowphase::circle_circle;
pub use sp_grid::{PackedCell, SpatialHashGrid, pack_coords, unpack_coords};
