// Physical and numerical constants for the particle pipeline
use bevy::math::DVec2;

use crate::math::Real;

// Global physics
pub const DEFAULT_TIMESTEP: Real = 1.0 / 60.0;
pub const DEFAULT_GRAVITY: DVec2 = DVec2::new(0.0, -980.0);

// Floating-point guard for lengths and divisions
pub const EPSILON: Real = 1e-8;

// Broadphase
pub const DEFAULT_CELL_SIZE: Real = 20.0;

// Solver
pub const DEFAULT_SOLVER_ITERATIONS: usize = 20;
pub const RESTING_VELOCITY_THRESHOLD: Real = 2.0;
pub const FRICTION_MIN_NORMAL_SPEED: Real = 2.0;
pub const WAKE_THRESHOLD_VELOCITY: Real = 2.0;
pub const WAKE_THRESHOLD_PENETRATION: Real = 0.3;

// Positional correction (Baumgarte)
pub const POSITIONAL_SLOP: Real = 0.05;
pub const CORRECTION_PERCENT: Real = 0.8;
pub const MAX_CORRECTION_PER_ITERATION: Real = 2.0;
pub const CORRECTION_VELOCITY_BLEED: Real = 0.0;

// Integration
pub const SLEEP_DELAY: Real = 0.3;
pub const MAX_DAMPING: Real = 0.999;

// Constraints
pub const CONSTRAINT_TOLERANCE: Real = 1e-6;

// Particle material defaults
pub const DEFAULT_FRICTION: Real = 0.3;
pub const DEFAULT_RESTITUTION: Real = 0.4;
pub const DEFAULT_DAMPING: Real = 0.0;
pub const DEFAULT_SLEEP_THRESHOLD: Real = 0.05;

// Static (container) body material
pub const STATIC_BODY_RESTITUTION: Real = 0.8;
pub const STATIC_BODY_FRICTION: Real = 0.1;
