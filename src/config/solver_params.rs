use bevy::prelude::*;

use crate::config::constants;
use crate::error::{PhysicsError, Result};
use crate::math::Real;

/// Solver parameters for controlling contact, correction and sleep behavior.
///
/// Edit these between steps only; the pipeline reads them once per step.
#[derive(Resource, Clone, Debug, PartialEq)]
pub struct SolverParams {
    /// Impulse/constraint passes per step
    pub solver_iterations: usize,

    /// Broadphase cell edge length (world units)
    pub cell_size: Real,

    /// Seconds a particle must stay below its sleep threshold before sleeping
    pub sleep_delay: Real,

    /// Closing speed under which restitution is forced to zero
    pub resting_velocity_threshold: Real,

    /// A sleeping particle only wakes when the closing speed exceeds this...
    pub wake_velocity_threshold: Real,

    /// ...or the penetration exceeds this
    pub wake_penetration_threshold: Real,

    /// Friction is skipped for contacts closing slower than this
    pub friction_min_normal_speed: Real,

    /// Tolerated penetration before positional correction kicks in
    pub slop: Real,

    /// Fraction of the remaining penetration removed by positional correction (0.0 - 1.0)
    pub correction_percent: Real,

    /// Upper bound on the mass-weighted correction applied per contact
    pub max_correction: Real,

    /// Fraction of the positional correction also added to velocity (0.0 = disabled)
    pub velocity_bleed: Real,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            solver_iterations: constants::DEFAULT_SOLVER_ITERATIONS,
            cell_size: constants::DEFAULT_CELL_SIZE,
            sleep_delay: constants::SLEEP_DELAY,
            resting_velocity_threshold: constants::RESTING_VELOCITY_THRESHOLD,
            wake_velocity_threshold: constants::WAKE_THRESHOLD_VELOCITY,
            wake_penetration_threshold: constants::WAKE_THRESHOLD_PENETRATION,
            friction_min_normal_speed: constants::FRICTION_MIN_NORMAL_SPEED,
            slop: constants::POSITIONAL_SLOP,
            correction_percent: constants::CORRECTION_PERCENT,
            max_correction: constants::MAX_CORRECTION_PER_ITERATION,
            velocity_bleed: constants::CORRECTION_VELOCITY_BLEED,
        }
    }
}

impl SolverParams {
    pub fn with_iterations(mut self, iterations: usize) -> Self {
        self.solver_iterations = iterations;
        self
    }

    pub fn with_cell_size(mut self, cell_size: Real) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set correction strength (clamped to 0.0 - 1.0) and slop
    pub fn with_correction(mut self, percent: Real, slop: Real) -> Self {
        self.correction_percent = percent.clamp(0.0, 1.0);
        self.slop = slop;
        self
    }

    pub fn with_velocity_bleed(mut self, bleed: Real) -> Self {
        self.velocity_bleed = bleed;
        self
    }

    pub fn with_sleep_delay(mut self, delay: Real) -> Self {
        self.sleep_delay = delay;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(PhysicsError::InvalidCellSize {
                cell_size: self.cell_size,
            });
        }
        if self.solver_iterations == 0 {
            return Err(PhysicsError::InvalidParameter {
                name: "solver_iterations",
                value: 0.0,
            });
        }
        if !(0.0..=1.0).contains(&self.correction_percent) {
            return Err(PhysicsError::InvalidParameter {
                name: "correction_percent",
                value: self.correction_percent,
            });
        }

        let non_negative = [
            ("sleep_delay", self.sleep_delay),
            ("resting_velocity_threshold", self.resting_velocity_threshold),
            ("wake_velocity_threshold", self.wake_velocity_threshold),
            ("wake_penetration_threshold", self.wake_penetration_threshold),
            ("friction_min_normal_speed", self.friction_min_normal_speed),
            ("slop", self.slop),
            ("max_correction", self.max_correction),
            ("velocity_bleed", self.velocity_bleed),
        ];
        for (name, value) in non_negative {
            if !(value >= 0.0) {
                return Err(PhysicsError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}
