use bevy::prelude::*;

/// Run state of the simulation: pause, single-step and reset requests.
///
/// Knows nothing about input or physics; whoever handles input flips these
/// flags and the step system consumes them.
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub struct SimulationController {
    paused: bool,
    step_requested: bool,
    reset_requested: bool,
}

impl SimulationController {
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
        self.step_requested = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Advance exactly one step while paused. Ignored when running.
    pub fn request_step(&mut self) {
        if self.paused {
            self.step_requested = true;
        }
    }

    /// Pauses and asks for the scene to be cleared.
    pub fn request_reset(&mut self) {
        self.paused = true;
        self.reset_requested = true;
    }

    /// Whether this tick should advance the simulation. Consumes a pending
    /// single-step request.
    pub fn should_step(&mut self) -> bool {
        if !self.paused {
            return true;
        }
        std::mem::take(&mut self.step_requested)
    }

    /// Consumes a pending reset request.
    pub fn should_reset(&mut self) -> bool {
        std::mem::take(&mut self.reset_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_controller_always_steps() {
        let mut controller = SimulationController::default();
        assert!(controller.should_step());
        assert!(controller.should_step());
        controller.request_step();
        controller.pause();
        assert!(!controller.should_step());
    }

    #[test]
    fn single_step_is_consumed_once() {
        let mut controller = SimulationController::default();
        controller.toggle_pause();
        assert!(controller.is_paused());
        controller.request_step();
        assert!(controller.should_step());
        assert!(!controller.should_step());
    }

    #[test]
    fn reset_pauses_and_is_consumed_once() {
        let mut controller = SimulationController::default();
        controller.request_reset();
        assert!(controller.is_paused());
        assert!(controller.should_reset());
        assert!(!controller.should_reset());

        controller.resume();
        assert!(!controller.is_paused());
    }
}
