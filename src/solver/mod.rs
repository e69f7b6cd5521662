pub mod contact_solver;
pub mod integrator;

pub use contact_solver::{positional_correction, resolve_contact};
pub use integrator::integrate;
