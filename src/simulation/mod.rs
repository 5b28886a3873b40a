pub mod error;
pub mod states;
pub mod params;
pub mod elements;
pub mod engine;
pub mod forces;
pub mod integrator;
pub mod diagnostics;
pub mod driver;
pub mod scenario;
