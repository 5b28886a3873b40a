//! Conserved quantities of a system, used to judge integration quality

use super::states::{NVec3, System};

/// Kinetic and potential energy of a system (J)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Energy {
    pub kinetic: f64,
    pub potential: f64,
}

impl Energy {
    pub fn total(&self) -> f64 {
        self.kinetic + self.potential
    }
}

/// Total energy of the bodies among themselves. The central mass only
/// contributes when it is part of the system as a body.
#[allow(non_snake_case)]
pub fn energy(sys: &System, G: f64) -> Energy {
    let bodies = sys.bodies();

    let kinetic = bodies
        .iter()
        .map(|b| 0.5 * b.mass() * b.v.norm_squared())
        .sum();

    let mut potential = 0.0;
    for (i, bi) in bodies.iter().enumerate() {
        for bj in &bodies[i + 1..] {
            potential -= G * bi.mass() * bj.mass() / (bj.x - bi.x).norm();
        }
    }

    Energy { kinetic, potential }
}

/// Total angular momentum about the origin, sum of m (x × v)
pub fn angular_momentum(sys: &System) -> NVec3 {
    sys.bodies()
        .iter()
        .fold(NVec3::zeros(), |acc, b| acc + b.mass() * b.x.cross(&b.v))
}

/// Total linear momentum, sum of m v
pub fn linear_momentum(sys: &System) -> NVec3 {
    sys.bodies()
        .iter()
        .fold(NVec3::zeros(), |acc, b| acc + b.mass() * b.v)
}

/// |now - initial| / |initial|, or the absolute difference when the initial
/// value is zero
pub fn relative_drift(initial: f64, now: f64) -> f64 {
    let diff = (now - initial).abs();
    if initial == 0.0 {
        diff
    } else {
        diff / initial.abs()
    }
}
