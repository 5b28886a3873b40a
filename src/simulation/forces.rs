//! Gravitational force evaluation for the n-body engine
//!
//! Defines the [`ForceModel`] trait plus a serial direct-sum Newtonian model
//! and a rayon data-parallel variant of the same sum. Both return a fresh
//! force vector per call; nothing is cached between evaluations.

use rayon::prelude::*;

use super::error::SimResult;
use super::params::Parameters;
use super::states::{NVec3, System};

/// Two bodies at zero separation, by index into the snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coincident(pub usize, pub usize);

/// Trait for force laws operating on a snapshot of masses and positions.
/// `out[i]` of the returned vector is the net force on body `i`.
pub trait ForceModel: Send + Sync {
    fn forces(&self, m: &[f64], x: &[NVec3]) -> Result<Vec<NVec3>, Coincident>;
}

/// Direct O(n^2) Newtonian gravity, one visit per unordered pair.
/// No softening: the self term is skipped by index and coincident
/// bodies are reported instead of producing an infinite force.
#[allow(non_snake_case)]
pub struct NewtonianGravity {
    pub G: f64, // gravitational constant
}

impl NewtonianGravity {
    #[allow(non_snake_case)]
    pub fn new(G: f64) -> Self {
        Self { G }
    }
}

impl ForceModel for NewtonianGravity {
    fn forces(&self, m: &[f64], x: &[NVec3]) -> Result<Vec<NVec3>, Coincident> {
        let n = x.len();
        let mut out = vec![NVec3::zeros(); n];

        // Loop over each unordered pair (i, j) with i < j
        for i in 0..n {
            for j in (i + 1)..n {
                // r points from i to j: i is pulled along +r, j along -r
                let r = x[j] - x[i];
                let coef = pair_coefficient(self.G, m[i], m[j], &r).ok_or(Coincident(i, j))?;

                // Equal and opposite (Newton's third law)
                let f = coef * r;
                out[i] += f;
                out[j] -= f;
            }
        }
        Ok(out)
    }
}

/// Same sum as [`NewtonianGravity`], but each body's net force is computed
/// independently on the rayon pool. Every body sums its partners in index
/// order, so results are reproducible run to run.
#[allow(non_snake_case)]
pub struct ParallelNewtonianGravity {
    pub G: f64,
}

impl ParallelNewtonianGravity {
    #[allow(non_snake_case)]
    pub fn new(G: f64) -> Self {
        Self { G }
    }
}

impl ForceModel for ParallelNewtonianGravity {
    fn forces(&self, m: &[f64], x: &[NVec3]) -> Result<Vec<NVec3>, Coincident> {
        let n = x.len();
        let per_body: Vec<Result<NVec3, Coincident>> = (0..n)
            .into_par_iter()
            .map(|i| {
                let mut f = NVec3::zeros();
                for j in (0..n).filter(|&j| j != i) {
                    let r = x[j] - x[i];
                    let coef = pair_coefficient(self.G, m[i], m[j], &r)
                        .ok_or(Coincident(i.min(j), i.max(j)))?;
                    f += coef * r;
                }
                Ok(f)
            })
            .collect();

        // First failure in body order, matching the serial model's report
        per_body.into_iter().collect()
    }
}

/// G m_i m_j / |r|^3, or `None` when the pair is singular.
#[inline]
fn pair_coefficient(g: f64, mi: f64, mj: f64, r: &NVec3) -> Option<f64> {
    let r2 = r.norm_squared();
    if r2 == 0.0 {
        return None;
    }
    let inv_r = r2.sqrt().recip();
    let coef = g * mi * mj * inv_r * inv_r * inv_r;
    // a subnormal separation overflows even without an exact zero
    coef.is_finite().then_some(coef)
}

/// a_i = F_i / m_i
pub fn accelerations(forces: &[NVec3], m: &[f64]) -> Vec<NVec3> {
    forces.iter().zip(m).map(|(f, mi)| *f / *mi).collect()
}

/// Net gravitational force on every body of `sys`.
///
/// The result is indexed like `sys.bodies()`, which is name order, not the
/// order of the list the system was built from. Use [`System::index_of`] to
/// look a body up by name.
pub fn evaluate_forces(sys: &System, params: &Parameters) -> SimResult<Vec<NVec3>> {
    NewtonianGravity::new(params.G)
        .forces(&sys.masses(), &sys.positions())
        .map_err(|Coincident(i, j)| sys.degenerate(i, j))
}
