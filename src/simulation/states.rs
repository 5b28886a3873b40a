//! Core state types for the N-body simulation.
//!
//! - `Body`   a named point mass: fixed mass, mutable position and velocity
//! - `System` the bodies of one run plus the simulation time `t`
//! - `Phase`  positions and velocities of every body, the integrator's state vector
//!
//! A `System` keeps its bodies sorted by name. Indices are therefore stable for
//! the whole run and independent of the order the caller supplied the bodies in,
//! which keeps the force sums (and so the trajectories) identical under any
//! permutation of the input list.

use std::collections::HashMap;

use nalgebra::Vector3;

use super::error::{SimError, SimResult};

pub type NVec3 = Vector3<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    name: String, // unique within a system
    m: f64,       // mass (kg)
    pub x: NVec3, // position (m)
    pub v: NVec3, // velocity (m/s)
}

impl Body {
    /// Build a body, rejecting a non-positive or non-finite mass.
    pub fn new(name: impl Into<String>, m: f64, x: NVec3, v: NVec3) -> SimResult<Self> {
        let name = name.into();
        if !(m.is_finite() && m > 0.0) {
            return Err(SimError::InvalidOrbitalElement {
                body: name,
                reason: format!("mass must be positive, got {m}"),
            });
        }
        Ok(Self { name, m, x, v })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mass(&self) -> f64 {
        self.m
    }
}

/// Positions and velocities of all bodies, index-aligned with `System::bodies`
#[derive(Debug, Clone, PartialEq)]
pub struct Phase {
    pub x: Vec<NVec3>,
    pub v: Vec<NVec3>,
}

impl Phase {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct System {
    bodies: Vec<Body>,            // sorted by name
    index: HashMap<String, usize>, // name -> position in `bodies`
    pub t: f64,                   // time (s)
}

impl System {
    /// Take ownership of the initial bodies. Fails on an empty list or a
    /// repeated name.
    pub fn new(mut bodies: Vec<Body>) -> SimResult<Self> {
        if bodies.is_empty() {
            return Err(SimError::EmptySystem);
        }
        bodies.sort_by(|a, b| a.name.cmp(&b.name));

        let mut index = HashMap::with_capacity(bodies.len());
        for (i, b) in bodies.iter().enumerate() {
            if index.insert(b.name.clone(), i).is_some() {
                return Err(SimError::DuplicateBody(b.name.clone()));
            }
        }

        Ok(Self { bodies, index, t: 0.0 })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    pub fn get(&self, name: &str) -> Option<&Body> {
        self.index_of(name).map(|i| &self.bodies[i])
    }

    pub fn masses(&self) -> Vec<f64> {
        self.bodies.iter().map(|b| b.m).collect()
    }

    pub fn positions(&self) -> Vec<NVec3> {
        self.bodies.iter().map(|b| b.x).collect()
    }

    /// Snapshot of every body's position and velocity
    pub fn phase(&self) -> Phase {
        Phase {
            x: self.positions(),
            v: self.bodies.iter().map(|b| b.v).collect(),
        }
    }

    /// Write a fully computed phase back to the bodies and advance `t`.
    /// All bodies are updated together, after every stage has succeeded.
    pub(crate) fn commit(&mut self, next: Phase, dt: f64) {
        debug_assert_eq!(next.len(), self.bodies.len());
        for ((b, x), v) in self.bodies.iter_mut().zip(next.x).zip(next.v) {
            b.x = x;
            b.v = v;
        }
        self.t += dt;
    }

    /// Map a pair of coincident body indices to a named error
    pub(crate) fn degenerate(&self, i: usize, j: usize) -> SimError {
        SimError::DegenerateConfiguration {
            first: self.bodies[i].name.clone(),
            second: self.bodies[j].name.clone(),
        }
    }
}
