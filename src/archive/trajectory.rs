//! CSV archive for simulated trajectories
//!
//! One row per (body, step): `body,step,x,y,z`. Rows of a body are written in
//! step order and must be read back the same way. Floats are written in their
//! shortest round-trip form, so a save/load cycle reproduces every value.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::simulation::driver::Trajectories;
use crate::simulation::states::NVec3;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("body `{body}`: expected step {expected}, found {found}")]
    OutOfOrder { body: String, expected: usize, found: usize },
}

#[derive(Debug, Serialize, Deserialize)]
struct TrajectoryRecord {
    body: String,
    step: usize,
    x: f64,
    y: f64,
    z: f64,
}

pub fn write_csv<W: Write>(writer: W, trajectories: &Trajectories) -> Result<(), ArchiveError> {
    let mut w = csv::Writer::from_writer(writer);
    for (name, track) in trajectories {
        for (step, p) in track.iter().enumerate() {
            w.serialize(TrajectoryRecord {
                body: name.clone(),
                step,
                x: p.x,
                y: p.y,
                z: p.z,
            })?;
        }
    }
    w.flush()?;
    Ok(())
}

pub fn read_csv<R: Read>(reader: R) -> Result<Trajectories, ArchiveError> {
    let mut r = csv::Reader::from_reader(reader);
    let mut trajectories = Trajectories::new();

    for result in r.deserialize() {
        let rec: TrajectoryRecord = result?;
        let track = trajectories.entry(rec.body.clone()).or_default();
        if rec.step != track.len() {
            return Err(ArchiveError::OutOfOrder {
                body: rec.body,
                expected: track.len(),
                found: rec.step,
            });
        }
        track.push(NVec3::new(rec.x, rec.y, rec.z));
    }
    Ok(trajectories)
}

/// Save trajectories to a CSV file
pub fn save_csv(path: &Path, trajectories: &Trajectories) -> Result<(), ArchiveError> {
    write_csv(File::create(path)?, trajectories)?;
    info!(path = %path.display(), bodies = trajectories.len(), "trajectories saved");
    Ok(())
}

/// Load trajectories saved by [`save_csv`]
pub fn load_csv(path: &Path) -> Result<Trajectories, ArchiveError> {
    let trajectories = read_csv(File::open(path)?)?;
    info!(path = %path.display(), bodies = trajectories.len(), "trajectories loaded");
    Ok(trajectories)
}
