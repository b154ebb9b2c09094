//! Runs the view shader's vertex stage on the CPU.
//!
//! A draw is emulated the way a GPU executes it: every vertex gets its own
//! invocation of [`view_shader::main_vs`], with no ordering between
//! invocations and one read-only [`ViewConstants`] shared by all of them.

use rayon::prelude::*;
use shared::ViewConstants;
use spirv_std::glam::{Vec3, Vec4};
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, trace};

pub mod config;

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("vertex data has {len} floats, which is not a multiple of 3")]
    RaggedVertexData { len: usize },
}

pub type RunnerResult<T> = std::result::Result<T, RunnerError>;

/// Splits a flat `x, y, z` stream into positions.
pub fn positions_from_flat(data: &[f32]) -> RunnerResult<Vec<Vec3>> {
    if !data.len().is_multiple_of(3) {
        return Err(RunnerError::RaggedVertexData { len: data.len() });
    }
    Ok(data.chunks_exact(3).map(Vec3::from_slice).collect())
}

/// The vertex stage with its `view` uniform bound.
#[derive(Clone, Copy, Debug, Default)]
pub struct VertexStage {
    constants: ViewConstants,
}

impl VertexStage {
    pub fn new(constants: ViewConstants) -> Self {
        Self { constants }
    }

    pub fn constants(&self) -> &ViewConstants {
        &self.constants
    }

    /// Rebinds the uniform; only possible between draws.
    pub fn set_constants(&mut self, constants: ViewConstants) {
        self.constants = constants;
    }

    /// Invokes the shader once per position. Results are in input order.
    pub fn draw(&self, positions: &[Vec3]) -> Vec<Vec4> {
        debug!(vertices = positions.len(), "drawing");
        let constants = &self.constants;
        positions
            .par_iter()
            .map(|&pos| {
                let mut out_pos = Vec4::ZERO;
                view_shader::main_vs(pos, constants, &mut out_pos);
                trace!(?pos, ?out_pos, "vertex invocation");
                out_pos
            })
            .collect()
    }
}
