//! Parameters for cage construction.

use crate::error::{CageError, CageResult};
use crate::mode::TetMode;

/// Default determinant threshold below which a frame counts as degenerate.
pub const DEFAULT_DEGENERACY_THRESHOLD: f64 = 1e-5;

/// Parameters for building a tetrahedral cage.
#[derive(Debug, Clone)]
pub struct CageParams {
    /// Tetrahedron construction mode. Default: [`TetMode::Face`]
    pub mode: TetMode,

    /// A tetrahedron is degenerate when `|det(frame)|` is at or below this
    /// value. Default: `1e-5`
    pub degeneracy_threshold: f64,

    /// Build frames with unit-length surface edges, so only edge direction
    /// registers downstream. Has no effect in [`TetMode::Edge`].
    /// Default: false
    pub normalized_frames: bool,

    /// Prune degenerate tetrahedra after the first frame pass.
    /// Default: true
    pub remove_degenerate: bool,
}

impl Default for CageParams {
    fn default() -> Self {
        Self {
            mode: TetMode::Face,
            degeneracy_threshold: DEFAULT_DEGENERACY_THRESHOLD,
            normalized_frames: false,
            remove_degenerate: true,
        }
    }
}

impl CageParams {
    /// Params for the given mode with all other settings at their defaults.
    #[must_use]
    pub fn with_mode(mode: TetMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    /// One tetrahedron per face.
    #[must_use]
    pub fn face() -> Self {
        Self::with_mode(TetMode::Face)
    }

    /// Two tetrahedra per interior edge.
    #[must_use]
    pub fn edge() -> Self {
        Self::with_mode(TetMode::Edge)
    }

    /// One tetrahedron per fan wedge with a shared apex per vertex.
    #[must_use]
    pub fn vertex() -> Self {
        Self::with_mode(TetMode::Vertex)
    }

    /// One tetrahedron per fan wedge with its own apex.
    #[must_use]
    pub fn vertex_face() -> Self {
        Self::with_mode(TetMode::VertexFace)
    }

    /// Settings used when the cage drives a probe or cage deformer:
    /// per-wedge apexes with direction-only frames.
    #[must_use]
    pub fn for_cage() -> Self {
        Self {
            mode: TetMode::VertexFace,
            normalized_frames: true,
            ..Default::default()
        }
    }

    /// Set the degeneracy threshold.
    #[must_use]
    pub const fn with_degeneracy_threshold(mut self, threshold: f64) -> Self {
        self.degeneracy_threshold = threshold;
        self
    }

    /// Set normalized frame construction.
    #[must_use]
    pub const fn with_normalized_frames(mut self, normalized: bool) -> Self {
        self.normalized_frames = normalized;
        self
    }

    /// Set degenerate tetrahedron removal.
    #[must_use]
    pub const fn with_remove_degenerate(mut self, remove: bool) -> Self {
        self.remove_degenerate = remove;
        self
    }

    /// Check that the parameters are usable.
    ///
    /// # Errors
    ///
    /// Returns [`CageError::InvalidParams`] if the degeneracy threshold is
    /// negative or not finite.
    pub fn validate(&self) -> CageResult<()> {
        if !self.degeneracy_threshold.is_finite() || self.degeneracy_threshold < 0.0 {
            return Err(CageError::invalid_params(format!(
                "degeneracy threshold must be finite and non-negative, got {}",
                self.degeneracy_threshold
            )));
        }
        Ok(())
    }
}
