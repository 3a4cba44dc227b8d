//! Summary statistics for a built cage.

use crate::mode::TetMode;

/// Counts describing a built [`crate::TetCage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CageStats {
    /// Construction mode.
    pub mode: TetMode,

    /// Number of real surface points.
    pub real_points: usize,

    /// Number of ghost apex points.
    pub ghost_points: usize,

    /// Number of tetrahedra after filtering.
    pub tetrahedra: usize,

    /// Number of interior edges after filtering.
    pub edges: usize,

    /// Number of tetrahedra removed by the degeneracy filter.
    pub removed_tetrahedra: usize,
}

impl CageStats {
    /// Real plus ghost points.
    #[must_use]
    pub const fn total_points(&self) -> usize {
        self.real_points + self.ghost_points
    }

    /// Check if the degeneracy filter removed anything.
    #[must_use]
    pub const fn was_filtered(&self) -> bool {
        self.removed_tetrahedra > 0
    }
}

impl std::fmt::Display for CageStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Cage ({}): {} tetrahedra over {} + {} points ({} removed as degenerate)",
            self.mode,
            self.tetrahedra,
            self.real_points,
            self.ghost_points,
            self.removed_tetrahedra
        )
    }
}
