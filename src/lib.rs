//! Exact rectangle-tiling solver: a backtracking search over a
//! priority-ordered skyline of the occupied board area. Pieces are
//! always tried at the topmost-leftmost open corner, which keeps the
//! board representation down to a handful of horizontal edges.

pub mod frontier;
pub mod render;
pub mod solver;
pub mod types;
