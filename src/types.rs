use serde::{Deserialize, Deserializer, Serialize};

/// Accepts JSON numbers like `56.0` for u32 fields, rejecting fractional
/// or out-of-range values.
pub fn deserialize_u32_from_number<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let v = f64::deserialize(deserializer)?;
    if v.fract() != 0.0 || v < 0.0 || v > f64::from(u32::MAX) {
        return Err(serde::de::Error::custom("expected a non-negative integer"));
    }
    Ok(v as u32)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub w: u32,
    #[serde(deserialize_with = "deserialize_u32_from_number")]
    pub h: u32,
}

impl Rect {
    pub fn new(w: u32, h: u32) -> Self {
        Self { w, h }
    }

    pub fn area(&self) -> u64 {
        self.w as u64 * self.h as u64
    }

    pub fn rotated(&self) -> Self {
        Self {
            w: self.h,
            h: self.w,
        }
    }

    pub fn fits_in(&self, other: &Rect) -> bool {
        self.w <= other.w && self.h <= other.h
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.w, self.h)
    }
}

/// A piece shape and how many identical copies of it must be placed.
#[derive(Debug, Clone)]
pub struct PieceKind {
    pub rect: Rect,
    pub count: u32,
}

/// An oriented piece together with the top-left corner it was placed at.
/// `x` grows rightward, `y` grows downward from the board's top edge.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Placement {
    pub rect: Rect,
    pub x: u32,
    pub y: u32,
    pub rotated: bool,
}

/// One complete tiling of the board, in placement order.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub placements: Vec<Placement>,
    pub board: Rect,
}

impl Solution {
    pub fn piece_count(&self) -> usize {
        self.placements.len()
    }

    pub fn placed_area(&self) -> u64 {
        self.placements.iter().map(|p| p.rect.area()).sum()
    }
}

/// Result of one search run.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub solutions: Vec<Solution>,
    /// How many search branches were exhausted without reaching a full
    /// tiling. Deterministic for a given board, piece list, and ordering.
    pub backtracks: u64,
    pub cancelled: bool,
}

impl Outcome {
    pub fn solved(&self) -> bool {
        !self.solutions.is_empty()
    }

    pub fn first(&self) -> Option<&Solution> {
        self.solutions.first()
    }
}
