use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::types::Rect;

/// A horizontal segment of the occupied region's lower boundary:
/// x1 inclusive, x2 exclusive, at height y. Smaller y is higher on the
/// board. Ordered by (y, x1), so the minimum edge is always the
/// topmost-leftmost open corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub x1: u32,
    pub x2: u32,
    pub y: u32,
}

impl Edge {
    pub fn new(x1: u32, x2: u32, y: u32) -> Self {
        Self { x1, x2, y }
    }
}

impl Ord for Edge {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.y, self.x1, self.x2).cmp(&(other.y, other.x1, other.x2))
    }
}

impl PartialOrd for Edge {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The skyline of everything placed so far: a min-priority collection of
/// horizontal edges that together cover [0, board.w) exactly once.
///
/// Cloning a `Frontier` snapshots it; the search engine clones before
/// every placement attempt and drops the clone on backtrack.
#[derive(Debug, Clone)]
pub struct Frontier {
    board: Rect,
    edges: BinaryHeap<Reverse<Edge>>,
}

impl Frontier {
    /// An empty board: the boundary is its top edge, full width at y = 0.
    pub fn new(board: Rect) -> Self {
        let mut edges = BinaryHeap::new();
        edges.push(Reverse(Edge::new(0, board.w, 0)));
        Self { board, edges }
    }

    pub fn peek(&self) -> Option<Edge> {
        self.edges.peek().map(|&Reverse(e)| e)
    }

    pub fn pop(&mut self) -> Option<Edge> {
        self.edges.pop().map(|Reverse(e)| e)
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Edges in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter().map(|Reverse(e)| e)
    }

    /// Tries to place `piece` at the topmost-leftmost open corner. On
    /// success the boundary is updated and the corner (x, y) is returned.
    ///
    /// On failure the top edge has already been consumed, so the frontier
    /// is no longer a valid boundary — callers must attempt placements on
    /// a clone and discard it when this returns `None`.
    pub fn place(&mut self, piece: Rect) -> Option<(u32, u32)> {
        let mut top = self.pop()?;

        // Can we fit vertically?
        if top.y + piece.h > self.board.h {
            return None;
        }

        // Earlier placements may have left the boundary fragmented at this
        // height. Absorb immediate same-y continuations so the horizontal
        // check sees the true contiguous span.
        while let Some(&Reverse(next)) = self.edges.peek() {
            if next.y != top.y || next.x1 != top.x2 {
                break;
            }
            self.edges.pop();
            top.x2 = next.x2;
        }

        // This is the highest edge, so there is no room further right at
        // this height.
        if top.x1 + piece.w > top.x2 {
            return None;
        }

        // The bottom of the placed piece becomes part of the boundary.
        let bottom = Edge::new(top.x1, top.x1 + piece.w, top.y + piece.h);
        self.edges.push(Reverse(bottom));

        // Re-add the unused remainder of the old top edge.
        if top.x2 > bottom.x2 {
            self.edges.push(Reverse(Edge::new(bottom.x2, top.x2, top.y)));
        }

        Some((top.x1, top.y))
    }
}
