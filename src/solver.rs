use std::sync::atomic::{AtomicBool, Ordering};

use crate::frontier::Frontier;
use crate::types::{Outcome, PieceKind, Placement, Rect, Solution};

/// Exact-tiling backtracking solver.
///
/// At every step the next piece is tried at the topmost-leftmost open
/// corner of the board, in all orientations, for every kind with copies
/// remaining. Piece kinds are tried in the order given to `new`; that
/// order is part of the configuration and changes the search size by
/// orders of magnitude (largest-area-first is the fast ordering for the
/// classic 56x56 set: ~1.9k backtracks to the first solution versus
/// ~1M+ with the list reversed).
#[derive(Debug)]
pub struct Solver {
    board: Rect,
    kinds: Vec<PieceKind>,
    stop_after_first: bool,
}

impl Solver {
    pub fn new(
        board: Rect,
        kinds: Vec<PieceKind>,
        stop_after_first: bool,
    ) -> Result<Self, String> {
        if board.w == 0 || board.h == 0 {
            return Err("board dimensions must be non-zero".to_string());
        }
        if kinds.is_empty() {
            return Err("at least one piece kind is required".to_string());
        }
        let mut piece_area: u64 = 0;
        for kind in &kinds {
            if kind.rect.w == 0 || kind.rect.h == 0 {
                return Err(format!("piece dimensions must be non-zero in {}", kind.rect));
            }
            if kind.count == 0 {
                return Err(format!("piece count must be non-zero for {}", kind.rect));
            }
            if !kind.rect.fits_in(&board) && !kind.rect.rotated().fits_in(&board) {
                return Err(format!("piece {} does not fit in board {}", kind.rect, board));
            }
            piece_area += kind.rect.area() * u64::from(kind.count);
        }
        if piece_area != board.area() {
            return Err(format!(
                "total piece area {} does not match board area {}",
                piece_area,
                board.area()
            ));
        }
        Ok(Self {
            board,
            kinds,
            stop_after_first,
        })
    }

    pub fn solve(&self) -> Outcome {
        self.solve_until(&AtomicBool::new(false))
    }

    /// Runs the search, checking `cancel` once per candidate attempt.
    /// When the flag is raised the search unwinds and whatever was found
    /// so far is returned with `cancelled` set.
    pub fn solve_until(&self, cancel: &AtomicBool) -> Outcome {
        let total = self.kinds.iter().map(|k| k.count as usize).sum();
        let mut search = Search {
            board: self.board,
            kinds: &self.kinds,
            remaining: self.kinds.iter().map(|k| k.count).collect(),
            total,
            answer: Vec::with_capacity(total),
            solutions: Vec::new(),
            backtracks: 0,
            stop_after_first: self.stop_after_first,
            cancel,
            cancelled: false,
        };
        search.run(0, &Frontier::new(self.board));

        Outcome {
            solutions: search.solutions,
            backtracks: search.backtracks,
            cancelled: search.cancelled,
        }
    }
}

struct Search<'a> {
    board: Rect,
    kinds: &'a [PieceKind],
    remaining: Vec<u32>,
    total: usize,
    answer: Vec<Placement>,
    solutions: Vec<Solution>,
    backtracks: u64,
    stop_after_first: bool,
    cancel: &'a AtomicBool,
    cancelled: bool,
}

impl Search<'_> {
    /// One level of the recursion; `depth` is the number of pieces
    /// already placed. Returns true when the caller should stop searching
    /// and unwind.
    fn run(&mut self, depth: usize, frontier: &Frontier) -> bool {
        if depth == self.total {
            self.solutions.push(Solution {
                placements: self.answer.clone(),
                board: self.board,
            });
            return self.stop_after_first;
        }

        for j in 0..self.kinds.len() {
            if self.remaining[j] == 0 {
                continue;
            }

            for rotated in [true, false] {
                if self.cancel.load(Ordering::Relaxed) {
                    self.cancelled = true;
                    return true;
                }

                let piece = if rotated {
                    self.kinds[j].rect.rotated()
                } else {
                    self.kinds[j].rect
                };

                // place() mutates, so every attempt gets its own copy;
                // siblings must keep seeing the pre-trial boundary.
                let mut copy = frontier.clone();
                if let Some((x, y)) = copy.place(piece) {
                    self.remaining[j] -= 1;
                    self.answer.push(Placement {
                        rect: piece,
                        x,
                        y,
                        rotated,
                    });

                    let stop = self.run(depth + 1, &copy);

                    self.answer.pop();
                    self.remaining[j] += 1;

                    if stop {
                        return true;
                    }
                }
            }
        }

        // Every branch from here was a dead end.
        self.backtracks += 1;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(w: u32, h: u32, count: u32) -> PieceKind {
        PieceKind {
            rect: Rect::new(w, h),
            count,
        }
    }

    /// The classic 56x56 twelve-piece set, largest area first. Areas sum
    /// to 3136 = 56^2.
    fn classic_set() -> Vec<PieceKind> {
        vec![
            kind(14, 28, 1), // 392
            kind(18, 21, 2), // 378 x2
            kind(11, 32, 1), // 352
            kind(10, 32, 1), // 320
            kind(14, 21, 2), // 294 x2
            kind(14, 17, 1), // 238
            kind(7, 28, 1),  // 196
            kind(6, 28, 1),  // 168
            kind(7, 10, 1),  // 70
            kind(4, 14, 1),  // 56
        ]
    }

    /// Validates a complete tiling:
    /// 1. Every placement fits within the board
    /// 2. No two placements overlap
    /// 3. Piece count and covered area match the board exactly
    fn assert_tiling_valid(sol: &Solution, expected_pieces: usize) {
        let board = sol.board;
        assert_eq!(
            sol.piece_count(),
            expected_pieces,
            "expected {} pieces placed, got {}",
            expected_pieces,
            sol.piece_count()
        );
        assert_eq!(sol.placed_area(), board.area());

        for (pi, p) in sol.placements.iter().enumerate() {
            assert!(
                p.x + p.rect.w <= board.w,
                "piece {pi} ({}) exceeds board width: x={} + w={} > {}",
                p.rect,
                p.x,
                p.rect.w,
                board.w
            );
            assert!(
                p.y + p.rect.h <= board.h,
                "piece {pi} ({}) exceeds board height: y={} + h={} > {}",
                p.rect,
                p.y,
                p.rect.h,
                board.h
            );
        }

        for i in 0..sol.placements.len() {
            for j in (i + 1)..sol.placements.len() {
                let a = &sol.placements[i];
                let b = &sol.placements[j];
                let overlaps = a.x < b.x + b.rect.w
                    && b.x < a.x + a.rect.w
                    && a.y < b.y + b.rect.h
                    && b.y < a.y + a.rect.h;
                assert!(
                    !overlaps,
                    "piece {i} ({} @ ({},{})) overlaps piece {j} ({} @ ({},{}))",
                    a.rect, a.x, a.y, b.rect, b.x, b.y
                );
            }
        }
    }

    #[test]
    fn test_single_piece_fills_board() {
        let solver = Solver::new(Rect::new(10, 10), vec![kind(10, 10, 1)], true).unwrap();
        let outcome = solver.solve();
        assert!(outcome.solved());
        assert_eq!(outcome.backtracks, 0);

        let sol = outcome.first().unwrap();
        assert_tiling_valid(sol, 1);
        assert_eq!(sol.placements[0].x, 0);
        assert_eq!(sol.placements[0].y, 0);
    }

    #[test]
    fn test_dominoes_first_solution() {
        let solver = Solver::new(Rect::new(2, 2), vec![kind(2, 1, 2)], true).unwrap();
        let outcome = solver.solve();
        assert_eq!(outcome.solutions.len(), 1);
        let sol = outcome.first().unwrap();
        assert_tiling_valid(sol, 2);
        // The rotated orientation is tried first, so the first solution
        // found is the two vertical dominoes side by side.
        assert!(sol.placements.iter().all(|p| p.rotated));
    }

    #[test]
    fn test_dominoes_exhaustive_two_solutions() {
        let solver = Solver::new(Rect::new(2, 2), vec![kind(2, 1, 2)], false).unwrap();
        let outcome = solver.solve();
        assert_eq!(outcome.solutions.len(), 2);
        for sol in &outcome.solutions {
            assert_tiling_valid(sol, 2);
        }
        // One all-vertical tiling, one all-horizontal.
        assert!(outcome.solutions[0].placements.iter().all(|p| p.rotated));
        assert!(outcome.solutions[1].placements.iter().all(|p| !p.rotated));
    }

    #[test]
    fn test_square_orientations_both_counted() {
        // A square piece still branches on both orientations; exhaustive
        // enumeration deliberately reports the duplicate.
        let solver = Solver::new(Rect::new(3, 3), vec![kind(3, 3, 1)], false).unwrap();
        let outcome = solver.solve();
        assert_eq!(outcome.solutions.len(), 2);
    }

    #[test]
    fn test_rotation_required() {
        // 4x1 board with a 1x4 piece: only the rotated orientation fits.
        let solver = Solver::new(Rect::new(4, 1), vec![kind(1, 4, 1)], true).unwrap();
        let outcome = solver.solve();
        assert!(outcome.solved());
        assert!(outcome.first().unwrap().placements[0].rotated);
    }

    #[test]
    fn test_exhausts_without_solution() {
        // Three 2x2 squares cannot tile 4x3: every 2x2 covers two cells of
        // the middle row, so three of them would need six, and it has four.
        let solver = Solver::new(Rect::new(4, 3), vec![kind(2, 2, 3)], true).unwrap();
        let outcome = solver.solve();
        assert!(!outcome.solved());
        assert!(!outcome.cancelled);
        assert!(outcome.backtracks > 0);
    }

    #[test]
    fn test_classic_board_first_solution() {
        let solver = Solver::new(Rect::new(56, 56), classic_set(), true).unwrap();
        let outcome = solver.solve();
        assert!(outcome.solved());
        assert!(!outcome.cancelled);

        let sol = outcome.first().unwrap();
        assert_tiling_valid(sol, 12);
        assert_eq!(sol.placed_area(), 3136);

        // Largest-first ordering finds this in under 2k backtracks.
        assert!(outcome.backtracks > 0);
        assert!(
            outcome.backtracks < 2_000,
            "search took {} backtracks",
            outcome.backtracks
        );
    }

    /// Exhaustive enumeration of the classic board: 8 tilings, one per
    /// symmetry (4 rotations x 2 mirrors). Several million backtracks —
    /// run with --release.
    #[test]
    #[ignore = "several minutes in debug builds"]
    fn test_classic_board_all_solutions() {
        let solver = Solver::new(Rect::new(56, 56), classic_set(), false).unwrap();
        let outcome = solver.solve();
        assert_eq!(outcome.solutions.len(), 8);
        for sol in &outcome.solutions {
            assert_tiling_valid(sol, 12);
        }
    }

    #[test]
    fn test_cancellation() {
        let solver = Solver::new(Rect::new(56, 56), classic_set(), true).unwrap();
        let cancel = AtomicBool::new(true);
        let outcome = solver.solve_until(&cancel);
        assert!(outcome.cancelled);
        assert!(!outcome.solved());
        assert_eq!(outcome.backtracks, 0);
    }

    #[test]
    fn test_solver_is_debuggable() {
        // unwrap_err on Result<Solver, String> needs this too.
        let solver = Solver::new(Rect::new(2, 2), vec![kind(2, 1, 2)], true).unwrap();
        assert!(format!("{solver:?}").contains("Solver"));
    }

    #[test]
    fn test_rejects_zero_board() {
        let err = Solver::new(Rect::new(0, 10), vec![kind(1, 1, 1)], true).unwrap_err();
        assert!(err.contains("board dimensions"));
    }

    #[test]
    fn test_rejects_empty_piece_list() {
        let err = Solver::new(Rect::new(10, 10), vec![], true).unwrap_err();
        assert!(err.contains("at least one piece"));
    }

    #[test]
    fn test_rejects_zero_piece_dimension() {
        let err = Solver::new(Rect::new(10, 10), vec![kind(0, 5, 1)], true).unwrap_err();
        assert!(err.contains("piece dimensions"));
    }

    #[test]
    fn test_rejects_zero_count() {
        let err = Solver::new(Rect::new(10, 10), vec![kind(5, 5, 0)], true).unwrap_err();
        assert!(err.contains("count"));
    }

    #[test]
    fn test_rejects_oversize_piece() {
        let err = Solver::new(Rect::new(10, 10), vec![kind(11, 11, 1)], true).unwrap_err();
        assert!(err.contains("does not fit"));
    }

    #[test]
    fn test_rejects_area_mismatch() {
        let err = Solver::new(Rect::new(10, 10), vec![kind(5, 5, 2)], true).unwrap_err();
        assert!(err.contains("area"));
    }
}
