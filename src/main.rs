use clap::Parser;
use tile_solver::render;
use tile_solver::solver::Solver;
use tile_solver::types::{PieceKind, Rect};

#[derive(Parser)]
#[command(name = "tile_solver", about = "Exact rectangle-tiling puzzle solver")]
struct Cli {
    /// Board dimensions (WxH, e.g. 56x56)
    #[arg(long)]
    board: String,

    /// Piece kinds as WxH:qty (e.g. 14x28:1 18x21:2), tried in the given
    /// order; largest-area first is usually fastest
    #[arg(long = "pieces", num_args = 1..)]
    pieces: Vec<String>,

    /// Enumerate every solution instead of stopping at the first
    #[arg(long)]
    all: bool,

    /// Show an ASCII layout of the first solution
    #[arg(long)]
    layout: bool,
}

fn parse_dimensions(s: &str) -> Result<Rect, String> {
    let parts: Vec<&str> = s.split('x').collect();
    if parts.len() != 2 {
        return Err(format!("invalid dimensions '{}', expected WxH", s));
    }
    let w = parts[0]
        .parse::<u32>()
        .map_err(|_| format!("invalid width in '{}'", s))?;
    let h = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid height in '{}'", s))?;
    if w == 0 || h == 0 {
        return Err(format!("dimensions must be non-zero in '{}'", s));
    }
    Ok(Rect::new(w, h))
}

fn parse_piece(s: &str) -> Result<PieceKind, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() != 2 {
        return Err(format!("invalid piece '{}', expected WxH:qty", s));
    }
    let rect = parse_dimensions(parts[0])?;
    let count = parts[1]
        .parse::<u32>()
        .map_err(|_| format!("invalid quantity in '{}'", s))?;
    if count == 0 {
        return Err(format!("quantity must be non-zero in '{}'", s));
    }
    Ok(PieceKind { rect, count })
}

fn main() {
    let cli = Cli::parse();

    let board = parse_dimensions(&cli.board).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });

    let kinds: Vec<PieceKind> = cli
        .pieces
        .iter()
        .map(|p| parse_piece(p))
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });

    let solver = Solver::new(board, kinds, !cli.all).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    });
    let outcome = solver.solve();

    for (i, sol) in outcome.solutions.iter().enumerate() {
        println!("Solution {}:", i + 1);
        for p in &sol.placements {
            let rot = if p.rotated { " [rotated]" } else { "" };
            println!("  {} @ ({}, {}){}", p.rect, p.x, p.y, rot);
        }
        println!();
    }

    if cli.layout
        && let Some(sol) = outcome.first()
    {
        print!("{}", render::render_board(board, &sol.placements));
        println!();
    }

    if outcome.solved() {
        println!(
            "Summary: {} solution{} found, {} backtracks",
            outcome.solutions.len(),
            if outcome.solutions.len() == 1 { "" } else { "s" },
            outcome.backtracks,
        );
    } else {
        println!("No solution found after {} backtracks", outcome.backtracks);
    }
}
