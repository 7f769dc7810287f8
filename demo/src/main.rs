//! Terminal demo: paced Dijkstra search on the default 25×25 grid.
//!
//! Run: cargo run --bin gridpath-demo -- [seed] [wall-percent]
//!
//! With a seed, walls are scattered at random (default 25%). Press `q` or
//! `Esc` to stop a running search.

mod view;

use std::error::Error;

use gridpath_core::Pos;
use gridpath_search::{
    Outcome, PathNode, RunOutcome, Session, SessionConfig, SessionResult, StepScheduler,
};
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};

use view::{Shade, TerminalView};

const DEFAULT_WALL_PCT: u32 = 25;

struct Args {
    seed: Option<u64>,
    wall_pct: u32,
}

fn parse_args() -> Result<Args, Box<dyn Error>> {
    let mut it = std::env::args().skip(1);
    let seed = it.next().map(|s| s.parse::<u64>()).transpose()?;
    let wall_pct = match it.next() {
        Some(s) => s.parse::<u32>()?.min(100),
        None => DEFAULT_WALL_PCT,
    };
    Ok(Args { seed, wall_pct })
}

/// Randomly wall off roughly `pct` percent of the free cells.
fn scatter_walls(session: &mut Session, seed: u64, pct: u32) -> SessionResult<usize> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let grid = session.grid();
    let (start, end) = (grid.start(), grid.end());
    let cells: Vec<Pos> = grid.range().iter().collect();

    for p in cells {
        if p != start && p != end && rng.random_range(0..100) < pct {
            session.set_wall(p, true)?;
        }
    }
    Ok(session.grid().walls())
}

fn run() -> Result<(), Box<dyn Error>> {
    let args = parse_args()?;
    let mut session = Session::new(SessionConfig::default())?;
    if let Some(seed) = args.seed {
        let n = scatter_walls(&mut session, seed, args.wall_pct)?;
        log::info!("placed {n} walls from seed {seed}");
    }

    let mut view = TerminalView::open(session.grid())?;
    view.draw_grid(session.grid())?;

    session.start()?;
    let mut scheduler = StepScheduler::new(session.config().tick_interval);
    let token = scheduler.cancel_token();
    let mut failure: Option<Box<dyn Error>> = None;
    let mut path: Vec<PathNode> = Vec::new();

    let outcome = scheduler.run(
        &mut session,
        |events| match view.apply(events).and_then(|()| view.quit_requested()) {
            Ok(true) => token.cancel(),
            Ok(false) => {}
            Err(e) => {
                failure.get_or_insert(e.into());
                token.cancel();
            }
        },
        |done| {
            if let Some(steps) = done.path_length() {
                log::info!("path of {steps} steps after {} visits", done.visited_count);
            }
            path = done.path.clone().unwrap_or_default();
        },
    )?;
    if let Some(e) = failure.take() {
        return Err(e);
    }

    match outcome {
        RunOutcome::Finished(Outcome::Succeeded) => {
            scheduler.play_path(&path, |_, node| {
                let res = session
                    .mark_path(node)
                    .map_err(Box::<dyn Error>::from)
                    .and_then(|()| {
                        view.paint(node.pos, Shade::Path)?;
                        Ok(view.flush()?)
                    });
                if let Err(e) = res {
                    failure.get_or_insert(e);
                    token.cancel();
                }
            });
            if let Some(e) = failure.take() {
                return Err(e);
            }
            view.show_stats(&session.stats())?;
        }
        RunOutcome::Finished(other) => {
            view.status(&format!("{other}: the end cell cannot be reached (any key to exit)"))?;
            view.flush()?;
        }
        RunOutcome::Cancelled => {
            view.status("search cancelled (any key to exit)")?;
            view.flush()?;
        }
    }

    view.wait_key()?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
