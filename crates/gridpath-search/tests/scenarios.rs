use std::collections::VecDeque;
use std::time::Duration;

use gridpath_core::{GridError, GridModel, Pos, UNREACHABLE};
use gridpath_search::{
    EngineState, FailureKind, Outcome, PathfindingEngine, RunOutcome, SearchError, SearchEvent,
    Session, SessionConfig, SessionError, StepScheduler, reconstruct,
};
use rand::rngs::SmallRng;
use rand::{RngExt, SeedableRng};

/// Plain BFS distances over non-wall cells, independent of the engine.
fn bfs_distances(grid: &GridModel) -> Vec<i32> {
    let mut dist = vec![UNREACHABLE; grid.len()];
    let mut queue = VecDeque::new();
    dist[grid.start_idx()] = 0;
    queue.push_back(grid.start());
    while let Some(p) = queue.pop_front() {
        let d = dist[grid.idx(p).unwrap()];
        for np in p.neighbors_4() {
            let Some(ni) = grid.idx(np) else {
                continue;
            };
            if grid.cell_at(ni).is_wall() || dist[ni] != UNREACHABLE {
                continue;
            }
            dist[ni] = d + 1;
            queue.push_back(np);
        }
    }
    dist
}

fn run_engine(grid: &mut GridModel) -> (EngineState, Vec<SearchEvent>) {
    let mut engine = PathfindingEngine::new();
    engine.start(grid).unwrap();
    let mut events = Vec::new();
    while engine.state().is_running() {
        events.extend_from_slice(engine.step(grid).unwrap());
    }
    (engine.state(), events)
}

fn random_grid(rng: &mut SmallRng, size: i32, wall_pct: u32) -> GridModel {
    let start = Pos::new(rng.random_range(0..size), rng.random_range(0..size));
    let mut end = start;
    while end == start {
        end = Pos::new(rng.random_range(0..size), rng.random_range(0..size));
    }
    let mut grid = GridModel::create(size, start, end).unwrap();
    for p in grid.range().iter() {
        if p != start && p != end && rng.random_range(0..100) < wall_pct {
            grid.set_wall(p, true).unwrap();
        }
    }
    grid
}

#[test]
fn empty_default_grid() {
    let mut grid = GridModel::from_config(&Default::default()).unwrap();
    let (state, _) = run_engine(&mut grid);
    assert_eq!(state, EngineState::Succeeded);
    assert_eq!(grid.end_distance(), Some(20));

    let path = reconstruct(&grid, grid.end_idx());
    assert_eq!(path.len(), 21);
    assert_eq!(path.first().map(|n| n.pos), Some(Pos::new(5, 5)));
    assert_eq!(path.last().map(|n| n.pos), Some(Pos::new(15, 15)));
}

#[test]
fn barrier_across_the_grid_blocks_the_search() {
    let mut grid = GridModel::from_config(&Default::default()).unwrap();
    for col in 0..25 {
        grid.toggle_wall(Pos::new(10, col)).unwrap();
    }
    let (state, events) = run_engine(&mut grid);
    assert_eq!(state, EngineState::Failed(FailureKind::NoPath));
    match events.last() {
        Some(SearchEvent::Done(s)) => {
            assert_eq!(s.outcome, Outcome::NoPathFound);
            // Rows 0..10 above the barrier.
            assert_eq!(s.visited_count, 250);
        }
        other => panic!("expected Done, got {other:?}"),
    }
    assert!(reconstruct(&grid, grid.end_idx()).is_empty());
}

#[test]
fn distances_match_bfs_on_random_layouts() {
    let mut rng = SmallRng::seed_from_u64(42);
    for _ in 0..60 {
        let size = rng.random_range(2..16);
        let mut grid = random_grid(&mut rng, size, 30);
        let reference = bfs_distances(&grid);
        let expected = reference[grid.end_idx()];

        let (state, events) = run_engine(&mut grid);
        if expected == UNREACHABLE {
            assert_eq!(state, EngineState::Failed(FailureKind::NoPath));
            continue;
        }

        assert_eq!(state, EngineState::Succeeded);
        assert_eq!(grid.end_distance(), Some(expected));

        let path = reconstruct(&grid, grid.end_idx());
        assert_eq!(path.len() as i32, expected + 1);
        assert_eq!(path[0].pos, grid.start());
        for w in path.windows(2) {
            assert!(w[0].pos.is_adjacent(w[1].pos));
            assert_eq!(w[1].distance, w[0].distance + 1);
            assert!(!grid.cell(w[1].pos).unwrap().is_wall());
        }

        // Every settled cell carries its true shortest distance.
        for ev in &events {
            if let SearchEvent::Visited { row, col, distance, .. } = *ev {
                let i = grid.idx(Pos::new(row, col)).unwrap();
                assert_eq!(distance, reference[i]);
            }
        }
    }
}

#[test]
fn repeated_runs_emit_identical_events() {
    let mut rng = SmallRng::seed_from_u64(7);
    let grid = random_grid(&mut rng, 20, 25);
    let (mut a, mut b) = (grid.clone(), grid);
    assert_eq!(run_engine(&mut a), run_engine(&mut b));
}

#[test]
fn edits_are_rejected_during_a_scheduled_run() {
    let mut session = Session::new(SessionConfig::default()).unwrap();
    session.start().unwrap();
    session.step().unwrap();
    let snapshot = session.grid().clone();

    assert_eq!(
        session.toggle_wall(Pos::new(0, 0)),
        Err(SessionError::RejectedEdit)
    );
    assert_eq!(
        session.set_start(Pos::new(1, 1)),
        Err(SessionError::RejectedEdit)
    );
    assert_eq!(
        session.set_end(Pos::new(2, 2)),
        Err(SessionError::RejectedEdit)
    );
    assert_eq!(session.grid(), &snapshot);

    let mut scheduler = StepScheduler::new(Duration::ZERO);
    let out = scheduler.run(&mut session, |_| {}, |_| {}).unwrap();
    assert_eq!(out, RunOutcome::Finished(Outcome::Succeeded));
    session.toggle_wall(Pos::new(0, 0)).unwrap();
}

#[test]
fn grid_stays_frozen_under_a_bare_engine() {
    let mut grid = GridModel::create(5, Pos::ZERO, Pos::new(4, 4)).unwrap();
    let mut engine = PathfindingEngine::new();
    engine.start(&mut grid).unwrap();
    engine.step(&mut grid).unwrap();

    assert_eq!(grid.set_end(Pos::new(0, 4)), Err(GridError::Locked));
    assert_eq!(grid.toggle_wall(Pos::new(2, 2)), Err(GridError::Locked));

    let mut other = GridModel::create(2, Pos::ZERO, Pos::new(1, 1)).unwrap();
    assert_eq!(engine.step(&mut other).err(), Some(SearchError::LockLost));

    let summary = engine.run_to_end(&mut grid).unwrap();
    assert_eq!(summary.outcome, Outcome::Succeeded);
    let path = summary.path.unwrap();
    assert_eq!(path.last().map(|n| n.pos), Some(grid.end()));
    assert_eq!(grid.end_distance(), Some(bfs_distances(&grid)[grid.end_idx()]));
}

#[test]
fn full_session_flow_with_playback() {
    let mut session = Session::new(SessionConfig::default()).unwrap();
    for row in 0..20 {
        session.toggle_wall(Pos::new(row, 10)).unwrap();
    }
    session.start().unwrap();

    let mut scheduler = StepScheduler::new(Duration::ZERO);
    let mut path = Vec::new();
    let out = scheduler
        .run(
            &mut session,
            |_| {},
            |done| path = done.path.clone().unwrap_or_default(),
        )
        .unwrap();
    assert_eq!(out, RunOutcome::Finished(Outcome::Succeeded));

    let expected = bfs_distances(session.grid())[session.grid().end_idx()];
    assert_eq!(path.len() as i32, expected + 1);

    assert!(scheduler.play_path(&path, |_, node| session.mark_path(node).unwrap()));
    let marked = session.grid().cells().iter().filter(|c| c.is_path()).count();
    assert_eq!(marked, path.len());

    let stats = session.stats();
    assert_eq!(stats.path_length, path.len());
    assert_eq!(stats.total_distance, Some(expected));

    session.clear_path().unwrap();
    assert_eq!(session.grid().walls(), 20);
    assert!(session.grid().cells().iter().all(|c| !c.is_path()));
}
