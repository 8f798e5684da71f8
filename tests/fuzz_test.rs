/// Fuzzes the step-driven search by checking on many random grids that every algorithm finishes
/// exactly when the end is reachable, that the flags and collections agree after every step and
/// that the optimal algorithms match a breadth-first reference distance.
use grid_pathfinding_sandbox::{Algorithm, Pathfinder, PathingGrid, Role, SearchStatus};
use grid_util::point::Point;
use rand::prelude::*;
use std::collections::VecDeque;

fn random_grid(n: usize, rng: &mut StdRng) -> Pathfinder {
    let mut pathfinder = Pathfinder::new(n);
    for x in 0..n as i32 {
        for y in 0..n as i32 {
            if rng.gen_bool(0.4) {
                pathfinder.set_role(Point::new(x, y), Role::Block);
            }
        }
    }
    pathfinder.set_role(Point::new(0, 0), Role::Start);
    pathfinder.set_role(Point::new(n as i32 - 1, n as i32 - 1), Role::End);
    pathfinder
}

/// Number of moves on a shortest path, found by plain breadth-first search.
fn bfs_distance(grid: &PathingGrid, start: Point, end: Point) -> Option<usize> {
    let side = grid.side_length();
    let mut dist = vec![usize::MAX; side * side];
    let mut queue = VecDeque::new();
    dist[grid.get_ix_point(&start)] = 0;
    queue.push_back(start);
    while let Some(p) = queue.pop_front() {
        let d = dist[grid.get_ix_point(&p)];
        if p == end {
            return Some(d);
        }
        for n in grid.neighbours(&p) {
            let n_ix = grid.get_ix_point(&n);
            if dist[n_ix] == usize::MAX {
                dist[n_ix] = d + 1;
                queue.push_back(n);
            }
        }
    }
    None
}

fn visualize_grid(pathfinder: &Pathfinder) {
    println!("{}", pathfinder);
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 300;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let mut pathfinder = random_grid(N, &mut rng);
        let reachable = pathfinder.reachable().unwrap();
        for algorithm in Algorithm::ALL {
            pathfinder.select_algorithm(algorithm).unwrap();
            let steps = pathfinder.run_to_end();
            assert!(steps <= N * N);
            let done = pathfinder.is_done();
            // Show the grid if the outcome disagrees with the components
            if done != reachable {
                visualize_grid(&pathfinder);
            }
            assert_eq!(done, reachable, "{algorithm}");
            assert_eq!(pathfinder.is_impossible(), !reachable);
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 5;
    const N_GRIDS: usize = 1000;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let mut pathfinder = random_grid(N, &mut rng);
        let start = pathfinder.start().unwrap();
        let end = pathfinder.end().unwrap();
        let Some(distance) = bfs_distance(pathfinder.grid(), start, end) else {
            continue;
        };
        for algorithm in Algorithm::ALL {
            pathfinder.select_algorithm(algorithm).unwrap();
            pathfinder.run_to_end();
            let path = pathfinder.best_path().unwrap();
            assert!(pathfinder.grid().is_valid_path(&path));
            assert_eq!(path.first(), Some(&end));
            assert_eq!(path.last(), Some(&start));
            let hops = path.len() - 1;
            if algorithm.is_optimal() {
                if hops != distance {
                    visualize_grid(&pathfinder);
                }
                assert_eq!(hops, distance, "{algorithm}");
            } else {
                assert!(hops >= distance);
            }
        }
    }
}

#[test]
fn fuzz_step_invariants() {
    const N: usize = 8;
    const N_GRIDS: usize = 50;
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..N_GRIDS {
        let mut pathfinder = random_grid(N, &mut rng);
        for algorithm in Algorithm::ALL {
            pathfinder.select_algorithm(algorithm).unwrap();
            loop {
                let grid = pathfinder.grid();
                assert!(grid.cells().all(|c| !(c.explored() && c.on_frontier())));
                for p in pathfinder.frontier() {
                    assert!(grid.cell_at(&p).on_frontier());
                }
                for p in pathfinder.explored() {
                    assert!(grid.cell_at(&p).explored());
                }
                let n_flagged = grid
                    .cells()
                    .filter(|c| c.explored() || c.on_frontier())
                    .count();
                assert_eq!(
                    n_flagged,
                    pathfinder.frontier().count() + pathfinder.explored().count()
                );
                if pathfinder.advance() != Some(SearchStatus::Running) {
                    break;
                }
            }
        }
    }
}
