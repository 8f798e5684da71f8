use grid_pathfinding_sandbox::{Algorithm, Pathfinder, SearchStatus};
use rand::{rngs::StdRng, SeedableRng};
use std::env;

// Steps a search over a random 20x20 grid and prints the grid every few expansions, the way a
// render loop would draw one frame per step. Legend:
// - S start, E end, # block
// - o frontier, x explored, * best path
//
// Usage: step_through [algorithm] [seed], e.g. `step_through "Best First" 4`

fn main() {
    let mut args = env::args().skip(1);
    let algorithm = match args.next().map(|name| name.parse::<Algorithm>()) {
        Some(Ok(algorithm)) => algorithm,
        Some(Err(e)) => {
            eprintln!("{e}");
            return;
        }
        None => Algorithm::Astar,
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut pathfinder = Pathfinder::new(20);
    pathfinder.randomize(&mut rng);
    println!("{}", pathfinder);
    if let Err(e) = pathfinder.select_algorithm(algorithm) {
        eprintln!("{e}");
        return;
    }
    loop {
        let status = pathfinder.advance();
        let steps = pathfinder.search().map_or(0, |s| s.steps());
        match status {
            Some(SearchStatus::Running) if steps % 25 == 0 => {
                println!("{algorithm} after {steps} steps:\n{pathfinder}");
            }
            Some(SearchStatus::Running) => {}
            Some(SearchStatus::Done) => {
                let hops = pathfinder.best_path().map_or(0, |p| p.len() - 1);
                println!("{algorithm} found a path of {hops} moves in {steps} steps:\n{pathfinder}");
                break;
            }
            Some(SearchStatus::Impossible) => {
                println!("There is no valid path to find for the given world state");
                pathfinder.clear_search();
                break;
            }
            None => break,
        }
    }
}
