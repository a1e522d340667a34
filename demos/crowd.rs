//! Crowd demo: agents walking between random goals around moving obstacles.
//!
//! Every frame runs an update phase that rebuilds the blockers, then a query
//! phase in which several worker threads path their share of the agents.
//!
//! Run with `RUST_LOG=debug cargo run --bin crowd -- [frames] [agents]`.

use std::f32::consts::TAU;

use glam::{Quat, Vec3};
use navgrid::{NAV_WORKERS_MAX, NavGrid, NavGridConfig, WorkerId};
use navgrid_core::{Aabb, BoxRotated, NavCell, Sphere};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

const GRID_SIZE: f32 = 64.0;
const WORKERS: usize = 4;
const PATH_CAPACITY: usize = 256;

struct Agent {
    pos: Vec3,
    goal: Vec3,
    speed: f32,
}

struct Obstacle {
    center: Vec3,
    size: Vec3,
    spin: f32,
    round: bool,
}

fn random_point(rng: &mut StdRng) -> Vec3 {
    let half = GRID_SIZE * 0.5 - 1.0;
    Vec3::new(rng.random_range(-half..half), 0.0, rng.random_range(-half..half))
}

fn rebuild_blockers(grid: &mut NavGrid, obstacles: &[Obstacle], time: f32) {
    let mut update = grid.update();
    update.blocker_clear_all();

    // Static walls along the edges of a central room, with doors.
    update.blocker_add_box(&Aabb::new(Vec3::new(-12.0, 0.0, -12.0), Vec3::new(-2.0, 2.0, -11.0)));
    update.blocker_add_box(&Aabb::new(Vec3::new(2.0, 0.0, -12.0), Vec3::new(12.0, 2.0, -11.0)));
    update.blocker_add_box(&Aabb::new(Vec3::new(-12.0, 0.0, 11.0), Vec3::new(12.0, 2.0, 12.0)));
    update.blocker_add_box(&Aabb::new(Vec3::new(-12.0, 0.0, -12.0), Vec3::new(-11.0, 2.0, 12.0)));

    for o in obstacles {
        if o.round {
            update.blocker_add_sphere(&Sphere::new(o.center, o.size.x * 0.5));
        } else {
            let rotation = Quat::from_rotation_y(o.spin * time);
            update.blocker_add_box_rotated(&BoxRotated::from_center(o.center, o.size, rotation));
        }
    }
    update.finish();
}

fn step_agents(grid: &NavGrid, worker: WorkerId, agents: &mut [Agent], rng: &mut StdRng) -> usize {
    let mut path = [NavCell::ZERO; PATH_CAPACITY];
    let mut stuck = 0;
    for agent in agents {
        let mut from = grid.at_position(agent.pos);
        if grid.blocked(from) {
            from = grid.closest_unblocked(worker, from);
            agent.pos = grid.position(from);
        }
        let goal = grid.at_position(agent.goal);
        let to = grid.closest_reachable(worker, from, goal);
        if to == from {
            agent.goal = random_point(rng);
            continue;
        }

        let n = grid.path(worker, from, to, &mut path);
        if n < 2 {
            stuck += 1;
            continue;
        }
        // Cut corners when the straight line is clear.
        let next = if n > 2 && !grid.line_blocked(worker, from, path[2]) {
            path[2]
        } else {
            path[1]
        };
        let target = grid.position(next);
        let delta = target - agent.pos;
        let dist = delta.length();
        if dist > f32::EPSILON {
            agent.pos += delta / dist * dist.min(agent.speed);
        }
    }
    stuck
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let frames: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(120);
    let agent_count: usize = args.next().and_then(|s| s.parse().ok()).unwrap_or(400);

    let config = NavGridConfig::default().with_size(GRID_SIZE).with_density(1.0);
    let mut grid = match NavGrid::try_new(config) {
        Ok(grid) => grid,
        Err(e) => {
            log::error!("{e}");
            std::process::exit(1);
        }
    };

    let mut rng = StdRng::seed_from_u64(42);
    let obstacles: Vec<Obstacle> = (0..24)
        .map(|_| Obstacle {
            center: random_point(&mut rng) + Vec3::new(0.0, 1.0, 0.0),
            size: Vec3::new(rng.random_range(1.0..6.0), 2.0, rng.random_range(0.5..2.0)),
            spin: rng.random_range(-0.5..0.5) * TAU,
            round: rng.random_bool(0.3),
        })
        .collect();
    let mut agents: Vec<Agent> = (0..agent_count)
        .map(|_| Agent {
            pos: random_point(&mut rng),
            goal: random_point(&mut rng),
            speed: rng.random_range(0.2..0.6),
        })
        .collect();

    let workers = WORKERS.min(NAV_WORKERS_MAX);
    let chunk = agent_count.div_ceil(workers).max(1);

    for frame in 0..frames {
        let time = frame as f32 / 30.0;
        rebuild_blockers(&mut grid, &obstacles, time);

        let grid = &grid;
        let stuck: usize = std::thread::scope(|scope| {
            let handles: Vec<_> = agents
                .chunks_mut(chunk)
                .enumerate()
                .map(|(i, agents)| {
                    let seed = (frame * workers + i) as u64;
                    scope.spawn(move || {
                        let mut rng = StdRng::seed_from_u64(seed);
                        step_agents(grid, WorkerId::new(i), agents, &mut rng)
                    })
                })
                .collect();
            handles.into_iter().filter_map(|h| h.join().ok()).sum()
        });

        if frame % 30 == 0 {
            log::info!(
                "frame {frame}: {} islands, {stuck} agents without a path",
                grid.island_count()
            );
        }
    }

    let stats = grid.stats();
    log::info!(
        "{} paths ({} cells iterated, {} enqueued, {} output), {} finds, {} line queries",
        stats.path_count,
        stats.path_itr_cells,
        stats.path_itr_enqueues,
        stats.path_output_cells,
        stats.find_count,
        stats.line_query_count,
    );
    log::info!(
        "{} blockers added, {} island computes, memory: grid {} KiB, {} workers {} KiB",
        stats.blocker_add_count,
        stats.island_computes,
        stats.grid_data_size / 1024,
        stats.worker_count,
        stats.worker_data_size / 1024,
    );
}
