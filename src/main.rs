//! Popper entry point
//!
//! Loads settings, seeds the world and runs the fixed-rate tick loop.

use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use glam::Vec2;
use popper::Settings;
use popper::platform::{Autopilot, FramePacer, PointerState};
use popper::renderer::build_frame;
use popper::sim::tick;

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn main() {
    env_logger::init();
    log::info!("Popper starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => {
            let path = Path::new(&path);
            let settings = Settings::load(path);
            // Leave a template behind for the next run
            if !path.exists() {
                settings.save(path);
            }
            settings
        }
        None => Settings::default(),
    };
    let seed = settings.seed.unwrap_or_else(clock_seed);
    let mut world = settings.initialize_world(seed);

    let mut pacer = FramePacer::from_rate(settings.ticks_per_second);
    // Autopilot events are already in arena coordinates
    let mut pointer = PointerState::new(Vec2::ZERO);
    let autopilot = settings.autopilot.then(Autopilot::default);
    let status_every = u64::from(settings.ticks_per_second.max(1));

    log::info!("Popper running!");
    loop {
        let before = Instant::now();

        if let Some(autopilot) = &autopilot {
            for event in autopilot.events(&world) {
                pointer.apply(event);
            }
        }
        let stats = tick(&mut world, &pointer.snapshot());
        log::debug!("tick {}: {:?}", world.time_ticks, stats);
        let frame = build_frame(&world);

        if world.time_ticks % status_every == 0 {
            log::info!(
                "tick {}: {} bodies ({} player), total radius {:.1}, {} vertex bytes",
                world.time_ticks,
                world.bodies.len(),
                world.bodies.player_count(),
                world.bodies.total_radius(),
                frame.vertex_bytes().len()
            );
        }

        if settings
            .tick_limit
            .is_some_and(|limit| world.time_ticks >= limit)
        {
            break;
        }

        std::thread::sleep(pacer.sleep_after(before.elapsed()));
    }

    log::info!(
        "Stopped after {} ticks ({} over budget)",
        world.time_ticks,
        pacer.overruns()
    );
    match serde_json::to_string_pretty(&world.bodies) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Could not serialize bodies: {}", e),
    }
}
