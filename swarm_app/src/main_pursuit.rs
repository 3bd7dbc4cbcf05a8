//! Steering demo: a quarry runs waypoints while a pursuer chases it and an
//! evader keeps clear of the pursuer

use agent_engine::config::ConfigError;
use agent_engine::prelude::*;
use rand::Rng;

// Simulation configuration
const TICK_RATE: f32 = 60.0;
const SIMULATION_TICKS: u32 = 900;
const LOG_INTERVAL: u32 = 60;
const SPAWN_SPREAD: f32 = 15.0;
const WAYPOINT_REACHED_DISTANCE: f32 = 1.5;
const CONFIG_PATH: &str = "swarm.toml";

fn load_config() -> SimulationConfig {
    match SimulationConfig::load_from_file(CONFIG_PATH) {
        Ok(config) => {
            log::info!("Loaded configuration from {}", CONFIG_PATH);
            config
        }
        Err(ConfigError::Io(_)) => {
            log::info!("No {} found, using defaults", CONFIG_PATH);
            SimulationConfig::default()
        }
        Err(error) => {
            log::warn!("Failed to load {}: {}, using defaults", CONFIG_PATH, error);
            SimulationConfig::default()
        }
    }
}

fn spawn_point(rng: &mut impl Rng) -> Vec3 {
    Vec3::new(
        rng.gen_range(-SPAWN_SPREAD..SPAWN_SPREAD),
        0.0,
        rng.gen_range(-SPAWN_SPREAD..SPAWN_SPREAD),
    )
}

fn main() {
    agent_engine::foundation::logging::init();

    let config = load_config();
    if let Err(error) = config.validate() {
        log::error!("Invalid configuration: {}", error);
        return;
    }

    let mut rng = rand::thread_rng();

    // The quarry runs a fixed patrol with the configured arrive behavior
    let waypoints = [
        Vec3::new(25.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 25.0),
        Vec3::new(-25.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -25.0),
    ];
    let mut waypoint_index = 0;

    let mut quarry = Vehicle::from_config(&config);
    quarry.entity_mut().position = spawn_point(&mut rng);

    let mut pursuer = Vehicle::from_config(&config).with_smoothing(true);
    pursuer.entity_mut().position = spawn_point(&mut rng);
    pursuer
        .steering_mut()
        .set_behaviors(vec![WeightedBehavior::new(Behavior::Pursuit, 1.0)]);

    let mut evader = Vehicle::from_config(&config);
    evader.entity_mut().position = spawn_point(&mut rng);
    evader
        .steering_mut()
        .set_behaviors(vec![WeightedBehavior::new(Behavior::Evade, 1.0)]);

    log::info!(
        "Starting pursuit demo: {} ticks at {} Hz",
        SIMULATION_TICKS,
        TICK_RATE
    );

    let delta = 1.0 / TICK_RATE;
    let mut timer = Timer::new();

    for tick in 0..SIMULATION_TICKS {
        // Snapshot everyone at the start of the tick so cross-agent reads
        // are consistent regardless of update order
        let quarry_state = quarry.target_state();
        let pursuer_state = pursuer.target_state();

        if (quarry.entity().position - waypoints[waypoint_index]).magnitude()
            < WAYPOINT_REACHED_DISTANCE
        {
            waypoint_index = (waypoint_index + 1) % waypoints.len();
            log::info!("Quarry heading for waypoint {}", waypoint_index);
        }
        quarry
            .steering_mut()
            .set_target(TargetState::at_position(waypoints[waypoint_index]));
        pursuer.steering_mut().set_target(quarry_state);
        evader.steering_mut().set_target(pursuer_state);

        quarry.update(delta);
        pursuer.update(delta);
        evader.update(delta);
        timer.update();

        if tick % LOG_INTERVAL == 0 {
            let gap = (pursuer.entity().position - quarry.entity().position).magnitude();
            log::info!(
                "tick {:4}: quarry at ({:6.2}, {:6.2}), pursuer gap {:5.2}, evader speed {:4.2}",
                tick,
                quarry.entity().position.x,
                quarry.entity().position.z,
                gap,
                evader.entity().speed()
            );
        }
    }

    let final_gap = (pursuer.entity().position - quarry.entity().position).magnitude();
    log::info!(
        "Finished {} ticks in {:.1} ms; final pursuer gap {:.2}",
        timer.frame_count(),
        timer.total_time() * 1000.0,
        final_gap
    );
}
