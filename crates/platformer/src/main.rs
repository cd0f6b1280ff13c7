//! Headless platformer demo
//!
//! Runs a single walker through a small level at a fixed timestep and logs
//! what the character controller reports. Pass a `.toml` or `.ron` config
//! path as the first argument; otherwise `resources/demo_level.toml` is used
//! when present, falling back to built-in defaults.

mod config;
mod level;

use std::error::Error;
use std::path::{Path, PathBuf};

use controller2d::config::Config;
use controller2d::controller::{BoxCollider, CharacterMotor, Controller2D};
use controller2d::foundation::logging;
use controller2d::foundation::math::{Vec2, Vec3};
use controller2d::foundation::time::SimClock;
use controller2d::physics::CollisionWorld;

use crate::config::GameConfig;

const DEFAULT_CONFIG_PATH: &str = "resources/demo_level.toml";

/// Simulation state for the demo walker
struct PlatformerApp {
    config: GameConfig,
    world: CollisionWorld,
    controller: Controller2D,
    motor: CharacterMotor,
    clock: SimClock,
}

impl PlatformerApp {
    fn new(config: GameConfig) -> Result<Self, Box<dyn Error>> {
        let world = level::build_world(&config.level)?;

        let simulation = &config.simulation;
        let spawn = Vec3::new(simulation.spawn[0], simulation.spawn[1], 0.0);
        let collider = BoxCollider::new(Vec2::new(simulation.box_size[0], simulation.box_size[1]));
        let controller = Controller2D::new(config.controller.clone(), spawn, collider)?;
        let motor = CharacterMotor::new(config.motor.clone())?;
        let clock = SimClock::new(simulation.timestep);

        log::info!(
            "Spawned walker at ({:.2}, {:.2}) with box {:.2} x {:.2}",
            spawn.x,
            spawn.y,
            collider.size.x,
            collider.size.y
        );

        Ok(Self {
            config,
            world,
            controller,
            motor,
            clock,
        })
    }

    fn run(&mut self) -> Result<(), Box<dyn Error>> {
        let simulation = self.config.simulation.clone();
        let dt = self.clock.timestep();
        log::info!("Running {} steps at {:.4}s per step", simulation.steps, dt);

        let mut airborne_steps = 0_u64;
        let mut turns = 0_u64;

        for _ in 0..simulation.steps {
            let tick = self.clock.tick();
            self.motor
                .set_drop_input((simulation.drop_from_step..simulation.drop_until_step).contains(&tick));

            let direction = self.motor.direction();
            let now = self.clock.advance();
            let outcome = self.motor.step(&mut self.controller, &self.world, dt, now)?;

            if self.motor.direction() != direction {
                turns += 1;
                log::info!("Step {}: turned to face {}", tick, if self.motor.direction() > 0.0 { "right" } else { "left" });
            }
            if !outcome.collisions.below {
                airborne_steps += 1;
            }

            if simulation.report_every > 0 && tick % simulation.report_every == 0 {
                self.report(tick);
            }
        }

        let position = self.controller.position();
        log::info!(
            "Finished at ({:.3}, {:.3}) after {} turns, airborne for {} of {} steps",
            position.x,
            position.y,
            turns,
            airborne_steps,
            simulation.steps
        );
        Ok(())
    }

    fn report(&self, tick: u64) {
        let position = self.controller.position();
        let collisions = self.controller.collisions();
        log::info!(
            "Step {:>5}: pos ({:>7.3}, {:>6.3}) below={} wall={} slope={:>4.1} ahead={} dropping={}",
            tick,
            position.x,
            position.y,
            collisions.below,
            collisions.is_wall,
            collisions.slope_angle,
            collisions.grounded_ahead,
            collisions.falling_through_platform
        );
    }
}

fn load_config() -> Result<(GameConfig, Option<PathBuf>), Box<dyn Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        let path = PathBuf::from(arg);
        let config = GameConfig::load_from_file(&path)?;
        return Ok((config, Some(path)));
    }

    let default_path = Path::new(DEFAULT_CONFIG_PATH);
    if default_path.exists() {
        let config = GameConfig::load_from_file(default_path)?;
        return Ok((config, Some(default_path.to_path_buf())));
    }

    Ok((GameConfig::default(), None))
}

fn main() -> Result<(), Box<dyn Error>> {
    let (config, source) = load_config()?;
    logging::init_with_level(&config.log_level.0);

    match &source {
        Some(path) => log::info!("Loaded configuration from {}", path.display()),
        None => log::info!("No configuration file found, using built-in level"),
    }

    let mut app = PlatformerApp::new(config)?;
    app.run()
}
