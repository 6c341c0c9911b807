//! Simulation engine — owns the world and drives the tick pipeline.
//!
//! `Simulation` owns the hecs ECS world, validates its configuration up
//! front, processes queued run-control commands at tick boundaries, runs
//! all systems in a fixed order, and produces `SimSnapshot`s. Deterministic:
//! same config and seed, same simulation.

use std::collections::{HashMap, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use outbreak_core::commands::EngineCommand;
use outbreak_core::components::Health;
use outbreak_core::constants::*;
use outbreak_core::enums::{CollisionExclusion, RunPhase, SpeedProfile, SpreadModel};
use outbreak_core::error::SimError;
use outbreak_core::events::HealthEvent;
use outbreak_core::state::{SimSnapshot, StatusReport};
use outbreak_core::types::SimTime;

use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Number of persons, fixed for the whole run.
    pub population_size: usize,
    /// Arena bounds, origin at (0, 0).
    pub arena_width: f64,
    pub arena_height: f64,
    /// Maximum center-to-center distance counted as a collision.
    pub contact_radius: f64,
    /// Time from infection to recovery (time units).
    pub recovery_duration: f64,
    /// Body radius of every person.
    pub body_radius: f64,
    /// Simulated time per tick.
    pub fixed_step: f64,
    /// Reporter sampling cadence (time units).
    pub report_interval: f64,
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    /// Per-tick collision exclusion policy.
    pub exclusion: CollisionExclusion,
    /// Contagion propagation strategy.
    pub spread: SpreadModel,
    /// Initial movement speed profile.
    pub speed_profile: SpeedProfile,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION,
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            contact_radius: DEFAULT_CONTACT_RADIUS,
            recovery_duration: DEFAULT_RECOVERY_DURATION,
            body_radius: DEFAULT_BODY_RADIUS,
            fixed_step: DEFAULT_FIXED_STEP,
            report_interval: DEFAULT_REPORT_INTERVAL,
            seed: DEFAULT_SEED,
            exclusion: CollisionExclusion::default(),
            spread: SpreadModel::default(),
            speed_profile: SpeedProfile::default(),
        }
    }
}

impl SimConfig {
    /// Reject malformed configuration before any state is built.
    fn validate(&self) -> Result<(), SimError> {
        fn reject(reason: &str) -> Result<(), SimError> {
            Err(SimError::InvalidConfig {
                reason: reason.to_string(),
            })
        }

        if self.population_size == 0 {
            return reject("population_size must be positive");
        }
        if self.arena_width <= 0.0 || self.arena_height <= 0.0 {
            return reject("arena dimensions must be positive");
        }
        if self.body_radius <= 0.0 {
            return reject("body_radius must be positive");
        }
        if self.arena_width <= 2.0 * self.body_radius
            || self.arena_height <= 2.0 * self.body_radius
        {
            return reject("arena must be wider than twice the body radius");
        }
        if self.contact_radius <= 0.0 {
            return reject("contact_radius must be positive");
        }
        if self.recovery_duration <= 0.0 {
            return reject("recovery_duration must be positive");
        }
        if self.fixed_step <= 0.0 {
            return reject("fixed_step must be positive");
        }
        if self.report_interval <= 0.0 {
            return reject("report_interval must be positive");
        }
        if let SpreadModel::GroupMixing {
            cell_size,
            interval_ticks,
        } = self.spread
        {
            if cell_size < 2 {
                return reject("group mixing cell_size must be at least 2");
            }
            if interval_ticks == 0 {
                return reject("group mixing interval_ticks must be positive");
            }
        }
        Ok(())
    }
}

/// The simulation engine. Owns the ECS world and all run state.
pub struct Simulation {
    world: World,
    config: SimConfig,
    time: SimTime,
    phase: RunPhase,
    rng: ChaCha8Rng,
    /// Person id -> entity handle, for id-validated operations.
    index: HashMap<u32, Entity>,
    /// Cached C(n,2) pair universe, id-ordered. Computed lazily on the
    /// first detection pass; population membership never changes mid-run.
    pairs: Option<Vec<(Entity, Entity)>>,
    command_queue: VecDeque<EngineCommand>,
    /// Transitions since the last tick, drained into its snapshot.
    events: Vec<HealthEvent>,
    /// Reporter samples, taken every `report_interval` time units.
    history: Vec<StatusReport>,
    next_sample_at: f64,
    /// Whether any sample has seen a non-zero infectious count. Guards the
    /// completion check so an unseeded run never completes instantly.
    infection_observed: bool,
    ticks_since_mix: u64,
}

impl Simulation {
    /// Create a new simulation: validate the config, then spawn the
    /// population at random positions (inset from the walls by the body
    /// radius) with velocities rolled from the speed profile's choice set.
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        config.validate()?;

        let mut world = World::new();
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let index = world_setup::spawn_population(&mut world, &mut rng, &config);

        let mut sim = Self {
            world,
            config,
            time: SimTime::default(),
            phase: RunPhase::Running,
            rng,
            index,
            pairs: None,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            history: Vec::new(),
            next_sample_at: config.report_interval,
            infection_observed: false,
            ticks_since_mix: 0,
        };
        // Baseline sample at t = 0.
        sim.history.push(sim.report());
        Ok(sim)
    }

    /// Mark the given persons as initially infectious. All ids are checked
    /// before any state changes, so an unknown id leaves the run untouched.
    /// Seeding an already non-susceptible person is a silent no-op.
    pub fn seed_infection(&mut self, ids: &[u32]) -> Result<(), SimError> {
        for &id in ids {
            if !self.index.contains_key(&id) {
                return Err(SimError::UnknownPerson { id });
            }
        }
        for &id in ids {
            let entity = self.index[&id];
            if let Ok(mut health) = self.world.get::<&mut Health>(entity) {
                if systems::contagion::infect(
                    &mut health,
                    self.time.elapsed,
                    self.config.recovery_duration,
                ) {
                    self.events.push(HealthEvent::Infected {
                        id,
                        tick: self.time.tick,
                    });
                    log::debug!("seeded infection in person {id}");
                }
            }
        }
        Ok(())
    }

    /// Vaccinate a person. Legal from Susceptible or Recovered; a silent
    /// no-op from Infectious or Vaccinated (matching the source, so repeated
    /// calls stay idempotent). Unknown ids are rejected.
    pub fn vaccinate(&mut self, id: u32) -> Result<(), SimError> {
        let entity = *self
            .index
            .get(&id)
            .ok_or(SimError::UnknownPerson { id })?;
        if let Ok(mut health) = self.world.get::<&mut Health>(entity) {
            if systems::contagion::vaccinate(&mut health) {
                self.events.push(HealthEvent::Vaccinated {
                    id,
                    tick: self.time.tick,
                });
            }
        }
        Ok(())
    }

    /// Queue a run-control command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: EngineCommand) {
        self.command_queue.push_back(command);
    }

    /// Advance the simulation by one fixed step and return the resulting
    /// snapshot. While paused or complete, only commands are processed and
    /// the clock does not advance.
    pub fn tick(&mut self) -> SimSnapshot {
        self.process_commands();

        if self.phase == RunPhase::Running {
            self.run_systems();
            self.time.advance(self.config.fixed_step);
            self.sample_if_due();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(&self.world, &self.time, self.phase, self.report(), events)
    }

    /// Read-only snapshot without advancing the simulation. Transition
    /// events are only delivered by `tick`, so this carries none.
    pub fn snapshot(&self) -> SimSnapshot {
        systems::snapshot::build(&self.world, &self.time, self.phase, self.report(), Vec::new())
    }

    /// Current status counts. Always sums to the population size.
    pub fn report(&self) -> StatusReport {
        systems::report::count(&self.world, &self.time)
    }

    /// All reporter samples taken so far, oldest first.
    pub fn report_history(&self) -> &[StatusReport] {
        &self.history
    }

    /// Whether the run has finished (no infectious entities remained at a
    /// sample after infection had been observed, or the run was halted).
    pub fn is_complete(&self) -> bool {
        self.phase == RunPhase::Complete
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Place a person directly (for tests needing exact geometry).
    #[cfg(test)]
    pub fn place(&mut self, id: u32, x: f64, y: f64, dx: f64, dy: f64) {
        use outbreak_core::types::{Position, Velocity};
        let entity = self.index[&id];
        if let Ok(mut pos) = self.world.get::<&mut Position>(entity) {
            *pos = Position::new(x, y);
        }
        if let Ok(mut vel) = self.world.get::<&mut Velocity>(entity) {
            *vel = Velocity::new(dx, dy);
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single run-control command.
    fn handle_command(&mut self, command: EngineCommand) {
        match command {
            EngineCommand::Pause => {
                if self.phase == RunPhase::Running {
                    self.phase = RunPhase::Paused;
                }
            }
            EngineCommand::Resume => {
                if self.phase == RunPhase::Paused {
                    self.phase = RunPhase::Running;
                }
            }
            EngineCommand::Halt => {
                if self.phase != RunPhase::Complete {
                    log::info!("run halted at tick {}", self.time.tick);
                    self.phase = RunPhase::Complete;
                }
            }
            EngineCommand::SetSpeedProfile { profile } => {
                world_setup::reroll_velocities(&mut self.world, &mut self.rng, profile);
                self.events.push(HealthEvent::SpeedProfileChanged {
                    profile,
                    tick: self.time.tick,
                });
                log::info!("speed profile set to {profile:?} at tick {}", self.time.tick);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Reset transient collision flags.
        systems::collision::clear_flags(&mut self.world);
        // 2. Motion integration.
        systems::movement::run(&mut self.world, self.config.fixed_step);
        // 3. Wall reflection.
        systems::walls::run(
            &mut self.world,
            self.config.arena_width,
            self.config.arena_height,
        );
        // 4. Collision detection + resolution (transmits under Proximity).
        if self.pairs.is_none() {
            self.pairs = Some(systems::collision::enumerate_pairs(&self.world));
        }
        let transmit = matches!(self.config.spread, SpreadModel::Proximity);
        if let Some(pairs) = &self.pairs {
            systems::collision::run(
                &mut self.world,
                pairs,
                self.config.contact_radius,
                self.config.exclusion,
                transmit,
                self.time,
                self.config.recovery_duration,
                &mut self.events,
            );
        }
        // 5. Group mixing, on its own cadence.
        if let SpreadModel::GroupMixing {
            cell_size,
            interval_ticks,
        } = self.config.spread
        {
            self.ticks_since_mix += 1;
            if self.ticks_since_mix >= interval_ticks {
                self.ticks_since_mix = 0;
                systems::mixing::run(
                    &mut self.world,
                    &mut self.rng,
                    cell_size,
                    self.time,
                    self.config.recovery_duration,
                    &mut self.events,
                );
            }
        }
        // 6. Recovery deadline sweep.
        systems::contagion::run_recovery(&mut self.world, self.time, &mut self.events);
    }

    /// Take a reporter sample if its cadence is due, and check completion:
    /// the first zero-infectious sample after a non-zero one ends the run.
    fn sample_if_due(&mut self) {
        if self.time.elapsed + 1e-9 < self.next_sample_at {
            return;
        }
        self.next_sample_at += self.config.report_interval;

        let report = self.report();
        if report.infectious > 0 {
            self.infection_observed = true;
        } else if self.infection_observed {
            self.phase = RunPhase::Complete;
            self.events.push(HealthEvent::RunComplete {
                tick: self.time.tick,
            });
            log::info!(
                "run complete at tick {}: {} recovered, {} never infected",
                self.time.tick,
                report.recovered,
                report.susceptible + report.vaccinated
            );
        }
        self.history.push(report);
    }
}
