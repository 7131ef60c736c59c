//! The `Model` struct and its step loop.

use log::{debug, info, warn};

use mp_agent::{AgentStore, HealthChange};
use mp_core::{AgentId, RandomSource, SimClock, Tick};
use mp_disease::{Disease, TransmissionModel};
use mp_place::PlaceStore;
use mp_schedule::TravelSchedule;

use crate::phase::{self, Phase};
use crate::{PhaseError, ReportSchedule, Reporter, SimError, SimResult, Snapshot};

/// One epidemic simulation run.
///
/// `Model<R, T>` owns all simulation state: the clock, the agents, the
/// places, per-agent schedules, the transmission model and the random
/// source.  Create via [`ModelBuilder`][crate::ModelBuilder].
pub struct Model<R: RandomSource, T: TransmissionModel> {
    pub(crate) clock:         SimClock,
    pub(crate) agents:        AgentStore,
    pub(crate) places:        PlaceStore,
    /// Per-agent schedules, indexed by `AgentId`.
    pub(crate) schedules:     Vec<TravelSchedule>,
    pub(crate) transmission:  T,
    pub(crate) rng:           R,
    pub(crate) report:        ReportSchedule,
    pub(crate) report_places: bool,
}

impl<R: RandomSource, T: TransmissionModel> Model<R, T> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Advance the model by one step.
    ///
    /// On error the step index and any phases before the failing one have
    /// already been committed; the failing phase itself is untouched.
    pub fn step(&mut self, reporter: &mut dyn Reporter) -> SimResult<()> {
        reporter.on_step_start(self.clock.current_step());

        // Agents Diseased now are the only ones that can progress this step.
        let diseased = phase::diseased_agents(&self.agents);

        // ── ① Clock ───────────────────────────────────────────────────────
        self.clock.advance();
        let now = self.clock.current_step();
        let hours = self.clock.hours_per_step();

        // ── ② Relocation ──────────────────────────────────────────────────
        let moves = phase::plan_relocation(&self.agents, &self.places, &self.schedules, now)
            .map_err(|e| step_error(now, Phase::Relocation, e))?;
        phase::commit_relocation(&mut self.agents, &mut self.places, &moves)
            .map_err(|e| step_error(now, Phase::Relocation, e))?;

        // ── ③ Transmission ────────────────────────────────────────────────
        let exposures = phase::plan_transmission(
            &self.transmission,
            &self.agents,
            &self.places,
            hours,
            &mut self.rng,
        )
        .map_err(|e| step_error(now, Phase::Transmission, e))?;
        let infected = phase::commit_transmission(&mut self.agents, &mut self.places, &exposures)
            .map_err(|e| step_error(now, Phase::Transmission, e))?;

        // ── ④ Progression ─────────────────────────────────────────────────
        let changes = phase::plan_progression(
            self.transmission.disease(),
            &self.agents,
            &diseased,
            hours,
            &mut self.rng,
        );
        phase::commit_progression(&mut self.agents, &changes)
            .map_err(|e| step_error(now, Phase::Progression, e))?;

        // ── ⑤ Contamination ───────────────────────────────────────────────
        phase::update_contamination(&mut self.places, hours);

        debug!(
            "{}: {} moved, {infected} infected, {} progressed",
            self.clock,
            moves.len(),
            changes.len()
        );

        // ── ⑥ Report ──────────────────────────────────────────────────────
        if self.report.is_due(now) {
            reporter.on_snapshot(&self.snapshot());
            self.report.mark(now);
        }
        reporter.on_step_end(now);
        Ok(())
    }

    /// Report the current state, run `n` steps, then call `on_run_end`.
    pub fn run(&mut self, n: u64, reporter: &mut dyn Reporter) -> SimResult<()> {
        let start = self.clock.current_step();
        if self.report.is_due(start) {
            reporter.on_snapshot(&self.snapshot());
            self.report.mark(start);
        }
        for _ in 0..n {
            self.step(reporter)?;
        }
        let last = self.snapshot();
        info!("run finished after {n} steps: {last}");
        reporter.on_run_end(&last);
        Ok(())
    }

    /// Aggregate state at the current step.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            step:       self.clock.current_step(),
            time_hours: self.clock.elapsed_hours(),
            date:       self.clock.date(),
            counts:     self.agents.health_counts(),
            places:     self.report_places.then(|| self.places.snapshots(false)),
        }
    }

    /// Infect `k` distinct Susceptible agents chosen uniformly at random.
    /// If fewer than `k` are Susceptible, all of them are infected.
    pub fn infect_initial(&mut self, k: usize) -> SimResult<Vec<AgentId>> {
        let mut pool: Vec<AgentId> = self
            .agents
            .agent_ids()
            .filter(|&a| self.agents.health(a).is_susceptible())
            .collect();
        if k > pool.len() {
            warn!("asked to infect {k} agents but only {} are susceptible", pool.len());
        }
        let k = k.min(pool.len());

        self.rng.shuffle_prefix(&mut pool, k);
        let mut chosen = pool[..k].to_vec();
        chosen.sort_unstable();
        for &a in &chosen {
            self.agents.apply_health(a, HealthChange::Infect)?;
        }
        info!("seeded {} initial infections", chosen.len());
        Ok(chosen)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut SimClock {
        &mut self.clock
    }

    pub fn agents(&self) -> &AgentStore {
        &self.agents
    }

    pub fn agents_mut(&mut self) -> &mut AgentStore {
        &mut self.agents
    }

    pub fn places(&self) -> &PlaceStore {
        &self.places
    }

    pub fn places_mut(&mut self) -> &mut PlaceStore {
        &mut self.places
    }

    pub fn schedule(&self, agent: AgentId) -> Option<&TravelSchedule> {
        self.schedules.get(agent.index())
    }

    /// Replace one agent's schedule.
    pub fn set_schedule(&mut self, agent: AgentId, schedule: TravelSchedule) -> SimResult<()> {
        let slot = self
            .schedules
            .get_mut(agent.index())
            .ok_or(mp_agent::AgentError::UnknownAgent(agent))?;
        *slot = schedule;
        Ok(())
    }

    pub fn transmission(&self) -> &T {
        &self.transmission
    }

    pub fn disease(&self) -> &Disease {
        self.transmission.disease()
    }

    pub fn disease_mut(&mut self) -> &mut Disease {
        self.transmission.disease_mut()
    }

    pub fn report_schedule(&self) -> &ReportSchedule {
        &self.report
    }

    pub fn current_step(&self) -> Tick {
        self.clock.current_step()
    }
}

fn step_error(step: Tick, phase: Phase, source: PhaseError) -> SimError {
    SimError::Step { step, phase, source }
}
