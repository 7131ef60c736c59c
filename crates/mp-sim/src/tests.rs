//! Integration tests for mp-sim.

use mp_agent::{AgentStoreBuilder, HealthChange, HealthState, HealthStatus, LocationChange};
use mp_core::{AgentId, FixedRandom, ParameterStore, PlaceId, SimClock, Tick};
use mp_disease::{ContaminationTransmission, Disease};
use mp_place::{PlaceCategory, PlaceStore};
use mp_schedule::{Destination, TravelSchedule};

use crate::{Model, ModelBuilder, Reporter, SimError, Snapshot};

// ── Helpers ───────────────────────────────────────────────────────────────────

type RoomModel = Model<FixedRandom, ContaminationTransmission>;

/// `n` agents sharing one room, the listed agents Diseased, every draw
/// returning `draw`.
fn room_model(n: u32, diseased: &[u32], disease: Disease, draw: f64) -> RoomModel {
    let mut agents = AgentStoreBuilder::new(n as usize).build().unwrap();
    let mut places = PlaceStore::new();
    let room = places.add(PlaceCategory::GENERIC);
    for i in 0..n {
        agents.assign(AgentId(i), LocationChange::Home(room)).unwrap();
    }
    for &i in diseased {
        agents.apply_health(AgentId(i), HealthChange::Infect).unwrap();
    }
    ModelBuilder::new(
        SimClock::hourly(),
        agents,
        places,
        ContaminationTransmission::new(disease),
        FixedRandom(draw),
    )
    .build()
    .unwrap()
}

/// Params for a small, lively mobile population.
fn lively_params(seed: u64) -> ParameterStore {
    let mut p = ParameterStore::new();
    p.set("run.nAgents", "120");
    p.set("run.randomSeed", seed.to_string());
    p.set("disease.simplistic.infectionShedLoad", "0.2");
    p.set("disease.simplistic.recoveryRate", "0.05");
    p.set("disease.simplistic.deathRate", "0.02");
    p.set("disease.simplistic.initialNumberInfected", "6");
    p
}

#[derive(Default)]
struct Log {
    snapshots: Vec<Snapshot>,
    starts:    Vec<Tick>,
    ends:      Vec<Tick>,
    run_ends:  usize,
}

impl Reporter for Log {
    fn on_step_start(&mut self, step: Tick) {
        self.starts.push(step);
    }
    fn on_step_end(&mut self, step: Tick) {
        self.ends.push(step);
    }
    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        self.snapshots.push(snapshot.clone());
    }
    fn on_run_end(&mut self, _final_snapshot: &Snapshot) {
        self.run_ends += 1;
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn places_agents_at_home() {
        let model = room_model(4, &[], Disease::default(), 0.5);
        assert_eq!(model.places().get(PlaceId(0)).unwrap().occupant_count(), 4);
        assert!(model.agents().agent_ids().all(|a| model.agents().current_place(a) == PlaceId(0)));
    }

    #[test]
    fn schedule_count_mismatch_errors() {
        let agents = AgentStoreBuilder::new(3).build().unwrap();
        let result = ModelBuilder::new(
            SimClock::hourly(),
            agents,
            PlaceStore::new(),
            ContaminationTransmission::default(),
            FixedRandom(0.5),
        )
        .schedules(vec![TravelSchedule::stationary(); 2])
        .build();
        assert!(matches!(
            result,
            Err(SimError::AgentCountMismatch { expected: 3, got: 2, .. })
        ));
    }

    #[test]
    fn homeless_agent_rejected() {
        let agents = AgentStoreBuilder::new(1).build().unwrap();
        let result = ModelBuilder::new(
            SimClock::hourly(),
            agents,
            PlaceStore::new(),
            ContaminationTransmission::default(),
            FixedRandom(0.5),
        )
        .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }

    #[test]
    fn zero_report_interval_rejected() {
        let mut agents = AgentStoreBuilder::new(1).build().unwrap();
        let mut places = PlaceStore::new();
        let p = places.add(PlaceCategory::HOME);
        agents.assign(AgentId(0), LocationChange::Home(p)).unwrap();
        let result = ModelBuilder::new(
            SimClock::hourly(),
            agents,
            places,
            ContaminationTransmission::default(),
            FixedRandom(0.5),
        )
        .report_interval(0)
        .build();
        assert!(matches!(result, Err(SimError::Config(_))));
    }
}

// ── Step semantics ────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_tests {
    use super::*;
    use crate::PhaseError;
    use mp_agent::AgentError;
    use mp_core::{CalendarDate, CoreError, TimeStepUnit};

    #[test]
    fn co_located_susceptible_is_infected() {
        let disease = Disease::new(0.0, 0.0, 1.0).unwrap();
        let mut model = room_model(2, &[0], disease, 0.5);
        model.step(&mut Log::default()).unwrap();
        assert_eq!(model.agents().health(AgentId(1)).state, HealthState::Diseased);
        assert_eq!(model.agents().health(AgentId(0)).state, HealthState::Diseased);
        assert_eq!(model.current_step(), Tick(1));
    }

    #[test]
    fn recovery_is_not_death_and_new_cases_wait_a_step() {
        let disease = Disease::new(1.0, 1.0, 1.0).unwrap();
        let mut model = room_model(2, &[0], disease, 0.0);
        model.step(&mut Log::default()).unwrap();
        let a = model.agents().health(AgentId(0));
        assert_eq!(a.state, HealthState::Recovered);
        assert!(a.alive);
        // Infected during the step, so not progressed until the next one.
        assert_eq!(model.agents().health(AgentId(1)).state, HealthState::Diseased);

        model.step(&mut Log::default()).unwrap();
        assert_eq!(model.agents().health(AgentId(1)).state, HealthState::Recovered);
    }

    #[test]
    fn dead_agents_stay_dead() {
        let disease = Disease::new(0.0, 1.0, 1.0).unwrap();
        let mut model = room_model(3, &[0], disease, 0.0);
        let mut log = Log::default();
        model.step(&mut log).unwrap();
        assert!(!model.agents().health(AgentId(0)).alive);
        for _ in 0..5 {
            model.step(&mut log).unwrap();
            assert!(!model.agents().health(AgentId(0)).alive);
        }
        let counts = model.agents().health_counts();
        assert_eq!(counts.dead, 3);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn stationary_agent_never_moves() {
        let mut model = room_model(1, &[], Disease::default(), 0.5);
        let start = model.agents().current_place(AgentId(0));
        for _ in 0..100 {
            model.step(&mut Log::default()).unwrap();
            assert_eq!(model.agents().current_place(AgentId(0)), start);
        }
        assert_eq!(model.current_step(), Tick(100));
    }

    #[test]
    fn contamination_decays_without_exposure() {
        let mut model = room_model(1, &[], Disease::default(), 0.5);
        let places = model.places_mut();
        places.set_clean_every_step(true);
        places.get_mut(PlaceId(0)).unwrap().increase_contamination(1.0);
        let mut last = 1.0;
        for _ in 0..20 {
            model.step(&mut Log::default()).unwrap();
            let c = model.places().get(PlaceId(0)).unwrap().contamination();
            assert!(c < last, "contamination rose from {last} to {c}");
            last = c;
        }
    }

    #[test]
    fn shedding_accumulates_without_cleaning() {
        let disease = Disease::new(0.0, 0.0, 0.25).unwrap();
        let mut model = room_model(1, &[0], disease, 0.99);
        for _ in 0..4 {
            model.step(&mut Log::default()).unwrap();
        }
        assert_eq!(model.places().get(PlaceId(0)).unwrap().contamination(), 1.0);
    }

    #[test]
    fn bad_death_rate_leaves_model_unchanged() {
        let mut model = room_model(1, &[], Disease::new(0.1, 0.2, 0.3).unwrap(), 0.5);
        let err = model.disease_mut().set_death_rate(1.5).unwrap_err();
        assert!(matches!(err, CoreError::InvalidParameter { .. }));
        assert_eq!(model.disease().death_rate(), 0.2);
    }

    #[test]
    fn relocation_follows_schedule() {
        let mut agents = AgentStoreBuilder::new(1).build().unwrap();
        let mut places = PlaceStore::new();
        let home = places.add(PlaceCategory::HOME);
        let work = places.add(PlaceCategory::WORK);
        let a = AgentId(0);
        agents.assign(a, LocationChange::Home(home)).unwrap();
        agents.assign(a, LocationChange::Work(work)).unwrap();
        let mut schedule = TravelSchedule::cyclic(4);
        schedule
            .switch_to(Destination::Home, Tick(0))
            .switch_to(Destination::Work, Tick(2));
        let mut model = ModelBuilder::new(
            SimClock::hourly(),
            agents,
            places,
            ContaminationTransmission::default(),
            FixedRandom(0.99),
        )
        .schedules(vec![schedule])
        .build()
        .unwrap();

        let mut log = Log::default();
        let mut seen = Vec::new();
        for _ in 0..6 {
            model.step(&mut log).unwrap();
            seen.push(model.agents().current_place(a));
            assert_eq!(model.places().total_occupants(), 1);
        }
        // Steps 1..=6 resolve at cycle positions 1, 2, 3, 0, 1, 2.
        assert_eq!(seen, vec![home, work, work, home, home, work]);
        assert!(model.places().get(work).unwrap().contains(a));
        assert!(!model.places().get(home).unwrap().contains(a));
    }

    #[test]
    fn dead_agents_do_not_relocate() {
        let mut agents = AgentStoreBuilder::new(1).build().unwrap();
        let mut places = PlaceStore::new();
        let home = places.add(PlaceCategory::HOME);
        let work = places.add(PlaceCategory::WORK);
        let a = AgentId(0);
        agents.assign(a, LocationChange::Home(home)).unwrap();
        agents.assign(a, LocationChange::Work(work)).unwrap();
        agents.apply_health(a, HealthChange::Infect).unwrap();
        agents.apply_health(a, HealthChange::Die).unwrap();
        let mut schedule = TravelSchedule::once();
        schedule.switch_to(Destination::Work, Tick(1));
        let mut model = ModelBuilder::new(
            SimClock::hourly(),
            agents,
            places,
            ContaminationTransmission::default(),
            FixedRandom(0.0),
        )
        .schedules(vec![schedule])
        .build()
        .unwrap();
        model.step(&mut Log::default()).unwrap();
        assert_eq!(model.agents().current_place(a), home);
    }

    #[test]
    fn unknown_destination_rejects_relocation_phase() {
        let mut model = room_model(2, &[], Disease::default(), 0.5);
        let mut schedule = TravelSchedule::once();
        schedule.switch_to(Destination::Place(PlaceId(9)), Tick(0));
        model.set_schedule(AgentId(1), schedule).unwrap();

        let err = model.step(&mut Log::default()).unwrap_err();
        assert!(matches!(
            err,
            SimError::Step { step: Tick(1), phase: crate::Phase::Relocation, .. }
        ));
        // Nobody moved.
        assert_eq!(model.places().get(PlaceId(0)).unwrap().occupant_count(), 2);
    }

    #[test]
    fn daily_step_uses_linear_rate() {
        // 0.01 per hour over 24 hours: recover when the draw is below 0.24.
        let mut agents = AgentStoreBuilder::new(1).build().unwrap();
        let mut places = PlaceStore::new();
        let room = places.add(PlaceCategory::GENERIC);
        agents.assign(AgentId(0), LocationChange::Home(room)).unwrap();
        agents.apply_health(AgentId(0), HealthChange::Infect).unwrap();
        let clock = SimClock::new(CalendarDate::default(), TimeStepUnit::Day, 1).unwrap();
        let mut model = ModelBuilder::new(
            clock,
            agents,
            places,
            ContaminationTransmission::new(Disease::new(0.01, 0.0, 0.0).unwrap()),
            FixedRandom(0.22),
        )
        .build()
        .unwrap();
        model.step(&mut Log::default()).unwrap();
        assert_eq!(model.agents().health(AgentId(0)).state, HealthState::Recovered);
    }

    #[test]
    fn occupant_without_agent_rejects_transmission_phase() {
        let disease = Disease::new(0.0, 0.0, 1.0).unwrap();
        let mut model = room_model(2, &[0], disease, 0.0);
        model
            .places_mut()
            .relocate(AgentId(99), PlaceId::INVALID, PlaceId(0))
            .unwrap();

        let err = model.step(&mut Log::default()).unwrap_err();
        assert!(matches!(
            err,
            SimError::Step {
                step: Tick(1),
                phase: crate::Phase::Transmission,
                source: PhaseError::Agent(AgentError::UnknownAgent(AgentId(99))),
            }
        ));
        // Neither the susceptible agent nor the room was touched.
        assert_eq!(model.agents().health(AgentId(1)).state, HealthState::Susceptible);
        assert_eq!(model.places().get(PlaceId(0)).unwrap().contamination(), 0.0);
    }

    #[test]
    fn unset_sentinel_rejects_relocation_phase() {
        let mut model = room_model(1, &[], Disease::default(), 0.5);
        let mut schedule = TravelSchedule::once();
        schedule.switch_to(Destination::Remote, Tick(0));
        model.set_schedule(AgentId(0), schedule).unwrap();
        assert!(model.step(&mut Log::default()).is_err());
        assert_eq!(model.agents().current_place(AgentId(0)), PlaceId(0));
    }
}

// ── Reporting ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod report_tests {
    use super::*;
    use crate::ReportSchedule;

    #[test]
    fn schedule_due_logic() {
        let mut r = ReportSchedule::new(3).unwrap();
        assert!(r.is_due(Tick(0)));
        r.mark(Tick(0));
        assert!(!r.is_due(Tick(2)));
        assert!(r.is_due(Tick(3)));
        assert!(ReportSchedule::new(0).is_none());
    }

    #[test]
    fn run_reports_initial_state_then_every_interval() {
        let mut agents = AgentStoreBuilder::new(2).build().unwrap();
        let mut places = PlaceStore::new();
        let p = places.add(PlaceCategory::HOME);
        for a in [AgentId(0), AgentId(1)] {
            agents.assign(a, LocationChange::Home(p)).unwrap();
        }
        let mut model = ModelBuilder::new(
            SimClock::hourly(),
            agents,
            places,
            ContaminationTransmission::default(),
            FixedRandom(0.5),
        )
        .report_interval(3)
        .build()
        .unwrap();

        let mut log = Log::default();
        model.run(7, &mut log).unwrap();
        let steps: Vec<Tick> = log.snapshots.iter().map(|s| s.step).collect();
        assert_eq!(steps, vec![Tick(0), Tick(3), Tick(6)]);
        assert_eq!(log.starts.len(), 7);
        assert_eq!(log.ends.last(), Some(&Tick(7)));
        assert_eq!(log.run_ends, 1);
        assert_eq!(log.snapshots[1].time_hours, 3.0);
        assert!(log.snapshots[0].places.is_none());
    }

    #[test]
    fn place_reporting_optional() {
        let mut agents = AgentStoreBuilder::new(1).build().unwrap();
        let mut places = PlaceStore::new();
        let p = places.add(PlaceCategory::HOME);
        agents.assign(AgentId(0), LocationChange::Home(p)).unwrap();
        let model = ModelBuilder::new(
            SimClock::hourly(),
            agents,
            places,
            ContaminationTransmission::default(),
            FixedRandom(0.5),
        )
        .report_places(true)
        .build()
        .unwrap();
        let snap = model.snapshot();
        let places = snap.places.unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].occupant_count, 1);
    }
}

// ── Initial infections ────────────────────────────────────────────────────────

#[cfg(test)]
mod seeding_tests {
    use super::*;
    use mp_core::SeededRandom;

    fn seeded_model(n: u32, seed: u64) -> Model<SeededRandom, ContaminationTransmission> {
        let mut agents = AgentStoreBuilder::new(n as usize).build().unwrap();
        let mut places = PlaceStore::new();
        let p = places.add(PlaceCategory::HOME);
        for i in 0..n {
            agents.assign(AgentId(i), LocationChange::Home(p)).unwrap();
        }
        ModelBuilder::new(
            SimClock::hourly(),
            agents,
            places,
            ContaminationTransmission::default(),
            SeededRandom::new(seed),
        )
        .build()
        .unwrap()
    }

    #[test]
    fn infects_k_distinct_agents() {
        let mut model = seeded_model(50, 3);
        let chosen = model.infect_initial(10).unwrap();
        assert_eq!(chosen.len(), 10);
        assert!(chosen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(model.agents().health_counts().diseased, 10);
    }

    #[test]
    fn clamps_to_available_susceptibles() {
        let mut model = seeded_model(4, 3);
        let chosen = model.infect_initial(10).unwrap();
        assert_eq!(chosen.len(), 4);
        assert_eq!(model.infect_initial(1).unwrap(), Vec::<AgentId>::new());
    }

    #[test]
    fn same_seed_same_choice() {
        let a = seeded_model(100, 11).infect_initial(5).unwrap();
        let b = seeded_model(100, 11).infect_initial(5).unwrap();
        assert_eq!(a, b);
    }
}

// ── Selector ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod factory_tests {
    use super::*;
    use crate::{ModelFactorySelector, NoopReporter, PopulationLayout};
    use mp_core::{SeededRandom, TransportMode};

    #[test]
    fn mobile_layout_sizes() {
        // A zero draw leaves the seat order unshuffled.
        let (agents, places) = PopulationLayout::Mobile.build(31, 0, &mut FixedRandom(0.0)).unwrap();
        // 11 homes, 4 workplaces, 2 buses, 1 remote destination.
        assert_eq!(places.len(), 11 + 4 + 2 + 1);
        assert_eq!(agents.home(AgentId(30)), PlaceId(10));
        assert_eq!(agents.work(AgentId(30)), PlaceId(11 + 3));
        assert_eq!(agents.transport(AgentId(30)), PlaceId(11 + 4 + 1));
        assert_eq!(agents.remote(AgentId(0)), PlaceId(17));
        assert_eq!(agents.transport_mode(AgentId(0)), TransportMode::Bus);
        assert_eq!(places.get(PlaceId(17)).unwrap().category(), PlaceCategory::REMOTE);
    }

    #[test]
    fn household_members_work_apart() {
        let layout = |seed| PopulationLayout::Mobile.build(300, 0, &mut SeededRandom::new(seed)).unwrap();
        let (agents, places) = layout(2);
        let work_of = |i: u32| agents.work(AgentId(i));

        let split_homes = (0..100).filter(|h| work_of(3 * h) != work_of(3 * h + 1)).count();
        assert!(split_homes > 50, "only {split_homes} of 100 households work apart");

        // Every workplace still seats exactly ten.
        let mut seats = vec![0usize; places.len()];
        for a in agents.agent_ids() {
            seats[agents.work(a).index()] += 1;
            assert_eq!(places.get(agents.work(a)).unwrap().category(), PlaceCategory::WORK);
        }
        assert!(seats.iter().all(|&n| n == 0 || n == 10));

        // Same seed, same seating.
        let (again, _) = layout(2);
        assert!(agents.agent_ids().all(|a| agents.work(a) == again.work(a)));
        assert!(agents.agent_ids().all(|a| agents.transport(a) == again.transport(a)));
    }

    #[test]
    fn one_place_layout() {
        let (agents, places) = PopulationLayout::OnePlace.build(5, 100, &mut FixedRandom(0.5)).unwrap();
        assert_eq!(places.len(), 1);
        assert!(agents.agent_ids().all(|a| agents.work(a) == PlaceId(0)));
        assert_eq!(agents.external_id(AgentId(4)), 104);
    }

    #[test]
    fn unknown_names_rejected() {
        let mut p = ParameterStore::new();
        p.set("model.type", "flying");
        assert!(matches!(ModelFactorySelector::select(&p), Err(SimError::Config(_))));

        let mut p = ParameterStore::new();
        p.set("disease.model", "miasma");
        assert!(matches!(ModelFactorySelector::select(&p), Err(SimError::Config(_))));

        let mut p = ParameterStore::new();
        p.set("schedule.type", "teleport");
        assert!(matches!(ModelFactorySelector::select(&p), Err(SimError::Schedule(_))));
    }

    #[test]
    fn selects_contact_model() {
        let mut p = ParameterStore::new();
        p.set("run.nAgents", "30");
        p.set("disease.model", "contact");
        let sim = ModelFactorySelector::select(&p).unwrap();
        assert_eq!(sim.transmission_name(), "contact");
        assert_eq!(sim.report().counts.diseased, 1);
    }

    #[test]
    fn mobile_agents_commute() {
        let mut p = ParameterStore::new();
        p.set("run.nAgents", "30");
        p.set("disease.simplistic.initialNumberInfected", "0");
        let mut sim = ModelFactorySelector::select(&p).unwrap();
        // 10 homes (0..10), 3 workplaces (10..13), 1 bus (13), remote (14).
        for _ in 0..7 {
            sim.step(&mut NoopReporter).unwrap();
        }
        assert_eq!(sim.agents().current_place(AgentId(0)), PlaceId(13));
        sim.step(&mut NoopReporter).unwrap();
        let agents = sim.agents();
        for a in [AgentId(0), AgentId(29)] {
            let work = agents.work(a);
            assert!((10..13).contains(&work.0));
            assert_eq!(agents.current_place(a), work);
        }
    }

    #[test]
    fn schedule_file_replaces_preset() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schedules.csv");
        std::fs::write(
            &path,
            "agent_id,effective_tick,destination,cycle_ticks\n0,0,home,4\n0,2,work,4\n",
        )
        .unwrap();

        let mut p = ParameterStore::new();
        p.set("run.nAgents", "3");
        p.set("disease.simplistic.initialNumberInfected", "0");
        p.set("schedule.file", path.display().to_string());
        let mut sim = ModelFactorySelector::select(&p).unwrap();
        // One home (0), one workplace (1), one bus (2), remote (3).
        sim.step(&mut NoopReporter).unwrap();
        sim.step(&mut NoopReporter).unwrap();
        assert_eq!(sim.agents().current_place(AgentId(0)), PlaceId(1));
        // Agents without rows stay home instead of following the preset.
        for _ in 0..6 {
            sim.step(&mut NoopReporter).unwrap();
        }
        assert_eq!(sim.agents().current_place(AgentId(1)), PlaceId(0));
        assert_eq!(sim.agents().current_place(AgentId(2)), PlaceId(0));

        p.set("schedule.file", dir.path().join("missing.csv").display().to_string());
        assert!(matches!(ModelFactorySelector::select(&p), Err(SimError::Schedule(_))));
    }

    #[test]
    fn occupancy_equals_population_every_step() {
        let mut sim = ModelFactorySelector::select(&lively_params(1)).unwrap();
        for _ in 0..50 {
            sim.step(&mut NoopReporter).unwrap();
            assert_eq!(sim.places().total_occupants(), 120);
        }
    }

    #[test]
    fn seeded_runs_replay_exactly() {
        type AgentTrace = Vec<(Vec<HealthStatus>, Vec<PlaceId>)>;
        let run = |seed| -> (Vec<Snapshot>, AgentTrace) {
            let mut sim = ModelFactorySelector::select(&lively_params(seed)).unwrap();
            let mut log = Log::default();
            let mut trace = Vec::new();
            for _ in 0..72 {
                sim.step(&mut log).unwrap();
                let agents = sim.agents();
                let places = agents.agent_ids().map(|a| agents.current_place(a)).collect();
                trace.push((agents.health_slice().to_vec(), places));
            }
            (log.snapshots, trace)
        };
        let (snaps_a, trace_a) = run(9);
        let (snaps_b, trace_b) = run(9);
        assert_eq!(snaps_a.len(), 72);
        assert_eq!(snaps_a, snaps_b);
        for (step, (a, b)) in trace_a.iter().zip(&trace_b).enumerate() {
            assert_eq!(a.0, b.0, "health diverged at step {}", step + 1);
            assert_eq!(a.1, b.1, "locations diverged at step {}", step + 1);
        }
        // The epidemic actually did something.
        assert!(snaps_a.last().map(|s| s.counts.susceptible).unwrap_or(120) < 120 - 6);
    }

    #[test]
    fn death_is_permanent_across_run() {
        let mut sim = ModelFactorySelector::select(&lively_params(4)).unwrap();
        let mut dead: Vec<bool> = vec![false; 120];
        for _ in 0..72 {
            sim.step(&mut NoopReporter).unwrap();
            for (i, status) in sim.agents().health_slice().iter().enumerate() {
                if dead[i] {
                    assert!(!status.alive, "agent {i} came back to life");
                    assert_eq!(status.state, HealthState::Diseased);
                }
                dead[i] = !status.alive;
            }
        }
    }
}

// ── Parallel transmission ─────────────────────────────────────────────────────

#[cfg(test)]
#[cfg(feature = "parallel")]
mod parallel_tests {
    use super::*;
    use crate::{ModelFactorySelector, NoopReporter, phase};
    use mp_core::{RandomSource, SeededRandom};
    use mp_disease::{ContactTransmission, expose_place};

    #[test]
    fn pool_matches_sequential_place_loop() {
        let mut sim = ModelFactorySelector::select(&lively_params(3)).unwrap();
        for _ in 0..30 {
            sim.step(&mut NoopReporter).unwrap();
        }
        let agents = sim.agents();
        let places = sim.places();
        let health = agents.health_slice();
        let model = ContactTransmission::new(Disease::new(0.0, 0.0, 0.2).unwrap());

        let pooled =
            phase::plan_transmission(&model, agents, places, 1.0, &mut SeededRandom::new(17))
                .unwrap();

        let mut rng = SeededRandom::new(17);
        let mut sequential = Vec::new();
        for place in places.iter() {
            if !place.occupants().iter().any(|a| health[a.index()].is_infectious()) {
                continue;
            }
            let mut place_rng = rng.split(place.id().0 as u64);
            if let Some(e) = expose_place(&model, place, health, 1.0, &mut place_rng).unwrap() {
                sequential.push(e);
            }
        }

        assert!(sequential.len() > 1, "too few infectious places to compare");
        assert_eq!(pooled, sequential);
    }
}
