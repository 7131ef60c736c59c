//! Configuration-driven model construction.
//!
//! [`ModelFactorySelector::select`] reads the parameter store, picks the
//! population layout, transmission model and random source, and returns the
//! assembled model behind the [`Simulation`] trait.  Nothing outside this
//! module needs to know which concrete `Model<R, T>` was chosen.

use std::path::PathBuf;
use std::str::FromStr;

use log::info;

use mp_agent::{AgentStore, AgentStoreBuilder, LocationChange};
use mp_core::{
    AgentId, EntropyRandom, ParameterStore, RandomSource, SeededRandom, SimClock, SimConfig, Tick,
    TransportMode,
};
use mp_disease::{ContactTransmission, ContaminationTransmission, Disease, TransmissionModel};
use mp_place::{PlaceCategory, PlaceStore};
use mp_schedule::{ScheduleKind, load_schedules_csv};

use crate::{Model, ModelBuilder, Reporter, SimError, SimResult, Snapshot};

// ── Simulation ────────────────────────────────────────────────────────────────

/// Object-safe view of a model, whatever its random source and transmission
/// model.
pub trait Simulation {
    fn step(&mut self, reporter: &mut dyn Reporter) -> SimResult<()>;

    fn run(&mut self, n: u64, reporter: &mut dyn Reporter) -> SimResult<()>;

    /// Aggregate state at the current step.
    fn report(&self) -> Snapshot;

    fn clock(&self) -> &SimClock;

    fn agents(&self) -> &AgentStore;

    fn places(&self) -> &PlaceStore;

    fn infect_initial(&mut self, k: usize) -> SimResult<Vec<AgentId>>;

    /// `disease.model` name of the transmission model in use.
    fn transmission_name(&self) -> &'static str;
}

impl<R, T> Simulation for Model<R, T>
where
    R: RandomSource,
    T: TransmissionModel,
{
    fn step(&mut self, reporter: &mut dyn Reporter) -> SimResult<()> {
        Model::step(self, reporter)
    }

    fn run(&mut self, n: u64, reporter: &mut dyn Reporter) -> SimResult<()> {
        Model::run(self, n, reporter)
    }

    fn report(&self) -> Snapshot {
        self.snapshot()
    }

    fn clock(&self) -> &SimClock {
        Model::clock(self)
    }

    fn agents(&self) -> &AgentStore {
        Model::agents(self)
    }

    fn places(&self) -> &PlaceStore {
        Model::places(self)
    }

    fn infect_initial(&mut self, k: usize) -> SimResult<Vec<AgentId>> {
        Model::infect_initial(self, k)
    }

    fn transmission_name(&self) -> &'static str {
        self.transmission.name()
    }
}

// ── PopulationLayout ──────────────────────────────────────────────────────────

const AGENTS_PER_HOME:      usize = 3;
const AGENTS_PER_WORKPLACE: usize = 10;
const AGENTS_PER_BUS:       usize = 30;

/// How agents and places are generated (`model.type`).
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum PopulationLayout {
    /// One place serving as everyone's home, work, vehicle and remote
    /// destination (`simpleOnePlace`).
    OnePlace,
    /// Homes of 3, workplaces of 10, buses of 30, and one shared remote
    /// destination (`simpleMobile`).  Homes are filled in ID order; work and
    /// bus seats follow a shuffled order, so household members usually work
    /// apart while colleagues tend to share a bus.
    Mobile,
}

impl PopulationLayout {
    pub fn as_str(self) -> &'static str {
        match self {
            PopulationLayout::OnePlace => "simpleOnePlace",
            PopulationLayout::Mobile   => "simpleMobile",
        }
    }

    /// Generate `n` Susceptible agents and the places they refer to.  The
    /// mobile layout draws its seat shuffle from `rng`.
    pub fn build<R: RandomSource>(
        self,
        n:       usize,
        id_base: u64,
        rng:     &mut R,
    ) -> SimResult<(AgentStore, PlaceStore)> {
        let mut agents = AgentStoreBuilder::new(n).id_base(id_base).build()?;
        let places = match self {
            PopulationLayout::OnePlace => {
                let mut places = PlaceStore::with_capacity(1);
                let p = places.add(PlaceCategory::GENERIC);
                for a in agents.agent_ids().collect::<Vec<_>>() {
                    agents.assign(a, LocationChange::Home(p))?;
                    agents.assign(a, LocationChange::Work(p))?;
                    agents.assign(a, LocationChange::Transport(p))?;
                    agents.assign(a, LocationChange::Remote(p))?;
                }
                places
            }
            PopulationLayout::Mobile => {
                let n_homes = n.div_ceil(AGENTS_PER_HOME).max(1);
                let n_work = n.div_ceil(AGENTS_PER_WORKPLACE).max(1);
                let n_bus = n.div_ceil(AGENTS_PER_BUS).max(1);

                let mut places = PlaceStore::with_capacity(n_homes + n_work + n_bus + 1);
                let homes: Vec<_> = (0..n_homes).map(|_| places.add(PlaceCategory::HOME)).collect();
                let work: Vec<_> = (0..n_work).map(|_| places.add(PlaceCategory::WORK)).collect();
                let buses: Vec<_> = (0..n_bus).map(|_| places.add(PlaceCategory::TRANSPORT)).collect();
                let remote = places.add(PlaceCategory::REMOTE);

                let mut order: Vec<AgentId> = agents.agent_ids().collect();
                for (i, &a) in order.iter().enumerate() {
                    agents.assign(a, LocationChange::Home(homes[i / AGENTS_PER_HOME]))?;
                    agents.assign(a, LocationChange::Remote(remote))?;
                    agents.assign(a, LocationChange::Mode(TransportMode::Bus))?;
                }
                rng.shuffle_prefix(&mut order, n);
                for (seat, &a) in order.iter().enumerate() {
                    agents.assign(a, LocationChange::Work(work[seat / AGENTS_PER_WORKPLACE]))?;
                    agents.assign(a, LocationChange::Transport(buses[seat / AGENTS_PER_BUS]))?;
                }
                places
            }
        };
        Ok((agents, places))
    }
}

impl FromStr for PopulationLayout {
    type Err = SimError;

    fn from_str(s: &str) -> SimResult<Self> {
        match s.trim() {
            "simpleOnePlace" => Ok(PopulationLayout::OnePlace),
            "simpleMobile"   => Ok(PopulationLayout::Mobile),
            other => Err(SimError::Config(format!(
                "unknown model.type {other:?}: expected simpleOnePlace or simpleMobile"
            ))),
        }
    }
}

// ── ModelFactorySelector ──────────────────────────────────────────────────────

/// Everything `select` reads before choosing the concrete model type.
struct Setup {
    config:        SimConfig,
    layout:        PopulationLayout,
    schedule:      ScheduleKind,
    schedule_file: Option<PathBuf>,
    clean:         bool,
    decrement:     f64,
}

pub struct ModelFactorySelector;

impl ModelFactorySelector {
    /// Build the model described by `params`:
    ///
    /// | Parameter         | Values                                   |
    /// |-------------------|------------------------------------------|
    /// | `model.type`      | `simpleOnePlace`, `simpleMobile`         |
    /// | `disease.model`   | `simplistic`, `contact`                  |
    /// | `run.reproducible`| `true` → seeded, `false` → OS entropy    |
    /// | `schedule.file`   | CSV schedules replacing `schedule.type`  |
    ///
    /// The returned model has its initial infections already seeded.
    pub fn select(params: &ParameterStore) -> SimResult<Box<dyn Simulation>> {
        let setup = Setup {
            config:        SimConfig::from_parameters(params)?,
            layout:        params.get_str("model.type")?.parse()?,
            schedule:      params.get_str("schedule.type")?.parse()?,
            schedule_file: Some(params.get_str("schedule.file")?.trim())
                .filter(|f| !f.is_empty())
                .map(PathBuf::from),
            clean:         params.get_bool("places.cleanContamination")?,
            decrement:     params.get("places.disease.simplistic.fractionalDecrement")?,
        };
        let disease = Disease::from_parameters(params)?;
        let seed = setup.config.seed;
        let reproducible = setup.config.reproducible;

        match params.get_str("disease.model")?.trim() {
            "simplistic" => {
                let t = ContaminationTransmission::new(disease);
                if reproducible {
                    assemble(setup, t, SeededRandom::new(seed))
                } else {
                    assemble(setup, t, EntropyRandom::new())
                }
            }
            "contact" => {
                let t = ContactTransmission::new(disease);
                if reproducible {
                    assemble(setup, t, SeededRandom::new(seed))
                } else {
                    assemble(setup, t, EntropyRandom::new())
                }
            }
            other => Err(SimError::Config(format!(
                "unknown disease.model {other:?}: expected simplistic or contact"
            ))),
        }
    }
}

fn assemble<R, T>(setup: Setup, transmission: T, mut rng: R) -> SimResult<Box<dyn Simulation>>
where
    R: RandomSource + 'static,
    T: TransmissionModel + 'static,
{
    let Setup { config, layout, schedule, schedule_file, clean, decrement } = setup;
    let clock = config.make_clock()?;

    let (agents, mut places) = layout.build(config.n_agents, config.id_base, &mut rng)?;
    places.set_clean_every_step(clean);
    places.set_fractional_decrement(decrement)?;

    let schedules = match &schedule_file {
        Some(path) => {
            info!("loading schedules from {}", path.display());
            load_schedules_csv(path, config.n_agents)?
        }
        None => (0..config.n_agents)
            .map(|_| schedule.build(&clock, Tick::ZERO))
            .collect(),
    };

    info!(
        "selected {} layout with {} schedules for {} agents",
        layout.as_str(),
        schedule_file.as_ref().map_or_else(|| schedule.to_string(), |p| p.display().to_string()),
        config.n_agents
    );

    let mut model = ModelBuilder::new(clock, agents, places, transmission, rng)
        .schedules(schedules)
        .report_interval(config.report_interval)
        .report_places(config.report_places)
        .build()?;
    model.infect_initial(config.initial_infected)?;
    Ok(Box::new(model))
}
