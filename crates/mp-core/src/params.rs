//! Named, textual run parameters with built-in defaults.
//!
//! Every known name has a default before any override is applied.  Values
//! are stored as text and converted at the point of use with
//! [`ParameterStore::get`], so a parameter file can carry any value that the
//! consuming type knows how to parse.
//!
//! Parameter files are plain text, one `name = value` per line.  Blank lines,
//! lines starting with `#`, and lines without `=` are ignored.

use std::collections::BTreeMap;
use std::fmt;
use std::io::{BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{info, warn};

use crate::{CalendarDate, CoreError, CoreResult, SimClock, TimeStepUnit};

/// Name/default pairs for every parameter the engine understands.
const DEFAULTS: &[(&str, &str)] = &[
    ("model.name",                                   "Mopatop"),
    ("model.type",                                   "simpleMobile"),
    ("disease.model",                                "simplistic"),
    ("run.nSteps",                                   "1"),
    ("run.nAgents",                                  "600"),
    ("run.nThreads",                                 "1"),
    ("run.randomSeed",                               "0"),
    ("run.reproducible",                             "true"),
    ("run.reportInterval",                           "1"),
    ("run.reportPlaces",                             "false"),
    ("timeStep.units",                               "hours"),
    ("timeStep.dt",                                  "1"),
    ("timeStep.startDate",                           "2020-01-01 00:00:00"),
    ("agent.idBaseValue",                            "0"),
    ("disease.simplistic.recoveryRate",              "0.0007"),
    ("disease.simplistic.deathRate",                 "0.0007"),
    ("disease.simplistic.infectionShedLoad",         "0.001"),
    ("disease.simplistic.initialNumberInfected",     "1"),
    ("places.disease.simplistic.fractionalDecrement", "1"),
    ("places.cleanContamination",                    "false"),
    ("schedule.type",                                "mobile"),
    ("schedule.file",                                ""),
    ("outputFile",                                   "diseaseSummary"),
    ("output.directory",                             "./output"),
    ("log.level",                                    "info"),
];

// ── ParameterStore ────────────────────────────────────────────────────────────

/// Mapping from dotted parameter name to textual value.
#[derive(Clone, Debug)]
pub struct ParameterStore {
    values: BTreeMap<String, String>,
    /// File the overrides were last read from, if any.
    source: Option<PathBuf>,
}

impl ParameterStore {
    /// A store holding only the built-in defaults.
    pub fn new() -> Self {
        let values = DEFAULTS
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Self { values, source: None }
    }

    /// `true` if `name` is one of the built-in parameter names.
    pub fn is_known(name: &str) -> bool {
        DEFAULTS.iter().any(|&(k, _)| k == name)
    }

    /// Raw textual value of `name`.
    pub fn get_str(&self, name: &str) -> CoreResult<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| CoreError::UnknownParameter(name.to_owned()))
    }

    /// Value of `name` converted with `FromStr`.
    pub fn get<T>(&self, name: &str) -> CoreResult<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self.get_str(name)?;
        raw.trim()
            .parse::<T>()
            .map_err(|e| CoreError::Parse(format!("parameter `{name}` = {raw:?}: {e}")))
    }

    /// Boolean value of `name`.  Accepts `true/false`, `yes/no`, `on/off` and
    /// `1/0`, case-insensitively.
    pub fn get_bool(&self, name: &str) -> CoreResult<bool> {
        let raw = self.get_str(name)?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "yes" | "on" | "1"  => Ok(true),
            "false" | "no" | "off" | "0" => Ok(false),
            _ => Err(CoreError::Parse(format!("parameter `{name}` = {raw:?} is not a boolean"))),
        }
    }

    /// Override `name`.  Names without a built-in default are accepted but
    /// logged, since nothing in the engine will read them.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let name = name.trim();
        if !Self::is_known(name) {
            warn!("parameter `{name}` has no default and will be ignored by the engine");
        }
        self.values.insert(name.to_owned(), value.into().trim().to_owned());
    }

    /// Apply every `name = value` line in the file at `path`.
    pub fn read_file(&mut self, path: impl AsRef<Path>) -> CoreResult<()> {
        let path = path.as_ref();
        info!("reading parameters from {}", path.display());
        let file = std::fs::File::open(path)?;
        self.read_from(file)?;
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    /// Apply every `name = value` line from `reader`.  Returns the number of
    /// values set.
    pub fn read_from<R: Read>(&mut self, reader: R) -> CoreResult<usize> {
        let mut count = 0;
        for line in BufReader::new(reader).lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let Some((name, value)) = trimmed.split_once('=') else {
                continue;
            };
            self.set(name, value);
            count += 1;
        }
        Ok(count)
    }

    /// Write all parameters as `name = value` lines, readable by
    /// [`read_from`](Self::read_from).
    pub fn write_to<W: Write>(&self, mut writer: W) -> CoreResult<()> {
        if let Some(src) = &self.source {
            writeln!(writer, "# parameter file: {}", src.display())?;
        }
        for (name, value) in &self.values {
            writeln!(writer, "{name:<50} = {value}")?;
        }
        Ok(())
    }

    /// File the overrides were read from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// All `(name, value)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Run-level settings gathered from a [`ParameterStore`].
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    pub model_name:       String,
    pub n_steps:          u64,
    pub n_agents:         usize,
    pub n_threads:        usize,
    pub seed:             u64,
    pub reproducible:     bool,
    /// Report every N steps.  Always > 0.
    pub report_interval:  u64,
    pub report_places:    bool,
    pub unit:             TimeStepUnit,
    pub delta:            u32,
    pub start:            CalendarDate,
    pub id_base:          u64,
    pub initial_infected: usize,
    pub output_file:      String,
    pub output_directory: PathBuf,
}

impl SimConfig {
    pub fn from_parameters(params: &ParameterStore) -> CoreResult<Self> {
        let report_interval: u64 = params.get("run.reportInterval")?;
        if report_interval == 0 {
            return Err(CoreError::InvalidParameter { name: "run.reportInterval", value: 0.0 });
        }
        let delta: u32 = params.get("timeStep.dt")?;
        if delta == 0 {
            return Err(CoreError::InvalidParameter { name: "timeStep.dt", value: 0.0 });
        }
        Ok(Self {
            model_name:       params.get_str("model.name")?.to_owned(),
            n_steps:          params.get("run.nSteps")?,
            n_agents:         params.get("run.nAgents")?,
            n_threads:        params.get::<usize>("run.nThreads")?.max(1),
            seed:             params.get("run.randomSeed")?,
            reproducible:     params.get_bool("run.reproducible")?,
            report_interval,
            report_places:    params.get_bool("run.reportPlaces")?,
            unit:             params.get("timeStep.units")?,
            delta,
            start:            params.get("timeStep.startDate")?,
            id_base:          params.get("agent.idBaseValue")?,
            initial_infected: params.get("disease.simplistic.initialNumberInfected")?,
            output_file:      params.get_str("outputFile")?.to_owned(),
            output_directory: PathBuf::from(params.get_str("output.directory")?),
        })
    }

    /// A clock at step 0 positioned at the configured start date.
    pub fn make_clock(&self) -> CoreResult<SimClock> {
        SimClock::new(self.start, self.unit, self.delta)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            model_name:       "Mopatop".to_owned(),
            n_steps:          1,
            n_agents:         600,
            n_threads:        1,
            seed:             0,
            reproducible:     true,
            report_interval:  1,
            report_places:    false,
            unit:             TimeStepUnit::Hour,
            delta:            1,
            start:            CalendarDate::default(),
            id_base:          0,
            initial_infected: 1,
            output_file:      "diseaseSummary".to_owned(),
            output_directory: PathBuf::from("./output"),
        }
    }
}
