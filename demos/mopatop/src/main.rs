//! mopatop — run one epidemic simulation from a parameter file.
//!
//! ```text
//! mopatop [PARAMETER_FILE]
//! ```
//!
//! Without an argument the built-in defaults are used: 600 agents commuting
//! between homes, workplaces and buses, one initial infection, one step.
//! The health-state summary is written to `<output.directory>/<outputFile>.csv`
//! and the parameters actually used to `<output.directory>/RunParameters`.

use std::fs::{self, File};
use std::io::BufWriter;
use std::str::FromStr;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use log::{LevelFilter, error, info};
use log4rs::append::console::ConsoleAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Config;

use mp_core::{ParameterStore, SimConfig};
use mp_output::{CsvWriter, SummaryReporter};
use mp_sim::ModelFactorySelector;

const LOG_PATTERN: &str = "{d(%Y-%m-%dT%H:%M:%SZ)} {h({l})} {t} - {m}{n}";

// ── Logging ───────────────────────────────────────────────────────────────────

fn init_logging(level: &str) -> Result<()> {
    let level = LevelFilter::from_str(level)
        .map_err(|_| anyhow!("log.level {level:?} is not a log level"))?;
    let stdout = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
        .build();
    let config = Config::builder()
        .appender(Appender::builder().build("stdout", Box::new(stdout)))
        .build(Root::builder().appender("stdout").build(level))?;
    log4rs::init_config(config)?;
    Ok(())
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let mut params = ParameterStore::new();
    if let Some(path) = std::env::args().nth(1) {
        params
            .read_file(&path)
            .with_context(|| format!("reading parameter file {path}"))?;
    }
    init_logging(params.get_str("log.level")?)?;

    let config = SimConfig::from_parameters(&params)?;
    info!(
        "{}: {} agents, {} steps of {} {}",
        config.model_name, config.n_agents, config.n_steps, config.delta, config.unit
    );

    #[cfg(feature = "parallel")]
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.n_threads)
        .build_global()?;

    let mut sim = ModelFactorySelector::select(&params)?;
    info!("transmission model: {}", sim.transmission_name());

    // 1. Output files.
    fs::create_dir_all(&config.output_directory).with_context(|| {
        format!("creating output directory {}", config.output_directory.display())
    })?;
    let run_params = config.output_directory.join("RunParameters");
    params.write_to(BufWriter::new(File::create(&run_params)?))?;

    let writer = CsvWriter::new(&config.output_directory, &config.output_file)?;
    let mut reporter = SummaryReporter::new(writer);

    // 2. Run.
    let t0 = Instant::now();
    sim.run(config.n_steps, &mut reporter)?;
    let elapsed = t0.elapsed();

    if let Some(e) = reporter.take_error() {
        error!("output error: {e}");
    }

    // 3. Summary.
    let last = sim.report();
    info!("simulation complete in {:.3} s at {}", elapsed.as_secs_f64(), sim.clock());
    info!(
        "susceptible {}, diseased {}, immune {}, recovered {}, dead {}",
        last.counts.susceptible,
        last.counts.diseased,
        last.counts.immune,
        last.counts.recovered,
        last.counts.dead
    );
    info!(
        "{} summary rows written to {}",
        reporter.rows_written(),
        config.output_directory.join(format!("{}.csv", config.output_file)).display()
    );
    Ok(())
}
