//! CSV schedule loader.
//!
//! # CSV format
//!
//! One row per schedule entry.  All rows for the same agent must share the
//! same `cycle_ticks` value; `0` means a one-off schedule.
//!
//! ```csv
//! agent_id,effective_tick,destination,cycle_ticks
//! 0,0,home,24
//! 0,8,work,24
//! 0,17,home,24
//! 1,10,transport,0
//! 1,12,42,0
//! ```
//!
//! **`destination`** field:
//!
//! | Value       | Meaning                                  |
//! |-------------|------------------------------------------|
//! | `home`      | `Destination::Home` sentinel             |
//! | `work`      | `Destination::Work` sentinel             |
//! | `transport` | `Destination::Transport` sentinel        |
//! | `remote`    | `Destination::Remote` sentinel           |
//! | *u32*       | `Destination::Place(PlaceId(n))`         |
//!
//! Agents absent from the CSV receive a stationary schedule.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;

use mp_core::{PlaceId, Tick};

use crate::{Destination, ScheduleError, ScheduleResult, TravelSchedule};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ScheduleRecord {
    agent_id:       u32,
    effective_tick: u64,
    destination:    String,
    cycle_ticks:    u64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load per-agent schedules from a CSV file.
///
/// Returns a `Vec` of length `agent_count`, indexed by `AgentId`.
pub fn load_schedules_csv(path: &Path, agent_count: usize) -> ScheduleResult<Vec<TravelSchedule>> {
    let file = std::fs::File::open(path)?;
    load_schedules_reader(file, agent_count)
}

/// Like [`load_schedules_csv`] but accepts any `Read` source.
pub fn load_schedules_reader<R: Read>(
    reader: R,
    agent_count: usize,
) -> ScheduleResult<Vec<TravelSchedule>> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut by_agent: HashMap<u32, TravelSchedule> = HashMap::new();
    let mut skipped = 0usize;

    for result in csv_reader.deserialize::<ScheduleRecord>() {
        let row = result.map_err(|e| ScheduleError::Parse(e.to_string()))?;
        if row.agent_id as usize >= agent_count {
            skipped += 1;
            continue;
        }
        let destination = parse_destination(&row.destination)?;
        let schedule = by_agent
            .entry(row.agent_id)
            .or_insert_with(|| TravelSchedule::cyclic(row.cycle_ticks));
        let expected = schedule.cycle_ticks().unwrap_or(0);
        if expected != row.cycle_ticks {
            return Err(ScheduleError::Parse(format!(
                "agent {}: cycle_ticks {} conflicts with earlier value {expected}",
                row.agent_id, row.cycle_ticks
            )));
        }
        schedule.switch_to(destination, Tick(row.effective_tick));
    }

    if skipped > 0 {
        warn!("ignored {skipped} schedule rows for agents outside 0..{agent_count}");
    }
    debug!("loaded schedules for {} of {agent_count} agents", by_agent.len());

    Ok((0..agent_count as u32)
        .map(|i| by_agent.remove(&i).unwrap_or_else(TravelSchedule::stationary))
        .collect())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_destination(s: &str) -> ScheduleResult<Destination> {
    match s.trim() {
        "home"      => Ok(Destination::Home),
        "work"      => Ok(Destination::Work),
        "transport" => Ok(Destination::Transport),
        "remote"    => Ok(Destination::Remote),
        n => n
            .parse::<u32>()
            .map(|id| Destination::Place(PlaceId(id)))
            .map_err(|_| {
                ScheduleError::Parse(format!(
                    "invalid destination {n:?}: expected home, work, transport, remote or a place id"
                ))
            }),
    }
}
