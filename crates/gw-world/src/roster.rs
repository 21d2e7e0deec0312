//! Agent roster loading.
//!
//! # CSV format
//!
//! One row per agent.  Rows may come in any order, but the ids must cover
//! `0..n` exactly once each.
//!
//! ```csv
//! agent_id,start_x,start_y,target_x,target_y,speed
//! 0,0,0,29,29,1
//! 1,0,29,29,0,1
//! 2,29,0,0,29,2
//! ```
//!
//! Bounds are not checked here; `SimConfig::validate` does that once the
//! roster is placed in a config.

use std::collections::{BTreeMap, HashSet};
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use gw_core::{AgentSpec, GridPos, SimRng};

use crate::{WorldError, WorldResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct RosterRecord {
    agent_id: u32,
    start_x:  i32,
    start_y:  i32,
    target_x: i32,
    target_y: i32,
    speed:    u32,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load an agent roster from a CSV file.
///
/// Returns specs indexed by `agent_id`.
pub fn load_roster_csv(path: &Path) -> WorldResult<Vec<AgentSpec>> {
    let file = std::fs::File::open(path)?;
    load_roster_reader(file)
}

/// Like [`load_roster_csv`] but accepts any `Read` source.
pub fn load_roster_reader<R: Read>(reader: R) -> WorldResult<Vec<AgentSpec>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut by_id: BTreeMap<u32, AgentSpec> = BTreeMap::new();

    for result in csv_reader.deserialize::<RosterRecord>() {
        let row = result.map_err(|e| WorldError::Roster(e.to_string()))?;
        let spec = AgentSpec::new(
            GridPos::new(row.start_x, row.start_y),
            GridPos::new(row.target_x, row.target_y),
            row.speed,
        );
        if by_id.insert(row.agent_id, spec).is_some() {
            return Err(WorldError::Roster(format!(
                "agent_id {} appears more than once",
                row.agent_id
            )));
        }
    }

    // BTreeMap iterates in key order, so a gap shows up as the first key that
    // differs from its position.
    by_id
        .into_iter()
        .enumerate()
        .map(|(i, (id, spec))| {
            if id as usize == i {
                Ok(spec)
            } else {
                Err(WorldError::Roster(format!(
                    "agent ids must be contiguous from 0; agent_id {i} is missing"
                )))
            }
        })
        .collect()
}

/// Generate `count` agents with random start and target cells.
///
/// Start cells are pairwise distinct, as are target cells.  Speeds are drawn
/// from `1..=3`.
pub fn scatter(count: usize, field_size: i32, rng: &mut SimRng) -> WorldResult<Vec<AgentSpec>> {
    let cells = usize::try_from(field_size).unwrap_or(0).pow(2);
    if count > cells {
        return Err(WorldError::Roster(format!(
            "cannot scatter {count} agents over {cells} cells"
        )));
    }

    let mut starts = HashSet::with_capacity(count);
    let mut targets = HashSet::with_capacity(count);
    let mut specs = Vec::with_capacity(count);

    while specs.len() < count {
        let start = random_cell(field_size, rng);
        let target = random_cell(field_size, rng);
        if starts.contains(&start) || targets.contains(&target) {
            continue;
        }
        starts.insert(start);
        targets.insert(target);
        specs.push(AgentSpec::new(start, target, rng.gen_range(1..=3)));
    }
    Ok(specs)
}

fn random_cell(field_size: i32, rng: &mut SimRng) -> GridPos {
    GridPos::new(rng.gen_range(0..field_size), rng.gen_range(0..field_size))
}
