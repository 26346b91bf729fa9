//! TPS partitioning across generator processes
//!
//! A single generator can only sustain so much load, so the aggregate target
//! is spread over `ceil(target / limit)` generators with per-generator
//! targets that differ by at most one. Leftover units always land on the
//! trailing generators, so the same inputs always yield the same sequence.

use crate::error::{LaunchError, Result};
use serde::Serialize;

/// Per-generator limit used when the caller does not supply one.
pub const DEFAULT_TPS_LIMIT_PER_GENERATOR: u64 = 4000;

/// Upper bound on generators in one run.
pub const MAX_GENERATORS: u64 = 10_000;

/// Aggregate target, per-generator limit and the derived per-generator targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartitionConfig {
    target_tps: u64,
    tps_limit_per_generator: u64,
    target_tps_per_generator: Vec<u64>,
}

impl PartitionConfig {
    pub fn new(target_tps: u64, tps_limit_per_generator: u64) -> Result<Self> {
        let target_tps_per_generator = partition(target_tps, tps_limit_per_generator)?;
        Ok(Self {
            target_tps,
            tps_limit_per_generator,
            target_tps_per_generator,
        })
    }

    pub fn with_default_limit(target_tps: u64) -> Result<Self> {
        Self::new(target_tps, DEFAULT_TPS_LIMIT_PER_GENERATOR)
    }

    /// Build from signed values as they arrive from the command line.
    ///
    /// Negative targets and non-positive limits are rejected here rather than
    /// at parse time so they surface as configuration errors.
    pub fn from_signed(target_tps: i64, tps_limit_per_generator: i64) -> Result<Self> {
        let target = u64::try_from(target_tps).map_err(|_| {
            LaunchError::InvalidConfiguration(format!(
                "target TPS must be non-negative, got {target_tps}"
            ))
        })?;
        let limit = u64::try_from(tps_limit_per_generator).map_err(|_| {
            LaunchError::InvalidConfiguration(format!(
                "TPS limit per generator must be positive, got {tps_limit_per_generator}"
            ))
        })?;
        Self::new(target, limit)
    }

    pub fn target_tps(&self) -> u64 {
        self.target_tps
    }

    pub fn tps_limit_per_generator(&self) -> u64 {
        self.tps_limit_per_generator
    }

    pub fn num_generators(&self) -> usize {
        self.target_tps_per_generator.len()
    }

    pub fn targets(&self) -> &[u64] {
        &self.target_tps_per_generator
    }
}

/// Split `target_tps` into per-generator targets no larger than `tps_limit_per_generator`.
///
/// Returns `ceil(target / limit)` entries summing to `target_tps`. With a
/// remainder `r`, the last `r` entries carry one extra unit. A zero target
/// yields an empty partition.
pub fn partition(target_tps: u64, tps_limit_per_generator: u64) -> Result<Vec<u64>> {
    if tps_limit_per_generator == 0 {
        return Err(LaunchError::InvalidConfiguration(
            "TPS limit per generator must be positive, got 0".to_string(),
        ));
    }

    let num_generators = target_tps.div_ceil(tps_limit_per_generator);
    if num_generators > MAX_GENERATORS {
        return Err(LaunchError::InvalidConfiguration(format!(
            "{target_tps} TPS at {tps_limit_per_generator} TPS per generator needs \
             {num_generators} generators, more than the maximum of {MAX_GENERATORS}"
        )));
    }
    if num_generators == 0 {
        return Ok(Vec::new());
    }

    let base = target_tps / num_generators;
    let remainder = target_tps % num_generators;
    let increment_from = num_generators - remainder;

    Ok((0..num_generators)
        .map(|i| if i >= increment_from { base + 1 } else { base })
        .collect())
}
