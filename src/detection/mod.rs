//! Detection of anomalous rapid temperature changes.

mod spike;

pub use spike::{
    count_jump_exceedances, find_spikes, resolve_inner_spikes, Direction, GapPolicy,
    InnerSpikeSummary, NestedSpike, Spike, SpikeConfig, SpikeThresholds,
};
