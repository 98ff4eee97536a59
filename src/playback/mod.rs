//! Playback: the pure transition reducer, virtual-time timers, the sequencer that ties them
//! together and the progress aggregator.

pub(crate) mod progress;
pub(crate) mod sequencer;
pub(crate) mod state;
pub(crate) mod timer;
