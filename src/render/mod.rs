//! Pure rendering from playback state to a serializable visual description.

pub(crate) mod ease;
pub(crate) mod frame;
pub(crate) mod renderer;
