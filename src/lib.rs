//! Showreel is a deterministic scene sequencer for timed presentations.
//!
//! A presentation is an ordered [`Timeline`] of scenes with fixed durations. Playback is
//! modelled as:
//!
//! - a pure reducer ([`PlaybackState::reduce`]) over transport events
//! - a [`Sequencer`] that owns the virtual clock and scene/tick timers, driven by `advance`
//! - a pure [`Renderer`] mapping playback state onto a serializable [`Frame`]
//!
//! [`Player`] drives a sequencer from tokio wall-clock time for interactive use.
#![forbid(unsafe_code)]

mod foundation;

pub(crate) mod pipeline;
pub(crate) mod playback;
pub(crate) mod player;
pub(crate) mod render;
pub(crate) mod timeline;

pub use crate::foundation::core::{
    Canvas, Epoch, Millis, Point, Rect, SceneIndex, Size, clamp_pct,
};
pub use crate::foundation::error::{ShowreelError, ShowreelResult};

pub use crate::pipeline::{render_at, render_storyboard};
pub use crate::playback::progress::{overall_progress, scene_elapsed};
pub use crate::playback::sequencer::{PlaybackView, Sequencer, SequencerOpts};
pub use crate::playback::state::{Bounds, PlaybackEvent, PlaybackMode, PlaybackState};
pub use crate::player::{Command as PlayerCommand, Player, PlayerHandle};
pub use crate::render::ease::Ease;
pub use crate::render::frame::{Accent, DotState, Frame, TextRole, VisualNode};
pub use crate::render::renderer::{RenderOpts, Renderer};
pub use crate::timeline::doc::{DOC_VERSION, TimelineDoc};
pub use crate::timeline::dsl::{SceneBuilder, TimelineBuilder};
pub use crate::timeline::model::{Scene, Timeline, VisualKey};
