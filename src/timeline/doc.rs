use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Canvas, Millis};
use crate::foundation::error::{ShowreelError, ShowreelResult};
use crate::playback::sequencer::{PlaybackMode, SequencerOpts};
use crate::render::ease::Ease;
use crate::render::renderer::RenderOpts;
use crate::timeline::model::{Scene, Timeline};

/// Supported document version.
pub const DOC_VERSION: &str = "1";

/// JSON-facing, human-edited presentation document.
///
/// The document is validated and converted into a [`Timeline`] plus runtime options before a
/// [`crate::Sequencer`] is constructed from it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TimelineDoc {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub canvas: Canvas,
    #[serde(default)]
    pub playback: PlaybackSection,
    #[serde(default)]
    pub render: RenderSection,
    pub scenes: Vec<Scene>,
}

fn default_version() -> String {
    DOC_VERSION.to_owned()
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PlaybackSection {
    #[serde(default)]
    pub mode: PlaybackMode,
    #[serde(default = "default_autostart")]
    pub autostart: bool,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_autostart() -> bool {
    true
}

fn default_tick_ms() -> u64 {
    SequencerOpts::DEFAULT_TICK.0
}

impl Default for PlaybackSection {
    fn default() -> Self {
        Self {
            mode: PlaybackMode::default(),
            autostart: default_autostart(),
            tick_ms: default_tick_ms(),
        }
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderSection {
    #[serde(default = "default_enter_ms")]
    pub enter_ms: u64,
    #[serde(default = "default_enter_ease")]
    pub enter_ease: Ease,
}

fn default_enter_ms() -> u64 {
    RenderOpts::default().enter.0
}

fn default_enter_ease() -> Ease {
    RenderOpts::default().enter_ease
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            enter_ms: default_enter_ms(),
            enter_ease: default_enter_ease(),
        }
    }
}

impl TimelineDoc {
    pub fn from_reader<R: std::io::Read>(r: R) -> ShowreelResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| ShowreelError::serde(format!("parse timeline JSON: {e}")))
    }

    pub fn from_path(path: impl AsRef<Path>) -> ShowreelResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            ShowreelError::io(format!("open timeline JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    pub fn validate(&self) -> ShowreelResult<()> {
        if self.version != DOC_VERSION {
            return Err(ShowreelError::validation(format!(
                "unsupported timeline version '{}' (expected '{DOC_VERSION}')",
                self.version
            )));
        }
        Canvas::new(self.canvas.width, self.canvas.height)?;
        self.sequencer_opts().validate()?;
        Ok(())
    }

    /// Validate and build the immutable timeline.
    pub fn timeline(&self) -> ShowreelResult<Timeline> {
        self.validate()?;
        Timeline::new(self.scenes.clone())
    }

    pub fn sequencer_opts(&self) -> SequencerOpts {
        SequencerOpts {
            tick: Millis(self.playback.tick_ms),
            mode: self.playback.mode,
            autostart: self.playback.autostart,
        }
    }

    pub fn render_opts(&self) -> RenderOpts {
        RenderOpts {
            canvas: self.canvas,
            enter: Millis(self.render.enter_ms),
            enter_ease: self.render.enter_ease,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/doc.rs"]
mod tests;
