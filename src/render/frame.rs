use crate::foundation::core::{Canvas, Rect, SceneIndex};
use crate::timeline::model::VisualKey;

/// Backend-agnostic description of what a host should draw for one playback state.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Frame {
    pub scene_id: String,
    pub scene_index: SceneIndex,
    pub visual: VisualKey,
    pub accent: Accent,
    pub canvas: Canvas,
    /// Back-to-front draw order.
    pub nodes: Vec<VisualNode>,
}

impl Frame {
    /// Nodes with the given text role, in draw order.
    pub fn texts(&self, role: TextRole) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().filter_map(move |n| match n {
            VisualNode::Text { role: r, content, .. } if *r == role => Some(content.as_str()),
            _ => None,
        })
    }

    pub fn progress_fraction(&self) -> Option<f64> {
        self.nodes.iter().find_map(|n| match n {
            VisualNode::ProgressBar { fraction, .. } => Some(*fraction),
            _ => None,
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Accent {
    Neutral,
    Brand,
    Alert,
    Positive,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    Badge,
    Title,
    Subtitle,
    Body,
    Highlight,
    Caption,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DotState {
    Done,
    Current,
    Upcoming,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisualNode {
    /// Solid background panel.
    Panel { rect: Rect, accent: Accent },
    Text {
        role: TextRole,
        content: String,
        rect: Rect,
        opacity: f64,
    },
    /// Metric tile; hidden tiles keep their slot so the grid does not reflow.
    Tile {
        label: String,
        rect: Rect,
        revealed: bool,
    },
    Button {
        label: String,
        rect: Rect,
        pulsing: bool,
    },
    /// Overall progress, `fraction` in `[0, 1]`.
    ProgressBar { rect: Rect, fraction: f64 },
    /// Scene navigator, one entry per scene.
    SceneDots { rect: Rect, dots: Vec<DotState> },
}
