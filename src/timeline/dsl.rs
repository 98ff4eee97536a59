use crate::foundation::core::Millis;
use crate::foundation::error::ShowreelResult;
use crate::timeline::model::{Scene, Timeline, VisualKey};

pub struct TimelineBuilder {
    scenes: Vec<Scene>,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self { scenes: Vec::new() }
    }

    pub fn scene(mut self, scene: Scene) -> Self {
        self.scenes.push(scene);
        self
    }

    /// Shorthand for a payload-free scene.
    pub fn bare(self, id: impl Into<String>, duration_ms: u64) -> Self {
        self.scene(Scene::new(id, duration_ms, VisualKey::Generic))
    }

    pub fn build(self) -> ShowreelResult<Timeline> {
        Timeline::new(self.scenes)
    }
}

impl Default for TimelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub struct SceneBuilder {
    id: String,
    duration: Millis,
    visual: VisualKey,
    title: String,
    subtitle: String,
    narration: String,
    highlights: Vec<String>,
}

impl SceneBuilder {
    pub fn new(id: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            id: id.into(),
            duration: Millis(duration_ms),
            visual: VisualKey::Generic,
            title: String::new(),
            subtitle: String::new(),
            narration: String::new(),
            highlights: Vec::new(),
        }
    }

    pub fn visual(mut self, key: VisualKey) -> Self {
        self.visual = key;
        self
    }

    pub fn title(mut self, s: impl Into<String>) -> Self {
        self.title = s.into();
        self
    }

    pub fn subtitle(mut self, s: impl Into<String>) -> Self {
        self.subtitle = s.into();
        self
    }

    pub fn narration(mut self, s: impl Into<String>) -> Self {
        self.narration = s.into();
        self
    }

    pub fn highlight(mut self, s: impl Into<String>) -> Self {
        self.highlights.push(s.into());
        self
    }

    pub fn build(self) -> ShowreelResult<Scene> {
        let scene = Scene {
            id: self.id,
            duration_ms: self.duration,
            title: self.title,
            subtitle: self.subtitle,
            narration: self.narration,
            visual: self.visual,
            highlights: self.highlights,
        };
        scene.validate()?;
        Ok(scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/dsl.rs"]
mod tests;
