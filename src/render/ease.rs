/// Entrance curve for headline text, selected by `render.enter_ease` in a timeline document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    Linear,
    OutQuad,
    #[default]
    OutCubic,
    /// Fully visible as soon as the scene starts moving.
    Step,
}

impl Ease {
    pub const ALL: [Ease; 4] = [Self::Linear, Self::OutQuad, Self::OutCubic, Self::Step];

    /// Opacity for entrance progress `t`; `t` is clamped to `[0, 1]` and NaN counts as 0.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let rest = 1.0 - t;
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - rest * rest,
            Self::OutCubic => 1.0 - rest * rest * rest,
            Self::Step if t > 0.0 => 1.0,
            Self::Step => 0.0,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/ease.rs"]
mod tests;
