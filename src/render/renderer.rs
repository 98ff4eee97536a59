use crate::foundation::core::{Canvas, Millis, Rect, SceneIndex};
use crate::playback::progress::scene_elapsed;
use crate::playback::sequencer::{PlaybackView, Sequencer};
use crate::render::ease::Ease;
use crate::render::frame::{Accent, DotState, Frame, TextRole, VisualNode};
use crate::timeline::model::{Scene, Timeline, VisualKey};

/// Renderer options.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderOpts {
    pub canvas: Canvas,
    /// Entrance animation length at the start of each scene.
    pub enter: Millis,
    pub enter_ease: Ease,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            canvas: Canvas::default(),
            enter: Millis(400),
            enter_ease: Ease::OutCubic,
        }
    }
}

/// Stateless mapping from playback state to a [`Frame`].
pub struct Renderer;

impl Renderer {
    /// Render the scene `view` points at.
    ///
    /// Pure: identical inputs produce identical frames.
    #[tracing::instrument(skip_all, fields(scene = %view.scene_id, revision = view.revision))]
    pub fn render(timeline: &Timeline, view: &PlaybackView, opts: &RenderOpts) -> Frame {
        let scene = timeline.scene(view.current_index);
        let ctx = SceneCtx::new(timeline, scene, view, opts);

        let mut nodes = vec![VisualNode::Panel {
            rect: opts.canvas.bounds(),
            accent: accent_for(scene.visual),
        }];

        match scene.visual {
            VisualKey::Intro => layout_intro(&ctx, &mut nodes),
            VisualKey::Problem => layout_problem(&ctx, &mut nodes),
            VisualKey::Solution => layout_solution(&ctx, &mut nodes),
            VisualKey::PhaseA => layout_phase(&ctx, 1, &mut nodes),
            VisualKey::PhaseB => layout_phase(&ctx, 2, &mut nodes),
            VisualKey::Metrics => layout_metrics(&ctx, &mut nodes),
            VisualKey::Cta => layout_cta(&ctx, &mut nodes),
            VisualKey::Generic => layout_generic(&ctx, &mut nodes),
        }

        push_caption(&ctx, &mut nodes);
        push_chrome(timeline, view, opts.canvas, &mut nodes);

        Frame {
            scene_id: scene.id.clone(),
            scene_index: view.current_index,
            visual: scene.visual,
            accent: accent_for(scene.visual),
            canvas: opts.canvas,
            nodes,
        }
    }

    /// Render the sequencer's current state.
    pub fn render_sequencer(seq: &Sequencer, opts: &RenderOpts) -> Frame {
        Self::render(seq.timeline(), &seq.view(), opts)
    }
}

fn accent_for(key: VisualKey) -> Accent {
    match key {
        VisualKey::Problem => Accent::Alert,
        VisualKey::Solution | VisualKey::Metrics => Accent::Positive,
        VisualKey::Intro | VisualKey::PhaseA | VisualKey::PhaseB | VisualKey::Cta => Accent::Brand,
        VisualKey::Generic => Accent::Neutral,
    }
}

struct SceneCtx<'a> {
    scene: &'a Scene,
    /// Content area above the chrome strip.
    area: Rect,
    /// Entrance opacity for headline text.
    enter_opacity: f64,
    /// How many highlights are visible.
    revealed: usize,
    waiting: bool,
}

impl<'a> SceneCtx<'a> {
    fn new(timeline: &Timeline, scene: &'a Scene, view: &PlaybackView, opts: &RenderOpts) -> Self {
        let bounds = opts.canvas.bounds();
        let margin = bounds.width() * 0.06;
        let chrome = bounds.height() * 0.15;
        let area = Rect::new(
            margin,
            margin,
            bounds.width() - margin,
            (bounds.height() - chrome).max(margin),
        );

        // Entrance animation only runs while playing; a paused or manual frame is fully visible.
        let enter_opacity = if !view.is_playing || opts.enter.0 == 0 {
            1.0
        } else {
            let elapsed = scene_elapsed(timeline, view.current_index, view.scene_progress_pct);
            opts.enter_ease.apply(elapsed.as_f64() / opts.enter.as_f64())
        };

        let n = scene.highlights.len();
        let revealed = if view.has_completed || (!view.is_playing && view.scene_progress_pct == 0.0)
        {
            // A scene parked at its start (paused, or never started in manual mode) shows its
            // full content.
            n
        } else {
            ((n as f64) * view.scene_progress_pct / 100.0).ceil() as usize
        };

        Self {
            scene,
            area,
            enter_opacity,
            revealed: revealed.min(n),
            waiting: !view.is_playing,
        }
    }

    /// Horizontal band of the content area, `top`/`height` as fractions of its height.
    fn band(&self, top: f64, height: f64) -> Rect {
        let h = self.area.height();
        Rect::new(
            self.area.x0,
            self.area.y0 + h * top,
            self.area.x1,
            self.area.y0 + h * (top + height),
        )
    }

    fn text(&self, role: TextRole, content: &str, rect: Rect, opacity: f64) -> Option<VisualNode> {
        if content.is_empty() {
            return None;
        }
        Some(VisualNode::Text {
            role,
            content: content.to_owned(),
            rect,
            opacity,
        })
    }
}

fn split_columns(r: Rect, gap: f64) -> (Rect, Rect) {
    let mid = r.x0 + r.width() / 2.0;
    (
        Rect::new(r.x0, r.y0, mid - gap / 2.0, r.y1),
        Rect::new(mid + gap / 2.0, r.y0, r.x1, r.y1),
    )
}

fn push_highlight_list(ctx: &SceneCtx<'_>, column: Rect, nodes: &mut Vec<VisualNode>) {
    let n = ctx.scene.highlights.len();
    if n == 0 {
        return;
    }
    let row = column.height() / n as f64;
    for (i, line) in ctx.scene.highlights.iter().take(ctx.revealed).enumerate() {
        let y0 = column.y0 + row * i as f64;
        nodes.push(VisualNode::Text {
            role: TextRole::Highlight,
            content: line.clone(),
            rect: Rect::new(column.x0, y0, column.x1, y0 + row),
            opacity: 1.0,
        });
    }
}

fn layout_intro(ctx: &SceneCtx<'_>, nodes: &mut Vec<VisualNode>) {
    let s = ctx.scene;
    nodes.extend(ctx.text(TextRole::Title, &s.title, ctx.band(0.30, 0.20), ctx.enter_opacity));
    nodes.extend(ctx.text(
        TextRole::Subtitle,
        &s.subtitle,
        ctx.band(0.52, 0.10),
        ctx.enter_opacity,
    ));
    push_highlight_list(ctx, ctx.band(0.68, 0.30), nodes);
}

fn layout_problem(ctx: &SceneCtx<'_>, nodes: &mut Vec<VisualNode>) {
    let s = ctx.scene;
    nodes.extend(ctx.text(TextRole::Badge, "The problem", ctx.band(0.0, 0.08), 1.0));
    nodes.extend(ctx.text(TextRole::Title, &s.title, ctx.band(0.10, 0.18), ctx.enter_opacity));
    nodes.extend(ctx.text(TextRole::Body, &s.subtitle, ctx.band(0.30, 0.12), ctx.enter_opacity));
    push_highlight_list(ctx, ctx.band(0.45, 0.55), nodes);
}

fn layout_solution(ctx: &SceneCtx<'_>, nodes: &mut Vec<VisualNode>) {
    let s = ctx.scene;
    let (left, right) = split_columns(ctx.band(0.0, 1.0), ctx.area.width() * 0.04);
    let title = Rect::new(left.x0, left.y0, left.x1, left.y0 + left.height() * 0.5);
    let sub = Rect::new(left.x0, title.y1, left.x1, left.y1);
    nodes.extend(ctx.text(TextRole::Title, &s.title, title, ctx.enter_opacity));
    nodes.extend(ctx.text(TextRole::Subtitle, &s.subtitle, sub, ctx.enter_opacity));
    push_highlight_list(ctx, right, nodes);
}

fn layout_phase(ctx: &SceneCtx<'_>, step: u8, nodes: &mut Vec<VisualNode>) {
    let s = ctx.scene;
    let badge = format!("Phase {step}");
    nodes.extend(ctx.text(TextRole::Badge, &badge, ctx.band(0.0, 0.08), 1.0));
    nodes.extend(ctx.text(TextRole::Title, &s.title, ctx.band(0.10, 0.18), ctx.enter_opacity));
    nodes.extend(ctx.text(
        TextRole::Subtitle,
        &s.subtitle,
        ctx.band(0.30, 0.10),
        ctx.enter_opacity,
    ));
    push_highlight_list(ctx, ctx.band(0.45, 0.55), nodes);
}

fn layout_metrics(ctx: &SceneCtx<'_>, nodes: &mut Vec<VisualNode>) {
    let s = ctx.scene;
    nodes.extend(ctx.text(TextRole::Title, &s.title, ctx.band(0.0, 0.18), ctx.enter_opacity));

    let n = s.highlights.len();
    if n == 0 {
        return;
    }
    let grid = ctx.band(0.30, 0.50);
    let gap = grid.width() * 0.02;
    let w = (grid.width() - gap * (n as f64 - 1.0)) / n as f64;
    for (i, label) in s.highlights.iter().enumerate() {
        let x0 = grid.x0 + (w + gap) * i as f64;
        nodes.push(VisualNode::Tile {
            label: label.clone(),
            rect: Rect::new(x0, grid.y0, x0 + w, grid.y1),
            revealed: i < ctx.revealed,
        });
    }
}

fn layout_cta(ctx: &SceneCtx<'_>, nodes: &mut Vec<VisualNode>) {
    let s = ctx.scene;
    nodes.extend(ctx.text(TextRole::Title, &s.title, ctx.band(0.20, 0.20), ctx.enter_opacity));
    push_highlight_list(ctx, ctx.band(0.42, 0.25), nodes);

    let label = if s.subtitle.is_empty() {
        "Get started"
    } else {
        s.subtitle.as_str()
    };
    let slot = ctx.band(0.72, 0.14);
    let w = slot.width() * 0.3;
    let cx = slot.center().x;
    nodes.push(VisualNode::Button {
        label: label.to_owned(),
        rect: Rect::new(cx - w / 2.0, slot.y0, cx + w / 2.0, slot.y1),
        pulsing: ctx.waiting,
    });
}

fn layout_generic(ctx: &SceneCtx<'_>, nodes: &mut Vec<VisualNode>) {
    let s = ctx.scene;
    nodes.extend(ctx.text(TextRole::Title, &s.title, ctx.band(0.0, 0.20), ctx.enter_opacity));
    nodes.extend(ctx.text(
        TextRole::Subtitle,
        &s.subtitle,
        ctx.band(0.22, 0.10),
        ctx.enter_opacity,
    ));
    push_highlight_list(ctx, ctx.band(0.40, 0.60), nodes);
}

fn push_caption(ctx: &SceneCtx<'_>, nodes: &mut Vec<VisualNode>) {
    let r = ctx.area;
    let caption = Rect::new(r.x0, r.y1, r.x1, r.y1 + ctx.area.y0 * 0.8);
    nodes.extend(ctx.text(TextRole::Caption, &ctx.scene.narration, caption, 1.0));
}

fn push_chrome(
    timeline: &Timeline,
    view: &PlaybackView,
    canvas: Canvas,
    nodes: &mut Vec<VisualNode>,
) {
    let b = canvas.bounds();
    let bar_h = (b.height() * 0.01).max(2.0);
    let dots_h = b.height() * 0.04;

    let dots = (0..timeline.len())
        .map(|i| {
            let idx = SceneIndex(i);
            if view.has_completed || idx < view.current_index {
                DotState::Done
            } else if idx == view.current_index {
                DotState::Current
            } else {
                DotState::Upcoming
            }
        })
        .collect();
    let dots_w = b.width() * 0.3;
    let cx = b.center().x;
    let dots_y1 = b.y1 - bar_h * 3.0;
    nodes.push(VisualNode::SceneDots {
        rect: Rect::new(cx - dots_w / 2.0, dots_y1 - dots_h, cx + dots_w / 2.0, dots_y1),
        dots,
    });

    nodes.push(VisualNode::ProgressBar {
        rect: Rect::new(b.x0, b.y1 - bar_h, b.x1, b.y1),
        fraction: (view.overall_progress_pct / 100.0).clamp(0.0, 1.0),
    });
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
