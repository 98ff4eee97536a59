use crate::foundation::core::Millis;
use crate::foundation::error::{ShowreelError, ShowreelResult};
use crate::playback::sequencer::{PlaybackMode, Sequencer, SequencerOpts};
use crate::render::frame::Frame;
use crate::render::renderer::{RenderOpts, Renderer};
use crate::timeline::model::Timeline;

/// Simulate uninterrupted autoplay for `at` and render the resulting state.
///
/// The sequencer is always run in autoplay mode with autostart, whatever `opts` says about the
/// mode; only the tick period is taken from `opts`.
pub fn render_at(
    timeline: &Timeline,
    opts: SequencerOpts,
    render: &RenderOpts,
    at: Millis,
) -> ShowreelResult<Frame> {
    let mut seq = Sequencer::new(timeline.clone(), autoplay(opts))?;
    seq.advance(at);
    Ok(Renderer::render_sequencer(&seq, render))
}

/// Sample uninterrupted autoplay every `step`, from 0 up to and including the end.
///
/// Useful for storyboards and contact sheets: one frame per sample, in time order.
#[tracing::instrument(skip(timeline, opts, render), fields(scenes = timeline.len()))]
pub fn render_storyboard(
    timeline: &Timeline,
    opts: SequencerOpts,
    render: &RenderOpts,
    step: Millis,
) -> ShowreelResult<Vec<(Millis, Frame)>> {
    if step.0 == 0 {
        return Err(ShowreelError::validation("storyboard step must be > 0 ms"));
    }
    let mut seq = Sequencer::new(timeline.clone(), autoplay(opts))?;
    let total = timeline.total_ms();

    let mut out = Vec::new();
    let mut at = Millis::ZERO;
    loop {
        out.push((at, Renderer::render_sequencer(&seq, render)));
        if at >= total {
            break;
        }
        let dt = step.min(total.saturating_sub(at));
        seq.advance(dt);
        at = at.saturating_add(dt);
    }
    Ok(out)
}

fn autoplay(opts: SequencerOpts) -> SequencerOpts {
    SequencerOpts {
        mode: PlaybackMode::Autoplay,
        autostart: true,
        ..opts
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
