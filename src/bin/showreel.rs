use std::{
    io::Write as _,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tokio::io::AsyncBufReadExt as _;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use showreel::{
    Millis, PlaybackMode, PlaybackView, Player, PlayerCommand, SceneIndex, Sequencer, Timeline,
    TimelineDoc,
};

#[derive(Parser, Debug)]
#[command(name = "showreel", version)]
struct Cli {
    /// Log filter (overridden by RUST_LOG).
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the scene table of a timeline document.
    Inspect(InspectArgs),
    /// Render the frame shown after a span of uninterrupted autoplay, as JSON.
    Frame(FrameArgs),
    /// Render one frame every `--step-ms` of autoplay, as a JSON array.
    Storyboard(StoryboardArgs),
    /// Play a timeline in real time, reading transport commands from stdin.
    Play(PlayArgs),
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Playback time in milliseconds.
    #[arg(long)]
    at_ms: u64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct StoryboardArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Sampling step in milliseconds.
    #[arg(long, default_value_t = 1000)]
    step_ms: u64,

    /// Output JSON path (stdout when omitted).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Input timeline JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Force manual mode (no timers, navigation only).
    #[arg(long)]
    manual: bool,

    /// Start paused.
    #[arg(long)]
    no_autostart: bool,

    /// Override the progress tick period.
    #[arg(long)]
    tick_ms: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Storyboard(args) => cmd_storyboard(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn read_doc(path: &Path) -> anyhow::Result<(TimelineDoc, Timeline)> {
    let doc = TimelineDoc::from_path(path)
        .with_context(|| format!("load timeline '{}'", path.display()))?;
    let timeline = doc
        .timeline()
        .with_context(|| format!("validate timeline '{}'", path.display()))?;
    debug!(scenes = timeline.len(), total_ms = timeline.total_ms().0, "timeline loaded");
    Ok((doc, timeline))
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let (doc, timeline) = read_doc(&args.in_path)?;

    let mut out = std::io::stdout().lock();
    if !doc.title.is_empty() {
        writeln!(out, "{}", doc.title)?;
    }
    writeln!(
        out,
        "{} scenes, {} total, mode {:?}",
        timeline.len(),
        timeline.total_ms(),
        doc.playback.mode
    )?;
    for (i, scene) in timeline.scenes().iter().enumerate() {
        writeln!(
            out,
            "{:>3}  {:>8}  {:>8}  {:<10} {}",
            i,
            timeline.start_of(SceneIndex(i)).to_string(),
            scene.duration_ms.to_string(),
            scene.visual.as_str(),
            scene.id
        )?;
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (doc, timeline) = read_doc(&args.in_path)?;
    let frame = showreel::render_at(
        &timeline,
        doc.sequencer_opts(),
        &doc.render_opts(),
        Millis(args.at_ms),
    )?;
    write_json(args.out.as_deref(), &frame)
}

fn cmd_storyboard(args: StoryboardArgs) -> anyhow::Result<()> {
    let (doc, timeline) = read_doc(&args.in_path)?;
    let frames = showreel::render_storyboard(
        &timeline,
        doc.sequencer_opts(),
        &doc.render_opts(),
        Millis(args.step_ms),
    )?;
    let frames: Vec<_> = frames.into_iter().map(|(_, f)| f).collect();
    write_json(args.out.as_deref(), &frames)
}

fn write_json<T: serde::Serialize>(out: Option<&Path>, value: &T) -> anyhow::Result<()> {
    let Some(path) = out else {
        let mut stdout = std::io::stdout().lock();
        serde_json::to_writer_pretty(&mut stdout, value).context("write JSON to stdout")?;
        writeln!(stdout)?;
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let f = std::fs::File::create(path)
        .with_context(|| format!("create output '{}'", path.display()))?;
    let mut w = std::io::BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, value)
        .with_context(|| format!("write JSON '{}'", path.display()))?;
    w.flush().with_context(|| format!("flush JSON '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let (doc, timeline) = read_doc(&args.in_path)?;

    let mut opts = doc.sequencer_opts();
    if args.manual {
        opts.mode = PlaybackMode::Manual;
    }
    if args.no_autostart {
        opts.autostart = false;
    }
    if let Some(tick) = args.tick_ms {
        opts.tick = Millis(tick);
    }
    let seq = Sequencer::new(timeline, opts)?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("build tokio runtime")?;
    rt.block_on(play(seq))
}

async fn play(seq: Sequencer) -> anyhow::Result<()> {
    let scenes = seq.timeline().len();
    let player = Player::spawn(seq);
    let mut views = player.subscribe();
    let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
    println!("{}", status_line(&player.view(), scenes));

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("read stdin")? else {
                    info!("stdin closed");
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match PlayerCommand::parse(&line) {
                    Some(PlayerCommand::Shutdown) => break,
                    Some(cmd) => player.send(cmd).await?,
                    None => warn!(input = line.trim(), "unknown command"),
                }
            }
            changed = views.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = views.borrow_and_update().clone();
                println!("{}", status_line(&view, scenes));
            }
        }
    }

    let seq = player.shutdown().await?;
    println!("final {}", status_line(&seq.view(), scenes));
    Ok(())
}

fn status_line(view: &PlaybackView, scenes: usize) -> String {
    let state = if view.has_completed {
        "completed"
    } else if view.is_playing {
        "playing"
    } else {
        "paused"
    };
    format!(
        "[{}/{}] {:<12} scene {:5.1}%  overall {:5.1}%  {}",
        view.current_index.0 + 1,
        scenes,
        view.scene_id,
        view.scene_progress_pct,
        view.overall_progress_pct,
        state
    )
}
