use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "trail", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a number of ticks and write the last presented frame as a PNG.
    Frame(FrameArgs),
    /// Write every presented frame as a numbered PNG sequence.
    Frames(FramesArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Trail config JSON. Flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Surface width in logical units.
    #[arg(long, default_value_t = 320.0)]
    width: f64,

    /// Surface height in logical units.
    #[arg(long, default_value_t = 240.0)]
    height: f64,

    /// Device pixels per logical unit.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    /// Frame rate (10, 30 and 60 are the usual choices).
    #[arg(long)]
    fps: Option<u32>,

    /// Trail length in seconds.
    #[arg(long)]
    trail_secs: Option<u32>,

    /// Background color (#RRGGBB, #RRGGBBAA or a palette name).
    #[arg(long)]
    background: Option<String>,

    /// Trail stamp color.
    #[arg(long)]
    trail_color: Option<String>,

    /// Echo stamp color.
    #[arg(long)]
    echo_color: Option<String>,

    /// Fade algorithm.
    #[arg(long, value_enum)]
    fade: Option<FadeChoice>,

    /// Motion model.
    #[arg(long, value_enum)]
    motion: Option<MotionChoice>,

    /// Random-walk seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of ticks to run before capturing.
    #[arg(long, default_value_t = 90)]
    ticks: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    scene: SceneArgs,

    /// Number of frames to write.
    #[arg(long, default_value_t = 90)]
    frames: u64,

    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Pace ticks with the frame timer instead of running as fast as possible.
    #[arg(long)]
    realtime: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FadeChoice {
    AlphaOverlay,
    ColorMatrix,
}

impl From<FadeChoice> for trail::FadeMethod {
    fn from(v: FadeChoice) -> Self {
        match v {
            FadeChoice::AlphaOverlay => trail::FadeMethod::AlphaOverlay,
            FadeChoice::ColorMatrix => trail::FadeMethod::ColorMatrix,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum MotionChoice {
    RandomWalk,
    ShipDrift,
}

impl From<MotionChoice> for trail::MotionKind {
    fn from(v: MotionChoice) -> Self {
        match v {
            MotionChoice::RandomWalk => trail::MotionKind::RandomWalk,
            MotionChoice::ShipDrift => trail::MotionKind::ShipDrift,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
    }
}

fn read_config_json(path: &Path) -> anyhow::Result<trail::TrailConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let cfg: trail::TrailConfig =
        serde_json::from_reader(r).with_context(|| "parse trail config JSON")?;
    Ok(cfg)
}

fn build_config(scene: &SceneArgs) -> anyhow::Result<trail::TrailConfig> {
    let mut cfg = match &scene.config {
        Some(path) => read_config_json(path)?,
        None => trail::TrailConfig::default(),
    };
    if let Some(fps) = scene.fps {
        cfg.frame_rate = trail::FrameRate::new(fps)?;
    }
    if let Some(secs) = scene.trail_secs {
        cfg.trail_length = trail::TrailLength::new(secs)?;
    }
    if let Some(c) = &scene.background {
        cfg.background = trail::parse_color(c).with_context(|| "--background")?;
    }
    if let Some(c) = &scene.trail_color {
        cfg.trail_color = trail::parse_color(c).with_context(|| "--trail-color")?;
    }
    if let Some(c) = &scene.echo_color {
        cfg.echo_color = trail::parse_color(c).with_context(|| "--echo-color")?;
    }
    if let Some(fade) = scene.fade {
        cfg.fade = fade.into();
    }
    if let Some(motion) = scene.motion {
        cfg.motion = motion.into();
    }
    if scene.seed.is_some() {
        cfg.seed = scene.seed;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn make_session(scene: &SceneArgs) -> anyhow::Result<(trail::TrailSession, trail::FrameSurface)> {
    let cfg = build_config(scene)?;
    let session = trail::TrailSession::new(cfg)?;
    let surface =
        trail::FrameSurface::new(trail::LogicalSize::new(scene.width, scene.height), scene.scale)?;
    Ok((session, surface))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (mut session, mut surface) = make_session(&args.scene)?;
    let mut sink = trail::LatestFrameSink::new();
    let stats = session.run_headless(args.ticks, &mut surface, &mut sink)?;
    session.teardown()?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let frame = sink.latest().map_or(surface.frame(), |(_, f)| f);
    trail::write_png(&args.out, frame)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!(
        "wrote {} after {} ticks ({} frames drawn)",
        args.out.display(),
        stats.ticks,
        stats.frames_drawn
    );
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let (mut session, mut surface) = make_session(&args.scene)?;
    let mut sink = trail::PngSequenceSink::new(args.out_dir.clone());
    let stats = if args.realtime {
        session.run_realtime(args.frames, &mut surface, &mut sink)?
    } else {
        session.run_headless(args.frames, &mut surface, &mut sink)?
    };
    session.teardown()?;

    eprintln!(
        "wrote {} frames to {} ({} skipped, {} reallocations)",
        sink.written(),
        args.out_dir.display(),
        stats.frames_skipped,
        stats.reallocations
    );
    Ok(())
}
