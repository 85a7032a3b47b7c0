use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use spritereel::{
    DecodeMode, DirSource, LoadedReel, NullSurface, PlaybackConfig, Player, PngSequenceSurface,
    Surface, Tick, TracingListener,
};

#[derive(Parser, Debug)]
#[command(name = "spritereel", version, about = "Sprite-sheet pseudo-video player")]
struct Cli {
    /// Log at debug level (RUST_LOG still applies).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the interpreted settings and program statistics as JSON.
    Inspect(ReelArgs),
    /// Render a single displayed frame as a PNG.
    Frame(FrameArgs),
    /// Render every displayed frame as a numbered PNG sequence.
    Render(RenderArgs),
    /// Play the reel in real time through the scheduler.
    Play(PlayArgs),
}

#[derive(Args, Debug)]
struct ReelArgs {
    /// Reel directory containing manifest.json and the images.
    #[arg(long)]
    dir: PathBuf,

    /// Decode on a rayon pool with this many threads (0 decodes inline).
    #[arg(long)]
    threads: Option<usize>,
}

impl ReelArgs {
    fn decode_mode(&self) -> DecodeMode {
        match self.threads {
            None | Some(0) => DecodeMode::Inline,
            Some(n) => DecodeMode::Parallel { threads: Some(n) },
        }
    }

    fn load(&self) -> anyhow::Result<LoadedReel> {
        let source = DirSource::new(&self.dir)?;
        let reel = spritereel::load_reel(&source, self.decode_mode())
            .with_context(|| format!("load reel '{}'", self.dir.display()))?;
        Ok(reel)
    }
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    reel: ReelArgs,

    /// Displayed frame index (0 is the base image).
    #[arg(long)]
    frame: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    reel: ReelArgs,

    /// Output directory for frame_NNNNN.png files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Args, Debug)]
struct PlayArgs {
    #[command(flatten)]
    reel: ReelArgs,

    /// JSON playback config ({"loop", "autoplay", "speed", "controls"}).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Loop playback.
    #[arg(long = "loop")]
    looping: bool,

    /// Playback speed in (0, 1].
    #[arg(long)]
    speed: Option<f64>,

    /// Write presented frames to this directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Stop after this many loops (looping playback only).
    #[arg(long, default_value_t = 1)]
    max_loops: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.cmd {
        Command::Inspect(args) => cmd_inspect(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Play(args) => cmd_play(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn cmd_inspect(args: ReelArgs) -> anyhow::Result<()> {
    let reel = args.load()?;
    let s = reel.settings();
    let instructions: usize = reel.programs().iter().map(|p| p.len()).sum();
    let report = serde_json::json!({
        "settings": s,
        "columns": s.columns(),
        "rows": s.rows(),
        "maxTime": s.max_time(),
        "frameIntervalMs": s.frame_interval_ms(1.0),
        "displayedFrames": s.frame_count + 1,
        "instructions": instructions,
        "blocksConsumed": reel.blocks_consumed(),
        "cursorCapacity": s.cursor_capacity(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let reel = args.reel.load()?;
    let frame = spritereel::render_frame_at(&reel, args.frame)?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        frame.data(),
        frame.width(),
        frame.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let reel = args.reel.load()?;
    let mut surface = PngSequenceSurface::new(&args.out_dir);
    let stats = spritereel::render_sequence(&reel, &mut surface)?;

    eprintln!(
        "wrote {} frames ({} blocks) to {}",
        stats.frames,
        stats.blocks,
        args.out_dir.display()
    );
    Ok(())
}

fn playback_config(args: &PlayArgs) -> anyhow::Result<PlaybackConfig> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => PlaybackConfig::default(),
    };
    if args.looping {
        config.looping = true;
    }
    if let Some(speed) = args.speed {
        config.speed = speed;
    }
    Ok(config)
}

fn read_config(path: &Path) -> anyhow::Result<PlaybackConfig> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read config '{}'", path.display()))?;
    Ok(PlaybackConfig::from_json(&bytes)?)
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let config = playback_config(&args)?;
    let surface: Box<dyn Surface> = match &args.out_dir {
        Some(dir) => Box::new(PngSequenceSurface::new(dir)),
        None => Box::new(NullSurface),
    };

    let mut player = Player::new(surface, config)?;
    player.add_listener(TracingListener);
    let reel = args.reel.load()?;
    player.load(reel, Instant::now())?;
    player.play(Instant::now())?;

    let nap = player
        .interval_ms()
        .map_or(Duration::from_millis(1), |ms| {
            Duration::from_secs_f64(ms / 4000.0).max(Duration::from_millis(1))
        });
    let mut loops = 0;
    while player.is_armed() {
        match player.tick(Instant::now())? {
            Tick::Looped => {
                loops += 1;
                if loops >= args.max_loops {
                    player.stop()?;
                }
            }
            Tick::Ended | Tick::Halted => break,
            Tick::Idle | Tick::Drew(_) => {}
        }
        std::thread::sleep(nap);
    }

    println!("{}", serde_json::to_string_pretty(&player.snapshot())?);
    Ok(())
}
