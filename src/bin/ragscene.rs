use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use ragscene::{
    CpuProvider, Engine, EngineConfig, FrameReport, HeadlessHost, LogicalSize, SurfaceId,
};

/// Background used when the config does not set one.
const DEFAULT_CLEAR_RGBA: [u8; 4] = [10, 14, 26, 255];

#[derive(Parser, Debug)]
#[command(name = "ragscene", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one surface at one instant as a PNG.
    Frame(FrameArgs),
    /// Render every configured surface at one instant.
    Sheet(SheetArgs),
    /// Render numbered PNG frames of one surface over a time range.
    Sequence(SequenceArgs),
    /// Drive the full engine headlessly and log a summary.
    Run(RunArgs),
}

#[derive(clap::Args, Debug)]
struct RenderOpts {
    /// Engine config JSON; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Font used for labels (TTF/OTF). Overrides `font_path` from the config.
    #[arg(long)]
    font: Option<PathBuf>,

    /// Container width in logical pixels.
    #[arg(long, default_value_t = 860)]
    width: u32,

    /// Container height in logical pixels; the surface's fallback height when omitted.
    #[arg(long)]
    height: Option<u32>,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Surface identifier (`c1` .. `c12`).
    #[arg(long)]
    surface: String,

    /// Elapsed seconds.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    render: RenderOpts,
}

#[derive(Parser, Debug)]
struct SheetArgs {
    /// Elapsed seconds.
    #[arg(long)]
    time: f64,

    /// Output directory; one `<surface>.png` per surface.
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    render: RenderOpts,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// Surface identifier (`c1` .. `c12`).
    #[arg(long)]
    surface: String,

    /// First instant in seconds.
    #[arg(long, default_value_t = 0.0)]
    from: f64,

    /// Last instant in seconds (exclusive).
    #[arg(long)]
    to: f64,

    /// Frames per second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Output directory; frames are written as `<surface>_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    #[command(flatten)]
    render: RenderOpts,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Number of frame callbacks to fire.
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Simulated frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Tick at which every container is resized.
    #[arg(long)]
    resize_at: Option<u64>,

    /// Container width, and the new width when `--resize-at` is given.
    #[arg(long, default_value_t = 860)]
    width: u32,

    /// Engine config JSON; built-in defaults when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sheet(args) => cmd_sheet(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    match path {
        Some(p) => {
            EngineConfig::from_path(p).with_context(|| format!("load config '{}'", p.display()))
        }
        None => Ok(EngineConfig::default()),
    }
}

fn ensure_dir(dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(dir).with_context(|| format!("create output dir '{}'", dir.display()))
}

/// Raster engine plus a headless host holding one container per requested surface.
struct RasterSession {
    engine: Engine,
    host: HeadlessHost,
    clear_rgba: [u8; 4],
}

impl RasterSession {
    fn open(opts: &RenderOpts, surfaces: &[SurfaceId]) -> anyhow::Result<Self> {
        let mut config = load_config(opts.config.as_deref())?;
        if let Some(font) = &opts.font {
            config.font_path = Some(font.clone());
        }
        for id in surfaces {
            if config.fallback_height(id).is_none() {
                anyhow::bail!("unknown surface '{id}'");
            }
        }

        let provider = match &config.font_path {
            Some(p) => CpuProvider::from_font_path(p)?,
            None => {
                tracing::warn!("no font configured; labels will not be rasterized");
                CpuProvider::new()
            }
        };
        let mut host = HeadlessHost::new(provider);
        for id in surfaces {
            host.set_container(
                id.clone(),
                LogicalSize::new(opts.width, opts.height.unwrap_or(0)),
            );
        }

        let clear_rgba = config.clear_rgba.unwrap_or(DEFAULT_CLEAR_RGBA);
        let mut engine = Engine::new(config)?;
        let found = engine.on_layout_ready(&mut host, Instant::now());
        if found < surfaces.len() {
            anyhow::bail!("only {found} of {} surfaces could be allocated", surfaces.len());
        }
        Ok(Self {
            engine,
            host,
            clear_rgba,
        })
    }

    fn render(&mut self, time: f64) -> FrameReport {
        self.engine.render_at(time)
    }

    fn write(&mut self, id: &SurfaceId, out: &Path) -> anyhow::Result<()> {
        let entry = self
            .engine
            .registry_mut()
            .get_mut(id)
            .with_context(|| format!("surface '{id}' is not registered"))?;
        let mut frame = entry
            .context_mut()
            .snapshot()
            .with_context(|| format!("surface '{id}' has no pixel backing"))?;
        frame.flatten_over(self.clear_rgba);
        frame.write_png(out)?;
        tracing::debug!(surface = %id, out = %out.display(), "wrote frame");
        Ok(())
    }

    fn close(mut self) {
        self.engine.stop(&mut self.host);
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let id = SurfaceId::from(args.surface.as_str());
    let mut session = RasterSession::open(&args.render, std::slice::from_ref(&id))?;

    let report = session.render(args.time);
    if report.failed > 0 {
        anyhow::bail!("scene for '{id}' failed at t={}", args.time);
    }
    if let Some(parent) = args.out.parent() {
        ensure_dir(parent)?;
    }
    session.write(&id, &args.out)?;
    session.close();

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sheet(args: SheetArgs) -> anyhow::Result<()> {
    let ids: Vec<SurfaceId> = load_config(args.render.config.as_deref())?
        .surfaces
        .into_iter()
        .map(|s| s.id)
        .collect();
    let mut session = RasterSession::open(&args.render, &ids)?;
    ensure_dir(&args.out_dir)?;

    let report = session.render(args.time);
    for id in &ids {
        session.write(id, &args.out_dir.join(format!("{id}.png")))?;
    }
    session.close();

    tracing::info!(
        drawn = report.drawn,
        failed = report.failed,
        time = args.time,
        "sheet rendered"
    );
    eprintln!("wrote {} surfaces to {}", ids.len(), args.out_dir.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("fps must be > 0");
    }
    if !args.from.is_finite() || !args.to.is_finite() {
        anyhow::bail!("--from and --to must be finite");
    }
    if args.to <= args.from {
        anyhow::bail!("--to must be greater than --from");
    }
    let id = SurfaceId::from(args.surface.as_str());
    let mut session = RasterSession::open(&args.render, std::slice::from_ref(&id))?;
    ensure_dir(&args.out_dir)?;

    let step = 1.0 / f64::from(args.fps);
    let count = ((args.to - args.from) / step).ceil() as u64;
    for i in 0..count {
        let t = args.from + i as f64 * step;
        session.render(t);
        session.write(&id, &args.out_dir.join(format!("{id}_{i:05}.png")))?;
    }
    session.close();

    eprintln!("wrote {count} frames to {}", args.out_dir.display());
    Ok(())
}

#[tracing::instrument(skip_all, fields(ticks = args.ticks, fps = args.fps))]
fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    if args.fps == 0 {
        anyhow::bail!("fps must be > 0");
    }
    let config = load_config(args.config.as_deref())?;
    // with --resize-at, start at the reference width and switch to --width later
    let initial_width = match args.resize_at {
        Some(_) => config.reference_width.round() as u32,
        None => args.width,
    };
    let mut host = HeadlessHost::recording();
    for s in &config.surfaces {
        host.set_container(s.id.clone(), LogicalSize::new(initial_width, 0));
    }

    let mut engine = Engine::new(config)?;
    let t0 = Instant::now();
    let found = engine.on_layout_ready(&mut host, t0);

    let frame = Duration::from_secs_f64(1.0 / f64::from(args.fps));
    let mut totals = FrameReport::default();
    let mut rebuilds = 0usize;
    for tick in 0..args.ticks {
        let now = t0 + frame * u32::try_from(tick).context("tick count exceeds u32")?;
        if args.resize_at == Some(tick) {
            host.set_all_widths(args.width);
            engine.on_container_resized(now);
        }
        if let Some(n) = engine.pump(&mut host, now) {
            rebuilds += n;
        }
        let Some(handle) = host.fire_next_frame() else {
            anyhow::bail!("frame loop stalled at tick {tick}");
        };
        if let Some(r) = engine.on_frame(&mut host, handle, now) {
            totals.elapsed = r.elapsed;
            totals.drawn += r.drawn;
            totals.empty += r.empty;
            totals.failed += r.failed;
        }
    }

    let typed = engine.typewriter().revealed();
    let total_chars = engine.typewriter().len();
    let pending = host.pending_frames().len();
    engine.stop(&mut host);

    tracing::info!(
        surfaces = found,
        elapsed = totals.elapsed,
        drawn = totals.drawn,
        empty = totals.empty,
        failed = totals.failed,
        rebuilds,
        typed,
        total_chars,
        pending_before_stop = pending,
        pending_after_stop = host.pending_frames().len(),
        "run finished"
    );
    Ok(())
}
