use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "inkline", version)]
struct Cli {
    /// Log engine and renderer diagnostics to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize the sketched border for a region and write it as SVG or PNG.
    Border(BorderArgs),
    /// Replay a JSON pointer script through the ink trail and write the final frame as PNG.
    Trail(TrailArgs),
    /// Print the default configuration as JSON.
    Config,
}

#[derive(Parser, Debug)]
struct BorderArgs {
    /// Region width.
    #[arg(long)]
    width: f64,

    /// Region height.
    #[arg(long)]
    height: f64,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = BorderFormat::Svg)]
    format: BorderFormat,

    /// Device pixels per unit for PNG output.
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Configuration JSON (defaults apply to missing fields).
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BorderFormat {
    Svg,
    Png,
}

#[derive(Parser, Debug)]
struct TrailArgs {
    /// Pointer script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 640.0)]
    width: f64,

    #[arg(long, default_value_t = 360.0)]
    height: f64,

    /// Reported device pixel ratio (capped by the configuration).
    #[arg(long, default_value_t = 1.0)]
    dpr: f64,

    /// Seed for particle randomness.
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Configuration JSON (defaults apply to missing fields).
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(std::io::stderr)
            .init();
    }
    match cli.cmd {
        Command::Border(args) => cmd_border(args),
        Command::Trail(args) => cmd_trail(args),
        Command::Config => cmd_config(),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<inkline::InkConfig> {
    match path {
        Some(p) => inkline::InkConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display())),
        None => Ok(inkline::InkConfig::default()),
    }
}

fn ensure_parent(out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn cmd_border(args: BorderArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let size = inkline::Size::new(args.width, args.height);
    let scene = inkline::BorderScene::synthesize(size, &cfg.border);
    if scene.is_empty() {
        eprintln!(
            "region {}x{} is below the {} unit minimum; writing an empty border",
            args.width, args.height, cfg.border.min_size
        );
    }

    ensure_parent(&args.out)?;
    match args.format {
        BorderFormat::Svg => std::fs::write(&args.out, scene.to_svg())
            .with_context(|| format!("write svg '{}'", args.out.display()))?,
        BorderFormat::Png => inkline::rasterize_border(&scene, args.dpr)?.write_png(&args.out)?,
    }

    eprintln!("wrote {} (fingerprint {})", args.out.display(), scene.fingerprint());
    Ok(())
}

fn cmd_trail(args: TrailArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let script = inkline::TrailScript::from_path(&args.script)
        .with_context(|| format!("read trail script '{}'", args.script.display()))?;

    let viewport =
        inkline::Viewport::new(args.width, args.height).with_device_pixel_ratio(args.dpr);
    let outcome = inkline::replay(&script, viewport, cfg.trail, inkline::Rng64::new(args.seed));

    ensure_parent(&args.out)?;
    outcome.frame.write_png(&args.out)?;

    eprintln!(
        "wrote {} ({} frames drawn, {} live particles)",
        args.out.display(),
        outcome.frames_drawn,
        outcome.live_particles
    );
    Ok(())
}

fn cmd_config() -> anyhow::Result<()> {
    println!("{}", inkline::InkConfig::default().to_json_pretty()?);
    Ok(())
}
