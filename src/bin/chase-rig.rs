use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "chase-rig", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the default scene config as pretty JSON.
    Config,
    /// Step the scene up to a time and print that frame as JSON.
    Frame(FrameArgs),
    /// Write every frame of the sequence as JSON lines.
    Run(RunArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Time of the frame, in seconds.
    #[arg(long)]
    at: f64,

    /// Fixed step rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Scene config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RunArgs {
    /// Output `.jsonl` path.
    #[arg(long)]
    out: PathBuf,

    /// Fixed step rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Seconds to keep simulating after the sequence ends.
    #[arg(long, default_value_t = 0.0)]
    hold: f64,

    /// Scene config JSON. Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Config => cmd_config(),
        Command::Frame(args) => cmd_frame(args),
        Command::Run(args) => cmd_run(args),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> anyhow::Result<chase_rig::SceneConfig> {
    match path {
        Some(p) => chase_rig::SceneConfig::from_json_path(p)
            .with_context(|| format!("load scene config '{}'", p.display())),
        None => Ok(chase_rig::SceneConfig::default()),
    }
}

fn cmd_config() -> anyhow::Result<()> {
    println!("{}", chase_rig::SceneConfig::default().to_json_pretty()?);
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let fps = chase_rig::Fps::new(args.fps, 1)?;
    let mut scene = chase_rig::ChaseScene::new(cfg)?;
    let snapshot = scene.seek(fps, args.at)?;
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn cmd_run(args: RunArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.config.as_deref())?;
    let fps = chase_rig::Fps::new(args.fps, 1)?;
    let mut scene = chase_rig::ChaseScene::new(cfg)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let file = File::create(&args.out)
        .with_context(|| format!("create output file '{}'", args.out.display()))?;
    let mut sink = chase_rig::JsonLinesSink::new(BufWriter::new(file));

    let stats = scene.run(fps, args.hold, &mut sink)?;
    eprintln!(
        "wrote {} frames ({:.3}s) to {}",
        stats.frames,
        stats.elapsed,
        args.out.display()
    );
    Ok(())
}
