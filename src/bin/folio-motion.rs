use std::{
    fs::File,
    io::{BufWriter, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "folio-motion", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a scripted scene against an in-memory page and write a JSON trace.
    Simulate(SimulateArgs),
    /// Parse and validate a motion config.
    CheckConfig(CheckConfigArgs),
    /// Print the WCAG contrast ratio between two hex colors.
    Contrast(ContrastArgs),
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Scene JSON.
    #[arg(long)]
    scene: PathBuf,

    /// Motion config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of frames to run, at most 144000.
    #[arg(long, default_value_t = 120)]
    frames: u64,

    /// Display refresh rate.
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Output trace path. Printed to stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct CheckConfigArgs {
    /// Motion config JSON.
    #[arg(long)]
    config: PathBuf,
}

#[derive(Parser, Debug)]
struct ContrastArgs {
    /// Foreground color, `#rrggbb`.
    foreground: String,
    /// Background color, `#rrggbb`.
    background: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::CheckConfig(args) => cmd_check_config(args),
        Command::Contrast(args) => cmd_contrast(args),
    }
}

fn read_to_string(path: &Path, what: &str) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("open {what} '{}'", path.display()))
}

fn read_config(path: &Path) -> anyhow::Result<folio_motion::MotionConfig> {
    let s = read_to_string(path, "config")?;
    let config = folio_motion::MotionConfig::from_json_str(&s)
        .with_context(|| format!("load config '{}'", path.display()))?;
    Ok(config)
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let s = read_to_string(&args.scene, "scene")?;
    let scene = folio_motion::scene::Scene::from_json_str(&s)
        .with_context(|| format!("load scene '{}'", args.scene.display()))?;
    let config = match &args.config {
        Some(path) => read_config(path)?,
        None => folio_motion::MotionConfig::default(),
    };

    let trace = folio_motion::scene::simulate(&scene, config, args.frames, args.fps)?;
    if trace.leaked_listeners != 0 {
        anyhow::bail!("{} native listeners leaked after unmount", trace.leaked_listeners);
    }

    match &args.out {
        Some(out) => {
            if let Some(parent) = out.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(out).with_context(|| format!("create '{}'", out.display()))?;
            let mut w = BufWriter::new(f);
            serde_json::to_writer_pretty(&mut w, &trace).with_context(|| "write trace JSON")?;
            w.flush()?;
            eprintln!("wrote {} frames to {}", trace.frames.len(), out.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut w = stdout.lock();
            serde_json::to_writer_pretty(&mut w, &trace).with_context(|| "write trace JSON")?;
            writeln!(w)?;
        }
    }
    Ok(())
}

fn cmd_check_config(args: CheckConfigArgs) -> anyhow::Result<()> {
    let config = read_config(&args.config)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn cmd_contrast(args: ContrastArgs) -> anyhow::Result<()> {
    let ratio = folio_motion::a11y::contrast_ratio(&args.foreground, &args.background)?;
    let verdict = if ratio >= folio_motion::a11y::WCAG_AA_NORMAL_TEXT {
        "AA"
    } else if ratio >= folio_motion::a11y::WCAG_AA_LARGE_TEXT {
        "AA large text only"
    } else {
        "fails AA"
    };
    println!("{ratio:.2}:1 ({verdict})");
    Ok(())
}
