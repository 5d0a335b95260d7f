// SPDX-License-Identifier: MIT
//
// swatch: color metrics, naming and harmony palettes from the command line.
//
// This binary is a thin front end over the two library crates:
//
//   swatch-color   → hex / RGB / HSV conversion, luminance
//   swatch-palette → naming index, factory, scales, palettes, repository
//
// Every subcommand prints one JSON document to stdout. Logs go to stderr,
// filtered by SWATCH_LOG (tracing directives, default "warn"), so the output
// can be piped straight into other tools.
//
// Settings resolve in three layers, last one wins:
//
//   built-in defaults → swatch.toml (--config) → command-line flags

use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser, Subcommand};
use rand::Rng;
use serde::Serialize;
use swatch_palette::{
    Channel, Color, ColorFactory, FileStorage, NamingIndex, PaletteMode, PaletteRepository,
    SwatchConfig, generate_palette, generate_scale, generate_shades,
};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "SWATCH_LOG";

// ─── Arguments ──────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(name = "swatch", version, about)]
struct Cli {
    /// TOML settings file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// JSON reference table of `{hex, name}` entries (default: CSS colors).
    #[arg(long, global = true, value_name = "PATH")]
    table: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Full metrics and name of one color.
    #[command(group(ArgGroup::new("source").required(true).args(["hex", "random"])))]
    Color {
        hex: Option<String>,
        /// Draw a random color instead.
        #[arg(long)]
        random: bool,
    },

    /// The per-channel RGB midpoint of two colors.
    Middle { a: String, b: String },

    /// A fixed number of steps either side of a color along one channel.
    Scale {
        hex: String,
        #[arg(long)]
        channel: Option<Channel>,
        #[arg(long)]
        step: Option<f64>,
        #[arg(long)]
        steps: Option<usize>,
    },

    /// Steps along one channel until it runs out of range.
    Shades {
        hex: String,
        #[arg(long)]
        channel: Option<Channel>,
        #[arg(long)]
        step: Option<f64>,
    },

    /// A harmony palette around a base color (random when omitted).
    Palette {
        hex: Option<String>,
        #[arg(long)]
        mode: Option<PaletteMode>,
        #[arg(long)]
        size: Option<usize>,
        /// Keep this color in the palette; repeatable.
        #[arg(long = "lock", value_name = "HEX")]
        locked: Vec<String>,
    },

    /// The nearest reference name for a color.
    Name { hex: String },

    /// Work with saved palettes.
    Store {
        /// Palette directory (overrides `[store] dir`).
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        #[command(subcommand)]
        action: StoreAction,
    },
}

#[derive(Debug, Subcommand)]
enum StoreAction {
    /// Show the current palette, creating one if there is none.
    Current,
    /// Create a new random palette and make it current.
    New,
    /// List every saved palette.
    List,
    /// Regenerate the current palette, keeping locked colors.
    Regenerate {
        #[arg(long)]
        mode: Option<PaletteMode>,
    },
    /// Toggle the lock on one color of the current palette.
    Lock { index: usize },
}

#[derive(Serialize)]
struct NameOutput<'a> {
    hex: &'a str,
    name: &'a str,
}

// ─── Commands ───────────────────────────────────────────────────────────────

fn load_config(cli: &Cli) -> Result<SwatchConfig> {
    let mut config = match &cli.config {
        Some(path) => SwatchConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SwatchConfig::default(),
    };
    if let Some(table) = &cli.table {
        config.naming.table = Some(table.clone());
    }
    Ok(config)
}

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn run<W: Write, R: Rng + ?Sized>(cli: &Cli, out: &mut W, rng: &mut R) -> Result<()> {
    let config = load_config(cli)?;
    let index: NamingIndex = config.naming_index().context("loading reference table")?;
    let factory = ColorFactory::new(&index);
    debug!(entries = index.len(), "naming index ready");

    match &cli.command {
        Command::Color { hex, .. } => {
            let color = factory.generate_color(hex.as_deref(), rng)?;
            print_json(out, &color)
        }
        Command::Middle { a, b } => print_json(out, &factory.middle_color(a, b)?),
        Command::Scale {
            hex,
            channel,
            step,
            steps,
        } => {
            let base = factory.color(hex)?;
            let scale = generate_scale(
                &factory,
                channel.unwrap_or(config.scale.channel),
                &base,
                step.unwrap_or(config.scale.step),
                steps.unwrap_or(config.scale.steps),
            );
            print_json(out, &scale)
        }
        Command::Shades { hex, channel, step } => {
            let base = factory.color(hex)?;
            let shades = generate_shades(
                &factory,
                channel.unwrap_or(config.scale.channel),
                &base,
                step.unwrap_or(config.scale.step),
            );
            print_json(out, &shades)
        }
        Command::Palette {
            hex,
            mode,
            size,
            locked,
        } => {
            let base = factory.generate_color(hex.as_deref(), rng)?;
            let locked = locked
                .iter()
                .map(|h| factory.color(h).map(|c| c.with_locked(true)))
                .collect::<Result<Vec<Color>, _>>()?;
            let palette = generate_palette(
                &factory,
                &base,
                mode.unwrap_or(config.palette.mode),
                size.unwrap_or(config.palette.size),
                &locked,
                rng,
            );
            print_json(out, &palette)
        }
        Command::Name { hex } => {
            let color = factory.color(hex)?;
            print_json(
                out,
                &NameOutput {
                    hex: color.hex().as_str(),
                    name: color.name(),
                },
            )
        }
        Command::Store { dir, action } => {
            let Some(dir) = dir.as_ref().or(config.store.dir.as_ref()) else {
                bail!("no palette directory: pass --dir or set [store] dir");
            };
            let storage = FileStorage::new(dir)?;
            let mut repo = PaletteRepository::new(storage);
            run_store(action, &mut repo, &factory, &config, out, rng)
        }
    }
}

fn run_store<W: Write, R: Rng + ?Sized>(
    action: &StoreAction,
    repo: &mut PaletteRepository<FileStorage>,
    factory: &ColorFactory<'_>,
    config: &SwatchConfig,
    out: &mut W,
    rng: &mut R,
) -> Result<()> {
    match action {
        StoreAction::List => return print_json(out, &repo.load_all()?),
        StoreAction::New => {
            repo.create(factory, rng)?;
        }
        StoreAction::Current => {
            repo.load_current(factory, rng)?;
        }
        StoreAction::Regenerate { mode } => {
            repo.load_current(factory, rng)?;
            repo.regenerate(factory, mode.unwrap_or(config.palette.mode), rng)?;
        }
        StoreAction::Lock { index } => {
            repo.load_current(factory, rng)?;
            repo.toggle_lock(*index)?;
        }
    }
    print_json(out, repo.current()?)
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(filter)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut stdout = io::stdout().lock();
    if let Err(e) = run(&cli, &mut stdout, &mut rand::rng()) {
        eprintln!("swatch: {e:#}");
        process::exit(1);
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────
