//! Tactical Telemetry CLI
//!
//! Generates one or many match records, or checks an existing one.
//! JSON goes to stdout or an output directory; logs go to stderr.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use rayon::prelude::*;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tactical_telemetry::{
    record::{export, validate_match_with, verify_replay_with},
    Catalog, MapDef, MapRegistry, MatchRecord, MatchSummary, SimConfig, Simulator, VERSION,
};

/// Output encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Compact JSON document
    Json,
    /// Indented JSON document
    Pretty,
    /// One JSON object per round
    Jsonl,
}

impl Format {
    fn extension(self) -> &'static str {
        match self {
            Format::Json | Format::Pretty => "json",
            Format::Jsonl => "jsonl",
        }
    }
}

/// Deterministic tactical-shooter telemetry generator
#[derive(Parser, Debug)]
#[command(name = "tactical-telemetry")]
#[command(about = "Generate reproducible frame-level match telemetry", long_about = None)]
struct Args {
    /// RNG seed (overrides SIM_SEED and the config file)
    #[arg(short, long)]
    seed: Option<u32>,

    /// Map name
    #[arg(short, long)]
    map: Option<String>,

    /// Rounds per match
    #[arg(short, long)]
    rounds: Option<u32>,

    /// Ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// JSON file with a full simulation configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON file with an extra map definition to register
    #[arg(long)]
    map_file: Option<PathBuf>,

    /// Number of matches; seeds run seed, seed+1, ...
    #[arg(short = 'n', long, default_value = "1")]
    matches: u32,

    /// Output directory (one file per match); stdout if omitted
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Output encoding
    #[arg(short, long, value_enum, default_value = "json")]
    format: Format,

    /// Validate and replay an existing record instead of generating
    #[arg(long)]
    verify: Option<PathBuf>,

    /// Debug-level logging when RUST_LOG is unset
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!("Tactical Telemetry v{}", VERSION);

    let config = load_config(&args)?;
    let mut registry = MapRegistry::builtin();
    if let Some(path) = &args.map_file {
        let map: MapDef = read_json(path)?;
        info!(map = %map.name, "registering map from {}", path.display());
        registry.register(map).context("map file rejected")?;
    }
    let simulator = Simulator::new(config, registry, Catalog::default());

    if let Some(path) = &args.verify {
        return verify(path, &simulator);
    }

    generate(&args, &simulator)
}

/// Defaults, then config file, then environment, then flags.
fn load_config(args: &Args) -> Result<SimConfig> {
    let mut config = match &args.config {
        Some(path) => read_json(path)?,
        None => SimConfig::default(),
    };
    config
        .apply_env(|key| std::env::var(key).ok())
        .context("invalid SIM_* environment variable")?;

    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(map) = &args.map {
        config.map = map.clone();
    }
    if let Some(rounds) = args.rounds {
        config.rounds = rounds;
    }
    if let Some(rate) = args.tick_rate {
        config.tick_rate = rate;
    }
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}

fn generate(args: &Args, simulator: &Simulator) -> Result<()> {
    if args.matches == 0 {
        bail!("--matches must be at least 1");
    }
    if args.matches > 1 && args.out.is_none() {
        bail!("--matches > 1 needs --out <dir>");
    }
    if let Some(dir) = &args.out {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    let base_seed = simulator.config().seed;
    info!(
        seed = base_seed,
        map = %simulator.config().map,
        rounds = simulator.config().rounds,
        tick_rate = simulator.config().tick_rate,
        matches = args.matches,
        "generating"
    );

    // Each match owns its RNG; matches share nothing.
    (0..args.matches).into_par_iter().try_for_each(|offset| -> Result<()> {
        let seed = base_seed.wrapping_add(offset);
        let record = simulator
            .reseeded(seed)
            .run()
            .with_context(|| format!("generation failed for seed {seed}"))?;
        log_summary(&record)?;

        match &args.out {
            Some(dir) => {
                let path = dir.join(format!("match_{seed}.{}", args.format.extension()));
                let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
                write_record(&record, args.format, BufWriter::new(file))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                info!(seed, "wrote {}", path.display());
            }
            None => {
                let stdout = io::stdout();
                write_record(&record, args.format, stdout.lock()).context("failed to write stdout")?;
            }
        }
        Ok(())
    })
}

fn write_record<W: Write>(record: &MatchRecord, format: Format, mut writer: W) -> Result<()> {
    match format {
        Format::Json => export::write_json(record, &mut writer)?,
        Format::Pretty => writer.write_all(export::to_json_pretty(record)?.as_bytes())?,
        Format::Jsonl => writer.write_all(export::to_json_lines(record)?.as_bytes())?,
    }
    if format != Format::Jsonl {
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

fn log_summary(record: &MatchRecord) -> Result<()> {
    let summary = MatchSummary::from_match(record);
    info!(
        seed = record.seed,
        match_id = %record.match_id,
        fingerprint = %record.fingerprint()?,
        won_a = summary.rounds_won_a,
        won_b = summary.rounds_won_b,
        drawn = summary.drawn_rounds,
        kills = summary.kills,
        headshots = summary.headshots,
        frames = summary.frames,
        "match summary"
    );
    Ok(())
}

fn verify(path: &Path, simulator: &Simulator) -> Result<()> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let record = export::from_json(&text).with_context(|| format!("failed to parse {}", path.display()))?;

    let limits = SimConfig {
        tick_rate: record.tick_rate,
        ..simulator.config().clone()
    };
    validate_match_with(&record, &limits, simulator.registry())
        .with_context(|| format!("{} failed validation", path.display()))?;
    info!(match_id = %record.match_id, "record properties hold");

    if verify_replay_with(&record, simulator)? {
        info!(seed = record.seed, fingerprint = %record.fingerprint()?, "replay matches");
        Ok(())
    } else {
        warn!(seed = record.seed, "replay differs from record");
        bail!("{} does not reproduce from seed {}", path.display(), record.seed)
    }
}
