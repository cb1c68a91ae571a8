use clap::Parser;
use std::{error::Error, path::PathBuf};

use type_rangers::{
    autoplay::TypistProfile,
    config::{ConfigStore, FileConfigStore},
    soak::{run_soak, SoakOptions, SoakReport},
    words::{WordDifficulty, WordPools},
};

/// falling-word typing arcade engine, soaked headlessly by a simulated typist
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Plays seeded type-rangers sessions with a simulated typist and reports score, WPM and survival time. Useful for tuning spawn pacing, combo and freeze settings without a screen."
)]
pub struct Cli {
    /// config file to use instead of the platform config directory
    #[clap(short = 'c', long)]
    config: Option<PathBuf>,

    /// directory with short.json, medium.json and long.json word lists
    #[clap(short = 'w', long)]
    words_dir: Option<PathBuf>,

    /// word length enemies spawn with (overrides the config file)
    #[clap(short = 'd', long, value_enum)]
    difficulty: Option<WordDifficulty>,

    /// seed of the first run; later runs count up from it
    #[clap(long, default_value_t = 0)]
    seed: u64,

    /// number of sessions to play
    #[clap(short = 'n', long, default_value_t = 10)]
    runs: u32,

    /// stop a session after this many seconds even if lives remain
    #[clap(short = 's', long, default_value_t = 300)]
    max_secs: u64,

    /// frame length in milliseconds
    #[clap(long, default_value_t = 16, value_parser = clap::value_parser!(u64).range(1..))]
    frame_ms: u64,

    /// typing speed of the simulated typist, in characters per second
    #[clap(long, default_value_t = 6.0, value_parser = parse_cps)]
    cps: f64,

    /// chance of a mistyped letter that gets backspaced
    #[clap(long, default_value_t = 0.05, value_parser = parse_probability)]
    error_rate: f64,

    /// print the report as JSON
    #[clap(long)]
    json: bool,

    /// write the effective config to the config file and exit
    #[clap(long)]
    save_config: bool,
}

fn parse_finite(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|err| format!("`{s}` is not a number: {err}"))?;
    if !value.is_finite() {
        return Err(format!("`{s}` is not a finite number"));
    }
    Ok(value)
}

fn parse_cps(s: &str) -> Result<f64, String> {
    let value = parse_finite(s)?;
    if value < 0.0 {
        return Err(format!("`{s}` must not be negative"));
    }
    Ok(value)
}

fn parse_probability(s: &str) -> Result<f64, String> {
    let value = parse_finite(s)?;
    if !(0.0..=1.0).contains(&value) {
        return Err(format!("`{s}` is not between 0 and 1"));
    }
    Ok(value)
}

impl Cli {
    fn soak_options(&self) -> SoakOptions {
        SoakOptions {
            runs: self.runs,
            base_seed: self.seed,
            max_secs: self.max_secs,
            frame_ms: self.frame_ms,
            typist: TypistProfile {
                chars_per_second: self.cps,
                error_rate: self.error_rate,
                ..TypistProfile::default()
            },
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let store = match &cli.config {
        Some(path) => FileConfigStore::with_path(path),
        None => FileConfigStore::new(),
    };
    let mut config = store.load();
    if let Some(difficulty) = cli.difficulty {
        config.spawn_difficulty = difficulty;
    }
    config.validate()?;

    if cli.save_config {
        store.save(&config)?;
        println!("saved config to {}", store.path().display());
        return Ok(());
    }

    let pools = match &cli.words_dir {
        Some(dir) => WordPools::from_dir(dir)?,
        None => WordPools::embedded()?,
    };

    let report = run_soak(&config, &pools, &cli.soak_options())?;
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}

fn print_report(report: &SoakReport) {
    println!(
        "{:>4} {:>8} {:>7} {:>5} {:>6} {:>8} {:>5}",
        "run", "seed", "score", "wpm", "words", "survived", "lives"
    );
    for run in &report.runs {
        println!(
            "{:>4} {:>8} {:>7} {:>5} {:>6} {:>7}s {:>5}",
            run.run,
            run.seed,
            run.score,
            run.wpm,
            run.words_typed,
            run.survived_ms / 1000,
            run.lives_left
        );
    }

    let fmt = |v: Option<f64>| v.map_or("-".to_string(), |v| format!("{v:.1}"));
    println!();
    println!(
        "score {} ± {}, wpm {} ± {}, survived {}s on average",
        fmt(report.mean_score),
        fmt(report.std_dev_score),
        fmt(report.mean_wpm),
        fmt(report.std_dev_wpm),
        fmt(report.mean_survived_secs)
    );
}
