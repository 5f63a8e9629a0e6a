use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use kyusei::ninestar::ring::ring_for;
use kyusei::ninestar::solar::SolarTerm;
use kyusei::{Chart, Config, DayStar, Direction, Error, NineStarKi, Ring, Star};

/// Top-level CLI parser for the `kyusei` binary.
#[derive(Debug, Parser)]
#[command(name = "kyusei", version, about = "Nine-Star-Ki (九星気学) charts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Verbose mode (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Year, month and day stars with their rings and element comparison
    Chart {
        /// Date or date-time, defaults to now
        date: Option<String>,
    },
    /// Day star with its solstice anchor
    Day {
        /// Date or date-time, defaults to now
        date: Option<String>,
    },
    /// Ring for a central star
    Ring {
        /// Central star, 1-9
        #[arg(value_parser = clap::value_parser!(u8).range(1..=9))]
        center: u8,
    },
    /// The twelve month-opening solar terms of a year
    Terms { year: i32 },
}

fn main() {
    if let Err(error) = run() {
        eprintln!("kyusei error: {error:#}");
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let config = Config::load().context("failed to load configuration")?;
    let ki = NineStarKi::new(config).context("failed to initialize chart engine")?;

    match &cli.command {
        Commands::Chart { date } => {
            let chart = match date {
                Some(date) => ki.chart(date.as_str()),
                None => ki.chart(chrono::Utc::now()),
            };
            let chart = with_hint(chart, "failed to compute chart")?;
            emit(cli.json, &chart, print_chart)
        }
        Commands::Day { date } => {
            let day = match date {
                Some(date) => ki.daily_nine_star(date.as_str()),
                None => ki.daily_nine_star(chrono::Utc::now()),
            };
            let day = with_hint(day, "failed to compute day star")?;
            emit(cli.json, &day, print_day)
        }
        Commands::Ring { center } => {
            let star = Star::new(*center).context("center must be within 1-9")?;
            emit(cli.json, &ring_for(star), print_ring)
        }
        Commands::Terms { year } => {
            let terms = ki
                .month_boundaries(*year)
                .with_context(|| format!("failed to compute solar terms for {year}"))?;
            emit(cli.json, &terms[..], print_terms)
        }
    }
}

/// Adds `context`, and for an exhausted Jia-Zi search the setting that widens it.
fn with_hint<T>(result: kyusei::Result<T>, context: &'static str) -> anyhow::Result<T> {
    match result {
        Err(error @ Error::AnchorSearchExhausted { .. }) => Err(anyhow::Error::new(error)
            .context("raise jiazi.radius_days (KYUSEI_JIAZI__RADIUS_DAYS) to widen the search")
            .context(context)),
        result => result.context(context),
    }
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("KYUSEI_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn emit<T: Serialize + ?Sized>(json: bool, value: &T, text: fn(&T)) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        text(value);
    }
    Ok(())
}

fn print_chart(chart: &Chart) {
    println!("{} ({})", chart.date, chart.zone);
    println!("year  {}", chart.stars.year);
    println!("month {}", chart.stars.month);
    println!("day   {}", chart.stars.day);
    println!();
    println!("      year month day  comparison");
    for (i, direction) in Direction::ALL.into_iter().enumerate() {
        println!(
            "{:<4}  {}    {}     {}    {}",
            direction.label(),
            chart.rings.year.get(direction).numeral(),
            chart.rings.month.get(direction).numeral(),
            chart.rings.day.get(direction).numeral(),
            chart.comparison[i],
        );
    }
}

fn print_day(day: &DayStar) {
    println!("{} {} ({})", day.date, day.name, day.half_year);
    println!("from {} ({:+} days)", day.reference_jia_zi, day.delta);
}

fn print_ring(ring: &Ring) {
    for (direction, star) in ring.iter() {
        println!("{:<4}  {}", direction.label(), star.numeral());
    }
}

fn print_terms(terms: &[SolarTerm]) {
    for term in terms {
        println!("{}  {} {:>3}°", term.date, term.name, term.longitude);
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use kyusei::Error;

    use super::{Cli, Commands, with_hint};

    #[test]
    fn clap_command_tree_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["kyusei", "chart", "2025-02-26", "--json", "-v"])
            .expect("cli should parse");
        assert!(cli.json);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Commands::Chart { date: Some(ref d) } if d == "2025-02-26"));
    }

    #[test]
    fn ring_center_is_range_checked() {
        assert!(Cli::try_parse_from(["kyusei", "ring", "0"]).is_err());
        assert!(Cli::try_parse_from(["kyusei", "ring", "10"]).is_err());
        assert!(matches!(
            Cli::try_parse_from(["kyusei", "ring", "9"]).map(|cli| cli.command),
            Ok(Commands::Ring { center: 9 })
        ));
    }

    #[test]
    fn exhausted_search_names_the_radius_setting() {
        let exhausted: kyusei::Result<()> = Err(Error::AnchorSearchExhausted {
            target: "2019-12-22".to_owned(),
            radius: 14,
        });
        let message = format!("{:#}", with_hint(exhausted, "failed to compute chart").unwrap_err());
        assert!(message.starts_with("failed to compute chart"), "{message}");
        assert!(message.contains("KYUSEI_JIAZI__RADIUS_DAYS"), "{message}");
        assert!(message.contains("±14 days of 2019-12-22"), "{message}");

        let invalid: kyusei::Result<()> = Err(Error::InvalidDateInput("x".to_owned()));
        let message = format!("{:#}", with_hint(invalid, "failed to compute chart").unwrap_err());
        assert!(!message.contains("KYUSEI_JIAZI__RADIUS_DAYS"), "{message}");
    }
}
