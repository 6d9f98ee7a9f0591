use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{error, info};

use par_advisor::io::demand::{generate_sample_dataset, SampleSpec, UsagePattern};
use par_advisor::io::reporting::{write_report, ReportFormat};
use par_advisor::{telemetry, Dataset, RecommendConfig, Recommender};

#[derive(Debug, Parser)]
#[command(name = "par-advisor", about = "PAR level recommendations from daily usage")]
struct Cli {
    /// Emit logs as JSON lines.
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Recommend PAR levels for every item stocked at a site.
    Recommend(RecommendArgs),
    /// Write a synthetic items/site_items/usage dataset.
    Simulate(SimulateArgs),
}

#[derive(Debug, clap::Args)]
struct RecommendArgs {
    /// Site code, e.g. SLC-660.
    #[arg(long)]
    site: String,

    /// Directory holding items.csv, site_items.csv and usage.csv.
    #[arg(long, env = "PAR_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[arg(long, env = "PAR_SERVICE_LEVEL", default_value_t = 0.98)]
    service_level: f64,

    #[arg(long, env = "PAR_REVIEW_DAYS", default_value_t = 7)]
    review_days: u32,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Write the report here instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
struct SimulateArgs {
    #[arg(long, default_value = "data")]
    out_dir: PathBuf,

    #[arg(long, default_value = "SLC-660")]
    site: String,

    #[arg(long, default_value_t = 12)]
    items: usize,

    #[arg(long, default_value_t = 90)]
    days: usize,

    /// First day of the generated history (YYYY-MM-DD).
    #[arg(long, default_value = "2024-01-01")]
    start: NaiveDate,

    #[arg(long, value_enum, default_value_t = Pattern::Intermittent)]
    pattern: Pattern,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Pattern {
    Intermittent,
    Constant,
    Step,
}

impl From<Pattern> for UsagePattern {
    fn from(pattern: Pattern) -> Self {
        match pattern {
            Pattern::Intermittent => UsagePattern::Intermittent,
            Pattern::Constant => UsagePattern::Constant,
            Pattern::Step => UsagePattern::Step,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Csv,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Json => ReportFormat::Json,
            Format::Csv => ReportFormat::Csv,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    telemetry::init(cli.json_logs);

    let outcome = match cli.command {
        Command::Recommend(args) => recommend(args),
        Command::Simulate(args) => simulate(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run failed");
            ExitCode::FAILURE
        }
    }
}

fn recommend(args: RecommendArgs) -> Result<(), Box<dyn std::error::Error>> {
    let dataset = Dataset::load_dir(&args.data_dir)?.for_site(&args.site);

    let config = RecommendConfig {
        service_level: args.service_level,
        review_period_days: args.review_days,
    };
    info!(
        site = %args.site,
        service_level = config.service_level,
        review_days = config.review_period_days,
        "generating recommendations"
    );

    let response = Recommender::new(config).recommend_site(&dataset, &args.site, Utc::now())?;

    match args.output {
        Some(path) => {
            let file = File::create(&path)?;
            write_report(BufWriter::new(file), &response, args.format.into())?;
        }
        None => write_report(io::stdout().lock(), &response, args.format.into())?,
    }

    Ok(())
}

fn simulate(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let spec = SampleSpec {
        site_id: args.site,
        items: args.items,
        days: args.days,
        start: args.start,
        pattern: args.pattern.into(),
    };

    let mut rng = StdRng::seed_from_u64(args.seed);
    let dataset = generate_sample_dataset(&mut rng, &spec)?;
    dataset.write_dir(&args.out_dir)?;

    info!(
        dir = %args.out_dir.display(),
        items = dataset.items.len(),
        usage_rows = dataset.usage.len(),
        "sample dataset written"
    );
    Ok(())
}
