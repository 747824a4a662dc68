use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use habitmon::{
    chart::SeriesMetric,
    config::{AppConfig, GeneratorKind},
    creature::CreatureFetcher,
    habits::{Habit, HabitSet, MoodScore},
    http::ReqwestFetcher,
    render,
    report::{self, CoachStyle},
    session::{CheckIn, ConditionSession},
    weather::{self, City, StaticWeather},
};

#[derive(Parser)]
#[command(author, version, about = "Daily habit check-in with a partner creature")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check in today's habits and render a condition report
    Report(ReportArgs),
    /// List the selectable cities and their offline weather
    Cities,
}

#[derive(Args)]
struct ReportArgs {
    /// 🌅 Wake-up mission done
    #[arg(long)]
    wake: bool,
    /// 💧 Drank enough water
    #[arg(long)]
    hydrate: bool,
    /// 📚 Studied or read
    #[arg(long)]
    study: bool,
    /// 🏃 Exercised
    #[arg(long)]
    exercise: bool,
    /// 😴 Slept well
    #[arg(long)]
    sleep: bool,
    /// Mood from 1 to 10
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(u8).range(1..=10))]
    mood: u8,
    #[arg(long, default_value = "Seoul")]
    city: City,
    /// sparta, mentor or game-master
    #[arg(long, default_value = "mentor")]
    coach: CoachStyle,
    /// Use this creature instead of a random one
    #[arg(long)]
    creature_id: Option<u32>,
    /// Chart completion as a percentage instead of a habit count
    #[arg(long)]
    percent: bool,
    /// Print the card as JSON
    #[arg(long)]
    json: bool,
    /// Override the configured report generator
    #[arg(long, value_enum)]
    generator: Option<GeneratorArg>,
    /// Weather API key, held in memory for this run only
    #[arg(long, env = "HABITMON_WEATHER_API_KEY", hide_env_values = true)]
    weather_api_key: Option<String>,
    /// Chat-completion API key, held in memory for this run only
    #[arg(long, env = "HABITMON_LLM_API_KEY", hide_env_values = true)]
    llm_api_key: Option<String>,
}

#[derive(Clone, Copy, ValueEnum)]
enum GeneratorArg {
    Local,
    Llm,
}

impl From<GeneratorArg> for GeneratorKind {
    fn from(arg: GeneratorArg) -> Self {
        match arg {
            GeneratorArg::Local => GeneratorKind::Local,
            GeneratorArg::Llm => GeneratorKind::Llm,
        }
    }
}

impl ReportArgs {
    fn check_in(&self) -> Result<CheckIn> {
        let habits = HabitSet::new()
            .with(Habit::Wake, self.wake)
            .with(Habit::Hydrate, self.hydrate)
            .with(Habit::Study, self.study)
            .with(Habit::Exercise, self.exercise)
            .with(Habit::Sleep, self.sleep);

        Ok(CheckIn {
            habits,
            mood: MoodScore::new(self.mood)?,
            city: self.city,
            style: self.coach,
            creature_id: self.creature_id,
            metric: if self.percent {
                SeriesMetric::Percent
            } else {
                SeriesMetric::Count
            },
        })
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Report(args) => run_report(args).await?,
        Commands::Cities => list_cities(),
    }
    Ok(())
}

async fn run_report(args: ReportArgs) -> Result<()> {
    let mut config = AppConfig::load()?;
    if let Some(generator) = args.generator {
        config.report.generator = generator.into();
    }
    let check_in = args.check_in()?;

    let http = Arc::new(ReqwestFetcher::from_config(&config.http));
    let creatures = CreatureFetcher::new(http.clone(), config.creature.clone());
    let weather = weather::create_resolver(
        &config.weather.provider,
        http,
        args.weather_api_key.clone(),
    );
    let generator = report::create_generator(&config.report, &config.http, args.llm_api_key.clone())
        .context("failed to set up the report generator")?;
    info!(generator = generator.name(), "Report generator ready");

    let session = ConditionSession::new(creatures, weather, generator);
    let card = session.submit(&check_in).await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&card)?);
    } else {
        print!("{}", render::render_card(&card));
    }
    Ok(())
}

fn list_cities() {
    for city in City::ALL {
        println!("{:<8} {}", city.name(), StaticWeather::lookup(city.name()));
    }
}
