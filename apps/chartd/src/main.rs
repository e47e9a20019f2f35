use anyhow::Context;
use aphrodite::{BirthData, ChartService, HouseSystem, SystemClock};
use chrono::{NaiveDate, NaiveTime};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser, Debug)]
#[command(author, version, about = "Birth charts, transits and synastry")]
struct Cli {
    /// Settings file (defaults to configs/aphrodite.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// placidus, koch, equal or whole_sign
    #[arg(long, global = true)]
    house_system: Option<String>,

    /// Print cache statistics after the command
    #[arg(long, global = true)]
    stats: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute a natal chart
    Chart(BirthArgs),
    /// Love profile for a natal chart
    Love(BirthArgs),
    /// Personality profile for a natal chart
    Personality(BirthArgs),
    /// Career profile for a natal chart
    Career(BirthArgs),
    /// Transits over a natal chart for one day
    Transits {
        #[command(flatten)]
        birth: BirthArgs,
        /// Day to compute transits for (YYYY-MM-DD)
        #[arg(long)]
        on: NaiveDate,
    },
    /// Compare two people. Each is given as DATE,TIME,LAT,LON,TZ with TIME
    /// left empty when unknown, e.g. 1990-06-15,14:30,40.7128,-74.0060,America/New_York
    Synastry { first: String, second: String },
}

#[derive(Args, Debug)]
struct BirthArgs {
    /// Birth date (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,
    /// Local birth time (HH:MM); omit when unknown
    #[arg(long)]
    time: Option<String>,
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,
    /// IANA timezone, e.g. Europe/Paris
    #[arg(long)]
    tz: String,
}

impl BirthArgs {
    fn to_birth_data(&self) -> anyhow::Result<BirthData> {
        let time = self.time.as_deref().map(parse_time).transpose()?;
        Ok(BirthData::new(self.date, time, self.lat, self.lon, &self.tz)?)
    }
}

fn parse_time(text: &str) -> anyhow::Result<NaiveTime> {
    NaiveTime::parse_from_str(text.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(text.trim(), "%H:%M:%S"))
        .with_context(|| format!("Invalid time '{}', expected HH:MM", text))
}

fn parse_birth_spec(spec: &str) -> anyhow::Result<BirthData> {
    let parts: Vec<&str> = spec.split(',').map(str::trim).collect();
    let [date, time, lat, lon, tz] = parts.as_slice() else {
        anyhow::bail!("Expected DATE,TIME,LAT,LON,TZ but got '{}'", spec);
    };
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").with_context(|| format!("Invalid date '{}'", date))?;
    let time = if time.is_empty() { None } else { Some(parse_time(time)?) };
    let lat: f64 = lat.parse().with_context(|| format!("Invalid latitude '{}'", lat))?;
    let lon: f64 = lon.parse().with_context(|| format!("Invalid longitude '{}'", lon))?;
    Ok(BirthData::new(date, time, lat, lon, tz)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => aphrodite_config::load_settings_from(path)?,
        None => aphrodite_config::load_settings()?,
    };
    let house_system = match &cli.house_system {
        Some(name) => name.parse::<HouseSystem>().map_err(anyhow::Error::msg)?,
        None => settings.chart.default_house_system,
    };
    log::debug!("Using {} houses", house_system);

    let service = ChartService::in_memory(settings.chart, settings.cache, settings.confidence, Arc::new(SystemClock));

    let output = match &cli.command {
        Command::Chart(birth) => {
            serde_json::to_value(service.get_or_compute_chart(&birth.to_birth_data()?, house_system).await?)?
        }
        Command::Love(birth) => serde_json::to_value(service.love_profile(&birth.to_birth_data()?, house_system).await?)?,
        Command::Personality(birth) => {
            serde_json::to_value(service.personality_profile(&birth.to_birth_data()?, house_system).await?)?
        }
        Command::Career(birth) => {
            serde_json::to_value(service.career_profile(&birth.to_birth_data()?, house_system).await?)?
        }
        Command::Transits { birth, on } => serde_json::to_value(
            service
                .get_or_compute_transits(&birth.to_birth_data()?, house_system, *on)
                .await?,
        )?,
        Command::Synastry { first, second } => {
            let first = parse_birth_spec(first).context("first person")?;
            let second = parse_birth_spec(second).context("second person")?;
            serde_json::to_value(service.synastry(&first, &second, house_system).await?)?
        }
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    if cli.stats {
        let stats = service.cache_stats_report().await?;
        println!("{}", serde_json::to_string_pretty(&stats)?);
    }
    Ok(())
}
