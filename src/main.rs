use airgauge::aqi::{AqiEngine, PollutantReading};
use airgauge::config::{CacheConfig, ProviderConfig, DEFAULT_CANDIDATE_LIMIT};
use airgauge::location::{compose_query, LocationCache, LocationResolver, OpenWeatherGeocoder};
use airgauge::measurement::OpenWeatherPollution;
use airgauge::report::{self, AqiReport};
use airgauge::server::{self, AppState};
use clap::Parser;
use std::fmt::Display;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// airgauge: US EPA Air Quality Index for any place
///
/// Looks up a place, fetches current pollutant concentrations and reports the
/// overall AQI with per-pollutant sub-indices. JSON goes to stdout, a short
/// summary to stderr.
///
/// Examples:
///   airgauge Paris
///   airgauge --city Springfield --state IL --country US
///   airgauge --lat 48.8566 --lon 2.3522
///   airgauge --reading pm2_5=10,pm10=20,co=200
///   airgauge --serve --port 3000
#[derive(Parser)]
#[command(name = "airgauge", version, about, long_about = None)]
struct Cli {
    /// Place name (positional). Example: airgauge Paris
    #[arg(index = 1)]
    city_positional: Option<String>,

    /// Place name (named). Example: --city "New York"
    #[arg(long)]
    city: Option<String>,

    /// State or region to narrow the place name.
    #[arg(long)]
    state: Option<String>,

    /// Country code (ISO 3166-1 alpha-2) to narrow the place name.
    #[arg(long)]
    country: Option<String>,

    /// Latitude (-90 to 90).
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Longitude (-180 to 180).
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Compute from concentrations in µg/m³ without any network access.
    /// Example: --reading pm2_5=10,pm10=20,co=200
    #[arg(long, value_parser = PollutantReading::parse_pairs)]
    reading: Option<PollutantReading>,

    /// List the geocoding candidates for the place instead of computing.
    #[arg(long)]
    candidates: bool,

    /// Maximum candidates requested from the geocoder.
    #[arg(long, default_value_t = DEFAULT_CANDIDATE_LIMIT)]
    limit: usize,

    /// Provider API key.
    #[arg(long, env = "AIRGAUGE_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Geocoding endpoint.
    #[arg(long, env = "AIRGAUGE_GEOCODING_URL", default_value = airgauge::config::DEFAULT_GEOCODING_URL)]
    geocoding_url: String,

    /// Air pollution endpoint.
    #[arg(long, env = "AIRGAUGE_POLLUTION_URL", default_value = airgauge::config::DEFAULT_POLLUTION_URL)]
    pollution_url: String,

    /// Upstream request timeout in seconds.
    #[arg(long, env = "AIRGAUGE_TIMEOUT_SECS", default_value_t = airgauge::config::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Cap the location cache at this many entries.
    #[arg(long, env = "AIRGAUGE_CACHE_CAPACITY", value_parser = clap::value_parser!(u64).range(1..))]
    cache_capacity: Option<u64>,

    /// Expire location cache entries after this many seconds.
    #[arg(long, env = "AIRGAUGE_CACHE_TTL_SECS")]
    cache_ttl_secs: Option<u64>,

    /// Run the HTTP API instead of a one-shot lookup.
    #[arg(long)]
    serve: bool,

    /// Bind address for --serve.
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for --serve.
    #[arg(long, default_value_t = 3000)]
    port: u16,

    /// Log filter when RUST_LOG is unset (e.g. debug, airgauge=trace).
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn provider_config(&self) -> ProviderConfig {
        ProviderConfig {
            geocoding_url: self.geocoding_url.clone(),
            pollution_url: self.pollution_url.clone(),
            api_key: self.api_key.clone().filter(|k| !k.trim().is_empty()),
            timeout: Duration::from_secs(self.timeout_secs),
            candidate_limit: self.limit,
        }
    }

    fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            capacity: self.cache_capacity.map(|c| c as usize),
            ttl: self.cache_ttl_secs.map(Duration::from_secs),
        }
    }

    /// Place query from --city or the positional argument plus the hints.
    fn place_query(&self) -> Option<String> {
        let city = self.city.as_deref().or(self.city_positional.as_deref())?;
        Some(compose_query(city, self.state.as_deref(), self.country.as_deref()))
    }
}

fn init_logging(cli: &Cli) {
    let default = if cli.serve { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level.as_deref().unwrap_or(default)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn fail(err: impl Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => fail(e),
    }
}

fn main() {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("Warning: ignoring .env: {}", e);
        }
    }

    let cli = Cli::parse();
    init_logging(&cli);

    let providers = cli.provider_config();
    let engine = AqiEngine::new();
    let resolver = LocationResolver::with_cache(
        Box::new(OpenWeatherGeocoder::new(&providers)),
        LocationCache::with_config(cli.cache_config()),
    )
    .with_limit(providers.candidate_limit);

    // ── Server mode ─────────────────────────────────────────────

    if cli.serve {
        let state = AppState::new(resolver, Box::new(OpenWeatherPollution::new(&providers)));
        let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| fail(e));
        if let Err(e) = runtime.block_on(server::start(state, &cli.host, cli.port)) {
            fail(format!("Server error on {}:{}: {}", cli.host, cli.port, e));
        }
        return;
    }

    // ── Offline reading ─────────────────────────────────────────

    if let Some(reading) = cli.reading.clone() {
        let report = AqiReport::from_reading(&engine, reading).unwrap_or_else(|e| fail(e));
        eprint!("{}", report::render_summary(&report));
        print_json(&report);
        return;
    }

    // ── Resolve location ────────────────────────────────────────

    let mut resolver = resolver;
    let location = match (cli.place_query(), cli.lat, cli.lon) {
        (Some(query), _, _) if cli.candidates => {
            let found = resolver.search(&query).unwrap_or_else(|e| fail(e));
            for (i, c) in found.iter().enumerate() {
                eprintln!("  {}. {}  ({:.4}, {:.4})", i + 1, c.display_line(), c.lat, c.lon);
            }
            print_json(&found);
            return;
        }
        (Some(query), _, _) => resolver.resolve(&query).unwrap_or_else(|e| fail(e)),
        (None, Some(lat), Some(lon)) => LocationResolver::from_manual(lat, lon).unwrap_or_else(|e| fail(e)),
        _ => {
            eprintln!("Error: No location specified.");
            eprintln!();
            eprintln!("Usage:");
            eprintln!("  airgauge Paris");
            eprintln!("  airgauge --city Springfield --state IL --country US");
            eprintln!("  airgauge --lat 48.8566 --lon 2.3522");
            eprintln!("  airgauge --reading pm2_5=10,pm10=20");
            std::process::exit(1);
        }
    };
    debug!(location = %location.display_line(), "resolved");

    // ── Measure and compute ─────────────────────────────────────

    let pollution = OpenWeatherPollution::new(&providers);
    let report = report::assess(&location, &pollution, &engine).unwrap_or_else(|e| fail(e));

    eprint!("{}", report::render_summary(&report));
    print_json(&report);
}
