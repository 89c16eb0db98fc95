use anyhow::{Context, Result};
use skynow::notify::LogNotifier;
use skynow::{
    ForecastPipeline, ForecastResult, LocationQuery, Notifier, Severity, SkyNowConfig, SkyNowError,
    format,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let mut include_hourly = false;
    let mut query_parts: Vec<String> = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--hourly" => include_hourly = true,
            _ => query_parts.push(arg),
        }
    }

    if query_parts.is_empty() {
        eprintln!("Usage: skynow [--hourly] <place name | lat,lon>");
        std::process::exit(2);
    }
    let input = query_parts.join(" ");

    let mut config = SkyNowConfig::load().with_context(|| "Failed to load configuration")?;
    config.weather.include_hourly = include_hourly;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone())),
        )
        .init();

    let notifier = LogNotifier;
    let pipeline = ForecastPipeline::new(&config)?;

    let lookup = match LocationQuery::parse(&input) {
        Ok(LocationQuery::Name(name)) => pipeline.resolve_by_name(&name).await,
        Ok(LocationQuery::Coordinates {
            latitude,
            longitude,
        }) => pipeline.resolve_by_coordinates(latitude, longitude).await,
        Err(e) => Err(e),
    };

    match lookup {
        Ok(result) => {
            render(&result, include_hourly);
            Ok(())
        }
        Err(e) => {
            // Lookup failures surface as a transient notification, not a panic
            notifier.notify(Severity::Error, &e.user_message());
            std::process::exit(match e {
                SkyNowError::Validation { .. } => 2,
                _ => 1,
            });
        }
    }
}

/// Render the resolved model as a day list with optional hourly detail. Only
/// the shaped `ForecastResult` is consumed here, never raw provider payloads.
fn render(result: &ForecastResult, include_hourly: bool) {
    println!("Weather {}", result.location.display_name);
    println!();

    for (i, day) in result.daily.iter().enumerate() {
        let label = if i == 0 {
            "Today".to_string()
        } else {
            format::format_weekday(day.date)
        };
        println!(
            "  {}  {:<5}  {}° — {}°",
            day.icon().glyph(),
            label,
            day.temperature_min.floor(),
            day.temperature_max.ceil()
        );

        if include_hourly {
            if let Some(window) = result.hourly_for_day(i) {
                for hour in window {
                    println!(
                        "      {}  {}  {:>3}°  💧 {:.1}mm  💨 {:.0}km/h  🌫 {:.0}%",
                        format::format_clock_time(hour.timestamp),
                        hour.icon().glyph(),
                        hour.temperature.round(),
                        hour.precipitation,
                        hour.wind_speed,
                        hour.humidity_percent
                    );
                }
            }
        }
    }
}
