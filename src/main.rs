use clap::Parser;
use ride_radar::adapters::seed;
use ride_radar::utils::monitor::RunMonitor;
use ride_radar::utils::{logger, error::ErrorSeverity};
use ride_radar::{
    CliConfig, DistanceResult, OsrmClient, ProximityOrchestrator, Result, Settings,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_service_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting ride-radar");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let monitor = RunMonitor::new(settings.monitoring);
    if settings.monitoring {
        tracing::info!("🔍 Process monitoring enabled");
    }

    match run(&config, &settings).await {
        Ok(result) => {
            let stamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
            if result.is_unreachable() {
                tracing::warn!("No road route exists to the nearest item");
                println!("🚧 [{}] No road route exists to the nearest item", stamp);
            } else {
                tracing::info!(
                    "✅ Resolved: {:.0} m, {:.0} s by road",
                    result.distance_meters,
                    result.duration_seconds
                );
                println!(
                    "✅ [{}] Nearest item is {:.2} km away, about {:.1} min by road",
                    stamp,
                    result.distance_meters / 1000.0,
                    result.duration_seconds / 60.0
                );
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Resolution failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    if let Some(stats) = monitor.get_stats() {
        tracing::info!(
            "📊 Run took {:.2?}, process memory {} MB",
            stats.elapsed_time,
            stats.memory_usage_mb
        );
    }

    Ok(())
}

async fn run(config: &CliConfig, settings: &Settings) -> Result<DistanceResult> {
    let routing = OsrmClient::new(&settings.routing)?;

    // Direct mode exercises the routing adapter alone; no items involved.
    if let Some((to_lat, to_lon)) = config.direct_target() {
        let orchestrator = ProximityOrchestrator::new(
            ride_radar::InMemoryCandidateSource::new(vec![]),
            routing,
            settings.selection.clone(),
        );
        return orchestrator
            .direct_distance(config.lat, config.lon, to_lat, to_lon)
            .await;
    }

    let source = seed::source_from_csv(&settings.seed_path)?;
    tracing::info!(
        "Item store seeded with {} items from {}",
        source.len(),
        settings.seed_path
    );

    let orchestrator = ProximityOrchestrator::new(source, routing, settings.selection.clone());
    orchestrator.resolve_nearest(config.lat, config.lon).await
}
