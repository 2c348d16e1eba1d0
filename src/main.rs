use database::{DatabaseGenerator, DatabaseLoader, InMemoryTournamentStore, ReferenceData};
use engine::utils::TimeEstimation;
use engine::{StandingsReport, TournamentForecast, TournamentService};
use env_logger::Env;
use log::{debug, info};
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use tokio::task::JoinSet;

#[cfg(target_os = "linux")]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or(default)
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let seed = env::var("SEED")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(rand_seed);
    let tournaments: u32 = env_or("TOURNAMENTS", 1);
    let forecast_runs: usize = env_or("FORECAST_RUNS", 0);

    let (database, estimated) = TimeEstimation::estimate(DatabaseLoader::load);
    let database = database?;

    info!("database loaded: {} ms", estimated);

    let data = Arc::new(DatabaseGenerator::generate(&database));

    info!(
        "seed {}, {} tournament(s), {} teams",
        seed,
        tournaments,
        data.teams.len()
    );

    let service = Arc::new(TournamentService::with_logging(
        InMemoryTournamentStore::new(),
        &data.settings,
        seed,
    ));

    let mut tasks = JoinSet::new();

    for number in 1..=tournaments {
        let service = Arc::clone(&service);
        let data = Arc::clone(&data);

        tasks.spawn_blocking(move || -> engine::Result<u32> {
            let name = format!("World Cup #{}", number);
            let id = service.create_tournament(&name, data.teams.clone(), data.formats.clone())?;

            service.run_to_completion(id)?;

            Ok(id)
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let id = joined??;
        let tournament = service.tournament(id)?;

        for confederation in &tournament.confederations {
            debug!("{}", StandingsReport::new(confederation));
        }
    }

    if forecast_runs > 0 {
        forecast(&data, forecast_runs, seed).await?;
    }

    Ok(())
}

async fn forecast(data: &Arc<ReferenceData>, runs: usize, seed: u64) -> color_eyre::Result<()> {
    let data = Arc::clone(data);

    let forecast = tokio::task::spawn_blocking(move || {
        TournamentForecast::run(&data.teams, &data.formats, &data.settings, runs, seed)
    })
    .await??;

    for entry in forecast.favourites(10) {
        info!(
            "📈 {:<24} {:>5.1}% titles, {} finals",
            entry.team_name,
            entry.probability * 100.0,
            entry.finals
        );
    }

    Ok(())
}

fn rand_seed() -> u64 {
    engine::SeededRandom::from_entropy().seed()
}
