use anyhow::Context;
use phrasecards::{config::Config, db::init_db, AppError, Repository};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing_subscriber::filter::LevelFilter::INFO.into()),
        )
        .init();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let config = Config::from_env().map_err(AppError::from)?;

    let pool = init_db(&config.database_path)
        .await
        .map_err(AppError::Init)?;
    let repo = Repository::new(pool);

    let users = repo
        .find_users_with_phrase(&config.phrase, config.eager_load)
        .await
        .map_err(AppError::from)?;

    tracing::info!(
        phrase = %config.phrase,
        eager_load = config.eager_load,
        users = users.len(),
        round_trips = repo.round_trips(),
        "Query complete"
    );

    let json = serde_json::to_string_pretty(&users).context("failed to serialize users")?;
    println!("{}", json);
    Ok(())
}
