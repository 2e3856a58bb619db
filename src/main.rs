use farebook::config::Config;
use farebook::db::PgStore;
use farebook::engine::Engine;
use farebook::error::Error;
use farebook::server::serve;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let fares = config.fare_table()?;

    let store = PgStore::new(&config.database_url, config.database_max_connections).await?;
    let engine = Engine::new(store, fares);

    serve(engine, &config).await
}
