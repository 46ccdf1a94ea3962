use std::{error::Error, sync::Arc};

use env_logger::Env;
use hyper::server::conn::http1;
use hyper_util::rt::TokioIo;
use log::{error, info, warn};
use tokio::net::TcpListener;

use open_restaurants::{
    config::{Backend, Config},
    loader::loader::load_csv,
    parser::hours::HoursParser,
    server::server::Server,
    store::{memory::MemoryStore, sqlite::SqliteStore, store::ScheduleStore},
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    info!("Starting with {:?}", config);

    let store: Arc<dyn ScheduleStore> = match config.backend {
        Backend::Sqlite => Arc::new(SqliteStore::open(&config.database_path)?),
        Backend::Memory => Arc::new(MemoryStore::new()),
    };

    let report = load_csv(&config.csv_path, &HoursParser::new(), config.strict_load)?;
    for failure in &report.failures {
        warn!(
            "Not serving '{}' (line {}): {}",
            failure.name, failure.line, failure.error
        );
    }
    store.bulk_load(report.records)?;
    info!("{} restaurants loaded", store.len()?);

    let server = Server::setup(store);
    let listener = TcpListener::bind(config.bind_address()).await?;
    info!("Listening on http://{}", config.bind_address());

    loop {
        let (stream, _) = match listener.accept().await {
            Ok(connection) => connection,
            Err(err) => {
                error!("Could not accept connection: {}", err);
                continue;
            }
        };
        let io = TokioIo::new(stream);
        let server_clone = server.clone();
        tokio::spawn(async move {
            if let Err(err) = http1::Builder::new()
                .serve_connection(io, server_clone)
                .await
            {
                error!("{}", err);
            }
        });
    }
}
