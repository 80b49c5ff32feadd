use std::{
    fs::OpenOptions,
    net::SocketAddr,
    sync::{Arc, Mutex},
};

use axum::{
    Router,
    extract::{MatchedPath, Request},
};
use axum_server::Handle;
use clap::{ArgGroup, Parser};
use rusqlite::Connection;
use tower_http::trace::TraceLayer;

#[cfg(debug_assertions)]
use tower_livereload::LiveReloadLayer;

use tracing_subscriber::{Layer, filter, layer::SubscriberExt, util::SubscriberInitExt};

use fintrack_rs::{
    AppState, RestTransactionTable, SQLiteTransactionTable, SystemClock, TransactionTable,
    build_router, graceful_shutdown,
};

/// The web server for fintrack_rs.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("backend").required(true).args(["rest_url", "db_path"])))]
struct Args {
    /// Base URL of a PostgREST-style API that holds the transaction table,
    /// e.g. "https://example.supabase.co".
    #[arg(long)]
    rest_url: Option<String>,

    /// The key sent with every request to the REST API.
    #[arg(long, env = "FINTRACK_ACCESS_KEY", hide_env_values = true)]
    access_key: Option<String>,

    /// The name of the transaction table in the REST API.
    #[arg(long, default_value = RestTransactionTable::DEFAULT_TABLE)]
    table: String,

    /// File path to a SQLite database, used instead of the REST API.
    #[arg(long)]
    db_path: Option<String>,

    /// The port to serve the app from.
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// The local timezone used to display dates, as a canonical timezone name.
    #[arg(short, long, default_value = "Etc/UTC")]
    timezone: String,
}

#[tokio::main]
async fn main() {
    setup_logging();

    let args = Args::parse();

    let addr = SocketAddr::from(([127, 0, 0, 1], args.port));

    let table = create_table(&args);
    let state = AppState::new(table, Arc::new(SystemClock), &args.timezone)
        .expect("Could not create the app state");

    // A failed first load is shown in the banner, the server starts regardless.
    tokio::spawn({
        let store = state.store.clone();
        async move {
            if let Err(error) = store.load().await {
                tracing::warn!("Initial load failed: {error}");
            }
        }
    });

    let handle = Handle::new();
    tokio::spawn(graceful_shutdown(handle.clone()));

    let router = add_tracing_layer(build_router(state));

    #[cfg(debug_assertions)]
    let router = router.layer(LiveReloadLayer::new());

    tracing::info!("HTTP server listening on {}", addr);
    axum_server::bind(addr)
        .handle(handle)
        .serve(router.into_make_service())
        .await
        .expect("The server stopped unexpectedly");
}

fn create_table(args: &Args) -> Arc<dyn TransactionTable> {
    if let Some(db_path) = &args.db_path {
        tracing::info!("Using the SQLite database at {db_path}");
        let connection = Connection::open(db_path).expect("Could not open the database");
        let table = SQLiteTransactionTable::new(Arc::new(Mutex::new(connection)))
            .expect("Could not create the transaction table");

        return Arc::new(table);
    }

    let rest_url = args
        .rest_url
        .as_deref()
        .expect("Either --rest-url or --db-path must be set");
    let access_key = args
        .access_key
        .as_deref()
        .expect("The environment variable 'FINTRACK_ACCESS_KEY' must be set");

    tracing::info!("Using the table \"{}\" at {rest_url}", args.table);
    let table = RestTransactionTable::new(rest_url, access_key, &args.table)
        .expect("Could not create the REST client");

    Arc::new(table)
}

fn setup_logging() {
    let stdout_log = tracing_subscriber::fmt::layer().pretty();

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open("debug.log")
        .expect("Could not create log file");

    let debug_log = tracing_subscriber::fmt::layer()
        .pretty()
        .with_writer(Arc::new(log_file));

    tracing_subscriber::registry()
        .with(
            stdout_log
                .with_filter(filter::LevelFilter::INFO)
                .and_then(debug_log)
                .with_filter(filter::LevelFilter::DEBUG),
        )
        .init();
}

fn add_tracing_layer(router: Router) -> Router {
    let tracing_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request| {
            let method = req.method();
            let uri = req.uri();

            let matched_path = req
                .extensions()
                .get::<MatchedPath>()
                .map(|matched_path| matched_path.as_str());

            tracing::debug_span!("request", %method, %uri, matched_path)
        })
        // By default, `TraceLayer` will log 5xx responses but the handlers
        // already log their errors.
        .on_failure(());

    router.layer(tracing_layer)
}
