use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use starnav::cli;
use starnav::engine::{DeepLink, NavEngine};
use starnav::io::catalog::load_catalog;
use starnav::io::store::JsonFileStore;
use starnav::services::session::Session;

const DEFAULT_STORE_PATH: &str = "data/starnav-store.json";

fn main() {
    let args = cli::args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("*** STARNAV ***");
    println!();

    let catalog = match load_catalog(args.catalog.as_deref()) {
        Ok(catalog) => catalog,
        Err(err) => {
            eprintln!("{}", err);
            process::exit(1);
        }
    };

    let store_path = args
        .data
        .clone()
        .unwrap_or_else(|| DEFAULT_STORE_PATH.into());
    let store = JsonFileStore::open(store_path);

    let seed = args.seed.unwrap_or_else(|| {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    });

    let mut engine = NavEngine::new(catalog, Box::new(store), seed);
    let view = engine.startup_view(&DeepLink {
        system: args.system.clone(),
        planet: args.planet.clone(),
        custom: args.custom.clone(),
    });

    let mut session = Session::new(engine, view);
    if let Err(err) = session.run() {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
