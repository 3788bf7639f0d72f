mod config;
mod database;
mod models;
mod seeds;
mod services;
mod utils;

use config::Config;
use database::{Disconnected, RedisStore, Store};
use dotenv::dotenv;
use std::backtrace::Backtrace;
use std::fmt::Display;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = Config::from_env();
    log::info!("🚀 Starting user store loader...");
    log::info!("📊 Redis: {}", config.redis_url);

    match RedisStore::connect(&config.redis_url).await {
        Ok(mut store) => run(&mut store, &config).await,
        Err(e) => {
            log::error!("❌ Connection failed: {}", e);
            log::error!("{}", Backtrace::force_capture());
            run(&mut Disconnected, &config).await;
        }
    }

    log::info!("🏁 Done");
}

/// Runs every step in order. A failing step is logged and replaced by its
/// empty result; the sequence always completes.
async fn run<S: Store + ?Sized>(store: &mut S, config: &Config) {
    or_default("load users", seeds::load_users(store, &config.users_file).await);
    or_default("load scores", seeds::load_scores(store, &config.scores_file).await);

    println!("Executing query1: get all attributes.");
    let user = or_default("query1", services::get_user(store, &config.lookup_user_id).await);
    match user {
        Some(fields) => println!("{}", to_json(&fields)),
        None => println!("None"),
    }

    println!("Executing query2: get coordinates.");
    let coords = or_default("query2", services::get_coordinates(store, &config.lookup_user_id).await);
    match coords {
        Some(coords) => println!("{}", to_json(&coords)),
        None => println!("None"),
    }

    println!("Executing query3: users with even ID.");
    let matches = or_default(
        "query3",
        services::even_id_last_names(store, config.scan_start_cursor).await,
    );
    println!(
        "{:?} {:?}",
        &matches.keys[..matches.keys.len().min(10)],
        &matches.last_names[..matches.last_names.len().min(10)]
    );

    println!("Executing query4: females in CN or RU with latitude 40–46.");
    let docs = or_default("query4", services::search_users(store, config).await);
    for doc in &docs {
        println!(
            "{} {} {} {} {}",
            doc.id,
            doc.field("first_name"),
            doc.field("last_name"),
            doc.field("country"),
            doc.field("latitude")
        );
    }

    println!(
        "Executing query5: top {} scores from leaderboard:{}.",
        config.leaderboard_top, config.leaderboard
    );
    let emails = or_default(
        "query5",
        services::top_emails(store, &config.leaderboard, config.leaderboard_top).await,
    );
    for entry in &emails {
        println!("{}: {} (score: {})", entry.member, entry.email, entry.score);
    }
}

fn or_default<T: Default, E: Display>(step: &str, result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| {
        log::error!("❌ {} failed: {}", step, e);
        T::default()
    })
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unprintable: {}>", e))
}
