//! Print a bearer token for the catalog API.
//!
//! Usage: `issue-token <SUBJECT> [TTL_MINUTES]`. Reads `JWT_SECRET` and
//! `TOKEN_TTL_MINUTES` like the server does.

use dotenvy::dotenv;

use jewelry_catalog::auth::issue_token;
use jewelry_catalog::config::ServerConfig;

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));
    dotenv().ok();

    let mut args = std::env::args().skip(1);
    let Some(subject) = args.next() else {
        eprintln!("usage: issue-token <SUBJECT> [TTL_MINUTES]");
        std::process::exit(2);
    };

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let ttl = match args.next() {
        Some(raw) => match raw.parse::<i64>() {
            Ok(ttl) if ttl > 0 => ttl,
            _ => {
                log::error!("TTL must be a positive number of minutes, got `{raw}`");
                std::process::exit(2);
            }
        },
        None => config.auth.token_ttl_minutes,
    };

    match issue_token(&subject, ttl, &config.auth) {
        Ok(token) => println!("{token}"),
        Err(e) => {
            log::error!("Failed to sign token: {e}");
            std::process::exit(1);
        }
    }
}
