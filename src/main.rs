use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use dotenvy::dotenv;

use jewelry_catalog::config::ServerConfig;
use jewelry_catalog::db::establish_connection_pool;
use jewelry_catalog::repository::DieselRepository;
use jewelry_catalog::routes;
use jewelry_catalog::storage::LocalImageStore;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    dotenv().ok(); // Load .env file

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };
    let repo = DieselRepository::new(pool);

    if let Err(e) = std::fs::create_dir_all(&config.storage_root) {
        log::error!("Failed to create storage root {}: {e}", config.storage_root);
        std::process::exit(1);
    }
    let store = LocalImageStore::new(&config.storage_root);

    let storage_root = config.storage_root.clone();
    let auth_config = config.auth.clone();

    log::info!("Listening on {}:{}", config.address, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/storage", &storage_root))
            .configure(routes::configure)
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(store.clone()))
            .app_data(web::Data::new(auth_config.clone()))
    })
    .bind((config.address.clone(), config.port))?
    .run()
    .await
}
