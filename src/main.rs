use airline_reservation_system::build_rocket;
use airline_reservation_system::config::AppConfig;
use airline_reservation_system::db::Database;
use airline_reservation_system::services::user_service::UserService;

#[rocket::launch]
async fn rocket() -> _ {
    let config = AppConfig::from_env().expect("Failed to load configuration");

    // Connect to the database
    let database = Database::new(&config.database_url)
        .await
        .expect("Failed to connect to database");
    database
        .init_schema()
        .await
        .expect("Failed to initialize database schema");

    if let Some(password) = &config.bootstrap_admin_password {
        let user_service = UserService::new(
            database.get_pool().clone(),
            config.jwt_secret.clone(),
            config.token_ttl_hours,
        );
        user_service
            .ensure_admin(&config.bootstrap_admin_nickname, password)
            .await
            .expect("Failed to create bootstrap administrator");
    }

    build_rocket(config, database.pool)
}
