use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::{App, HttpServer, middleware, web};

use growth_requirements::auth::gate::SubmissionGate;
use growth_requirements::auth::middleware::require_auth;
use growth_requirements::config::AppConfig;
use growth_requirements::requirements::PgStore;
use growth_requirements::{db, handlers};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = AppConfig::from_env().map_err(std::io::Error::other)?;

    let pool = db::init_pool(&config).await.map_err(std::io::Error::other)?;
    db::run_migrations(&pool).await.map_err(std::io::Error::other)?;
    db::seed_default_profile(&pool, &config.seed_password)
        .await
        .map_err(|e| std::io::Error::other(e.to_string()))?;

    let secret_key = config.session_key();
    let store = web::Data::new(PgStore::new(pool.clone()));
    let gate = web::Data::new(SubmissionGate::new());

    log::info!("Starting server at http://{}", config.bind_addr);

    HttpServer::new(move || {
        let session_mw = SessionMiddleware::builder(
            CookieSessionStore::default(),
            secret_key.clone(),
        )
        .cookie_secure(false)
        .cookie_http_only(true)
        .build();

        App::new()
            .wrap(session_mw)
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(store.clone())
            .app_data(gate.clone())
            .service(actix_files::Files::new("/static", "./static"))
            .route("/login", web::get().to(handlers::auth_handlers::login_page))
            .route("/login", web::post().to(handlers::auth_handlers::login_submit))
            .route("/", web::get().to(|| async {
                actix_web::HttpResponse::SeeOther()
                    .insert_header(("Location", "/requirements"))
                    .finish()
            }))
            .service(
                web::scope("")
                    .wrap(actix_web::middleware::from_fn(require_auth))
                    .route("/logout", web::post().to(handlers::auth_handlers::logout))
                    .configure(handlers::configure_protected::<PgStore>),
            )
            .default_service(web::to(handlers::not_found))
    })
    .bind(config.bind_addr.as_str())?
    .run()
    .await
}
