use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use log::info;

use bauxite_planner::config::ServerConfig;
use bauxite_planner::domain::solver_factory::create_solver;
use bauxite_planner::handlers::{configure, AppState};

fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServerConfig::from_env();

    // Keep the guard alive for the whole run so queued events are flushed
    let _sentry = config.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((
            dsn,
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    actix_web::rt::System::new().block_on(run(config))
}

async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(AppState::new(create_solver(config.solver)));
    let (form_limit, json_limit) = (config.form_limit, config.json_limit);

    info!(
        "Starting server on http://{}:{} using {}",
        config.bind_addr,
        config.port,
        state.solver.name()
    );
    HttpServer::new(move || {
        App::new()
            .wrap(sentry_actix::Sentry::new())
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(|cfg| configure(cfg, form_limit, json_limit))
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}
