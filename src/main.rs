use actix_web::{middleware::Logger, web, App, HttpServer};

use langquiz_server::{
    app_state::AppState, config::Config, handlers, middleware::SessionCookieMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if let Err(err) = config.validate() {
        log::error!("{}", err);
        std::process::exit(1);
    }

    let state = AppState::new(config.clone()).map_err(|e| std::io::Error::other(e.to_string()))?;
    let bind = (config.web_server_host.clone(), config.web_server_port);

    log::info!(
        "Starting quiz server on http://{}:{} (model: {})",
        bind.0,
        bind.1,
        config.completion_model
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(SessionCookieMiddleware)
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind(bind)?
    .run()
    .await
}
