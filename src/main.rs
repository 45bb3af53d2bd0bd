use actix_web::{middleware::Compress, App, HttpServer};
use actix_cors::Cors;
use utoipa_swagger_ui::SwaggerUi;

use comment_board::openapi::ApiDoc;
use comment_board::repo::inmem::InMemRepo;
use comment_board::settings::ServerConfig;
use comment_board::{config, seed, AppState};
use utoipa::OpenApi; // bring trait into scope for ApiDoc::openapi()
use anyhow::Context;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;
use tracing_actix_web::TracingLogger;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load .env automatically only in debug builds.
    if cfg!(debug_assertions) {
        let _ = dotenv::dotenv();
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .init();

    info!("Bootstrapping comment board server");
    let cfg = ServerConfig::from_env();

    let repo = InMemRepo::new();
    info!("Using in-memory repository backend");

    if let Some(path) = &cfg.seed_file {
        let summary = seed::load_seed(&repo, path)
            .await
            .with_context(|| format!("seeding from '{}' failed", path.display()))?;
        info!(
            "Seeded {} comments ({} authors) from '{}'",
            summary.created, summary.authors, path.display()
        );
    }

    let openapi = ApiDoc::openapi();
    let frontend_url = cfg.frontend_url.clone();

    let server = HttpServer::new(move || {
        let cors = {
            let mut c = Cors::default()
                // local dev frontends (CRA on 3000, Vite on 5173)
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
                .allowed_origin("http://localhost:5173")
                .allowed_origin("http://127.0.0.1:5173")
                .allow_any_header()
                .allowed_methods(["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
                .max_age(3600);
            if let Some(front) = &frontend_url {
                c = c.allowed_origin(front);
            }
            c
        };

        App::new()
            .wrap(TracingLogger::default())
            .wrap(Compress::default())
            .wrap(cors)
            .app_data(actix_web::web::Data::new(AppState { repo: Arc::new(repo.clone()) }))
            .configure(config)
            .service(SwaggerUi::new("/docs/{_:.*}").url("/docs/openapi.json", openapi.clone()))
    })
    .bind(cfg.bind_addr.as_str())?;

    info!("Listening on http://{}", cfg.bind_addr);

    server.run().await?;
    Ok(())
}
