// web-server/src/main.rs
mod api;
mod middleware;
#[cfg(test)]
mod test_support;

use std::io;
use actix_web::{web, App, HttpServer, Responder, HttpResponse, get};
use common::auth::AuthPipeline;
use common::{setup_tracing, Config};

#[get("/")]
async fn index() -> impl Responder {
    HttpResponse::Ok().body("Wallet Signature Gate Web Server")
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = setup_tracing() {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }

    // Load configuration
    let config = Config::from_env();

    let header_names = config.auth.header_names().map_err(|e| {
        tracing::error!("Invalid auth configuration: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e.to_string())
    })?;
    let pipeline = AuthPipeline::new(header_names);

    // Save address before moving config into web::Data
    let server_addr = config.web_server_addr.clone();

    tracing::info!("Starting Web Server on {}", server_addr);
    tracing::info!(
        "Wallet routes expect headers {}, {}, {}",
        config.auth.signature_header,
        config.auth.message_header,
        config.auth.public_key_header
    );

    let config_data = web::Data::new(config);

    HttpServer::new(move || {
        App::new()
            .app_data(config_data.clone())
            .service(index)
            .configure(|cfg| api::configure(cfg, pipeline.clone()))
    })
    .bind(&server_addr)?
    .run()
    .await
}
