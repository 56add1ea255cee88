// web-server/src/api/mod.rs
pub mod wallet;

use actix_web::{get, web, HttpResponse, Responder};
use common::auth::AuthPipeline;
use common::Config;
use serde_json::json;

use crate::middleware::WalletAuth;

#[get("")]
pub async fn api_index(config: web::Data<Config>) -> impl Responder {
    HttpResponse::Ok().json(json!({
        "name": "Wallet Signature Gate API",
        "version": env!("CARGO_PKG_VERSION"),
        "auth_headers": {
            "signature": config.auth.signature_header,
            "message": config.auth.message_header,
            "public_key": config.auth.public_key_header,
        }
    }))
}

/// Public routes under /api, wallet routes behind the signature gate
pub fn configure(cfg: &mut web::ServiceConfig, pipeline: AuthPipeline) {
    cfg.service(
        web::scope("/api")
            .service(api_index)
            .service(
                web::scope("/wallet")
                    .wrap(WalletAuth::new(pipeline))
                    .service(wallet::whoami)
                    .service(wallet::echo)
            )
    );
}
