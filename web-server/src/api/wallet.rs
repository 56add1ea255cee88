// web-server/src/api/wallet.rs
use actix_web::{get, post, web, HttpResponse, Responder};
use common::auth::CallerIdentity;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct EchoResponse {
    wallet_address: String,
    payload: serde_json::Value,
}

// Return the verified caller
#[get("/me")]
pub async fn whoami(identity: web::ReqData<CallerIdentity>) -> impl Responder {
    HttpResponse::Ok().json(identity.into_inner())
}

// Write-type endpoint standing in for the CRUD handlers
#[post("/echo")]
pub async fn echo(
    identity: web::ReqData<CallerIdentity>,
    payload: web::Json<serde_json::Value>,
) -> impl Responder {
    tracing::info!("Echo request from wallet {}", identity.wallet_address());

    HttpResponse::Ok().json(EchoResponse {
        wallet_address: identity.into_inner().into_wallet_address(),
        payload: payload.into_inner(),
    })
}
