// web-server/src/middleware/mod.rs
pub mod wallet_auth;

pub use wallet_auth::WalletAuth;
