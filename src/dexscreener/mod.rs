pub mod client;
pub mod models;
pub mod price_service;
pub mod token_repository;

pub use client::DexScreenerClient;
pub use price_service::{DexScreenerPriceService, PriceService};
pub use token_repository::{DexScreenerTokenRepository, TokenRepository};
