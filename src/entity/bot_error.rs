#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("This token is already in your watchlist")]
    DuplicateToken,

    #[error("Symbol {0} is already tracked for another contract address")]
    DuplicateSymbol(String),

    #[error("Invalid contract address or token not found")]
    TokenNotFound,

    #[error("Token symbol not found in your watchlist: {0}")]
    SymbolNotInWatchlist(String),

    #[error("Invalid notification format: {0}")]
    InvalidNotificationFormat(String),

    #[error("Invalid notification selection: {0}")]
    InvalidSelection(String),

    #[error("Contract address must not be empty")]
    EmptyAddress,

    #[error("Unknown network: {0}")]
    UnknownNetwork(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Lookup service error: {0}")]
    Lookup(String),
}
