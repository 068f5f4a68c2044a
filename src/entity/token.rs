use serde::{Deserialize, Serialize};

/// Token identity as resolved from a contract address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub chain_id: String, // chain reported by the lookup service, e.g. "ethereum"
    pub symbol: String,
    pub name: String,
}
