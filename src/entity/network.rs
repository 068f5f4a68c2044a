use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entity::BotError;

/// Chains a token can be tracked on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "eth")]
    Ethereum,
    #[serde(rename = "sol")]
    Solana,
    #[serde(rename = "bsc")]
    Bsc,
}

impl Network {
    pub const ALL: [Network; 3] = [Network::Ethereum, Network::Solana, Network::Bsc];

    /// Short code used in callback data and on disk
    pub fn code(&self) -> &'static str {
        match self {
            Network::Ethereum => "eth",
            Network::Solana => "sol",
            Network::Bsc => "bsc",
        }
    }

    /// Button label for the network picker
    pub fn label(&self) -> &'static str {
        match self {
            Network::Ethereum => "Ethereum (ETH) 🏦",
            Network::Solana => "Solana (SOL) 🌐",
            Network::Bsc => "Binance Smart Chain (BSC) 🏗️",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code().to_uppercase())
    }
}

impl FromStr for Network {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "eth" => Ok(Network::Ethereum),
            "sol" => Ok(Network::Solana),
            "bsc" => Ok(Network::Bsc),
            other => Err(BotError::UnknownNetwork(other.to_string())),
        }
    }
}
