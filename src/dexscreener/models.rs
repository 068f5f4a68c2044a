use serde::Deserialize;

/// Response of the `/tokens/{address}` endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokensResponse {
    // null when the service knows no pair for the address
    #[serde(default)]
    pub pairs: Option<Vec<Pair>>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pair {
    pub chain_id: String,
    pub base_token: BaseToken,
    #[serde(default)]
    pub price_usd: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseToken {
    pub address: String,
    pub name: String,
    pub symbol: String,
}

impl Pair {
    pub fn price(&self) -> Option<f64> {
        self.price_usd
            .as_deref()
            .and_then(|price| price.trim().parse::<f64>().ok())
    }
}

/// First pair whose base token is `address`, compared case-insensitively
pub fn find_pair<'a>(pairs: &'a [Pair], address: &str) -> Option<&'a Pair> {
    let address = address.trim();
    pairs
        .iter()
        .find(|pair| pair.base_token.address.eq_ignore_ascii_case(address))
}
