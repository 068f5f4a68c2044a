use crate::entity::Network;

/// Per-chat dialogue state
#[derive(Clone, Default, Debug, PartialEq)]
pub enum State {
    #[default]
    Start,
    AwaitingNetwork,
    AwaitingContractAddress {
        network: Network,
    },
    AwaitingNotificationSymbol,
    AwaitingNotificationDetails {
        symbol: String,
    },
    AwaitingRemovalSymbol,
    BrowsingWatchlist {
        page: usize,
    },
}

impl State {
    /// Page currently shown, if the chat is browsing the watchlist
    pub fn current_page(&self) -> Option<usize> {
        match self {
            State::BrowsingWatchlist { page } => Some(*page),
            _ => None,
        }
    }
}
