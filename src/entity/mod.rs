mod bot_error;
mod network;
mod notification;
mod state;
mod token;
mod watchlist;

pub use bot_error::BotError;
pub use network::Network;
pub use notification::{ChangeType, Notification, Notifications};
pub use state::State;
pub use token::Token;
pub use watchlist::{Watchlist, WatchlistEntry, WatchlistItem};
