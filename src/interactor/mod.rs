pub mod db;
pub mod notification_interactor;
pub mod watchlist_interactor;
