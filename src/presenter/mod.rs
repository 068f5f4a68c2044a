pub mod notification_presenter;
pub mod watchlist_presenter;
