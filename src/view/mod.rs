pub mod notification_view;
pub mod watchlist_view;
