use crate::entity::ChangeType;
use lazy_static::lazy_static;
use regex::Regex;
use std::time::Duration;

/// Watchlist entries shown per page
pub const ITEMS_PER_PAGE: usize = 5;

// Parse notification details such as "up 10%" or "down 5"
pub fn parse_notification_details(input: &str) -> Option<(ChangeType, f64)> {
    lazy_static! {
        static ref RE: Regex = Regex::new(r"^(up|down)\s+(\d+(?:\.\d+)?)%?$").unwrap();
    }

    let input = input.trim().to_lowercase();

    RE.captures(&input).and_then(|cap| {
        let change_type = match cap.get(1)?.as_str() {
            "up" => ChangeType::Up,
            _ => ChangeType::Down,
        };

        cap.get(2)?
            .as_str()
            .parse::<f64>()
            .ok()
            .map(|threshold| (change_type, threshold))
    })
}

/// One page of `items`; `page` is 1-based and pages past the end are empty
pub fn get_paginated_watchlist<T>(items: &[T], page: usize) -> &[T] {
    if page == 0 {
        return &[];
    }

    let start = (page - 1).saturating_mul(ITEMS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }

    let end = (start + ITEMS_PER_PAGE).min(items.len());
    &items[start..end]
}

// Format a USD price without losing precision on very cheap tokens
pub fn format_price(price: f64) -> String {
    if price >= 1.0 {
        format!("{:.2}", price)
    } else {
        format!("{:.8}", price)
    }
}

/// Exponential delay for the transport restart loop
#[derive(Debug, Clone)]
pub struct Backoff {
    initial: Duration,
    max: Duration,
    current: Duration,
}

impl Backoff {
    pub fn new(initial: Duration, max: Duration) -> Self {
        Self {
            initial,
            max: max.max(initial),
            current: initial,
        }
    }

    /// Delay to wait now; doubles the next one up to the cap
    pub fn next_delay(&mut self) -> Duration {
        let delay = self.current;
        self.current = (self.current * 2).min(self.max);
        delay
    }

    pub fn reset(&mut self) {
        self.current = self.initial;
    }
}
