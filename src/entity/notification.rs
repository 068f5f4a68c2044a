use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a price move a notification watches for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Up,
    Down,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeType::Up => write!(f, "up"),
            ChangeType::Down => write!(f, "down"),
        }
    }
}

/// Standing percentage-move rule for one symbol
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Notification {
    pub chat_id: i64,
    pub symbol: String,
    pub change_type: ChangeType,
    pub threshold_percentage: f64,
    /// Last sampled price; `None` until the poller has seen one
    pub previous_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_triggered_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new(chat_id: i64, symbol: &str, change_type: ChangeType, threshold: f64) -> Self {
        Self {
            chat_id,
            symbol: symbol.to_string(),
            change_type,
            threshold_percentage: threshold,
            previous_price: None,
            last_triggered_at: None,
        }
    }

    /// Feed one price sample. Returns the percentage change when the rule fires.
    ///
    /// The baseline is replaced by `current_price` on every call, fired or not.
    /// A missing or non-positive baseline only records the sample.
    pub fn observe(&mut self, current_price: f64) -> Option<f64> {
        let previous = self.previous_price.replace(current_price);

        let previous = match previous {
            Some(price) if price > 0.0 => price,
            _ => return None,
        };

        let change = (current_price - previous) * 100.0 / previous;
        let fires = match self.change_type {
            ChangeType::Up => change >= self.threshold_percentage,
            ChangeType::Down => change <= -self.threshold_percentage,
        };

        if fires {
            Some(change)
        } else {
            None
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "{}: Notify when price goes {} by {}%",
            self.symbol, self.change_type, self.threshold_percentage
        )
    }
}

/// Notifications table, one rule per symbol
pub type Notifications = IndexMap<String, Notification>;
