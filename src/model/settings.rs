use serde::{Deserialize, Serialize};

/// Thresholds shared by every row classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Percentage drop (0–100) from previous to current quantity that counts as low stock.
    /// 0 disables the check.
    pub low_stock_percent: u8,
    /// Days without a quantity change before a row is stale. 0 disables the check.
    pub no_change_days: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            low_stock_percent: 20,
            no_change_days: 30,
        }
    }
}

/// Partial settings change; absent fields keep their current value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsUpdate {
    pub low_stock_percent: Option<u8>,
    pub no_change_days: Option<u32>,
}

impl SettingsUpdate {
    pub fn is_empty(&self) -> bool {
        self.low_stock_percent.is_none() && self.no_change_days.is_none()
    }
}
