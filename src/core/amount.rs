use crate::domain::model::FineReading;
use chrono::Utc;
use rust_decimal::Decimal;
use std::str::FromStr;

/// 以固定格式（`.` 為小數點）解析金額，無法解析時回傳 `None`
pub fn parse_fine_amount(text: &str) -> Option<Decimal> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    match Decimal::from_str(trimmed) {
        Ok(amount) => Some(amount),
        Err(e) => {
            tracing::warn!("⚠️ Fine amount '{}' is not a number: {}", trimmed, e);
            None
        }
    }
}

pub fn read_fine(text: &str) -> FineReading {
    let text = text.trim().to_string();
    let amount = parse_fine_amount(&text);
    FineReading {
        text,
        amount,
        checked_at: Utc::now(),
    }
}
