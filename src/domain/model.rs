use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};

/// 埃及車牌：三個阿拉伯字母加上數字
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plate {
    pub letters: [String; 3],
    pub number: String,
}

impl Plate {
    pub fn new(
        letter_1: impl Into<String>,
        letter_2: impl Into<String>,
        letter_3: impl Into<String>,
        number: impl Into<String>,
    ) -> Self {
        Self {
            letters: [letter_1.into(), letter_2.into(), letter_3.into()],
            number: number.into(),
        }
    }
}

/// 字母直接相連，再接空白與數字，例如 `بسف 4176`
impl fmt::Display for Plate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.letters.concat(), self.number)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub plate: Plate,
    pub national_id: String,
    pub phone_number: String,
}

impl Validate for Credentials {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("plate_char_1", &self.plate.letters[0])?;
        validate_non_empty_string("plate_char_2", &self.plate.letters[1])?;
        validate_non_empty_string("plate_char_3", &self.plate.letters[2])?;
        validate_non_empty_string("plate_nums", &self.plate.number)?;
        validate_non_empty_string("national_id", &self.national_id)?;
        validate_non_empty_string("phone_number", &self.phone_number)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FineOutcome {
    Clean,
    FinesFound,
    /// 結果文字無法解析，不能當作沒有罰單
    Unknown,
}

impl fmt::Display for FineOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FineOutcome::Clean => write!(f, "clean"),
            FineOutcome::FinesFound => write!(f, "fines_found"),
            FineOutcome::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FineReading {
    /// 頁面上的原始文字（已去除空白）
    pub text: String,
    pub amount: Option<Decimal>,
    pub checked_at: DateTime<Utc>,
}

impl FineReading {
    pub fn outcome(&self) -> FineOutcome {
        match self.amount {
            Some(amount) if amount > Decimal::ZERO => FineOutcome::FinesFound,
            Some(_) => FineOutcome::Clean,
            None => FineOutcome::Unknown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStage {
    Start,
    PlateEntered,
    SearchSubmitted,
    DetailsEntered,
    ResultRead,
}

impl fmt::Display for WorkflowStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkflowStage::Start => "start",
            WorkflowStage::PlateEntered => "plate entered",
            WorkflowStage::SearchSubmitted => "search submitted",
            WorkflowStage::DetailsEntered => "details entered",
            WorkflowStage::ResultRead => "result read",
        };
        write!(f, "{}", name)
    }
}

/// 頁面元素當下的狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ElementState {
    pub displayed: bool,
    pub enabled: bool,
}
