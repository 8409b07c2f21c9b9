use serde::{Deserialize, Serialize};
use std::fmt;

/// 定位頁面元素的方式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Selector {
    Id(String),
    Css(String),
    XPath(String),
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Id(id) => write!(f, "id:{}", id),
            Selector::Css(css) => write!(f, "css:{}", css),
            Selector::XPath(xpath) => write!(f, "xpath:{}", xpath),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    PlateLetter1,
    PlateLetter2,
    PlateLetter3,
    PlateNumber,
    SearchButton,
    NationalId,
    PhoneNumber,
    CheckDetailsButton,
    TotalFines,
}

impl FieldKey {
    pub const ALL: [FieldKey; 9] = [
        FieldKey::PlateLetter1,
        FieldKey::PlateLetter2,
        FieldKey::PlateLetter3,
        FieldKey::PlateNumber,
        FieldKey::SearchButton,
        FieldKey::NationalId,
        FieldKey::PhoneNumber,
        FieldKey::CheckDetailsButton,
        FieldKey::TotalFines,
    ];
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldKey::PlateLetter1 => "plate letter 1",
            FieldKey::PlateLetter2 => "plate letter 2",
            FieldKey::PlateLetter3 => "plate letter 3",
            FieldKey::PlateNumber => "plate number",
            FieldKey::SearchButton => "search button",
            FieldKey::NationalId => "national ID field",
            FieldKey::PhoneNumber => "phone number field",
            FieldKey::CheckDetailsButton => "check details button",
            FieldKey::TotalFines => "total fines result",
        };
        write!(f, "{}", name)
    }
}

pub const TOTAL_FINES_LABEL: &str = "اجمالي الغرامات الشاملة";

/// 入口網站的欄位對照表
///
/// 頁面 14 是車牌表單，頁面 7 是身分證與電話表單。
/// 網站改版時只需要更新這張表（或在 portal TOML 中覆寫）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorMap {
    pub plate_letter_1: Selector,
    pub plate_letter_2: Selector,
    pub plate_letter_3: Selector,
    pub plate_number: Selector,
    pub search_button: Selector,
    pub national_id: Selector,
    pub phone_number: Selector,
    pub check_details_button: Selector,
    pub total_fines: Selector,
}

impl Default for SelectorMap {
    fn default() -> Self {
        Self {
            plate_letter_1: Selector::Id("P14_LETER_1".to_string()),
            plate_letter_2: Selector::Id("P14_LETER_2".to_string()),
            plate_letter_3: Selector::Id("P14_LETER_3".to_string()),
            plate_number: Selector::Id("P14_NUMBER_WITH_LETTER".to_string()),
            search_button: Selector::Id("GET_FIN_LETTER_NUMBERS_BTN".to_string()),
            national_id: Selector::Id("P7_NATIONAL_ID_CASE_1".to_string()),
            phone_number: Selector::Id("P7_PHONE_NUMBER_ID_CASE_1".to_string()),
            check_details_button: Selector::Id("B1776099686727570788".to_string()),
            // boxTable 容器中含有標籤文字的 p，再取其中的 span
            total_fines: Selector::XPath(format!(
                "//div[contains(@class, 'boxTable')][.//p[contains(text(), '{}')]]//span",
                TOTAL_FINES_LABEL
            )),
        }
    }
}

impl SelectorMap {
    pub fn locate(&self, key: FieldKey) -> &Selector {
        match key {
            FieldKey::PlateLetter1 => &self.plate_letter_1,
            FieldKey::PlateLetter2 => &self.plate_letter_2,
            FieldKey::PlateLetter3 => &self.plate_letter_3,
            FieldKey::PlateNumber => &self.plate_number,
            FieldKey::SearchButton => &self.search_button,
            FieldKey::NationalId => &self.national_id,
            FieldKey::PhoneNumber => &self.phone_number,
            FieldKey::CheckDetailsButton => &self.check_details_button,
            FieldKey::TotalFines => &self.total_fines,
        }
    }
}
