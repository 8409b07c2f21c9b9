#![allow(dead_code)]

use async_trait::async_trait;
use ppo_fine_check::domain::model::{Credentials, ElementState, Plate};
use ppo_fine_check::domain::ports::{PageDriver, SessionLauncher};
use ppo_fine_check::domain::selectors::{FieldKey, Selector, SelectorMap};
use ppo_fine_check::{FineCheckError, Result};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const PORTAL_URL: &str = "https://ppo.gov.eg/ppo/r/ppoportal/ppoportal/traffic";

pub fn sample_credentials() -> Credentials {
    Credentials {
        plate: Plate::new("ب", "س", "ف", "4176"),
        national_id: "29301301803574".to_string(),
        phone_number: "01142939127".to_string(),
    }
}

/// 模擬入口網站的行為
#[derive(Debug, Clone)]
pub struct PageScript {
    /// `None` 代表結果元素永遠不會出現
    pub result_text: Option<String>,
    /// 搜尋按鈕在第幾次查詢後才可點擊
    pub search_enabled_after: usize,
    pub fail_navigation: bool,
}

impl PageScript {
    pub fn with_result(text: &str) -> Self {
        Self {
            result_text: Some(text.to_string()),
            search_enabled_after: 0,
            fail_navigation: false,
        }
    }

    pub fn never_shows_result() -> Self {
        Self {
            result_text: None,
            search_enabled_after: 0,
            fail_navigation: false,
        }
    }
}

#[derive(Debug, Default)]
pub struct PageLog {
    pub launches: usize,
    pub quits: usize,
    pub actions: Vec<String>,
    pub values: HashMap<FieldKey, String>,
    pub current_url: String,
    pub url_queries: usize,
    search_lookups: usize,
    search_clicked: bool,
    details_clicked: bool,
}

impl PageLog {
    pub fn actions_starting_with(&self, prefix: &str) -> Vec<String> {
        self.actions
            .iter()
            .filter(|a| a.starts_with(prefix))
            .cloned()
            .collect()
    }
}

pub struct ScriptedPage {
    script: PageScript,
    selectors: SelectorMap,
    log: Arc<Mutex<PageLog>>,
}

impl ScriptedPage {
    fn key_for(&self, selector: &Selector) -> Result<FieldKey> {
        FieldKey::ALL
            .into_iter()
            .find(|key| self.selectors.locate(*key) == selector)
            .ok_or_else(|| FineCheckError::ElementError {
                field: selector.to_string(),
                action: "find".to_string(),
                message: "no such element".to_string(),
            })
    }

    fn visible(&self, key: FieldKey, log: &mut PageLog) -> Option<ElementState> {
        let shown = ElementState {
            displayed: true,
            enabled: true,
        };
        match key {
            FieldKey::PlateLetter1
            | FieldKey::PlateLetter2
            | FieldKey::PlateLetter3
            | FieldKey::PlateNumber => Some(shown),
            FieldKey::SearchButton => {
                log.search_lookups += 1;
                Some(ElementState {
                    displayed: true,
                    enabled: log.search_lookups > self.script.search_enabled_after,
                })
            }
            FieldKey::NationalId | FieldKey::PhoneNumber | FieldKey::CheckDetailsButton => {
                log.search_clicked.then_some(shown)
            }
            FieldKey::TotalFines => {
                (log.details_clicked && self.script.result_text.is_some()).then_some(shown)
            }
        }
    }

    fn require_present(&self, key: FieldKey, action: &str, log: &mut PageLog) -> Result<()> {
        match self.visible(key, log) {
            Some(_) => Ok(()),
            None => Err(FineCheckError::ElementError {
                field: self.selectors.locate(key).to_string(),
                action: action.to_string(),
                message: "no such element".to_string(),
            }),
        }
    }
}

#[async_trait]
impl PageDriver for ScriptedPage {
    async fn navigate(&self, url: &str) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        log.actions.push(format!("navigate:{}", url));
        if self.script.fail_navigation {
            return Err(FineCheckError::NavigationError {
                url: url.to_string(),
                message: "connection refused".to_string(),
            });
        }
        log.current_url = url.to_string();
        Ok(())
    }

    async fn element_state(&self, selector: &Selector) -> Result<Option<ElementState>> {
        let key = self.key_for(selector)?;
        let mut log = self.log.lock().unwrap();
        Ok(self.visible(key, &mut log))
    }

    async fn clear(&self, selector: &Selector) -> Result<()> {
        let key = self.key_for(selector)?;
        let mut log = self.log.lock().unwrap();
        self.require_present(key, "clear", &mut log)?;
        log.actions.push(format!("clear:{}", key));
        log.values.remove(&key);
        Ok(())
    }

    async fn send_keys(&self, selector: &Selector, text: &str) -> Result<()> {
        let key = self.key_for(selector)?;
        let mut log = self.log.lock().unwrap();
        self.require_present(key, "type into", &mut log)?;
        log.actions.push(format!("type:{}", key));
        log.values.entry(key).or_default().push_str(text);
        Ok(())
    }

    async fn click(&self, selector: &Selector) -> Result<()> {
        let key = self.key_for(selector)?;
        let mut log = self.log.lock().unwrap();
        self.require_present(key, "click", &mut log)?;
        log.actions.push(format!("click:{}", key));
        match key {
            FieldKey::SearchButton => {
                log.search_clicked = true;
                log.current_url = format!("{}?page=7", PORTAL_URL);
            }
            FieldKey::CheckDetailsButton => log.details_clicked = true,
            _ => {}
        }
        Ok(())
    }

    async fn text(&self, selector: &Selector) -> Result<String> {
        let key = self.key_for(selector)?;
        let mut log = self.log.lock().unwrap();
        self.require_present(key, "read", &mut log)?;
        log.actions.push(format!("read:{}", key));
        Ok(format!("  {}  ", self.script.result_text.clone().unwrap_or_default()))
    }

    async fn current_url(&self) -> Result<String> {
        let mut log = self.log.lock().unwrap();
        log.actions.push("current_url".to_string());
        log.url_queries += 1;
        Ok(log.current_url.clone())
    }

    async fn quit(&self) -> Result<()> {
        let mut log = self.log.lock().unwrap();
        log.actions.push("quit".to_string());
        log.quits += 1;
        Ok(())
    }
}

#[derive(Clone)]
pub struct ScriptedLauncher {
    script: PageScript,
    fail_launch: bool,
    pub log: Arc<Mutex<PageLog>>,
}

impl ScriptedLauncher {
    pub fn new(script: PageScript) -> Self {
        Self {
            script,
            fail_launch: false,
            log: Arc::new(Mutex::new(PageLog::default())),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_launch: true,
            ..Self::new(PageScript::never_shows_result())
        }
    }

    pub fn launches(&self) -> usize {
        self.log.lock().unwrap().launches
    }

    pub fn quits(&self) -> usize {
        self.log.lock().unwrap().quits
    }

    pub fn url_queries(&self) -> usize {
        self.log.lock().unwrap().url_queries
    }
}

#[async_trait]
impl SessionLauncher for ScriptedLauncher {
    type Driver = ScriptedPage;

    async fn launch(&self) -> Result<ScriptedPage> {
        self.log.lock().unwrap().launches += 1;
        if self.fail_launch {
            return Err(FineCheckError::LaunchError {
                message: "chromedriver not found".to_string(),
            });
        }

        Ok(ScriptedPage {
            script: self.script.clone(),
            selectors: SelectorMap::default(),
            log: Arc::clone(&self.log),
        })
    }
}
