mod common;

use common::{sample_credentials, PageScript, ScriptedLauncher, PORTAL_URL};
use ppo_fine_check::config::PortalConfig;
use ppo_fine_check::core::workflow::{FineCheckWorkflow, WorkflowSettings};
use ppo_fine_check::domain::model::{FineOutcome, WorkflowStage};
use ppo_fine_check::domain::ports::SessionLauncher;
use ppo_fine_check::domain::selectors::{FieldKey, SelectorMap};
use ppo_fine_check::{FineCheckEngine, FineCheckError};
use std::time::Duration;

fn fast_settings() -> WorkflowSettings {
    WorkflowSettings {
        target_url: PORTAL_URL.to_string(),
        wait_timeout: Duration::from_millis(200),
        poll_interval: Duration::from_millis(5),
    }
}

fn engine(launcher: ScriptedLauncher) -> FineCheckEngine<ScriptedLauncher> {
    FineCheckEngine::new(launcher, SelectorMap::default(), fast_settings())
}

#[tokio::test]
async fn test_clean_record_scenario() {
    let launcher = ScriptedLauncher::new(PageScript::with_result("0"));
    let reading = engine(launcher.clone())
        .run(&sample_credentials())
        .await
        .unwrap();

    assert_eq!(reading.text, "0");
    assert_eq!(reading.outcome(), FineOutcome::Clean);
    assert_eq!(launcher.launches(), 1);
    assert_eq!(launcher.quits(), 1);
    assert_eq!(launcher.url_queries(), 0);
}

#[tokio::test]
async fn test_fines_found_scenario() {
    let launcher = ScriptedLauncher::new(PageScript::with_result("350.50"));
    let reading = engine(launcher.clone())
        .run(&sample_credentials())
        .await
        .unwrap();

    assert_eq!(reading.text, "350.50");
    assert_eq!(reading.outcome(), FineOutcome::FinesFound);
    assert_eq!(launcher.quits(), 1);
}

#[tokio::test]
async fn test_non_numeric_result_is_unknown() {
    let launcher = ScriptedLauncher::new(PageScript::with_result("abc"));
    let reading = engine(launcher.clone())
        .run(&sample_credentials())
        .await
        .unwrap();

    assert_eq!(reading.outcome(), FineOutcome::Unknown);
    assert!(reading.amount.is_none());
}

#[tokio::test]
async fn test_result_timeout_still_closes_session() {
    let launcher = ScriptedLauncher::new(PageScript::never_shows_result());
    let err = engine(launcher.clone())
        .run(&sample_credentials())
        .await
        .unwrap_err();

    match err {
        FineCheckError::TimeoutError { field, .. } => assert_eq!(field, "total fines result"),
        other => panic!("expected timeout, got {:?}", other),
    }
    assert_eq!(launcher.quits(), 1);
    assert_eq!(launcher.url_queries(), 1);

    let log = launcher.log.lock().unwrap();
    let tail: Vec<&str> = log.actions.iter().rev().take(2).map(String::as_str).collect();
    assert_eq!(tail, vec!["quit", "current_url"]);
    assert!(log.actions_starting_with("read:").is_empty());
}

#[tokio::test]
async fn test_shutdown_during_wait_closes_session() {
    let launcher = ScriptedLauncher::new(PageScript::never_shows_result());
    let settings = WorkflowSettings {
        wait_timeout: Duration::from_secs(30),
        ..fast_settings()
    };
    let engine = FineCheckEngine::new(launcher.clone(), SelectorMap::default(), settings)
        .with_shutdown(|| tokio::time::sleep(Duration::from_millis(50)));

    let started = std::time::Instant::now();
    let err = engine.run(&sample_credentials()).await.unwrap_err();

    assert!(matches!(err, FineCheckError::Interrupted));
    assert!(started.elapsed() < Duration::from_secs(30));
    assert_eq!(launcher.launches(), 1);
    assert_eq!(launcher.quits(), 1);
    assert_eq!(launcher.url_queries(), 1);

    let log = launcher.log.lock().unwrap();
    assert_eq!(log.actions.last().map(String::as_str), Some("quit"));
    assert!(log.actions_starting_with("read:").is_empty());
}

#[tokio::test]
async fn test_each_run_gets_a_fresh_shutdown_signal() {
    let launcher = ScriptedLauncher::new(PageScript::with_result("0"));
    let engine = engine(launcher.clone()).with_shutdown(|| std::future::pending::<()>());

    engine.run(&sample_credentials()).await.unwrap();
    engine.run(&sample_credentials()).await.unwrap();

    assert_eq!(launcher.quits(), 2);
}

#[tokio::test]
async fn test_navigation_failure_closes_session() {
    let script = PageScript {
        fail_navigation: true,
        ..PageScript::with_result("0")
    };
    let launcher = ScriptedLauncher::new(script);
    let err = engine(launcher.clone())
        .run(&sample_credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, FineCheckError::NavigationError { .. }));
    assert_eq!(launcher.quits(), 1);
}

#[tokio::test]
async fn test_launch_failure_has_nothing_to_close() {
    let launcher = ScriptedLauncher::failing();
    let err = engine(launcher.clone())
        .run(&sample_credentials())
        .await
        .unwrap_err();

    assert!(matches!(err, FineCheckError::LaunchError { .. }));
    assert_eq!(launcher.launches(), 1);
    assert_eq!(launcher.quits(), 0);
}

#[tokio::test]
async fn test_fields_filled_in_order() {
    let launcher = ScriptedLauncher::new(PageScript::with_result("0"));
    engine(launcher.clone())
        .run(&sample_credentials())
        .await
        .unwrap();

    let log = launcher.log.lock().unwrap();
    let steps: Vec<&str> = log
        .actions
        .iter()
        .map(String::as_str)
        .filter(|a| !a.starts_with("navigate:"))
        .collect();

    assert_eq!(
        steps,
        vec![
            "type:plate letter 1",
            "type:plate letter 2",
            "type:plate letter 3",
            "type:plate number",
            "click:search button",
            "clear:national ID field",
            "type:national ID field",
            "clear:phone number field",
            "type:phone number field",
            "click:check details button",
            "read:total fines result",
            "quit",
        ]
    );

    assert_eq!(log.values[&FieldKey::PlateLetter1], "ب");
    assert_eq!(log.values[&FieldKey::PlateLetter2], "س");
    assert_eq!(log.values[&FieldKey::PlateLetter3], "ف");
    assert_eq!(log.values[&FieldKey::PlateNumber], "4176");
    assert_eq!(log.values[&FieldKey::NationalId], "29301301803574");
    assert_eq!(log.values[&FieldKey::PhoneNumber], "01142939127");
}

#[tokio::test]
async fn test_waits_for_search_button_to_enable() {
    let script = PageScript {
        search_enabled_after: 3,
        ..PageScript::with_result("0")
    };
    let launcher = ScriptedLauncher::new(script);
    let reading = engine(launcher.clone())
        .run(&sample_credentials())
        .await
        .unwrap();

    assert_eq!(reading.outcome(), FineOutcome::Clean);
}

#[tokio::test]
async fn test_repeated_runs_give_same_classification() {
    let launcher = ScriptedLauncher::new(PageScript::with_result("350.50"));
    let engine = engine(launcher.clone());

    let first = engine.run(&sample_credentials()).await.unwrap();
    let second = engine.run(&sample_credentials()).await.unwrap();

    assert_eq!(first.outcome(), second.outcome());
    assert_eq!(first.amount, second.amount);
    assert_eq!(launcher.launches(), 2);
    assert_eq!(launcher.quits(), 2);
}

#[tokio::test]
async fn test_portal_defaults_drive_workflow() {
    let portal = PortalConfig::default();
    let mut settings = portal.workflow_settings();
    settings.wait_timeout = Duration::from_millis(200);
    settings.poll_interval = Duration::from_millis(5);

    let launcher = ScriptedLauncher::new(PageScript::with_result("0"));
    let engine = FineCheckEngine::new(launcher.clone(), portal.selectors.clone(), settings);
    engine.run(&sample_credentials()).await.unwrap();

    let log = launcher.log.lock().unwrap();
    assert_eq!(log.actions[0], format!("navigate:{}", PORTAL_URL));
}

#[tokio::test]
async fn test_stage_reflects_last_completed_step() {
    let launcher = ScriptedLauncher::new(PageScript::never_shows_result());
    let page = launcher.launch().await.unwrap();
    let selectors = SelectorMap::default();
    let settings = fast_settings();

    let mut workflow = FineCheckWorkflow::new(&page, &selectors, &settings);
    assert_eq!(workflow.stage(), WorkflowStage::Start);

    let result = workflow.run(&sample_credentials()).await;
    assert!(matches!(result, Err(FineCheckError::TimeoutError { .. })));
    assert_eq!(workflow.stage(), WorkflowStage::DetailsEntered);
}
