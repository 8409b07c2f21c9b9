use clap::Parser;
use ppo_fine_check::adapters::{default_notifier, WebDriverLauncher};
use ppo_fine_check::config::{PortalConfig, ReporterKind};
use ppo_fine_check::domain::ports::{Reporter, RunStatus};
use ppo_fine_check::utils::{logger, validation::Validate};
use ppo_fine_check::{run_check, CiReporter, CliConfig, DesktopReporter};
use std::time::Duration;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    match config.reporter {
        ReporterKind::Desktop => logger::init_cli_logger(config.verbose),
        ReporterKind::Ci => logger::init_ci_logger(config.verbose),
    }

    tracing::info!("Starting ppo-fine-check");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let reporter: Box<dyn Reporter> = match config.reporter {
        ReporterKind::Desktop => Box::new(DesktopReporter::new(default_notifier())),
        ReporterKind::Ci => Box::new(CiReporter::new(config.uniform_exit_codes)),
    };

    // 驗證配置，失敗時不啟動瀏覽器
    let portal = match config.validate().and_then(|_| config.load_portal_config()) {
        Ok(portal) => portal,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(reporter.exit_code(RunStatus::ConfigurationFailed));
        }
    };

    let source = match config.credential_source() {
        Ok(source) => source,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(reporter.exit_code(RunStatus::ConfigurationFailed));
        }
    };

    if config.dry_run {
        display_config_summary(&config, &portal, source.name());
        match source.load() {
            Ok(credentials) => println!("✅ Credentials loaded for plate {}", credentials.plate),
            Err(e) => {
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(reporter.exit_code(RunStatus::ConfigurationFailed));
            }
        }
        return;
    }

    let launcher = WebDriverLauncher::new(config.browser_options());
    let status = run_check(
        source.as_ref(),
        launcher,
        &portal,
        reporter.as_ref(),
        Duration::from_secs(config.linger_secs),
    )
    .await;

    let exit_code = reporter.exit_code(status);
    tracing::info!("🏁 Finished with status {:?} (exit code {})", status, exit_code);
    std::process::exit(exit_code);
}

fn display_config_summary(config: &CliConfig, portal: &PortalConfig, source_name: &str) {
    println!("📋 Configuration Summary:");
    println!("  Portal: {}", portal.portal.url);
    println!("  WebDriver: {}", config.webdriver_url);
    println!("  Headless: {}", config.headless);
    println!("  Reporter: {:?}", config.reporter);
    println!("  Credentials: {}", source_name);
    println!(
        "  Wait timeout: {}s (poll every {}ms)",
        portal.timeouts.effective_wait_seconds(),
        portal.timeouts.poll_millis
    );
    println!("  Selectors:");
    for key in ppo_fine_check::domain::selectors::FieldKey::ALL {
        println!("    {} -> {}", key, portal.selectors.locate(key));
    }
    println!();
    println!("🔍 DRY RUN MODE - no browser was started");
}
