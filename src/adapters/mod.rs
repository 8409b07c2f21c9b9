// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod notify;
pub mod webdriver;

pub use notify::{default_notifier, LogNotifier};
pub use webdriver::{BrowserOptions, WebDriverLauncher, WebDriverSession};
