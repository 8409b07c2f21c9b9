pub mod reporters;
pub mod runner;

pub use reporters::{exit_code, CiReporter, DesktopReporter};
pub use runner::run_check;
