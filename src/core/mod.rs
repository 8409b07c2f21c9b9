pub mod amount;
pub mod engine;
pub mod waiter;
pub mod workflow;

pub use crate::domain::model::{Credentials, FineOutcome, FineReading, Plate, WorkflowStage};
pub use crate::domain::ports::{CredentialSource, PageDriver, Reporter, SessionLauncher};
pub use crate::utils::error::Result;
