pub mod config;
pub mod domain;
pub mod error;

pub use config::{Credentials, DeployerConfig};
pub use domain::publish::{NotificationPayload, PublishResult};
pub use domain::task::{Attachment, RunMode, TaskRequest};
pub use error::{CoreError, Result};
