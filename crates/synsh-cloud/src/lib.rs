//! synsh cloud layer
//!
//! Resolves human-friendly server names to SSH connection details across
//! several independently configured cloud accounts.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                  synsh CLI                    │
//! └───────────────┬──────────────────────────────┘
//!                 │ resolve("web1.okeanos")
//! ┌───────────────▼──────────────────────────────┐
//! │                 synsh-cloud                   │
//! │  CloudRegistry ─▶ ServerResolver / Lister     │
//! │                     │                         │
//! │           trait CloudConnector / CloudApi     │
//! └─────────────────────┬────────────────────────┘
//!                       │
//!              ┌────────▼────────┐
//!              │ synnefo client  │
//!              └─────────────────┘
//! ```

pub mod error;
pub mod lister;
pub mod model;
pub mod provider;
pub mod registry;
pub mod resolver;

// Re-exports
pub use error::{ApiError, CloudError, Result};
pub use lister::{ServerListing, ServerLister};
pub use model::{
    NetworkRecord, NicAttachment, PortForward, Resolution, ServerRecord, ServerSummary, SshInfo,
};
pub use provider::{ApiResult, CloudApi, CloudConnector};
pub use registry::{CloudEntry, CloudRegistry};
pub use resolver::{ServerResolver, parse_server_name};
