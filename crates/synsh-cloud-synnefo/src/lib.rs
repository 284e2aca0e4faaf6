//! Synnefo provider for synsh
//!
//! Implements [`synsh_cloud::CloudConnector`] and [`synsh_cloud::CloudApi`]
//! on top of the Synnefo REST APIs:
//!
//! - **Astakos** (identity): token authentication and service catalog
//! - **Cyclades compute**: server listing and details
//! - **Cyclades network**: network listing
//!
//! # Example
//!
//! ```ignore
//! use synsh_cloud::{CloudRegistry, ServerResolver};
//! use synsh_cloud_synnefo::SynnefoConnector;
//!
//! let registry = CloudRegistry::load()?;
//! let connector = SynnefoConnector::new();
//! let resolver = ServerResolver::new(&registry, &connector, None)?;
//!
//! let resolution = resolver.resolve("web1.okeanos").await?;
//! ```

pub mod compute;
pub mod error;
mod http;
pub mod identity;
pub mod network;
pub mod provider;

pub use compute::ComputeClient;
pub use error::{Result, SynnefoError};
pub use identity::{AstakosClient, CatalogEndpoint, CatalogService, ServiceCatalog};
pub use network::NetworkClient;
pub use provider::{SynnefoClient, SynnefoConnector};
