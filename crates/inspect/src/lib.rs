//! # tapis-meta-inspect
//!
//! Diagnostic client for the Tapis V3 Meta service. Logs in with a service
//! account and reports the collections of a Meta database together with the
//! index definitions of its `tapis_meta` collection.
//!
//! ```rust,ignore
//! use tapis_meta_inspect::{client::connect, config::Config, report::write_report};
//!
//! let config = Config::from_env()?;
//! let client = connect(&config).await?;
//! write_report(&client, &mut std::io::stdout()).await?;
//! ```

pub mod client;
pub mod cmd;
pub mod config;
pub mod error;
pub mod report;

pub use error::Error;
