//! Async client for the MTN Mobile Money (MoMo) REST API: collections, disbursements,
//! per-product token caching, and lazy sandbox provisioning in one crate.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod obs;
pub mod product;
pub mod services;

pub use client::Client;
pub use config::{Config, ConfigBuilder, Environment};
pub use error::{Error, Result};
pub use product::Product;

mod _prelude {
	pub use std::{
		collections::{BTreeMap, HashMap},
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		str::FromStr,
		sync::Arc,
	};

	pub use async_lock::Mutex as AsyncMutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use rust_decimal::Decimal;
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use rust_decimal::Decimal;
#[cfg(test)] use {httpmock as _, tokio as _};
