// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Source-agnostic data collection and mapping engine.
//!
//! A [`CollectionConfig`] describes one HTTP endpoint and a set of field
//! extraction rules. [`Collector::collect`] fetches the endpoint with
//! bounded retries, decodes the body, and projects the requested nested
//! fields into a flat record, always returning a [`CollectionResult`].

#![cfg_attr(not(test), deny(clippy::panic))]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::todo))]
#![cfg_attr(not(test), deny(clippy::unimplemented))]

pub mod config;
pub mod decoder;
pub mod error;
pub mod extractor;
pub mod mapper;
pub mod path_value;
pub mod request;
pub mod result;
pub mod retry;
pub mod service;
pub mod settings;
pub mod transport;
pub mod validator;

pub use config::{CollectionConfig, HttpMethod, ResponseType};
pub use error::CollectError;
pub use mapper::MappedData;
pub use path_value::PathValue;
pub use result::CollectionResult;
pub use retry::RetryPolicy;
pub use service::Collector;
pub use settings::CollectorSettings;
pub use transport::{HttpResponse, ReqwestTransport, Transport};
pub use validator::{validate, ValidationReport};
