// Copyright 2025-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The single public entry point: [`Collector::collect`].
//!
//! ```text
//!   validate -> build -> execute (retry) -> decode -> map -> envelope
//! ```
//!
//! Every stage failure is rendered into the returned
//! [`CollectionResult`]; nothing here panics or returns `Err`.

use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::config::CollectionConfig;
use crate::decoder::decode;
use crate::error::CollectError;
use crate::mapper::map_output;
use crate::request::build;
use crate::result::CollectionResult;
use crate::retry::{RetryExecutor, RetryPolicy};
use crate::settings::CollectorSettings;
use crate::transport::{ReqwestTransport, Transport};
use crate::validator::validate;

/// Stateless collection engine. Cheap to clone and safe to share between
/// concurrent callers; each call owns its configuration and result.
#[derive(Debug, Clone)]
pub struct Collector {
    executor: RetryExecutor,
}

impl Collector {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            executor: RetryExecutor::new(transport),
        }
    }

    pub fn from_settings(settings: &CollectorSettings) -> Self {
        Self::new(Arc::new(ReqwestTransport::from_settings(settings)))
    }

    /// Runs one bounded collection for `config`.
    pub async fn collect(&self, config: &CollectionConfig) -> CollectionResult {
        self.collect_with_cancellation(config, &CancellationToken::new())
            .await
    }

    /// Same as [`Collector::collect`], but `cancel` aborts an in-flight
    /// attempt or a pending retry delay.
    pub async fn collect_with_cancellation(
        &self,
        config: &CollectionConfig,
        cancel: &CancellationToken,
    ) -> CollectionResult {
        match self.run(config, cancel).await {
            Ok(result) => result,
            Err(e) => {
                error!("Collection failed: {e}");
                CollectionResult::failure(e.to_string())
            }
        }
    }

    async fn run(
        &self,
        config: &CollectionConfig,
        cancel: &CancellationToken,
    ) -> Result<CollectionResult, CollectError> {
        validate(config).into_result()?;

        // Retry fields were validated above.
        let policy = RetryPolicy::from_config(config).unwrap_or_default();
        let request = build(config)?;
        debug!(
            "Collecting {} {} with up to {} attempt(s)",
            request.method.as_str(),
            request.url,
            policy.attempts
        );

        let response = self.executor.execute(&request, policy, cancel).await?;
        let data = decode(&response, config.response_type)?;
        let mapped_data = config
            .output_mapping
            .as_ref()
            .map(|mapping| map_output(&data, mapping));

        Ok(CollectionResult::success(data, mapped_data))
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestTransport::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HttpMethod, ResponseType};
    use crate::error::TransportError;
    use crate::path_value::PathValue;
    use crate::retry::test_support::ScriptedTransport;
    use crate::transport::HttpResponse;
    use serde_json::json;

    fn collector(transport: &Arc<ScriptedTransport>) -> Collector {
        Collector::new(transport.clone())
    }

    fn ok(body: &str) -> Result<HttpResponse, TransportError> {
        Ok(HttpResponse::new(200, body))
    }

    #[tokio::test]
    async fn test_invalid_config_short_circuits() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok("{}")]));
        let config: CollectionConfig = serde_json::from_value(json!({"method": "PUT"})).unwrap();

        let result = collector(&transport).collect(&config).await;

        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(
            result.error.as_deref(),
            Some("invalid configuration: url is required; method must be GET or POST, got 'PUT'")
        );
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_success_with_mapping() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok(
            r#"{"code":0,"data":{"ticker":{"last":"3120.4"}}}"#,
        )]));
        let config = CollectionConfig::new("https://api.example.com/ticker", HttpMethod::Get)
            .with_mapping("price", "data.ticker.last")
            .with_mapping("volume", "data.ticker.vol");

        let result = collector(&transport).collect(&config).await;

        assert!(result.success);
        assert!(result.error.is_none());
        assert_eq!(
            result.data.as_ref().and_then(|d| d.get("code")),
            Some(&PathValue::from(0))
        );
        let mapped = result.mapped_data.unwrap();
        assert_eq!(mapped.len(), 2);
        assert_eq!(mapped["price"], Some(PathValue::from("3120.4")));
        assert_eq!(mapped["volume"], None);
    }

    #[tokio::test]
    async fn test_success_without_mapping() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok("[1,2,3]")]));
        let config = CollectionConfig::new("https://api.example.com/list", HttpMethod::Get);

        let result = collector(&transport).collect(&config).await;

        assert!(result.success);
        assert!(result.mapped_data.is_none());
    }

    #[tokio::test]
    async fn test_decode_failure_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok("not json")]));
        let config = CollectionConfig::new("https://api.example.com", HttpMethod::Get)
            .with_mapping("x", "a");

        let result = collector(&transport).collect(&config).await;

        assert!(!result.success);
        assert!(result.data.is_none());
        assert!(result.mapped_data.is_none());
        assert!(result
            .error
            .unwrap()
            .starts_with("failed to decode response body as json"));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_text_response() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok("pong")]));
        let config = CollectionConfig::new("https://api.example.com/ping", HttpMethod::Get)
            .with_response_type(ResponseType::Text)
            .with_mapping("anything", "a.b");

        let result = collector(&transport).collect(&config).await;

        assert!(result.success);
        assert_eq!(result.data, Some(PathValue::from("pong")));
        assert_eq!(result.mapped_data.unwrap()["anything"], None);
    }

    #[tokio::test]
    async fn test_exhausted_retries() {
        let transport = Arc::new(ScriptedTransport::new(vec![Ok(HttpResponse::new(
            404, "",
        ))]));
        let config =
            CollectionConfig::new("https://api.example.com", HttpMethod::Get).with_retry(2, 1);

        let result = collector(&transport).collect(&config).await;

        assert!(!result.success);
        assert!(result.data.is_none());
        assert_eq!(
            result.error.as_deref(),
            Some("request failed after 2 attempt(s): status 404: Not Found")
        );
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_zero_retry_times_reports_no_attempts() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok("{}")]));
        let config =
            CollectionConfig::new("https://api.example.com", HttpMethod::Get).with_retry(0, 1);

        let result = collector(&transport).collect(&config).await;

        assert!(!result.success);
        assert_eq!(
            result.error.as_deref(),
            Some("no attempts made: retryTimes is 0")
        );
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_collection() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok("{}")]));
        let config = CollectionConfig::new("https://api.example.com", HttpMethod::Get);
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = collector(&transport)
            .collect_with_cancellation(&config, &cancel)
            .await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("collection cancelled"));
    }

    #[tokio::test]
    async fn test_out_of_range_retry_times_reported_by_validation() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok("{}")]));
        let config: CollectionConfig = serde_json::from_value(json!({
            "url": "https://api.example.com",
            "method": "GET",
            "retryTimes": 5_000_000_000u64
        }))
        .unwrap();

        let result = collector(&transport).collect(&config).await;

        assert_eq!(
            result.error.as_deref(),
            Some("invalid configuration: retryTimes must be at most 4294967295")
        );
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_non_http_url_is_not_retried() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok("{}")]));
        let config = CollectionConfig::new("localhost:8080", HttpMethod::Get).with_retry(3, 1000);

        let result = collector(&transport).collect(&config).await;

        assert_eq!(
            result.error.as_deref(),
            Some("invalid configuration: url scheme must be http or https, got 'localhost'")
        );
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_header_reported() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok("{}")]));
        let config = CollectionConfig::new("https://api.example.com", HttpMethod::Get)
            .with_header("bad header", "x");

        let result = collector(&transport).collect(&config).await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("invalid header 'bad header'"));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_collections_are_independent() {
        let transport = Arc::new(ScriptedTransport::new(vec![ok(r#"{"v":1}"#)]));
        let collector = collector(&transport);

        let first = CollectionConfig::new("https://a.example.com", HttpMethod::Get)
            .with_mapping("v", "v");
        let second = CollectionConfig::new("https://b.example.com", HttpMethod::Get)
            .with_mapping("w", "missing");

        let (a, b) = tokio::join!(collector.collect(&first), collector.collect(&second));

        assert_eq!(a.mapped_data.unwrap()["v"], Some(PathValue::from(1)));
        assert_eq!(b.mapped_data.unwrap()["w"], None);
        assert_eq!(transport.calls(), 2);
    }
}
