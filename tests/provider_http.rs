//! Provider HTTP Integration Tests
//!
//! Point the real provider clients at a local axum stub and script its replies:
//! 1. Retry policy (429 and 5xx retried, other 4xx fail fast)
//! 2. Body decoding failures surface as `Parse`
//! 3. Per-provider request shape (Birdeye headers, JSON-RPC body)
//! 4. Orchestrator wiring: a hung first attempt is retried inside the fetch budget
//!
//! All traffic stays on 127.0.0.1.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::http::{HeaderMap, StatusCode, Uri};
use axum::Router;
use serde_json::json;
use solana_sdk::pubkey::Pubkey;

use sniff_score::adapters::birdeye::{BirdeyeClient, BirdeyeConfig};
use sniff_score::adapters::dexscreener::{DexScreenerClient, DexScreenerConfig};
use sniff_score::adapters::retry::RetryPolicy;
use sniff_score::adapters::token_metadata::{TokenMetadataClient, TokenMetadataConfig};
use sniff_score::application::AnalysisOrchestrator;
use sniff_score::config::Config;
use sniff_score::domain::MetricKind;
use sniff_score::ports::{MarketDataProvider, ProviderError};

const BONK: &str = "DezXAZ8z7PnrnRJjz3wXBoRgixCa6xjnB7YaB1pPB263";

const PAIRS_BODY: &str = r#"{"pairs":[{"chainId":"solana","liquidity":{"usd":2000000},"volume":{"h24":"150000"}}]}"#;

// ============================================================================
// Test Fixtures
// ============================================================================

/// One scripted reply; the last entry repeats for any further hits
#[derive(Clone)]
enum Reply {
    Respond(u16, &'static str),
    Hang,
}

/// Request seen by the stub
#[derive(Debug, Clone)]
struct SeenRequest {
    uri: String,
    headers: HeaderMap,
    body: String,
}

struct Stub {
    url: String,
    hits: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl Stub {
    async fn start(script: Vec<Reply>) -> Self {
        let hits = Arc::new(AtomicUsize::new(0));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let script = Arc::new(script);

        let handler = {
            let hits = hits.clone();
            let seen = seen.clone();
            move |uri: Uri, headers: HeaderMap, body: String| {
                let hits = hits.clone();
                let seen = seen.clone();
                let script = script.clone();
                async move {
                    let n = hits.fetch_add(1, Ordering::SeqCst);
                    seen.lock().unwrap().push(SeenRequest {
                        uri: uri.to_string(),
                        headers,
                        body,
                    });

                    let reply = script
                        .get(n)
                        .or_else(|| script.last())
                        .cloned()
                        .unwrap_or(Reply::Respond(200, "{}"));

                    match reply {
                        Reply::Respond(code, body) => (StatusCode::from_u16(code).unwrap(), body),
                        Reply::Hang => {
                            tokio::time::sleep(Duration::from_secs(30)).await;
                            (StatusCode::OK, "{}")
                        }
                    }
                }
            }
        };

        let app = Router::new().fallback(handler);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            url: format!("http://{}", addr),
            hits,
            seen,
        }
    }

    fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

fn fast_retry(max_retries: u32) -> RetryPolicy {
    RetryPolicy {
        max_retries,
        base_delay: Duration::from_millis(5),
    }
}

fn dexscreener(url: &str, max_retries: u32) -> DexScreenerClient {
    DexScreenerClient::with_config(DexScreenerConfig {
        base_url: url.to_string(),
        timeout: Duration::from_secs(5),
        retry: fast_retry(max_retries),
    })
    .unwrap()
}

fn bonk() -> Pubkey {
    BONK.parse().unwrap()
}

/// Config pointing every provider at local stubs with a short backoff
fn stub_config(dex_url: &str, fetch_timeout_ms: u64) -> Config {
    let mut config = Config::default();
    config.providers.fetch_timeout_ms = fetch_timeout_ms;
    config.providers.max_retries = 1;
    config.providers.retry_base_delay_ms = 10;
    config.providers.dexscreener.base_url = dex_url.to_string();
    config.providers.birdeye.enabled = false;
    config.providers.solana.rpc_url = None;
    config
}

// ============================================================================
// Retry Policy
// ============================================================================

#[tokio::test]
async fn test_rate_limit_then_success() {
    let stub = Stub::start(vec![
        Reply::Respond(429, "slow down"),
        Reply::Respond(200, PAIRS_BODY),
    ])
    .await;

    let metrics = dexscreener(&stub.url, 1).fetch(&bonk()).await.unwrap();

    assert_eq!(stub.hits(), 2);
    assert_eq!(metrics.liquidity_usd, Some(2_000_000.0));
    assert_eq!(metrics.volume_24h_usd, Some(150_000.0));
    assert_eq!(metrics.pool_count, Some(1));
}

#[tokio::test]
async fn test_rate_limit_exhausts_retries() {
    let stub = Stub::start(vec![Reply::Respond(429, "slow down")]).await;

    let result = dexscreener(&stub.url, 2).fetch(&bonk()).await;

    assert!(matches!(result, Err(ProviderError::RateLimited)));
    assert_eq!(stub.hits(), 3);
}

#[tokio::test]
async fn test_client_error_fails_fast() {
    let stub = Stub::start(vec![Reply::Respond(404, "no such token")]).await;

    let result = dexscreener(&stub.url, 3).fetch(&bonk()).await;

    match result {
        Err(ProviderError::Status { status, body }) => {
            assert_eq!(status, 404);
            assert_eq!(body, "no such token");
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn test_server_error_retried_then_reported() {
    let stub = Stub::start(vec![Reply::Respond(503, "unavailable")]).await;

    let result = dexscreener(&stub.url, 1).fetch(&bonk()).await;

    assert!(matches!(result, Err(ProviderError::Status { status: 503, .. })));
    assert_eq!(stub.hits(), 2);
}

#[tokio::test]
async fn test_server_error_recovers() {
    let stub = Stub::start(vec![
        Reply::Respond(502, "bad gateway"),
        Reply::Respond(200, PAIRS_BODY),
    ])
    .await;

    let metrics = dexscreener(&stub.url, 1).fetch(&bonk()).await.unwrap();
    assert_eq!(metrics.liquidity_usd, Some(2_000_000.0));
    assert_eq!(stub.hits(), 2);
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let stub = Stub::start(vec![Reply::Respond(200, "not json")]).await;

    let result = dexscreener(&stub.url, 1).fetch(&bonk()).await;

    assert!(matches!(result, Err(ProviderError::Parse(_))));
    assert_eq!(stub.hits(), 1);
}

#[tokio::test]
async fn test_dexscreener_request_path() {
    let stub = Stub::start(vec![Reply::Respond(200, r#"{"pairs":null}"#)]).await;

    let metrics = dexscreener(&stub.url, 0).fetch(&bonk()).await.unwrap();

    assert_eq!(metrics.pool_count, Some(0));
    assert_eq!(stub.requests()[0].uri, format!("/latest/dex/tokens/{}", BONK));
}

// ============================================================================
// Birdeye And Solana RPC
// ============================================================================

#[tokio::test]
async fn test_birdeye_sends_key_and_chain_headers() {
    let stub = Stub::start(vec![Reply::Respond(
        200,
        r#"{"success":true,"data":{"holder":"1234","liquidity":50000,"v24hUSD":12.5}}"#,
    )])
    .await;
    let client = BirdeyeClient::with_config(BirdeyeConfig {
        base_url: stub.url.clone(),
        api_key: Some("test-key".to_string()),
        timeout: Duration::from_secs(5),
        retry: fast_retry(0),
    })
    .unwrap();

    let metrics = client.fetch(&bonk()).await.unwrap();

    assert_eq!(metrics.holders, Some(1234));
    assert_eq!(metrics.liquidity_usd, Some(50_000.0));

    let request = &stub.requests()[0];
    assert_eq!(request.uri, format!("/defi/token_overview?address={}", BONK));
    assert_eq!(request.headers["x-api-key"], "test-key");
    assert_eq!(request.headers["x-chain"], "solana");
}

#[tokio::test]
async fn test_birdeye_without_key_sends_nothing() {
    let stub = Stub::start(vec![Reply::Respond(200, "{}")]).await;
    let client = BirdeyeClient::with_config(BirdeyeConfig {
        base_url: stub.url.clone(),
        api_key: None,
        timeout: Duration::from_secs(5),
        retry: fast_retry(1),
    })
    .unwrap();

    let result = client.fetch(&bonk()).await;

    assert!(matches!(result, Err(ProviderError::MissingCredential("BIRDEYE_API_KEY"))));
    assert_eq!(stub.hits(), 0);
}

#[tokio::test]
async fn test_rpc_mint_account_over_http() {
    let stub = Stub::start(vec![Reply::Respond(
        200,
        r#"{"jsonrpc":"2.0","id":1,"result":{"value":{"data":{"parsed":{"type":"mint","info":{"decimals":5,"supply":"88871507529870270","mintAuthority":null,"freezeAuthority":null}},"program":"spl-token"}}}}"#,
    )])
    .await;
    let client = TokenMetadataClient::with_config(TokenMetadataConfig {
        rpc_url: Some(stub.url.clone()),
        timeout: Duration::from_secs(5),
        retry: fast_retry(0),
    })
    .unwrap();

    let metrics = client.fetch(&bonk()).await.unwrap();

    assert_eq!(metrics.decimals, Some(5));
    assert_eq!(metrics.supply, Some(88_871_507_529_870_270));
    assert_eq!(metrics.mint_authority_revoked, Some(true));
    assert_eq!(metrics.freeze_authority_revoked, Some(true));

    let body: serde_json::Value = serde_json::from_str(&stub.requests()[0].body).unwrap();
    assert_eq!(body["method"], "getAccountInfo");
    assert_eq!(body["params"][0], BONK);
    assert_eq!(body["params"][1], json!({ "encoding": "jsonParsed" }));
}

#[tokio::test]
async fn test_rpc_error_body_is_parse_error() {
    let stub = Stub::start(vec![Reply::Respond(
        200,
        r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32602,"message":"Invalid param"}}"#,
    )])
    .await;
    let client = TokenMetadataClient::with_config(TokenMetadataConfig {
        rpc_url: Some(stub.url.clone()),
        timeout: Duration::from_secs(5),
        retry: fast_retry(1),
    })
    .unwrap();

    let result = client.fetch(&bonk()).await;

    assert!(matches!(result, Err(ProviderError::Parse(_))));
    assert_eq!(stub.hits(), 1);
}

// ============================================================================
// Orchestrator Wiring
// ============================================================================

#[tokio::test]
async fn test_hung_attempt_retried_within_fetch_budget() {
    let stub = Stub::start(vec![Reply::Hang, Reply::Respond(200, PAIRS_BODY)]).await;
    let analyzer = AnalysisOrchestrator::from_config(&stub_config(&stub.url, 800)).unwrap();

    let start = Instant::now();
    let analysis = analyzer.analyze(BONK).await.unwrap();

    assert!(start.elapsed() < Duration::from_millis(800));
    assert_eq!(stub.hits(), 2);
    assert_eq!(analysis.token_data.liquidity_usd, Some(2_000_000.0));
    assert_eq!(analysis.metrics[&MetricKind::Liquidity].score, 90);
    assert_eq!(analysis.token_data.sources, vec!["dexscreener"]);
    assert_eq!(analysis.token_data.degraded, vec!["solana-rpc"]);
}

#[tokio::test]
async fn test_http_failures_degrade_to_neutral() {
    let dex = Stub::start(vec![Reply::Respond(404, "no such token")]).await;
    let birdeye = Stub::start(vec![Reply::Respond(200, "not json")]).await;
    let rpc = Stub::start(vec![Reply::Respond(503, "unavailable")]).await;

    let mut config = stub_config(&dex.url, 2_000);
    config.providers.birdeye.enabled = true;
    config.providers.birdeye.base_url = birdeye.url.clone();
    config.providers.birdeye.api_key = Some("test-key".to_string());
    config.providers.solana.rpc_url = Some(rpc.url.clone());

    let analyzer = AnalysisOrchestrator::from_config(&config).unwrap();
    let analysis = analyzer.analyze(BONK).await.unwrap();

    assert_eq!(analysis.overall_score, 50);
    assert!(analysis.metrics.values().all(|m| m.score == 50));
    assert!(analysis.token_data.sources.is_empty());
    assert_eq!(
        analysis.token_data.degraded,
        vec!["dexscreener", "birdeye", "solana-rpc"]
    );
    assert_eq!(dex.hits(), 1);
    assert_eq!(birdeye.hits(), 1);
    assert_eq!(rpc.hits(), 2);
}
