use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{handlers, state::AppContext};

pub fn create(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/register", post(handlers::register))
        .route("/query", post(handlers::query))
        .route("/token", post(handlers::token))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use artwork_registry::{types::TransactionOutcome, ArtworkRegistry, RegistryError};
    use async_trait::async_trait;
    use axum::{
        body::{self, Body},
        http::{header::CONTENT_TYPE, Method, Request, Response, StatusCode},
        Router,
    };
    use ethers::{
        providers::{MockProvider, Provider},
        types::{Address, H256, U256},
    };
    use tower::ServiceExt;

    use super::create;
    use crate::{
        render::{registration_message, TRANSACTION_FAILED},
        state::AppContext,
        status::StatusPanel,
    };

    const OWNER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";

    fn owner() -> Address {
        OWNER.parse().unwrap()
    }

    /// In-memory registry that records every call it receives.
    #[derive(Default)]
    struct FakeRegistry {
        supply: u64,
        owned: Vec<(U256, String)>,
        detail_uri: String,
        /// `None` makes the node reject the transaction outright.
        outcome: Option<TransactionOutcome>,
        calls: Mutex<Vec<&'static str>>,
        registered: Mutex<Option<(Address, String)>>,
    }

    impl FakeRegistry {
        fn record(&self, method: &'static str) {
            self.calls.lock().unwrap().push(method);
        }

        fn count(&self, method: &str) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|m| **m == method)
                .count()
        }
    }

    #[async_trait]
    impl ArtworkRegistry for FakeRegistry {
        async fn register_artwork(
            &self,
            owner: Address,
            artwork_uri: String,
        ) -> Result<TransactionOutcome, RegistryError> {
            self.record("registerArtwork");
            *self.registered.lock().unwrap() = Some((owner, artwork_uri));
            self.outcome
                .clone()
                .ok_or_else(|| RegistryError::Provider("connection refused".to_string()))
        }

        async fn balance_of(&self, _owner: Address) -> Result<U256, RegistryError> {
            self.record("balanceOf");
            Ok(U256::from(self.owned.len()))
        }

        async fn token_of_owner_by_index(
            &self,
            _owner: Address,
            index: U256,
        ) -> Result<U256, RegistryError> {
            self.record("tokenOfOwnerByIndex");
            Ok(self.owned[index.as_usize()].0)
        }

        async fn token_uri(&self, token_id: U256) -> Result<String, RegistryError> {
            self.record("tokenURI");
            Ok(self
                .owned
                .iter()
                .find(|(id, _)| *id == token_id)
                .map(|(_, uri)| uri.clone())
                .unwrap_or_else(|| self.detail_uri.clone()))
        }

        async fn total_supply(&self) -> Result<U256, RegistryError> {
            self.record("totalSupply");
            Ok(U256::from(self.supply))
        }

        async fn owner_of(&self, _token_id: U256) -> Result<Address, RegistryError> {
            self.record("ownerOf");
            Ok(owner())
        }
    }

    fn setup(registry: Arc<FakeRegistry>) -> (Router, MockProvider) {
        let (provider, mock) = Provider::mocked();
        let ctx = Arc::new(AppContext {
            registry,
            contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".parse().unwrap(),
            node: Arc::new(provider),
            accounts: vec![owner()],
            status: StatusPanel::default(),
        });
        (create(ctx), mock)
    }

    async fn get(app: Router, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .uri(uri)
            .method(Method::GET)
            .body(Body::empty())
            .expect("Failed to build request");
        app.oneshot(request).await.expect("Failed to send request")
    }

    async fn post_form(app: Router, uri: &str, form: &str) -> Response<Body> {
        let request = Request::builder()
            .uri(uri)
            .method(Method::POST)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("Failed to build request");
        app.oneshot(request).await.expect("Failed to send request")
    }

    async fn body_text(response: Response<Body>) -> String {
        let bytes = body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn token_section(html: &str) -> &str {
        html.split("id=\"token\"").nth(1).unwrap()
    }

    #[tokio::test]
    async fn test_index_lists_accounts_and_tokens() {
        let registry = Arc::new(FakeRegistry {
            supply: 2,
            ..Default::default()
        });
        let (app, _mock) = setup(registry.clone());

        let response = get(app, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;

        assert!(html.contains("NFT Artwork Registry"));
        assert!(html.contains(&format!("<option value=\"{OWNER}\">")));
        let tokens = token_section(&html);
        assert!(tokens.contains("<option value=\"0\">"));
        assert!(tokens.contains("<option value=\"1\">"));
        assert!(!tokens.contains("<option value=\"2\">"));
    }

    #[tokio::test]
    async fn test_zero_supply_gives_empty_dropdown_and_no_detail_calls() {
        let registry = Arc::new(FakeRegistry::default());
        let (app, _mock) = setup(registry.clone());

        let html = body_text(get(app, "/").await).await;

        assert!(!token_section(&html).contains("<option"));
        assert_eq!(registry.count("totalSupply"), 1);
        assert_eq!(registry.count("ownerOf"), 0);
        assert_eq!(registry.count("tokenURI"), 0);
    }

    #[tokio::test]
    async fn test_register_shows_node_tx_hash() {
        let tx_hash = H256::repeat_byte(0xab);
        let registry = Arc::new(FakeRegistry {
            outcome: Some(TransactionOutcome::Confirmed { tx_hash }),
            ..Default::default()
        });
        let (app, _mock) = setup(registry.clone());

        let response = post_form(
            app,
            "/register",
            &format!("owner={OWNER}&artwork_uri=ipfs%3A%2F%2Fartwork1"),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;

        assert!(html.contains(&registration_message(&tx_hash)));
        assert!(html.contains(&format!(
            "Artwork registered with Transaction Hash: {tx_hash:?}"
        )));
        assert_eq!(
            *registry.registered.lock().unwrap(),
            Some((owner(), "ipfs://artwork1".to_string()))
        );
    }

    #[tokio::test]
    async fn test_reverted_register_shows_generic_failure() {
        let registry = Arc::new(FakeRegistry {
            outcome: Some(TransactionOutcome::Failed {
                tx_hash: H256::repeat_byte(0xab),
            }),
            ..Default::default()
        });
        let (app, _mock) = setup(registry.clone());

        let html = body_text(
            post_form(app, "/register", &format!("owner={OWNER}&artwork_uri=x")).await,
        )
        .await;

        assert!(html.contains(TRANSACTION_FAILED));
        assert!(!html.contains("Artwork Registered!"));
        assert!(!html.contains("abababab"));
    }

    #[tokio::test]
    async fn test_node_error_on_register_shows_generic_failure() {
        let registry = Arc::new(FakeRegistry::default());
        let (app, _mock) = setup(registry.clone());

        let response = post_form(app, "/register", &format!("owner={OWNER}&artwork_uri=x")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;

        assert!(html.contains(TRANSACTION_FAILED));
        assert!(!html.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_query_issues_one_plus_two_n_reads() {
        let registry = Arc::new(FakeRegistry {
            owned: vec![
                (U256::from(4), "ipfs://artwork4".to_string()),
                (U256::from(9), "ipfs://artwork9".to_string()),
                (U256::from(12), "ipfs://artwork12".to_string()),
            ],
            ..Default::default()
        });
        let (app, _mock) = setup(registry.clone());

        let html = body_text(post_form(app, "/query", &format!("address={OWNER}")).await).await;

        let query_reads = registry.count("balanceOf")
            + registry.count("tokenOfOwnerByIndex")
            + registry.count("tokenURI");
        assert_eq!(query_reads, 7);
        assert_eq!(html.matches("<li>Token ID:").count(), 3);
        assert!(html.contains("<li>Token ID: 9 - Artwork: ipfs://artwork9</li>"));
    }

    #[tokio::test]
    async fn test_query_with_malformed_address_is_bad_request() {
        let registry = Arc::new(FakeRegistry::default());
        let (app, _mock) = setup(registry.clone());

        let response = post_form(app, "/query", "address=0xABC").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_text(response).await.contains("invalid address"));
        assert_eq!(registry.count("balanceOf"), 0);
    }

    #[tokio::test]
    async fn test_token_details_render_owner_and_escaped_image() {
        let registry = Arc::new(FakeRegistry {
            supply: 3,
            detail_uri: "https://example.com/a.png?x=1&y=<2>".to_string(),
            ..Default::default()
        });
        let (app, _mock) = setup(registry.clone());

        let html = body_text(post_form(app, "/token", "token_id=2").await).await;

        assert!(html.contains(&format!("<p>Owner: {OWNER}</p>")));
        assert!(html.contains("<img src=\"https://example.com/a.png?x=1&amp;y=&lt;2&gt;\""));
        assert!(token_section(&html).contains("<option value=\"2\" selected>"));
        assert_eq!(registry.count("ownerOf"), 1);
    }

    #[tokio::test]
    async fn test_invalid_token_id_is_bad_request() {
        let (app, _mock) = setup(Arc::new(FakeRegistry::default()));

        let response = post_form(app, "/token", "token_id=abc").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_health_reports_live_node() {
        let (app, mock) = setup(Arc::new(FakeRegistry::default()));
        mock.push::<String, _>("anvil/v0.2.0".to_string()).unwrap();

        let response = get(app, "/health").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();

        assert_eq!(body["connected"], true);
        assert_eq!(body["client_version"], "anvil/v0.2.0");
        assert_eq!(body["accounts"], 1);
    }

    #[tokio::test]
    async fn test_health_reports_unreachable_node() {
        let (app, _mock) = setup(Arc::new(FakeRegistry::default()));

        let response = get(app, "/health").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();

        assert_eq!(body["connected"], false);
        assert!(body["error"].is_string());
    }
}
