use std::fmt;
use std::sync::Arc;

use cucumber::World;
use serde_json::json;
use storecheck::{
    ApiResponse, Product, SessionPlan, StoreClient, Storefront, SuiteConfig, WebDriverSession,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const VALID_USER: &str = "demouser";
pub const VALID_PASSWORD: &str = "testingisfun99";

/// In-process stand-in for the demo API
pub struct ApiStub(MockServer);

impl fmt::Debug for ApiStub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiStub").field(&self.0.uri()).finish()
    }
}

impl ApiStub {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [
                    {
                        "id": 1,
                        "title": "iPhone 12",
                        "price": 799,
                        "description": "iPhone12-device-info.png",
                        "sku": "iPhone12-device-info.png",
                        "currencyFormat": "$",
                        "availableSizes": ["Apple"]
                    },
                    {
                        "id": 10,
                        "title": "Galaxy S20",
                        "price": 999,
                        "description": "GalaxyS20-device-info.png",
                        "sku": "GalaxyS20-device-info.png",
                        "currencyFormat": "$",
                        "availableSizes": ["Samsung"]
                    }
                ]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/signin"))
            .and(body_json(json!({ "userName": VALID_USER, "password": VALID_PASSWORD })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "user": { "userName": VALID_USER },
                "jwt": "stub-token"
            })))
            .with_priority(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/signin"))
            .respond_with(
                ResponseTemplate::new(422).set_body_json(json!({ "errorMessage": "Invalid Username" })),
            )
            .mount(&server)
            .await;
        Self(server)
    }

    pub fn api_base_url(&self) -> String {
        format!("{}/api", self.0.uri())
    }
}

#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct StoreWorld {
    pub config: SuiteConfig,
    pub stub: Option<ApiStub>,
    pub client: Option<StoreClient>,
    pub response: Option<ApiResponse>,
    pub products: Vec<Product>,
    pub session: Option<Arc<WebDriverSession>>,
    pub store: Option<Storefront<WebDriverSession>>,
}

impl StoreWorld {
    fn new() -> Self {
        Self {
            config: SuiteConfig::load(None).expect("suite configuration"),
            stub: None,
            client: None,
            response: None,
            products: Vec::new(),
            session: None,
            store: None,
        }
    }

    pub fn client(&self) -> &StoreClient {
        self.client
            .as_ref()
            .expect("API client not initialised; is the API reachable step missing?")
    }

    pub fn response(&self) -> &ApiResponse {
        self.response
            .as_ref()
            .expect("No API response captured in context")
    }

    /// Pages over this scenario's browser session, started on first use
    pub async fn storefront(&mut self) -> &Storefront<WebDriverSession> {
        if self.store.is_none() {
            let plan = SessionPlan::from_env(&self.config).expect("session plan");
            let session = Arc::new(
                plan.connect(&self.config)
                    .await
                    .expect("browser session"),
            );
            self.store = Some(Storefront::new(Arc::clone(&session), &self.config));
            self.session = Some(session);
        }
        self.store.as_ref().expect("storefront")
    }
}
