use cucumber::{given, then, when};
use storecheck::StoreClient;

use crate::world::{ApiStub, StoreWorld};

#[given("the BrowserStack Demo API is reachable")]
async fn api_is_reachable(world: &mut StoreWorld) {
    if std::env::var_os("API_BASE_URL").is_none() && world.stub.is_none() {
        let stub = ApiStub::start().await;
        world.config = std::mem::take(&mut world.config).with_api_base_url(stub.api_base_url());
        world.stub = Some(stub);
    }
    let client = StoreClient::from_config(&world.config).expect("api_base_url missing from configuration");
    tracing::info!("API base URL resolved to {}", client.base_url());
    world.client = Some(client);
}

#[when("I request the product catalog")]
async fn request_catalog(world: &mut StoreWorld) {
    let response = world.client().list_products().await.expect("catalog request");
    world.products = response.products().expect("catalog payload");
    tracing::info!("Retrieved {} products from the catalog API", world.products.len());
    world.response = Some(response);
}

#[when(expr = "I authenticate via the API as {string} with password {string}")]
async fn authenticate(world: &mut StoreWorld, username: String, password: String) {
    let response = world
        .client()
        .sign_in(&username, &password)
        .await
        .expect("sign-in request");
    tracing::info!(
        "Attempted API login for user {username} with status {}",
        response.status
    );
    world.response = Some(response);
}

#[then(expr = "the API response status should be {int}")]
async fn status_is(world: &mut StoreWorld, status: u16) {
    let actual = world.response().status;
    assert_eq!(actual, status, "Expected {status}, got {actual}");
}

#[then(expr = "the API response status should not be {int}")]
async fn status_is_not(world: &mut StoreWorld, status: u16) {
    assert_ne!(world.response().status, status);
}

#[then(expr = "the response should contain at least {int} products")]
async fn at_least_products(world: &mut StoreWorld, minimum: usize) {
    let count = world.products.len();
    assert!(
        count >= minimum,
        "Expected at least {minimum} products, got {count}"
    );
}

#[then(expr = "each product item should include the fields {string}")]
async fn products_have_fields(world: &mut StoreWorld, fields: String) {
    assert!(!world.products.is_empty(), "No products captured from API");
    for product in &world.products {
        let missing = product.missing_fields();
        assert!(missing.is_empty(), "Missing {missing:?} in {product:?}");
    }
    tracing::info!(
        "Validated {fields} fields across {} products",
        world.products.len()
    );
}

#[then("the response should include an error message")]
async fn has_error_message(world: &mut StoreWorld) {
    let response = world.response();
    assert!(!response.is_success(), "sign-in unexpectedly succeeded");
    let message = response
        .error_message()
        .unwrap_or_else(|| panic!("no error message in {}", response.body));
    assert!(!message.is_empty());
}
