use cucumber::{given, then, when};
use storecheck::pages::ORDER_PLACED_MESSAGE;
use storecheck::ShippingDetails;

use crate::world::StoreWorld;

#[given("I am on the bstackdemo homepage")]
async fn open_home(world: &mut StoreWorld) {
    world.storefront().await.open_home().await.unwrap();
}

#[given("I click on Sign In link")]
async fn sign_in_panel_open(world: &mut StoreWorld) {
    click_sign_in(world).await;
}

#[when("I click on Sign In link")]
async fn click_sign_in(world: &mut StoreWorld) {
    world.storefront().await.login.open_login_panel().await.unwrap();
}

#[when(expr = "I log in with valid username {string} and password {string}")]
async fn log_in(world: &mut StoreWorld, username: String, password: String) {
    world
        .storefront()
        .await
        .login
        .login_with_valid_credentials(&username, &password)
        .await
        .unwrap();
}

#[when("I try log in without entering credentials")]
async fn log_in_without_credentials(world: &mut StoreWorld) {
    world
        .storefront()
        .await
        .login
        .login_without_credentials()
        .await
        .unwrap();
}

#[then("I should see an error message indicating login failed")]
async fn login_failed(world: &mut StoreWorld) {
    let message = world
        .storefront()
        .await
        .login
        .get_login_error_message()
        .await
        .unwrap();
    assert_eq!(message, "Invalid Username");
}

#[then(expr = "I should see {string} in the username header")]
async fn username_header(world: &mut StoreWorld, expected: String) {
    let username = world
        .storefront()
        .await
        .login
        .get_logged_in_username()
        .await
        .unwrap();
    assert_eq!(username, expected);
}

#[then("I should remain on the login page without being logged in")]
async fn still_on_login_page(world: &mut StoreWorld) {
    assert!(
        world.storefront().await.login.verify_login_page().await.unwrap(),
        "User is not on login page"
    );
}

#[then("I should logout successfully")]
async fn logout(world: &mut StoreWorld) {
    world.storefront().await.login.select_logout().await.unwrap();
}

#[when(expr = "I add {string} to the cart")]
async fn add_to_cart(world: &mut StoreWorld, product: String) {
    let store = world.storefront().await;
    store
        .product
        .add_product_to_cart(&product, &store.cart)
        .await
        .unwrap();
}

#[then(expr = "I see the side cart opens automatically with added {string} along with its {string}")]
async fn side_cart_lists(world: &mut StoreWorld, product: String, price: String) {
    world
        .storefront()
        .await
        .cart
        .validate_side_cart(&product, &price)
        .await
        .unwrap();
}

#[then("I should see the subtotal displayed correctly")]
async fn subtotal_correct(world: &mut StoreWorld) {
    world.storefront().await.cart.validate_subtotal().await.unwrap();
}

#[when("I proceed to the checkout page")]
async fn proceed_to_checkout(world: &mut StoreWorld) {
    world.storefront().await.cart.proceed_to_checkout().await.unwrap();
}

#[then("I should be on the checkout page")]
async fn on_checkout_page(world: &mut StoreWorld) {
    assert!(
        world
            .storefront()
            .await
            .checkout
            .verify_checkout_page()
            .await
            .unwrap(),
        "Checkout page was not loaded"
    );
}

#[then(expr = "I should see {string} and its {string} in the order summary")]
async fn order_summary_lists(world: &mut StoreWorld, product: String, price: String) {
    world
        .storefront()
        .await
        .checkout
        .verify_product_in_order_summary(&product, &price)
        .await
        .unwrap();
}

#[then("I should see total updated correctly in the order summary")]
async fn order_summary_total(world: &mut StoreWorld) {
    world
        .storefront()
        .await
        .checkout
        .check_order_summary_total()
        .await
        .unwrap();
}

#[when(
    expr = "I enter checkout details {string}, {string}, {string}, {string}, {string}"
)]
async fn enter_checkout_details(
    world: &mut StoreWorld,
    first_name: String,
    last_name: String,
    address: String,
    state_or_province: String,
    postcode: String,
) {
    let details = ShippingDetails {
        first_name,
        last_name,
        address,
        state_or_province,
        postcode,
    };
    world
        .storefront()
        .await
        .checkout
        .fill_checkout_form(&details)
        .await
        .unwrap();
}

#[when("I submit the order")]
async fn submit_order(world: &mut StoreWorld) {
    world.storefront().await.checkout.place_order().await.unwrap();
}

#[then("I should see an order confirmation message")]
async fn order_confirmed(world: &mut StoreWorld) {
    let message = world
        .storefront()
        .await
        .confirmation
        .get_confirmation_message()
        .await
        .unwrap();
    assert_eq!(message, ORDER_PLACED_MESSAGE);
}

#[when("I navigate to the side cart adding any items")]
async fn open_empty_side_cart(world: &mut StoreWorld) {
    world
        .storefront()
        .await
        .cart
        .navigate_to_side_cart_without_adding_items()
        .await
        .unwrap();
}

#[then("I should see continue shopping button instead of checkout")]
async fn continue_shopping_shown(world: &mut StoreWorld) {
    assert!(world
        .storefront()
        .await
        .cart
        .check_presence_of_continue_shopping_button()
        .await
        .unwrap());
}
