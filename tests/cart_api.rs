use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode},
};
use greenmarket::{
    app,
    checkout::launcher::MockDeepLinkLauncher,
    db::create_lazy_pool,
    state::AppState,
};
use serde_json::{Value, json};
use tower::ServiceExt;

// The cart lives in memory, so these run without a reachable database.
fn test_app(launcher: MockDeepLinkLauncher) -> anyhow::Result<(Router, AppState)> {
    let pool = create_lazy_pool("postgres://greenmarket@localhost:1/greenmarket")?;
    let state = AppState::with_launcher(pool, Arc::new(launcher), "55");
    Ok((app(state.clone()), state))
}

fn product(id: &str, name: &str, price: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "price": price,
        "image": "https://example.com/p.jpg",
        "category": "panificados",
        "description": "",
        "producer": "Padaria do Bairro",
        "unit": "unidade"
    })
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body)?))?,
        None => request.body(Body::empty())?,
    };
    let response = app.clone().oneshot(request).await?;
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

#[tokio::test]
async fn add_merge_and_remove_through_the_api() -> anyhow::Result<()> {
    let (app, state) = test_app(MockDeepLinkLauncher::new())?;

    let bread = json!({ "product": product("1", "Pão", "10.00") });
    send(&app, Method::POST, "/api/cart", Some(bread.clone())).await?;
    send(&app, Method::POST, "/api/cart", Some(bread)).await?;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/cart",
        Some(json!({ "product": product("2", "Mel", "5.50") })),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["item_count"], 2);
    assert_eq!(body["data"]["items"][0]["quantity"], 2);
    assert_eq!(body["data"]["total"], "25.50");
    assert_eq!(body["meta"]["total"], 2);

    let (_, body) = send(&app, Method::DELETE, "/api/cart/2", None).await?;
    assert_eq!(body["data"]["item_count"], 1);
    assert_eq!(state.cart.snapshot().quantity_of("2"), 0);

    let (status, body) = send(&app, Method::DELETE, "/api/cart/missing", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["item_count"], 1);
    Ok(())
}

#[tokio::test]
async fn open_and_close_only_toggle_visibility() -> anyhow::Result<()> {
    let (app, _) = test_app(MockDeepLinkLauncher::new())?;
    send(
        &app,
        Method::POST,
        "/api/cart",
        Some(json!({ "product": product("1", "Pão", "12.50") })),
    )
    .await?;

    let (_, body) = send(&app, Method::POST, "/api/cart/visibility/open", None).await?;
    assert_eq!(body["data"]["is_open"], true);

    let (_, body) = send(&app, Method::POST, "/api/cart/visibility/close", None).await?;
    assert_eq!(body["data"]["is_open"], false);
    assert_eq!(body["data"]["item_count"], 1);
    Ok(())
}

#[tokio::test]
async fn checkout_of_empty_cart_is_a_no_op() -> anyhow::Result<()> {
    let mut launcher = MockDeepLinkLauncher::new();
    launcher.expect_open().never();
    let (app, _) = test_app(launcher)?;

    let (status, body) = send(&app, Method::POST, "/api/checkout", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Cart is empty");
    assert!(body["data"].is_null());
    Ok(())
}

#[tokio::test]
async fn unknown_route_returns_json_not_found() -> anyhow::Result<()> {
    let (app, _) = test_app(MockDeepLinkLauncher::new())?;
    let (status, body) = send(&app, Method::GET, "/api/nope", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["data"]["path"], "/api/nope");
    Ok(())
}

#[tokio::test]
async fn stock_routes_require_the_session_header() -> anyhow::Result<()> {
    let (app, _) = test_app(MockDeepLinkLauncher::new())?;
    let (status, body) = send(&app, Method::GET, "/api/stock", None).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Bad Request Missing x-user-id header");
    Ok(())
}

#[tokio::test]
async fn any_product_id_can_be_removed() -> anyhow::Result<()> {
    let (app, state) = test_app(MockDeepLinkLauncher::new())?;
    for id in ["open", "close", "visibility"] {
        send(
            &app,
            Method::POST,
            "/api/cart",
            Some(json!({ "product": product(id, "Produto", "1.00") })),
        )
        .await?;
    }

    for id in ["open", "close", "visibility"] {
        let (status, _) = send(&app, Method::DELETE, &format!("/api/cart/{id}"), None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(state.cart.snapshot().quantity_of(id), 0);
    }
    assert!(state.cart.snapshot().is_empty());
    assert!(!state.cart.snapshot().is_open());
    Ok(())
}
