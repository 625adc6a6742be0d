//! The client against the reference backend and against stub servers.

mod common;

use chrono::Utc;
use shop_console::domain::{NewOrder, NewProduct, NewUser};
use shop_console::{ApiClient, ClientError};

fn ann() -> NewUser {
    NewUser {
        name: "Ann".to_string(),
        email: "a@x.com".to_string(),
    }
}

fn lamp() -> NewProduct {
    NewProduct {
        name: "Lamp".to_string(),
        price: 12.5,
        description: None,
    }
}

fn api_message(err: ClientError) -> (u16, String) {
    match err {
        ClientError::Api { status, message } => (status, message),
        other => panic!("expected an API error, got {:?}", other),
    }
}

// ── Users ─────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn created_user_shows_up_in_list() {
    let client = ApiClient::new(common::spawn_backend());

    client.users().create(&ann()).await.expect("create failed");
    let users = client.users().list().await.expect("list failed");

    assert_eq!(users.len(), 1);
    assert_eq!(users[0].name, "Ann");
    assert_eq!(users[0].email, "a@x.com");
    assert!(users[0].id > 0);
}

#[tokio::test]
async fn deleted_user_is_gone_from_list() {
    let client = ApiClient::new(common::spawn_backend());
    client.users().create(&ann()).await.unwrap();
    client
        .users()
        .create(&NewUser {
            name: "Bob".to_string(),
            email: "b@x.com".to_string(),
        })
        .await
        .unwrap();
    let ann_id = client.users().list().await.unwrap()[0].id;

    client.users().delete(ann_id).await.expect("delete failed");

    let users = client.users().list().await.unwrap();
    assert!(users.iter().all(|u| u.id != ann_id));
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn list_keeps_server_order() {
    let client = ApiClient::new(common::spawn_backend());
    for name in ["Cy", "Ann", "Bob"] {
        client
            .users()
            .create(&NewUser {
                name: name.to_string(),
                email: format!("{}@x.com", name.to_lowercase()),
            })
            .await
            .unwrap();
    }

    let names: Vec<String> = client
        .users()
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|u| u.name)
        .collect();

    assert_eq!(names, vec!["Cy", "Ann", "Bob"]);
}

#[tokio::test]
async fn duplicate_email_surfaces_server_message() {
    let client = ApiClient::new(common::spawn_backend());
    client.users().create(&ann()).await.unwrap();

    let err = client.users().create(&ann()).await.unwrap_err();

    assert_eq!(api_message(err), (409, "Email already exists".to_string()));
}

#[tokio::test]
async fn create_user_posts_exact_json_to_the_collection() {
    let (base_url, requests) = common::spawn_recorder(201, "{}");
    let client = ApiClient::new(base_url);

    client.users().create(&ann()).await.expect("create failed");

    let requests = requests.lock().unwrap();
    assert_eq!(
        *requests,
        vec![common::Recorded {
            method: "POST".to_string(),
            path: "/api/users".to_string(),
            content_type: Some("application/json".to_string()),
            body: r#"{"name":"Ann","email":"a@x.com"}"#.to_string(),
        }]
    );
}

#[tokio::test]
async fn each_operation_hits_its_method_and_path() {
    let (base_url, requests) = common::spawn_recorder(200, "[]");
    let client = ApiClient::new(base_url);

    client.products().create(&lamp()).await.unwrap();
    client.products().delete(4).await.unwrap();
    client.users().delete(9).await.unwrap();
    client
        .orders()
        .create(&NewOrder {
            user_id: 3,
            product_id: 7,
            quantity: 2,
        })
        .await
        .unwrap();
    assert!(client.orders().list().await.unwrap().is_empty());

    let seen: Vec<(String, String, String)> = requests
        .lock()
        .unwrap()
        .iter()
        .map(|r| (r.method.clone(), r.path.clone(), r.body.clone()))
        .collect();
    let expected = [
        ("POST", "/api/products", r#"{"name":"Lamp","price":12.5,"description":null}"#),
        ("DELETE", "/api/products/4", ""),
        ("DELETE", "/api/users/9", ""),
        ("POST", "/api/orders", r#"{"user_id":3,"product_id":7,"quantity":2}"#),
        ("GET", "/api/orders", ""),
    ];
    let expected: Vec<(String, String, String)> = expected
        .iter()
        .map(|(m, p, b)| (m.to_string(), p.to_string(), b.to_string()))
        .collect();
    assert_eq!(seen, expected);
}

// ── Error extraction ──────────────────────────────────────────────────────────

#[tokio::test]
async fn error_field_is_surfaced_verbatim() {
    let client = ApiClient::new(common::spawn_stub(400, r#"{"error": "email already exists"}"#));

    let err = client.users().create(&ann()).await.unwrap_err();

    assert_eq!(err.to_string(), "email already exists");
}

#[tokio::test]
async fn unparseable_failure_body_uses_operation_fallback() {
    let client = ApiClient::new(common::spawn_stub(500, "upstream exploded"));

    let create = client.users().create(&ann()).await.unwrap_err();
    let list = client.users().list().await.unwrap_err();
    let delete = client.products().delete(4).await.unwrap_err();
    let order = client
        .orders()
        .create(&NewOrder {
            user_id: 1,
            product_id: 1,
            quantity: 1,
        })
        .await
        .unwrap_err();

    assert_eq!(api_message(create), (500, "Failed to create user".to_string()));
    assert_eq!(list.to_string(), "Failed to fetch users");
    assert_eq!(delete.to_string(), "Failed to delete product");
    assert_eq!(order.to_string(), "Failed to create order");
}

#[tokio::test]
async fn success_with_unreadable_list_is_an_api_error() {
    let client = ApiClient::new(common::spawn_stub(200, r#"{"users": []}"#));

    let err = client.users().list().await.unwrap_err();

    assert_eq!(api_message(err), (200, "Failed to fetch users".to_string()));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let client = ApiClient::new(common::dead_base_url());

    let err = client.products().list().await.unwrap_err();

    assert!(matches!(err, ClientError::Transport(_)), "got {:?}", err);
}

#[tokio::test]
async fn failures_do_not_poison_the_client() {
    let client = ApiClient::new(common::spawn_backend());

    assert!(client.users().delete(1).await.is_err());
    client.users().create(&ann()).await.expect("client still usable");
    assert_eq!(client.users().list().await.unwrap().len(), 1);
}

// ── Products ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn product_price_round_trips_as_number() {
    let client = ApiClient::new(common::spawn_backend());

    client.products().create(&lamp()).await.expect("create failed");
    let products = client.products().list().await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].price, 12.5);
    assert_eq!(products[0].description, None);
}

#[tokio::test]
async fn negative_price_is_rejected_by_server() {
    let client = ApiClient::new(common::spawn_backend());

    let err = client
        .products()
        .create(&NewProduct {
            price: -1.0,
            ..lamp()
        })
        .await
        .unwrap_err();

    assert_eq!(api_message(err), (400, "Price must be non-negative".to_string()));
}

#[tokio::test]
async fn deleting_unknown_product_reports_not_found() {
    let client = ApiClient::new(common::spawn_backend());

    let err = client.products().delete(99).await.unwrap_err();

    assert_eq!(api_message(err), (404, "Product not found".to_string()));
}

// ── Orders ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn order_gets_server_computed_total_and_timestamp() {
    let client = ApiClient::new(common::spawn_backend());
    let before = Utc::now();
    client.users().create(&ann()).await.unwrap();
    client.products().create(&lamp()).await.unwrap();
    let user_id = client.users().list().await.unwrap()[0].id;
    let product_id = client.products().list().await.unwrap()[0].id;

    client
        .orders()
        .create(&NewOrder {
            user_id,
            product_id,
            quantity: 2,
        })
        .await
        .expect("order failed");

    let orders = client.orders().list().await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].user_id, user_id);
    assert_eq!(orders[0].product_id, product_id);
    assert_eq!(orders[0].quantity, 2);
    assert_eq!(orders[0].total_price, 25.0);
    assert!(orders[0].created_at >= before);
}

#[tokio::test]
async fn order_for_unknown_user_is_refused() {
    let client = ApiClient::new(common::spawn_backend());
    client.products().create(&lamp()).await.unwrap();

    let err = client
        .orders()
        .create(&NewOrder {
            user_id: 42,
            product_id: 1,
            quantity: 1,
        })
        .await
        .unwrap_err();

    assert_eq!(api_message(err), (404, "User not found".to_string()));
    assert!(client.orders().list().await.unwrap().is_empty());
}
