//! Client integration tests against a mock PawHub server.

use chrono::{DateTime, Utc};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pawhub_client::{ClientError, PawhubClient};
use pawhub_core::{
    AnimalType, Category, Listing, ListingDraft, ListingId, ListingPatch, ListingQuery,
    ListingStatus, Page, SortOrder,
};

fn listing(title: &str, category: Category, created: &str) -> Listing {
    let created_at: DateTime<Utc> = created.parse().unwrap();
    Listing {
        id: ListingId::generate(),
        category,
        animal_type: AnimalType::Cat,
        title: title.to_string(),
        description: "Саарал эм муур".to_string(),
        breed: None,
        tags: vec!["саарал".to_string()],
        location_city: "Эрдэнэт".to_string(),
        location_district: None,
        price: None,
        contact_name: None,
        contact_phone: "88001122".to_string(),
        contact_email: None,
        photos: vec!["/uploads/cat.jpg".to_string()],
        status: ListingStatus::Active,
        created_at,
        updated_at: created_at,
    }
}

fn error_body(code: &str, message: &str, details: Option<serde_json::Value>) -> serde_json::Value {
    let mut error = json!({ "code": code, "message": message });
    if let Some(details) = details {
        error["details"] = details;
    }
    json!({ "error": error })
}

async fn setup() -> (MockServer, PawhubClient) {
    let server = MockServer::start().await;
    let client = PawhubClient::new(server.uri()).unwrap();
    (server, client)
}

#[tokio::test]
async fn list_listings_sends_query_and_decodes_page() {
    let (server, client) = setup().await;
    let item = listing(
        "Муур өргөж авна уу",
        Category::Adoption,
        "2024-01-14T09:00:00Z",
    );
    let page = Page {
        items: vec![item.clone()],
        total_count: 13,
    };

    Mock::given(method("GET"))
        .and(path("/v1/listings"))
        .and(query_param("category", "ADOPTION"))
        .and(query_param("sort", "oldest"))
        .and(query_param("page", "2"))
        .and(query_param("pageSize", "12"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&page))
        .expect(1)
        .mount(&server)
        .await;

    let query = ListingQuery::new()
        .with_category(Category::Adoption)
        .with_sort(SortOrder::Oldest)
        .with_page(2, 12);
    let result = client.list_listings(&query).await.unwrap();

    assert_eq!(result.items, vec![item]);
    assert_eq!(result.total_count, 13);
    assert_eq!(result.total_pages(query.page_size), 2);
}

#[tokio::test]
async fn list_or_local_falls_back_on_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/listings"))
        .respond_with(ResponseTemplate::new(500).set_body_json(error_body(
            "internal_error",
            "An internal error occurred",
            None,
        )))
        .mount(&server)
        .await;

    let local = vec![
        listing("A", Category::Lost, "2024-01-15T09:00:00Z"),
        listing("B", Category::Adoption, "2024-01-14T09:00:00Z"),
        listing("C", Category::Found, "2024-01-13T09:00:00Z"),
    ];
    let query = ListingQuery::new().with_sort(SortOrder::Oldest).with_page(1, 2);

    let page = client.list_listings_or_local(&query, &local).await;

    let titles: Vec<_> = page.items.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, ["C", "B"]);
    assert_eq!(page.total_count, 3);
}

#[tokio::test]
async fn list_or_local_coerces_paging_like_the_service() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/listings"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let local = vec![
        listing("A", Category::Lost, "2024-01-15T09:00:00Z"),
        listing("B", Category::Adoption, "2024-01-14T09:00:00Z"),
        listing("C", Category::Found, "2024-01-13T09:00:00Z"),
    ];

    let page = client
        .list_listings_or_local(&ListingQuery::new().with_page(0, 2), &local)
        .await;
    let titles: Vec<_> = page.items.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, ["A", "B"]);

    let page = client
        .list_listings_or_local(&ListingQuery::new().with_page(-3, 0), &local)
        .await;
    let titles: Vec<_> = page.items.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, ["A"]);
    assert_eq!(page.total_count, 3);
}

#[tokio::test]
async fn list_or_local_prefers_remote_page() {
    let (server, client) = setup().await;
    let remote = Page {
        items: vec![listing("remote", Category::Found, "2024-02-01T09:00:00Z")],
        total_count: 1,
    };

    Mock::given(method("GET"))
        .and(path("/v1/listings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&remote))
        .mount(&server)
        .await;

    let local = vec![listing("local", Category::Lost, "2024-01-15T09:00:00Z")];
    let page = client
        .list_listings_or_local(&ListingQuery::new(), &local)
        .await;

    assert_eq!(page, remote);
}

#[tokio::test]
async fn get_listing_not_found() {
    let (server, client) = setup().await;
    let id = ListingId::generate();

    Mock::given(method("GET"))
        .and(path(format!("/v1/listings/{id}")))
        .respond_with(ResponseTemplate::new(404).set_body_json(error_body(
            "not_found",
            &format!("Listing not found: {id}"),
            None,
        )))
        .mount(&server)
        .await;

    let err = client.get_listing(&id).await.unwrap_err();

    assert!(matches!(err, ClientError::NotFound { message } if message.contains(&id.to_string())));
}

#[tokio::test]
async fn create_listing_maps_validation_error() {
    let (server, client) = setup().await;
    let draft = ListingDraft {
        category: Some(Category::Lost),
        animal_type: Some(AnimalType::Dog),
        title: Some("Нохой".to_string()),
        ..ListingDraft::default()
    };

    Mock::given(method("POST"))
        .and(path("/v1/listings"))
        .and(body_json(&draft))
        .respond_with(ResponseTemplate::new(400).set_body_json(error_body(
            "validation_error",
            "description: is required",
            Some(json!({ "field": "description" })),
        )))
        .mount(&server)
        .await;

    let err = client.create_listing(&draft).await.unwrap_err();

    match err {
        ClientError::Validation { field, .. } => assert_eq!(field, "description"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn create_listing_success() {
    let (server, client) = setup().await;
    let created = listing("Муур олдлоо", Category::Found, "2024-03-01T10:00:00Z");

    Mock::given(method("POST"))
        .and(path("/v1/listings"))
        .respond_with(ResponseTemplate::new(201).set_body_json(&created))
        .mount(&server)
        .await;

    let result = client
        .create_listing(&ListingDraft::default())
        .await
        .unwrap();

    assert_eq!(result, created);
}

#[tokio::test]
async fn update_listing_sends_patch() {
    let (server, client) = setup().await;
    let mut updated = listing("Муур", Category::Found, "2024-03-01T10:00:00Z");
    updated.status = ListingStatus::Resolved;
    let patch = ListingPatch {
        status: Some(ListingStatus::Resolved),
        ..ListingPatch::default()
    };

    Mock::given(method("PATCH"))
        .and(path(format!("/v1/listings/{}", updated.id)))
        .and(body_json(json!({ "status": "RESOLVED" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&updated))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.update_listing(&updated.id, &patch).await.unwrap();

    assert_eq!(result.status, ListingStatus::Resolved);
}

#[tokio::test]
async fn delete_listing_success() {
    let (server, client) = setup().await;
    let id = ListingId::generate();

    Mock::given(method("DELETE"))
        .and(path(format!("/v1/listings/{id}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "deleted": true, "id": id })),
        )
        .mount(&server)
        .await;

    let response = client.delete_listing(&id).await.unwrap();

    assert!(response.deleted);
    assert_eq!(response.id, id);
}

#[tokio::test]
async fn unparseable_error_body_becomes_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/v1/listings"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = client.list_listings(&ListingQuery::new()).await.unwrap_err();

    assert!(matches!(
        err,
        ClientError::Api { status: 502, ref code, .. } if code == "unknown"
    ));
}
