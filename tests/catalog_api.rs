use actix_web::{test, web, App};
use bookstore_server::{configure, AppState, Settings};

fn state() -> web::Data<AppState> {
    let config = Settings::new_for_test().expect("Failed to load test config");
    web::Data::new(AppState::new(config))
}

#[actix_web::test]
async fn test_list_all_books() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let resp = test::TestRequest::get().uri("/").send_request(&app).await;
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = test::read_body_json(resp).await;
    let books = body.as_object().expect("books keyed by id");
    assert_eq!(books.len(), 10);
    assert_eq!(books["1"]["title"], "Things Fall Apart");
    assert_eq!(books["8"]["author"], "Jane Austen");
}

#[actix_web::test]
async fn test_book_by_isbn() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let resp = test::TestRequest::get().uri("/isbn/8").send_request(&app).await;
    assert_eq!(resp.status(), 200);

    let book: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(book["id"], 8);
    assert_eq!(book["title"], "Pride and Prejudice");
    assert_eq!(book["author"], "Jane Austen");
    assert!(book["reviews"].as_object().unwrap().is_empty());
}

#[actix_web::test]
async fn test_unknown_isbn_is_not_found() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let resp = test::TestRequest::get().uri("/isbn/999").send_request(&app).await;
    assert_eq!(resp.status(), 404);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["status"], 404);
    assert!(body["error"]["message"].as_str().unwrap().contains("999"));

    let resp = test::TestRequest::get().uri("/isbn/not-a-number").send_request(&app).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_author_lookup_ignores_case() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let lower = test::TestRequest::get().uri("/author/austen").send_request(&app).await;
    assert_eq!(lower.status(), 200);
    let lower: serde_json::Value = test::read_body_json(lower).await;

    let upper = test::TestRequest::get().uri("/author/Austen").send_request(&app).await;
    assert_eq!(upper.status(), 200);
    let upper: serde_json::Value = test::read_body_json(upper).await;

    assert_eq!(lower, upper);
    let books = lower.as_array().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0]["title"], "Pride and Prejudice");
}

#[actix_web::test]
async fn test_author_lookup_decodes_path() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let resp = test::TestRequest::get()
        .uri("/author/Jane%20Austen")
        .send_request(&app)
        .await;
    assert_eq!(resp.status(), 200);
}

#[actix_web::test]
async fn test_author_without_books_is_not_found() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let resp = test::TestRequest::get().uri("/author/tolkien").send_request(&app).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_title_lookup_keeps_id_order() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let resp = test::TestRequest::get().uri("/title/the").send_request(&app).await;
    assert_eq!(resp.status(), 200);

    let books: serde_json::Value = test::read_body_json(resp).await;
    let ids: Vec<u64> = books
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["id"].as_u64().unwrap())
        .collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert!(ids.contains(&3));

    let resp = test::TestRequest::get().uri("/title/hobbit").send_request(&app).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_reviews_for_book() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    let resp = test::TestRequest::get().uri("/review/1").send_request(&app).await;
    assert_eq!(resp.status(), 200);
    let reviews: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(reviews, serde_json::json!({}));

    let resp = test::TestRequest::get().uri("/review/999").send_request(&app).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_non_canonical_isbn_is_not_found() {
    let app = test::init_service(App::new().app_data(state()).configure(configure)).await;

    for uri in ["/isbn/08", "/isbn/+8", "/isbn/%208", "/review/+8", "/review/08"] {
        let resp = test::TestRequest::get().uri(uri).send_request(&app).await;
        assert_eq!(resp.status(), 404, "{} should not name a book", uri);
    }

    let resp = test::TestRequest::get().uri("/review/8").send_request(&app).await;
    assert_eq!(resp.status(), 200);
}
