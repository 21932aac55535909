use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::auth::Identity;
use crate::catalog::parse_isbn;
use crate::error::AppError;
use crate::AppState;

pub async fn list_books(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.catalog.get_all().await)
}

pub async fn book_by_isbn(
    isbn: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let isbn = parse_isbn(&isbn)?;
    let book = state.catalog.get_by_isbn(isbn).await?;
    Ok(HttpResponse::Ok().json(book))
}

pub async fn books_by_author(
    author: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let books = state.catalog.get_by_author(&author).await?;
    Ok(HttpResponse::Ok().json(books))
}

pub async fn books_by_title(
    title: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let books = state.catalog.get_by_title(&title).await?;
    Ok(HttpResponse::Ok().json(books))
}

pub async fn book_reviews(
    isbn: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let isbn = parse_isbn(&isbn)?;
    let reviews = state.catalog.get_reviews(isbn).await?;
    Ok(HttpResponse::Ok().json(reviews))
}

#[derive(Debug, Deserialize)]
pub struct ReviewQuery {
    #[serde(default)]
    pub review: String,
}

pub async fn put_review(
    isbn: web::Path<String>,
    query: web::Query<ReviewQuery>,
    identity: web::ReqData<Identity>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let isbn = parse_isbn(&isbn)?;
    let review = state
        .catalog
        .upsert_review(isbn, &identity.username, &query.review)
        .await?;

    info!("User {} reviewed ISBN {}", identity.username, isbn);
    Ok(HttpResponse::Ok().json(json!({
        "message": format!(
            "Review for ISBN {} by {} successfully added/modified.",
            isbn, identity.username
        ),
        "review": review,
    })))
}

pub async fn delete_review(
    isbn: web::Path<String>,
    identity: web::ReqData<Identity>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let isbn = parse_isbn(&isbn)?;
    state.catalog.delete_review(isbn, &identity.username).await?;

    info!("User {} deleted review for ISBN {}", identity.username, isbn);
    Ok(HttpResponse::Ok().json(json!({
        "message": format!(
            "Review for ISBN {} by {} successfully deleted.",
            isbn, identity.username
        ),
    })))
}
