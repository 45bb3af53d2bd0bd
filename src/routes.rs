use std::sync::Arc;
use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::models::*;
use crate::repo::Repo;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(json_config())
            .service(
                web::resource("/comments/")
                    .route(web::get().to(list_comments))
                    .route(web::post().to(create_comment)),
            )
            .service(
                web::resource("/comments/{id}/")
                    .route(web::get().to(get_comment))
                    .route(web::put().to(update_comment))
                    .route(web::patch().to(patch_comment))
                    .route(web::delete().to(delete_comment)),
            ),
    );
}

/// Malformed or incomplete bodies answer with the same `{error}` JSON as every other failure.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        tracing::debug!("rejected request body: {err}");
        ApiError::BadRequest(err.to_string()).into()
    })
}

#[derive(Clone)]
pub struct AppState { pub repo: Arc<dyn Repo> }

fn require_text(text: &str) -> Result<String, ApiError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ApiError::BadRequest("text may not be blank".into()));
    }
    Ok(trimmed.to_string())
}

#[utoipa::path(
    get,
    path = "/api/comments/",
    responses(
        (status = 200, description = "List comments, newest first", body = [Comment])
    )
)]
pub async fn list_comments(data: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let comments = data.repo.list_comments().await?;
    Ok(HttpResponse::Ok().json(comments))
}

#[utoipa::path(
    post,
    path = "/api/comments/",
    request_body = NewComment,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Blank text")
    )
)]
pub async fn create_comment(
    data: web::Data<AppState>,
    payload: web::Json<NewComment>,
) -> Result<HttpResponse, ApiError> {
    let NewComment { text, image } = payload.into_inner();
    let text = require_text(&text)?;
    let author = data.repo.ensure_author(NewAuthor::admin()).await?;
    let comment = data.repo
        .create_comment(CommentDraft { text, author: author.id, likes: 0, image })
        .await?;
    tracing::info!(id = comment.id, "comment created");
    Ok(HttpResponse::Created().json(comment))
}

#[utoipa::path(
    get,
    path = "/api/comments/{id}/",
    params(("id" = Id, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment", body = Comment),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn get_comment(data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    let comment = data.repo.get_comment(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[utoipa::path(
    put,
    path = "/api/comments/{id}/",
    request_body = UpdateComment,
    params(("id" = Id, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment replaced", body = Comment),
        (status = 400, description = "Blank text"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn update_comment(
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<UpdateComment>,
) -> Result<HttpResponse, ApiError> {
    let text = require_text(&payload.text)?;
    let patch = PatchComment { text: Some(text), ..Default::default() };
    let comment = data.repo.update_comment(path.into_inner(), patch).await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[utoipa::path(
    patch,
    path = "/api/comments/{id}/",
    request_body = PatchComment,
    params(("id" = Id, Path, description = "Comment id")),
    responses(
        (status = 200, description = "Comment updated", body = Comment),
        (status = 400, description = "Blank text"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn patch_comment(
    data: web::Data<AppState>,
    path: web::Path<Id>,
    payload: web::Json<PatchComment>,
) -> Result<HttpResponse, ApiError> {
    let mut patch = payload.into_inner();
    if let Some(text) = patch.text.take() {
        patch.text = Some(require_text(&text)?);
    }
    let comment = data.repo.update_comment(path.into_inner(), patch).await?;
    Ok(HttpResponse::Ok().json(comment))
}

#[utoipa::path(
    delete,
    path = "/api/comments/{id}/",
    params(("id" = Id, Path, description = "Comment id")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 404, description = "Comment not found")
    )
)]
pub async fn delete_comment(data: web::Data<AppState>, path: web::Path<Id>) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    data.repo.delete_comment(id).await?;
    tracing::info!(id, "comment deleted");
    Ok(HttpResponse::NoContent().finish())
}
