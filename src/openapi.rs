use crate::models::{Comment, NewComment, PatchComment, UpdateComment};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::list_comments,
        crate::routes::create_comment,
        crate::routes::get_comment,
        crate::routes::update_comment,
        crate::routes::patch_comment,
        crate::routes::delete_comment,
    ),
    components(schemas(Comment, NewComment, UpdateComment, PatchComment)),
    tags(
        (name = "comments", description = "Comment operations"),
    )
)]
pub struct ApiDoc;
