use std::fmt::Write as _;

use chrono::{DateTime, Utc};

use crate::board::{CommentBoard, EditState};
use crate::client::CommentApi;
use crate::models::Comment;

pub const POST_TITLE: &str = "What backend technology should I use as a solo developer?";
pub const POST_DESCRIPTION: &str = "I'm starting a new project and need to choose a backend technology. \
I'll be working solo, so I need something that's efficient to set up and maintain. \
What would you recommend?";
pub const POST_AUTHOR: &str = "SoloDev";
pub const POST_AGE: &str = "2 days ago";

pub const EMPTY_MESSAGE: &str = "No comments yet. Be the first to share your thoughts!";
pub const LOADING_MESSAGE: &str = "Loading comments...";

/// `Oct 19, 2026, 07:10 AM`
pub fn format_date(at: &DateTime<Utc>) -> String {
    at.format("%b %-d, %Y, %I:%M %p").to_string()
}

/// Upper-cased first character of the author's name, `?` when there is none.
pub fn avatar_initial(author_name: &str) -> String {
    author_name
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_else(|| "?".to_string())
}

fn render_comment(out: &mut String, c: &Comment, draft: Option<&str>) {
    let _ = writeln!(out, "[{}] {} · {} · #{}", avatar_initial(&c.author_name), c.author_name, format_date(&c.created_at), c.id);
    match draft {
        Some(draft) => {
            for line in draft.lines() {
                let _ = writeln!(out, "  > {line}");
            }
            let _ = writeln!(out, "  (editing: save / cancel)");
        }
        None => {
            for line in c.text.lines() {
                let _ = writeln!(out, "  {line}");
            }
            if let Some(image) = &c.image {
                let _ = writeln!(out, "  image: {image}");
            }
            let _ = writeln!(out, "  👍 {}", c.likes);
        }
    }
}

/// Text view of the whole page: fixed post, banner, then the comment list.
pub fn render_board<A: CommentApi>(board: &CommentBoard<A>) -> String {
    render_page(board.comments(), board.editing(), board.is_loading(), board.error())
}

fn render_page(comments: &[Comment], editing: Option<&EditState>, loading: bool, error: Option<&str>) -> String {
    let mut out = String::new();
    let count = comments.len();
    let _ = writeln!(out, "{POST_TITLE}");
    let _ = writeln!(out, "{POST_DESCRIPTION}");
    let _ = writeln!(out, "Posted by {POST_AUTHOR} · {POST_AGE} · {count} comments");
    let _ = writeln!(out);
    if let Some(err) = error {
        let _ = writeln!(out, "! {err}");
        let _ = writeln!(out);
    }
    let _ = writeln!(out, "Comments ({count})");
    if loading {
        let _ = writeln!(out, "{LOADING_MESSAGE}");
    }
    if count == 0 && !loading {
        let _ = writeln!(out, "{EMPTY_MESSAGE}");
        return out;
    }
    for c in comments {
        let draft = editing.filter(|e| e.id == c.id).map(|e| e.draft.as_str());
        let _ = writeln!(out);
        render_comment(&mut out, c, draft);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::fake::{comment, FakeApi};
    use crate::board::FETCH_FAILED;
    use crate::client::{ClientConfig, HttpCommentApi};
    use chrono::TimeZone;

    #[test]
    fn date_matches_locale_style() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 7, 10, 0).unwrap();
        assert_eq!(format_date(&at), "Oct 19, 2026, 07:10 AM");
        let pm = Utc.with_ymd_and_hms(2024, 3, 5, 18, 4, 0).unwrap();
        assert_eq!(format_date(&pm), "Mar 5, 2024, 06:04 PM");
    }

    #[test]
    fn avatar_uses_first_letter() {
        assert_eq!(avatar_initial("sam"), "S");
        assert_eq!(avatar_initial(""), "?");
    }

    #[test]
    fn empty_board_shows_invitation() {
        let board = CommentBoard::new(HttpCommentApi::new(ClientConfig::new("http://unused")));
        let view = render_board(&board);
        assert!(view.starts_with(POST_TITLE));
        assert!(view.contains("0 comments"));
        assert!(view.contains("Comments (0)"));
        assert!(view.contains(EMPTY_MESSAGE));
    }

    #[tokio::test]
    async fn loaded_board_lists_every_comment() {
        let mut pic = comment(2, "Rust and axum");
        pic.image = Some("https://img.example/stack.png".into());
        pic.likes = 3;
        let mut board = CommentBoard::new(FakeApi::with(vec![pic, comment(1, "Go with Django")]));
        board.load_comments().await;
        let view = render_board(&board);
        assert!(view.contains("2 comments"));
        assert!(view.contains("Comments (2)"));
        assert!(!view.contains(EMPTY_MESSAGE));
        assert!(view.contains("  image: https://img.example/stack.png"));
        assert!(view.contains("  👍 3"));
        assert!(view.contains("  👍 0"));
        assert!(view.find("Rust and axum").unwrap() < view.find("Go with Django").unwrap());
    }

    #[tokio::test]
    async fn comment_under_edit_shows_draft_and_hints() {
        let mut board = CommentBoard::new(FakeApi::with(vec![comment(1, "Go with Django"), comment(2, "Rails")]));
        board.load_comments().await;
        let target = board.comments()[0].clone();
        board.begin_edit(&target);
        board.set_draft("Go with FastAPI\nor Flask");
        let view = render_board(&board);
        assert!(view.contains("  > Go with FastAPI\n  > or Flask\n  (editing: save / cancel)"));
        assert!(!view.contains("  Go with Django"));
        assert!(view.contains("  Rails"));
        assert_eq!(view.matches("(editing: save / cancel)").count(), 1);
    }

    #[tokio::test]
    async fn failed_load_shows_banner() {
        let mut board = CommentBoard::new(FakeApi::default());
        board.api().set_down(true);
        board.load_comments().await;
        let view = render_board(&board);
        assert!(view.contains(&format!("! {FETCH_FAILED}")));
        assert!(view.contains(EMPTY_MESSAGE));
    }

    #[test]
    fn loading_replaces_invitation() {
        let view = render_page(&[], None, true, None);
        assert!(view.contains(LOADING_MESSAGE));
        assert!(!view.contains(EMPTY_MESSAGE));

        let existing = [comment(7, "still here")];
        let view = render_page(&existing, None, true, None);
        assert!(view.contains("1 comments"));
        assert!(view.contains(LOADING_MESSAGE));
        assert!(view.contains("  still here"));
    }
}
