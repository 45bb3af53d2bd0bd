use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use comment_board::client::{ClientConfig, DEFAULT_API_URL};
use comment_board::models::Id;
use comment_board::render::render_board;
use comment_board::{CommentBoard, HttpCommentApi};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "board", about = "Terminal client for the comment board")]
struct Cli {
    /// Base URL of the comments API
    #[arg(long, env = "COMMENTS_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show the post and its comments
    List,
    /// Post a new comment
    Add { text: String },
    /// Replace the text of a comment
    Edit { id: Id, text: String },
    /// Delete a comment
    Delete {
        id: Id,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Like a comment
    Like { id: Id },
    /// Check that the API answers
    Check,
    /// Interactive session
    Shell,
}

fn prompt_yes_no(prompt: &str) -> bool {
    print!("{prompt} [y/N] ");
    let _ = io::stdout().flush();
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Prints the banner, if any, and turns it into the exit status.
fn finish(board: &CommentBoard) -> ExitCode {
    match board.error() {
        Some(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
        None => ExitCode::SUCCESS,
    }
}

async fn edit(board: &mut CommentBoard, id: Id, text: &str) -> bool {
    let Some(target) = board.comment(id).cloned() else {
        eprintln!("comment #{id} not found");
        return false;
    };
    board.begin_edit(&target);
    board.set_draft(text);
    board.save_edit(id).await;
    true
}

const SHELL_HELP: &str = "\
commands:
  list                 reload and show comments
  add <text>           post a comment
  edit <id>            start editing a comment
  draft <text>         replace the edit draft
  save                 save the edit
  cancel               leave edit mode
  delete <id>          delete a comment (asks first)
  like <id>            like a comment
  quit";

async fn shell(board: &mut CommentBoard) {
    board.load_comments().await;
    println!("{}", render_board(&*board));
    println!("{SHELL_HELP}");
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = line.trim();
        let (cmd, rest) = line.split_once(' ').map(|(c, r)| (c, r.trim())).unwrap_or((line, ""));
        let id = rest.parse::<Id>().ok();
        match (cmd, id) {
            ("", _) => continue,
            ("quit" | "exit", _) => break,
            ("help", _) => { println!("{SHELL_HELP}"); continue; }
            ("list", _) => board.load_comments().await,
            ("add", _) => {
                board.set_compose(rest);
                board.submit_compose().await;
            }
            ("edit", Some(id)) => match board.comment(id).cloned() {
                Some(c) => board.begin_edit(&c),
                None => { println!("comment #{id} not found"); continue; }
            },
            ("draft", _) => board.set_draft(rest),
            ("save", _) => match board.editing().map(|e| e.id) {
                Some(id) => board.save_edit(id).await,
                None => { println!("not editing"); continue; }
            },
            ("cancel", _) => board.cancel_edit(),
            ("delete", Some(id)) => { board.remove_comment(id, &mut prompt_yes_no).await; }
            ("like", Some(id)) => board.like_comment(id).await,
            _ => { println!("unknown command, try `help`"); continue; }
        }
        println!("{}", render_board(&*board));
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let mut board = CommentBoard::new(HttpCommentApi::new(ClientConfig::new(cli.api_url)));

    match cli.command {
        Command::List => {
            board.load_comments().await;
            println!("{}", render_board(&board));
        }
        Command::Add { text } => {
            board.set_compose(text);
            board.submit_compose().await;
            if let Some(c) = board.comments().first() {
                println!("posted comment #{}", c.id);
            }
        }
        Command::Edit { id, text } => {
            board.load_comments().await;
            if board.error().is_none() && !edit(&mut board, id, &text).await {
                return ExitCode::FAILURE;
            }
        }
        Command::Delete { id, yes } => {
            let sent = if yes {
                board.remove_comment(id, &mut |_: &str| true).await
            } else {
                board.remove_comment(id, &mut prompt_yes_no).await
            };
            if !sent {
                println!("cancelled");
            }
        }
        Command::Like { id } => {
            board.load_comments().await;
            if board.error().is_none() {
                if board.comment(id).is_none() {
                    eprintln!("comment #{id} not found");
                    return ExitCode::FAILURE;
                }
                board.like_comment(id).await;
                if let Some(c) = board.comment(id) {
                    println!("comment #{id} now has {} likes", c.likes);
                }
            }
        }
        Command::Check => {
            board.load_comments().await;
            if board.error().is_none() {
                println!("API reachable at {}: {} comments", board.api().config().base_url, board.comments().len());
                match board.comments().first() {
                    Some(c) => println!("first comment by: {}", c.author_name),
                    None => println!("no comments found; seed the server with COMMENTS_SEED_FILE"),
                }
            }
        }
        Command::Shell => shell(&mut board).await,
    }
    finish(&board)
}
