//! Commands typed at the `posts` prompt and the text listing they print.

use std::fmt::Write;

use posts_view::{PostsPage, Prompter, Transport};

pub const HELP: &str = "\
commands:
  list          show the posts on the page
  add           add a post
  edit <n>      edit post n locally
  delete <n>    delete post n
  html          print the page as HTML
  help          show this help
  quit          leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    List,
    Add,
    /// 1-based position in the list.
    Edit(usize),
    /// 1-based position in the list.
    Delete(usize),
    Html,
    Help,
    Quit,
    /// Blank line.
    Nothing,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs a post number")]
    MissingPosition(&'static str),
    #[error("`{0}` is not a post number")]
    BadPosition(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(Command::Nothing);
        };
        match word {
            "list" | "ls" => Ok(Command::List),
            "add" => Ok(Command::Add),
            "edit" => position(words.next(), "edit").map(Command::Edit),
            "delete" | "rm" => position(words.next(), "delete").map(Command::Delete),
            "html" => Ok(Command::Html),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" | "q" => Ok(Command::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn position(word: Option<&str>, command: &'static str) -> Result<usize, CommandError> {
    let word = word.ok_or(CommandError::MissingPosition(command))?;
    match word.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::BadPosition(word.to_string())),
    }
}

/// Carry out `command` on `page` and return what should be printed.
///
/// `Quit` and `Nothing` are left to the caller and produce no output here.
pub fn run<T: Transport, P: Prompter>(page: &mut PostsPage<T, P>, command: Command) -> String {
    match command {
        Command::Nothing | Command::Quit => String::new(),
        Command::Help => format!("{HELP}\n"),
        Command::List => render_listing(page),
        Command::Html => format!("{}\n", page.document().outer_html(page.container())),
        Command::Add => {
            page.click(page.add_button());
            render_listing(page)
        }
        Command::Edit(n) | Command::Delete(n) => {
            let button = page.items().get(n - 1).map(|item| match command {
                Command::Edit(_) => item.edit_button,
                _ => item.delete_button,
            });
            let Some(button) = button else {
                return format!("no post #{n}\n");
            };
            page.click(button);
            render_listing(page)
        }
    }
}

/// One numbered entry per rendered post, read back from the document.
pub fn render_listing<T: Transport, P: Prompter>(page: &PostsPage<T, P>) -> String {
    let items = page.items();
    if items.is_empty() {
        return "no posts\n".to_string();
    }
    let document = page.document();
    let mut out = String::new();
    for (index, item) in items.iter().enumerate() {
        let _ = writeln!(
            out,
            "{}. [#{}] {}\n   {}",
            index + 1,
            item.post.id,
            document.text_content(item.title),
            document.text_content(item.body),
        );
    }
    out
}
