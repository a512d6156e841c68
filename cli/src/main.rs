//! # posts
//!
//! Terminal host for the posts page: it plays the part of the browser,
//! clicking buttons on the user's behalf and answering prompts from a line editor.

mod commands;
mod config;
mod terminal;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use posts_core::PostsClient;
use posts_view::{page_skeleton, PostsApi, PostsPage, UreqTransport};
use tracing_subscriber::EnvFilter;

use crate::commands::{render_listing, run, Command};
use crate::config::Config;
use crate::terminal::{EditorLines, TerminalPrompter};

#[derive(Debug, Parser)]
#[command(name = "posts", about = "List, add, edit and delete posts on a REST endpoint")]
struct Args {
    /// Configuration file; missing files fall back to defaults.
    #[arg(long, default_value = "posts.toml")]
    config: PathBuf,

    /// URL of the posts collection, overriding config and environment.
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(&args.config)?;
    if let Some(base_url) = args.base_url {
        config.api.base_url = base_url;
    }
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .with_writer(io::stderr)
        .init();

    let api = PostsApi::new(PostsClient::new(&config.api.base_url), UreqTransport::new());
    tracing::info!(endpoint = %api.client().endpoint(), "starting");
    let prompter = TerminalPrompter::new(EditorLines::new()?);
    let mut page = PostsPage::mount(page_skeleton()?, api, prompter)?;

    page.init();
    print!("{}", render_listing(&page));

    while let Some(line) = page.prompter_mut().read_line("> ") {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => print!("{}", run(&mut page, command)),
            Err(err) => println!("{err}"),
        }
    }

    io::stdout().flush()?;
    Ok(())
}
