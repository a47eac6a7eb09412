//! CLI command execution.

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use crate::api::ApiClient;
use crate::app::{Action, App, Notice};
use crate::config::Config;
use crate::logging;
use crate::session::SessionContext;
use crate::store::{FileStore, KeyValueStore, MemoryStore, SessionStore};
use crate::view;

use super::args::{Cli, Commands};
use super::shell;

// === Command Execution ===

pub async fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(url) = cli.base_url {
        config.api.base_url = url;
    }
    if let Some(dir) = cli.storage_dir {
        config.storage.dir = Some(dir);
    }

    let level = if cli.verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    logging::init(level);
    let api = ApiClient::new(&config.api.base_url);
    debug!(base_url = api.base_url(), "configuration loaded");

    if cli.ephemeral {
        run(cli.command, api, MemoryStore::new()).await
    } else {
        let store = FileStore::new(config.storage_dir()?);
        debug!(dir = %store.dir().display(), "using file store");
        run(cli.command, api, store).await
    }
}

async fn run<S: KeyValueStore>(command: Option<Commands>, api: ApiClient, backend: S) -> Result<()> {
    let ctx = SessionContext::restore(api, SessionStore::new(backend))
        .context("Failed to restore stored session")?;

    match command {
        None => show_page(App::new(ctx)).await,
        Some(Commands::Login { username, password }) => login(&ctx, &username, password).await,
        Some(Commands::Logout) => logout(&ctx),
        Some(Commands::Me { open_avatar }) => show_me(&ctx, open_avatar),
        Some(Commands::News) => show_news(App::new(ctx)).await,
        Some(Commands::Shell) => shell::run(App::new(ctx)).await,
    }
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        eprintln!("error: {notice}");
    }
}

async fn show_page<S: KeyValueStore>(mut app: App<S>) -> Result<()> {
    let mut notices = app.dispatch(Action::Render).await;
    notices.extend(app.settle().await);
    println!("{}", app.page());
    print_notices(&notices);
    Ok(())
}

async fn show_news<S: KeyValueStore>(mut app: App<S>) -> Result<()> {
    let mut notices = app.dispatch(Action::Render).await;
    notices.extend(app.settle().await);
    println!("{}", app.page().content);
    print_notices(&notices);
    Ok(())
}

async fn read_password() -> Result<String> {
    eprint!("Password: ");
    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("Failed to read password from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

async fn login<S: KeyValueStore>(
    ctx: &SessionContext<S>,
    username: &str,
    password: Option<String>,
) -> Result<()> {
    let password = match password {
        Some(p) => p,
        None => read_password().await?,
    };

    match ctx.login(username, &password).await {
        Ok(profile) => {
            println!("Hello, {}", profile.name);
            Ok(())
        }
        Err(e) => bail!("Login failed: {e}"),
    }
}

fn logout<S: KeyValueStore>(ctx: &SessionContext<S>) -> Result<()> {
    let was_authenticated = ctx.is_authenticated();
    ctx.logout().context("Failed to clear stored session")?;
    if was_authenticated {
        println!("Logged out.");
    } else {
        println!("Not logged in.");
    }
    Ok(())
}

fn show_me<S: KeyValueStore>(ctx: &SessionContext<S>, open_avatar: bool) -> Result<()> {
    let header = view::header(&ctx.session());
    println!("{header}");

    if open_avatar {
        match ctx.profile() {
            Some(profile) => open::that(&profile.avatar_url)
                .with_context(|| format!("Failed to open {}", profile.avatar_url))?,
            None => bail!("No profile loaded; log in first"),
        }
    }
    Ok(())
}
