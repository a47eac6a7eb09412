//! Interactive shell: reads commands from stdin and redraws on every change.

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::{Action, App, Notice};
use crate::store::KeyValueStore;

const HELP: &str = "\
Commands:
  login <username> <password>  Log in
  logout                       Log out
  show                         Redraw the page
  help                         Show this help
  quit                         Leave the shell";

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Action(Action),
    Help,
    Quit,
    Empty,
}

fn parse_line(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(Input::Empty);
    };

    match command {
        "login" => {
            let (Some(username), Some(password), None) = (words.next(), words.next(), words.next())
            else {
                return Err("usage: login <username> <password>".to_string());
            };
            Ok(Input::Action(Action::Login {
                username: username.to_string(),
                password: password.to_string(),
            }))
        }
        "logout" => Ok(Input::Action(Action::Logout)),
        "show" | "render" => Ok(Input::Action(Action::Render)),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" | "q" => Ok(Input::Quit),
        other => Err(format!("unknown command '{other}' (try 'help')")),
    }
}

fn print_notices(notices: &[Notice]) {
    for notice in notices {
        eprintln!("! {notice}");
    }
}

fn redraw<S: KeyValueStore>(app: &App<S>) {
    println!("\n{}\n", app.page());
}

pub async fn run<S: KeyValueStore>(mut app: App<S>) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_notices(&app.dispatch(Action::Render).await);
    redraw(&app);
    println!("Type 'help' for commands.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                match parse_line(&line) {
                    Ok(Input::Action(action)) => {
                        print_notices(&app.dispatch(action).await);
                        redraw(&app);
                    }
                    Ok(Input::Help) => println!("{HELP}"),
                    Ok(Input::Quit) => break,
                    Ok(Input::Empty) => {}
                    Err(usage) => eprintln!("{usage}"),
                }
            }
            Some(event) = app.next_event(), if app.in_flight() > 0 => {
                if let Some(notice) = app.apply(event) {
                    print_notices(&[notice]);
                }
                redraw(&app);
            }
        }
    }

    Ok(())
}
