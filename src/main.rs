// src/main.rs
//
// Line-oriented front end over the catalog core. Each line is one UI event;
// the resulting view is printed as JSON.

use std::sync::Arc;

use anyhow::Context;
use log::info;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use moviehub::application::commands::*;
use moviehub::application::state::AppState;
use moviehub::config::ApiConfig;
use moviehub::events::{NavigationRequested, NetworkActivityChanged, ToastRaised};

const HELP: &str = "\
commands:
  tab <now_playing|top_rated|upcoming>
  search <keyword>      search immediately (empty keyword returns to the tab)
  type <keyword>        search after the debounce window
  genre <id>
  page <n>
  refresh
  genres
  open <movie id>
  list | detail | state
  help | quit";

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("failed to render output: {}", e),
    }
}

fn print_result<T: Serialize>(result: Result<T, String>) {
    match result {
        Ok(value) => print_json(&value),
        Err(error) => eprintln!("{}", error),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // 1. CONFIGURATION
    let config = ApiConfig::from_env().context("loading API configuration")?;

    // 2. APPLICATION STATE
    let state = Arc::new(AppState::build(&config).context("building application state")?);

    // 3. PRESENTATION SINKS
    state
        .event_bus
        .subscribe::<ToastRaised, _>(|toast| eprintln!("[toast] {}", toast.title));
    state
        .event_bus
        .subscribe::<NavigationRequested, _>(|nav| eprintln!("[navigate] {}", nav.route()));
    state
        .event_bus
        .subscribe::<NetworkActivityChanged, _>(|activity| {
            if activity.busy {
                eprintln!("[loading...]");
            }
        });

    info!("catalog ready, api at {}", config.base_url);

    // 4. INITIAL LOAD
    print_result(list_genres(&state).await.map(|genres| genres.len()));
    print_result(change_tab("now_playing".to_string(), &state).await);
    println!("{}", HELP);

    // 5. EVENT LOOP
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, argument) = match line.split_once(char::is_whitespace) {
            Some((command, argument)) => (command, argument.trim().to_string()),
            None => (line, String::new()),
        };

        match command {
            "" => continue,
            "tab" => print_result(change_tab(argument, &state).await),
            "search" => print_result(search_movies(argument, &state).await),
            "type" => {
                let state = Arc::clone(&state);
                tokio::spawn(async move {
                    if let Some(view) = type_search(argument, &state).await {
                        print_json(&view);
                    }
                });
            }
            "genre" => match argument.parse::<u64>() {
                Ok(genre_id) => print_result(select_genre(genre_id, &state).await),
                Err(_) => eprintln!("genre expects a numeric id"),
            },
            "page" => match argument.parse::<u32>() {
                Ok(page) => print_result(change_page(page, &state).await),
                Err(_) => eprintln!("page expects a number"),
            },
            "refresh" => print_result(refresh_list(&state).await),
            "genres" => print_result(list_genres(&state).await),
            "open" => print_result(open_movie(argument, &state).await),
            "list" => print_json(&list_view(&state)),
            "detail" => print_json(&detail_view(&state)),
            "state" => print_json(&filter_state(&state)),
            "help" => println!("{}", HELP),
            "quit" | "exit" => break,
            other => eprintln!("unknown command: {} (try help)", other),
        }
    }

    Ok(())
}
