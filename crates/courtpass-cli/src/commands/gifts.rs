use std::io::{self, Write};

use courtpass_core::catalog::GiftBrowser;
use courtpass_core::search::SearchDebouncer;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::cli::{GiftCommands, GlobalOptions};
use crate::commands::common::{
    apply_query, build_container, canonical_filter, format_filter_lines, format_gift_lines,
    format_query_summary, list_items,
};
use crate::error::CliError;

const BROWSE_HELP: &str = "Commands: search <text>, filter <name>, fav <n>, clear, list, help, quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Search(String),
    Filter(String),
    Favorite(usize),
    Clear,
    List,
    Help,
    Quit,
}

pub async fn run_gifts(command: GiftCommands, options: &GlobalOptions) -> Result<(), CliError> {
    match command {
        GiftCommands::List {
            search,
            filters,
            json,
        } => {
            let mut browser = GiftBrowser::default();
            apply_query(&mut browser, search.as_deref(), &filters)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&list_items(&browser))?);
            } else {
                println!("{}", format_query_summary(&browser));
                for line in format_gift_lines(&browser) {
                    println!("{line}");
                }
            }
            Ok(())
        }
        GiftCommands::Filters { search, filters } => {
            let mut browser = GiftBrowser::default();
            apply_query(&mut browser, search.as_deref(), &filters)?;
            for line in format_filter_lines(&mut browser) {
                println!("{line}");
            }
            Ok(())
        }
        GiftCommands::Browse => {
            let container = build_container(options, None)?;
            let mut browser = container.gift_browser();
            let (mut debouncer, mut settled) = container.search_debouncer();
            let stdin = BufReader::new(tokio::io::stdin());
            browse_session(
                stdin,
                &mut io::stdout(),
                &mut browser,
                &mut debouncer,
                &mut settled,
            )
            .await
        }
    }
}

pub fn parse_browse_command(line: &str) -> Result<BrowseCommand, String> {
    let line = line.trim();
    let (head, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(head, rest)| (head, rest.trim()));

    match head.to_lowercase().as_str() {
        "search" | "s" => Ok(BrowseCommand::Search(rest.to_string())),
        "filter" | "f" => {
            if rest.is_empty() {
                Err("Usage: filter <name>".to_string())
            } else {
                Ok(BrowseCommand::Filter(rest.to_string()))
            }
        }
        "fav" => rest
            .parse::<usize>()
            .map(BrowseCommand::Favorite)
            .map_err(|_| format!("Usage: fav <n>, got '{rest}'")),
        "clear" => Ok(BrowseCommand::Clear),
        "" | "list" | "ls" => Ok(BrowseCommand::List),
        "help" | "?" => Ok(BrowseCommand::Help),
        "quit" | "exit" | "q" => Ok(BrowseCommand::Quit),
        other => Err(format!("Unknown command '{other}'. Type `help` for commands.")),
    }
}

/// Line-driven gifts screen. Results refresh on every command; the debouncer
/// only reports when a search has settled.
pub async fn browse_session<R, W>(
    input: R,
    out: &mut W,
    browser: &mut GiftBrowser,
    debouncer: &mut SearchDebouncer,
    settled: &mut UnboundedReceiver<String>,
) -> Result<(), CliError>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "{BROWSE_HELP}")?;
    render(out, browser)?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                match parse_browse_command(&line) {
                    Ok(BrowseCommand::Quit) => break,
                    Ok(command) => {
                        if let Err(error) = apply_browse_command(command, out, browser, debouncer) {
                            writeln!(out, "Error: {error}")?;
                        }
                    }
                    Err(message) => writeln!(out, "{message}")?,
                }
            }
            Some(query) = settled.recv() => {
                tracing::info!(
                    "Search settled on '{}' ({} results)",
                    query,
                    browser.visible_items().len()
                );
            }
        }
    }

    debouncer.cancel();
    Ok(())
}

fn apply_browse_command<W: Write>(
    command: BrowseCommand,
    out: &mut W,
    browser: &mut GiftBrowser,
    debouncer: &mut SearchDebouncer,
) -> Result<(), CliError> {
    match command {
        BrowseCommand::Search(text) => {
            browser.set_search_text(text.as_str());
            debouncer.schedule(text);
        }
        BrowseCommand::Filter(name) => {
            browser.select_filter(canonical_filter(&name)?);
            debouncer.cancel();
        }
        BrowseCommand::Favorite(position) => {
            let item = position
                .checked_sub(1)
                .and_then(|index| browser.visible_items().into_iter().nth(index))
                .ok_or(CliError::GiftNotFound(position))?;
            if browser.toggle_favorite(item.id) {
                writeln!(out, "Added '{}' to favorites", item.title)?;
            } else {
                writeln!(out, "Removed '{}' from favorites", item.title)?;
            }
            return Ok(());
        }
        BrowseCommand::Clear => {
            browser.reset();
            debouncer.cancel();
        }
        BrowseCommand::List => {}
        BrowseCommand::Help => {
            writeln!(out, "{BROWSE_HELP}")?;
            return Ok(());
        }
        BrowseCommand::Quit => return Ok(()),
    }
    render(out, browser)
}

fn render<W: Write>(out: &mut W, browser: &mut GiftBrowser) -> Result<(), CliError> {
    writeln!(out, "{}", format_filter_lines(browser).join("  "))?;
    writeln!(out, "{}", format_query_summary(browser))?;
    for line in format_gift_lines(browser) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}
