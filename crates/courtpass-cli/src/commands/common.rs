use std::collections::BTreeSet;
use std::sync::Arc;

use courtpass_core::auth::FederatedIdentityProvider;
use courtpass_core::catalog::GiftBrowser;
use courtpass_core::models::{GiftItem, DISPLAY_PRIORITY, FILTER_NAMES};
use courtpass_core::services::AppContainer;
use serde::Serialize;

use crate::authorizer::TerminalAuthorizer;
use crate::cli::GlobalOptions;
use crate::config::load_client_config;
use crate::error::CliError;
use crate::secret_store::KeyringSecretBackend;

#[derive(Debug, Serialize)]
pub struct GiftListItem {
    pub position: usize,
    pub id: String,
    pub title: String,
    pub price: String,
    pub delivery_days: u32,
    pub category: String,
    pub popular: bool,
    pub new: bool,
    pub favorite: bool,
}

/// Wire the container for this invocation: mocks with `--mock`, otherwise
/// the JSON-RPC client over the OS keychain.
pub fn build_container(
    options: &GlobalOptions,
    id_token: Option<String>,
) -> Result<AppContainer, CliError> {
    let config = load_client_config(options.config_path.as_deref())?;
    if options.mock {
        return Ok(AppContainer::mock(config)?);
    }

    let identity = Arc::new(FederatedIdentityProvider::new(
        TerminalAuthorizer::from_env(id_token),
        &config,
    ));
    let backend = KeyringSecretBackend::new(config.keyring_service.clone());
    Ok(AppContainer::bootstrap(config, identity, backend)?)
}

/// Case-insensitive lookup of a filter name.
pub fn canonical_filter(name: &str) -> Result<&'static str, CliError> {
    let name = name.trim();
    DISPLAY_PRIORITY
        .into_iter()
        .find(|candidate| candidate.eq_ignore_ascii_case(name))
        .ok_or_else(|| CliError::UnknownFilter(name.to_string()))
}

/// Select `filters` then type `search`, the way a user would on the gifts screen.
pub fn apply_query(
    browser: &mut GiftBrowser,
    search: Option<&str>,
    filters: &[String],
) -> Result<(), CliError> {
    let selected = filters
        .iter()
        .map(|name| canonical_filter(name))
        .collect::<Result<BTreeSet<_>, _>>()?;
    for filter in selected {
        browser.select_filter(filter);
    }
    if let Some(search) = search {
        browser.set_search_text(search);
    }
    Ok(())
}

pub fn gift_to_list_item(position: usize, item: &GiftItem, favorite: bool) -> GiftListItem {
    GiftListItem {
        position,
        id: item.id.to_string(),
        title: item.title.clone(),
        price: item.price.clone(),
        delivery_days: item.delivery_days,
        category: item.category.clone(),
        popular: item.is_popular,
        new: item.is_new,
        favorite,
    }
}

pub fn list_items(browser: &GiftBrowser) -> Vec<GiftListItem> {
    browser
        .visible_items()
        .iter()
        .enumerate()
        .map(|(index, item)| gift_to_list_item(index + 1, item, browser.is_favorite(item.id)))
        .collect()
}

pub fn format_gift_line(item: &GiftListItem) -> String {
    let marker = if item.favorite { '*' } else { ' ' };
    let days = if item.delivery_days == 1 { "day" } else { "days" };
    let mut line = format!(
        "{:>2}. {marker} {:<24} {:>8}  {:<12} {} {days}",
        item.position, item.title, item.price, item.category, item.delivery_days
    );
    if item.popular {
        line.push_str(" [popular]");
    }
    if item.new {
        line.push_str(" [new]");
    }
    line
}

pub fn format_gift_lines(browser: &GiftBrowser) -> Vec<String> {
    let items = list_items(browser);
    if items.is_empty() {
        return vec!["No gifts match.".to_string()];
    }
    items.iter().map(format_gift_line).collect()
}

/// One line per filter chip: `[x]` when active, with its current label.
pub fn format_filter_lines(browser: &mut GiftBrowser) -> Vec<String> {
    FILTER_NAMES
        .into_iter()
        .map(|name| {
            let marker = if browser.is_filter_active(name) {
                "[x]"
            } else {
                "[ ]"
            };
            format!("{marker} {}", browser.filter_display_text(name))
        })
        .collect()
}

pub fn format_query_summary(browser: &GiftBrowser) -> String {
    let query = browser.query();
    let mut summary = match browser.active_filters_count() {
        0 => "Showing all gifts".to_string(),
        count => format!("{count} active"),
    };
    if let Some(filter) = query.auto_detected {
        summary.push_str(&format!(" (search matched '{filter}')"));
    } else if !query.search_text.is_empty() {
        summary.push_str(&format!(" (search: '{}')", query.search_text));
    }
    summary
}
