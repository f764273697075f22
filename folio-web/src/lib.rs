//! # folio-web
//!
//! Binds the `folio` crate to a live page: the particle canvas, the
//! spotlight overlay, highlightable cards, tab and category buttons, and the
//! publication list.
//!
//! Each piece mounts only if its elements exist, so one bundle serves every
//! page of the site. Configuration is read from an optional
//! `<script id="folio-config" type="application/json">` block.

use folio::FolioConfig;
use log::LevelFilter;
use wasm_bindgen::prelude::*;

mod animation;
mod canvas;
mod dom;
mod fetch;
mod logger;
mod publications;
mod tabs;
mod targets;

pub use canvas::CanvasRenderer;
pub use fetch::WebHttpClient;
pub use publications::DomBrowserView;
pub use targets::DomTargets;

/// Id of the inline JSON configuration block.
pub const CONFIG_SCRIPT_ID: &str = "folio-config";

/// Page configuration from the inline script, or defaults.
///
/// An unparseable block is logged and ignored.
pub fn load_config() -> FolioConfig {
    let Some(script) = dom::by_id::<web_sys::Element>(CONFIG_SCRIPT_ID) else {
        return FolioConfig::default();
    };
    let text = script.text_content().unwrap_or_default();
    match FolioConfig::from_json(&text) {
        Ok(config) => config,
        Err(e) => {
            log::error!("ignoring #{}: {}", CONFIG_SCRIPT_ID, e);
            FolioConfig::default()
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logger::init(if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    });

    let config = load_config();
    mount(&config)
}

/// Mount every piece whose elements are present.
pub fn mount(config: &FolioConfig) -> Result<(), JsValue> {
    let field = animation::mount(config)?;
    let tabs = tabs::mount_tabs(&config.dom)?;
    let categories = tabs::mount_category_filter(&config.dom)?;
    let publications = publications::mount(config)?;
    log::info!(
        "folio mounted (field: {}, tabs: {}, categories: {}, publications: {})",
        field,
        tabs,
        categories,
        publications
    );
    Ok(())
}
