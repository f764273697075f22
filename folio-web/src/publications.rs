//! DOM view and event wiring for the publication browser.
//!
//! The browser lives in an `Rc<RefCell<..>>`. Async handlers borrow it only
//! around the synchronous begin/finish steps and await on a cloned
//! [`ScholarApi`], so no borrow is held while a request is in flight.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use folio::publications::{
    refetch, BrowserView, ErrorView, FilterControl, ProfileHeader, PublicationBrowser,
    RefreshControl, ScholarApi, SourceIndicator, YearGroup,
};
use folio::{DomConfig, FolioConfig};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlButtonElement, HtmlInputElement};

use crate::dom::{self, escape, escape_keep_strong};
use crate::fetch::WebHttpClient;

type Browser = PublicationBrowser<WebHttpClient, DomBrowserView>;
type Shared = Rc<RefCell<Browser>>;

const YEAR_ATTRIBUTE: &str = "data-year";

/// Renders browser state into the publication section of the page.
pub struct DomBrowserView {
    dom: DomConfig,
}

impl DomBrowserView {
    pub fn new(dom: DomConfig) -> Self {
        Self { dom }
    }

    fn set_list_html(&self, html: &str) {
        if let Some(el) = dom::by_id::<Element>(&self.dom.publications_id) {
            el.set_inner_html(html);
        }
    }
}

fn publication_html(out: &mut String, group: &YearGroup) {
    let _ = write!(
        out,
        r#"<section class="year-group"><h3 class="year-heading">{}</h3>"#,
        escape(&group.year)
    );
    for p in &group.publications {
        out.push_str(r#"<article class="publication">"#);
        if p.scholar_url.is_empty() {
            let _ = write!(out, r#"<h4 class="publication-title">{}</h4>"#, escape(&p.title));
        } else {
            let _ = write!(
                out,
                r#"<h4 class="publication-title"><a href="{}" target="_blank" rel="noopener">{}</a></h4>"#,
                escape(&p.scholar_url),
                escape(&p.title)
            );
        }
        // Authors arrive with the owner's name already wrapped in <strong>.
        let _ = write!(
            out,
            r#"<p class="publication-authors">{}</p>"#,
            escape_keep_strong(&p.authors)
        );
        if !p.venue.is_empty() {
            let _ = write!(out, r#"<p class="publication-venue">{}</p>"#, escape(&p.venue));
        }
        let _ = write!(
            out,
            r#"<span class="publication-citations">Cited by {}</span></article>"#,
            p.citations
        );
    }
    out.push_str("</section>");
}

fn error_html(error: &ErrorView) -> String {
    let mut out = String::from(r#"<div class="publications-error">"#);
    let _ = write!(out, "<h3>{}</h3>", escape(error.title));
    match error.status {
        Some(status) => {
            let _ = write!(out, "<p><strong>{}</strong>: {}</p>", status, escape(&error.message));
        }
        None => {
            let _ = write!(out, "<p>{}</p>", escape(&error.message));
        }
    }
    out.push_str("<ul>");
    for cause in &error.causes {
        let _ = write!(out, "<li>{}</li>", escape(cause));
    }
    let _ = write!(
        out,
        r#"</ul><p><button type="button" class="reload-btn" onclick="window.location.reload()">Reload page</button> <a href="{}" target="_blank" rel="noopener">View on Google Scholar</a></p></div>"#,
        escape(&error.source_url)
    );
    out
}

impl BrowserView for DomBrowserView {
    fn show_loading(&mut self, loading: bool) {
        dom::set_visible(&self.dom.loading_id, loading);
    }

    fn set_refresh_control(&mut self, control: RefreshControl) {
        if let Some(button) = dom::by_id::<HtmlButtonElement>(&self.dom.refresh_button_id) {
            button.set_disabled(!control.enabled);
            button.set_text_content(Some(control.label));
        }
    }

    fn show_header(&mut self, header: &ProfileHeader) {
        dom::set_text(&self.dom.profile_name_id, &header.name);
        dom::set_text(&self.dom.profile_affiliation_id, &header.affiliation);
        dom::set_text(&self.dom.total_publications_id, &header.total_publications.to_string());
        dom::set_text(&self.dom.total_citations_id, &header.total_citations.to_string());
        dom::set_text(&self.dom.h_index_id, &header.h_index.to_string());
        dom::set_text(&self.dom.i10_index_id, &header.i10_index.to_string());
    }

    fn show_source(&mut self, indicator: &SourceIndicator) {
        dom::set_text(&self.dom.data_source_id, &indicator.summary());
        if let Some(updated) = &indicator.last_updated {
            dom::set_text(&self.dom.last_updated_id, &format!("Last updated: {}", updated));
        }
    }

    fn show_filters(&mut self, filters: &[FilterControl]) {
        let Some(container) = dom::by_id::<Element>(&self.dom.filters_id) else {
            return;
        };
        let mut html = String::new();
        for control in filters {
            let class = if control.active {
                format!("year-filter {}", self.dom.active_class)
            } else {
                "year-filter".to_string()
            };
            let _ = write!(
                html,
                r#"<button type="button" class="{}" {}="{}">{}</button>"#,
                class,
                YEAR_ATTRIBUTE,
                escape(control.filter.key()),
                escape(&control.label)
            );
        }
        container.set_inner_html(&html);
    }

    fn show_publications(&mut self, groups: &[YearGroup]) {
        let mut html = String::new();
        for group in groups {
            publication_html(&mut html, group);
        }
        self.set_list_html(&html);
    }

    fn show_placeholder(&mut self, message: &str) {
        self.set_list_html(&format!(r#"<p class="no-publications">{}</p>"#, escape(message)));
    }

    fn show_error(&mut self, error: &ErrorView) {
        self.set_list_html(&error_html(error));
    }

    fn show_notice(&mut self, message: &str) {
        dom::set_text(&self.dom.notice_id, message);
    }
}

/// Load and wire the publication browser if the page has a list container.
pub fn mount(config: &FolioConfig) -> Result<bool, JsValue> {
    if dom::by_id::<Element>(&config.dom.publications_id).is_none() {
        log::debug!("no #{} on this page, skipping publications", config.dom.publications_id);
        return Ok(false);
    }

    let view = DomBrowserView::new(config.dom.clone());
    let browser: Shared = Rc::new(RefCell::new(PublicationBrowser::new(
        WebHttpClient,
        view,
        config.browser.clone(),
    )));

    bind_controls(&browser, &config.dom)?;

    let shared = browser.clone();
    wasm_bindgen_futures::spawn_local(async move {
        let api = begin(&shared, |b| {
            b.begin_load();
            true
        });
        if let Some(api) = api {
            let result = api.fetch_scholar().await;
            let _ = shared.borrow_mut().finish_start(result);
        }
    });
    Ok(true)
}

/// Run `step` under a short borrow and hand back the API for awaiting.
///
/// Returns `None` if the browser is busy or `step` declines.
fn begin(shared: &Shared, step: impl FnOnce(&mut Browser) -> bool) -> Option<ScholarApi<WebHttpClient>> {
    let mut browser = shared.try_borrow_mut().ok()?;
    step(&mut browser).then(|| browser.api().clone())
}

fn on_click(id: &str, shared: &Shared, handler: fn(Shared)) -> Result<(), JsValue> {
    let Some(button) = dom::by_id::<Element>(id) else {
        return Ok(());
    };
    let shared = shared.clone();
    dom::listen(&button, "click", move |_: web_sys::Event| handler(shared.clone()))
}

fn bind_controls(browser: &Shared, dom_config: &DomConfig) -> Result<(), JsValue> {
    on_click(&dom_config.refresh_button_id, browser, |shared| {
        wasm_bindgen_futures::spawn_local(async move {
            let Some(api) = begin(&shared, |b| {
                if !b.begin_refresh() {
                    return false;
                }
                b.begin_load();
                true
            }) else {
                return;
            };
            let result = refetch(&api).await;
            let _ = shared.borrow_mut().finish_refresh(result);
        });
    })?;

    on_click(&dom_config.clear_cache_button_id, browser, |shared| {
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(api) = begin(&shared, |_| true) {
                let result = api.clear_cache().await;
                let _ = shared.borrow_mut().report_cache_cleared(result);
            }
        });
    })?;

    on_click(&dom_config.cache_status_button_id, browser, |shared| {
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(api) = begin(&shared, |_| true) {
                let result = api.cache_status().await;
                let _ = shared.borrow_mut().report_cache_status(result);
            }
        });
    })?;

    if let Some(filters) = dom::by_id::<Element>(&dom_config.filters_id) {
        let shared = browser.clone();
        dom::listen(&filters, "click", move |e: web_sys::Event| {
            let year = e
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(&format!("[{}]", YEAR_ATTRIBUTE)).ok().flatten())
                .and_then(|el| el.get_attribute(YEAR_ATTRIBUTE));
            if let (Some(year), Ok(mut b)) = (year, shared.try_borrow_mut()) {
                b.filter_by_year(&year);
            }
        })?;
    }

    if let Some(input) = dom::by_id::<HtmlInputElement>(&dom_config.search_id) {
        let shared = browser.clone();
        let field = input.clone();
        dom::listen(&input, "input", move |_: web_sys::Event| {
            if let Ok(mut b) = shared.try_borrow_mut() {
                b.search(&field.value());
            }
        })?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio::publications::PublicationRecord;
    use folio::FetchError;

    #[test]
    fn test_authors_markup_kept_title_escaped() {
        let group = YearGroup {
            year: "2021".into(),
            publications: vec![PublicationRecord {
                title: "Bounds <for> A & B".into(),
                authors: "<strong>J. Doe</strong>, K. Lee".into(),
                citations: 7,
                ..Default::default()
            }],
        };
        let mut html = String::new();
        publication_html(&mut html, &group);
        assert!(html.contains("Bounds &lt;for&gt; A &amp; B"));
        assert!(html.contains("<strong>J. Doe</strong>, K. Lee"));
        assert!(html.contains("Cited by 7"));
    }

    #[test]
    fn test_scraped_author_markup_is_escaped() {
        let group = YearGroup {
            year: "2022".into(),
            publications: vec![PublicationRecord {
                title: "T".into(),
                authors: "<strong>J. Doe</strong>, <script>alert(1)</script>".into(),
                ..Default::default()
            }],
        };
        let mut html = String::new();
        publication_html(&mut html, &group);
        assert!(html.contains("<strong>J. Doe</strong>, &lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_error_html_shows_status_and_link() {
        let err = FetchError::HttpStatus {
            status: 500,
            message: "rate limited".into(),
        };
        let html = error_html(&ErrorView::new(&err, "https://scholar.google.com/citations?user=x"));
        assert!(html.contains("<strong>500</strong>: rate limited"));
        assert!(html.contains(r#"href="https://scholar.google.com/citations?user=x""#));
    }
}
