//! Tab buttons and category filter buttons.

use std::cell::RefCell;
use std::rc::Rc;

use folio::{CategoryFilter, DomConfig, TabSet};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use crate::dom;

fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

fn show_tab(tabs: &TabSet, buttons: &[Element], dom_config: &DomConfig) {
    for button in buttons {
        let id = button.get_attribute(&dom_config.tab_target_attribute).unwrap_or_default();
        let active = tabs.is_active(&id);
        set_class(button, &dom_config.active_class, active);
        if let Some(panel) = dom::by_id::<Element>(&id) {
            set_class(&panel, &dom_config.active_class, active);
        }
    }
}

/// Wire the tab buttons. The first tab starts active.
pub fn mount_tabs(dom_config: &DomConfig) -> Result<bool, JsValue> {
    let buttons = dom::query_all(&format!(".{}", dom_config.tab_button_class));
    if buttons.is_empty() {
        return Ok(false);
    }
    let ids: Vec<String> = buttons
        .iter()
        .filter_map(|b| b.get_attribute(&dom_config.tab_target_attribute))
        .collect();
    let tabs = Rc::new(RefCell::new(TabSet::new(ids)));
    show_tab(&tabs.borrow(), &buttons, dom_config);

    let buttons = Rc::new(buttons);
    for button in buttons.iter() {
        let Some(id) = button.get_attribute(&dom_config.tab_target_attribute) else {
            continue;
        };
        let tabs = tabs.clone();
        let all = buttons.clone();
        let cfg = dom_config.clone();
        dom::listen(button, "click", move |_: web_sys::Event| {
            let mut tabs = tabs.borrow_mut();
            if tabs.activate(&id) {
                show_tab(&tabs, &all, &cfg);
            }
        })?;
    }
    Ok(true)
}

fn apply_filter(filter: &CategoryFilter, buttons: &[Element], dom_config: &DomConfig) {
    let items: Vec<HtmlElement> = dom::query_all(&format!(".{}", dom_config.filterable_class))
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
        .collect();
    let categories: Vec<Option<String>> = items
        .iter()
        .map(|el| el.get_attribute(&dom_config.category_attribute))
        .collect();
    let visible = filter.apply(categories.iter().map(|c| c.as_deref()));
    for (item, show) in items.iter().zip(visible) {
        let _ = item
            .style()
            .set_property("display", if show { "" } else { "none" });
    }
    for button in buttons {
        let category = button
            .get_attribute(&dom_config.category_attribute)
            .unwrap_or_default()
            .to_lowercase();
        set_class(button, &dom_config.active_class, category == filter.selected());
    }
}

/// Wire the category filter buttons. Starts on "all".
pub fn mount_category_filter(dom_config: &DomConfig) -> Result<bool, JsValue> {
    let buttons = dom::query_all(&format!(".{}", dom_config.category_button_class));
    if buttons.is_empty() {
        return Ok(false);
    }
    let filter = Rc::new(RefCell::new(CategoryFilter::default()));
    apply_filter(&filter.borrow(), &buttons, dom_config);

    let buttons = Rc::new(buttons);
    for button in buttons.iter() {
        let category = button
            .get_attribute(&dom_config.category_attribute)
            .unwrap_or_default();
        let filter = filter.clone();
        let all = buttons.clone();
        let cfg = dom_config.clone();
        dom::listen(button, "click", move |_: web_sys::Event| {
            let mut filter = filter.borrow_mut();
            filter.select(&category);
            apply_filter(&filter, &all, &cfg);
        })?;
    }
    Ok(true)
}
