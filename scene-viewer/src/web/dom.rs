#[cfg(target_arch = "wasm32")]
use bevy::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsCast;
#[cfg(target_arch = "wasm32")]
use web_sys::{Element, HtmlElement, window};

#[cfg(target_arch = "wasm32")]
fn query(selector: &str) -> Option<Element> {
    window()?.document()?.query_selector(selector).ok().flatten()
}

#[cfg(target_arch = "wasm32")]
fn query_html(selector: &str) -> Option<HtmlElement> {
    query(selector)?.dyn_into::<HtmlElement>().ok()
}

/// Current URL fragment including the leading `#`, if any.
pub fn location_hash() -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        let hash = window()?.location().hash().ok()?;
        if hash.is_empty() { None } else { Some(hash) }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        None
    }
}

pub fn element_exists(selector: &str) -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        query(selector).is_some()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = selector;
        false
    }
}

/// Adds or removes `class` on the first element matching `selector`.
pub fn set_class(selector: &str, class: &str, enabled: bool) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(element) = query(selector) else {
            return;
        };
        let result = if enabled {
            element.class_list().add_1(class)
        } else {
            element.class_list().remove_1(class)
        };
        if let Err(e) = result {
            warn!("Failed to update class {} on {}: {:?}", class, selector, e);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (selector, class, enabled);
    }
}

/// Sets the inline `transform`, or clears it when `transform` is `None`.
pub fn set_transform(selector: &str, transform: Option<&str>) {
    #[cfg(target_arch = "wasm32")]
    {
        let Some(element) = query_html(selector) else {
            return;
        };
        let style = element.style();
        let result = match transform {
            Some(value) => style.set_property("transform", value),
            None => style.remove_property("transform").map(|_| ()),
        };
        if let Err(e) = result {
            warn!("Failed to set transform on {}: {:?}", selector, e);
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (selector, transform);
    }
}

pub fn set_text(selector: &str, text: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(element) = query(selector) {
            element.set_text_content(Some(text));
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (selector, text);
    }
}

pub fn remove_element(selector: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(element) = query(selector) {
            element.remove();
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = selector;
    }
}
