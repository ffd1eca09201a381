//! Reading the options object handed over from JS.
//!
//! Follows `Object.assign` semantics for presence: a key that is missing or
//! `undefined` is unset, `dismissAfter: null` is an explicit "never".

use js_sys::{Array, Function, Reflect};
use wasm_bindgen::{prelude::*, JsCast};

use model::{ButtonSpec, DismissAfter, ToastOptions, TrustedMarkup};

/// The shape of a property value, as far as option reading cares
#[derive(Clone, Copy, Debug, PartialEq)]
enum Slot {
    Unset,
    Null,
    Number(f64),
    Array,
    Other,
}

impl Slot {
    fn of(value: &JsValue) -> Self {
        if value.is_undefined() {
            Slot::Unset
        } else if value.is_null() {
            Slot::Null
        } else if let Some(n) = value.as_f64() {
            Slot::Number(n)
        } else if Array::is_array(value) {
            Slot::Array
        } else {
            Slot::Other
        }
    }
}

/// `None` leaves the option to the defaults. Negative delays clamp to 0.
fn dismiss_after(slot: Slot) -> Result<Option<DismissAfter>, &'static str> {
    match slot {
        Slot::Unset => Ok(None),
        Slot::Null => Ok(Some(DismissAfter::Never)),
        Slot::Number(ms) if ms.is_finite() => Ok(Some(DismissAfter::After(ms.max(0.0) as u32))),
        _ => Err("dismissAfter must be a number or null"),
    }
}

/// Whether there is a button list to read
fn has_buttons(slot: Slot) -> Result<bool, &'static str> {
    match slot {
        Slot::Unset => Ok(false),
        Slot::Array => Ok(true),
        _ => Err("buttons must be an array"),
    }
}

fn get(obj: &JsValue, key: &str) -> Result<Option<JsValue>, JsValue> {
    let value = Reflect::get(obj, &JsValue::from_str(key))?;
    Ok(if value.is_undefined() { None } else { Some(value) })
}

fn get_string(obj: &JsValue, key: &str) -> Result<Option<String>, JsValue> {
    Ok(get(obj, key)?.and_then(|v| v.as_string()))
}

pub fn toast_options(value: &JsValue) -> Result<ToastOptions, JsValue> {
    let mut options = ToastOptions::new();
    if value.is_undefined() || value.is_null() {
        return Ok(options);
    }

    if let Some(kind) = get_string(value, "type")? {
        options = options.kind(kind);
    }

    let after = Reflect::get(value, &JsValue::from_str("dismissAfter"))?;
    options.dismiss_after = dismiss_after(Slot::of(&after)).map_err(JsError::new)?;

    if let Some(show) = get(value, "showCloseButton")? {
        options = options.show_close_button(show.is_truthy());
    }

    let buttons = Reflect::get(value, &JsValue::from_str("buttons"))?;
    if has_buttons(Slot::of(&buttons)).map_err(JsError::new)? {
        for button in Array::from(&buttons).iter() {
            options = options.button(button_spec(&button)?);
        }
    }

    Ok(options)
}

fn button_spec(value: &JsValue) -> Result<ButtonSpec, JsValue> {
    let class_name = get_string(value, "className")?.unwrap_or_default();
    let inner_html = get_string(value, "innerHTML")?.unwrap_or_default();
    let mut spec = ButtonSpec::new(class_name, TrustedMarkup::from_trusted(inner_html));

    if let Some(kind) = get_string(value, "type")? {
        spec = spec.kind(kind);
    }
    if let Some(href) = get_string(value, "href")? {
        spec = spec.href(href);
    }
    if let Some(onclick) = get(value, "onclick")? {
        if let Ok(onclick) = onclick.dyn_into::<Function>() {
            spec = spec.on_click(move || {
                if let Err(e) = onclick.call0(&JsValue::NULL) {
                    log::error!("toast button callback threw: {:?}", e);
                }
            });
        }
    }

    Ok(spec)
}
