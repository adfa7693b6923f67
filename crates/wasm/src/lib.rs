use std::sync::{Mutex, MutexGuard};

use slide_bind_core::{MenuState, PositionBinder, RectProvider};
use slide_bind_protocol::{Rect, Translation};
use wasm_bindgen::prelude::*;

static MENUS: Mutex<Registry> = Mutex::new(Registry::new());

/// Menu handles. Dropped slots are reused by the next insert.
struct Registry {
    slots: Vec<Option<MenuState>>,
}

impl Registry {
    const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    fn insert(&mut self, menu: MenuState) -> usize {
        if let Some(idx) = self.slots.iter().position(Option::is_none) {
            self.slots[idx] = Some(menu);
            idx
        } else {
            self.slots.push(Some(menu));
            self.slots.len() - 1
        }
    }

    fn get_mut(&mut self, idx: usize) -> Option<&mut MenuState> {
        self.slots.get_mut(idx).and_then(Option::as_mut)
    }

    fn remove(&mut self, idx: usize) -> bool {
        self.slots
            .get_mut(idx)
            .is_some_and(|slot| slot.take().is_some())
    }
}

/// A live DOM element measured through `getBoundingClientRect()`.
struct DomElement(web_sys::Element);

impl RectProvider for DomElement {
    fn bounding_rect(&self) -> Rect {
        let r = self.0.get_bounding_client_rect();
        Rect::new(r.x(), r.y(), r.width(), r.height())
    }
}

/// Look up an element by id. `None` when it is not mounted yet.
fn element_by_id(id: &str) -> Option<DomElement> {
    let element = web_sys::window()?.document()?.get_element_by_id(id);
    if element.is_none() {
        log::debug!("element #{id} not mounted");
    }
    element.map(DomElement)
}

fn menus() -> Result<MutexGuard<'static, Registry>, JsError> {
    MENUS
        .lock()
        .map_err(|_| JsError::new("menu registry poisoned"))
}

fn with_menu<T>(
    menu_index: usize,
    f: impl FnOnce(&mut MenuState) -> Result<T, JsError>,
) -> Result<T, JsError> {
    let mut menus = menus()?;
    let menu = menus
        .get_mut(menu_index)
        .ok_or_else(|| JsError::new("invalid menu index"))?;
    f(menu)
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    // A second init (e.g. hot reload) keeps the first logger.
    let _ = console_log::init_with_level(log::Level::Info);
}

/// One-shot binding between two elements by id.
///
/// `previous_x`/`previous_y` are the offset currently applied to the
/// source element. Returns the CSS transform to apply next.
#[wasm_bindgen]
pub fn bind_elements(
    source_id: &str,
    target_id: &str,
    previous_x: f64,
    previous_y: f64,
) -> String {
    let source = element_by_id(source_id);
    let target = element_by_id(target_id);
    let mut binder = PositionBinder::with_offset(
        source.as_ref().map(|e| e as &dyn RectProvider),
        target.as_ref().map(|e| e as &dyn RectProvider),
        Translation::new(previous_x, previous_y),
    );
    binder.recompute();
    binder.transform().to_css()
}

/// Create a menu from a JSON config (empty string for the default menu).
/// Returns a handle (index) for later use.
#[wasm_bindgen]
pub fn create_menu(config_json: &str) -> Result<usize, JsError> {
    let menu = if config_json.trim().is_empty() {
        MenuState::default()
    } else {
        MenuState::from_config_json(config_json.as_bytes())
            .map_err(|e| JsError::new(&e.to_string()))?
    };
    Ok(menus()?.insert(menu))
}

/// Release a menu handle. Returns false if it was already released.
#[wasm_bindgen]
pub fn drop_menu(menu_index: usize) -> Result<bool, JsError> {
    Ok(menus()?.remove(menu_index))
}

/// Menu entry clicked. Returns whether the full-page view is now shown.
#[wasm_bindgen]
pub fn toggle_full_page(menu_index: usize, key: &str) -> Result<bool, JsError> {
    with_menu(menu_index, |menu| {
        menu.toggle_full_page(key)
            .map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Enter transition finished: bind the label `source_id` onto
/// `target_id`. Returns the CSS transform for the label.
#[wasm_bindgen]
pub fn transition_entered(
    menu_index: usize,
    key: &str,
    source_id: &str,
    target_id: &str,
) -> Result<String, JsError> {
    let source = element_by_id(source_id);
    let target = element_by_id(target_id);
    with_menu(menu_index, |menu| {
        menu.handle_entered(
            key,
            source.as_ref().map(|e| e as &dyn RectProvider),
            target.as_ref().map(|e| e as &dyn RectProvider),
        )
        .map(|t| t.to_css())
        .map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Exit transition finished: the label returns to rest.
#[wasm_bindgen]
pub fn transition_exited(menu_index: usize, key: &str) -> Result<String, JsError> {
    with_menu(menu_index, |menu| {
        menu.handle_exited(key)
            .map(|t| t.to_css())
            .map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Current CSS transform for an item's label.
#[wasm_bindgen]
pub fn item_transform(menu_index: usize, key: &str) -> Result<String, JsError> {
    with_menu(menu_index, |menu| {
        menu.transform(key)
            .map(|t| t.to_css())
            .map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Current offset for an item's label as JSON (`{"x":..,"y":..}`).
#[wasm_bindgen]
pub fn item_offset(menu_index: usize, key: &str) -> Result<String, JsError> {
    with_menu(menu_index, |menu| {
        let offset = menu
            .offset(key)
            .map_err(|e| JsError::new(&e.to_string()))?;
        serde_json::to_string(&offset).map_err(|e| JsError::new(&e.to_string()))
    })
}

/// Menu config as JSON, for the host to render items and sections.
#[wasm_bindgen]
pub fn menu_config(menu_index: usize) -> Result<String, JsError> {
    with_menu(menu_index, |menu| {
        serde_json::to_string(menu.config()).map_err(|e| JsError::new(&e.to_string()))
    })
}
