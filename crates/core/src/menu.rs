use std::collections::HashMap;

use slide_bind_protocol::{Translate3d, Translation};
use thiserror::Error;

use crate::binder::{PositionBinder, RectProvider};
use crate::config::{ConfigError, MenuConfig, MenuItem, parse_menu_config};

#[derive(Debug, Error)]
pub enum MenuError {
    #[error("unknown menu item: {0}")]
    UnknownItem(String),
    #[error("menu item {0} has no binding")]
    NotBindable(String),
    #[error("config: {0}")]
    Config(#[from] ConfigError),
}

/// State of the right-hand menu and the full-page section container.
///
/// Each bindable item keeps the offset currently applied to its menu
/// label. A new [`PositionBinder`] is built for every transition, seeded
/// with that offset.
#[derive(Debug, Clone)]
pub struct MenuState {
    config: MenuConfig,
    full_page_visible: bool,
    /// Item key that opened the full-page view last.
    active: Option<String>,
    offsets: HashMap<String, Translation>,
}

impl MenuState {
    pub fn new(config: MenuConfig) -> Self {
        let offsets = config
            .items
            .iter()
            .filter(|item| item.bind)
            .map(|item| (item.key.clone(), Translation::ZERO))
            .collect();
        Self {
            config,
            full_page_visible: false,
            active: None,
            offsets,
        }
    }

    pub fn from_config_json(data: &[u8]) -> Result<Self, MenuError> {
        Ok(Self::new(parse_menu_config(data)?))
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.config.items
    }

    pub fn is_full_page_visible(&self) -> bool {
        self.full_page_visible
    }

    pub fn active_item(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Click on a menu entry: show or hide the full-page sections.
    /// Returns the new visibility.
    pub fn toggle_full_page(&mut self, key: &str) -> Result<bool, MenuError> {
        self.item(key)?;
        self.full_page_visible = !self.full_page_visible;
        self.active = self.full_page_visible.then(|| key.to_string());
        log::debug!("full page visible={} via {key}", self.full_page_visible);
        Ok(self.full_page_visible)
    }

    /// Enter transition finished: bind the item's menu label (`source`)
    /// onto its heading word (`target`).
    ///
    /// Missing elements leave the stored offset untouched.
    pub fn handle_entered(
        &mut self,
        key: &str,
        source: Option<&dyn RectProvider>,
        target: Option<&dyn RectProvider>,
    ) -> Result<Translate3d, MenuError> {
        let previous = self.bound_offset(key)?;
        let mut binder = PositionBinder::with_offset(source, target, previous);
        binder.recompute();
        let offset = binder.offset();
        self.offsets.insert(key.to_string(), offset);
        log::debug!("bound {key}: {:?} -> {:?}", previous, offset);
        Ok(binder.transform())
    }

    /// Exit transition finished: the label returns to rest.
    pub fn handle_exited(&mut self, key: &str) -> Result<Translate3d, MenuError> {
        let previous = self.bound_offset(key)?;
        let mut binder = PositionBinder::with_offset(None, None, previous);
        binder.reset();
        self.offsets.insert(key.to_string(), binder.offset());
        Ok(binder.transform())
    }

    /// Offset currently applied to the item's label. Zero for items that
    /// exist but do not bind.
    pub fn offset(&self, key: &str) -> Result<Translation, MenuError> {
        self.item(key)?;
        Ok(self.offsets.get(key).copied().unwrap_or_default())
    }

    pub fn transform(&self, key: &str) -> Result<Translate3d, MenuError> {
        self.offset(key).map(Translate3d::from)
    }

    fn item(&self, key: &str) -> Result<&MenuItem, MenuError> {
        self.config
            .item(key)
            .ok_or_else(|| MenuError::UnknownItem(key.to_string()))
    }

    fn bound_offset(&self, key: &str) -> Result<Translation, MenuError> {
        if !self.item(key)?.bind {
            return Err(MenuError::NotBindable(key.to_string()));
        }
        Ok(self.offsets.get(key).copied().unwrap_or_default())
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new(MenuConfig::default())
    }
}
