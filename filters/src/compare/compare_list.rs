//! The product comparison list.

use common::product::ProductDto;
use serde::{Deserialize, Serialize};

use crate::compare::product_identity::{product_identifier, product_image, product_name, product_vertical};
use crate::compare::storage::CompareStorage;
use crate::config::CompareListConfig;


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareListItem {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gtin: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_slug: Option<String>,
    #[serde(default)]
    pub vertical_id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareBlockReason {
    LimitReached,
    VerticalMismatch,
    MissingIdentifier,
}

impl std::fmt::Display for CompareBlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LimitReached => write!(f, "limit-reached"),
            Self::VerticalMismatch => write!(f, "vertical-mismatch"),
            Self::MissingIdentifier => write!(f, "missing-identifier"),
        }
    }
}

impl std::error::Error for CompareBlockReason {}


type ItemsListener = Box<dyn FnMut(&[CompareListItem]) + Send>;

/// Products picked for side by side comparison, all from the same vertical.
///
/// Construct once and pass it around; every mutation is written back to `storage`.
pub struct CompareList<S: CompareStorage> {
    config: CompareListConfig,
    storage: S,
    items: Vec<CompareListItem>,
    collapsed: bool,
    listeners: Vec<ItemsListener>,
}

impl<S: CompareStorage> CompareList<S> {
    pub fn new(config: CompareListConfig, storage: S) -> Self {
        let items = load_items(&storage, &config.storage_key);
        let collapsed = load_collapsed(&storage, &config.collapsed_key());
        Self {
            config,
            storage,
            items,
            collapsed,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&[CompareListItem]) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn items(&self) -> &[CompareListItem] {
        &self.items
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn set_collapsed(&mut self, collapsed: bool) {
        if self.collapsed == collapsed {
            return;
        }
        self.collapsed = collapsed;
        self.persist();
    }

    pub fn has_reached_limit(&self) -> bool {
        self.items.len() >= self.config.max_items
    }

    /// Vertical of the first item that has one; later products must match it.
    pub fn reference_vertical_id(&self) -> Option<&str> {
        self.items.iter().find_map(|item| item.vertical_id.as_deref())
    }

    pub fn has_product(&self, product: &ProductDto) -> bool {
        product_identifier(product).is_some_and(|id| self.contains_id(&id))
    }

    pub fn can_add_product(&self, product: &ProductDto) -> Result<(), CompareBlockReason> {
        if self.has_product(product) {
            return Ok(());
        }
        if self.has_reached_limit() {
            return Err(CompareBlockReason::LimitReached);
        }
        if product_identifier(product).is_none() {
            return Err(CompareBlockReason::MissingIdentifier);
        }

        if let Some(current_vertical) = self.reference_vertical_id() {
            match product_vertical(product) {
                Some(product_vertical) if product_vertical == current_vertical => {}
                _ => return Err(CompareBlockReason::VerticalMismatch),
            }
        }
        Ok(())
    }

    pub fn add_product(&mut self, product: &ProductDto) -> Result<(), CompareBlockReason> {
        self.can_add_product(product)?;
        let identifier = product_identifier(product).ok_or(CompareBlockReason::MissingIdentifier)?;
        if self.contains_id(&identifier) {
            return Ok(());
        }

        tracing::debug!("Adding product to compare list: {}", identifier);
        self.items.push(CompareListItem {
            id: identifier,
            gtin: product.gtin,
            slug: product.slug.clone(),
            full_slug: product.full_slug.clone(),
            vertical_id: product_vertical(product),
            name: product_name(product),
            image: product_image(product),
        });
        self.collapsed = false;
        self.changed();
        Ok(())
    }

    pub fn toggle_product(&mut self, product: &ProductDto) -> Result<(), CompareBlockReason> {
        if self.has_product(product) {
            self.remove_product(product);
            return Ok(());
        }
        self.add_product(product)
    }

    pub fn remove_product(&mut self, product: &ProductDto) {
        if let Some(identifier) = product_identifier(product) {
            self.remove_by_id(&identifier);
        }
    }

    pub fn remove_by_id(&mut self, id: &str) {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        if self.items.len() == before {
            return;
        }
        if self.items.is_empty() {
            self.collapsed = false;
        }
        self.changed();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.collapsed = false;
        self.changed();
    }

    fn contains_id(&self, id: &str) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    fn changed(&mut self) {
        self.persist();
        for listener in &mut self.listeners {
            listener(&self.items);
        }
    }

    fn persist(&mut self) {
        if let Err(e) = self.try_persist() {
            tracing::warn!("Failed to persist compare list: {:#}", e);
        }
    }

    fn try_persist(&mut self) -> anyhow::Result<()> {
        let items = serde_json::to_string(&self.items)?;
        self.storage.save(&self.config.storage_key, &items)?;
        let collapsed = serde_json::to_string(&self.collapsed)?;
        self.storage.save(&self.config.collapsed_key(), &collapsed)?;
        Ok(())
    }
}

fn load_items<S: CompareStorage>(storage: &S, key: &str) -> Vec<CompareListItem> {
    let loaded = storage.load(key).and_then(|raw| match raw {
        Some(raw) => Ok(serde_json::from_str::<Vec<CompareListItem>>(&raw)?),
        None => Ok(Vec::new()),
    });
    match loaded {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!("Ignoring unreadable compare list under {}: {:#}", key, e);
            Vec::new()
        }
    }
}

fn load_collapsed<S: CompareStorage>(storage: &S, key: &str) -> bool {
    let loaded = storage.load(key).and_then(|raw| match raw {
        Some(raw) => Ok(serde_json::from_str::<bool>(&raw)?),
        None => Ok(false),
    });
    match loaded {
        Ok(collapsed) => collapsed,
        Err(e) => {
            tracing::warn!("Ignoring unreadable compare list flag under {}: {:#}", key, e);
            false
        }
    }
}
