//! The parts of a product payload the compare list reads.

use serde::{Deserialize, Serialize};


#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductIdentity {
    pub best_name: Option<String>,
    pub model: Option<String>,
    pub brand: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductBase {
    pub best_name: Option<String>,
    pub vertical: Option<String>,
    pub cover_image_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductNames {
    pub h1_title: Option<String>,
    pub longest_offer_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ProductImage {
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductResources {
    pub cover_image_path: Option<String>,
    pub external_cover: Option<String>,
    pub images: Vec<ProductImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductDto {
    pub gtin: Option<u64>,
    pub slug: Option<String>,
    pub full_slug: Option<String>,
    pub identity: Option<ProductIdentity>,
    pub base: Option<ProductBase>,
    pub names: Option<ProductNames>,
    pub resources: Option<ProductResources>,
}
