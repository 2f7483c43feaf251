//! How a product is identified, named and pictured in the compare list.

use common::product::ProductDto;


/// gtin, then slug, then full slug, then the known name parts joined with `|`.
pub fn product_identifier(product: &ProductDto) -> Option<String> {
    if let Some(gtin) = product.gtin {
        return Some(gtin.to_string());
    }
    if let Some(slug) = non_empty(&product.slug) {
        return Some(slug.to_string());
    }
    if let Some(full_slug) = non_empty(&product.full_slug) {
        return Some(full_slug.to_string());
    }

    let identity = product.identity.as_ref();
    let fallback_parts = [
        identity.and_then(|identity| non_empty(&identity.best_name)),
        identity.and_then(|identity| non_empty(&identity.model)),
        identity.and_then(|identity| non_empty(&identity.brand)),
        product.base.as_ref().and_then(|base| non_empty(&base.best_name)),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>();

    if fallback_parts.is_empty() {
        return None;
    }
    Some(fallback_parts.join("|"))
}

pub fn product_name(product: &ProductDto) -> String {
    let identity = product.identity.as_ref();
    let names = product.names.as_ref();
    identity
        .and_then(|identity| identity.best_name.clone())
        .or_else(|| product.base.as_ref().and_then(|base| base.best_name.clone()))
        .or_else(|| identity.and_then(|identity| identity.model.clone()))
        .or_else(|| identity.and_then(|identity| identity.brand.clone()))
        .or_else(|| names.and_then(|names| names.h1_title.clone()))
        .or_else(|| names.and_then(|names| names.longest_offer_name.clone()))
        .unwrap_or_else(|| "#".to_string())
}

pub fn product_image(product: &ProductDto) -> Option<String> {
    let resources = product.resources.as_ref()?;
    resources
        .cover_image_path
        .clone()
        .or_else(|| resources.external_cover.clone())
        .or_else(|| resources.images.first().and_then(|image| image.url.clone()))
}

pub fn product_vertical(product: &ProductDto) -> Option<String> {
    product.base.as_ref().and_then(|base| base.vertical.clone())
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|value| !value.is_empty())
}
