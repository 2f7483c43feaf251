//! Runtime configuration read from the environment.

pub const DEFAULT_PRODUCTS_API_URL: &str = "http://127.0.0.1:8082";
pub const DEFAULT_COMPARE_MAX_ITEMS: usize = 4;
pub const COMPARE_STORAGE_KEY: &str = "open4goods:compare-list";


pub fn products_api_url() -> String {
    std::env::var("PRODUCTS_API_URL").unwrap_or(DEFAULT_PRODUCTS_API_URL.to_string())
}

pub fn compare_max_items() -> anyhow::Result<usize> {
    parse_compare_max_items(std::env::var("COMPARE_MAX_ITEMS").ok().as_deref())
}

pub fn parse_compare_max_items(raw: Option<&str>) -> anyhow::Result<usize> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return Ok(DEFAULT_COMPARE_MAX_ITEMS);
    };
    let max_items = match raw.parse::<usize>() {
        Ok(max_items) => max_items,
        Err(e) => anyhow::bail!("Invalid COMPARE_MAX_ITEMS {:?}: {}", raw, e),
    };
    if max_items == 0 {
        anyhow::bail!("COMPARE_MAX_ITEMS must be at least 1");
    }
    Ok(max_items)
}


#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareListConfig {
    pub max_items: usize,
    pub storage_key: String,
}

impl Default for CompareListConfig {
    fn default() -> Self {
        Self {
            max_items: DEFAULT_COMPARE_MAX_ITEMS,
            storage_key: COMPARE_STORAGE_KEY.to_string(),
        }
    }
}

impl CompareListConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            max_items: compare_max_items()?,
            ..Default::default()
        })
    }

    pub fn collapsed_key(&self) -> String {
        format!("{}:collapsed", self.storage_key)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_items_defaults_when_unset_or_blank() {
        assert_eq!(parse_compare_max_items(None).unwrap(), 4);
        assert_eq!(parse_compare_max_items(Some("  ")).unwrap(), 4);
    }

    #[test]
    fn max_items_parses_and_validates() {
        assert_eq!(parse_compare_max_items(Some(" 6 ")).unwrap(), 6);
        assert!(parse_compare_max_items(Some("0")).is_err());
        assert!(parse_compare_max_items(Some("four")).is_err());
    }

    #[test]
    fn collapsed_flag_lives_next_to_the_list() {
        assert_eq!(CompareListConfig::default().collapsed_key(), "open4goods:compare-list:collapsed");
    }
}
