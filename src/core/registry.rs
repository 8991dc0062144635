//! Lookup of quote sources by name.

use crate::core::price::PriceSource;
use anyhow::{Result, anyhow};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone, Default)]
pub struct SourceRegistry {
    sources: HashMap<String, Arc<dyn PriceSource>>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `source` under its own name, replacing any earlier source
    /// with the same name.
    pub fn register(&mut self, source: Arc<dyn PriceSource>) {
        let name = source.name().to_string();
        debug!(source = %name, "Registering price source");
        self.sources.insert(name, source);
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn PriceSource>> {
        self.sources
            .get(name)
            .cloned()
            .ok_or_else(|| anyhow!("Unknown price source: {}", name))
    }

    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.sources.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::metadata::Metadata;
    use crate::core::price::Quote;
    use async_trait::async_trait;
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal::Decimal;

    struct StaticSource {
        name: String,
        price: Decimal,
    }

    #[async_trait]
    impl PriceSource for StaticSource {
        fn name(&self) -> &str {
            &self.name
        }

        async fn get_latest_price(&self, _ticker: &str, _metadata: &Metadata) -> Result<Quote> {
            Ok(Quote {
                price: self.price,
                time: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap().fixed_offset(),
                currency: "EUR".to_string(),
            })
        }

        async fn get_historical_price(
            &self,
            ticker: &str,
            _metadata: &Metadata,
            _date: NaiveDate,
        ) -> Result<Quote> {
            Err(anyhow!("No history for {}", ticker))
        }
    }

    fn static_source(name: &str, price: i64) -> Arc<dyn PriceSource> {
        Arc::new(StaticSource {
            name: name.to_string(),
            price: Decimal::from(price),
        })
    }

    #[tokio::test]
    async fn test_register_and_get() {
        let mut registry = SourceRegistry::new();
        registry.register(static_source("ratesapi", 4));
        registry.register(static_source("coincap", 60000));

        assert_eq!(registry.names(), vec!["coincap", "ratesapi"]);

        let source = registry.get("ratesapi").unwrap();
        let quote = source
            .get_latest_price("EUR-PLN", &Metadata::new())
            .await
            .unwrap();
        assert_eq!(quote.price, Decimal::from(4));
    }

    #[tokio::test]
    async fn test_register_replaces_same_name() {
        let mut registry = SourceRegistry::new();
        registry.register(static_source("ratesapi", 4));
        registry.register(static_source("ratesapi", 5));

        assert_eq!(registry.names().len(), 1);
        let quote = registry
            .get("ratesapi")
            .unwrap()
            .get_latest_price("EUR-PLN", &Metadata::new())
            .await
            .unwrap();
        assert_eq!(quote.price, Decimal::from(5));
    }

    #[test]
    fn test_unknown_source() {
        let registry = SourceRegistry::new();
        let err = registry.get("missing").err().unwrap();
        assert_eq!(err.to_string(), "Unknown price source: missing");
    }
}
