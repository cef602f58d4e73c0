use crate::dest_trait::Destination;
use std::collections::HashMap;
use storyvox_core::DestinationError;

pub struct DestinationRegistry {
    factories: HashMap<String, fn() -> Box<dyn Destination>>,
}

impl DestinationRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            factories: HashMap::new(),
        };
        registry.register("file", || Box::new(crate::file_dest::FileDestination::new()));
        registry
    }

    pub fn register(&mut self, name: &str, factory: fn() -> Box<dyn Destination>) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Destination>, DestinationError> {
        self.factories
            .get(name)
            .map(|f| f())
            .ok_or_else(|| DestinationError::NotFound(name.to_string()))
    }

    /// Create and initialise a destination in one step.
    pub async fn open(
        &self,
        name: &str,
        config: toml::Value,
    ) -> Result<Box<dyn Destination>, DestinationError> {
        let mut dest = self.create(name)?;
        dest.initialize(config).await?;
        tracing::debug!(destination = %name, "destination initialised");
        Ok(dest)
    }

    pub fn list_destinations(&self) -> Vec<&str> {
        self.factories.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for DestinationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
