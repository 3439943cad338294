use crate::source::SourceConfig;

/// Named source configurations in registration order.
///
/// Registering a name twice replaces the earlier configuration but keeps
/// its original position.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: Vec<SourceConfig>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, config: SourceConfig) {
        match self.sources.iter_mut().find(|s| s.name == config.name) {
            Some(existing) => *existing = config,
            None => self.sources.push(config),
        }
    }

    pub fn get(&self, name: &str) -> Option<&SourceConfig> {
        self.sources.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceConfig> {
        self.sources.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|s| s.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl FromIterator<SourceConfig> for SourceRegistry {
    fn from_iter<T: IntoIterator<Item = SourceConfig>>(iter: T) -> Self {
        let mut registry = Self::new();
        for config in iter {
            registry.add(config);
        }
        registry
    }
}
