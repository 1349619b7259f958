//! Named parser instances.
//!
//! Each metadata format has exactly one parser instance per registry. Hosts
//! register their own parsers next to the built-in ones and configuration
//! refers to them by name.

use std::sync::{Arc, OnceLock};

use dashmap::DashMap;

use super::{DelimitedParser, IcyTitleParser, MetadataParser};
use crate::error::{RadioError, RadioResult};

static GLOBAL: OnceLock<ParserRegistry> = OnceLock::new();

/// Name → parser lookup table.
pub struct ParserRegistry {
    parsers: DashMap<String, Arc<dyn MetadataParser>>,
}

impl ParserRegistry {
    /// Creates a registry seeded with the built-in parsers
    /// (`delimited` and `icy`).
    #[must_use]
    pub fn new() -> Self {
        let registry = Self::empty();
        registry.register(DelimitedParser::shared());
        registry.register(IcyTitleParser::shared());
        registry
    }

    /// Creates a registry with no parsers.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            parsers: DashMap::new(),
        }
    }

    /// Returns the process-wide registry.
    pub fn global() -> &'static ParserRegistry {
        GLOBAL.get_or_init(Self::new)
    }

    /// Registers a parser under its [`MetadataParser::name`].
    ///
    /// Returns the parser previously registered under that name, if any.
    pub fn register(&self, parser: Arc<dyn MetadataParser>) -> Option<Arc<dyn MetadataParser>> {
        let name = parser.name().to_string();
        log::debug!("[ParserRegistry] Registering parser '{}'", name);
        self.parsers.insert(name, parser)
    }

    /// Looks up a parser by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn MetadataParser>> {
        self.parsers.get(name).map(|r| r.value().clone())
    }

    /// Looks up a parser by name, failing with [`RadioError::UnknownParser`].
    pub fn resolve(&self, name: &str) -> RadioResult<Arc<dyn MetadataParser>> {
        self.get(name)
            .ok_or_else(|| RadioError::UnknownParser(name.to_string()))
    }

    /// Returns the registered parser names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.parsers.iter().map(|r| r.key().clone()).collect();
        names.sort();
        names
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}
