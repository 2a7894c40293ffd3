//! Sharding and encryption rules.
//!
//! Statements read rules through an immutable [`Rules`] snapshot.
//! Reloading configuration builds a new snapshot and swaps it in;
//! statements already holding the old one keep using it.

pub mod encrypt;
pub mod error;
pub mod sharding;

use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::info;

use cipherdog_config::{Config, Props};

pub use encrypt::{EncryptColumn, EncryptRule, EncryptTable};
pub use error::Error;
pub use sharding::{ShardingRule, TableRule};

/// Rules in effect for a statement.
#[derive(Debug, Clone, Default)]
pub struct Rules {
    pub sharding: ShardingRule,
    pub encrypt: EncryptRule,
    pub props: Props,
}

impl Rules {
    pub fn new(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            sharding: ShardingRule::new(config)?,
            encrypt: EncryptRule::new(&config.encrypt)?,
            props: config.props.clone(),
        })
    }
}

/// Swappable rules snapshot.
#[derive(Debug)]
pub struct RuleStore {
    rules: ArcSwap<Rules>,
    lock: Mutex<()>,
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

impl RuleStore {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules: ArcSwap::from_pointee(rules),
            lock: Mutex::new(()),
        }
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<Rules> {
        self.rules.load_full()
    }

    /// Build rules from config and make them current.
    ///
    /// If the config is invalid, the current rules stay in place.
    pub fn reload(&self, config: &Config) -> Result<Arc<Rules>, Error> {
        let _lock = self.lock.lock();
        let rules = Arc::new(Rules::new(config)?);
        self.rules.store(rules.clone());
        info!("rules reloaded");
        Ok(rules)
    }
}

static RULES: Lazy<RuleStore> = Lazy::new(RuleStore::default);

/// Current rules.
pub fn rules() -> Arc<Rules> {
    RULES.load()
}

/// Load rules from a config file and make them current.
pub fn load(path: impl AsRef<Path>) -> Result<Arc<Rules>, Error> {
    let config = Config::load(path)?;
    set(&config)
}

/// Make rules built from this config current.
pub fn set(config: &Config) -> Result<Arc<Rules>, Error> {
    RULES.reload(config)
}
