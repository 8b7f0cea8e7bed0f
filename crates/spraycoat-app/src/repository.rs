//! Adapters that open the persistence layer from config

use std::path::PathBuf;

use spraycoat_store::FileStore;
use spraycoat_types::Result;

use crate::config::Config;
use crate::session::FileIdentityProvider;

/// Open the record store in the configured data directory
pub fn open_record_store(config: &Config) -> Result<FileStore> {
    open_record_store_at(config.data_dir()?)
}

/// Open the record store at a custom directory
pub fn open_record_store_at(store_dir: PathBuf) -> Result<FileStore> {
    FileStore::open(store_dir)
}

/// Session file in the config directory
pub fn open_identity_provider(config: &Config) -> Result<FileIdentityProvider> {
    FileIdentityProvider::new(Config::session_path()?, config.session_timeout_minutes)
}
