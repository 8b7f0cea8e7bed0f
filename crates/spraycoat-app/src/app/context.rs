//! Everything a command needs: config, the open store and the session

use std::path::PathBuf;

use spraycoat_infra::persistence::{StoreJobSiteRepository, StoreLeadRepository};
use spraycoat_store::FileStore;
use spraycoat_types::Result;

use crate::config::Config;
use crate::repository::{open_identity_provider, open_record_store};
use crate::session::{FileIdentityProvider, IdentityProvider};

pub struct AppContext {
    pub config: Config,
    store: FileStore,
    identity: FileIdentityProvider,
}

impl AppContext {
    /// Open the store and session described by `config`
    pub fn open(config: Config) -> Result<Self> {
        config.validate()?;
        let store = open_record_store(&config)?;
        let identity = open_identity_provider(&config)?;
        Ok(Self {
            config,
            store,
            identity,
        })
    }

    /// Context with an explicit session file
    pub fn with_session_path(config: Config, session_path: PathBuf) -> Result<Self> {
        config.validate()?;
        let store = open_record_store(&config)?;
        let identity = FileIdentityProvider::new(session_path, config.session_timeout_minutes)?;
        Ok(Self {
            config,
            store,
            identity,
        })
    }

    pub fn store(&self) -> &FileStore {
        &self.store
    }

    pub fn identity(&self) -> &dyn IdentityProvider {
        &self.identity
    }

    pub fn leads(&self) -> StoreLeadRepository<'_, FileStore> {
        StoreLeadRepository::new(&self.store)
    }

    pub fn job_sites(&self) -> StoreJobSiteRepository<'_, FileStore> {
        StoreJobSiteRepository::new(&self.store)
    }

    /// Signed-in user for a write; refreshes the inactivity timer
    pub fn require_user(&self) -> Result<String> {
        self.identity.require_user()
    }
}
