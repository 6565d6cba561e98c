use std::{fmt, sync::Arc};

use vireo_core::UserLibraryService;

use crate::infra::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub library: Arc<UserLibraryService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(library: UserLibraryService, config: Config) -> Self {
        Self {
            library: Arc::new(library),
            config: Arc::new(config),
        }
    }

    pub fn library(&self) -> &UserLibraryService {
        &self.library
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
