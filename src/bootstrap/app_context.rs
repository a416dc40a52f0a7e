use std::sync::Arc;

use crate::application::ports::password_hasher::PasswordHasher;
use crate::application::ports::storage_session::SessionFactory;
use crate::application::ports::token_service::TokenService;
use crate::bootstrap::config::Config;

/// Router state. Cheap to clone; every handler receives one.
#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    sessions: Arc<dyn SessionFactory>,
    tokens: Arc<dyn TokenService>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl AppServices {
    pub fn new(
        sessions: Arc<dyn SessionFactory>,
        tokens: Arc<dyn TokenService>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            sessions,
            tokens,
            password_hasher,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn sessions(&self) -> Arc<dyn SessionFactory> {
        self.services.sessions.clone()
    }

    pub fn tokens(&self) -> Arc<dyn TokenService> {
        self.services.tokens.clone()
    }

    pub fn password_hasher(&self) -> Arc<dyn PasswordHasher> {
        self.services.password_hasher.clone()
    }
}
