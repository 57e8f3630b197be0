//! Per-invocation context: server URL plus the persisted session.

use std::path::PathBuf;

use anyhow::Context as _;
use nadzor_client::{ApiClient, AuthUser, SessionStore};

/// Everything a command needs: where the backend lives and who is signed in.
pub struct AppContext {
    server: String,
    store: SessionStore,
}

impl AppContext {
    pub fn new(server: String) -> anyhow::Result<Self> {
        let dir = config_dir()?;
        Ok(Self {
            server,
            store: SessionStore::new(dir),
        })
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// Current session, if a user is signed in.
    pub fn session(&self) -> anyhow::Result<Option<AuthUser>> {
        self.store
            .load()
            .context("could not read the session file; try `nadzor logout`")
    }

    /// Client carrying the session token when one exists.
    pub fn client(&self) -> anyhow::Result<ApiClient> {
        Ok(match self.session()? {
            Some(user) => ApiClient::with_token(&self.server, user.token),
            None => ApiClient::new(&self.server),
        })
    }
}

fn config_dir() -> anyhow::Result<PathBuf> {
    let base = dirs::config_dir().context("no user config directory available")?;
    Ok(base.join("nadzor"))
}
