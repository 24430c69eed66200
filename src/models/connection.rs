//! Connection model

use serde::{Deserialize, Serialize};

/// Strategy name of a database-backed connection
pub const DATABASE_STRATEGY: &str = "auth0";

/// A connection as returned by the connections listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub name: String,
    pub strategy: String,
    #[serde(default)]
    pub enabled_clients: Vec<String>,
}

impl Connection {
    /// Check if this connection stores users in the tenant database
    pub fn is_database(&self) -> bool {
        self.strategy == DATABASE_STRATEGY
    }

    /// Check if the given client may use this connection
    pub fn is_enabled_for(&self, client_id: &str) -> bool {
        self.enabled_clients.iter().any(|c| c == client_id)
    }
}
