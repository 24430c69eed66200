//! Connection lookup and eligibility checks

use crate::api::ApiClient;
use crate::error::{ImportError, ImportResult};
use crate::models::Connection;
use tracing::instrument;

impl ApiClient {
    /// List connections with the given name
    #[instrument(skip(self))]
    pub async fn list_connections(&self, name: &str) -> ImportResult<Vec<Connection>> {
        self.get_json("connections", &[("name", name)]).await
    }
}

/// Pick the connection named `name` and check it can receive an import
///
/// Checks run in order: the connection exists, it is a database connection,
/// and `client_id` is enabled on it.
pub fn select_connection(
    connections: Vec<Connection>,
    name: &str,
    client_id: &str,
) -> ImportResult<Connection> {
    let connection = connections
        .into_iter()
        .find(|c| c.name == name)
        .ok_or_else(|| ImportError::ConnectionNotFound(name.to_string()))?;

    if !connection.is_database() {
        return Err(ImportError::NotDatabaseConnection {
            name: connection.name,
            strategy: connection.strategy,
        });
    }

    if !connection.is_enabled_for(client_id) {
        return Err(ImportError::ClientNotEnabled {
            connection: connection.name,
            client_id: client_id.to_string(),
        });
    }

    Ok(connection)
}
