//! MongoDB export backend
//!
//! Opens one client/collection handle at startup and keeps it for the life of
//! the process. The driver pools connections internally; the exporter adds no
//! reconnect logic of its own.

mod sink;

use bson::{Document, doc};
use mongodb::options::{ClientOptions, Credential, ServerAddress};
use mongodb::{Client, Collection};

use crate::core::config::MongoConfig;
use crate::core::constants::MONGO_AUTH_SOURCE;
use crate::data::error::DataError;

/// MongoDB export service
///
/// Owns the target collection handle, which shares the client's pool.
pub struct MongoService {
    collection: Collection<Document>,
    target: String,
}

impl MongoService {
    /// Connect to the configured server and select the target collection.
    ///
    /// A `ping` against the selected database runs before returning so an
    /// unreachable server or rejected credentials fail here instead of on the
    /// first export.
    pub async fn init(config: &MongoConfig) -> Result<Self, DataError> {
        let options = client_options(config).await?;
        let client = Client::with_options(options)?;
        let database = client.database(&config.db);

        database.run_command(doc! { "ping": 1 }).await?;

        let collection = database.collection::<Document>(&config.collection);
        let target = format!("{}.{}", config.db, config.collection);

        tracing::debug!(
            host = %config.host,
            port = config.port,
            collection = %target,
            authenticated = should_authenticate(&config.username, &config.password),
            "MongoService initialized"
        );

        Ok(Self {
            collection,
            target,
        })
    }

    /// Get the target collection handle
    pub fn collection(&self) -> &Collection<Document> {
        &self.collection
    }
}

/// Whether the credential pair is sent to the server.
///
/// Authenticates only when the username is empty and the password is set.
/// This is the inverse of the usual "both present" check.
pub fn should_authenticate(username: &str, password: &str) -> bool {
    username.is_empty() && !password.is_empty()
}

/// Credential for the configured pair, if authentication applies
pub fn credential_for(config: &MongoConfig) -> Option<Credential> {
    if !should_authenticate(&config.username, &config.password) {
        return None;
    }
    let mut credential = Credential::default();
    credential.username = Some(config.username.clone());
    credential.password = Some(config.password.clone());
    credential.source = Some(MONGO_AUTH_SOURCE.to_string());
    Some(credential)
}

/// Build driver options from the exporter config.
///
/// A `host` given as a `mongodb://` or `mongodb+srv://` URI is parsed as a
/// connection string and `port` is ignored; anything else is a plain hostname.
pub async fn client_options(config: &MongoConfig) -> Result<ClientOptions, DataError> {
    let mut options = if is_connection_string(&config.host) {
        ClientOptions::parse(&config.host).await?
    } else {
        let mut options = ClientOptions::default();
        options.hosts = vec![ServerAddress::Tcp {
            host: config.host.clone(),
            port: Some(config.port),
        }];
        options
    };

    options.server_selection_timeout = Some(config.server_selection_timeout);
    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }
    if let Some(credential) = credential_for(config) {
        options.credential = Some(credential);
    }

    Ok(options)
}

fn is_connection_string(host: &str) -> bool {
    host.starts_with("mongodb://") || host.starts_with("mongodb+srv://")
}
