// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::Instrument;

use crate::config::{AddressTable, RegistryConfig};
use crate::errors::{RegistryError, RegistryResult, RemoteError};
use crate::observability::messages::{registry::*, StructuredLog};
use crate::registry::{
    AppEndpoints, ApplicationDescriptor, MetadataFetcher, RetryPolicy, SchemaKind,
    SchemaValidator,
};
use crate::traits::{Channel, Connector};

/// Everything the registry needs besides the application list.
#[derive(Debug, Clone)]
pub struct RegistrySettings {
    pub address_table: AddressTable,
    pub scheme: String,
    pub retry: RetryPolicy,
    pub metadata_timeout: Duration,
    pub execute_timeout: Duration,
}

impl From<&RegistryConfig> for RegistrySettings {
    fn from(cfg: &RegistryConfig) -> Self {
        Self {
            address_table: cfg.nodes.clone(),
            scheme: cfg.scheme.clone(),
            retry: RetryPolicy::new(cfg.max_attempts, Duration::from_secs(cfg.retry_delay_seconds)),
            metadata_timeout: Duration::from_secs(cfg.metadata_timeout_seconds),
            execute_timeout: Duration::from_secs(cfg.execute_timeout_seconds),
        }
    }
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::from(&RegistryConfig::default())
    }
}

/// Registry of remote applications.
///
/// Holds one [`ApplicationDescriptor`] and at most one live [`Channel`] per
/// application. Built in one go by [`ApplicationRegistry::initialize`]: either
/// every application registers or the registry isn't created.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use the_atelier::registry::{ApplicationRegistry, RegistrySettings};
/// use the_atelier::remote::WebSocketConnector;
///
/// # async fn run() -> Result<(), the_atelier::errors::RegistryError> {
/// let ids = vec!["f0997a01-d6d3-a5fe-53d8-561300318557".to_string()];
/// let registry =
///     ApplicationRegistry::initialize(RegistrySettings::default(), &ids, Arc::new(WebSocketConnector))
///         .await?;
/// let manifest = registry.manifest(&ids[0])?;
/// # Ok(())
/// # }
/// ```
pub struct ApplicationRegistry {
    settings: RegistrySettings,
    connector: Arc<dyn Connector>,
    fetcher: MetadataFetcher,
    http: reqwest::Client,
    descriptors: HashMap<String, ApplicationDescriptor>,
    connections: HashMap<String, Box<dyn Channel>>,
}

impl ApplicationRegistry {
    /// Register every application in `app_ids`.
    ///
    /// All identifiers are resolved through the address table before any
    /// network traffic, so an unknown identifier fails fast with a
    /// configuration error. Each application's manifest, input schema and
    /// output schema are then fetched and its channel opened, the whole
    /// sequence retried per [`RegistrySettings::retry`]. If any application
    /// fails, channels already opened are closed and the error is returned.
    /// Repeated identifiers are registered once.
    pub async fn initialize(
        settings: RegistrySettings,
        app_ids: &[String],
        connector: Arc<dyn Connector>,
    ) -> RegistryResult<Self> {
        let mut seen = HashSet::new();
        let resolved = app_ids
            .iter()
            .filter(|app_id| seen.insert(app_id.as_str()))
            .map(|app_id| -> RegistryResult<(String, String)> {
                let host = settings.address_table.resolve(app_id)?;
                Ok((app_id.clone(), host.to_string()))
            })
            .collect::<RegistryResult<Vec<_>>>()?;

        let fetcher = MetadataFetcher::new(settings.metadata_timeout)?;
        let http = reqwest::Client::builder()
            .timeout(settings.execute_timeout)
            .build()
            .map_err(RegistryError::Client)?;

        let mut registry = Self {
            settings,
            connector,
            fetcher,
            http,
            descriptors: HashMap::new(),
            connections: HashMap::new(),
        };

        for (app_id, host) in resolved {
            let outcome = registry.init_app(&app_id, &host).await;
            match outcome {
                Ok((descriptor, channel)) => registry.install(descriptor, channel),
                Err(error) => {
                    registry.shutdown().await;
                    return Err(error);
                }
            }
        }

        Ok(registry)
    }

    async fn init_app(
        &self,
        app_id: &str,
        host: &str,
    ) -> RegistryResult<(ApplicationDescriptor, Box<dyn Channel>)> {
        let endpoints = AppEndpoints::new(self.settings.scheme.as_str(), host);
        let message = AppInitializing { app_id, host };
        let span = message.span("app_initialization");
        message.log();

        let fetcher = &self.fetcher;
        let connector = &self.connector;
        let endpoints = &endpoints;

        self.settings
            .retry
            .run(host, move |_attempt| async move {
                let manifest = fetcher.fetch_json(&endpoints.manifest_url()).await?;
                ManifestLoaded { host }.log();

                let input_schema = fetcher
                    .fetch_json(&endpoints.schema_url(SchemaKind::Input))
                    .await?;
                let output_schema = fetcher
                    .fetch_json(&endpoints.schema_url(SchemaKind::Output))
                    .await?;
                SchemasLoaded { host }.log();

                let channel = connector.connect(endpoints).await?;
                let descriptor = ApplicationDescriptor::new(
                    app_id,
                    endpoints.clone(),
                    manifest,
                    input_schema,
                    output_schema,
                );
                Ok::<_, RegistryError>((descriptor, channel))
            })
            .instrument(span)
            .await
    }

    fn install(&mut self, descriptor: ApplicationDescriptor, channel: Box<dyn Channel>) {
        self.connections.insert(descriptor.id.clone(), channel);
        self.descriptors.insert(descriptor.id.clone(), descriptor);
    }

    fn descriptor_or_not_found(&self, app_id: &str) -> RegistryResult<&ApplicationDescriptor> {
        self.descriptors
            .get(app_id)
            .ok_or_else(|| RegistryError::NotFound(app_id.to_string()))
    }

    /// POST `request` to the application's execute endpoint.
    ///
    /// `identity` is sent as the bearer credential. The decoded response is
    /// returned as-is; a mismatch against the output schema is only logged.
    /// Never retried.
    pub async fn call(&self, app_id: &str, request: &Value, identity: &str) -> RegistryResult<Value> {
        let descriptor = self
            .descriptors
            .get(app_id)
            .ok_or_else(|| RegistryError::UnknownApplication(app_id.to_string()))?;
        let url = descriptor.endpoints.execute_url();

        ApplicationCallStarted {
            app_id,
            url: &url,
        }
        .log();
        let started = Instant::now();

        let response = async {
            self.http
                .post(&url)
                .bearer_auth(identity)
                .json(request)
                .send()
                .await?
                .error_for_status()?
                .json::<Value>()
                .await
        }
        .await
        .map_err(|source| RegistryError::Transport {
            url: url.clone(),
            source,
        })?;

        ApplicationCallCompleted {
            app_id,
            duration: started.elapsed(),
        }
        .log();

        if let Err(violations) = descriptor.validator(SchemaKind::Output).validate(&response) {
            ResponseSchemaMismatch {
                app_id,
                violations: &violations,
            }
            .log();
        }

        Ok(response)
    }

    /// Request/response over the application's persistent channel
    pub async fn exchange(
        &self,
        app_id: &str,
        request: &Value,
        identity: &str,
    ) -> RegistryResult<Value> {
        let descriptor = self
            .descriptors
            .get(app_id)
            .ok_or_else(|| RegistryError::UnknownApplication(app_id.to_string()))?;
        let channel = self
            .connections
            .get(app_id)
            .ok_or_else(|| RemoteError::Closed(descriptor.endpoints.channel_url()))?;

        let handler = channel.execute(request, identity).await?;
        Ok(channel.get_response(&handler).await?)
    }

    pub fn manifest(&self, app_id: &str) -> RegistryResult<&Value> {
        Ok(&self.descriptor_or_not_found(app_id)?.manifest)
    }

    /// Cached schema document; `kind` is `"input"` or `"output"`
    pub fn schema(&self, app_id: &str, kind: &str) -> RegistryResult<&Value> {
        let descriptor = self.descriptor_or_not_found(app_id)?;
        let kind: SchemaKind = kind.parse()?;
        Ok(descriptor.schema(kind))
    }

    pub fn validator(&self, app_id: &str, kind: SchemaKind) -> RegistryResult<&SchemaValidator> {
        Ok(self.descriptor_or_not_found(app_id)?.validator(kind))
    }

    pub fn descriptor(&self, app_id: &str) -> Option<&ApplicationDescriptor> {
        self.descriptors.get(app_id)
    }

    /// Tear down the application's channel and register it again.
    ///
    /// The old channel is closed before anything else happens. On failure the
    /// application is left without a channel but its previously fetched
    /// documents stay readable.
    pub async fn reconnect(&mut self, app_id: &str) -> RegistryResult<()> {
        let existing = self.connections.remove(app_id);
        ReconnectRequested {
            app_id,
            had_connection: existing.is_some(),
        }
        .log();
        if let Some(channel) = existing {
            channel.disconnect().await;
        }

        let host = self.settings.address_table.resolve(app_id)?.to_string();
        let (descriptor, channel) = self.init_app(app_id, &host).await?;
        self.install(descriptor, channel);
        Ok(())
    }

    pub fn is_connected(&self, app_id: &str) -> bool {
        self.connections
            .get(app_id)
            .map(|channel| channel.is_open())
            .unwrap_or(false)
    }

    /// Registered application identifiers, sorted
    pub fn app_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.descriptors.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn live_connections(&self) -> usize {
        self.connections.values().filter(|channel| channel.is_open()).count()
    }

    /// Close every channel
    pub async fn shutdown(&mut self) {
        for (_, channel) in self.connections.drain() {
            channel.disconnect().await;
        }
    }
}
