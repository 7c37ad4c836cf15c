//! HTTP redirect chain resolution.
//!
//! This module follows redirect chains by hand so that every intermediate URL,
//! status code and `Location` value is captured, then classifies the chain by
//! its first response.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::Url;
use tokio_util::sync::CancellationToken;

use crate::app::NormalizedUrl;
use crate::config::{Config, FALLBACK_TIMEOUT, MAX_REDIRECT_HOPS, PROBE_TIMEOUT};
use crate::error_handling::{
    categorize_attempt_error, AttemptError, AttemptKind, ErrorType, InfoType,
    InitializationError, ProcessingStats, ScanError,
};
use crate::fetch::attempt::{self, AttemptResponse};
use crate::initialization::{init_fallback_client, init_probe_client};
use crate::models::{Classification, Hop, ScanResult, ScanStatus, Termination};

/// Limits applied to every resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Maximum number of probe iterations (and therefore hops) per URL
    pub max_hops: usize,
    /// Deadline for each HEAD probe
    pub probe_timeout: Duration,
    /// Deadline for each GET fallback
    pub fallback_timeout: Duration,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            max_hops: MAX_REDIRECT_HOPS,
            probe_timeout: PROBE_TIMEOUT,
            fallback_timeout: FALLBACK_TIMEOUT,
        }
    }
}

impl From<&Config> for ResolverSettings {
    fn from(config: &Config) -> Self {
        Self {
            max_hops: config.max_hops,
            probe_timeout: config.probe_timeout(),
            fallback_timeout: config.fallback_timeout(),
        }
    }
}

/// The response a resolution ends on.
struct Terminal {
    status: ScanStatus,
    destination: String,
    headers: BTreeMap<String, String>,
    termination: Termination,
}

impl Terminal {
    fn new(response: AttemptResponse, destination: String, termination: Termination) -> Self {
        Terminal {
            status: response.status.into(),
            destination,
            headers: response.headers,
            termination,
        }
    }
}

/// Resolves URLs through their redirect chains.
///
/// Holds two clients: one that never follows redirects (for the HEAD probe) and
/// one that does (for the GET fallback). Both send the configured User-Agent.
/// Cloning is cheap and resolutions share nothing but the clients' connection
/// pools and the statistics counters.
#[derive(Clone)]
pub struct RedirectResolver {
    probe_client: Arc<reqwest::Client>,
    fallback_client: Arc<reqwest::Client>,
    settings: ResolverSettings,
    stats: Arc<ProcessingStats>,
}

impl RedirectResolver {
    /// Creates a resolver from pre-built clients.
    ///
    /// `probe_client` must have redirects disabled, otherwise no hop is ever seen.
    pub fn new(
        probe_client: Arc<reqwest::Client>,
        fallback_client: Arc<reqwest::Client>,
        settings: ResolverSettings,
        stats: Arc<ProcessingStats>,
    ) -> Self {
        Self {
            probe_client,
            fallback_client,
            settings,
            stats,
        }
    }

    /// Builds both clients from `config` and wraps them in a resolver.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if a client cannot be built.
    pub fn from_config(
        config: &Config,
        stats: Arc<ProcessingStats>,
    ) -> Result<Self, InitializationError> {
        Ok(Self::new(
            init_probe_client(config)?,
            init_fallback_client(config)?,
            ResolverSettings::from(config),
            stats,
        ))
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    /// Resolves `url` through its redirect chain.
    ///
    /// # Errors
    ///
    /// Returns `ScanError::Fetch` only when both the probe and the fallback for
    /// some hop failed to produce a response.
    pub async fn resolve(&self, url: &NormalizedUrl) -> Result<ScanResult, ScanError> {
        self.resolve_with_cancel(url, &CancellationToken::new())
            .await
    }

    /// Like [`resolve`](Self::resolve), but aborts the in-flight request and
    /// returns `ScanError::Cancelled` as soon as `cancel` fires.
    pub async fn resolve_with_cancel(
        &self,
        url: &NormalizedUrl,
        cancel: &CancellationToken,
    ) -> Result<ScanResult, ScanError> {
        let max_hops = self.settings.max_hops.max(1);
        let mut current = url.as_str().to_string();
        let mut hops: Vec<Hop> = Vec::new();
        let mut initial_status = ScanStatus::NoResponse;
        let mut terminal: Option<Terminal> = None;
        // Last redirect that was followed; becomes terminal if the budget runs out
        let mut last_redirect: Option<Terminal> = None;

        debug!("Resolving {current}");

        for hop in 0..max_hops {
            let response = match self.attempt(AttemptKind::Probe, &current, cancel).await {
                Ok(response) => response,
                Err(AttemptError::Cancelled) => return Err(ScanError::Cancelled),
                Err(probe_err) => {
                    debug!("Probe failed for {current}: {probe_err}; retrying with GET");
                    let response = match self.attempt(AttemptKind::Fallback, &current, cancel).await {
                        Ok(response) => response,
                        Err(AttemptError::Cancelled) => return Err(ScanError::Cancelled),
                        Err(fallback_err) => {
                            self.stats.increment_error(ErrorType::FetchFailure);
                            warn!("Failed to fetch {current}: {fallback_err}");
                            return Err(ScanError::Fetch {
                                url: current,
                                message: fallback_err.to_string(),
                            });
                        }
                    };

                    self.stats.increment_info(InfoType::ProbeFallback);
                    if hop == 0 {
                        initial_status = response.status.into();
                    }
                    let destination = response.url.clone();
                    terminal = Some(Terminal::new(response, destination, Termination::Fallback));
                    break;
                }
            };

            if hop == 0 {
                initial_status = response.status.into();
            }

            if !response.status.is_redirection() {
                // Prefer the client-reported URL
                let destination = if response.url.is_empty() {
                    current.clone()
                } else {
                    response.url.clone()
                };
                terminal = Some(Terminal::new(response, destination, Termination::Final));
                break;
            }

            debug!(
                "Hop {}: {} -> {} (Location: {})",
                hop + 1,
                current,
                response.status.as_u16(),
                response.location.as_deref().unwrap_or("none")
            );
            hops.push(Hop {
                url: current.clone(),
                status: Some(response.status.as_u16()),
                location: response.location.clone(),
            });

            let Some(location) = response.location.clone() else {
                info!(
                    "Redirect status {} for {} but no Location header",
                    response.status.as_u16(),
                    current
                );
                self.stats.increment_info(InfoType::MissingLocation);
                terminal = Some(Terminal::new(
                    response,
                    current.clone(),
                    Termination::MissingLocation,
                ));
                break;
            };

            let next = match resolve_location(&current, &location) {
                Ok(next) => next,
                Err(e) => {
                    warn!("Unusable Location {location:?} from {current}: {e}");
                    self.stats.increment_info(InfoType::InvalidLocation);
                    terminal = Some(Terminal::new(
                        response,
                        current.clone(),
                        Termination::InvalidLocation,
                    ));
                    break;
                }
            };

            if next == current {
                warn!("{current} redirects to itself, stopping");
                self.stats.increment_info(InfoType::SelfRedirect);
                terminal = Some(Terminal::new(
                    response,
                    current.clone(),
                    Termination::SelfRedirect,
                ));
                break;
            }

            if is_https_upgrade(&current, &next) {
                self.stats.increment_info(InfoType::HttpsRedirect);
            }

            last_redirect = Some(Terminal::new(
                response,
                current.clone(),
                Termination::HopLimit,
            ));
            current = next;
        }

        let terminal = match (terminal, last_redirect) {
            (Some(terminal), _) => terminal,
            (None, Some(last)) => {
                warn!("Hop limit ({max_hops}) reached for {url}, still redirecting to {current}");
                self.stats.increment_info(InfoType::HopLimit);
                last
            }
            // Every iteration either breaks with a terminal, returns, or records a redirect
            (None, None) => Terminal {
                status: ScanStatus::NoResponse,
                destination: String::new(),
                headers: BTreeMap::new(),
                termination: Termination::HopLimit,
            },
        };

        if !hops.is_empty() {
            self.stats.increment_info(InfoType::HttpRedirect);
        }
        if hops.len() > 1 {
            self.stats.increment_info(InfoType::MultipleRedirects);
        }

        let classification = Classification::from_initial_status(initial_status);
        debug!(
            "Resolved {} -> {} ({}, {} hop(s))",
            url,
            terminal.destination,
            classification,
            hops.len()
        );

        Ok(ScanResult {
            status: terminal.status,
            initial_status,
            destination: terminal.destination,
            classification,
            headers: terminal.headers,
            hops,
            termination: terminal.termination,
        })
    }

    /// Runs one attempt and records its failure, if any, in the statistics.
    ///
    /// Cancellation is passed through untouched so the caller can stop at once.
    async fn attempt(
        &self,
        kind: AttemptKind,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<AttemptResponse, AttemptError> {
        let (client, deadline) = match kind {
            AttemptKind::Probe => (&self.probe_client, self.settings.probe_timeout),
            AttemptKind::Fallback => (&self.fallback_client, self.settings.fallback_timeout),
        };

        attempt::execute(client, kind, url, deadline, cancel)
            .await
            .map_err(|e| {
                if let Some(error_type) = categorize_attempt_error(&e) {
                    self.stats.increment_error(error_type);
                }
                e
            })
    }
}

/// Resolves a `Location` value against the URL that returned it.
///
/// Absolute values replace the base entirely; relative references
/// (`/path`, `../x`, `?q`, `//host/path`) are joined onto it.
pub fn resolve_location(current: &str, location: &str) -> Result<String, url::ParseError> {
    let base = Url::parse(current)?;
    Ok(base.join(location)?.to_string())
}

fn is_https_upgrade(from: &str, to: &str) -> bool {
    from.get(..7).is_some_and(|s| s.eq_ignore_ascii_case("http://"))
        && to.get(..8).is_some_and(|s| s.eq_ignore_ascii_case("https://"))
}
