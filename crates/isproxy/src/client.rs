//! Bulk-check session over a single socket.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use registrar::{ApiKey, CheckResult};
use rustls::pki_types::ServerName;
use rustls::RootCertStore;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufStream};
use tokio::net::TcpStream;
use tokio_rustls::client::TlsStream;
use tokio_rustls::TlsConnector;
use tracing::debug;

use crate::protocol::{auth_line, check_line, parse_check_line, split_domain, AUTH_OK, QUIT_LINE};
use crate::{BatchError, IsProxyConfig, IsProxyError};

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// Where a session is in its lifecycle. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Disconnected,
    Connecting,
    Authenticated,
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Authenticated => "authenticated",
            Self::Closed => "closed",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// IsProxyClient
// ---------------------------------------------------------------------------

/// One authenticated bulk-check session.
///
/// Requests run strictly one at a time: every method takes `&mut self`, so a
/// session cannot be driven from two call paths at once.
pub struct IsProxyClient<S = TlsStream<TcpStream>> {
    api_key: ApiKey,
    timeout: Duration,
    stream: Option<BufStream<S>>,
    state: SessionState,
}

impl<S> fmt::Debug for IsProxyClient<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IsProxyClient")
            .field("state", &self.state)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl IsProxyClient<TlsStream<TcpStream>> {
    /// Dials the configured server over TLS and authenticates.
    pub async fn connect(api_key: ApiKey, config: &IsProxyConfig) -> Result<Self, IsProxyError> {
        let mut client = Self::new(api_key, config.timeout);
        let stream = open_tls(config).await?;
        client.handshake(stream).await?;
        Ok(client)
    }
}

impl<S> IsProxyClient<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    /// Creates a `Disconnected` session. `timeout` bounds each exchange.
    pub fn new(api_key: ApiKey, timeout: Duration) -> Self {
        Self {
            api_key,
            timeout,
            stream: None,
            state: SessionState::Disconnected,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Authenticates over an already-established stream.
    ///
    /// Anything other than an exact `OK` reply closes the stream and leaves
    /// the session `Closed`.
    pub async fn handshake(&mut self, stream: S) -> Result<(), IsProxyError> {
        self.expect_state(SessionState::Disconnected)?;
        self.transition(SessionState::Connecting);
        self.stream = Some(BufStream::new(stream));

        let line = auth_line(&self.api_key);
        match self.exchange(&line).await {
            Ok(reply) if reply.trim() == AUTH_OK => {
                self.transition(SessionState::Authenticated);
                Ok(())
            }
            Ok(reply) => {
                self.abort();
                Err(IsProxyError::HandshakeFailed {
                    response: reply.trim().to_string(),
                })
            }
            Err(err) => {
                self.abort();
                Err(err)
            }
        }
    }

    /// Checks one domain. Any failure closes the session.
    pub async fn check(&mut self, name: &str, tld: &str) -> Result<CheckResult, IsProxyError> {
        self.expect_state(SessionState::Authenticated)?;
        split_domain(&format!("{name}.{tld}"))?;

        let outcome = match self.exchange(&check_line(name, tld)).await {
            Ok(reply) => parse_check_line(&reply),
            Err(err) => Err(err),
        };
        if outcome.is_err() {
            self.abort();
        }
        outcome
    }

    /// Checks `name.tld` entries in order on this session.
    ///
    /// Every entry is validated before the first request is sent. On a
    /// mid-batch failure the results gathered so far travel in the
    /// [`BatchError`].
    pub async fn check_many<D>(&mut self, domains: &[D]) -> Result<Vec<CheckResult>, BatchError>
    where
        D: AsRef<str>,
    {
        let parsed = domains
            .iter()
            .map(|d| split_domain(d.as_ref()))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|error| BatchError {
                completed: Vec::new(),
                error,
            })?;

        let mut completed = Vec::with_capacity(parsed.len());
        for (name, tld) in parsed {
            match self.check(name, tld).await {
                Ok(result) => completed.push(result),
                Err(error) => return Err(BatchError { completed, error }),
            }
        }
        Ok(completed)
    }

    /// Sends `QUIT` (best effort) and closes the socket. Idempotent.
    pub async fn close(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            let quit = async {
                stream.write_all(QUIT_LINE.as_bytes()).await?;
                stream.flush().await?;
                stream.shutdown().await
            };
            match tokio::time::timeout(self.timeout, quit).await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => debug!(error = %err, "QUIT not delivered"),
                Err(_) => debug!("QUIT timed out"),
            }
        }
        if self.state != SessionState::Closed {
            self.transition(SessionState::Closed);
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// Drops the socket without a goodbye.
    fn abort(&mut self) {
        self.stream = None;
        self.transition(SessionState::Closed);
    }

    fn transition(&mut self, next: SessionState) {
        debug!(from = %self.state, to = %next, "bulk-check session state change");
        self.state = next;
    }

    fn expect_state(&self, expected: SessionState) -> Result<(), IsProxyError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(IsProxyError::InvalidState {
                expected,
                actual: self.state,
            })
        }
    }

    /// Writes one request line and reads one reply line.
    async fn exchange(&mut self, line: &str) -> Result<String, IsProxyError> {
        let actual = self.state;
        let stream = self.stream.as_mut().ok_or(IsProxyError::InvalidState {
            expected: SessionState::Authenticated,
            actual,
        })?;

        let io = async {
            stream.write_all(line.as_bytes()).await?;
            stream.flush().await?;
            let mut reply = String::new();
            if stream.read_line(&mut reply).await? == 0 {
                return Err(IsProxyError::ConnectionClosed);
            }
            Ok::<_, IsProxyError>(reply)
        };
        tokio::time::timeout(self.timeout, io)
            .await
            .map_err(|_| IsProxyError::Timeout)?
    }
}

// ---------------------------------------------------------------------------
// TLS
// ---------------------------------------------------------------------------

/// Dials the configured server and completes the TLS handshake, without
/// authenticating. Both steps are bounded by `config.timeout`.
pub async fn open_tls(config: &IsProxyConfig) -> Result<TlsStream<TcpStream>, IsProxyError> {
    let address = config.address();
    debug!(%address, "dialling bulk-check server");

    let tcp = tokio::time::timeout(config.timeout, TcpStream::connect(&address))
        .await
        .map_err(|_| IsProxyError::Timeout)?
        .map_err(|source| IsProxyError::Connect {
            address: address.clone(),
            source,
        })?;

    let server_name =
        ServerName::try_from(config.host.clone()).map_err(|_| IsProxyError::InvalidHost {
            host: config.host.clone(),
        })?;
    let connector = TlsConnector::from(tls_config()?);

    tokio::time::timeout(config.timeout, connector.connect(server_name, tcp))
        .await
        .map_err(|_| IsProxyError::Timeout)?
        .map_err(IsProxyError::Tls)
}

/// TLS 1.2 or newer, verified against the bundled Mozilla roots.
fn tls_config() -> Result<Arc<rustls::ClientConfig>, IsProxyError> {
    let mut roots = RootCertStore::empty();
    roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

    let provider = Arc::new(rustls::crypto::ring::default_provider());
    let config = rustls::ClientConfig::builder_with_provider(provider)
        .with_protocol_versions(&[&rustls::version::TLS13, &rustls::version::TLS12])
        .map_err(|err| IsProxyError::Tls(std::io::Error::other(err)))?
        .with_root_certificates(roots)
        .with_no_client_auth();
    Ok(Arc::new(config))
}
