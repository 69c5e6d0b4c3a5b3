//! TCP server for game clients
//!
//! Handles incoming connections and manages client lifecycle. Each line in
//! either direction is one JSON object. Uses tokio for async networking.

use std::io;
use std::net::{SocketAddr, ToSocketAddrs};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use log::{debug, error, info};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::{mpsc, oneshot};

use crate::session::{ProtocolError, ServerEvent, SessionConfig, SessionManager};
use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH};

/// Longest inbound line accepted, excluding the newline
pub const MAX_LINE_BYTES: usize = 64 * 1024;

/// Pause after an accept error that is not tied to a single connection
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub board_width: usize,
    pub board_height: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            board_width: DEFAULT_BOARD_WIDTH,
            board_height: DEFAULT_BOARD_HEIGHT,
        }
    }
}

impl ServerConfig {
    /// Create from environment variables.
    ///
    /// - `TETRIS_HOST`: bind address (default "0.0.0.0")
    /// - `PORT` or `TETRIS_PORT`: port (default 3000; `PORT` wins, as on hosted platforms)
    /// - `TETRIS_BOARD_WIDTH` / `TETRIS_BOARD_HEIGHT`: board size (default 10x20)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ServerConfig::from_env`] with an explicit variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let parse = |key: &str| lookup(key).and_then(|s| s.trim().parse::<usize>().ok());

        let host = lookup("TETRIS_HOST")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.host);
        let port = ["PORT", "TETRIS_PORT"]
            .iter()
            .find_map(|key| lookup(key).and_then(|s| s.trim().parse::<u16>().ok()))
            .unwrap_or(defaults.port);
        let board_width = parse("TETRIS_BOARD_WIDTH")
            .filter(|&w| w > 0)
            .unwrap_or(defaults.board_width);
        let board_height = parse("TETRIS_BOARD_HEIGHT")
            .filter(|&h| h > 0)
            .unwrap_or(defaults.board_height);

        Self {
            host,
            port,
            board_width,
            board_height,
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            board_width: self.board_width,
            board_height: self.board_height,
        }
    }

    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .with_context(|| format!("invalid address {}:{}", self.host, self.port))?
            .next()
            .with_context(|| format!("no address for {}:{}", self.host, self.port))
    }
}

/// Probe whether `host:port` can be bound right now.
///
/// Lets the binary fail fast with `AddrInUse` before starting the runtime.
pub fn check_tcp_listen_available(host: &str, port: u16) -> std::io::Result<()> {
    let listener = std::net::TcpListener::bind((host, port))?;
    drop(listener);
    Ok(())
}

/// Accept connections forever, one session per connection.
///
/// If `ready_tx` is given it receives the bound address (useful with port 0).
pub async fn run_server(
    config: ServerConfig,
    manager: Arc<SessionManager>,
    ready_tx: Option<oneshot::Sender<SocketAddr>>,
) -> anyhow::Result<()> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    let bound = listener.local_addr()?;
    info!("Tetris server listening on {}", bound);
    if let Some(tx) = ready_tx {
        let _ = tx.send(bound);
    }

    loop {
        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                match accept_backoff(&e) {
                    Some(delay) => {
                        error!("Accept failed: {}; retrying in {:?}", e, delay);
                        tokio::time::sleep(delay).await;
                    }
                    None => debug!("Connection dropped before accept: {}", e),
                }
                continue;
            }
        };
        let manager = Arc::clone(&manager);

        tokio::spawn(async move {
            if let Err(e) = handle_client(socket, peer, manager).await {
                error!("Client {} error: {:#}", peer, e);
            }
        });
    }
}

/// How long to wait before accepting again after `err`.
///
/// Errors that belong to one half-open connection retry at once. Anything
/// else (out of file descriptors, buffers) backs off so the loop does not spin.
fn accept_backoff(err: &io::Error) -> Option<Duration> {
    match err.kind() {
        io::ErrorKind::ConnectionAborted
        | io::ErrorKind::ConnectionRefused
        | io::ErrorKind::ConnectionReset
        | io::ErrorKind::Interrupted => None,
        _ => Some(ACCEPT_BACKOFF),
    }
}

/// One inbound frame
#[derive(Debug, PartialEq, Eq)]
enum Frame {
    Line,
    TooLong,
    Eof,
}

/// Read one newline-terminated line into `buf`, holding at most
/// `MAX_LINE_BYTES` of it. The rest of an oversized line is skipped.
async fn read_frame<R>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<Frame>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    let limit = MAX_LINE_BYTES as u64 + 1;
    let n = (&mut *reader).take(limit).read_until(b'\n', buf).await?;
    if n == 0 {
        return Ok(Frame::Eof);
    }
    if buf.len() <= MAX_LINE_BYTES || buf.last() == Some(&b'\n') {
        return Ok(Frame::Line);
    }

    loop {
        buf.clear();
        let n = (&mut *reader)
            .take(MAX_LINE_BYTES as u64)
            .read_until(b'\n', buf)
            .await?;
        if n == 0 || buf.last() == Some(&b'\n') {
            buf.clear();
            return Ok(Frame::TooLong);
        }
    }
}

/// Handle a single client connection
async fn handle_client(
    socket: TcpStream,
    peer: SocketAddr,
    manager: Arc<SessionManager>,
) -> anyhow::Result<()> {
    let (reader, mut writer) = socket.into_split();
    let mut reader = BufReader::new(reader);

    let (tx, mut rx) = mpsc::unbounded_channel::<ServerEvent>();
    let id = manager.on_connect(tx).await;
    info!("Client {} connected as {}", peer, id);

    // Writer ends once the session (the only sender) is dropped.
    let write_task = tokio::spawn(async move {
        let mut buf: Vec<u8> = Vec::with_capacity(4096);
        while let Some(event) = rx.recv().await {
            buf.clear();
            if let Err(e) = serde_json::to_writer(&mut buf, &event) {
                error!("Failed to encode {} event: {}", event.kind(), e);
                continue;
            }
            buf.push(b'\n');
            if writer.write_all(&buf).await.is_err() {
                break;
            }
            if writer.flush().await.is_err() {
                break;
            }
        }
    });

    let mut line: Vec<u8> = Vec::with_capacity(1024);
    let result = loop {
        match read_frame(&mut reader, &mut line).await {
            Ok(Frame::Eof) => break Ok(()),
            Ok(Frame::Line) => {
                if line.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                manager.dispatch_line(&id, line.as_slice()).await;
            }
            Ok(Frame::TooLong) => {
                manager
                    .reject(&id, &ProtocolError::TooLong(MAX_LINE_BYTES))
                    .await;
            }
            Err(e) => break Err(anyhow::Error::new(e).context("read failed")),
        }
    };

    manager.on_disconnect(&id).await;
    info!("Client {} ({}) disconnected", peer, id);
    if write_task.await.is_err() {
        debug!("Writer for {} ended abnormally", id);
    }

    result
}
