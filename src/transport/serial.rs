//! Serial session implementation.
//!
//! [`SerialLink`] owns one session to a printer at a time: the port handle,
//! the outbound sink and the inbound source all live and die with it.

use std::sync::Arc;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt, WriteHalf};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_serial::{SerialPortBuilderExt, SerialPortInfo, SerialStream};

use crate::error::{Error, Result};
use crate::event::{EventDispatcher, LinkEvent, Subscription};
use crate::transport::PortSelector;

/// Fixed baud rate the printer speaks.
pub const BAUD_RATE: u32 = 115_200;

/// Size of the inbound read buffer.
const READ_BUF_SIZE: usize = 1024;

/// Handler invoked with each inbound chunk.
///
/// The link forwards raw bytes without classifying them; decoding (status
/// frames included) is the subscriber's job.
pub type ChunkHandler = Arc<dyn Fn(Bytes) + Send + Sync>;

/// A single serial session to a label printer.
///
/// The write half sits behind a mutex so concurrent writers cannot
/// interleave; the read half moves into a background task that feeds the
/// chunk handler. No other component may touch either stream while the
/// session is open.
pub struct SerialLink {
    supported: bool,
    selector: Box<dyn PortSelector>,
    handler: ChunkHandler,
    dispatcher: EventDispatcher,
    port_name: Option<String>,
    writer: Option<Arc<Mutex<WriteHalf<SerialStream>>>>,
    read_task: Option<JoinHandle<()>>,
    connected: bool,
}

impl SerialLink {
    /// Creates a link with the given port selector and chunk handler.
    ///
    /// Host capability is probed once here; a link built on a host without
    /// serial access stays permanently degraded (`open` returns `false`,
    /// `known_ports` is empty).
    pub fn new<F>(selector: Box<dyn PortSelector>, on_chunk: F) -> Self
    where
        F: Fn(Bytes) + Send + Sync + 'static,
    {
        Self::with_support(
            tokio_serial::available_ports().is_ok(),
            selector,
            Arc::new(on_chunk),
        )
    }

    fn with_support(
        supported: bool,
        selector: Box<dyn PortSelector>,
        handler: ChunkHandler,
    ) -> Self {
        Self {
            supported,
            selector,
            handler,
            dispatcher: EventDispatcher::new(16),
            port_name: None,
            writer: None,
            read_task: None,
            connected: false,
        }
    }

    /// Whether the host can speak to serial devices at all.
    #[must_use]
    pub const fn is_supported(&self) -> bool {
        self.supported
    }

    /// Whether a session is currently open.
    #[must_use]
    pub const fn is_connected(&self) -> bool {
        self.connected
    }

    /// Ports currently visible to the host; empty when unsupported.
    #[must_use]
    pub fn known_ports(&self) -> Vec<SerialPortInfo> {
        if !self.supported {
            return Vec::new();
        }
        list_ports().unwrap_or_default()
    }

    /// Subscribes to connectivity events.
    #[must_use]
    pub fn subscribe(&self) -> Subscription {
        self.dispatcher.subscribe()
    }

    /// Opens a session, resolving the port through `preselected` or the
    /// selector prompt.
    ///
    /// Returns `Ok(false)` when the host is unsupported or the port cannot
    /// be acquired (nothing is retained on that path), `Ok(true)` once a
    /// session is up. Opening while connected is idempotent and does not
    /// create a second session. Only a selector failure (the operator
    /// declining the prompt) propagates as an error.
    pub async fn open(&mut self, preselected: Option<&str>) -> Result<bool> {
        if !self.supported {
            return Ok(false);
        }
        if self.connected {
            return Ok(true);
        }

        let port_name = match preselected {
            Some(name) => name.to_owned(),
            None => {
                let candidates = self.known_ports();
                self.selector.select(&candidates).await?
            }
        };

        tracing::info!("opening serial port: {port_name}");
        let stream = match tokio_serial::new(&port_name, BAUD_RATE).open_native_async() {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!("failed to acquire {port_name}: {e}");
                return Ok(false);
            }
        };

        let (reader, writer) = tokio::io::split(stream);
        self.writer = Some(Arc::new(Mutex::new(writer)));

        let handler = Arc::clone(&self.handler);
        self.read_task = Some(tokio::spawn(Self::run_read_loop(reader, handler)));

        self.port_name = Some(port_name);
        self.connected = true;
        self.dispatcher.dispatch(LinkEvent::Connected);
        tracing::info!("serial session established");
        Ok(true)
    }

    /// Tears the session down.
    ///
    /// Each step is best-effort so a failing one never blocks the rest.
    /// Aborting the read task cancels a pending read; the port itself
    /// closes once both stream halves have been dropped.
    pub async fn close(&mut self) {
        if let Some(task) = self.read_task.take() {
            task.abort();
        }

        if let Some(writer) = self.writer.take() {
            let mut writer = writer.lock().await;
            if let Err(e) = writer.shutdown().await {
                tracing::debug!("writer shutdown failed: {e}");
            }
        }

        self.port_name = None;
        if self.connected {
            self.connected = false;
            self.dispatcher.dispatch(LinkEvent::Disconnected);
            tracing::info!("serial session closed");
        }
    }

    /// Reacts to the host reporting a physical disconnect of `port_name`.
    ///
    /// Runs the same teardown as [`close`](Self::close) when the reported
    /// port is the one this session owns; other ports are ignored.
    pub async fn handle_disconnect(&mut self, port_name: &str) {
        if self.port_name.as_deref() == Some(port_name) {
            tracing::warn!("device on {port_name} disconnected");
            self.close().await;
        }
    }

    /// Writes each line's UTF-8 bytes in order through the outbound sink.
    ///
    /// The sink's lock is held for the whole batch, so a concurrent writer
    /// cannot interleave. A no-op when no session is open.
    pub async fn write_lines<S: AsRef<str>>(&self, lines: &[S]) -> Result<()> {
        let Some(writer) = &self.writer else {
            return Ok(());
        };
        let mut writer = writer.lock().await;
        for line in lines {
            writer.write_all(line.as_ref().as_bytes()).await?;
        }
        writer.flush().await?;
        Ok(())
    }

    /// Writes one raw payload through the outbound sink.
    ///
    /// Same exclusivity discipline as [`write_lines`](Self::write_lines);
    /// a no-op when no session is open.
    pub async fn write_bytes(&self, data: &[u8]) -> Result<()> {
        let Some(writer) = &self.writer else {
            return Ok(());
        };
        let mut writer = writer.lock().await;
        writer.write_all(data).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Runs the inbound loop over any byte source.
    ///
    /// Each non-empty chunk is handed to `handler` before the next read, so
    /// delivery is strictly serialized. The loop ends on end-of-stream or on
    /// a read error; errors are logged, never propagated, and the session's
    /// connectivity state is left as-is.
    pub async fn run_read_loop<R>(mut reader: R, handler: ChunkHandler)
    where
        R: AsyncRead + Unpin,
    {
        let mut buf = [0u8; READ_BUF_SIZE];
        loop {
            match reader.read(&mut buf).await {
                Ok(0) => {
                    tracing::debug!("serial stream ended");
                    break;
                }
                Ok(n) => {
                    tracing::trace!("received {n} bytes: {}", hex::encode(&buf[..n]));
                    handler(Bytes::copy_from_slice(&buf[..n]));
                }
                Err(e) => {
                    tracing::error!("serial read error: {e}");
                    break;
                }
            }
        }
    }
}

/// Lists available serial ports.
///
/// # Errors
///
/// Returns an error if the port list cannot be retrieved.
pub fn list_ports() -> Result<Vec<SerialPortInfo>> {
    tokio_serial::available_ports().map_err(Error::Serial)
}
