use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use alarmscope_bus::{EventFilter, EventTopic, InMemoryEventBus, PanelEvent, Subscription};
use alarmscope_types::{Keypress, MESSAGE_TIMESTAMP_FORMAT, PanelMessage};

/// Delay between reconnect attempts
const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Errors from the panel gateway connection
#[derive(Debug, Error)]
pub enum PanelError {
    /// The gateway closed the connection
    #[error("panel connection closed")]
    Disconnected,

    #[error("panel i/o: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode a keypress into the bytes the panel expects.
///
/// Function keys 1-4 are sent as their key byte repeated three times;
/// everything else is sent as the literal character.
pub fn encode_keypress(key: Keypress) -> Vec<u8> {
    match key {
        Keypress::Char(c) => c.to_string().into_bytes(),
        Keypress::Special(n) => vec![n; 3],
    }
}

/// Manages the TCP connection to the panel gateway.
///
/// One task owns the socket: it publishes inbound lines on the message
/// topic and writes subscribed keypress events back to the device.
/// Disconnects are retried until [`PanelConnection::stop`] is called.
pub struct PanelConnection {
    cancel: CancellationToken,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl PanelConnection {
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
            task: None,
        }
    }

    /// Start the connection task against `addr` (e.g. `localhost:10000`)
    pub fn start(&mut self, addr: String, bus: Arc<InMemoryEventBus>) {
        let cancel = self.cancel.clone();

        let task = tokio::spawn(async move {
            let mut keypresses = bus.subscribe(EventFilter::topic(EventTopic::Keypress));

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,

                    result = TcpStream::connect(&addr) => match result {
                        Ok(stream) => {
                            info!(%addr, "connected to panel gateway");
                            match serve(stream, &bus, &mut keypresses, &cancel).await {
                                Ok(()) => break,
                                Err(e) => warn!(%addr, error = %e, "panel connection lost"),
                            }
                        }
                        Err(e) => {
                            warn!(%addr, error = %e, "panel connect failed");
                        }
                    },
                }

                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(RECONNECT_DELAY) => {}
                }
            }
        });

        self.task = Some(task);
    }

    /// Stop the connection task
    pub fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Default for PanelConnection {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for PanelConnection {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Drive one connected session until cancellation, disconnect, or error.
///
/// Returns `Ok(())` only on deliberate shutdown (cancellation or the bus
/// going away); a dropped socket is an error so the caller reconnects.
async fn serve(
    stream: TcpStream,
    bus: &InMemoryEventBus,
    keypresses: &mut Subscription,
    cancel: &CancellationToken,
) -> Result<(), PanelError> {
    let (read_half, mut write_half) = stream.into_split();
    let mut lines = BufReader::new(read_half).lines();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Ok(()),

            line = lines.next_line() => match line? {
                Some(line) => {
                    if line.trim().is_empty() {
                        continue;
                    }
                    let message = PanelMessage::new(
                        Local::now().format(MESSAGE_TIMESTAMP_FORMAT).to_string(),
                        line,
                    );
                    bus.publish(PanelEvent::Message(message));
                }
                None => return Err(PanelError::Disconnected),
            },

            event = keypresses.recv() => match event {
                Some(PanelEvent::Keypress(key)) => send_keypress(&mut write_half, key).await?,
                Some(_) => {}
                None => return Ok(()),
            },
        }
    }
}

async fn send_keypress(write_half: &mut OwnedWriteHalf, key: Keypress) -> Result<(), PanelError> {
    write_half.write_all(&encode_keypress(key)).await?;
    write_half.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;
    use tokio::time::timeout;

    #[test]
    fn test_encode_keypress() {
        assert_eq!(encode_keypress(Keypress::Char('5')), b"5");
        assert_eq!(encode_keypress(Keypress::Char('*')), b"*");
        assert_eq!(encode_keypress(Keypress::Special(1)), vec![1, 1, 1]);
        assert_eq!(encode_keypress(Keypress::Special(4)), vec![4, 4, 4]);
    }

    #[tokio::test]
    async fn test_inbound_lines_become_messages() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let bus = Arc::new(InMemoryEventBus::new());
        let mut messages = bus.subscribe(EventFilter::topic(EventTopic::Message));

        let mut connection = PanelConnection::new();
        connection.start(addr, bus.clone());

        let (mut socket, _) = listener.accept().await.unwrap();
        socket.write_all(b"[10000001000000100A--] READY\n").await.unwrap();

        let event = timeout(Duration::from_secs(1), messages.recv())
            .await
            .expect("timeout")
            .expect("event");
        match event {
            PanelEvent::Message(msg) => {
                assert_eq!(msg.raw, "[10000001000000100A--] READY");
                // Feed stamps carry sub-second precision for later trimming.
                assert!(msg.timestamp.contains('.'));
            }
            other => panic!("unexpected event: {other:?}"),
        }

        connection.stop();
    }

    #[tokio::test]
    async fn test_keypress_written_to_socket() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap().to_string();

        let bus = Arc::new(InMemoryEventBus::new());
        let mut connection = PanelConnection::new();
        connection.start(addr, bus.clone());

        let (mut socket, _) = listener.accept().await.unwrap();

        // The connection task subscribes before connecting, but give the
        // select loop a moment to be ready on slow runners.
        tokio::time::sleep(Duration::from_millis(50)).await;
        bus.publish(PanelEvent::Keypress(Keypress::Special(2)));

        let mut buf = [0u8; 3];
        timeout(Duration::from_secs(1), socket.read_exact(&mut buf))
            .await
            .expect("timeout")
            .expect("read");
        assert_eq!(buf, [2, 2, 2]);

        connection.stop();
    }
}
