use async_trait::async_trait;
use authdns_application::ports::InvalidationChannel;
use authdns_domain::DomainError;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines};
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tracing::{debug, warn};

/// Subscription to the record-change feed.
///
/// The feed speaks a line protocol: we send `SUBSCRIBE <channel>` once,
/// then the broker pushes one invalidation message per line. A closed
/// connection surfaces as `None`; the caller owns reconnect policy.
pub struct TcpInvalidationChannel {
    lines: Lines<BufReader<OwnedReadHalf>>,
    // Held open so the broker keeps the subscription alive.
    _writer: OwnedWriteHalf,
}

impl TcpInvalidationChannel {
    pub async fn connect(addr: &str, channel: &str) -> Result<Self, DomainError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| DomainError::IoError(format!("connect {addr}: {e}")))?;
        let (reader, mut writer) = stream.into_split();

        writer
            .write_all(format!("SUBSCRIBE {channel}\n").as_bytes())
            .await
            .map_err(|e| DomainError::IoError(format!("subscribe {channel}: {e}")))?;

        debug!(addr, channel, "Subscribed to invalidation feed");
        Ok(Self {
            lines: BufReader::new(reader).lines(),
            _writer: writer,
        })
    }
}

#[async_trait]
impl InvalidationChannel for TcpInvalidationChannel {
    async fn recv(&mut self) -> Option<String> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    let line = line.trim();
                    if line.is_empty() {
                        continue;
                    }
                    return Some(line.to_string());
                }
                Ok(None) => return None,
                Err(e) => {
                    warn!(error = %e, "Invalidation feed read failed");
                    return None;
                }
            }
        }
    }
}
