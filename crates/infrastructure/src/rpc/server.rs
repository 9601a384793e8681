use crate::rpc::{frame, DnsPacketHandler};
use bytes::Bytes;
use futures::{SinkExt, StreamExt};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use tracing::{debug, warn};

/// Accept loop for the query transport. One task per connection, frames
/// answered in order on each connection.
pub async fn serve(listener: TcpListener, handler: Arc<DnsPacketHandler>) -> std::io::Result<()> {
    loop {
        let (stream, peer) = listener.accept().await?;
        debug!(%peer, "Connection accepted");
        let handler = Arc::clone(&handler);
        tokio::spawn(async move {
            handle_connection(stream, handler).await;
        });
    }
}

async fn handle_connection(stream: TcpStream, handler: Arc<DnsPacketHandler>) {
    let mut framed = Framed::new(stream, LengthDelimitedCodec::new());
    while let Some(next) = framed.next().await {
        let payload = match next {
            Ok(bytes) => bytes.freeze(),
            Err(e) => {
                warn!(error = %e, "Frame decode failed, closing connection");
                return;
            }
        };

        // A malformed envelope is answered, not fatal to the connection.
        let reply = match frame::decode_request(payload) {
            Ok((scope, message)) => handler.handle(&scope, &message),
            Err(e) => {
                warn!(error = %e, "Malformed request envelope");
                Vec::new()
            }
        };

        if let Err(e) = framed.send(Bytes::from(reply)).await {
            warn!(error = %e, "Reply send failed, closing connection");
            return;
        }
    }
    debug!("Connection closed by peer");
}
