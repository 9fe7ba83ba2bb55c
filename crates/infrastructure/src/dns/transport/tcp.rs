//! DNS over TCP (RFC 1035 §4.2.2)
//!
//! Every message is preceded by a two-byte big-endian length. The framing helpers
//! here serve both the upstream client and the TCP listener.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use rebind_dns_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

const MAX_TCP_MESSAGE_SIZE: usize = u16::MAX as usize;

/// Prefixes `payload` with its length as two big-endian bytes.
pub fn encode_frame(payload: &[u8]) -> Result<Vec<u8>, DomainError> {
    let length = u16::try_from(payload.len()).map_err(|_| {
        DomainError::Framing(format!(
            "Message too large: {} bytes (max {})",
            payload.len(),
            MAX_TCP_MESSAGE_SIZE
        ))
    })?;

    let mut frame = Vec::with_capacity(payload.len() + 2);
    frame.extend_from_slice(&length.to_be_bytes());
    frame.extend_from_slice(payload);
    Ok(frame)
}

pub async fn write_framed<S>(stream: &mut S, payload: &[u8]) -> Result<(), DomainError>
where
    S: AsyncWrite + Unpin,
{
    let frame = encode_frame(payload)?;
    stream
        .write_all(&frame)
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to write DNS message: {}", e)))?;
    stream
        .flush()
        .await
        .map_err(|e| DomainError::IoError(format!("Failed to flush stream: {}", e)))?;
    Ok(())
}

/// Reads one length-prefixed message. A stream that ends before the declared
/// length is reached is a framing error.
pub async fn read_framed<S>(stream: &mut S) -> Result<Vec<u8>, DomainError>
where
    S: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await.map_err(|e| {
        DomainError::Framing(format!("Failed to read length prefix: {}", e))
    })?;

    let declared = u16::from_be_bytes(len_buf) as usize;
    let mut payload = vec![0u8; declared];
    let mut received = 0;

    while received < declared {
        let n = stream
            .read(&mut payload[received..])
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to read DNS message: {}", e)))?;
        if n == 0 {
            return Err(DomainError::Framing(format!(
                "Declared length {} but only {} bytes received",
                declared, received
            )));
        }
        received += n;
    }

    Ok(payload)
}

/// Reads the single query a client connection carries and rejects the frame if
/// more bytes than declared are already waiting on the socket.
///
/// Only bytes buffered by the time the frame is complete are seen. Bytes the
/// client sends after that are not detected and the frame is accepted.
pub async fn read_query_frame(stream: &mut TcpStream) -> Result<Vec<u8>, DomainError> {
    let payload = read_framed(stream).await?;

    let mut extra = [0u8; 1];
    match stream.try_read(&mut extra) {
        Ok(0) => Ok(payload),
        Ok(_) => Err(DomainError::Framing(format!(
            "Declared length {} but more bytes followed",
            payload.len()
        ))),
        Err(e) if e.kind() == io::ErrorKind::WouldBlock => Ok(payload),
        Err(e) => Err(DomainError::IoError(format!(
            "Failed to read from client: {}",
            e
        ))),
    }
}

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn timeout_error(&self) -> DomainError {
        DomainError::TransportTimeout {
            server: self.server_addr.to_string(),
        }
    }

    async fn connect(&self, timeout: Duration) -> Result<TcpStream, DomainError> {
        let stream = tokio::time::timeout(timeout, TcpStream::connect(self.server_addr))
            .await
            .map_err(|_| self.timeout_error())?
            .map_err(|e| {
                DomainError::IoError(format!(
                    "Connection refused by TCP server {}: {}",
                    self.server_addr, e
                ))
            })?;

        stream.set_nodelay(true).map_err(|e| {
            DomainError::IoError(format!(
                "Failed to set TCP_NODELAY on {}: {}",
                self.server_addr, e
            ))
        })?;

        Ok(stream)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let mut stream = self.connect(timeout).await?;

        tokio::time::timeout(timeout, write_framed(&mut stream, message_bytes))
            .await
            .map_err(|_| self.timeout_error())??;

        debug!(
            server = %self.server_addr,
            message_len = message_bytes.len(),
            "TCP query sent"
        );

        let response_bytes = tokio::time::timeout(timeout, read_framed(&mut stream))
            .await
            .map_err(|_| self.timeout_error())??;

        debug!(
            server = %self.server_addr,
            response_len = response_bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TCP",
        })
    }

    fn protocol_name(&self) -> &'static str {
        "TCP"
    }
}
