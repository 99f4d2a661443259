//! Per-connection worker.
//!
//! Each worker owns one socket and loops: buffer bytes until a newline,
//! decode the frame as JSON, dispatch, write the response back with a
//! trailing newline. A malformed frame is logged and discarded; it must
//! never kill the worker or poison the buffer for the next frame.

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::Value;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;
use tracing::{debug, warn};

use crate::dispatch::dispatch;
use crate::main_lib::AppState;

/// Runs the connection until the peer disconnects, a write fails, or the
/// idle timeout fires. Ledger operations already handed to the dispatcher
/// always run to completion; a disconnect afterwards cannot undo them.
pub async fn run(stream: TcpStream, peer: SocketAddr, state: AppState, idle_timeout: Duration) {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = tokio::time::timeout(idle_timeout, reader.read_until(b'\n', &mut buf)).await;
        let n = match read {
            Err(_) => {
                debug!("Connection {} idle for {:?}, closing", peer, idle_timeout);
                break;
            }
            Ok(Err(e)) => {
                warn!("Read error on connection {}: {}", peer, e);
                break;
            }
            Ok(Ok(0)) => break, // peer closed
            Ok(Ok(n)) => n,
        };

        if buf[n - 1] != b'\n' {
            // EOF in the middle of a frame; nothing complete to decode.
            break;
        }
        let frame = trim_frame(&buf[..n - 1]);
        if frame.is_empty() {
            continue;
        }

        let request: Value = match serde_json::from_slice(frame) {
            Ok(value) => value,
            Err(e) => {
                warn!("Discarding malformed frame from {}: {}", peer, e);
                continue;
            }
        };

        let response = dispatch(&state, &request).await;
        let mut out = match serde_json::to_vec(&response) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to serialize response for {}: {}", peer, e);
                continue;
            }
        };
        out.push(b'\n');

        if let Err(e) = write_half.write_all(&out).await {
            warn!("Write error on connection {}: {}", peer, e);
            break;
        }
    }
}

/// Strips an optional carriage return so CRLF clients work too.
fn trim_frame(frame: &[u8]) -> &[u8] {
    match frame.split_last() {
        Some((b'\r', rest)) => rest,
        _ => frame,
    }
}
