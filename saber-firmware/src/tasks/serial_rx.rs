//! Serial receive task
//!
//! Assembles command lines from the UART byte stream and queues them for
//! the controller.

use defmt::*;
use embassy_rp::uart::BufferedUartRx;
use embedded_io_async::Read;

use saber_protocol::{LineAccumulator, LineError};

use crate::channels::LINE_CHANNEL;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Serial RX task - receives bytes and forwards complete lines
#[embassy_executor::task]
pub async fn serial_rx_task(mut rx: BufferedUartRx) {
    info!("Serial RX task started");

    let mut accumulator = LineAccumulator::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        // Read available bytes
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match accumulator.feed(byte) {
                        Ok(Some(line)) => {
                            debug!("Line: {}", line.as_str());
                            // Waits while the controller is busy; ordering is preserved
                            LINE_CHANNEL.send(line).await;
                        }
                        Ok(None) => {
                            // Need more bytes
                        }
                        Err(LineError::Overflow) => {
                            warn!("Line too long, discarding until newline");
                        }
                        Err(LineError::InvalidUtf8) => {
                            warn!("Dropping line with invalid UTF-8");
                        }
                    }
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}
