//! Serial transmit task
//!
//! Prints one status line per report.

use defmt::*;
use embassy_rp::uart::BufferedUartTx;
use embedded_io_async::Write;

use crate::channels::STATUS_CHANNEL;

/// Status line terminator
const LINE_END: &[u8] = b"\r\n";

/// Serial TX task - renders reports and writes them to the UART
#[embassy_executor::task]
pub async fn serial_tx_task(mut tx: BufferedUartTx) {
    info!("Serial TX task started");

    loop {
        let report = STATUS_CHANNEL.receive().await;
        let line = report.render();

        if let Err(e) = tx.write_all(line.as_bytes()).await {
            warn!("Failed to send status: {:?}", e);
            continue;
        }
        if let Err(e) = tx.write_all(LINE_END).await {
            warn!("Failed to send status terminator: {:?}", e);
            continue;
        }

        trace!("Status sent: {}", line.as_str());
    }
}
