//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use saber_core::Report;
use saber_protocol::Line;

/// Channel capacity for complete command lines
///
/// While a load is in progress the controller stops receiving; once this
/// fills, the RX task blocks and further bytes wait in the UART ring buffer.
const LINE_CHANNEL_SIZE: usize = 4;

/// Channel capacity for outgoing status reports
const STATUS_CHANNEL_SIZE: usize = 8;

/// Complete lines from the serial link, in arrival order
pub static LINE_CHANNEL: Channel<CriticalSectionRawMutex, Line, LINE_CHANNEL_SIZE> =
    Channel::new();

/// Status reports to print on the serial link
pub static STATUS_CHANNEL: Channel<CriticalSectionRawMutex, Report, STATUS_CHANNEL_SIZE> =
    Channel::new();
