//! Saber - Two-Servo Launcher Firmware
//!
//! Main firmware binary for RP2040-based launcher controllers.
//! A lock servo holds or releases the launch arm and an aim servo sets the
//! elevation, both driven by text commands over UART.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::peripherals::UART0;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use fixed::types::extra::U4;
use fixed::FixedU16;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use saber_core::Launcher;
use saber_drivers::servo::PwmServo;

use crate::config::{BAUD_RATE, CALIBRATION, PWM_DIVIDER, PWM_TOP, SERVO_CONFIG};

mod channels;
mod config;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 256]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Saber firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    info!(
        "Calibration: trigger {}/{} us, aim {}..{} us in {} steps, load {} ms",
        CALIBRATION.trigger_closed_us,
        CALIBRATION.trigger_open_us,
        CALIBRATION.aim_down_us,
        CALIBRATION.aim_up_us,
        CALIBRATION.step_max,
        CALIBRATION.load_time_ms
    );

    // Setup UART for the command link (GPIO0 TX, GPIO1 RX)
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = BAUD_RATE;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 256]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();

    info!("UART initialized for command link");

    // Setup PWM slice 7 for both servos (GPIO14 = A = trigger, GPIO15 = B = aim)
    // Outputs start low; the controller homes them to the initial state
    let mut pwm_config = PwmConfig::default();
    pwm_config.divider = FixedU16::<U4>::from_num(PWM_DIVIDER);
    pwm_config.top = PWM_TOP;
    pwm_config.compare_a = 0;
    pwm_config.compare_b = 0;

    let pwm = Pwm::new_output_ab(p.PWM_SLICE7, p.PIN_14, p.PIN_15, pwm_config);
    let (trigger_pwm, aim_pwm) = pwm.split();
    let trigger = PwmServo::new(unwrap!(trigger_pwm), SERVO_CONFIG);
    let aim = PwmServo::new(unwrap!(aim_pwm), SERVO_CONFIG);

    info!("PWM servos initialized");

    // Calibration is checked at build time, so this only fails on a broken build
    let launcher = unwrap!(Launcher::new(CALIBRATION, trigger, aim));

    // Spawn tasks
    spawner.spawn(unwrap!(tasks::serial_rx_task(rx)));
    spawner.spawn(unwrap!(tasks::serial_tx_task(tx)));
    spawner.spawn(unwrap!(tasks::controller_task(launcher)));

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
