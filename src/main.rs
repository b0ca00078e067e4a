//! Firmware entry point for the nRF52840 touch remote.
//!
//! Brings up Embassy and the SoftDevice, builds the shared broadcast
//! session, and spawns the three long-lived tasks: radio, touch
//! input, and the color remote application.

#![no_std]
#![no_main]

use defmt_rtt as _;
use panic_probe as _;

use core::cell::RefCell;

use defmt::{info, unwrap};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pull};
use embassy_nrf::interrupt::Priority;
use embassy_nrf::{bind_interrupts, saadc};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use nrf_softdevice::{raw, Softdevice};
use static_cell::StaticCell;

use touchbeacon::app::remote_task;
use touchbeacon::beacon::advertiser::{advertiser_task, AdvKick, Beacon, SharedSession};
use touchbeacon::beacon::payload::VendorIdentity;
use touchbeacon::beacon::session::BeaconSession;
use touchbeacon::config::{BEACON_MAJOR, BEACON_MINOR, BEACON_UUID, MEASURED_POWER};
use touchbeacon::input::touch::{touch_task, TouchPad};
use touchbeacon::input::TouchEvent;

bind_interrupts!(struct Irqs {
    SAADC => saadc::InterruptHandler;
});

static SESSION: StaticCell<SharedSession> = StaticCell::new();
static KICK: AdvKick = Signal::new();
static TOUCH_EVENTS: Channel<CriticalSectionRawMutex, TouchEvent, 4> = Channel::new();

#[embassy_executor::task]
async fn softdevice_task(sd: &'static Softdevice) -> ! {
    sd.run().await
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("touchbeacon starting");

    let mut config = embassy_nrf::config::Config::default();
    // The SoftDevice owns the highest interrupt priorities.
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);

    let sd_config = nrf_softdevice::Config {
        clock: Some(raw::nrf_clock_lf_cfg_t {
            source: raw::NRF_CLOCK_LF_SRC_RC as u8,
            rc_ctiv: 16,
            rc_temp_ctiv: 2,
            accuracy: raw::NRF_CLOCK_LF_ACCURACY_500_PPM as u8,
        }),
        ..Default::default()
    };
    let sd: &'static Softdevice = Softdevice::enable(&sd_config);
    unwrap!(spawner.spawn(softdevice_task(sd)));

    // Shared broadcast state behind the single lock.
    let identity = VendorIdentity {
        uuid: BEACON_UUID,
        major: BEACON_MAJOR,
        minor: BEACON_MINOR,
        measured_power: MEASURED_POWER,
    };
    let session: &'static SharedSession = SESSION.init(Mutex::new(RefCell::new(unwrap!(
        BeaconSession::new(identity)
    ))));
    let beacon = Beacon::new(session, &KICK);

    // Touch pad: analog sense on AIN0, digital wake line on P0.11.
    let adc_config = saadc::Config::default();
    let channel = saadc::ChannelConfig::single_ended(p.P0_02);
    let adc = saadc::Saadc::new(p.SAADC, Irqs, adc_config, [channel]);
    let pad = TouchPad::new(adc);

    let wake = Input::new(p.P0_11, Pull::Up);
    // A pad already held at boot means the touch woke us.
    let woken_by_touch = wake.is_low();

    let led = Output::new(p.P0_06, Level::Low, OutputDrive::Standard);

    unwrap!(spawner.spawn(advertiser_task(sd, session, &KICK)));
    unwrap!(spawner.spawn(touch_task(
        pad,
        wake,
        TOUCH_EVENTS.sender(),
        woken_by_touch
    )));
    unwrap!(spawner.spawn(remote_task(beacon, TOUCH_EVENTS.receiver(), led)));
}
