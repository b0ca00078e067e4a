//! Radio glue: drives the scheduler over the SoftDevice.
//!
//! The session state machine lives behind one blocking mutex; the set
//! API and the advertiser task each take the lock for the duration of
//! a logical transition, which keeps at most one transmit decision in
//! flight. Scheduler commands map onto the SoftDevice advertising API
//! as follows: creating the `advertise` future issues the start
//! request, dropping it issues the stop request, and an `Err`
//! completion is the asynchronous failure report. The retransmission
//! window is an `embassy_time` timer raced against the advertise
//! future.

use core::cell::RefCell;

use crate::beacon::payload::AdvFrame;
use crate::beacon::session::{AdvCommand, BeaconSession};
use crate::config::{FAST_ADV_INTERVAL, MAX_MESSAGES, RETRANSMIT_TIME_MS};
use defmt::{info, warn};
use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::signal::Signal;
use embassy_time::{Duration, Timer};
use nrf_softdevice::ble::peripheral;
use nrf_softdevice::Softdevice;

/// The single lock guarding cache and session state.
pub type SharedSession = Mutex<CriticalSectionRawMutex, RefCell<BeaconSession<MAX_MESSAGES>>>;

/// Wakes the advertiser task with the payload that opens a cycle.
pub type AdvKick = Signal<CriticalSectionRawMutex, AdvFrame>;

/// Handle for application tasks to publish variable updates.
#[derive(Clone, Copy)]
pub struct Beacon {
    session: &'static SharedSession,
    kick: &'static AdvKick,
}

impl Beacon {
    pub fn new(session: &'static SharedSession, kick: &'static AdvKick) -> Self {
        Self { session, kick }
    }

    /// Record `name = value` for broadcast. Fire-and-forget: delivery
    /// is best-effort and superseded values coalesce.
    pub fn set_int_var(&self, name: &str, value: i32) {
        let cmd = self
            .session
            .lock(|s| s.borrow_mut().set_int_var(name, value));

        info!("set {}={}", name, value);

        if let Some(AdvCommand::Configure(frame)) = cmd {
            // The session was idle: hand the payload to the radio task.
            self.kick.signal(frame);
        }
    }
}

/// What one transmit window ended with.
enum WindowEnd {
    /// The window timer expired normally.
    Expired,
    /// The radio refused or aborted the advertisement.
    Failed,
}

/// Broadcast `frame` until the retransmission window closes.
///
/// Dropping the advertise future on timeout is the stop request; the
/// SoftDevice halts the broadcast as part of the drop.
async fn run_window(sd: &Softdevice, frame: &AdvFrame) -> WindowEnd {
    let adv = peripheral::NonconnectableAdvertisement::NonscannableUndirected {
        adv_data: frame.as_bytes(),
    };
    let config = peripheral::Config {
        interval: FAST_ADV_INTERVAL,
        ..Default::default()
    };

    let window = Timer::after(Duration::from_millis(RETRANSMIT_TIME_MS));

    match select(peripheral::advertise(sd, adv, &config), window).await {
        Either::First(Err(e)) => {
            warn!("adv failed: {:?}", e);
            WindowEnd::Failed
        }
        // Nonconnectable advertising only returns on error; treat a
        // clean return like a closed window.
        Either::First(Ok(_)) | Either::Second(()) => WindowEnd::Expired,
    }
}

/// Radio task: owns the transmit loop.
///
/// Sleeps until a set call opens a cycle, then walks the scheduler
/// through configure → start → window → stop, reloading the next dirty
/// payload after each window until the cache drains.
#[embassy_executor::task]
pub async fn advertiser_task(
    sd: &'static Softdevice,
    session: &'static SharedSession,
    kick: &'static AdvKick,
) -> ! {
    loop {
        let mut frame = kick.wait().await;

        loop {
            // Advertisement data is copied into the start request
            // below; confirm it and ask permission to start.
            let start = session.lock(|s| s.borrow_mut().on_data_configured());
            if start != Some(AdvCommand::Start) {
                break;
            }

            let armed = session.lock(|s| s.borrow_mut().on_start_complete(true));
            if armed != Some(AdvCommand::ArmWindow) {
                break;
            }

            info!("adv start: {}={}", frame.var_name(), frame.value());

            match run_window(sd, &frame).await {
                WindowEnd::Expired => {
                    let stop = session.lock(|s| s.borrow_mut().on_window_expired());
                    if stop != Some(AdvCommand::Stop) {
                        break;
                    }
                    // The advertise future is already dropped: the
                    // stop has happened by the time we get here.
                    match session.lock(|s| s.borrow_mut().on_stop_complete(true)) {
                        Some(AdvCommand::Configure(next)) => {
                            frame = next;
                        }
                        _ => {
                            info!("adv idle: cache drained");
                            break;
                        }
                    }
                }
                WindowEnd::Failed => {
                    session.lock(|s| {
                        s.borrow_mut().on_adv_error();
                    });
                    warn!("adv aborted; dropping {}", frame.var_name());
                    break;
                }
            }
        }
    }
}
