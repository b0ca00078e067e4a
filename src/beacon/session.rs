//! Advertisement scheduler.
//!
//! Serializes the variable cache onto the radio one payload at a time.
//! The session is a pure state machine: callers feed it the set API
//! and radio confirmation events, and it answers with the next radio
//! command to issue. All hardware access lives in the embedded glue,
//! which must hold the single shared lock across each call here so
//! that at most one transmit decision is ever in flight.
//!
//! ```text
//!           set (dirtied)                 data configured
//!   Idle ──────────────────► Starting ─────────────────────┐
//!    ▲                          │                          │
//!    │        start failed      │ start confirmed          │
//!    ◄──────────────────────────┘                          ▼
//!    ▲                                               Advertising
//!    │   stop confirmed,                                   │
//!    │   nothing dirty                window expired       │
//!    └───────────────── Stopping ◄─────────────────────────┘
//!                           │
//!                           │ stop confirmed, next dirty record
//!                           └────────► Starting (new payload)
//! ```

use crate::beacon::cache::MessageCache;
use crate::beacon::payload::{AdvFrame, VendorIdentity};
use crate::error::Error;

/// Scheduler states. `Starting` and `Stopping` cover the window
/// between issuing a radio request and receiving its confirmation;
/// no new transmit decision may be made while in either.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdvState {
    /// No transmission, no window timer.
    Idle,
    /// Payload handed to the radio, start not yet confirmed.
    Starting,
    /// Radio confirmed the start; window timer running.
    Advertising,
    /// Stop requested on window expiry, not yet confirmed.
    Stopping,
}

/// Requests the session asks the radio glue to carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdvCommand {
    /// Load this payload into the radio's advertisement data.
    Configure(AdvFrame),
    /// Begin broadcasting the configured payload.
    Start,
    /// (Re)arm the retransmission window timer.
    ArmWindow,
    /// Stop broadcasting.
    Stop,
}

/// The broadcast session: variable cache plus advertising state.
///
/// `N` is the cache capacity (5 on the device; tests shrink it).
#[derive(Debug)]
pub struct BeaconSession<const N: usize> {
    cache: MessageCache<N>,
    identity: VendorIdentity,
    state: AdvState,
}

impl<const N: usize> BeaconSession<N> {
    /// Create a session. Fails synchronously on an unprovisioned
    /// identity so no invalid payload ever reaches the radio.
    pub fn new(identity: VendorIdentity) -> Result<Self, Error> {
        identity.validate()?;
        Ok(Self {
            cache: MessageCache::new(),
            identity,
            state: AdvState::Idle,
        })
    }

    /// The public set API: record `name = value` for broadcast.
    ///
    /// Fire-and-forget. If this dirties the cache while the session is
    /// idle, the returned command opens a transmit cycle; in every
    /// other case delivery rides on the cycle already in flight.
    pub fn set_int_var(&mut self, name: &str, value: i32) -> Option<AdvCommand> {
        let dirtied = self.cache.set(name, value);

        if dirtied && self.state == AdvState::Idle {
            self.select_next()
        } else {
            None
        }
    }

    /// Pull the next dirty record and stage its payload.
    fn select_next(&mut self) -> Option<AdvCommand> {
        match self.cache.next_dirty() {
            Some(upd) => {
                let frame = AdvFrame::compose(&self.identity, upd.name.as_str(), upd.value);
                self.state = AdvState::Starting;
                Some(AdvCommand::Configure(frame))
            }
            None => {
                self.state = AdvState::Idle;
                None
            }
        }
    }

    /// The radio accepted the advertisement data.
    pub fn on_data_configured(&mut self) -> Option<AdvCommand> {
        if self.state == AdvState::Starting {
            Some(AdvCommand::Start)
        } else {
            None
        }
    }

    /// The radio confirmed (or refused) the start request.
    ///
    /// On failure the session returns to idle and the selected record
    /// is gone - it was already marked clean when selected, and is not
    /// re-dirtied. A later `set` with a fresh value is the only retry.
    pub fn on_start_complete(&mut self, success: bool) -> Option<AdvCommand> {
        if self.state != AdvState::Starting {
            return None;
        }
        if success {
            self.state = AdvState::Advertising;
            Some(AdvCommand::ArmWindow)
        } else {
            self.state = AdvState::Idle;
            None
        }
    }

    /// The retransmission window elapsed.
    pub fn on_window_expired(&mut self) -> Option<AdvCommand> {
        if self.state == AdvState::Advertising {
            self.state = AdvState::Stopping;
            Some(AdvCommand::Stop)
        } else {
            None
        }
    }

    /// The radio confirmed the stop request. A failed stop is still
    /// forward progress: the next dirty record is selected either way.
    pub fn on_stop_complete(&mut self, _success: bool) -> Option<AdvCommand> {
        if self.state != AdvState::Stopping {
            return None;
        }
        self.select_next()
    }

    /// The radio died mid-window (asynchronous failure). The in-flight
    /// record is dropped and the session goes quiet until the next set.
    pub fn on_adv_error(&mut self) -> Option<AdvCommand> {
        self.state = AdvState::Idle;
        None
    }

    pub fn state(&self) -> AdvState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == AdvState::Idle
    }

    /// Read-only view of the cache for diagnostics.
    pub fn cache(&self) -> &MessageCache<N> {
        &self.cache
    }
}
