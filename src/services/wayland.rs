// Author: Dustin Pilgrim
// License: MIT

use wayland_client::{
    protocol::{wl_registry, wl_seat::WlSeat},
    Connection, Dispatch, EventQueue, QueueHandle,
};
use wayland_protocols::ext::idle_notify::v1::client::{
    ext_idle_notification_v1::{Event as IdleEvent, ExtIdleNotificationV1},
    ext_idle_notifier_v1::ExtIdleNotifierV1,
};

use super::idle::{IdleError, IdleSampler};

/// Wayland has no "ms since last input" query, and idle events are only read
/// when a sample is taken, so timestamping them would lag by up to a poll
/// period. Instead one idle notification is registered per mark (in
/// seconds); the sample is the largest mark that is currently idled, or 0 if
/// none is. That is a lower bound on the real idle time, exact at each mark,
/// which is all threshold comparisons need.
pub struct WaylandSampler {
    queue: EventQueue<IdleTracker>,
    tracker: IdleTracker,
    // Kept alive so the compositor keeps sending idled/resumed.
    _notifications: Vec<ExtIdleNotificationV1>,
    _conn: Connection,
}

struct IdleTracker {
    notifier: Option<ExtIdleNotifierV1>,
    seat: Option<WlSeat>,

    marks_ms: Vec<u64>,
    idled: Vec<bool>,
}

impl IdleTracker {
    fn new(marks_ms: Vec<u64>) -> Self {
        Self {
            notifier: None,
            seat: None,
            idled: vec![false; marks_ms.len()],
            marks_ms,
        }
    }

    fn set_idled(&mut self, mark: usize, idled: bool) {
        match self.idled.get_mut(mark) {
            Some(slot) => *slot = idled,
            None => {
                eventline::warn!("wayland: idle event for unknown mark {}", mark);
            }
        }
    }

    fn idle_ms(&self) -> u64 {
        self.marks_ms
            .iter()
            .zip(&self.idled)
            .filter(|(_, idled)| **idled)
            .map(|(mark, _)| *mark)
            .max()
            .unwrap_or(0)
    }
}

/// Marks in milliseconds, ascending, without zeros or duplicates. The
/// protocol takes a u32 timeout.
fn marks_ms(marks_secs: &[u64]) -> Vec<u64> {
    let mut marks: Vec<u64> = marks_secs
        .iter()
        .filter(|s| **s > 0)
        .map(|s| s.saturating_mul(1000).min(u64::from(u32::MAX)))
        .collect();
    marks.sort_unstable();
    marks.dedup();
    marks
}

impl WaylandSampler {
    pub fn connect(marks_secs: &[u64]) -> Result<Self, IdleError> {
        let conn = Connection::connect_to_env().map_err(|e| IdleError::Connect(e.to_string()))?;
        let mut queue = conn.new_event_queue();
        let qh = queue.handle();

        let mut tracker = IdleTracker::new(marks_ms(marks_secs));

        let _registry = conn.display().get_registry(&qh, ());
        queue
            .roundtrip(&mut tracker)
            .map_err(|e| IdleError::Connect(e.to_string()))?;

        let (Some(notifier), Some(seat)) = (tracker.notifier.clone(), tracker.seat.clone()) else {
            return Err(IdleError::MissingExtension("ext_idle_notifier_v1"));
        };

        let notifications: Vec<ExtIdleNotificationV1> = tracker
            .marks_ms
            .iter()
            .enumerate()
            .map(|(idx, mark)| notifier.get_idle_notification(*mark as u32, &seat, &qh, idx))
            .collect();

        queue
            .roundtrip(&mut tracker)
            .map_err(|e| IdleError::Query(e.to_string()))?;

        eventline::debug!("wayland: idle notifications armed at {:?} ms", tracker.marks_ms);

        Ok(Self {
            queue,
            tracker,
            _notifications: notifications,
            _conn: conn,
        })
    }
}

impl IdleSampler for WaylandSampler {
    fn sample(&mut self) -> Result<u64, IdleError> {
        self.queue
            .roundtrip(&mut self.tracker)
            .map_err(|e| IdleError::Query(e.to_string()))?;
        Ok(self.tracker.idle_ms())
    }

    fn name(&self) -> &'static str {
        "wayland"
    }

    fn rounds_down(&self) -> bool {
        true
    }
}

// ---------------- Registry binding ----------------

impl Dispatch<wl_registry::WlRegistry, ()> for IdleTracker {
    fn event(
        state: &mut Self,
        registry: &wl_registry::WlRegistry,
        event: wl_registry::Event,
        _: &(),
        _: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        if let wl_registry::Event::Global { name, interface, .. } = event {
            match interface.as_str() {
                "ext_idle_notifier_v1" => {
                    state.notifier =
                        Some(registry.bind::<ExtIdleNotifierV1, _, _>(name, 1, qh, ()));
                }
                "wl_seat" if state.seat.is_none() => {
                    state.seat = Some(registry.bind::<WlSeat, _, _>(name, 1, qh, ()));
                }
                _ => {}
            }
        }
    }
}

impl Dispatch<ExtIdleNotifierV1, ()> for IdleTracker {
    fn event(
        _: &mut Self,
        _: &ExtIdleNotifierV1,
        _: <ExtIdleNotifierV1 as wayland_client::Proxy>::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}

impl Dispatch<WlSeat, ()> for IdleTracker {
    fn event(
        _: &mut Self,
        _: &WlSeat,
        _: wayland_client::protocol::wl_seat::Event,
        _: &(),
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
    }
}

// ---------------- Idle notifications ----------------

impl Dispatch<ExtIdleNotificationV1, usize> for IdleTracker {
    fn event(
        state: &mut Self,
        _: &ExtIdleNotificationV1,
        event: IdleEvent,
        idx: &usize,
        _: &Connection,
        _: &QueueHandle<Self>,
    ) {
        match event {
            IdleEvent::Idled => state.set_idled(*idx, true),
            IdleEvent::Resumed => state.set_idled(*idx, false),
            _ => {}
        }
    }
}
