// Tests for the frame-loop lifecycle against a recording scheduler mock:
// teardown must leave zero outstanding registrations and no late ticks.

use backdrop_core::{FrameLoop, FrameScheduler, TeardownEpoch};

#[derive(Default)]
struct MockScheduler {
    next_id: u64,
    requested: Vec<u64>,
    cancelled: Vec<u64>,
}

impl FrameScheduler for MockScheduler {
    fn request_frame(&mut self) -> u64 {
        self.next_id += 1;
        self.requested.push(self.next_id);
        self.next_id
    }

    fn cancel_frame(&mut self, id: u64) {
        self.cancelled.push(id);
    }
}

#[test]
fn start_registers_exactly_one_frame() {
    let mut sched = MockScheduler::default();
    let fl = FrameLoop::start(&mut sched);
    assert_eq!(sched.requested.len(), 1);
    assert!(fl.pending().is_some());
}

#[test]
fn each_fired_frame_registers_the_next() {
    let mut sched = MockScheduler::default();
    let mut fl = FrameLoop::start(&mut sched);
    for _ in 0..10 {
        assert!(fl.on_frame(&mut sched), "tick must run while active");
    }
    assert_eq!(sched.requested.len(), 11);
    assert!(sched.cancelled.is_empty());
}

#[test]
fn stop_cancels_the_in_flight_request() {
    let mut sched = MockScheduler::default();
    let mut fl = FrameLoop::start(&mut sched);
    fl.on_frame(&mut sched);
    fl.stop(&mut sched);
    // Every request either fired or was cancelled: net zero pending
    assert_eq!(sched.cancelled.len(), 1);
    assert_eq!(sched.cancelled[0], *sched.requested.last().unwrap());
    assert!(fl.pending().is_none());
    assert!(fl.is_stopped());
}

#[test]
fn immediate_unmount_after_mount_leaves_nothing_registered() {
    let mut sched = MockScheduler::default();
    let mut fl = FrameLoop::start(&mut sched);
    fl.stop(&mut sched);
    assert_eq!(sched.requested.len(), sched.cancelled.len());
    assert!(fl.pending().is_none());
}

#[test]
fn no_tick_runs_after_stop_even_if_a_frame_is_delivered() {
    let mut sched = MockScheduler::default();
    let mut fl = FrameLoop::start(&mut sched);
    fl.stop(&mut sched);
    // A stray frame delivered by the host after cancellation
    assert!(!fl.on_frame(&mut sched), "stopped loop must not tick");
    assert!(
        sched.requested.len() == 1 && sched.cancelled.len() == 1,
        "stray frame must not re-register"
    );
}

#[test]
fn stop_is_idempotent() {
    let mut sched = MockScheduler::default();
    let mut fl = FrameLoop::start(&mut sched);
    fl.stop(&mut sched);
    fl.stop(&mut sched);
    assert_eq!(sched.cancelled.len(), 1, "double stop cancels once");
}

#[test]
fn teardown_during_an_in_flight_mount_invalidates_its_token() {
    let epoch = TeardownEpoch::new();
    let token = epoch.begin();
    assert!(epoch.is_current(token));
    // Teardown arrives while the mount is still awaiting its assets
    epoch.invalidate();
    assert!(
        !epoch.is_current(token),
        "a stale mount must not install anything"
    );
    // A mount started after the teardown gets a valid token again
    let next = epoch.begin();
    assert!(epoch.is_current(next));
}

#[test]
fn teardown_invalidates_every_earlier_token() {
    let epoch = TeardownEpoch::new();
    let first = epoch.begin();
    epoch.invalidate();
    let second = epoch.begin();
    epoch.invalidate();
    assert!(!epoch.is_current(first));
    assert!(!epoch.is_current(second));
}
