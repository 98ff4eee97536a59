use super::*;

#[test]
fn pops_in_deadline_then_schedule_order() {
    let mut q = TimerQueue::new();
    let e = Epoch(1);
    q.schedule(Millis(200), TimerKind::Tick, e);
    q.schedule(Millis(100), TimerKind::SceneEnd, e);
    q.schedule(Millis(100), TimerKind::Tick, e);

    let a = q.pop_due(Millis(1000)).unwrap();
    let b = q.pop_due(Millis(1000)).unwrap();
    let c = q.pop_due(Millis(1000)).unwrap();
    assert_eq!((a.deadline, a.kind), (Millis(100), TimerKind::SceneEnd));
    assert_eq!((b.deadline, b.kind), (Millis(100), TimerKind::Tick));
    assert_eq!((c.deadline, c.kind), (Millis(200), TimerKind::Tick));
    assert_eq!(q.len(), 0);
}

#[test]
fn nothing_fires_before_its_deadline() {
    let mut q = TimerQueue::new();
    q.schedule(Millis(500), TimerKind::SceneEnd, Epoch(0));
    assert!(q.pop_due(Millis(499)).is_none());
    assert_eq!(q.next_deadline(), Some(Millis(500)));
    assert!(q.pop_due(Millis(500)).is_some());
}

#[test]
fn cancel_and_clear() {
    let mut q = TimerQueue::new();
    let id = q.schedule(Millis(10), TimerKind::Tick, Epoch(0));
    q.schedule(Millis(20), TimerKind::Tick, Epoch(0));
    assert!(q.cancel(id));
    assert!(!q.cancel(id));
    assert_eq!(q.len(), 1);
    assert_eq!(q.clear(), 1);
    assert!(q.pop_due(Millis(u64::MAX)).is_none());
}

#[test]
fn popped_timer_keeps_its_epoch() {
    let mut q = TimerQueue::new();
    q.schedule(Millis(1), TimerKind::SceneEnd, Epoch(7));
    let t = q.pop_due(Millis(1)).unwrap();
    assert_eq!(t.epoch, Epoch(7));
}
