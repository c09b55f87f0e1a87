use powermodrs::config::Acceleration;
use powermodrs::controller::{ControllerState, CC_MAX};
use powermodrs::device::{EventKind, RawEvent};
use proptest::prelude::*;

fn accel(n: u8) -> Acceleration {
    Acceleration::try_from(n).unwrap()
}

fn other_event() -> RawEvent {
    RawEvent {
        kind: EventKind::Other,
        code: 30,
        value: 1,
    }
}

#[test]
fn test_single_step_up_from_zero() {
    let mut state = ControllerState::new(accel(1));
    assert_eq!(state.process(&RawEvent::relative(1)), Some(1));
    assert_eq!(state.value(), 1);
}

#[test]
fn test_step_up_clamps_at_top() {
    let mut state = ControllerState::with_value(accel(4), 125);
    assert_eq!(state.process(&RawEvent::relative(1)), Some(127));
    assert_eq!(state.value(), 127);
}

#[test]
fn test_press_resets_to_zero() {
    let mut state = ControllerState::with_value(accel(1), 50);
    assert_eq!(state.process(&RawEvent::key(1)), Some(0));
    assert_eq!(state.value(), 0);
}

#[test]
fn test_step_down_at_floor_is_silent() {
    let mut state = ControllerState::new(accel(1));
    assert_eq!(state.process(&RawEvent::relative(-1)), None);
    assert_eq!(state.value(), 0);
}

#[test]
fn test_other_events_are_silent() {
    let mut state = ControllerState::with_value(accel(3), 64);
    assert_eq!(state.process(&other_event()), None);
    assert_eq!(state.value(), 64);
}

#[test]
fn test_press_at_zero_is_silent() {
    let mut state = ControllerState::new(accel(8));
    assert_eq!(state.process(&RawEvent::key(1)), None);
}

#[test]
fn test_step_down_uses_acceleration() {
    let mut state = ControllerState::with_value(accel(8), 20);
    assert_eq!(state.process(&RawEvent::relative(-1)), Some(12));
    assert_eq!(state.process(&RawEvent::relative(-1)), Some(4));
    assert_eq!(state.process(&RawEvent::relative(-1)), Some(0));
    assert_eq!(state.process(&RawEvent::relative(-1)), None);
}

#[test]
fn test_pinned_at_top_only_sends_once() {
    let mut state = ControllerState::with_value(accel(2), 124);
    let sent: Vec<u8> = (0..5)
        .filter_map(|_| state.process(&RawEvent::relative(1)))
        .collect();
    assert_eq!(sent, vec![126, 127]);
}

#[test]
fn test_up_then_down_sends_both() {
    let mut state = ControllerState::with_value(accel(1), 10);
    assert_eq!(state.process(&RawEvent::relative(1)), Some(11));
    assert_eq!(state.process(&RawEvent::relative(-1)), Some(10));
    assert_eq!(state.last_sent(), 10);
}

fn any_event() -> impl Strategy<Value = RawEvent> {
    prop_oneof![
        Just(RawEvent::relative(1)),
        Just(RawEvent::relative(-1)),
        (-4i32..=4).prop_map(RawEvent::relative),
        (0i32..=2).prop_map(RawEvent::key),
        (any::<u16>(), any::<i32>()).prop_map(|(code, value)| RawEvent {
            kind: EventKind::Other,
            code,
            value,
        }),
    ]
}

proptest! {
    #[test]
    fn prop_never_below_zero(start in 0u8..=127, a in 1u8..=8, n in 0usize..200) {
        let mut state = ControllerState::with_value(accel(a), start);
        for _ in 0..n {
            state.process(&RawEvent::relative(-1));
        }
        let expected = start.saturating_sub((n as u32 * a as u32).min(255) as u8);
        prop_assert_eq!(state.value(), expected);
    }

    #[test]
    fn prop_step_up_formula(start in 0u8..=127, a in 1u8..=8, n in 0u32..200) {
        let mut state = ControllerState::with_value(accel(a), start);
        for _ in 0..n {
            state.process(&RawEvent::relative(1));
        }
        let expected = (start as u32 + n * a as u32).min(CC_MAX as u32) as u8;
        prop_assert_eq!(state.value(), expected);
    }

    #[test]
    fn prop_press_always_zeroes(
        start in 0u8..=127,
        a in 1u8..=8,
        events in proptest::collection::vec(any_event(), 0..50),
    ) {
        let mut state = ControllerState::with_value(accel(a), start);
        for event in &events {
            state.process(event);
        }
        state.process(&RawEvent::key(1));
        prop_assert_eq!(state.value(), 0);
        prop_assert_eq!(state.last_sent(), 0);
    }

    #[test]
    fn prop_release_never_changes(start in 0u8..=127, a in 1u8..=8) {
        let mut state = ControllerState::with_value(accel(a), start);
        prop_assert_eq!(state.process(&RawEvent::key(0)), None);
        prop_assert_eq!(state.value(), start);
    }

    #[test]
    fn prop_sends_exactly_on_change(
        start in 0u8..=127,
        a in 1u8..=8,
        events in proptest::collection::vec(any_event(), 0..100),
    ) {
        let mut state = ControllerState::with_value(accel(a), start);
        let mut last = start;
        for event in &events {
            let sent = state.process(event);
            prop_assert!(state.value() <= CC_MAX);
            if state.value() != last {
                prop_assert_eq!(sent, Some(state.value()));
            } else {
                prop_assert_eq!(sent, None);
            }
            last = state.value();
            prop_assert_eq!(state.last_sent(), last);
        }
    }
}
