//! Integration tests for one dispatcher pass over the pending set.

use crate::mock_hw::{HwCall, MockNode, RecordingSink, fresh_pending};

use vibration_node::app::dispatcher::dispatch;
use vibration_node::app::events::AppEvent;
use vibration_node::app::ports::{ButtonPresses, LED_MAGENTA, LED_OFF};
use vibration_node::app::state::EventAccumulator;
use vibration_node::events::InterruptSource;

#[test]
fn all_pending_sources_handled_in_one_pass() {
    let pending = fresh_pending();
    let mut acc = EventAccumulator::new();
    let mut hw = MockNode::new();
    hw.presses.push_back(ButtonPresses::One);
    hw.motion.push_back(true);
    let mut sink = RecordingSink::new();

    for source in InterruptSource::ALL {
        pending.raise(source);
    }
    let outcome = dispatch(pending, &mut acc, &mut hw, &mut sink);

    assert!(outcome.transmit_requested);
    assert!(!outcome.reset_requested);
    assert!(outcome.idle);
    assert!(pending.is_empty());

    let state = acc.snapshot();
    assert!(state.button_pressed);
    assert!(state.vibration);
    assert_eq!(state.event_counter, 1);
    assert_eq!(
        sink.events,
        vec![
            AppEvent::ButtonPressed(ButtonPresses::One),
            AppEvent::MotionDetected { count: 1 },
        ]
    );
}

#[test]
fn noise_on_motion_line_is_cleared_but_not_counted() {
    let pending = fresh_pending();
    let mut acc = EventAccumulator::new();
    let mut hw = MockNode::new();
    hw.motion.push_back(false);
    let mut sink = RecordingSink::new();

    pending.raise(InterruptSource::Motion);
    let outcome = dispatch(pending, &mut acc, &mut hw, &mut sink);

    assert!(outcome.idle);
    assert!(!outcome.transmit_requested);
    assert_eq!(acc.snapshot().event_counter, 0);
    assert!(!acc.snapshot().vibration);
    assert_eq!(hw.count(&HwCall::ClearAndCheck), 1);
}

#[test]
fn bounce_clears_button_without_flag() {
    let pending = fresh_pending();
    let mut acc = EventAccumulator::new();
    let mut hw = MockNode::new();
    let mut sink = RecordingSink::new();

    pending.raise(InterruptSource::Button);
    dispatch(pending, &mut acc, &mut hw, &mut sink);

    assert!(pending.is_empty());
    assert!(!acc.snapshot().button_pressed);
}

#[test]
fn led_is_magenta_while_counting_presses() {
    let pending = fresh_pending();
    let mut acc = EventAccumulator::new();
    let mut hw = MockNode::new();
    hw.presses.push_back(ButtonPresses::Two);
    let mut sink = RecordingSink::new();

    pending.raise(InterruptSource::Button);
    dispatch(pending, &mut acc, &mut hw, &mut sink);

    assert_eq!(
        hw.calls,
        vec![
            HwCall::Led(LED_MAGENTA),
            HwCall::ClassifyPresses,
            HwCall::Led(LED_OFF),
        ]
    );
}

#[test]
fn reset_leaves_motion_pending() {
    let pending = fresh_pending();
    let mut acc = EventAccumulator::new();
    let mut hw = MockNode::new();
    hw.presses.push_back(ButtonPresses::Four);
    hw.motion.push_back(true);
    let mut sink = RecordingSink::new();

    pending.raise(InterruptSource::Button);
    pending.raise(InterruptSource::Motion);
    let outcome = dispatch(pending, &mut acc, &mut hw, &mut sink);

    assert!(outcome.reset_requested);
    assert!(!outcome.idle);
    assert!(pending.is_pending(InterruptSource::Motion));
    assert!(!pending.is_pending(InterruptSource::Button));
    assert_eq!(hw.count(&HwCall::Reset), 1);
    assert_eq!(hw.count(&HwCall::ClearAndCheck), 0);
    assert!(!acc.snapshot().button_pressed);
}

#[test]
fn long_press_and_too_many_set_button_flag_only() {
    for presses in [ButtonPresses::LongPress, ButtonPresses::TooMany, ButtonPresses::Three] {
        let pending = fresh_pending();
        let mut acc = EventAccumulator::new();
        let mut hw = MockNode::new();
        hw.presses.push_back(presses);
        let mut sink = RecordingSink::new();

        pending.raise(InterruptSource::Button);
        let outcome = dispatch(pending, &mut acc, &mut hw, &mut sink);

        assert!(!outcome.reset_requested, "{presses:?}");
        assert!(acc.snapshot().button_pressed, "{presses:?}");
        assert_eq!(hw.count(&HwCall::Reset), 0);
    }
}

#[test]
fn motion_latched_during_read_is_handled_next_pass() {
    let pending = fresh_pending();
    let mut acc = EventAccumulator::new();
    let mut hw = MockNode::new();
    hw.motion.extend([true, true]);
    hw.motion_edge_during_read = Some(pending);
    let mut sink = RecordingSink::new();

    pending.raise(InterruptSource::Motion);
    let first = dispatch(pending, &mut acc, &mut hw, &mut sink);

    assert!(!first.idle, "edge raised during the read must stay pending");
    assert!(pending.is_pending(InterruptSource::Motion));

    let second = dispatch(pending, &mut acc, &mut hw, &mut sink);
    assert!(second.idle);
    assert_eq!(hw.count(&HwCall::ClearAndCheck), 2);
    assert_eq!(acc.snapshot().event_counter, 2);
}
