//! Integration tests for the boot → dispatch → encode → send → clear loop.
//!
//! Drives `TransmissionCoordinator::step` against the recording mock
//! board, raising interrupt bits the way the ISRs would.

use crate::mock_hw::{HwCall, MockNode, RecordingSink, fresh_pending};

use vibration_node::app::coordinator::TransmissionCoordinator;
use vibration_node::app::events::AppEvent;
use vibration_node::app::ports::{ButtonPresses, LED_BLUE, LED_OFF};
use vibration_node::config::{AccelRange, NodeConfig};
use vibration_node::error::{Error, HardwareInitError, TransportError};
use vibration_node::events::{InterruptSource, PendingInterrupts};

type Node = TransmissionCoordinator<'static, MockNode, RecordingSink>;

fn make_node(hw: MockNode) -> (Node, &'static PendingInterrupts) {
    let pending = fresh_pending();
    let node = TransmissionCoordinator::new(NodeConfig::default(), pending, hw, RecordingSink::new());
    (node, pending)
}

fn booted(hw: MockNode) -> (Node, &'static PendingInterrupts) {
    let (mut node, pending) = make_node(hw);
    node.boot().unwrap();
    node.hardware_mut().calls.clear();
    (node, pending)
}

fn motion_pass(node: &mut Node, pending: &PendingInterrupts) {
    node.hardware_mut().motion.push_back(true);
    pending.raise(InterruptSource::Motion);
    node.step();
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_brings_up_peripherals_in_order() {
    let (mut node, pending) = make_node(MockNode::new());
    pending.raise(InterruptSource::Motion);

    node.boot().unwrap();

    assert_eq!(
        node.hardware().calls,
        vec![
            HwCall::ConfigureButton,
            HwCall::RadioInit,
            HwCall::MotionInit,
            HwCall::StartAlarm(60),
            HwCall::TransientMode {
                range: AccelRange::G2,
                threshold: 0x10,
                count: 2,
            },
        ]
    );
    assert!(pending.is_empty(), "boot should discard stale interrupts");
    assert_eq!(node.sink().events, vec![AppEvent::Booted { period_secs: 60 }]);
}

#[test]
fn boot_failure_is_reported_and_stops_bring_up() {
    let mut hw = MockNode::new();
    hw.radio_init = Err(HardwareInitError::Radio);
    let (mut node, _) = make_node(hw);

    assert_eq!(node.boot(), Err(Error::Init(HardwareInitError::Radio)));
    assert_eq!(node.sink().errors, vec![Error::Init(HardwareInitError::Radio)]);
    assert_eq!(node.hardware().count(&HwCall::MotionInit), 0);
    assert!(node.sink().events.is_empty());
}

#[test]
fn alarm_failure_is_reported() {
    let mut hw = MockNode::new();
    hw.alarm = Err(HardwareInitError::Timer(-1));
    let (mut node, _) = make_node(hw);

    assert!(node.boot().is_err());
    assert_eq!(node.sink().errors, vec![Error::Init(HardwareInitError::Timer(-1))]);
}

// ── Encode and send ───────────────────────────────────────────

#[test]
fn reference_payload_after_five_motions() {
    let (mut node, pending) = booted(MockNode::new());
    for _ in 0..5 {
        motion_pass(&mut node, pending);
    }

    pending.raise(InterruptSource::Timer);
    let report = node.step();

    let payload = report.transmitted.unwrap().unwrap();
    assert_eq!(payload.into_bytes(), [0xC6, 0x41, 0x00, 0x05]);
    assert_eq!(node.hardware().sends(), vec![&[0xC6u8, 0x41, 0x00, 0x05][..]]);
}

#[test]
fn two_motions_then_successful_send_resets_counter() {
    let (mut node, pending) = booted(MockNode::new());
    motion_pass(&mut node, pending);
    motion_pass(&mut node, pending);
    assert_eq!(node.state().event_counter, 2);

    pending.raise(InterruptSource::Timer);
    let report = node.step();

    let payload = report.transmitted.unwrap().unwrap();
    assert_eq!(payload.event_counter(), 2);
    assert_eq!(node.state().event_counter, 0);
    assert!(!node.state().vibration);
    assert!(matches!(
        node.sink().events.last(),
        Some(AppEvent::Transmitted { .. })
    ));
}

#[test]
fn failed_send_keeps_count_and_reports() {
    let mut hw = MockNode::new();
    hw.send_results.push_back(Err(TransportError::Timeout));
    let (mut node, pending) = booted(hw);
    motion_pass(&mut node, pending);
    motion_pass(&mut node, pending);

    pending.raise(InterruptSource::Timer);
    let report = node.step();

    assert_eq!(report.transmitted, Some(Err(TransportError::Timeout)));
    assert_eq!(node.sink().errors, vec![Error::Transport(TransportError::Timeout)]);
    assert!(node.sink().events.contains(&AppEvent::TransmitFailed {
        error: TransportError::Timeout,
        retained_count: 2,
    }));

    let state = node.state();
    assert_eq!(state.event_counter, 2);
    assert!(!state.vibration);
    assert!(!state.button_pressed);

    // The next successful send carries the cumulative count.
    motion_pass(&mut node, pending);
    pending.raise(InterruptSource::Timer);
    let payload = node.step().transmitted.unwrap().unwrap();
    assert_eq!(payload.event_counter(), 3);
    assert_eq!(node.state().event_counter, 0);
}

#[test]
fn quiet_period_still_sends_zero_count() {
    let (mut node, pending) = booted(MockNode::new());
    pending.raise(InterruptSource::Timer);

    let payload = node.step().transmitted.unwrap().unwrap();
    assert_eq!(payload.into_bytes(), [0xC6, 0x01, 0x00, 0x00]);
}

#[test]
fn ack_setting_reaches_the_radio() {
    let pending = fresh_pending();
    let config = NodeConfig {
        ack_required: true,
        ..NodeConfig::default()
    };
    let mut node = TransmissionCoordinator::new(config, pending, MockNode::new(), RecordingSink::new());
    node.boot().unwrap();

    pending.raise(InterruptSource::Timer);
    node.step();

    assert!(node
        .hardware()
        .calls
        .iter()
        .any(|c| matches!(c, HwCall::Send { ack: true, .. })));
}

#[test]
fn led_is_blue_only_while_sending() {
    let (mut node, pending) = booted(MockNode::new());
    pending.raise(InterruptSource::Timer);
    node.step();

    let calls = &node.hardware().calls;
    let send_at = calls
        .iter()
        .position(|c| matches!(c, HwCall::Send { .. }))
        .unwrap();
    assert_eq!(calls[send_at - 1], HwCall::Led(LED_BLUE));
    assert_eq!(calls[send_at + 1], HwCall::Led(LED_OFF));
}

#[test]
fn single_press_sets_button_bit_for_one_send() {
    let mut hw = MockNode::new();
    hw.presses.push_back(ButtonPresses::One);
    let (mut node, pending) = booted(hw);

    pending.raise(InterruptSource::Button);
    pending.raise(InterruptSource::Timer);
    let payload = node.step().transmitted.unwrap().unwrap();
    assert!(payload.button());
    assert_eq!(payload.as_bytes()[1], 0x21);
    assert!(!node.state().button_pressed);

    // Bounce: no press classified, so the bit stays clear.
    node.hardware_mut().presses.push_back(ButtonPresses::None);
    pending.raise(InterruptSource::Button);
    pending.raise(InterruptSource::Timer);
    let payload = node.step().transmitted.unwrap().unwrap();
    assert!(!payload.button());
    assert_eq!(payload.as_bytes()[1], 0x01);
}

// ── Reset gesture ─────────────────────────────────────────────

#[test]
fn four_presses_reset_once_without_payload() {
    let mut hw = MockNode::new();
    hw.presses.push_back(ButtonPresses::Four);
    let (mut node, pending) = booted(hw);

    pending.raise(InterruptSource::Timer);
    pending.raise(InterruptSource::Button);
    let report = node.step();

    assert!(report.reset_requested);
    assert_eq!(report.transmitted, None);
    assert!(!report.suspended);
    assert_eq!(node.hardware().count(&HwCall::Reset), 1);
    assert!(node.hardware().sends().is_empty());
    assert!(node.sink().events.contains(&AppEvent::ResetRequested));
}

// ── Suspend ───────────────────────────────────────────────────

#[test]
fn suspends_when_nothing_is_pending() {
    let (mut node, _) = booted(MockNode::new());
    let report = node.step();

    assert!(report.suspended);
    assert_eq!(report.transmitted, None);
    assert_eq!(node.hardware().calls, vec![HwCall::Suspend]);
    assert_eq!(node.passes(), 1);
}

#[test]
fn interrupt_during_send_prevents_suspend() {
    let pending = fresh_pending();
    let mut hw = MockNode::new();
    hw.raise_during_send = Some((pending, InterruptSource::Motion));
    hw.motion.push_back(true);
    let mut node = TransmissionCoordinator::new(NodeConfig::default(), pending, hw, RecordingSink::new());
    node.boot().unwrap();

    pending.raise(InterruptSource::Timer);
    let report = node.step();
    assert!(!report.suspended);
    assert!(pending.is_pending(InterruptSource::Motion));

    // The motion that arrived mid-send is counted on the next pass.
    let report = node.step();
    assert!(report.suspended);
    assert_eq!(node.state().event_counter, 1);
}
