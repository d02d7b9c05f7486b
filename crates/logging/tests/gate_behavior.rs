//! Integration tests for flag, level and mask gates.
//!
//! These tests verify the filtering rules of each gate, the flag gate's
//! countdown to termination, and the global level/mask emitters.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use logging::{CaptureSink, EXIT_STATUS, FlagGate, LevelGate, MaskGate, Stream};
use proptest::prelude::*;
use serial_test::serial;

#[derive(Debug)]
struct Exited(i32);

fn unwinding_exit(code: i32) -> ! {
    std::panic::panic_any(Exited(code))
}

fn with_capture(f: impl FnOnce(&CaptureSink)) -> CaptureSink {
    logging::no_color();
    let sink = CaptureSink::new();
    let previous = logging::set_sink(Arc::new(sink.clone()));
    let hook = logging::set_exit_hook(unwinding_exit);
    let result = catch_unwind(AssertUnwindSafe(|| f(&sink)));
    logging::set_sink(previous);
    logging::set_exit_hook(hook);
    if let Err(payload) = result {
        std::panic::resume_unwind(payload);
    }
    sink
}

// ============================================================================
// FlagGate
// ============================================================================

#[test]
#[serial]
fn countdown_of_two_allows_two_emissions_then_exits() {
    let mut exit = None;
    let sink = with_capture(|_| {
        let mut gate = FlagGate {
            enabled: true,
            max_out: 2,
        };
        gate.info("A");
        let caught = catch_unwind(AssertUnwindSafe(|| gate.info("B")));
        exit = caught
            .err()
            .and_then(|payload| payload.downcast_ref::<Exited>().map(|e| e.0));
        assert_eq!(gate.max_out, 0);
    });
    assert_eq!(exit, Some(EXIT_STATUS));
    assert_eq!(sink.text(Stream::Primary), "A\nB\n");
    let error = sink.text(Stream::Error);
    assert!(error.starts_with("--Countdown expired @ "), "{error}");
    assert!(error.contains("gate_behavior.rs"), "{error}");
}

#[test]
#[serial]
fn disabled_flag_gate_never_counts_down() {
    let sink = with_capture(|_| {
        let mut gate = FlagGate {
            enabled: false,
            max_out: 1,
        };
        gate.danger("hidden");
        gate.trc_from("hidden");
        assert_eq!(gate.max_out, 1);
    });
    assert!(sink.is_empty());
}

// ============================================================================
// LevelGate
// ============================================================================

#[test]
#[serial]
fn level_gate_boundaries() {
    let sink = with_capture(|_| {
        let gate = LevelGate { level: 3 };
        gate.info(2, "below");
        gate.info(3, "equal");
        gate.info(4, "above");
    });
    assert_eq!(sink.text(Stream::Primary), "below\nequal\n");
}

#[test]
#[serial]
fn raising_the_level_admits_more() {
    let sink = with_capture(|_| {
        let mut gate = LevelGate::new(1);
        gate.note(2, "first");
        gate.level = 2;
        gate.note(2, "second");
    });
    assert_eq!(sink.text(Stream::Primary), "second\n");
}

// ============================================================================
// MaskGate
// ============================================================================

#[test]
#[serial]
fn mask_gate_0xa() {
    let sink = with_capture(|_| {
        let gate = MaskGate { mask: 0xA };
        gate.info(0x2, "0x2");
        gate.info(0x5, "0x5");
        gate.info(0x8, "0x8");
    });
    assert_eq!(sink.text(Stream::Primary), "0x2\n0x8\n");
}

proptest! {
    #[test]
    fn mask_gate_admits_exactly_shared_bits(mask in any::<u32>(), bits in any::<u32>()) {
        prop_assert_eq!(MaskGate::new(mask).enabled_for(bits), mask & bits != 0);
    }

    #[test]
    fn level_gate_is_monotonic_in_level(level in -5i32..50, required in -5i32..50) {
        let admitted = LevelGate::new(level).enabled_for(required);
        if admitted {
            prop_assert!(LevelGate::new(level + 1).enabled_for(required));
        }
    }
}

// ============================================================================
// Global level and mask
// ============================================================================

#[test]
#[serial]
fn global_gates_follow_init() {
    let sink = with_capture(|_| {
        logging::init(logging::DiagConfig {
            color: logging::ColorChoice::Never,
            level: 1,
            mask: 0x4,
        });
        logging::lvl_msg(1, "level one");
        logging::lvl_msg(2, "level two");
        logging::mask_msg(0x4, "mask four");
        logging::mask_msg(0x1, "mask one");
        logging::init(logging::DiagConfig {
            color: logging::ColorChoice::Never,
            ..Default::default()
        });
    });
    assert_eq!(sink.text(Stream::Primary), "level one\nmask four\n");
}
