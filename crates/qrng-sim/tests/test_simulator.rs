//! End-to-end tests for circuit execution.

use std::f64::consts::PI;

use proptest::prelude::*;
use qrng_sim::{Circuit, ClbitId, QubitId, SimulatorBackend};

// ---------------------------------------------------------------------------
// Deterministic circuits
// ---------------------------------------------------------------------------

#[test]
fn x_then_measure_always_one() {
    let mut circuit = Circuit::with_size("flip", 1, 1);
    circuit.x(QubitId(0)).unwrap().measure(QubitId(0), ClbitId(0)).unwrap();

    let result = SimulatorBackend::new().run(&circuit, 500).unwrap();
    assert_eq!(result.count("1"), 500);
}

#[test]
fn measure_without_gates_always_zero() {
    let mut circuit = Circuit::with_size("idle", 1, 1);
    circuit.measure(QubitId(0), ClbitId(0)).unwrap();

    let result = SimulatorBackend::new().run(&circuit, 500).unwrap();
    assert_eq!(result.count("0"), 500);
}

#[test]
fn ry_pi_matches_x() {
    let mut circuit = Circuit::with_size("ry", 1, 1);
    circuit
        .ry(PI, QubitId(0))
        .unwrap()
        .measure(QubitId(0), ClbitId(0))
        .unwrap();

    let result = SimulatorBackend::new().run(&circuit, 200).unwrap();
    assert_eq!(result.count("1"), 200);
}

#[test]
fn two_qubit_register_ordering() {
    // qubit 1 flipped, measured into clbit 0; qubit 0 idle into clbit 1.
    let mut circuit = Circuit::with_size("order", 2, 2);
    circuit.x(QubitId(1)).unwrap();
    circuit.measure(QubitId(1), ClbitId(0)).unwrap();
    circuit.measure(QubitId(0), ClbitId(1)).unwrap();

    let result = SimulatorBackend::new().run(&circuit, 20).unwrap();
    assert_eq!(result.count("10"), 20);
}

// ---------------------------------------------------------------------------
// Superposition
// ---------------------------------------------------------------------------

#[test]
fn coin_flip_produces_both_outcomes() {
    let circuit = Circuit::coin_flip().unwrap();
    let result = SimulatorBackend::new().with_seed(1).run(&circuit, 2000).unwrap();

    let ones = result.count("1");
    let zeros = result.count("0");
    assert_eq!(ones + zeros, 2000);
    // 2000 fair flips land well inside 800..1200.
    assert!((800..1200).contains(&ones), "ones = {ones}");
}

#[test]
fn memory_is_in_shot_order_for_seed() {
    let circuit = Circuit::coin_flip().unwrap();
    let backend = SimulatorBackend::new().with_seed(99);
    let long = backend.run(&circuit, 40).unwrap();
    let short = backend.run(&circuit, 10).unwrap();
    assert_eq!(&long.memory[..10], &short.memory[..]);
}

proptest! {
    #[test]
    fn memory_length_equals_shots(shots in 0u32..3000) {
        let circuit = Circuit::coin_flip().unwrap();
        let result = SimulatorBackend::new().run(&circuit, shots).unwrap();
        prop_assert_eq!(result.memory.len(), shots as usize);
        prop_assert!(result.memory.iter().all(|m| m == "0" || m == "1"));
    }
}
