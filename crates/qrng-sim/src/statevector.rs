//! Statevector simulation engine.

use std::f64::consts::FRAC_1_SQRT_2;

use num_complex::Complex64;
use rand::Rng;

use crate::circuit::Gate;

/// 2x2 unitary, row-major.
type Matrix2 = [[Complex64; 2]; 2];

const ZERO: Complex64 = Complex64::new(0.0, 0.0);
const ONE: Complex64 = Complex64::new(1.0, 0.0);
const I: Complex64 = Complex64::new(0.0, 1.0);

/// A statevector over `n` qubits, qubit 0 being the least significant index bit.
#[derive(Debug, Clone)]
pub struct Statevector {
    amplitudes: Vec<Complex64>,
    num_qubits: usize,
}

impl Statevector {
    /// Create a statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let mut amplitudes = vec![ZERO; 1 << num_qubits];
        amplitudes[0] = ONE;
        Self {
            amplitudes,
            num_qubits,
        }
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Probability of each basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(Complex64::norm_sqr).collect()
    }

    /// Apply a gate to one qubit.
    pub fn apply(&mut self, gate: Gate, qubit: usize) {
        let matrix = gate_matrix(gate);
        self.apply_matrix(&matrix, qubit);
    }

    fn apply_matrix(&mut self, m: &Matrix2, qubit: usize) {
        let mask = 1 << qubit;
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = m[0][0] * a + m[0][1] * b;
                self.amplitudes[j] = m[1][0] * a + m[1][1] * b;
            }
        }
    }

    /// Sample a basis-state index from the measurement distribution.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> usize {
        let r: f64 = rng.r#gen();
        let mut cumulative = 0.0;
        for (i, amp) in self.amplitudes.iter().enumerate() {
            cumulative += amp.norm_sqr();
            if r < cumulative {
                return i;
            }
        }
        // Rounding can leave the cumulative sum a hair below 1.0.
        self.amplitudes.len() - 1
    }
}

fn gate_matrix(gate: Gate) -> Matrix2 {
    match gate {
        Gate::H => {
            let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
            [[h, h], [h, -h]]
        }
        Gate::X => [[ZERO, ONE], [ONE, ZERO]],
        Gate::Y => [[ZERO, -I], [I, ZERO]],
        Gate::Z => [[ONE, ZERO], [ZERO, -ONE]],
        Gate::S => [[ONE, ZERO], [ZERO, I]],
        Gate::T => [
            [ONE, ZERO],
            [ZERO, Complex64::from_polar(1.0, std::f64::consts::FRAC_PI_4)],
        ],
        Gate::Rx(theta) => {
            let c = Complex64::new((theta / 2.0).cos(), 0.0);
            let s = Complex64::new(0.0, -(theta / 2.0).sin());
            [[c, s], [s, c]]
        }
        Gate::Ry(theta) => {
            let c = Complex64::new((theta / 2.0).cos(), 0.0);
            let s = Complex64::new((theta / 2.0).sin(), 0.0);
            [[c, -s], [s, c]]
        }
        Gate::Rz(theta) => [
            [Complex64::from_polar(1.0, -theta / 2.0), ZERO],
            [ZERO, Complex64::from_polar(1.0, theta / 2.0)],
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::f64::consts::PI;

    fn approx_eq(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_initial_state() {
        let sv = Statevector::new(2);
        assert!(approx_eq(sv.amplitudes[0], ONE));
        assert!(sv.amplitudes[1..].iter().all(|a| approx_eq(*a, ZERO)));
    }

    #[test]
    fn test_hadamard() {
        let mut sv = Statevector::new(1);
        sv.apply(Gate::H, 0);

        let h = Complex64::new(FRAC_1_SQRT_2, 0.0);
        assert!(approx_eq(sv.amplitudes[0], h));
        assert!(approx_eq(sv.amplitudes[1], h));
    }

    #[test]
    fn test_hadamard_is_self_inverse() {
        let mut sv = Statevector::new(1);
        sv.apply(Gate::H, 0);
        sv.apply(Gate::H, 0);
        assert!(approx_eq(sv.amplitudes[0], ONE));
        assert!(approx_eq(sv.amplitudes[1], ZERO));
    }

    #[test]
    fn test_x_on_second_qubit() {
        let mut sv = Statevector::new(2);
        sv.apply(Gate::X, 1);
        assert!(approx_eq(sv.amplitudes[2], ONE));
    }

    #[test]
    fn test_ry_pi_flips() {
        let mut sv = Statevector::new(1);
        sv.apply(Gate::Ry(PI), 0);
        let probs = sv.probabilities();
        assert!(probs[0] < 1e-10);
        assert!((probs[1] - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_phase_gates_preserve_probabilities() {
        let mut sv = Statevector::new(1);
        sv.apply(Gate::H, 0);
        sv.apply(Gate::S, 0);
        sv.apply(Gate::T, 0);
        sv.apply(Gate::Rz(0.3), 0);
        let probs = sv.probabilities();
        assert!((probs[0] - 0.5).abs() < 1e-10);
        assert!((probs[1] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn test_sample_deterministic() {
        let mut sv = Statevector::new(1);
        sv.apply(Gate::X, 0);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(sv.sample(&mut rng), 1);
        }
    }
}
