//! Statevector simulation engine.

use std::collections::BTreeMap;

use num_complex::Complex64;

use nonet_ir::{GateKind, Instruction, InstructionKind};

/// Outcomes with probability below this are treated as unreachable.
pub(crate) const PROBABILITY_CUTOFF: f64 = 1e-12;

/// A statevector representing a quantum state.
pub struct Statevector {
    /// The state amplitudes (2^n complex numbers), qubit `k` is bit `k` of the index.
    amplitudes: Vec<Complex64>,
}

impl Statevector {
    /// Create a new statevector initialized to |0...0⟩.
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits;
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); size];
        amplitudes[0] = Complex64::new(1.0, 0.0);
        Self { amplitudes }
    }

    /// Get the number of qubits.
    #[cfg(test)]
    pub fn num_qubits(&self) -> usize {
        self.amplitudes.len().trailing_zeros() as usize
    }

    /// Apply a gate instruction. Measurements are left to [`Self::clbit_distribution`].
    pub fn apply(&mut self, instruction: &Instruction) {
        match instruction.kind {
            InstructionKind::Gate(GateKind::H) => self.apply_h(instruction.qubits[0].0 as usize),
            InstructionKind::Gate(GateKind::CX) => self.apply_cx(
                instruction.qubits[0].0 as usize,
                instruction.qubits[1].0 as usize,
            ),
            InstructionKind::Measure => {}
        }
    }

    fn apply_h(&mut self, qubit: usize) {
        let mask = 1 << qubit;
        let sqrt2_inv = 1.0 / 2.0_f64.sqrt();
        for i in 0..self.amplitudes.len() {
            if i & mask == 0 {
                let j = i | mask;
                let a = self.amplitudes[i];
                let b = self.amplitudes[j];
                self.amplitudes[i] = sqrt2_inv * (a + b);
                self.amplitudes[j] = sqrt2_inv * (a - b);
            }
        }
    }

    fn apply_cx(&mut self, control: usize, target: usize) {
        let ctrl_mask = 1 << control;
        let tgt_mask = 1 << target;
        for i in 0..self.amplitudes.len() {
            if (i & ctrl_mask != 0) && (i & tgt_mask == 0) {
                let j = i | tgt_mask;
                self.amplitudes.swap(i, j);
            }
        }
    }

    /// Probability of each computational basis state.
    #[cfg(test)]
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Exact distribution over classical-bit strings.
    ///
    /// `readout` lists `(qubit, clbit)` measurement pairs. Character `i` of
    /// each key is classical bit `i`; bits no measurement writes read `0`.
    /// Outcomes below [`PROBABILITY_CUTOFF`] are dropped.
    pub fn clbit_distribution(
        &self,
        readout: &[(usize, usize)],
        num_clbits: usize,
    ) -> BTreeMap<String, f64> {
        let mut dist: BTreeMap<String, f64> = BTreeMap::new();
        for (index, amp) in self.amplitudes.iter().enumerate() {
            let p = amp.norm_sqr();
            if p < PROBABILITY_CUTOFF {
                continue;
            }
            let mut bits = vec![b'0'; num_clbits];
            for &(qubit, clbit) in readout {
                if (index >> qubit) & 1 == 1 {
                    bits[clbit] = b'1';
                }
            }
            let key: String = bits.into_iter().map(char::from).collect();
            *dist.entry(key).or_insert(0.0) += p;
        }
        dist.retain(|_, p| *p >= PROBABILITY_CUTOFF);
        dist
    }
}
