//! Braid an Ising qubit, then measure it.
//!
//! Builds the two-dimensional code space of four sigma anyons, applies a few
//! braid generators, compiles the same effect from qubit gates, and prints
//! the final measurement statistics.

use topoq::{
    all_trees, braid_superposition, compile_gate_sequence, measure_fusion, verify_theory,
    AnyonType, FusionTreeState, Particle, QubitGate, Superposition,
};

fn main() {
    let theory = AnyonType::Ising;

    let report = verify_theory(theory).expect("Ising symbol tables are consistent");
    println!("consistency: {report}");

    // uniform superposition over the 4-sigma vacuum code space
    let states: Vec<FusionTreeState> =
        all_trees(&[Particle::Sigma; 4], Particle::Vacuum, theory)
            .expect("enumeration succeeds")
            .into_iter()
            .map(|t| FusionTreeState::new(t, theory))
            .collect();
    let mut sp = Superposition::uniform(states, theory).expect("one theory");
    println!("code space dimension: {}", sp.len());

    for index in [0usize, 1, 0] {
        sp = braid_superposition(index, &sp).expect("braiding is unitary");
        println!(
            "after sigma_{}: {} terms, norm^2 = {:.9}",
            index + 1,
            sp.len(),
            sp.norm_squared()
        );
    }

    let outcomes = measure_fusion(0, &sp).expect("measurement");
    for o in &outcomes {
        println!("channel {}: probability {:.6}", o.channel, o.probability);
    }

    // the same physics from the gate level
    let gates = [QubitGate::H(0), QubitGate::S(0)];
    let compiled = compile_gate_sequence(&gates, 1e-3, theory).expect("compilation");
    println!(
        "compiled {} gates into {} braid generators (budget {:.2e})",
        compiled.gates.len(),
        compiled.braid.len(),
        compiled.budget.total()
    );
}
