//! Integration tests for braid algebra and phase accumulation

use topoq_braid::{apply_braid, verify_yang_baxter_all_channels, Braid, Generator};
use topoq_core::{AnyonType, Particle};

fn word(strands: usize, gens: &[(usize, bool)]) -> Braid {
    Braid::from_generators(
        strands,
        gens.iter()
            .map(|&(index, clockwise)| Generator { index, clockwise })
            .collect(),
    )
    .unwrap()
}

#[test]
fn inverse_of_inverse_round_trips_arbitrary_words() {
    let words = [
        word(3, &[(0, true)]),
        word(4, &[(0, true), (1, false), (2, true), (2, true)]),
        word(5, &[(3, false), (0, true), (1, true), (3, true), (2, false)]),
    ];
    for b in words {
        assert_eq!(b.inverse().inverse(), b);
        assert!(b.compose(&b.inverse()).unwrap().simplify().is_identity());
    }
}

#[test]
fn braid_then_inverse_gives_unit_phase_for_every_theory() {
    let cases: Vec<(AnyonType, Vec<Particle>, Particle)> = vec![
        (AnyonType::Ising, vec![Particle::Sigma; 4], Particle::Vacuum),
        (AnyonType::Ising, vec![Particle::Sigma; 4], Particle::Psi),
        (AnyonType::Fibonacci, vec![Particle::Tau; 4], Particle::Vacuum),
        (
            AnyonType::SU2Level(3),
            vec![Particle::spin_half(3); 4],
            Particle::spin(0, 3),
        ),
    ];
    let braid = word(4, &[(0, true), (1, true), (2, false), (1, true)]);
    for (theory, anyons, channel) in cases {
        let round = braid.compose(&braid.inverse()).unwrap();
        let result = apply_braid(&round, &anyons, channel, theory).unwrap();
        assert!(
            (result.phase - num_complex::Complex64::new(1.0, 0.0)).norm() < 1e-9,
            "{theory}: {}",
            result.phase
        );
        assert_eq!(result.anyons, anyons);
    }
}

#[test]
fn yang_baxter_relation_verified_across_theories() {
    let triples: Vec<(AnyonType, Vec<Particle>)> = vec![
        (AnyonType::Ising, vec![Particle::Sigma; 3]),
        (AnyonType::Ising, vec![Particle::Sigma, Particle::Psi, Particle::Sigma]),
        (AnyonType::Fibonacci, vec![Particle::Tau; 3]),
        (AnyonType::SU2Level(4), vec![Particle::spin_half(4); 3]),
    ];
    for (theory, anyons) in triples {
        let dev = verify_yang_baxter_all_channels(0, &anyons, theory).unwrap();
        assert!(dev < 1e-12, "{theory}: {dev:.3e}");
    }
}

#[test]
fn mismatched_strands_and_foreign_particles_fail_fast() {
    let braid = word(3, &[(0, true)]);
    assert!(apply_braid(&braid, &[Particle::Sigma; 2], Particle::Vacuum, AnyonType::Ising)
        .is_err());
    assert!(apply_braid(
        &braid,
        &[Particle::Tau, Particle::Tau, Particle::Tau],
        Particle::Vacuum,
        AnyonType::Ising
    )
    .is_err());
}
