//! End-to-end scenarios for the step driver

use gravity::components::MeshHandle;
use gravity::config::SimulationConfig;
use gravity::physics::forces::{ForceParameters, compute_pairwise_force};
use gravity::physics::math::{Scalar, Vector};
use gravity::physics::simulation::{Simulation, SpawnRequest};

fn request(mass: Scalar, position: Vector) -> SpawnRequest {
    SpawnRequest {
        mass,
        mesh: MeshHandle::default(),
        position,
        initial_force: Vector::ZERO,
        scale: 1.0,
    }
}

fn seeded_simulation() -> Simulation {
    let mut config = SimulationConfig::default();
    config.physics.initial_seed = Some(42);
    Simulation::new(&config)
}

#[test]
fn test_two_bodies_attract_with_mass_inverse_ratio() {
    let mut simulation = seeded_simulation();
    let heavy = simulation.spawn(request(1e7, Vector::ZERO)).unwrap();
    let light = simulation
        .spawn(request(1e5, Vector::new(100.0, 0.0, 0.0)))
        .unwrap();

    simulation.step().unwrap();

    let heavy_displacement = simulation.body(heavy).unwrap().location();
    let light_displacement = simulation.body(light).unwrap().location() - Vector::new(100.0, 0.0, 0.0);

    // Bodies move toward each other along x only
    assert!(heavy_displacement.x > 0.0);
    assert!(light_displacement.x < 0.0);
    assert_eq!(heavy_displacement.y, 0.0);
    assert_eq!(light_displacement.z, 0.0);

    let ratio = heavy_displacement.x.abs() / light_displacement.x.abs();
    let expected = 1e5 / 1e7;
    assert!(
        ((ratio - expected) / expected).abs() < 1e-4,
        "displacement ratio {ratio} differs from mass ratio {expected}"
    );
}

#[test]
fn test_net_force_is_sum_of_pairwise_forces() {
    let mut simulation = seeded_simulation();
    let middle = simulation.spawn(request(2e6, Vector::ZERO)).unwrap();
    let left = simulation
        .spawn(request(3e6, Vector::new(-40.0, 0.0, 0.0)))
        .unwrap();
    let right = simulation
        .spawn(request(5e6, Vector::new(70.0, 0.0, 0.0)))
        .unwrap();

    let params = ForceParameters::default();
    let expected = {
        let m = simulation.body(middle).unwrap();
        let l = simulation.body(left).unwrap();
        let r = simulation.body(right).unwrap();
        (compute_pairwise_force(m, l, &params) + compute_pairwise_force(m, r, &params)) / m.mass
    };

    // The first body in the order sees everyone at their starting positions
    simulation.step().unwrap();
    let actual = simulation.body(middle).unwrap().displacement();

    assert!(
        (actual - expected).length() <= expected.length() * 1e-12,
        "net {actual} != sum of pairwise {expected}"
    );
}

#[test]
fn test_motion_compounds_while_forces_persist() {
    let mut simulation = seeded_simulation();
    let a = simulation.spawn(request(1e7, Vector::ZERO)).unwrap();
    simulation
        .spawn(request(1e7, Vector::new(0.0, 0.0, 500.0)))
        .unwrap();

    let mut previous_step = 0.0;
    let mut previous_z = 0.0;
    for _ in 0..5 {
        simulation.step().unwrap();
        let z = simulation.body(a).unwrap().location().z;
        let step = z - previous_z;
        assert!(step > previous_step);
        previous_step = step;
        previous_z = z;
    }
}

#[test]
fn test_tracing_off_clears_recorded_paths() {
    let mut config = SimulationConfig::default();
    config.physics.initial_seed = Some(42);
    config.trails.capacity = 8;
    config.trails.enabled_at_start = true;

    let mut simulation = Simulation::new(&config);
    simulation.spawn(request(1e7, Vector::ZERO)).unwrap();
    simulation
        .spawn(request(1e5, Vector::new(100.0, 0.0, 0.0)))
        .unwrap();

    for _ in 0..20 {
        simulation.step().unwrap();
    }
    assert!(simulation.snapshots().all(|snapshot| snapshot.path.len() == 8));

    simulation.set_tracing(false);
    simulation.step().unwrap();
    assert!(simulation.snapshots().all(|snapshot| snapshot.path.is_empty()));
}

#[test]
fn test_coincident_bodies_stay_put() {
    let mut simulation = seeded_simulation();
    let a = simulation.spawn(request(1e7, Vector::ONE)).unwrap();
    let b = simulation.spawn(request(1e7, Vector::ONE)).unwrap();

    simulation.step().unwrap();

    assert_eq!(simulation.body(a).unwrap().location(), Vector::ONE);
    assert_eq!(simulation.body(b).unwrap().location(), Vector::ONE);
}
