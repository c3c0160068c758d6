use approx::assert_relative_eq;
use particle_dynamics::*;

fn undamped(mass: f32, position: Vec3, velocity: Vec3) -> Particle {
    Particle::new(mass)
        .expect("positive mass")
        .with_position(position)
        .with_velocity(velocity)
        .with_damping(1.0)
        .expect("valid damping")
}

#[test]
fn free_particle_moves_linearly() {
    let p0 = Vec3::new(1.0, 2.0, 3.0);
    let v0 = Vec3::new(1.0, -2.0, 0.5);
    let dt = 0.25;
    let ticks = 8;

    let mut particle = undamped(3.0, p0, v0);
    for _ in 0..ticks {
        particle.integrate(dt).unwrap();
        assert_eq!(particle.velocity(), v0);
    }

    let expected = p0 + v0 * (ticks as f32 * dt);
    assert_relative_eq!(particle.position().x, expected.x, epsilon = 1e-5);
    assert_relative_eq!(particle.position().y, expected.y, epsilon = 1e-5);
    assert_relative_eq!(particle.position().z, expected.z, epsilon = 1e-5);
}

#[test]
fn damping_decays_exponentially() {
    let v0 = Vec3::new(3.0, 0.0, 4.0);
    let mut particle = Particle::new(1.0)
        .unwrap()
        .with_velocity(v0)
        .with_damping(0.5)
        .unwrap();

    particle.integrate(0.1).unwrap();
    assert_relative_eq!(
        particle.velocity().length(),
        v0.length() * 0.5_f32.powf(0.1),
        epsilon = 1e-5
    );
}

#[test]
fn damping_is_independent_of_step_size() {
    let v0 = Vec3::new(0.0, 10.0, 0.0);
    let make = || {
        Particle::new(1.0)
            .unwrap()
            .with_velocity(v0)
            .with_damping(0.8)
            .unwrap()
    };

    let mut coarse = make();
    coarse.integrate(0.2).unwrap();

    let mut fine = make();
    for _ in 0..4 {
        fine.integrate(0.05).unwrap();
    }

    assert_relative_eq!(
        coarse.velocity().length(),
        fine.velocity().length(),
        epsilon = 1e-4
    );
}

#[test]
fn accumulator_is_cleared_by_integration() {
    let mut particle = undamped(1.0, Vec3::ZERO, Vec3::ZERO);
    particle.add_force(Vec3::new(2.0, 0.0, 0.0));
    particle.add_force(Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(particle.force_accumulator(), Vec3::new(2.0, 1.0, 0.0));

    particle.integrate(1.0).unwrap();
    assert_eq!(particle.force_accumulator(), Vec3::ZERO);
    assert_eq!(particle.velocity(), Vec3::new(2.0, 1.0, 0.0));

    // Nothing carries over into the next tick.
    particle.integrate(1.0).unwrap();
    assert_eq!(particle.velocity(), Vec3::new(2.0, 1.0, 0.0));
}

#[test]
fn invalid_step_is_reported_not_fatal() {
    let mut particle = undamped(1.0, Vec3::ZERO, Vec3::X);
    particle.add_force(Vec3::Y);

    let err = particle.integrate(-1.0).unwrap_err();
    assert_eq!(err, ParticleError::InvalidTimeStep(-1.0));
    // State, including pending force, is untouched.
    assert_eq!(particle.position(), Vec3::ZERO);
    assert_eq!(particle.force_accumulator(), Vec3::Y);
}

#[test]
fn constant_acceleration_applies_without_forces() {
    let mut particle = undamped(5.0, Vec3::ZERO, Vec3::ZERO)
        .with_acceleration(Vec3::new(0.0, -10.0, 0.0));
    particle.integrate(0.5).unwrap();
    assert_relative_eq!(particle.velocity().y, -5.0);
    assert_relative_eq!(particle.position().y, 0.0);
    particle.integrate(0.5).unwrap();
    assert_relative_eq!(particle.position().y, -2.5);
}
