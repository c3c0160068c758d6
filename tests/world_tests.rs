use approx::assert_relative_eq;
use particle_dynamics::*;

#[test]
fn particle_falls_under_gravity() {
    let mut world = ParticleWorld::new(1.0 / 60.0);
    let ball = world.add_particle(
        Particle::new(1.0)
            .unwrap()
            .with_position(Vec3::new(0.0, 10.0, 0.0)),
    );
    let gravity = world.add_generator(ParticleGravity::new(Vec3::new(0.0, -9.81, 0.0)));
    world.register(ball, gravity).unwrap();

    for _ in 0..10 {
        world.step(1.0 / 60.0).unwrap();
    }

    let particle = world.particle(ball).expect("ball should exist");
    assert!(particle.position().y < 10.0, "y = {}", particle.position().y);
    assert!(particle.velocity().y < 0.0);
}

#[test]
fn unregistered_particles_are_still_integrated() {
    let mut world = ParticleWorld::default();
    let drifting = world.add_particle(
        Particle::new(1.0)
            .unwrap()
            .with_velocity(Vec3::new(2.0, 0.0, 0.0))
            .with_damping(1.0)
            .unwrap(),
    );

    world.step(0.5).unwrap();
    assert_relative_eq!(world.particle(drifting).unwrap().position().x, 1.0);
    assert_eq!(world.profiler().particle_count, 1);
    assert_eq!(world.profiler().registration_count, 0);
}

#[test]
fn spring_pair_pulls_together() {
    let mut world = ParticleWorld::default();
    let a = world.add_particle(Particle::new(1.0).unwrap());
    let b = world.add_particle(
        Particle::new(1.0)
            .unwrap()
            .with_position(Vec3::new(4.0, 0.0, 0.0)),
    );
    let on_a = world.add_generator(ParticleSpring::new(b, 10.0, 1.0));
    let on_b = world.add_generator(ParticleSpring::new(a, 10.0, 1.0));
    world.register(a, on_a).unwrap();
    world.register(b, on_b).unwrap();

    world.step(0.01).unwrap();
    world.step(0.01).unwrap();

    let va = world.particle(a).unwrap().velocity();
    let vb = world.particle(b).unwrap().velocity();
    assert!(va.x > 0.0);
    assert!(vb.x < 0.0);
    assert_relative_eq!(va.x, -vb.x, epsilon = 1e-5);
}

#[test]
fn register_rejects_stale_handles() {
    let mut world = ParticleWorld::default();
    let p = world.add_particle(Particle::default());
    let g = world.add_generator(ParticleDrag::new(0.1, 0.1));

    world.remove_particle(p).unwrap();
    assert_eq!(world.register(p, g), Err(ParticleError::UnknownParticle(p)));

    let q = world.add_particle(Particle::default());
    world.remove_generator(g).unwrap();
    assert_eq!(world.register(q, g), Err(ParticleError::UnknownGenerator(g)));
}

#[test]
fn removing_particle_drops_its_registrations() {
    let mut world = ParticleWorld::default();
    let p = world.add_particle(Particle::default());
    let q = world.add_particle(Particle::default());
    let g = world.add_generator(ParticleGravity::new(Vec3::new(0.0, -1.0, 0.0)));
    world.register(p, g).unwrap();
    world.register(q, g).unwrap();
    world.register(p, g).unwrap();

    world.remove_particle(p);
    assert_eq!(world.registry().len(), 1);
    assert!(world.registry().contains(q, g));

    world.remove_generator(g);
    assert!(world.registry().is_empty());
}

#[test]
fn unregister_removes_one_binding() {
    let mut world = ParticleWorld::default();
    let p = world.add_particle(Particle::default());
    let g = world.add_generator(ParticleGravity::new(Vec3::new(0.0, -1.0, 0.0)));
    world.register(p, g).unwrap();

    assert!(world.unregister(p, g));
    assert!(!world.unregister(p, g));
    world.step(0.1).unwrap();
    assert_eq!(world.particle(p).unwrap().velocity(), Vec3::ZERO);
}

#[test]
fn step_rejects_invalid_dt() {
    let mut world = ParticleWorld::default();
    assert_eq!(world.step(0.0), Err(ParticleError::InvalidTimeStep(0.0)));
    assert!(world.advance(-1.0).is_err());
}

#[test]
fn advance_runs_fixed_ticks() {
    let mut world = ParticleWorld::new(0.25);
    let p = world.add_particle(
        Particle::new(1.0)
            .unwrap()
            .with_velocity(Vec3::X)
            .with_damping(1.0)
            .unwrap(),
    );

    assert_eq!(world.advance(0.125).unwrap(), 0);
    assert_relative_eq!(world.interpolation_alpha(), 0.5);
    assert_eq!(world.advance(0.625).unwrap(), 3);
    assert_relative_eq!(world.particle(p).unwrap().position().x, 0.75);
}

#[test]
fn advance_caps_substeps() {
    let config = WorldConfig::new().with_time_step(0.25).with_max_substeps(2);
    let mut world = ParticleWorld::from_config(&config);
    assert_eq!(world.advance(10.0).unwrap(), 2);
    assert_eq!(world.interpolation_alpha(), 0.0);
}

#[test]
fn non_positive_time_step_falls_back_to_default() {
    let world = ParticleWorld::new(0.0);
    assert_eq!(world.time_step(), particle_dynamics::config::DEFAULT_TIME_STEP);
}

#[test]
fn parallel_world_matches_sequential() {
    let build = |parallel: bool| {
        let mut world = ParticleWorld::from_config(&WorldConfig::new().with_parallel(parallel));
        let gravity = world.add_generator(ParticleGravity::new(Vec3::new(0.0, -9.81, 0.0)));
        let drag = world.add_generator(ParticleDrag::new(0.1, 0.01));
        for i in 0..64 {
            let p = world.add_particle(
                Particle::new(1.0 + i as f32)
                    .unwrap()
                    .with_velocity(Vec3::new(i as f32, 0.0, 0.0)),
            );
            world.register(p, gravity).unwrap();
            world.register(p, drag).unwrap();
        }
        for _ in 0..30 {
            world.step(1.0 / 60.0).unwrap();
        }
        world
    };

    let sequential = build(false);
    let parallel = build(true);
    for (a, b) in sequential.particles().iter().zip(parallel.particles().iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn moving_anchor_between_steps_redirects_force() {
    let mut world = ParticleWorld::default();
    let bob = world.add_particle(Particle::new(1.0).unwrap().with_damping(1.0).unwrap());
    let spring = world.add_generator(ParticleAnchoredSpring::new(
        Vec3::new(5.0, 0.0, 0.0),
        10.0,
        1.0,
    ));
    world.register(bob, spring).unwrap();

    // Anchor on +x: stretched by 4, force 40 toward +x.
    world.step(0.1).unwrap();
    let v1 = world.particle(bob).unwrap().velocity();
    assert_relative_eq!(v1.x, 4.0, epsilon = 1e-5);

    world
        .generator_mut::<ParticleAnchoredSpring>(spring)
        .expect("spring is live")
        .set_anchor(Vec3::new(-5.0, 0.0, 0.0));
    assert_eq!(
        world
            .generator_as::<ParticleAnchoredSpring>(spring)
            .unwrap()
            .anchor(),
        Vec3::new(-5.0, 0.0, 0.0)
    );

    // Bob has not moved yet, so the same stretch now pulls toward -x.
    world.step(0.1).unwrap();
    let v2 = world.particle(bob).unwrap().velocity();
    assert!(v2.x < v1.x);
    assert_relative_eq!(v2.x, 0.0, epsilon = 1e-5);
    assert_eq!(world.registry().len(), 1);
}

#[test]
fn typed_generator_access_checks_type_and_handle() {
    let mut world = ParticleWorld::default();
    let drag = world.add_generator(ParticleDrag::new(0.1, 0.2));

    assert!(world.generator_as::<ParticleGravity>(drag).is_none());
    assert!(world.generator_mut::<ParticleAnchoredSpring>(drag).is_none());

    world.generator_mut::<ParticleDrag>(drag).unwrap().k2 = 0.5;
    assert_eq!(world.generator_as::<ParticleDrag>(drag).unwrap().k2, 0.5);

    world.remove_generator(drag);
    assert!(world.generator_as::<ParticleDrag>(drag).is_none());
}

#[test]
fn tick_counter_advances_per_step() {
    let mut world = ParticleWorld::new(0.1);
    world.add_particle(Particle::default());
    assert_eq!(world.tick(), 0);

    world.step(0.1).unwrap();
    assert!(world.step(0.0).is_err());
    assert_eq!(world.tick(), 1);

    assert_eq!(world.advance(0.35).unwrap(), 3);
    assert_eq!(world.tick(), 4);
}
