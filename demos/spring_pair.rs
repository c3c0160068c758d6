use particle_dynamics::*;

fn main() -> Result<(), ParticleError> {
    env_logger::init();

    let mut world = ParticleWorld::new(1.0 / 60.0);
    world.set_frame_budget(Some(1.0));

    let a = world.add_particle(Particle::new(1.0)?);
    let b = world.add_particle(Particle::new(1.0)?.with_position(Vec3::new(3.0, 0.0, 0.0)));

    // Two identical springs on `a`, one on `b`.
    let spring_a = world.add_generator(ParticleSpring::new(b, 1.0, 2.0));
    let spring_a2 = world.add_generator(ParticleSpring::new(b, 1.0, 2.0));
    let spring_b = world.add_generator(ParticleSpring::new(a, 1.0, 2.0));
    world.register(a, spring_a)?;
    world.register(a, spring_a2)?;
    world.register(b, spring_b)?;

    for tick in 0..120 {
        world.step(world.time_step())?;
        if tick % 20 == 0 {
            world.profiler().report();
            let pa = world.particle(a).map(Particle::position).unwrap_or_default();
            let pb = world.particle(b).map(Particle::position).unwrap_or_default();
            println!("tick {tick:3}: a = {pa:?}, b = {pb:?}");
        }
    }
    Ok(())
}
