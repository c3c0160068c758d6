use particle_dynamics::config::DEFAULT_GRAVITY;
use particle_dynamics::*;

fn main() -> Result<(), ParticleError> {
    env_logger::init();

    let config = WorldConfig::new().with_time_step(1.0 / 120.0).with_max_substeps(4);
    let mut world = ParticleWorld::from_config(&config);

    let cork = world.add_particle(
        Particle::new(20.0)?
            .with_position(Vec3::new(0.0, 3.0, 0.0))
            .with_damping(0.6)?,
    );
    let gravity = world.add_generator(ParticleGravity::new(Vec3::from_array(DEFAULT_GRAVITY)));
    let water = world.add_generator(ParticleBuoyancy::new(0.5, 0.5, 0.0));
    let drag = world.add_generator(ParticleDrag::new(0.5, 0.05));
    for generator in [gravity, water, drag] {
        world.register(cork, generator)?;
    }

    // Feed the world with uneven frame times the way a render loop would.
    let frame_times = [1.0 / 60.0, 1.0 / 45.0, 1.0 / 90.0];
    for frame in 0..300 {
        let ticks = world.advance(frame_times[frame % frame_times.len()])?;
        if frame % 30 == 0 {
            let y = world.particle(cork).map(|p| p.position().y).unwrap_or_default();
            println!("frame {frame:3}: {ticks} ticks, height {y:.3}");
        }
    }
    Ok(())
}
