use bevy::prelude::*;

use crate::resources::{to_color, ParticleBuffer, RenderedParticle, RenderedParticles, SparkleDriver};

/// One heartbeat for every task registered with the driver.
pub fn pulse_driver_system(driver: NonSend<SparkleDriver>) {
    driver.0.pulse();
}

/// Move this pulse's draw calls into [`RenderedParticles`], replacing the previous batch.
pub fn collect_particles_system(
    buffer: NonSend<ParticleBuffer>,
    driver: NonSend<SparkleDriver>,
    mut rendered: ResMut<RenderedParticles>,
) {
    rendered.particles.clear();
    rendered
        .particles
        .extend(buffer.0.take().into_iter().map(|call| RenderedParticle {
            position: Vec3::new(
                call.position.x as f32,
                call.position.y as f32,
                call.position.z as f32,
            ),
            color: call.options.color.map(to_color),
            size: call.options.size,
            count: call.options.count,
            particle: call.options.particle,
        }));
    rendered.pulses = driver.0.pulses();
}
