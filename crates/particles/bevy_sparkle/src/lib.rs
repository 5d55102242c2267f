use bevy::prelude::*;
use sparkle_tick::{DriverConfig, ManualDriver};

pub mod resources;
pub mod systems;

pub use resources::{ParticleBuffer, RenderedParticle, RenderedParticles, SparkleDriver};

/// Ordering of the plugin's FixedUpdate work. Systems that start or steer
/// animations should run before [`SparkleSet::Pulse`].
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SparkleSet {
    Pulse,
    Collect,
}

/// Pulses a [`ManualDriver`] once per FixedUpdate and mirrors every drawn
/// point into [`RenderedParticles`].
#[derive(Default)]
pub struct SparklePlugin {
    pub config: DriverConfig,
}

impl SparklePlugin {
    pub fn from_json(text: &str) -> sparkle_tick::Result<Self> {
        Ok(Self {
            config: DriverConfig::from_json(text)?,
        })
    }
}

impl Plugin for SparklePlugin {
    fn build(&self, app: &mut App) {
        let config = match self.config.validate() {
            Ok(()) => self.config.clone(),
            Err(err) => {
                log::warn!("sparkle driver config rejected ({err}); using defaults");
                DriverConfig::default()
            }
        };

        app.insert_resource(Time::<Fixed>::from_hz(config.tick_rate_hz))
            .insert_resource(RenderedParticles::default())
            .insert_non_send_resource(SparkleDriver(ManualDriver::new(config)))
            .insert_non_send_resource(ParticleBuffer::default())
            .configure_sets(FixedUpdate, (SparkleSet::Pulse, SparkleSet::Collect).chain())
            .add_systems(
                FixedUpdate,
                (
                    systems::pulse_driver_system.in_set(SparkleSet::Pulse),
                    systems::collect_particles_system.in_set(SparkleSet::Collect),
                ),
            );
    }
}
