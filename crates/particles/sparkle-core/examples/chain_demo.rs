use sparkle_core::shapes::{circle, line, spiral};
use sparkle_core::sparkle_tick::ManualDriver;
use sparkle_core::{ChainMorph, Location, ParticlePath, RecordingRenderer, Vec3};

fn main() -> anyhow::Result<()> {
    let driver = ManualDriver::default();
    let renderer = RecordingRenderer::new();

    let chain = ChainMorph::builder()
        .add_shape(circle(2.0, 24))
        .add_shape_with(spiral(1.0, 3, 8), 10)
        .add_shape(line(4.0, 12))
        .path(ParticlePath::between(
            Location::new(0.0, 64.0, 0.0),
            Location::new(20.0, 64.0, 0.0),
        ))
        .duration(30)
        .turn(true)
        .rotation_per_tick(Vec3::new(0.0, 0.1, 0.0))
        .renderer(renderer.clone())
        .build(&driver.shared())?;

    println!("chain morph with {} frames", chain.frame_count());
    chain.play();
    let mut pulse = 0;
    while chain.is_running() {
        driver.pulse();
        pulse += 1;
        let drawn = renderer.take();
        if let Some(first) = drawn.first() {
            println!(
                "pulse {pulse:>3}: {:>2} points, first at ({:.2}, {:.2}, {:.2})",
                drawn.len(),
                first.position.x,
                first.position.y,
                first.position.z
            );
        }
    }
    println!("done after {pulse} pulses (state {})", chain.state().name());
    Ok(())
}
