use crate::world::{
    generate::{
        circular_gradient_by_grid_coord, noise::CellNoiseFn, Generate,
        WorldBuilder,
    },
    World,
};

/// Generate an elevation map using a noise function. If the continent mask
/// is enabled, the noise gets scaled down by a radial gradient around the
/// middle of the map, so land gathers there and the seams tend to be low.
#[derive(Debug)]
pub struct ElevationGenerator;

impl Generate for ElevationGenerator {
    fn generate(&self, world: &mut WorldBuilder) -> anyhow::Result<()> {
        let noise_fn = CellNoiseFn::new(
            &mut world.rng,
            &world.config.elevation,
            World::ELEVATION_RANGE,
        );
        let continent = world.config.continent;
        let center = world.center();
        let map = &world.map;
        // Radius is configured as a fraction of the map width
        let radius = continent.radius * map.width() as f64;

        let elevations = map
            .iter()
            .map(|(coord, _)| -> anyhow::Result<_> {
                let (x, y) = map.unit_position(coord);
                let noise = noise_fn.get(x, y);
                if continent.enabled {
                    // 1 at the center, fading to 1-strength at the radius
                    let falloff = circular_gradient_by_grid_coord(
                        map,
                        coord,
                        center,
                        1.0,
                        1.0 - continent.strength,
                        radius,
                    )?;
                    let scaled = noise.apply(|value| value * falloff as f32);
                    Ok((coord, scaled.clamp().inner()))
                } else {
                    Ok((coord, noise.inner()))
                }
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        for (coord, elevation) in elevations {
            world.map.cell_mut(coord).elevation = elevation;
        }
        Ok(())
    }
}
