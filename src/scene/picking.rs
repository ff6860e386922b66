//! Pointer hit-testing against project cards

use glam::{Mat4, Vec3};

use crate::consts::{CARD_HEIGHT, CARD_WIDTH};

/// Distance along the ray to a `CARD_WIDTH` × `CARD_HEIGHT` card lying in the
/// local XY plane of `world`
pub fn ray_card_distance(origin: Vec3, dir: Vec3, world: &Mat4) -> Option<f32> {
    let inv = world.inverse();
    if !inv.is_finite() {
        return None;
    }
    let o = inv.transform_point3(origin);
    let d = inv.transform_vector3(dir);
    if d.z.abs() < 1e-6 {
        return None;
    }
    let t = -o.z / d.z;
    if t <= 0.0 {
        return None;
    }
    let hit = o + d * t;
    if hit.x.abs() > CARD_WIDTH / 2.0 || hit.y.abs() > CARD_HEIGHT / 2.0 {
        return None;
    }
    // Local t is not world distance once the card is scaled
    Some(world.transform_vector3(d * t).length())
}

/// Index of the nearest card hit by the ray
pub fn pick_card<'a, I>(origin: Vec3, dir: Vec3, cards: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Mat4>,
{
    cards
        .into_iter()
        .enumerate()
        .filter_map(|(i, m)| ray_card_distance(origin, dir, m).map(|d| (i, d)))
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(i, _)| i)
}
