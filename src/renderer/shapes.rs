//! Placeholder geometry for the scene groups
//!
//! Everything is emitted as world-space triangles; translucent triangles go
//! to a separate list drawn after the opaque ones.

use std::f32::consts::{PI, TAU};

use glam::{Mat4, Vec3};

use super::vertex::{Vertex, colors};
use crate::consts::{CARD_HEIGHT, CARD_WIDTH, TAG_FONT_SIZE, TAG_ROW_Y};
use crate::scene::{CharacterAnimation, Portfolio, SceneGroup, ShapeKind, parse_hex_color};

/// Tags render as bars until measured; this is their stand-in width
const UNMEASURED_TAG_WIDTH: f32 = 0.1;

#[derive(Debug, Default)]
pub struct SceneMesh {
    pub opaque: Vec<Vertex>,
    pub translucent: Vec<Vertex>,
}

impl SceneMesh {
    pub fn len(&self) -> usize {
        self.opaque.len() + self.translucent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn triangle(&mut self, a: Vec3, b: Vec3, c: Vec3, color: [f32; 4]) {
        if color[3] <= 0.0 {
            return;
        }
        let target = if color[3] < 1.0 {
            &mut self.translucent
        } else {
            &mut self.opaque
        };
        target.extend([Vertex::new(a, color), Vertex::new(b, color), Vertex::new(c, color)]);
    }

    /// Rectangle of `width` × `height` in the local XY plane of `model`
    pub fn quad(&mut self, model: &Mat4, width: f32, height: f32, color: [f32; 4]) {
        let (hw, hh) = (width / 2.0, height / 2.0);
        let p = |x: f32, y: f32| model.transform_point3(Vec3::new(x, y, 0.0));
        let (a, b, c, d) = (p(-hw, -hh), p(hw, -hh), p(hw, hh), p(-hw, hh));
        self.triangle(a, b, c, color);
        self.triangle(a, c, d, color);
    }

    /// Box of `size` centred on the origin of `model`
    pub fn cuboid(&mut self, model: &Mat4, size: Vec3, color: [f32; 4]) {
        let h = size / 2.0;
        let faces = [
            (Vec3::X, Vec3::Y, Vec3::Z),
            (Vec3::NEG_X, Vec3::Y, Vec3::NEG_Z),
            (Vec3::Y, Vec3::Z, Vec3::X),
            (Vec3::NEG_Y, Vec3::Z, Vec3::NEG_X),
            (Vec3::Z, Vec3::NEG_X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::X, Vec3::Y),
        ];
        for (normal, u, v) in faces {
            // Cheap directional shading so faces stay distinguishable
            let shade = 0.75 + 0.25 * normal.dot(Vec3::new(0.3, 0.8, 0.5).normalize());
            let tinted = [color[0] * shade, color[1] * shade, color[2] * shade, color[3]];
            let corner = |su: f32, sv: f32| {
                model.transform_point3((normal + u * su + v * sv) * h)
            };
            let (a, b, c, d) = (corner(-1.0, -1.0), corner(1.0, -1.0), corner(1.0, 1.0), corner(-1.0, 1.0));
            self.triangle(a, b, c, tinted);
            self.triangle(a, c, d, tinted);
        }
    }

    /// UV sphere of unit radius scaled by `model`
    pub fn sphere(&mut self, model: &Mat4, segments: u32, color: [f32; 4]) {
        let segments = segments.max(4);
        let rings = (segments / 2).max(2);
        let point = |ring: u32, seg: u32| {
            let theta = PI * ring as f32 / rings as f32;
            let phi = TAU * seg as f32 / segments as f32;
            Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin())
        };
        for ring in 0..rings {
            for seg in 0..segments {
                let n = point(ring, seg);
                let shade = 0.7 + 0.3 * n.y.max(0.0);
                let tinted = [color[0] * shade, color[1] * shade, color[2] * shade, color[3]];
                let a = model.transform_point3(point(ring, seg));
                let b = model.transform_point3(point(ring + 1, seg));
                let c = model.transform_point3(point(ring + 1, seg + 1));
                let d = model.transform_point3(point(ring, seg + 1));
                self.triangle(a, b, c, tinted);
                self.triangle(a, c, d, tinted);
            }
        }
    }
}

fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha.clamp(0.0, 1.0)]
}

fn avatar_color(clip: CharacterAnimation) -> [f32; 4] {
    match clip {
        CharacterAnimation::Typing => colors::AVATAR_TYPING,
        CharacterAnimation::Standing => colors::AVATAR_STANDING,
        CharacterAnimation::Falling => colors::AVATAR_FALLING,
    }
}

/// Build every placeholder mesh for the current frame
pub fn scene_mesh(portfolio: &Portfolio) -> SceneMesh {
    let mut mesh = SceneMesh::default();
    let segments = portfolio.settings.quality.sphere_segments();

    // Avatar: body block plus head, tinted by the playing clip
    let (avatar, _) = portfolio.group_world(SceneGroup::Avatar);
    mesh.cuboid(
        &(avatar * Mat4::from_translation(Vec3::new(0.0, 0.75, 0.0))),
        Vec3::new(0.5, 1.5, 0.3),
        avatar_color(portfolio.character()),
    );
    mesh.sphere(
        &(avatar * Mat4::from_scale_rotation_translation(Vec3::splat(0.22), glam::Quat::IDENTITY, Vec3::new(0.0, 1.75, 0.0))),
        segments,
        colors::AVATAR_HEAD,
    );

    // Office: desk top and monitor
    let (office, _) = portfolio.group_world(SceneGroup::Office);
    mesh.cuboid(
        &(office * Mat4::from_translation(Vec3::new(0.0, 0.8, 0.0))),
        Vec3::new(2.0, 0.08, 1.0),
        colors::DESK,
    );
    mesh.cuboid(
        &(office * Mat4::from_translation(Vec3::new(0.0, 1.2, -0.35))),
        Vec3::new(0.9, 0.55, 0.05),
        colors::MONITOR,
    );

    // Skills: floating shapes
    let (skills, _) = portfolio.group_world(SceneGroup::Skills);
    let animate = portfolio.settings.effective_float();
    let time = portfolio.time() as f32;
    for shape in portfolio.shapes() {
        let model = skills * shape.matrix(time, animate);
        let color = [shape.color.x, shape.color.y, shape.color.z, shape.opacity];
        match shape.kind {
            ShapeKind::Sphere => mesh.sphere(&model, segments, color),
            ShapeKind::Cube => mesh.cuboid(&model, Vec3::ONE, color),
        }
    }

    // Projects: cards with image area and tag bars
    let (_, group_opacity) = portfolio.group_world(SceneGroup::Projects);
    if group_opacity > 0.0 {
        for (index, (world, pose)) in portfolio.card_worlds().into_iter().enumerate() {
            let back = world * Mat4::from_translation(Vec3::new(0.0, 0.0, -0.001));
            mesh.quad(
                &back,
                CARD_WIDTH,
                CARD_HEIGHT,
                with_alpha(colors::CARD_BACKGROUND, pose.background_opacity * group_opacity),
            );
            mesh.quad(
                &(world * Mat4::from_translation(Vec3::new(0.0, 0.6, 0.0))),
                2.6,
                1.56,
                with_alpha(colors::CARD_IMAGE, group_opacity),
            );
            let Some(layout) = portfolio.tag_layout(index) else {
                continue;
            };
            for tag in layout.tags() {
                let width = if tag.width > 0.0 { tag.width } else { UNMEASURED_TAG_WIDTH };
                let rgb = parse_hex_color(tag.color).unwrap_or(Vec3::ONE);
                mesh.quad(
                    &(world * Mat4::from_translation(Vec3::new(tag.x + width / 2.0, TAG_ROW_Y, 0.001))),
                    width,
                    TAG_FONT_SIZE,
                    [rgb.x, rgb.y, rgb.z, group_opacity],
                );
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_is_two_triangles() {
        let mut mesh = SceneMesh::default();
        mesh.quad(&Mat4::IDENTITY, 2.0, 1.0, [1.0; 4]);
        assert_eq!(mesh.opaque.len(), 6);
        assert!(mesh.translucent.is_empty());
        let xs: Vec<f32> = mesh.opaque.iter().map(|v| v.position[0]).collect();
        assert!(xs.iter().all(|x| x.abs() == 1.0));
    }

    #[test]
    fn test_alpha_routes_triangles() {
        let mut mesh = SceneMesh::default();
        mesh.cuboid(&Mat4::IDENTITY, Vec3::ONE, [1.0, 0.0, 0.0, 0.5]);
        assert_eq!(mesh.translucent.len(), 36);
        mesh.quad(&Mat4::IDENTITY, 1.0, 1.0, [1.0, 0.0, 0.0, 0.0]);
        assert_eq!(mesh.len(), 36);
    }

    #[test]
    fn test_sphere_vertex_count() {
        let mut mesh = SceneMesh::default();
        mesh.sphere(&Mat4::IDENTITY, 8, [1.0; 4]);
        assert_eq!(mesh.opaque.len(), 8 * 4 * 6);
        assert!(
            mesh.opaque
                .iter()
                .all(|v| (Vec3::from(v.position).length() - 1.0).abs() < 1e-4)
        );
    }
}
