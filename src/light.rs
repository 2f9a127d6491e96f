//! Lights, materials, and the per-vertex shading model.
//!
//! # Direction convention
//!
//! Light directions and the view direction both point *toward* the surface
//! (the direction the light or camera is looking). Lambertian diffuse is
//! therefore `max(0, −L·N)`.

use crate::colors::{pack_color, unpack_alpha, unpack_color};
use crate::error::MathError;
use crate::math::vec3::Vec3;
use crate::texture::SampleMode;

/// A scene light.
///
/// Non-ambient lights combine additively; the ambient term contributes
/// once (the first `Ambient` in the light list).
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    Ambient {
        color: u32,
        intensity: f32,
    },
    Directional {
        /// Unit vector pointing from the light toward the scene.
        direction: Vec3,
        color: u32,
        intensity: f32,
    },
    Point {
        position: Vec3,
        color: u32,
        intensity: f32,
        range: f32,
    },
    Spot {
        position: Vec3,
        /// Unit vector along the cone axis.
        direction: Vec3,
        color: u32,
        intensity: f32,
        range: f32,
        /// Full apex angle of the cone, in radians.
        cone_angle: f32,
    },
}

impl Light {
    pub fn ambient(color: u32, intensity: f32) -> Self {
        Light::Ambient {
            color,
            intensity: intensity.clamp(0.0, 1.0),
        }
    }

    /// A directional light; `direction` is normalized and must be nonzero.
    pub fn directional(direction: Vec3, color: u32, intensity: f32) -> Result<Self, MathError> {
        Ok(Light::Directional {
            direction: direction.normalize()?,
            color,
            intensity: intensity.clamp(0.0, 1.0),
        })
    }

    pub fn point(position: Vec3, color: u32, intensity: f32, range: f32) -> Result<Self, MathError> {
        if !(range > 0.0) {
            return Err(MathError::InvalidArgument("point light range must be positive"));
        }
        Ok(Light::Point {
            position,
            color,
            intensity: intensity.clamp(0.0, 1.0),
            range,
        })
    }

    pub fn spot(
        position: Vec3,
        direction: Vec3,
        color: u32,
        intensity: f32,
        range: f32,
        cone_angle: f32,
    ) -> Result<Self, MathError> {
        if !(range > 0.0) {
            return Err(MathError::InvalidArgument("spot light range must be positive"));
        }
        if !(cone_angle > 0.0 && cone_angle < std::f32::consts::PI) {
            return Err(MathError::InvalidArgument("cone angle must be in (0, pi)"));
        }
        Ok(Light::Spot {
            position,
            direction: direction.normalize()?,
            color,
            intensity: intensity.clamp(0.0, 1.0),
            range,
            cone_angle,
        })
    }

    /// The light's contribution geometry at a surface point: direction
    /// toward the surface, color, intensity, and distance attenuation.
    ///
    /// `None` for ambient lights and for points outside a positional
    /// light's range or a spot light's cone.
    fn illumination(&self, point: Vec3) -> Option<(Vec3, u32, f32, f32)> {
        match *self {
            Light::Ambient { .. } => None,
            Light::Directional {
                direction,
                color,
                intensity,
            } => Some((direction, color, intensity, 1.0)),
            Light::Point {
                position,
                color,
                intensity,
                range,
            } => {
                let toward = point - position;
                let distance = toward.magnitude();
                if distance >= range {
                    return None;
                }
                let direction = toward.normalize().ok()?;
                Some((direction, color, intensity, 1.0 - distance / range))
            }
            Light::Spot {
                position,
                direction: axis,
                color,
                intensity,
                range,
                cone_angle,
            } => {
                let toward = point - position;
                let distance = toward.magnitude();
                if distance >= range {
                    return None;
                }
                let direction = toward.normalize().ok()?;
                if axis.dot(direction) < (cone_angle / 2.0).cos() {
                    return None;
                }
                Some((direction, color, intensity, 1.0 - distance / range))
            }
        }
    }
}

/// Surface appearance parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub base_color: u32,
    /// Key into the host's [`TextureCache`](crate::texture::TextureCache).
    pub texture: Option<std::path::PathBuf>,
    pub sample_mode: SampleMode,
    /// Reflection coefficients in [0, 1].
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    /// Phong exponent, at least 1.
    pub shininess: f32,
    pub specular_color: u32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            base_color: crate::colors::FILL,
            texture: None,
            sample_mode: SampleMode::default(),
            ambient: 1.0,
            diffuse: 1.0,
            specular: 0.0,
            shininess: 1.0,
            specular_color: 0xFFFF_FFFF,
        }
    }
}

impl Material {
    /// Clamps coefficients into range and shininess to at least 1.
    pub fn clamped(mut self) -> Self {
        self.ambient = self.ambient.clamp(0.0, 1.0);
        self.diffuse = self.diffuse.clamp(0.0, 1.0);
        self.specular = self.specular.clamp(0.0, 1.0);
        self.shininess = self.shininess.max(1.0);
        self
    }
}

/// `reflect(l, n) = 2(n·l)n − l`.
#[inline]
pub fn reflect(l: Vec3, n: Vec3) -> Vec3 {
    n * (2.0 * n.dot(l)) - l
}

/// Full per-vertex Phong shade: ambient + Σ(diffuse + specular), clamped
/// per channel, alpha preserved from the material's base color.
///
/// `view_dir` points from the camera toward the surface.
pub fn shade(
    material: &Material,
    point: Vec3,
    normal: Vec3,
    view_dir: Vec3,
    lights: &[Light],
) -> u32 {
    let (base_r, base_g, base_b) = unpack_color(material.base_color);
    let alpha = unpack_alpha(material.base_color);
    let (spec_r, spec_g, spec_b) = unpack_color(material.specular_color);

    // Single ambient contribution
    let (mut r, mut g, mut b) = match lights.iter().find_map(|light| match light {
        Light::Ambient { color, intensity } => Some((*color, *intensity)),
        _ => None,
    }) {
        Some((color, intensity)) => {
            let (ar, ag, ab) = unpack_color(color);
            let k = material.ambient * intensity;
            (base_r * ar * k, base_g * ag * k, base_b * ab * k)
        }
        None => (0.0, 0.0, 0.0),
    };

    for light in lights {
        let Some((dir, color, intensity, attenuation)) = light.illumination(point) else {
            continue;
        };
        let (light_r, light_g, light_b) = unpack_color(color);

        let lambert = (-dir.dot(normal)).max(0.0);
        let diffuse = lambert * intensity * material.diffuse * attenuation;
        r += base_r * light_r * diffuse;
        g += base_g * light_g * diffuse;
        b += base_b * light_b * diffuse;

        if material.specular > 0.0 {
            let highlight = view_dir.dot(reflect(dir, normal)).max(0.0);
            let specular =
                highlight.powf(material.shininess) * intensity * material.specular * attenuation;
            r += spec_r * light_r * specular;
            g += spec_g * light_g * specular;
            b += spec_b * light_b * specular;
        }
    }

    // pack_color clamps each channel to [0, 1]
    pack_color(r, g, b, alpha)
}

/// Scalar light intensity at a surface point: ambient plus Lambertian
/// diffuse from every in-range light, clamped to [0, 1].
///
/// Used to modulate texture samples, where per-channel color response is
/// not wanted.
pub fn intensity_at(point: Vec3, normal: Vec3, lights: &[Light]) -> f32 {
    let mut total = lights
        .iter()
        .find_map(|light| match light {
            Light::Ambient { intensity, .. } => Some(*intensity),
            _ => None,
        })
        .unwrap_or(0.0);

    for light in lights {
        if let Some((dir, _, intensity, attenuation)) = light.illumination(point) {
            total += (-dir.dot(normal)).max(0.0) * intensity * attenuation;
        }
    }
    total.clamp(0.0, 1.0)
}

/// The view direction of a camera defined by `position` and `target`, for
/// the "light follows camera" mode.
pub fn follow_direction(position: Vec3, target: Vec3) -> Result<Vec3, MathError> {
    (target - position)
        .normalize()
        .map_err(|_| MathError::InvalidArgument("camera position coincides with target"))
}
