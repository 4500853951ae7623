use serde::{Deserialize, Serialize};

/// Pan, zoom and rotation applied at render time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    pub translate_x: f64,
    pub translate_y: f64,
    pub scale: f64,
    /// Always within [0, 360).
    pub rotation_degrees: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::identity()
    }
}

impl TransformState {
    pub const fn identity() -> Self {
        Self {
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            rotation_degrees: 0.0,
        }
    }

    pub fn new(translate_x: f64, translate_y: f64, scale: f64, rotation_degrees: f64) -> Self {
        Self {
            translate_x,
            translate_y,
            scale,
            rotation_degrees: normalize_degrees(rotation_degrees),
        }
    }

    /// Takes pan and zoom from `other`, keeping the current rotation.
    pub fn with_zoom_of(self, other: &TransformState) -> Self {
        Self {
            translate_x: other.translate_x,
            translate_y: other.translate_y,
            scale: other.scale,
            rotation_degrees: self.rotation_degrees,
        }
    }

    pub fn with_rotation(self, degrees: f64) -> Self {
        Self {
            rotation_degrees: normalize_degrees(degrees),
            ..self
        }
    }

    pub fn is_finite(&self) -> bool {
        self.translate_x.is_finite()
            && self.translate_y.is_finite()
            && self.scale.is_finite()
            && self.rotation_degrees.is_finite()
    }
}

/// Wraps any angle into [0, 360).
pub fn normalize_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Reads and writes the compound `scale(..) translate(..) rotate(..)` descriptor.
pub struct TransformCodec;

impl TransformCodec {
    /// Extracts each component independently; anything missing or
    /// unreadable falls back to identity.
    pub fn parse(descriptor: &str) -> TransformState {
        let identity = TransformState::identity();

        let (translate_x, translate_y) = match arguments(descriptor, "translate") {
            Some(args) => match args.as_slice() {
                [x] => (*x, 0.0),
                [x, y, ..] => (*x, *y),
                [] => (identity.translate_x, identity.translate_y),
            },
            None => (identity.translate_x, identity.translate_y),
        };
        let scale = arguments(descriptor, "scale")
            .and_then(|args| args.first().copied())
            .unwrap_or(identity.scale);
        let rotation = arguments(descriptor, "rotate")
            .and_then(|args| args.first().copied())
            .unwrap_or(identity.rotation_degrees);

        TransformState::new(translate_x, translate_y, scale, rotation)
    }

    /// Canonical form: scale, then translate, then rotate.
    pub fn build(state: &TransformState) -> String {
        format!(
            "scale({}) translate({},{}) rotate({})",
            state.scale, state.translate_x, state.translate_y, state.rotation_degrees
        )
    }
}

fn arguments(descriptor: &str, name: &str) -> Option<Vec<f64>> {
    let start = descriptor.find(&format!("{name}("))? + name.len() + 1;
    let end = start + descriptor[start..].find(')')?;
    descriptor[start..end]
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<f64>().ok())
        .collect()
}
