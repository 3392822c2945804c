//! Controller offset transforms
//!
//! The grip pose offset is configured once, for the left controller.
//! The right controller gets the mirror image: yaw and roll turn the
//! other way and the lateral (X) offset flips sign, while pitch and the
//! Y/Z offsets are shared.
//!
//! Rotations follow `glam`: right-handed with Y up, so pitch turns about
//! X, yaw about Y and roll about Z.

use std::ops::Index;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub const ALL: [HandSide; 2] = [HandSide::Left, HandSide::Right];

    fn index(self) -> usize {
        match self {
            HandSide::Left => 0,
            HandSide::Right => 1,
        }
    }
}

/// Euler angles in degrees
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    pub pitch: f32,
    pub yaw: f32,
    pub roll: f32,
}

/// Row-major 3x4 rigid transform: a rotation block plus a translation column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix34 {
    pub m: [[f32; 4]; 3],
}

impl Matrix34 {
    pub fn rotation(&self) -> [[f32; 3]; 3] {
        self.m.map(|row| [row[0], row[1], row[2]])
    }

    pub fn translation(&self) -> Vec3 {
        Vec3::new(self.m[0][3], self.m[1][3], self.m[2][3])
    }

    /// Element-wise comparison within `epsilon`
    pub fn approx_eq(&self, other: &Matrix34, epsilon: f32) -> bool {
        self.m
            .iter()
            .flatten()
            .zip(other.m.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= epsilon)
    }
}

/// Drops the projective row
impl From<Mat4> for Matrix34 {
    fn from(matrix: Mat4) -> Self {
        Self {
            m: [
                matrix.row(0).to_array(),
                matrix.row(1).to_array(),
                matrix.row(2).to_array(),
            ],
        }
    }
}

/// One offset transform per hand
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandOffsets([Matrix34; 2]);

impl HandOffsets {
    pub fn left(&self) -> &Matrix34 {
        &self[HandSide::Left]
    }

    pub fn right(&self) -> &Matrix34 {
        &self[HandSide::Right]
    }
}

impl Index<HandSide> for HandOffsets {
    type Output = Matrix34;

    fn index(&self, side: HandSide) -> &Matrix34 {
        &self.0[side.index()]
    }
}

/// Build both controller offsets from one set of angles and a translation
///
/// Rotation is composed as `yaw * pitch * roll`.
pub fn build_offsets(angles: EulerAngles, offset: Vec3) -> HandOffsets {
    HandOffsets(HandSide::ALL.map(|side| build_hand(side, angles, offset)))
}

fn build_hand(side: HandSide, angles: EulerAngles, offset: Vec3) -> Matrix34 {
    let mut yaw = Mat4::from_rotation_y(angles.yaw.to_radians());
    let pitch = Mat4::from_rotation_x(angles.pitch.to_radians());
    let mut roll = Mat4::from_rotation_z(angles.roll.to_radians());
    let mut offset = offset;

    if side == HandSide::Right {
        // Pure rotations: the transpose is the inverse
        yaw = yaw.transpose();
        roll = roll.transpose();
        offset.x = -offset.x;
    }

    let mut matrix = yaw * pitch * roll;
    matrix.w_axis = offset.extend(1.0);
    Matrix34::from(matrix)
}
