#![cfg_attr(target_arch = "spirv", no_std)]

use bytemuck::{Pod, Zeroable};
use spirv_std::glam::{Mat4, Vec3, Vec4};

/// The `view` uniform, bound at descriptor set 0, binding 0.
///
/// The matrix is stored column-major, which is the layout both `glam` and a
/// uniform buffer expect. Unlike the zeroed value, [`Default`] is the identity
/// matrix, so a host that never sets the view still gets a pass-through
/// transform.
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct ViewConstants {
    pub view: [f32; 16],
}

impl ViewConstants {
    #[rustfmt::skip]
    pub const IDENTITY: Self = Self {
        view: [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ],
    };

    pub fn new(view: Mat4) -> Self {
        Self {
            view: view.to_cols_array(),
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::from_cols_array(&self.view)
    }
}

impl Default for ViewConstants {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Multiplies `view` with the homogeneous form of `pos` (`w = 1.0`).
///
/// No validation happens here: singular matrices are fine, and NaN or
/// infinite inputs propagate through the arithmetic. Clipping and the
/// perspective divide belong to the rasterizer.
pub fn transform_position(view: Mat4, pos: Vec3) -> Vec4 {
    view * pos.extend(1.0)
}

/// Composes a view matrix from primitive transforms.
///
/// Each step is applied after every step pushed before it, so
/// `translate(a)` followed by `scale(b)` moves a point by `a` and then scales
/// the result by `b`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewBuilder {
    matrix: Mat4,
}

impl ViewBuilder {
    pub fn new() -> Self {
        Self {
            matrix: Mat4::IDENTITY,
        }
    }

    pub fn translate(&mut self, offset: Vec3) -> &mut Self {
        self.push(Mat4::from_translation(offset))
    }

    pub fn scale(&mut self, factors: Vec3) -> &mut Self {
        self.push(Mat4::from_scale(factors))
    }

    /// Rotates counter-clockwise around the x axis, `angle` in radians.
    pub fn rotate_x(&mut self, angle: f32) -> &mut Self {
        self.push(Mat4::from_rotation_x(angle))
    }

    pub fn rotate_y(&mut self, angle: f32) -> &mut Self {
        self.push(Mat4::from_rotation_y(angle))
    }

    pub fn rotate_z(&mut self, angle: f32) -> &mut Self {
        self.push(Mat4::from_rotation_z(angle))
    }

    /// Applies an arbitrary matrix after the current steps.
    pub fn push(&mut self, step: Mat4) -> &mut Self {
        self.matrix = step * self.matrix;
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.matrix = Mat4::IDENTITY;
        self
    }

    pub fn build(&self) -> ViewConstants {
        ViewConstants::new(self.matrix)
    }
}

impl Default for ViewBuilder {
    fn default() -> Self {
        Self::new()
    }
}
