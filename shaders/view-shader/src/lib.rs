#![cfg_attr(target_arch = "spirv", no_std)]
// HACK(eddyb) can't easily see warnings otherwise from `spirv-builder` builds.
#![deny(warnings)]

use shared::{ViewConstants, transform_position};
use spirv_std::glam::{Vec3, Vec4};
use spirv_std::spirv;

/// `pos` is the only input attribute, which places it at location 0.
#[spirv(vertex)]
pub fn main_vs(
    pos: Vec3,
    #[spirv(uniform, descriptor_set = 0, binding = 0)] constants: &ViewConstants,
    #[spirv(position)] out_pos: &mut Vec4,
) {
    *out_pos = transform_position(constants.view(), pos);
}
