//! The seam between the extension runtime and the graphics engine.
//!
//! The engine itself (window management, rendering, model/texture IO) is a
//! collaborator, not part of this crate. The [`Graphics`] trait captures
//! exactly the native call surface the reference extension module uses;
//! implement it over a real engine to render, or use
//! [`recording::RecordingGraphics`] for deterministic tests.

pub mod recording;

use crate::error::ArgumentFault;

/// An RGBA color.
///
/// The wire format carries only three integer channels; alpha is always
/// 255. Channel values are truncated to a byte the way the original engine
/// structs do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Color {
    /// Builds a fully opaque color from the three wire channels.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn opaque(r: i32, g: i32, b: i32) -> Self {
        Self {
            r: r as u8,
            g: g as u8,
            b: b as u8,
            a: 255,
        }
    }
}

/// A 3-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector3 {
    /// X component.
    pub x: f32,
    /// Y component.
    pub y: f32,
    /// Z component.
    pub z: f32,
}

impl Vector3 {
    /// Builds a vector from its components.
    #[must_use]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// Camera projection mode, stored on the wire as a 32-bit integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(i32)]
pub enum CameraProjection {
    /// Perspective projection.
    #[default]
    Perspective = 0,
    /// Orthographic projection.
    Orthographic = 1,
}

impl TryFrom<i32> for CameraProjection {
    type Error = ArgumentFault;

    fn try_from(value: i32) -> Result<Self, ArgumentFault> {
        match value {
            0 => Ok(Self::Perspective),
            1 => Ok(Self::Orthographic),
            other => Err(ArgumentFault::UnknownEnumValue(other)),
        }
    }
}

/// The 3D camera consumed by `beginmode3d`.
///
/// Mutated incrementally by the camera setter functions and snapshotted
/// when 3D mode begins.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera3D {
    /// Camera position in world space.
    pub position: Vector3,
    /// Point the camera looks at.
    pub target: Vector3,
    /// Camera up vector.
    pub up: Vector3,
    /// Field of view in degrees (perspective) or near-plane width
    /// (orthographic).
    pub fovy: f32,
    /// Projection mode.
    pub projection: CameraProjection,
}

/// The native call surface the reference extension module drives.
///
/// One method per engine call; methods are infallible because the engine's
/// own failure modes (a model file that does not parse, a window the OS
/// refuses) are out-of-band for this protocol, exactly as they are for the
/// original engine's C API.
pub trait Graphics {
    /// An engine model resource, owned by a resource table between
    /// `loadmodel` and `unloadmodel`.
    type Model;
    /// An engine texture resource.
    type Texture;

    /// Opens the window. Must precede every drawing call.
    fn init_window(&mut self, width: i32, height: i32, title: &str);
    /// Caps the render loop frame rate.
    fn set_target_fps(&mut self, fps: i32);
    /// Fills the frame with a solid color.
    fn clear_background(&mut self, color: Color);
    /// Draws a text string.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: i32, color: Color);
    /// Whether the key is currently held down.
    fn is_key_down(&mut self, key_code: i32) -> bool;
    /// Draws a filled circle.
    fn draw_circle(&mut self, center_x: i32, center_y: i32, radius: f32, color: Color);
    /// Starts a frame.
    fn begin_drawing(&mut self);
    /// Ends a frame and presents it.
    fn end_drawing(&mut self);
    /// Enters 3D mode with a snapshot of the camera.
    fn begin_mode3d(&mut self, camera: Camera3D);
    /// Leaves 3D mode.
    fn end_mode3d(&mut self);
    /// Draws a solid cube.
    fn draw_cube(&mut self, position: Vector3, width: f32, height: f32, length: f32, color: Color);
    /// Draws a cube wireframe.
    fn draw_cube_wires(
        &mut self,
        position: Vector3,
        width: f32,
        height: f32,
        length: f32,
        color: Color,
    );
    /// Draws a ground grid.
    fn draw_grid(&mut self, slices: i32, spacing: f32);
    /// Loads a model from a file path.
    fn load_model(&mut self, path: &str) -> Self::Model;
    /// Releases a model.
    fn unload_model(&mut self, model: Self::Model);
    /// Draws a model with uniform scale.
    fn draw_model(&mut self, model: &Self::Model, position: Vector3, scale: f32, tint: Color);
    /// Draws a model with rotation and per-axis scale.
    #[allow(clippy::too_many_arguments)]
    fn draw_model_ex(
        &mut self,
        model: &Self::Model,
        position: Vector3,
        rotation_axis: Vector3,
        rotation_angle: f32,
        scale: Vector3,
        tint: Color,
    );
    /// Loads a texture from a file path.
    fn load_texture(&mut self, path: &str) -> Self::Texture;
    /// Binds a texture to one material map of a model.
    fn set_material_texture(
        &mut self,
        model: &mut Self::Model,
        material_index: i32,
        material_map: i32,
        texture: &Self::Texture,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_truncates_like_the_engine() {
        let color = Color::opaque(255, 0, 300);
        assert_eq!((color.r, color.g, color.b, color.a), (255, 0, 44, 255));
    }

    #[test]
    fn projection_discriminants_are_closed() {
        assert_eq!(
            CameraProjection::try_from(0),
            Ok(CameraProjection::Perspective)
        );
        assert_eq!(
            CameraProjection::try_from(1),
            Ok(CameraProjection::Orthographic)
        );
        assert_eq!(
            CameraProjection::try_from(2),
            Err(ArgumentFault::UnknownEnumValue(2))
        );
    }
}
