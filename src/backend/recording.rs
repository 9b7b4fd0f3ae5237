//! A deterministic [`Graphics`] implementation for tests and examples.

use std::collections::HashSet;

use super::{Camera3D, Color, Graphics, Vector3};

/// A model "loaded" by the recording backend; remembers where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedModel {
    /// The path `loadmodel` decoded.
    pub path: String,
    /// Paths of textures bound via `setmaterialtexture`, in bind order.
    pub bound_textures: Vec<String>,
}

/// A texture "loaded" by the recording backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTexture {
    /// The path `loadtexture` decoded.
    pub path: String,
}

/// One recorded engine call with its decoded arguments.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum Call {
    InitWindow { width: i32, height: i32, title: String },
    SetTargetFps { fps: i32 },
    ClearBackground { color: Color },
    DrawText { text: String, x: i32, y: i32, font_size: i32, color: Color },
    IsKeyDown { key_code: i32 },
    DrawCircle { center_x: i32, center_y: i32, radius: f32, color: Color },
    BeginDrawing,
    EndDrawing,
    BeginMode3d { camera: Camera3D },
    EndMode3d,
    DrawCube { position: Vector3, width: f32, height: f32, length: f32, color: Color },
    DrawCubeWires { position: Vector3, width: f32, height: f32, length: f32, color: Color },
    DrawGrid { slices: i32, spacing: f32 },
    LoadModel { path: String },
    UnloadModel { path: String },
    DrawModel { path: String, position: Vector3, scale: f32, tint: Color },
    DrawModelEx {
        path: String,
        position: Vector3,
        rotation_axis: Vector3,
        rotation_angle: f32,
        scale: Vector3,
        tint: Color,
    },
    LoadTexture { path: String },
    SetMaterialTexture {
        model_path: String,
        material_index: i32,
        material_map: i32,
        texture_path: String,
    },
}

/// Records every engine call instead of rendering, and answers key-state
/// queries from a scripted set of held keys.
#[derive(Debug, Default)]
pub struct RecordingGraphics {
    calls: Vec<Call>,
    keys_down: HashSet<i32>,
}

impl RecordingGraphics {
    /// Creates a backend with no recorded calls and no keys held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts `key_code` as held down for subsequent `iskeydown` queries.
    pub fn press_key(&mut self, key_code: i32) {
        self.keys_down.insert(key_code);
    }

    /// Scripts `key_code` as released.
    pub fn release_key(&mut self, key_code: i32) {
        self.keys_down.remove(&key_code);
    }

    /// Every call recorded so far, in order.
    #[must_use]
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Drains and returns the recorded calls.
    pub fn take_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }
}

impl Graphics for RecordingGraphics {
    type Model = RecordedModel;
    type Texture = RecordedTexture;

    fn init_window(&mut self, width: i32, height: i32, title: &str) {
        self.calls.push(Call::InitWindow {
            width,
            height,
            title: title.to_owned(),
        });
    }

    fn set_target_fps(&mut self, fps: i32) {
        self.calls.push(Call::SetTargetFps { fps });
    }

    fn clear_background(&mut self, color: Color) {
        self.calls.push(Call::ClearBackground { color });
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: i32, color: Color) {
        self.calls.push(Call::DrawText {
            text: text.to_owned(),
            x,
            y,
            font_size,
            color,
        });
    }

    fn is_key_down(&mut self, key_code: i32) -> bool {
        self.calls.push(Call::IsKeyDown { key_code });
        self.keys_down.contains(&key_code)
    }

    fn draw_circle(&mut self, center_x: i32, center_y: i32, radius: f32, color: Color) {
        self.calls.push(Call::DrawCircle {
            center_x,
            center_y,
            radius,
            color,
        });
    }

    fn begin_drawing(&mut self) {
        self.calls.push(Call::BeginDrawing);
    }

    fn end_drawing(&mut self) {
        self.calls.push(Call::EndDrawing);
    }

    fn begin_mode3d(&mut self, camera: Camera3D) {
        self.calls.push(Call::BeginMode3d { camera });
    }

    fn end_mode3d(&mut self) {
        self.calls.push(Call::EndMode3d);
    }

    fn draw_cube(&mut self, position: Vector3, width: f32, height: f32, length: f32, color: Color) {
        self.calls.push(Call::DrawCube {
            position,
            width,
            height,
            length,
            color,
        });
    }

    fn draw_cube_wires(
        &mut self,
        position: Vector3,
        width: f32,
        height: f32,
        length: f32,
        color: Color,
    ) {
        self.calls.push(Call::DrawCubeWires {
            position,
            width,
            height,
            length,
            color,
        });
    }

    fn draw_grid(&mut self, slices: i32, spacing: f32) {
        self.calls.push(Call::DrawGrid { slices, spacing });
    }

    fn load_model(&mut self, path: &str) -> RecordedModel {
        self.calls.push(Call::LoadModel {
            path: path.to_owned(),
        });
        RecordedModel {
            path: path.to_owned(),
            bound_textures: Vec::new(),
        }
    }

    fn unload_model(&mut self, model: RecordedModel) {
        self.calls.push(Call::UnloadModel { path: model.path });
    }

    fn draw_model(&mut self, model: &RecordedModel, position: Vector3, scale: f32, tint: Color) {
        self.calls.push(Call::DrawModel {
            path: model.path.clone(),
            position,
            scale,
            tint,
        });
    }

    fn draw_model_ex(
        &mut self,
        model: &RecordedModel,
        position: Vector3,
        rotation_axis: Vector3,
        rotation_angle: f32,
        scale: Vector3,
        tint: Color,
    ) {
        self.calls.push(Call::DrawModelEx {
            path: model.path.clone(),
            position,
            rotation_axis,
            rotation_angle,
            scale,
            tint,
        });
    }

    fn load_texture(&mut self, path: &str) -> RecordedTexture {
        self.calls.push(Call::LoadTexture {
            path: path.to_owned(),
        });
        RecordedTexture {
            path: path.to_owned(),
        }
    }

    fn set_material_texture(
        &mut self,
        model: &mut RecordedModel,
        material_index: i32,
        material_map: i32,
        texture: &RecordedTexture,
    ) {
        model.bound_textures.push(texture.path.clone());
        self.calls.push(Call::SetMaterialTexture {
            model_path: model.path.clone(),
            material_index,
            material_map,
            texture_path: texture.path.clone(),
        });
    }
}
