//! The extension runtime: camera and window state plus the resource tables.
//!
//! The original engine keeps this state in process-wide globals (`static
//! Camera3D camera`, `static Model models[…]`, `static Texture2D
//! textures[…]`). Here it is an owned value so every piece of singleton
//! state has one documented home, one initialization rule (the window must
//! be opened before drawing) and an unambiguous teardown point (dropping
//! the runtime).

use log::trace;

use crate::backend::{Camera3D, CameraProjection, Color, Graphics, Vector3};
use crate::error::{Error, Result};
use crate::table::{ResourceTable, DEFAULT_CAPACITY};

/// Owns the graphics backend, the camera, the open-window flag and the
/// model/texture resource tables.
///
/// Extension-function bodies decode their fields and then call the
/// operations here; each operation performs the table bookkeeping and the
/// engine call for one wire schema. Operations that draw require an open
/// window and fail with [`Error::WindowNotReady`] before `initwindow` has
/// run; camera setters and `iskeydown` do not.
///
/// One runtime serves one host, one invocation at a time. Nothing here is
/// `Sync`; a host that ever issues overlapping calls must serialize them
/// (the [`ffi`](crate::ffi) default runtime does so with a mutex).
pub struct Runtime<B: Graphics> {
    backend: B,
    camera: Camera3D,
    window_open: bool,
    models: ResourceTable<B::Model>,
    textures: ResourceTable<B::Texture>,
}

impl<B: Graphics> Runtime<B> {
    /// Creates a runtime with the default table capacities.
    pub fn new(backend: B) -> Self {
        Self::with_capacities(backend, DEFAULT_CAPACITY, DEFAULT_CAPACITY)
    }

    /// Creates a runtime with explicit model/texture table capacities.
    pub fn with_capacities(backend: B, model_capacity: usize, texture_capacity: usize) -> Self {
        Self {
            backend,
            camera: Camera3D::default(),
            window_open: false,
            models: ResourceTable::new(model_capacity),
            textures: ResourceTable::new(texture_capacity),
        }
    }

    /// The graphics backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The graphics backend, mutably. Mainly useful for scripting a test
    /// backend between invocations.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera3D {
        self.camera
    }

    /// Whether `initwindow` has run on this runtime.
    #[must_use]
    pub fn window_open(&self) -> bool {
        self.window_open
    }

    /// The model table.
    pub fn models(&self) -> &ResourceTable<B::Model> {
        &self.models
    }

    /// The texture table.
    pub fn textures(&self) -> &ResourceTable<B::Texture> {
        &self.textures
    }

    fn require_window(&self) -> Result<()> {
        if self.window_open {
            Ok(())
        } else {
            Err(Error::WindowNotReady)
        }
    }

    /// Opens the window and marks the runtime ready for drawing.
    pub fn init_window(&mut self, width: i32, height: i32, title: &str) {
        trace!("initwindow {width}x{height} {title:?}");
        self.backend.init_window(width, height, title);
        self.window_open = true;
    }

    /// Caps the render loop frame rate.
    pub fn set_target_fps(&mut self, fps: i32) {
        self.backend.set_target_fps(fps);
    }

    /// Fills the frame with a solid color.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`.
    pub fn clear_background(&mut self, color: Color) -> Result<()> {
        self.require_window()?;
        self.backend.clear_background(color);
        Ok(())
    }

    /// Draws a text string.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, font_size: i32, color: Color) -> Result<()> {
        self.require_window()?;
        self.backend.draw_text(text, x, y, font_size, color);
        Ok(())
    }

    /// Whether the key is currently held down.
    pub fn is_key_down(&mut self, key_code: i32) -> bool {
        self.backend.is_key_down(key_code)
    }

    /// Draws a filled circle.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`.
    pub fn draw_circle(&mut self, center_x: i32, center_y: i32, radius: f32, color: Color) -> Result<()> {
        self.require_window()?;
        self.backend.draw_circle(center_x, center_y, radius, color);
        Ok(())
    }

    /// Moves the camera.
    pub fn set_camera_position(&mut self, position: Vector3) {
        self.camera.position = position;
    }

    /// Points the camera.
    pub fn set_camera_target(&mut self, target: Vector3) {
        self.camera.target = target;
    }

    /// Sets the camera up vector.
    pub fn set_camera_up(&mut self, up: Vector3) {
        self.camera.up = up;
    }

    /// Sets the camera field of view.
    pub fn set_camera_fovy(&mut self, fovy: f32) {
        self.camera.fovy = fovy;
    }

    /// Sets the camera projection mode.
    pub fn set_camera_projection(&mut self, projection: CameraProjection) {
        self.camera.projection = projection;
    }

    /// Starts a frame.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`.
    pub fn begin_drawing(&mut self) -> Result<()> {
        self.require_window()?;
        self.backend.begin_drawing();
        Ok(())
    }

    /// Ends a frame and presents it.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`.
    pub fn end_drawing(&mut self) -> Result<()> {
        self.require_window()?;
        self.backend.end_drawing();
        Ok(())
    }

    /// Enters 3D mode with a snapshot of the current camera.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`.
    pub fn begin_mode3d(&mut self) -> Result<()> {
        self.require_window()?;
        self.backend.begin_mode3d(self.camera);
        Ok(())
    }

    /// Leaves 3D mode.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`.
    pub fn end_mode3d(&mut self) -> Result<()> {
        self.require_window()?;
        self.backend.end_mode3d();
        Ok(())
    }

    /// Draws a solid cube.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`.
    pub fn draw_cube(&mut self, position: Vector3, width: f32, height: f32, length: f32, color: Color) -> Result<()> {
        self.require_window()?;
        self.backend.draw_cube(position, width, height, length, color);
        Ok(())
    }

    /// Draws a cube wireframe.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`.
    pub fn draw_cube_wires(&mut self, position: Vector3, width: f32, height: f32, length: f32, color: Color) -> Result<()> {
        self.require_window()?;
        self.backend.draw_cube_wires(position, width, height, length, color);
        Ok(())
    }

    /// Draws a ground grid.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`.
    pub fn draw_grid(&mut self, slices: i32, spacing: f32) -> Result<()> {
        self.require_window()?;
        self.backend.draw_grid(slices, spacing);
        Ok(())
    }

    /// Loads a model and installs it at `handle`.
    ///
    /// Loading over a live handle is last-write-wins: the previous model
    /// is dropped without an engine unload call, exactly the orphaning the
    /// wire protocol exhibits.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`;
    /// [`Error::InvalidHandle`] for an out-of-range handle (checked before
    /// the engine load, so a rejected call creates nothing).
    pub fn load_model(&mut self, handle: i32, path: &str) -> Result<()> {
        self.require_window()?;
        self.models.check_handle(handle)?;
        let model = self.backend.load_model(path);
        self.models.load(handle, model)
    }

    /// Unloads the model at `handle` and releases it through the engine.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`;
    /// [`Error::InvalidHandle`] if the slot is out of range or empty.
    pub fn unload_model(&mut self, handle: i32) -> Result<()> {
        self.require_window()?;
        let model = self.models.unload(handle)?;
        self.backend.unload_model(model);
        Ok(())
    }

    /// Draws the model at `handle` with uniform scale.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`;
    /// [`Error::InvalidHandle`] if the slot is out of range or empty.
    pub fn draw_model(&mut self, handle: i32, position: Vector3, scale: f32, tint: Color) -> Result<()> {
        self.require_window()?;
        let model = self.models.get(handle)?;
        self.backend.draw_model(model, position, scale, tint);
        Ok(())
    }

    /// Draws the model at `handle` with rotation and per-axis scale.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`;
    /// [`Error::InvalidHandle`] if the slot is out of range or empty.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_model_ex(
        &mut self,
        handle: i32,
        position: Vector3,
        rotation_axis: Vector3,
        rotation_angle: f32,
        scale: Vector3,
        tint: Color,
    ) -> Result<()> {
        self.require_window()?;
        let model = self.models.get(handle)?;
        self.backend
            .draw_model_ex(model, position, rotation_axis, rotation_angle, scale, tint);
        Ok(())
    }

    /// Loads a texture and installs it at `handle`.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`;
    /// [`Error::InvalidHandle`] for an out-of-range handle.
    pub fn load_texture(&mut self, handle: i32, path: &str) -> Result<()> {
        self.require_window()?;
        self.textures.check_handle(handle)?;
        let texture = self.backend.load_texture(path);
        self.textures.load(handle, texture)
    }

    /// Binds the texture at `texture_handle` to one material map of the
    /// model at `model_handle`.
    ///
    /// # Errors
    ///
    /// [`Error::WindowNotReady`] before `initwindow`;
    /// [`Error::InvalidHandle`] if either handle is out of range or empty
    /// (the model handle is checked first, matching the field order).
    pub fn set_material_texture(
        &mut self,
        model_handle: i32,
        material_index: i32,
        material_map: i32,
        texture_handle: i32,
    ) -> Result<()> {
        self.require_window()?;
        let model = self.models.get_mut(model_handle)?;
        let texture = self.textures.get(texture_handle)?;
        self.backend
            .set_material_texture(model, material_index, material_map, texture);
        Ok(())
    }
}
