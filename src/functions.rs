//! The reference extension module: one function per wire schema.
//!
//! Every function has the same shape — decode a fixed, linear sequence of
//! fields with a [`FieldCursor`], perform the matching [`Runtime`]
//! operation, and optionally hand back an [`OutBuf`]. The field sequence is
//! each function's private schema, documented on the function; nothing is
//! negotiated at runtime. Color fields are always three integers with
//! alpha fixed at 255.
//!
//! Functions are registered under their wire names (see
//! [`Registry::with_builtins`](crate::registry::Registry::with_builtins)).

use crate::args::FieldCursor;
use crate::backend::{CameraProjection, Color, Graphics, Vector3};
use crate::error::Result;
use crate::outbuf::OutBuf;
use crate::registry::ExtensionFn;
use crate::runtime::Runtime;

fn read_color(cursor: &mut FieldCursor<'_>) -> Result<Color> {
    let r = cursor.read_i32()?;
    let g = cursor.read_i32()?;
    let b = cursor.read_i32()?;
    Ok(Color::opaque(r, g, b))
}

fn read_vector3(cursor: &mut FieldCursor<'_>) -> Result<Vector3> {
    let x = cursor.read_f32()?;
    let y = cursor.read_f32()?;
    let z = cursor.read_f32()?;
    Ok(Vector3::new(x, y, z))
}

/// `initwindow`: `i32 width, i32 height, cstring title`. No result.
pub fn initwindow<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let width = cursor.read_i32()?;
    let height = cursor.read_i32()?;
    let title = cursor.read_cstring()?;
    runtime.init_window(width, height, &title);
    Ok(None)
}

/// `settargetfps`: `i32 fps`. No result.
pub fn settargetfps<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let fps = cursor.read_i32()?;
    runtime.set_target_fps(fps);
    Ok(None)
}

/// `clearbackground`: `i32 r, i32 g, i32 b`. No result.
pub fn clearbackground<B: Graphics>(
    runtime: &mut Runtime<B>,
    args: &[u8],
) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let color = read_color(&mut cursor)?;
    runtime.clear_background(color)?;
    Ok(None)
}

/// `drawtext`: `cstring text, i32 x, i32 y, i32 font_size, i32 r, i32 g,
/// i32 b`. No result.
pub fn drawtext<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let text = cursor.read_cstring()?;
    let x = cursor.read_i32()?;
    let y = cursor.read_i32()?;
    let font_size = cursor.read_i32()?;
    let color = read_color(&mut cursor)?;
    runtime.draw_text(&text, x, y, font_size, color)?;
    Ok(None)
}

/// `iskeydown`: `i32 key_code`. Returns one byte, 0 or 1.
pub fn iskeydown<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let key_code = cursor.read_i32()?;
    let down = runtime.is_key_down(key_code);
    Ok(Some(OutBuf::from_u8(u8::from(down))?))
}

/// `drawcircle`: `i32 cx, i32 cy, f32 radius, i32 r, i32 g, i32 b`.
/// No result.
pub fn drawcircle<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let center_x = cursor.read_i32()?;
    let center_y = cursor.read_i32()?;
    let radius = cursor.read_f32()?;
    let color = read_color(&mut cursor)?;
    runtime.draw_circle(center_x, center_y, radius, color)?;
    Ok(None)
}

/// `setcameraposition`: `f32 x, f32 y, f32 z`. No result.
pub fn setcameraposition<B: Graphics>(
    runtime: &mut Runtime<B>,
    args: &[u8],
) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let position = read_vector3(&mut cursor)?;
    runtime.set_camera_position(position);
    Ok(None)
}

/// `setcameratarget`: `f32 x, f32 y, f32 z`. No result.
pub fn setcameratarget<B: Graphics>(
    runtime: &mut Runtime<B>,
    args: &[u8],
) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let target = read_vector3(&mut cursor)?;
    runtime.set_camera_target(target);
    Ok(None)
}

/// `setcameraup`: `f32 x, f32 y, f32 z`. No result.
pub fn setcameraup<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let up = read_vector3(&mut cursor)?;
    runtime.set_camera_up(up);
    Ok(None)
}

/// `setcamerafovy`: `f32 fovy`. No result.
pub fn setcamerafovy<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let fovy = cursor.read_f32()?;
    runtime.set_camera_fovy(fovy);
    Ok(None)
}

/// `setcameraprojection`: `i32 projection` (0 = perspective,
/// 1 = orthographic; anything else is malformed). No result.
pub fn setcameraprojection<B: Graphics>(
    runtime: &mut Runtime<B>,
    args: &[u8],
) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let projection = CameraProjection::try_from(cursor.read_i32()?)?;
    runtime.set_camera_projection(projection);
    Ok(None)
}

/// `begindrawing`: no fields. No result.
pub fn begindrawing<B: Graphics>(runtime: &mut Runtime<B>, _args: &[u8]) -> Result<Option<OutBuf>> {
    runtime.begin_drawing()?;
    Ok(None)
}

/// `enddrawing`: no fields. No result.
pub fn enddrawing<B: Graphics>(runtime: &mut Runtime<B>, _args: &[u8]) -> Result<Option<OutBuf>> {
    runtime.end_drawing()?;
    Ok(None)
}

/// `beginmode3d`: no fields; consumes the current camera state. No result.
pub fn beginmode3d<B: Graphics>(runtime: &mut Runtime<B>, _args: &[u8]) -> Result<Option<OutBuf>> {
    runtime.begin_mode3d()?;
    Ok(None)
}

/// `endmode3d`: no fields. No result.
pub fn endmode3d<B: Graphics>(runtime: &mut Runtime<B>, _args: &[u8]) -> Result<Option<OutBuf>> {
    runtime.end_mode3d()?;
    Ok(None)
}

/// `drawcube`: `f32 x, f32 y, f32 z, f32 w, f32 h, f32 l, i32 r, i32 g,
/// i32 b`. No result.
pub fn drawcube<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let position = read_vector3(&mut cursor)?;
    let width = cursor.read_f32()?;
    let height = cursor.read_f32()?;
    let length = cursor.read_f32()?;
    let color = read_color(&mut cursor)?;
    runtime.draw_cube(position, width, height, length, color)?;
    Ok(None)
}

/// `drawcubewires`: same schema as `drawcube`. No result.
pub fn drawcubewires<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let position = read_vector3(&mut cursor)?;
    let width = cursor.read_f32()?;
    let height = cursor.read_f32()?;
    let length = cursor.read_f32()?;
    let color = read_color(&mut cursor)?;
    runtime.draw_cube_wires(position, width, height, length, color)?;
    Ok(None)
}

/// `drawgrid`: `i32 slices, f32 spacing`. No result.
pub fn drawgrid<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let slices = cursor.read_i32()?;
    let spacing = cursor.read_f32()?;
    runtime.draw_grid(slices, spacing)?;
    Ok(None)
}

/// `loadmodel`: `i32 handle, cstring path`. No result.
pub fn loadmodel<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let handle = cursor.read_i32()?;
    let path = cursor.read_cstring()?;
    runtime.load_model(handle, &path)?;
    Ok(None)
}

/// `unloadmodel`: `i32 handle`. No result.
pub fn unloadmodel<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let handle = cursor.read_i32()?;
    runtime.unload_model(handle)?;
    Ok(None)
}

/// `drawmodel`: `i32 handle, f32 x, f32 y, f32 z, f32 scale, i32 r, i32 g,
/// i32 b`. No result.
pub fn drawmodel<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let handle = cursor.read_i32()?;
    let position = read_vector3(&mut cursor)?;
    let scale = cursor.read_f32()?;
    let tint = read_color(&mut cursor)?;
    runtime.draw_model(handle, position, scale, tint)?;
    Ok(None)
}

/// `drawmodelex`: `i32 handle, f32 px, f32 py, f32 pz, f32 axis_x,
/// f32 axis_y, f32 axis_z, f32 angle, f32 scale_x, f32 scale_y,
/// f32 scale_z, i32 r, i32 g, i32 b`. No result.
pub fn drawmodelex<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let handle = cursor.read_i32()?;
    let position = read_vector3(&mut cursor)?;
    let rotation_axis = read_vector3(&mut cursor)?;
    let rotation_angle = cursor.read_f32()?;
    let scale = read_vector3(&mut cursor)?;
    let tint = read_color(&mut cursor)?;
    runtime.draw_model_ex(handle, position, rotation_axis, rotation_angle, scale, tint)?;
    Ok(None)
}

/// `loadtexture`: `i32 handle, cstring path`. No result.
pub fn loadtexture<B: Graphics>(runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let handle = cursor.read_i32()?;
    let path = cursor.read_cstring()?;
    runtime.load_texture(handle, &path)?;
    Ok(None)
}

/// `setmaterialtexture`: `i32 model_handle, i32 material_index,
/// i32 material_map_index, i32 texture_handle`. No result.
pub fn setmaterialtexture<B: Graphics>(
    runtime: &mut Runtime<B>,
    args: &[u8],
) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let model_handle = cursor.read_i32()?;
    let material_index = cursor.read_i32()?;
    let material_map = cursor.read_i32()?;
    let texture_handle = cursor.read_i32()?;
    runtime.set_material_texture(model_handle, material_index, material_map, texture_handle)?;
    Ok(None)
}

/// `addfloat`: `f32 a, f32 b`. Returns a 4-byte float, `a + b`.
/// A diagnostic function for exercising the result path end to end.
pub fn addfloat<B: Graphics>(_runtime: &mut Runtime<B>, args: &[u8]) -> Result<Option<OutBuf>> {
    let mut cursor = FieldCursor::new(args);
    let a = cursor.read_f32()?;
    let b = cursor.read_f32()?;
    Ok(Some(OutBuf::from_f32(a + b)?))
}

/// Every reference function paired with its wire name.
pub(crate) fn builtins<B: Graphics>() -> Vec<(&'static str, ExtensionFn<B>)> {
    vec![
        ("initwindow", initwindow::<B> as ExtensionFn<B>),
        ("settargetfps", settargetfps::<B>),
        ("clearbackground", clearbackground::<B>),
        ("drawtext", drawtext::<B>),
        ("iskeydown", iskeydown::<B>),
        ("drawcircle", drawcircle::<B>),
        ("setcameraposition", setcameraposition::<B>),
        ("setcameratarget", setcameratarget::<B>),
        ("setcameraup", setcameraup::<B>),
        ("setcamerafovy", setcamerafovy::<B>),
        ("setcameraprojection", setcameraprojection::<B>),
        ("begindrawing", begindrawing::<B>),
        ("enddrawing", enddrawing::<B>),
        ("beginmode3d", beginmode3d::<B>),
        ("endmode3d", endmode3d::<B>),
        ("drawcube", drawcube::<B>),
        ("drawcubewires", drawcubewires::<B>),
        ("drawgrid", drawgrid::<B>),
        ("loadmodel", loadmodel::<B>),
        ("unloadmodel", unloadmodel::<B>),
        ("drawmodel", drawmodel::<B>),
        ("drawmodelex", drawmodelex::<B>),
        ("loadtexture", loadtexture::<B>),
        ("setmaterialtexture", setmaterialtexture::<B>),
        ("addfloat", addfloat::<B>),
    ]
}
