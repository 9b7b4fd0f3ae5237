//! End-to-end tests: argument buffers in, engine calls and result buffers
//! out, through the dispatch registry.

use ext_ray_rs::backend::recording::{Call, RecordingGraphics};
use ext_ray_rs::backend::{Camera3D, CameraProjection, Color, Vector3};
use ext_ray_rs::error::{ArgumentFault, Error};
use ext_ray_rs::prelude::*;

fn registry() -> Registry<RecordingGraphics> {
    Registry::with_builtins()
}

fn open_runtime() -> Runtime<RecordingGraphics> {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut runtime = Runtime::new(RecordingGraphics::new());
    runtime.init_window(640, 480, "test");
    runtime.backend_mut().take_calls();
    runtime
}

/// Dispatches `name` and expects a no-result completion.
fn call_ok(runtime: &mut Runtime<RecordingGraphics>, name: &str, args: &ArgWriter) {
    let result = registry().call(runtime, name, args.as_bytes()).unwrap();
    assert!(result.is_none(), "{name} should produce no result");
}

#[test]
fn initwindow_decodes_width_height_title() {
    let mut runtime = Runtime::new(RecordingGraphics::new());
    let mut args = ArgWriter::new();
    args.push_i32(800).push_i32(450).push_cstring("orbit demo");
    call_ok(&mut runtime, "initwindow", &args);
    assert!(runtime.window_open());
    assert_eq!(
        runtime.backend().calls(),
        &[Call::InitWindow {
            width: 800,
            height: 450,
            title: "orbit demo".into()
        }]
    );
}

#[test]
fn drawtext_schema_is_text_first() {
    let mut runtime = open_runtime();
    let mut args = ArgWriter::new();
    args.push_cstring("score: 10")
        .push_i32(20)
        .push_i32(40)
        .push_i32(16)
        .push_i32(255)
        .push_i32(255)
        .push_i32(0);
    call_ok(&mut runtime, "drawtext", &args);
    assert_eq!(
        runtime.backend().calls(),
        &[Call::DrawText {
            text: "score: 10".into(),
            x: 20,
            y: 40,
            font_size: 16,
            color: Color::opaque(255, 255, 0),
        }]
    );
}

#[test]
fn drawcircle_mixes_integer_and_float_fields() {
    let mut runtime = open_runtime();
    let mut args = ArgWriter::new();
    args.push_i32(100)
        .push_i32(120)
        .push_f32(7.5)
        .push_i32(0)
        .push_i32(128)
        .push_i32(255);
    call_ok(&mut runtime, "drawcircle", &args);
    assert_eq!(
        runtime.backend().calls(),
        &[Call::DrawCircle {
            center_x: 100,
            center_y: 120,
            radius: 7.5,
            color: Color::opaque(0, 128, 255),
        }]
    );
}

#[test]
fn camera_setters_accumulate_into_the_mode3d_snapshot() {
    let mut runtime = open_runtime();
    let reg = registry();

    let mut args = ArgWriter::new();
    args.push_f32(0.0).push_f32(10.0).push_f32(10.0);
    reg.call(&mut runtime, "setcameraposition", args.as_bytes())
        .unwrap();

    let mut args = ArgWriter::new();
    args.push_f32(0.0).push_f32(0.0).push_f32(0.0);
    reg.call(&mut runtime, "setcameratarget", args.as_bytes())
        .unwrap();

    let mut args = ArgWriter::new();
    args.push_f32(0.0).push_f32(1.0).push_f32(0.0);
    reg.call(&mut runtime, "setcameraup", args.as_bytes())
        .unwrap();

    let mut args = ArgWriter::new();
    args.push_f32(45.0);
    reg.call(&mut runtime, "setcamerafovy", args.as_bytes())
        .unwrap();

    let mut args = ArgWriter::new();
    args.push_i32(1);
    reg.call(&mut runtime, "setcameraprojection", args.as_bytes())
        .unwrap();

    reg.call(&mut runtime, "beginmode3d", &[]).unwrap();

    let expected = Camera3D {
        position: Vector3::new(0.0, 10.0, 10.0),
        target: Vector3::new(0.0, 0.0, 0.0),
        up: Vector3::new(0.0, 1.0, 0.0),
        fovy: 45.0,
        projection: CameraProjection::Orthographic,
    };
    assert_eq!(
        runtime.backend().calls().last(),
        Some(&Call::BeginMode3d { camera: expected })
    );
}

#[test]
fn unknown_projection_discriminant_is_malformed() {
    let mut runtime = open_runtime();
    let mut args = ArgWriter::new();
    args.push_i32(7);
    assert_eq!(
        registry().call(&mut runtime, "setcameraprojection", args.as_bytes()),
        Err(Error::MalformedArguments(ArgumentFault::UnknownEnumValue(7)))
    );
    // The camera is untouched by the failed call.
    assert_eq!(runtime.camera().projection, CameraProjection::Perspective);
}

#[test]
fn frame_bracketing_flows_through_dispatch() {
    let mut runtime = open_runtime();
    let reg = registry();
    reg.call(&mut runtime, "begindrawing", &[]).unwrap();
    let mut args = ArgWriter::new();
    args.push_i32(10).push_f32(1.0);
    reg.call(&mut runtime, "drawgrid", args.as_bytes()).unwrap();
    reg.call(&mut runtime, "enddrawing", &[]).unwrap();
    assert_eq!(
        runtime.backend().calls(),
        &[
            Call::BeginDrawing,
            Call::DrawGrid {
                slices: 10,
                spacing: 1.0
            },
            Call::EndDrawing,
        ]
    );
}

#[test]
fn drawcube_and_wires_share_a_schema() {
    let mut runtime = open_runtime();
    let reg = registry();
    for name in ["drawcube", "drawcubewires"] {
        let mut args = ArgWriter::new();
        args.push_f32(1.0)
            .push_f32(2.0)
            .push_f32(3.0)
            .push_f32(4.0)
            .push_f32(5.0)
            .push_f32(6.0)
            .push_i32(10)
            .push_i32(20)
            .push_i32(30);
        reg.call(&mut runtime, name, args.as_bytes()).unwrap();
    }
    assert_eq!(
        runtime.backend().calls(),
        &[
            Call::DrawCube {
                position: Vector3::new(1.0, 2.0, 3.0),
                width: 4.0,
                height: 5.0,
                length: 6.0,
                color: Color::opaque(10, 20, 30),
            },
            Call::DrawCubeWires {
                position: Vector3::new(1.0, 2.0, 3.0),
                width: 4.0,
                height: 5.0,
                length: 6.0,
                color: Color::opaque(10, 20, 30),
            },
        ]
    );
}

#[test]
fn model_lifecycle_through_the_wire() {
    let mut runtime = open_runtime();
    let reg = registry();

    let mut args = ArgWriter::new();
    args.push_i32(3).push_cstring("assets/teapot.obj");
    reg.call(&mut runtime, "loadmodel", args.as_bytes()).unwrap();

    let mut args = ArgWriter::new();
    args.push_i32(3)
        .push_f32(0.0)
        .push_f32(1.0)
        .push_f32(0.0)
        .push_f32(2.0)
        .push_i32(255)
        .push_i32(255)
        .push_i32(255);
    reg.call(&mut runtime, "drawmodel", args.as_bytes()).unwrap();

    let mut args = ArgWriter::new();
    args.push_i32(3);
    reg.call(&mut runtime, "unloadmodel", args.as_bytes())
        .unwrap();

    assert_eq!(
        runtime.backend().calls(),
        &[
            Call::LoadModel {
                path: "assets/teapot.obj".into()
            },
            Call::DrawModel {
                path: "assets/teapot.obj".into(),
                position: Vector3::new(0.0, 1.0, 0.0),
                scale: 2.0,
                tint: Color::opaque(255, 255, 255),
            },
            Call::UnloadModel {
                path: "assets/teapot.obj".into()
            },
        ]
    );

    // The handle is dead after unload.
    let mut args = ArgWriter::new();
    args.push_i32(3);
    assert_eq!(
        reg.call(&mut runtime, "unloadmodel", args.as_bytes()),
        Err(Error::InvalidHandle(3))
    );
}

#[test]
fn drawmodelex_decodes_fourteen_fields() {
    let mut runtime = open_runtime();
    let reg = registry();

    let mut args = ArgWriter::new();
    args.push_i32(0).push_cstring("ship.glb");
    reg.call(&mut runtime, "loadmodel", args.as_bytes()).unwrap();

    let mut args = ArgWriter::new();
    args.push_i32(0);
    for value in [1.0f32, 2.0, 3.0, 0.0, 1.0, 0.0, 90.0, 1.0, 1.0, 1.0] {
        args.push_f32(value);
    }
    args.push_i32(200).push_i32(200).push_i32(200);
    reg.call(&mut runtime, "drawmodelex", args.as_bytes())
        .unwrap();

    assert_eq!(
        runtime.backend().calls().last(),
        Some(&Call::DrawModelEx {
            path: "ship.glb".into(),
            position: Vector3::new(1.0, 2.0, 3.0),
            rotation_axis: Vector3::new(0.0, 1.0, 0.0),
            rotation_angle: 90.0,
            scale: Vector3::new(1.0, 1.0, 1.0),
            tint: Color::opaque(200, 200, 200),
        })
    );
}

#[test]
fn texture_binding_through_the_wire() {
    let mut runtime = open_runtime();
    let reg = registry();

    let mut args = ArgWriter::new();
    args.push_i32(1).push_cstring("crate.obj");
    reg.call(&mut runtime, "loadmodel", args.as_bytes()).unwrap();

    let mut args = ArgWriter::new();
    args.push_i32(8).push_cstring("wood.png");
    reg.call(&mut runtime, "loadtexture", args.as_bytes())
        .unwrap();

    let mut args = ArgWriter::new();
    args.push_i32(1).push_i32(0).push_i32(0).push_i32(8);
    reg.call(&mut runtime, "setmaterialtexture", args.as_bytes())
        .unwrap();

    assert_eq!(
        runtime.backend().calls().last(),
        Some(&Call::SetMaterialTexture {
            model_path: "crate.obj".into(),
            material_index: 0,
            material_map: 0,
            texture_path: "wood.png".into(),
        })
    );
    assert_eq!(runtime.models().get(1).unwrap().bound_textures, ["wood.png"]);
}

#[test]
fn double_load_is_last_write_wins() {
    // Reloading a live handle silently orphans the first resource: no
    // engine unload happens, and later draws see the second model.
    let mut runtime = open_runtime();
    let reg = registry();

    for path in ["first.obj", "second.obj"] {
        let mut args = ArgWriter::new();
        args.push_i32(0).push_cstring(path);
        reg.call(&mut runtime, "loadmodel", args.as_bytes()).unwrap();
    }

    assert_eq!(runtime.models().get(0).unwrap().path, "second.obj");
    assert!(!runtime
        .backend()
        .calls()
        .iter()
        .any(|call| matches!(call, Call::UnloadModel { .. })));
}

#[test]
fn iskeydown_returns_exactly_one_byte() {
    let mut runtime = open_runtime();
    let reg = registry();

    for (key, expected) in [(65, 1u8), (66, 0u8)] {
        runtime.backend_mut().press_key(65);
        let mut args = ArgWriter::new();
        args.push_i32(key);
        let out = reg
            .call(&mut runtime, "iskeydown", args.as_bytes())
            .unwrap()
            .unwrap();
        assert_eq!(out.as_slice(), &[expected]);
    }
}

#[test]
fn addfloat_returns_a_four_byte_sum() {
    let mut runtime = Runtime::new(RecordingGraphics::new());
    let mut args = ArgWriter::new();
    args.push_f32(2.5).push_f32(4.25);
    let out = registry()
        .call(&mut runtime, "addfloat", args.as_bytes())
        .unwrap()
        .unwrap();
    assert_eq!(out.len(), 4);
    let bytes: [u8; 4] = out.as_slice().try_into().unwrap();
    assert_eq!(f32::from_ne_bytes(bytes), 6.75);
}

#[test]
fn every_schema_rejects_a_short_buffer() {
    // One byte can never satisfy any field, and no-field functions accept
    // anything; every function with fields must fail with
    // MalformedArguments, not read out of bounds.
    let no_field_functions = ["begindrawing", "enddrawing", "beginmode3d", "endmode3d"];
    let mut runtime = open_runtime();
    let reg = registry();
    for name in [
        "initwindow",
        "settargetfps",
        "clearbackground",
        "drawtext",
        "iskeydown",
        "drawcircle",
        "setcameraposition",
        "setcameratarget",
        "setcameraup",
        "setcamerafovy",
        "setcameraprojection",
        "drawcube",
        "drawcubewires",
        "drawgrid",
        "loadmodel",
        "unloadmodel",
        "drawmodel",
        "drawmodelex",
        "loadtexture",
        "setmaterialtexture",
        "addfloat",
    ] {
        assert!(!no_field_functions.contains(&name));
        let result = reg.call(&mut runtime, name, &[0u8]);
        assert!(
            matches!(result, Err(Error::MalformedArguments(_))),
            "{name} accepted a 1-byte buffer: {result:?}"
        );
    }
}

#[test]
fn unterminated_title_is_malformed_not_a_scan() {
    let mut runtime = Runtime::new(RecordingGraphics::new());
    let mut args = ArgWriter::new();
    args.push_i32(640).push_i32(480);
    // Title bytes with no NUL anywhere in the buffer.
    let mut bytes = args.into_bytes();
    bytes.extend_from_slice(b"never terminated");
    assert_eq!(
        registry().call(&mut runtime, "initwindow", &bytes),
        Err(Error::MalformedArguments(ArgumentFault::UnterminatedString))
    );
    assert!(!runtime.window_open());
}

#[test]
fn failed_invocation_leaves_other_state_intact() {
    let mut runtime = open_runtime();
    let reg = registry();

    let mut args = ArgWriter::new();
    args.push_i32(2).push_cstring("keep.obj");
    reg.call(&mut runtime, "loadmodel", args.as_bytes()).unwrap();
    runtime.set_camera_fovy(60.0);

    // An invalid-handle draw and a malformed clear both fail...
    let mut args = ArgWriter::new();
    args.push_i32(9000)
        .push_f32(0.0)
        .push_f32(0.0)
        .push_f32(0.0)
        .push_f32(1.0)
        .push_i32(255)
        .push_i32(255)
        .push_i32(255);
    assert!(reg.call(&mut runtime, "drawmodel", args.as_bytes()).is_err());
    assert!(reg.call(&mut runtime, "clearbackground", &[0u8; 3]).is_err());

    // ...and nothing observable by other invocations has moved.
    assert_eq!(runtime.models().get(2).unwrap().path, "keep.obj");
    assert_eq!(runtime.camera().fovy, 60.0);
}

#[test]
fn drawing_before_initwindow_is_window_not_ready() {
    let mut runtime = Runtime::new(RecordingGraphics::new());
    let mut args = ArgWriter::new();
    args.push_i32(0).push_i32(0).push_i32(0);
    assert_eq!(
        registry().call(&mut runtime, "clearbackground", args.as_bytes()),
        Err(Error::WindowNotReady)
    );
}

#[test]
fn trailing_bytes_are_ignored_like_the_wire_demands() {
    // A function reads exactly its schema; extra bytes after the last
    // field are the caller's business and do not fail the call.
    let mut runtime = open_runtime();
    let mut args = ArgWriter::new();
    args.push_i32(60);
    let mut bytes = args.into_bytes();
    bytes.extend_from_slice(&[0xAA; 8]);
    registry()
        .call(&mut runtime, "settargetfps", &bytes)
        .unwrap();
    assert_eq!(
        runtime.backend().calls(),
        &[Call::SetTargetFps { fps: 60 }]
    );
}
