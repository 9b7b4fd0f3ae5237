//! The canonical C calling convention, adapted over the safe core.
//!
//! The wire contract between a host and an extension library is one entry
//! point per invocation: the host supplies the function name and the
//! argument buffer, and receives an optional result buffer it must later
//! release with [`extray_buffer_free`]. A byte length accompanies every
//! input pointer so the bounds-checking guarantees of
//! [`FieldCursor`](crate::args::FieldCursor) hold at the boundary too.
//!
//! "No result" is a null output pointer with zero length. A function that
//! produces a result always produces a non-null pointer, even for a
//! zero-length buffer (no reference function returns one; every returning
//! schema is a fixed-width scalar).
//!
//! The module also hosts the process-wide *headless* runtime the exported
//! symbols dispatch into: a [`RecordingGraphics`] backend behind a mutex,
//! the reference wiring of the ABI and a smoke-test target for hosts. An
//! embedding that renders for real implements
//! [`Graphics`](crate::backend::Graphics) and drives
//! [`invoke`]/[`write_result`] over its own runtime instead.

use std::sync::OnceLock;

use once_cell::sync::Lazy;
use parking_lot::Mutex;

use crate::backend::recording::RecordingGraphics;
use crate::backend::Graphics;
use crate::error::Error;
use crate::outbuf::OutBuf;
use crate::registry::Registry;
use crate::runtime::Runtime;

/// ABI version for compatibility checking between host and extension.
pub const ABI_VERSION: u32 = 1;

/// The raw shape of one extension-function invocation, as a host sees it
/// through a resolved symbol.
pub type RawExtensionFn = unsafe extern "C" fn(
    data: *const u8,
    data_len: usize,
    out: *mut *mut u8,
    out_len: *mut usize,
) -> i32;

/// Status code returned from every raw invocation.
///
/// `Ok` is zero; each error of the invocation taxonomy has a stable
/// non-zero discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum CallStatus {
    /// The invocation completed; the out-params describe the result.
    Ok = 0,
    /// No function is registered under the supplied name.
    UnknownFunction = 1,
    /// The argument buffer did not match the function's schema.
    MalformedArguments = 2,
    /// A resource handle was out of range or referred to an empty slot.
    InvalidHandle = 3,
    /// The result buffer could not be allocated.
    AllocationFailure = 4,
    /// A drawing call arrived before `initwindow`.
    WindowNotReady = 5,
}

impl From<&Error> for CallStatus {
    fn from(error: &Error) -> Self {
        match error {
            Error::MalformedArguments(_) => Self::MalformedArguments,
            Error::InvalidHandle(_) => Self::InvalidHandle,
            Error::AllocationFailure(_) => Self::AllocationFailure,
            Error::UnknownFunction(_) => Self::UnknownFunction,
            Error::WindowNotReady => Self::WindowNotReady,
        }
    }
}

/// Hands a result buffer (or the absence of one) to the caller through the
/// out-params.
///
/// On `Some`, ownership of the bytes transfers to the caller, who must
/// release them with [`extray_buffer_free`]. On `None`, the out pointer is
/// null and the length zero.
///
/// # Safety
///
/// `out` and `out_len` must be valid for writes.
pub unsafe fn write_result(out: *mut *mut u8, out_len: *mut usize, result: Option<OutBuf>) {
    match result {
        Some(buf) => {
            let len = buf.len();
            let boxed = buf.into_boxed_slice();
            out.write(Box::into_raw(boxed).cast::<u8>());
            out_len.write(len);
        }
        None => {
            out.write(std::ptr::null_mut());
            out_len.write(0);
        }
    }
}

/// Releases a result buffer previously handed out by [`write_result`].
///
/// A null pointer is a no-op. `len` must be the length reported alongside
/// the pointer.
///
/// # Safety
///
/// `ptr` must be null or a pointer obtained from [`write_result`] with the
/// matching `len`, not yet freed.
#[no_mangle]
pub unsafe extern "C" fn extray_buffer_free(ptr: *mut u8, len: usize) {
    if ptr.is_null() {
        return;
    }
    drop(Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len)));
}

/// The extension's ABI version, exported for host compatibility checks.
#[no_mangle]
pub extern "C" fn extray_abi_version() -> u32 {
    ABI_VERSION
}

/// Runs one invocation over raw parts: resolves `name` in `registry`,
/// invokes the function against `runtime`, and writes the out-params.
///
/// Always writes the out-params: null/zero on every error path, so a
/// caller that ignores the status cannot free garbage.
///
/// # Safety
///
/// `data` must be valid for reads of `data_len` bytes (or null with
/// `data_len == 0`); `out` and `out_len` must be valid for writes. The
/// argument buffer is only borrowed for the duration of the call.
pub unsafe fn invoke<B: Graphics>(
    registry: &Registry<B>,
    runtime: &mut Runtime<B>,
    name: &str,
    data: *const u8,
    data_len: usize,
    out: *mut *mut u8,
    out_len: *mut usize,
) -> CallStatus {
    write_result(out, out_len, None);
    let args: &[u8] = if data.is_null() {
        &[]
    } else {
        std::slice::from_raw_parts(data, data_len)
    };
    match registry.call(runtime, name, args) {
        Ok(result) => {
            write_result(out, out_len, result);
            CallStatus::Ok
        }
        Err(error) => CallStatus::from(&error),
    }
}

static HEADLESS_RUNTIME: OnceLock<Mutex<Runtime<RecordingGraphics>>> = OnceLock::new();

fn headless_runtime() -> &'static Mutex<Runtime<RecordingGraphics>> {
    HEADLESS_RUNTIME.get_or_init(|| Mutex::new(Runtime::new(RecordingGraphics::new())))
}

static BUILTINS: Lazy<Registry<RecordingGraphics>> = Lazy::new(Registry::with_builtins);

/// Runs `f` against the process-wide headless runtime the exported
/// [`extray_call`] symbol dispatches into. Lets a test or host script the
/// recording backend between invocations.
pub fn with_headless_runtime<R>(f: impl FnOnce(&mut Runtime<RecordingGraphics>) -> R) -> R {
    f(&mut headless_runtime().lock())
}

/// The exported invocation entry point over the headless runtime.
///
/// `name`/`name_len` is the function name as UTF-8 bytes (no terminator);
/// the remaining parameters are as for [`invoke`]. Returns a
/// [`CallStatus`] discriminant.
///
/// # Safety
///
/// `name` must be valid for reads of `name_len` bytes; `data`, `data_len`,
/// `out` and `out_len` as for [`invoke`].
#[no_mangle]
pub unsafe extern "C" fn extray_call(
    name: *const u8,
    name_len: usize,
    data: *const u8,
    data_len: usize,
    out: *mut *mut u8,
    out_len: *mut usize,
) -> i32 {
    write_result(out, out_len, None);
    if name.is_null() {
        return CallStatus::UnknownFunction as i32;
    }
    let name_bytes = std::slice::from_raw_parts(name, name_len);
    let Ok(name) = std::str::from_utf8(name_bytes) else {
        return CallStatus::UnknownFunction as i32;
    };
    let mut runtime = headless_runtime().lock();
    invoke(&BUILTINS, &mut runtime, name, data, data_len, out, out_len) as i32
}
