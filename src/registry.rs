//! Name-to-function dispatch.

use std::collections::HashMap;

use log::trace;

use crate::backend::Graphics;
use crate::error::{Error, Result};
use crate::functions;
use crate::outbuf::OutBuf;
use crate::runtime::Runtime;

/// The fixed signature every extension function shares: one opaque
/// argument buffer in, one optional owned result buffer out.
pub type ExtensionFn<B> = fn(&mut Runtime<B>, &[u8]) -> Result<Option<OutBuf>>;

/// Maps function names to extension functions and invokes them.
///
/// The host resolves every call by name; the registry is the only place a
/// name means anything. [`with_builtins`](Self::with_builtins) pre-registers
/// the whole reference module; [`register`](Self::register) adds (or
/// replaces) a function under a name.
///
/// ```
/// use ext_ray_rs::prelude::*;
/// use ext_ray_rs::backend::recording::RecordingGraphics;
///
/// let registry = Registry::with_builtins();
/// let mut runtime = Runtime::new(RecordingGraphics::new());
///
/// let mut args = ArgWriter::new();
/// args.push_i32(800).push_i32(600).push_cstring("demo");
/// registry.call(&mut runtime, "initwindow", args.as_bytes()).unwrap();
/// assert!(runtime.window_open());
/// ```
pub struct Registry<B: Graphics> {
    functions: HashMap<&'static str, ExtensionFn<B>>,
}

impl<B: Graphics> Default for Registry<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Graphics> Registry<B> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            functions: HashMap::new(),
        }
    }

    /// Creates a registry holding the reference extension module under its
    /// wire names.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, function) in functions::builtins::<B>() {
            registry.register(name, function);
        }
        registry
    }

    /// Registers `function` under `name`, replacing any previous
    /// registration.
    pub fn register(&mut self, name: &'static str, function: ExtensionFn<B>) -> &mut Self {
        self.functions.insert(name, function);
        self
    }

    /// Whether a function is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Number of registered functions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Resolves `name` and invokes the function with `args`.
    ///
    /// One call is one atomic request-response exchange: on error, nothing
    /// observable by other invocations has changed and nothing is retried.
    ///
    /// # Errors
    ///
    /// [`Error::UnknownFunction`] if no function is registered under
    /// `name`; otherwise whatever the function itself returns.
    pub fn call(
        &self,
        runtime: &mut Runtime<B>,
        name: &str,
        args: &[u8],
    ) -> Result<Option<OutBuf>> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| Error::UnknownFunction(name.to_owned()))?;
        trace!("dispatch {name} ({} byte args)", args.len());
        function(runtime, args)
    }
}
