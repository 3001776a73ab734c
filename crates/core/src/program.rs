//! Linked shader programs and their uniform surface.
//!
//! [`ShaderProgram::link`] consumes a set of compiled stages and never
//! fails: a program that the driver refuses to link is still returned in a
//! linked-but-failed state, with the failure queryable and reported through
//! the diagnostics sink. Uniforms are registered by name and updated
//! through a single tagged-value entry point that stages the data CPU-side
//! before issuing the matching GL upload call.

use crate::error::ShaderError;
use crate::stage::ShaderStage;
use crate::uniform::{UniformBinding, UniformTable, UniformType, UniformValue};

/// A linked GL program plus its name-keyed uniform bindings.
///
/// The `name` is diagnostic-only; it appears in link and lookup failure
/// reports but is never used as a lookup key. The GL program handle is
/// released via [`destroy`](Self::destroy) at the caller's discretion.
#[derive(Debug)]
pub struct ShaderProgram {
    program: Option<glow::Program>,
    name: String,
    linked: bool,
    info_log: String,
    uniforms: UniformTable,
}

impl ShaderProgram {
    /// Creates a program object, attaches every stage, and links.
    ///
    /// Construction is total: on link failure an error diagnostic carrying
    /// `name` and the driver's info log is emitted and the program is
    /// returned in a failed state; on success a single info diagnostic is
    /// emitted. Check [`is_linked`](Self::is_linked) before rendering.
    ///
    /// The stages are consumed: after linking their GL objects are detached
    /// and deleted, whether or not the link succeeded. Stages are not
    /// reusable across programs.
    #[allow(unsafe_code)]
    pub fn link(gl: &glow::Context, stages: Vec<ShaderStage>, name: impl Into<String>) -> Self {
        use glow::HasContext;

        let name = name.into();

        // SAFETY: glow wraps raw GL calls as unsafe. All handles passed
        // below were created on this context and are deleted exactly once.
        let (program, linked, info_log) = match unsafe { gl.create_program() } {
            Ok(program) => {
                unsafe {
                    for stage in &stages {
                        if let Some(shader) = stage.handle() {
                            gl.attach_shader(program, shader);
                        }
                    }
                    gl.link_program(program);
                }

                let linked = unsafe { gl.get_program_link_status(program) };
                let info_log = if linked {
                    String::new()
                } else {
                    unsafe { gl.get_program_info_log(program) }
                };

                // The program retains its own copies of the linked stages;
                // release the stage objects here.
                unsafe {
                    for stage in &stages {
                        if let Some(shader) = stage.handle() {
                            gl.detach_shader(program, shader);
                            gl.delete_shader(shader);
                        }
                    }
                }

                (Some(program), linked, info_log)
            }
            Err(reason) => {
                unsafe {
                    for stage in &stages {
                        if let Some(shader) = stage.handle() {
                            gl.delete_shader(shader);
                        }
                    }
                }
                (None, false, reason)
            }
        };

        if linked {
            tracing::info!("shader program \"{name}\" linked successfully");
        } else {
            tracing::error!("failed to link shader program \"{name}\": {info_log}");
        }

        Self {
            program,
            name,
            linked,
            info_log,
            uniforms: UniformTable::new(),
        }
    }

    /// Resolves `name` in the linked program and registers a binding for it.
    ///
    /// If the name does not resolve (usually a mismatch between the caller
    /// and the GLSL source) an error diagnostic is emitted but registration
    /// still completes with an inert location, so later updates are no-ops
    /// on the GL side rather than faults. Registering a name twice replaces
    /// the prior binding.
    #[allow(unsafe_code)]
    pub fn register_uniform(&mut self, gl: &glow::Context, ty: UniformType, name: &str) {
        use glow::HasContext;

        // SAFETY: the program handle is valid on this context; glow copies
        // the name string for the location query.
        let location = self
            .program
            .and_then(|program| unsafe { gl.get_uniform_location(program, name) });

        if location.is_none() {
            tracing::error!(
                "uniform \"{name}\" not found in program \"{}\": check the variable \
                 name against the GLSL source that declares it",
                self.name
            );
        }

        self.uniforms.insert(name, UniformBinding::new(location, ty));
    }

    /// Makes this the active program for subsequent draw calls. Idempotent.
    #[allow(unsafe_code)]
    pub fn activate(&self, gl: &glow::Context) {
        use glow::HasContext;

        if let Some(program) = self.program {
            // SAFETY: program is a valid handle created in link().
            unsafe { gl.use_program(Some(program)) };
        }
    }

    /// Stages `value` for the registered uniform `name` and uploads it.
    ///
    /// The components are transcribed into the binding's staging buffer
    /// first; the GL upload then reads from that buffer, passing any matrix
    /// `transpose` flag through verbatim. A binding whose location did not
    /// resolve transcribes but skips the GL call.
    ///
    /// # Errors
    ///
    /// Returns [`ShaderError::UnknownUniform`] if `name` was never
    /// registered (fail-fast: this is a caller/shader contract mismatch),
    /// or [`ShaderError::UniformTypeMismatch`] if the value's shape does
    /// not match the registered type. Neither failure touches any staging
    /// buffer.
    pub fn set_uniform(
        &mut self,
        gl: &glow::Context,
        name: &str,
        value: UniformValue,
    ) -> Result<(), ShaderError> {
        self.transcribe(name, &value)?;
        if let Some(binding) = self.uniforms.get(name) {
            binding.upload(gl, value.transpose());
        }
        Ok(())
    }

    /// CPU-side half of [`set_uniform`](Self::set_uniform): lookup plus
    /// staging-buffer transcription, no GL involvement.
    fn transcribe(&mut self, name: &str, value: &UniformValue) -> Result<(), ShaderError> {
        let Some(binding) = self.uniforms.get_mut(name) else {
            return Err(ShaderError::UnknownUniform {
                program: self.name.clone(),
                name: name.to_owned(),
            });
        };
        binding.store(name, value)
    }

    /// The program's diagnostic name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The GL program handle, or `None` if the object could not be created.
    pub fn handle(&self) -> Option<glow::Program> {
        self.program
    }

    /// Whether the driver reported a successful link.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// The driver's info log from a failed link; empty on success.
    pub fn info_log(&self) -> &str {
        &self.info_log
    }

    /// Looks up the binding registered under `name`.
    pub fn uniform(&self, name: &str) -> Option<&UniformBinding> {
        self.uniforms.get(name)
    }

    /// Returns whether a uniform is registered under `name`.
    pub fn has_uniform(&self, name: &str) -> bool {
        self.uniforms.contains(name)
    }

    /// Number of registered uniforms.
    pub fn uniform_count(&self) -> usize {
        self.uniforms.len()
    }

    /// Deletes the GL program object.
    ///
    /// Deterministic cleanup is the caller's responsibility; the program
    /// has no drop glue for its GL resources.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        if let Some(program) = self.program {
            // SAFETY: program is a valid handle created in link().
            unsafe { gl.delete_program(program) };
        }
    }
}
