//! Shader stage compilation.
//!
//! A [`ShaderStage`] wraps one compiled GL shader object tagged with its
//! pipeline stage. Compilation never fails construction: a stage that the
//! driver rejects is still returned, carrying its failed status and the
//! driver's info log, so that a later link attempt produces one unified
//! diagnostic trail instead of aborting halfway through.

/// The pipeline stage a shader object is compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageKind {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEval,
    Compute,
}

impl StageKind {
    /// The matching `glow` shader-type constant.
    pub const fn gl_const(self) -> u32 {
        match self {
            StageKind::Vertex => glow::VERTEX_SHADER,
            StageKind::Fragment => glow::FRAGMENT_SHADER,
            StageKind::Geometry => glow::GEOMETRY_SHADER,
            StageKind::TessControl => glow::TESS_CONTROL_SHADER,
            StageKind::TessEval => glow::TESS_EVALUATION_SHADER,
            StageKind::Compute => glow::COMPUTE_SHADER,
        }
    }
}

impl std::fmt::Display for StageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StageKind::Vertex => "vertex",
            StageKind::Fragment => "fragment",
            StageKind::Geometry => "geometry",
            StageKind::TessControl => "tessellation control",
            StageKind::TessEval => "tessellation evaluation",
            StageKind::Compute => "compute",
        };
        f.write_str(name)
    }
}

/// One compiled GL shader object, owned exclusively until a program links it.
///
/// The handle is read-only after construction. `None` means the driver
/// refused to even allocate the shader object; that case is folded into the
/// failed-compile state.
#[derive(Debug)]
pub struct ShaderStage {
    shader: Option<glow::Shader>,
    kind: StageKind,
    compiled: bool,
    info_log: String,
}

impl ShaderStage {
    /// Submits `source` to the GL compiler tagged as `kind`.
    ///
    /// Always returns a constructed stage, even when compilation fails.
    /// Failure emits an error diagnostic carrying the driver's info log;
    /// success emits nothing. Check [`is_compiled`](Self::is_compiled)
    /// rather than expecting a `Result`.
    #[allow(unsafe_code)]
    pub fn compile(gl: &glow::Context, source: &str, kind: StageKind) -> Self {
        use glow::HasContext;

        // SAFETY: glow wraps raw GL calls as unsafe. We pass a valid
        // shader-type constant and a valid source string; the handle is
        // only used with this context.
        let shader = match unsafe { gl.create_shader(kind.gl_const()) } {
            Ok(shader) => shader,
            Err(reason) => {
                tracing::error!("failed to create {kind} shader object: {reason}");
                return Self {
                    shader: None,
                    kind,
                    compiled: false,
                    info_log: reason,
                };
            }
        };

        unsafe {
            gl.shader_source(shader, source);
            gl.compile_shader(shader);
        }

        let compiled = unsafe { gl.get_shader_compile_status(shader) };
        let info_log = if compiled {
            String::new()
        } else {
            unsafe { gl.get_shader_info_log(shader) }
        };

        if !compiled {
            tracing::error!("failed to compile {kind} shader: {info_log}");
        }

        Self {
            shader: Some(shader),
            kind,
            compiled,
            info_log,
        }
    }

    /// The GL shader handle, or `None` if the object could not be created.
    pub fn handle(&self) -> Option<glow::Shader> {
        self.shader
    }

    /// The pipeline stage this shader was compiled for.
    pub fn kind(&self) -> StageKind {
        self.kind
    }

    /// Whether the driver reported a successful compile.
    pub fn is_compiled(&self) -> bool {
        self.compiled
    }

    /// The driver's info log from a failed compile; empty on success.
    pub fn info_log(&self) -> &str {
        &self.info_log
    }

    /// Deletes the GL shader object.
    ///
    /// Only needed for stages that are never handed to a program; linking
    /// releases stage objects itself.
    #[allow(unsafe_code)]
    pub fn destroy(&self, gl: &glow::Context) {
        use glow::HasContext;

        if let Some(shader) = self.shader {
            // SAFETY: shader is a valid handle created in compile().
            unsafe { gl.delete_shader(shader) };
        }
    }
}
