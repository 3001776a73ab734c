#![deny(unsafe_code)]
//! CPU-side shader program and uniform management over OpenGL / WebGL2.
//!
//! Compiles GLSL stages ([`ShaderStage`]), links them into programs
//! ([`ShaderProgram`]), and mirrors named uniform values through
//! fixed-capacity CPU staging buffers before each GPU upload. Compile and
//! link failures never abort construction; they are reported through the
//! `tracing` sink and left queryable on the returned object. Installing a
//! subscriber for that sink is the embedding application's concern.
//!
//! All GL access goes through a caller-provided [`glow::Context`], and
//! every operation must run on the thread that owns that context.

pub mod error;
pub mod loader;
pub mod program;
pub mod stage;
pub mod uniform;

pub use error::ShaderError;
pub use loader::SourceLoader;
pub use program::ShaderProgram;
pub use stage::{ShaderStage, StageKind};
pub use uniform::{Staging, UniformBinding, UniformTable, UniformType, UniformValue};
