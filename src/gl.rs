//! A narrow interface over the GLES2 surface the renderer uses.
//!
//! All mutable pipeline state (bound objects, enable flags, blend and
//! stencil configuration) lives behind [`GlContext`]; the context value
//! threaded through every operation is the single place that state can
//! change. Two implementations exist: [`glow_backend::GlowContext`] drives a
//! real GL context, and [`recording::RecordingContext`] is a software double
//! that simulates the GL state machine and records every call so the draw
//! algorithms can be tested without a GPU.

pub mod glow_backend;
pub mod recording;

use thiserror::Error;

use crate::geometry::Color;
use crate::matrix::Mat3;
use crate::texture::TextureTarget;

/// A raw GL object name. `0` is reserved: for framebuffers it addresses the
/// platform-provided default target, for everything else it never occurs.
macro_rules! object_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub struct $name(pub u32);
    };
}

object_id!(ShaderId);
object_id!(ProgramId);
object_id!(TextureId);
object_id!(RenderbufferId);
object_id!(BufferId);
object_id!(
    /// A framebuffer object name. `FramebufferId(0)` addresses the
    /// platform-presented default target.
    FramebufferId
);

impl FramebufferId {
    pub const DEFAULT: Self = Self(0);
}

/// A resolved uniform location within a linked program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// A resolved vertex attribute index within a linked program.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AttribLocation(pub u32);

/// An error reported by the graphics context itself.
#[derive(Clone, Debug, Error)]
#[error("{0}")]
pub struct GlError(pub String);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Capability {
    Blend,
    ScissorTest,
    StencilTest,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlendFactor {
    One,
    SrcAlpha,
    OneMinusSrcAlpha,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StencilFunc {
    Always,
    NotEqual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StencilOp {
    Keep,
    Replace,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BufferUsage {
    StaticDraw,
    StreamDraw,
}

/// Identification strings reported by the driver, logged once at renderer
/// creation.
#[derive(Clone, Debug, Default)]
pub struct DriverInfo {
    pub version: String,
    pub vendor: String,
    pub renderer: String,
}

/// The GLES2 operations the renderer needs, and nothing else.
///
/// Methods mirror their GL counterparts closely enough that the glow-backed
/// implementation is a thin translation, while staying typed enough that the
/// recording double can simulate them. Object creation returns `Err` only
/// when the context itself refuses (lost context); this is surfaced as a
/// fatal [`crate::RenderError`] during construction and logged as advisory
/// during per-frame buffer management.
pub trait GlContext {
    // Context-wide queries.
    fn driver_info(&self) -> DriverInfo;
    fn supports_external_textures(&self) -> bool;
    /// The raw id of the currently bound framebuffer, as reported by the
    /// driver. Negative values indicate a broken context.
    fn current_framebuffer_binding(&self) -> i32;

    // Global pipeline state.
    fn enable(&self, cap: Capability);
    fn disable(&self, cap: Capability);
    fn blend_func(&self, src: BlendFactor, dst: BlendFactor);
    fn viewport(&self, x: i32, y: i32, width: i32, height: i32);
    fn scissor(&self, x: i32, y: i32, width: i32, height: i32);
    fn clear_color(&self, color: Color);
    fn clear_stencil(&self, value: i32);
    /// Clear the selected buffers of the bound framebuffer.
    fn clear(&self, color: bool, stencil: bool);
    fn color_mask(&self, r: bool, g: bool, b: bool, a: bool);
    fn stencil_func(&self, func: StencilFunc, reference: i32, mask: u32);
    fn stencil_op(&self, on_fail: StencilOp, on_depth_fail: StencilOp, on_pass: StencilOp);

    // Shaders and programs.
    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<ShaderId, GlError>;
    fn delete_shader(&self, shader: ShaderId);
    fn link_program(&self, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId, GlError>;
    fn delete_program(&self, program: ProgramId);
    fn use_program(&self, program: Option<ProgramId>);
    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation>;
    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<AttribLocation>;

    // Uniform upload. A `None` location is silently ignored, matching the GL
    // semantics for location -1; absent uniforms must never be an error at
    // draw time.
    fn uniform_1i(&self, location: Option<UniformLocation>, x: i32);
    fn uniform_1f(&self, location: Option<UniformLocation>, x: f32);
    fn uniform_2f(&self, location: Option<UniformLocation>, x: f32, y: f32);
    fn uniform_4f(&self, location: Option<UniformLocation>, x: f32, y: f32, z: f32, w: f32);
    /// Upload a matrix that has already been transposed to column-major;
    /// GLES2 forbids asking the driver to transpose.
    fn uniform_matrix_3f(&self, location: Option<UniformLocation>, matrix: &Mat3);

    // Textures.
    fn create_texture(&self) -> Result<TextureId, GlError>;
    fn delete_texture(&self, texture: TextureId);
    fn active_texture(&self, unit: u32);
    fn bind_texture(&self, target: TextureTarget, texture: Option<TextureId>);
    /// Allocate uninitialized RGBA8 storage for the bound 2D texture.
    fn alloc_rgba_storage(&self, width: i32, height: i32);
    fn tex_min_filter_linear(&self, target: TextureTarget);
    fn tex_mag_filter_linear(&self, target: TextureTarget);

    // Renderbuffers.
    fn create_renderbuffer(&self) -> Result<RenderbufferId, GlError>;
    fn delete_renderbuffer(&self, renderbuffer: RenderbufferId);
    fn bind_renderbuffer(&self, renderbuffer: Option<RenderbufferId>);
    /// Allocate `STENCIL_INDEX8` storage for the bound renderbuffer.
    fn renderbuffer_stencil_storage(&self, width: i32, height: i32);
    /// Attach a stencil renderbuffer to the currently bound framebuffer.
    fn attach_stencil_renderbuffer(&self, renderbuffer: RenderbufferId);

    // Framebuffers.
    fn create_framebuffer(&self) -> Result<FramebufferId, GlError>;
    fn delete_framebuffer(&self, framebuffer: FramebufferId);
    fn bind_framebuffer(&self, framebuffer: FramebufferId);
    /// Attach a color texture to the currently bound framebuffer.
    fn attach_color_texture(&self, texture: TextureId);
    fn framebuffer_complete(&self) -> bool;

    // Vertex data.
    fn create_buffer(&self) -> Result<BufferId, GlError>;
    fn delete_buffer(&self, buffer: BufferId);
    fn bind_array_buffer(&self, buffer: Option<BufferId>);
    fn array_buffer_data(&self, data: &[f32], usage: BufferUsage);
    /// Point the attribute at tightly packed `f32` pairs in the bound array
    /// buffer.
    fn vertex_attrib_pointer(&self, attrib: AttribLocation, components: i32);
    fn enable_vertex_attrib_array(&self, attrib: AttribLocation);
    fn disable_vertex_attrib_array(&self, attrib: AttribLocation);
    fn draw_triangle_strip(&self, vertices: i32);
}
