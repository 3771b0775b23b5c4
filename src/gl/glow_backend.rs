//! [`GlContext`] implementation over a real GL context via `glow`.
//!
//! Every method is a thin translation to the corresponding GL entry point;
//! the unsafe surface of `glow` is contained here. The context must be
//! current on the calling thread for the lifetime of this value.

use std::num::NonZeroU32;

use glow::{HasContext, PixelUnpackData};

use crate::geometry::Color;
use crate::matrix::Mat3;
use crate::texture::TextureTarget;

use super::{
    AttribLocation, BlendFactor, BufferId, BufferUsage, Capability, DriverInfo, FramebufferId,
    GlContext, GlError, ProgramId, RenderbufferId, ShaderId, ShaderStage, StencilFunc, StencilOp,
    TextureId, UniformLocation,
};

/// Sampling target for EGLImage-backed external textures; not exported by
/// `glow`.
const TEXTURE_EXTERNAL_OES: u32 = 0x8D65;

pub struct GlowContext {
    gl: glow::Context,
    info: DriverInfo,
    external_textures: bool,
}

impl GlowContext {
    /// Wrap a `glow` context.
    ///
    /// # Safety
    ///
    /// The context must be current on this thread and stay current for every
    /// call made through the returned value.
    pub unsafe fn new(gl: glow::Context) -> Self {
        let (info, external_textures) = unsafe {
            let info = DriverInfo {
                version: gl.get_parameter_string(glow::VERSION),
                vendor: gl.get_parameter_string(glow::VENDOR),
                renderer: gl.get_parameter_string(glow::RENDERER),
            };
            let external = gl
                .supported_extensions()
                .contains("GL_OES_EGL_image_external");
            (info, external)
        };
        Self {
            gl,
            info,
            external_textures,
        }
    }

    pub fn context(&self) -> &glow::Context {
        &self.gl
    }

    pub fn into_inner(self) -> glow::Context {
        self.gl
    }
}

fn target_raw(target: TextureTarget) -> u32 {
    match target {
        TextureTarget::Texture2d => glow::TEXTURE_2D,
        TextureTarget::External => TEXTURE_EXTERNAL_OES,
    }
}

fn capability_raw(cap: Capability) -> u32 {
    match cap {
        Capability::Blend => glow::BLEND,
        Capability::ScissorTest => glow::SCISSOR_TEST,
        Capability::StencilTest => glow::STENCIL_TEST,
    }
}

fn blend_factor_raw(factor: BlendFactor) -> u32 {
    match factor {
        BlendFactor::One => glow::ONE,
        BlendFactor::SrcAlpha => glow::SRC_ALPHA,
        BlendFactor::OneMinusSrcAlpha => glow::ONE_MINUS_SRC_ALPHA,
    }
}

fn stencil_func_raw(func: StencilFunc) -> u32 {
    match func {
        StencilFunc::Always => glow::ALWAYS,
        StencilFunc::NotEqual => glow::NOTEQUAL,
    }
}

fn stencil_op_raw(op: StencilOp) -> u32 {
    match op {
        StencilOp::Keep => glow::KEEP,
        StencilOp::Replace => glow::REPLACE,
    }
}

fn texture_native(id: TextureId) -> Option<glow::Texture> {
    NonZeroU32::new(id.0).map(glow::NativeTexture)
}

fn framebuffer_native(id: FramebufferId) -> Option<glow::Framebuffer> {
    NonZeroU32::new(id.0).map(glow::NativeFramebuffer)
}

fn renderbuffer_native(id: RenderbufferId) -> Option<glow::Renderbuffer> {
    NonZeroU32::new(id.0).map(glow::NativeRenderbuffer)
}

fn buffer_native(id: BufferId) -> Option<glow::Buffer> {
    NonZeroU32::new(id.0).map(glow::NativeBuffer)
}

fn shader_native(id: ShaderId) -> glow::Shader {
    glow::NativeShader(NonZeroU32::new(id.0).expect("shader ids are never zero"))
}

fn program_native(id: ProgramId) -> glow::Program {
    glow::NativeProgram(NonZeroU32::new(id.0).expect("program ids are never zero"))
}

fn uniform_native(location: Option<UniformLocation>) -> Option<glow::UniformLocation> {
    location.map(|l| glow::NativeUniformLocation(l.0))
}

impl GlContext for GlowContext {
    fn driver_info(&self) -> DriverInfo {
        self.info.clone()
    }

    fn supports_external_textures(&self) -> bool {
        self.external_textures
    }

    fn current_framebuffer_binding(&self) -> i32 {
        unsafe { self.gl.get_parameter_i32(glow::FRAMEBUFFER_BINDING) }
    }

    fn enable(&self, cap: Capability) {
        unsafe { self.gl.enable(capability_raw(cap)) }
    }

    fn disable(&self, cap: Capability) {
        unsafe { self.gl.disable(capability_raw(cap)) }
    }

    fn blend_func(&self, src: BlendFactor, dst: BlendFactor) {
        unsafe {
            self.gl
                .blend_func(blend_factor_raw(src), blend_factor_raw(dst))
        }
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.viewport(x, y, width, height) }
    }

    fn scissor(&self, x: i32, y: i32, width: i32, height: i32) {
        unsafe { self.gl.scissor(x, y, width, height) }
    }

    fn clear_color(&self, color: Color) {
        unsafe { self.gl.clear_color(color.r, color.g, color.b, color.a) }
    }

    fn clear_stencil(&self, value: i32) {
        unsafe { self.gl.clear_stencil(value) }
    }

    fn clear(&self, color: bool, stencil: bool) {
        let mut mask = 0;
        if color {
            mask |= glow::COLOR_BUFFER_BIT;
        }
        if stencil {
            mask |= glow::STENCIL_BUFFER_BIT;
        }
        unsafe { self.gl.clear(mask) }
    }

    fn color_mask(&self, r: bool, g: bool, b: bool, a: bool) {
        unsafe { self.gl.color_mask(r, g, b, a) }
    }

    fn stencil_func(&self, func: StencilFunc, reference: i32, mask: u32) {
        unsafe {
            self.gl
                .stencil_func(stencil_func_raw(func), reference, mask)
        }
    }

    fn stencil_op(&self, on_fail: StencilOp, on_depth_fail: StencilOp, on_pass: StencilOp) {
        unsafe {
            self.gl.stencil_op(
                stencil_op_raw(on_fail),
                stencil_op_raw(on_depth_fail),
                stencil_op_raw(on_pass),
            )
        }
    }

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<ShaderId, GlError> {
        let raw_stage = match stage {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        };
        unsafe {
            let shader = self.gl.create_shader(raw_stage).map_err(GlError)?;
            self.gl.shader_source(shader, source);
            self.gl.compile_shader(shader);
            if !self.gl.get_shader_compile_status(shader) {
                let log = self.gl.get_shader_info_log(shader);
                self.gl.delete_shader(shader);
                return Err(GlError(log));
            }
            Ok(ShaderId(shader.0.get()))
        }
    }

    fn delete_shader(&self, shader: ShaderId) {
        unsafe { self.gl.delete_shader(shader_native(shader)) }
    }

    fn link_program(&self, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId, GlError> {
        unsafe {
            let program = self.gl.create_program().map_err(GlError)?;
            let vert = shader_native(vertex);
            let frag = shader_native(fragment);
            self.gl.attach_shader(program, vert);
            self.gl.attach_shader(program, frag);
            self.gl.link_program(program);
            self.gl.detach_shader(program, vert);
            self.gl.detach_shader(program, frag);
            if !self.gl.get_program_link_status(program) {
                let log = self.gl.get_program_info_log(program);
                self.gl.delete_program(program);
                return Err(GlError(log));
            }
            Ok(ProgramId(program.0.get()))
        }
    }

    fn delete_program(&self, program: ProgramId) {
        unsafe { self.gl.delete_program(program_native(program)) }
    }

    fn use_program(&self, program: Option<ProgramId>) {
        unsafe { self.gl.use_program(program.map(program_native)) }
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        unsafe {
            self.gl
                .get_uniform_location(program_native(program), name)
                .map(|l| UniformLocation(l.0))
        }
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<AttribLocation> {
        unsafe {
            self.gl
                .get_attrib_location(program_native(program), name)
                .map(AttribLocation)
        }
    }

    fn uniform_1i(&self, location: Option<UniformLocation>, x: i32) {
        unsafe { self.gl.uniform_1_i32(uniform_native(location).as_ref(), x) }
    }

    fn uniform_1f(&self, location: Option<UniformLocation>, x: f32) {
        unsafe { self.gl.uniform_1_f32(uniform_native(location).as_ref(), x) }
    }

    fn uniform_2f(&self, location: Option<UniformLocation>, x: f32, y: f32) {
        unsafe {
            self.gl
                .uniform_2_f32(uniform_native(location).as_ref(), x, y)
        }
    }

    fn uniform_4f(&self, location: Option<UniformLocation>, x: f32, y: f32, z: f32, w: f32) {
        unsafe {
            self.gl
                .uniform_4_f32(uniform_native(location).as_ref(), x, y, z, w)
        }
    }

    fn uniform_matrix_3f(&self, location: Option<UniformLocation>, matrix: &Mat3) {
        // The caller pre-transposes; GLES2 requires transpose = false here.
        unsafe {
            self.gl
                .uniform_matrix_3_f32_slice(uniform_native(location).as_ref(), false, &matrix.0)
        }
    }

    fn create_texture(&self) -> Result<TextureId, GlError> {
        unsafe {
            self.gl
                .create_texture()
                .map(|t| TextureId(t.0.get()))
                .map_err(GlError)
        }
    }

    fn delete_texture(&self, texture: TextureId) {
        if let Some(native) = texture_native(texture) {
            unsafe { self.gl.delete_texture(native) }
        }
    }

    fn active_texture(&self, unit: u32) {
        unsafe { self.gl.active_texture(glow::TEXTURE0 + unit) }
    }

    fn bind_texture(&self, target: TextureTarget, texture: Option<TextureId>) {
        unsafe {
            self.gl
                .bind_texture(target_raw(target), texture.and_then(texture_native))
        }
    }

    fn alloc_rgba_storage(&self, width: i32, height: i32) {
        unsafe {
            self.gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA as i32,
                width,
                height,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(None),
            )
        }
    }

    fn tex_min_filter_linear(&self, target: TextureTarget) {
        unsafe {
            self.gl.tex_parameter_i32(
                target_raw(target),
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            )
        }
    }

    fn tex_mag_filter_linear(&self, target: TextureTarget) {
        unsafe {
            self.gl.tex_parameter_i32(
                target_raw(target),
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            )
        }
    }

    fn create_renderbuffer(&self) -> Result<RenderbufferId, GlError> {
        unsafe {
            self.gl
                .create_renderbuffer()
                .map(|r| RenderbufferId(r.0.get()))
                .map_err(GlError)
        }
    }

    fn delete_renderbuffer(&self, renderbuffer: RenderbufferId) {
        if let Some(native) = renderbuffer_native(renderbuffer) {
            unsafe { self.gl.delete_renderbuffer(native) }
        }
    }

    fn bind_renderbuffer(&self, renderbuffer: Option<RenderbufferId>) {
        unsafe {
            self.gl.bind_renderbuffer(
                glow::RENDERBUFFER,
                renderbuffer.and_then(renderbuffer_native),
            )
        }
    }

    fn renderbuffer_stencil_storage(&self, width: i32, height: i32) {
        unsafe {
            self.gl
                .renderbuffer_storage(glow::RENDERBUFFER, glow::STENCIL_INDEX8, width, height)
        }
    }

    fn attach_stencil_renderbuffer(&self, renderbuffer: RenderbufferId) {
        unsafe {
            self.gl.framebuffer_renderbuffer(
                glow::FRAMEBUFFER,
                glow::STENCIL_ATTACHMENT,
                glow::RENDERBUFFER,
                renderbuffer_native(renderbuffer),
            )
        }
    }

    fn create_framebuffer(&self) -> Result<FramebufferId, GlError> {
        unsafe {
            self.gl
                .create_framebuffer()
                .map(|f| FramebufferId(f.0.get()))
                .map_err(GlError)
        }
    }

    fn delete_framebuffer(&self, framebuffer: FramebufferId) {
        if let Some(native) = framebuffer_native(framebuffer) {
            unsafe { self.gl.delete_framebuffer(native) }
        }
    }

    fn bind_framebuffer(&self, framebuffer: FramebufferId) {
        unsafe {
            self.gl
                .bind_framebuffer(glow::FRAMEBUFFER, framebuffer_native(framebuffer))
        }
    }

    fn attach_color_texture(&self, texture: TextureId) {
        unsafe {
            self.gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                texture_native(texture),
                0,
            )
        }
    }

    fn framebuffer_complete(&self) -> bool {
        unsafe { self.gl.check_framebuffer_status(glow::FRAMEBUFFER) == glow::FRAMEBUFFER_COMPLETE }
    }

    fn create_buffer(&self) -> Result<BufferId, GlError> {
        unsafe {
            self.gl
                .create_buffer()
                .map(|b| BufferId(b.0.get()))
                .map_err(GlError)
        }
    }

    fn delete_buffer(&self, buffer: BufferId) {
        if let Some(native) = buffer_native(buffer) {
            unsafe { self.gl.delete_buffer(native) }
        }
    }

    fn bind_array_buffer(&self, buffer: Option<BufferId>) {
        unsafe {
            self.gl
                .bind_buffer(glow::ARRAY_BUFFER, buffer.and_then(buffer_native))
        }
    }

    fn array_buffer_data(&self, data: &[f32], usage: BufferUsage) {
        let raw_usage = match usage {
            BufferUsage::StaticDraw => glow::STATIC_DRAW,
            BufferUsage::StreamDraw => glow::STREAM_DRAW,
        };
        unsafe {
            self.gl
                .buffer_data_u8_slice(glow::ARRAY_BUFFER, bytemuck::cast_slice(data), raw_usage)
        }
    }

    fn vertex_attrib_pointer(&self, attrib: AttribLocation, components: i32) {
        unsafe {
            self.gl
                .vertex_attrib_pointer_f32(attrib.0, components, glow::FLOAT, false, 0, 0)
        }
    }

    fn enable_vertex_attrib_array(&self, attrib: AttribLocation) {
        unsafe { self.gl.enable_vertex_attrib_array(attrib.0) }
    }

    fn disable_vertex_attrib_array(&self, attrib: AttribLocation) {
        unsafe { self.gl.disable_vertex_attrib_array(attrib.0) }
    }

    fn draw_triangle_strip(&self, vertices: i32) {
        unsafe { self.gl.draw_arrays(glow::TRIANGLE_STRIP, 0, vertices) }
    }
}
