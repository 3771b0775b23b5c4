//! The effects renderer: frame orchestration and the primitive draw
//! algorithms.
//!
//! The compositor's scene walker drives this once per output refresh:
//! [`FxRenderer::begin`] provisions display-sized buffers and the frame
//! projection, one draw call is issued per visible item, and
//! [`FxRenderer::end`] releases transient buffers and hands the platform
//! framebuffer back. Everything is immediate-mode and single-threaded on
//! the thread owning the graphics context; draws execute in call order.
//!
//! Shared draw-call contract: a zero-area destination box is a successful
//! no-op that touches no GL state; negative dimensions are a caller bug and
//! panic; blending is switched off for fully opaque primitives purely to
//! cut overdraw cost.

pub mod framebuffer;
pub(crate) mod program;
pub(crate) mod shaders;

use crate::error::RenderError;
use crate::geometry::{Color, Output, OutputTransform, Rect, SrcRect};
use crate::gl::{
    AttribLocation, BlendFactor, BufferId, BufferUsage, Capability, FramebufferId, GlContext,
    StencilFunc, StencilOp,
};
use crate::matrix::Mat3;
use crate::texture::{FxTexture, TextureTarget};

use framebuffer::{Framebuffer, StencilBuffer};
use program::ShaderSet;

/// Unit quad as a triangle strip; doubles as the blur pass texcoords.
const VERTS: [f32; 8] = [
    1.0, 0.0, // top right
    0.0, 0.0, // top left
    1.0, 1.0, // bottom right
    0.0, 1.0, // bottom left
];

/// Which corner a primitive applies to.
///
/// The rounded-rect primitive accepts `All`, `TopLeft` and `TopRight`;
/// handing it a bottom corner is a contract violation. The border-corner
/// primitive requires exactly one specific corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerLocation {
    All,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Which of the two blur programs a pass runs: the caller alternates
/// `Down`/`Up` across the ping-pong buffers to build up a multi-iteration
/// blur.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlurPass {
    Down,
    Up,
}

/// Per-draw decoration parameters for textured quads. All values arrive
/// pre-validated from the configuration layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecorationData {
    /// Overall opacity in `0.0..=1.0`.
    pub alpha: f32,
    /// Strength of the inactive-window dim in `0.0..=1.0`.
    pub dim: f32,
    pub dim_color: Color,
    /// Corner rounding radius in pixels; `0` disables the mask.
    pub corner_radius: i32,
    /// `1.0` leaves colors untouched, `0.0` is fully grayscale.
    pub saturation: f32,
    /// Whether a titlebar sits above this surface, keeping its top corners
    /// square.
    pub has_titlebar: bool,
}

impl Default for DecorationData {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            dim: 0.0,
            dim_color: Color::BLACK,
            corner_radius: 0,
            saturation: 1.0,
            has_titlebar: false,
        }
    }
}

fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}

/// The per-output effects renderer.
///
/// Owns the fixed shader set, the display-sized buffers (main target, cached
/// blur, and the effects ping-pong pair), and the stencil renderbuffer. One
/// logical frame may be in flight at a time.
pub struct FxRenderer<G: GlContext> {
    gl: G,
    shaders: ShaderSet,
    external_textures: bool,
    projection: Mat3,
    quad_vbo: BufferId,
    texcoord_vbo: BufferId,

    /// Everything composited for the current frame before presentation.
    pub main_buffer: Framebuffer,
    /// Cached result of the optimized blur, reused until marked dirty.
    pub blur_buffer: Framebuffer,
    /// Ping-pong pair the blur passes bounce between.
    pub effects_buffer: Framebuffer,
    pub effects_buffer_swapped: Framebuffer,
    /// Set when the cached blur no longer matches what is on screen; the
    /// renderer sets it on resize, the scene walker sets it on damage and
    /// clears it after regenerating.
    pub blur_buffer_dirty: bool,

    stencil_buffer: StencilBuffer,
    output_fb: Option<FramebufferId>,
    frame_size: (i32, i32),
}

impl<G: GlContext> FxRenderer<G> {
    /// Build the renderer for a context: queries capabilities, links the
    /// fixed shader set, and allocates the shared vertex buffers.
    ///
    /// Construction is all-or-nothing: any compile/link/allocation failure
    /// releases whatever was created and returns a fatal error. The caller
    /// falls back to an effects-less renderer or aborts startup.
    pub fn new(gl: G) -> Result<Self, RenderError> {
        let info = gl.driver_info();
        tracing::info!(
            version = %info.version,
            vendor = %info.vendor,
            renderer = %info.renderer,
            "creating effects renderer"
        );

        let external_textures = gl.supports_external_textures();
        if !external_textures {
            tracing::info!(
                "GL_OES_EGL_image_external unavailable; external textures will be skipped"
            );
        }

        let shaders = ShaderSet::link_all(&gl)?;

        let quad_vbo = match gl.create_buffer() {
            Ok(vbo) => vbo,
            Err(err) => {
                shaders.destroy(&gl);
                return Err(RenderError::ResourceAlloc {
                    kind: "vertex buffer",
                    reason: err.to_string(),
                });
            }
        };
        gl.bind_array_buffer(Some(quad_vbo));
        gl.array_buffer_data(&VERTS, BufferUsage::StaticDraw);

        let texcoord_vbo = match gl.create_buffer() {
            Ok(vbo) => vbo,
            Err(err) => {
                gl.bind_array_buffer(None);
                gl.delete_buffer(quad_vbo);
                shaders.destroy(&gl);
                return Err(RenderError::ResourceAlloc {
                    kind: "vertex buffer",
                    reason: err.to_string(),
                });
            }
        };
        gl.bind_array_buffer(None);

        tracing::info!("effects renderer shaders linked");

        Ok(Self {
            gl,
            shaders,
            external_textures,
            projection: Mat3::IDENTITY,
            quad_vbo,
            texcoord_vbo,
            main_buffer: Framebuffer::unallocated(),
            blur_buffer: Framebuffer::unallocated(),
            effects_buffer: Framebuffer::unallocated(),
            effects_buffer_swapped: Framebuffer::unallocated(),
            blur_buffer_dirty: true,
            stencil_buffer: StencilBuffer::unallocated(),
            output_fb: None,
            frame_size: (0, 0),
        })
    }

    pub fn gl(&self) -> &G {
        &self.gl
    }

    /// Begin a frame for `output`.
    ///
    /// Captures the platform framebuffer binding (a negative id means the
    /// platform never gave us a target and is a fatal misconfiguration),
    /// sizes every display buffer to the output's transformed resolution,
    /// provisions the stencil buffer, and leaves the main buffer bound.
    pub fn begin(&mut self, output: &Output) {
        let (width, height) = output.transformed_resolution();

        let platform_fb = self.gl.current_framebuffer_binding();
        assert!(
            platform_fb >= 0,
            "platform framebuffer binding is invalid ({platform_fb})"
        );
        self.output_fb = Some(FramebufferId(platform_fb as u32));
        self.frame_size = (width, height);

        if self.main_buffer.create(&self.gl, width, height, true) {
            // Resize invalidated whatever the cached blur held.
            self.blur_buffer_dirty = true;
        }
        self.stencil_buffer.ensure(&self.gl, width, height);

        self.effects_buffer.create(&self.gl, width, height, false);
        self.effects_buffer_swapped
            .create(&self.gl, width, height, false);

        // Offscreen targets are sampled y-inverted later, so the frame
        // projection flips the output upside down.
        self.projection = Mat3::projection(width, height, OutputTransform::Flipped180);

        self.gl
            .blend_func(BlendFactor::One, BlendFactor::OneMinusSrcAlpha);

        self.main_buffer.bind(&self.gl, width, height);
    }

    /// End the frame: release the main and stencil buffers and leave the
    /// platform-presented framebuffer as the active target.
    pub fn end(&mut self) {
        let (width, height) = self.frame_size;
        if let Some(fb) = self.output_fb.take() {
            self.gl.bind_framebuffer(fb);
            self.gl.viewport(0, 0, width, height);
        }
        self.main_buffer.release(&self.gl);
        self.stencil_buffer.release(&self.gl);
    }

    /// Clear the bound target's color and stencil together.
    pub fn clear(&mut self, color: Color) {
        self.gl.clear_color(color);
        self.gl.clear_stencil(0);
        self.gl.clear(true, true);
    }

    /// Restrict rendering to `rect`, or disable clipping entirely with
    /// `None`. Used to bound damage-tracked partial redraws.
    pub fn set_scissor(&mut self, rect: Option<Rect>) {
        match rect {
            Some(rect) => {
                self.gl.scissor(rect.x, rect.y, rect.width, rect.height);
                self.gl.enable(Capability::ScissorTest);
            }
            None => self.gl.disable(Capability::ScissorTest),
        }
    }

    /// Draw a flat colored rectangle.
    pub fn render_rect(
        &mut self,
        rect: &Rect,
        color: Color,
        output_matrix: &Mat3,
    ) -> Result<(), RenderError> {
        if rect.is_empty() {
            return Ok(());
        }
        assert!(
            rect.width > 0 && rect.height > 0,
            "rect dimensions must be non-negative"
        );

        let model = Mat3::project_box(rect, OutputTransform::Normal, 0.0, output_matrix);
        let gl_matrix = self.projection.multiply(&model).transpose();

        if color.is_opaque() {
            self.gl.disable(Capability::Blend);
        } else {
            self.gl.enable(Capability::Blend);
        }

        let shader = &self.shaders.quad;
        self.gl.use_program(Some(shader.program));
        self.gl.uniform_matrix_3f(shader.proj, &gl_matrix);
        self.gl
            .uniform_4f(shader.color, color.r, color.g, color.b, color.a);

        self.draw_quad(shader.pos_attrib);
        Ok(())
    }

    /// Draw a rectangle with rounded corners; `corner_location` picks the
    /// shader variant (`All`, `TopLeft` or `TopRight`).
    ///
    /// # Panics
    ///
    /// Panics on a bottom corner selector — asymmetric rounding only exists
    /// for the top corners.
    pub fn render_rounded_rect(
        &mut self,
        rect: &Rect,
        color: Color,
        output_matrix: &Mat3,
        radius: i32,
        corner_location: CornerLocation,
    ) -> Result<(), RenderError> {
        if rect.is_empty() {
            return Ok(());
        }
        assert!(
            rect.width > 0 && rect.height > 0,
            "rect dimensions must be non-negative"
        );

        let shader = match corner_location {
            CornerLocation::All => &self.shaders.rounded_quad,
            CornerLocation::TopLeft => &self.shaders.rounded_tl_quad,
            CornerLocation::TopRight => &self.shaders.rounded_tr_quad,
            CornerLocation::BottomLeft | CornerLocation::BottomRight => {
                panic!("rounded rects have no bottom-corner variant")
            }
        };

        let model = Mat3::project_box(rect, OutputTransform::Normal, 0.0, output_matrix);
        let gl_matrix = self.projection.multiply(&model).transpose();

        // The rounding mask always produces partial coverage at the corners.
        self.gl.enable(Capability::Blend);

        self.gl.use_program(Some(shader.program));
        self.gl.uniform_matrix_3f(shader.proj, &gl_matrix);
        self.gl
            .uniform_4f(shader.color, color.r, color.g, color.b, color.a);
        self.gl
            .uniform_2f(shader.size, rect.width as f32, rect.height as f32);
        self.gl
            .uniform_2f(shader.position, rect.x as f32, rect.y as f32);
        self.gl.uniform_1f(shader.radius, radius as f32);

        self.draw_quad(shader.pos_attrib);
        Ok(())
    }

    /// Draw one L-shaped corner of a border. A zero `border_thickness` is a
    /// no-op.
    pub fn render_border_corner(
        &mut self,
        rect: &Rect,
        color: Color,
        output_matrix: &Mat3,
        corner_location: CornerLocation,
        radius: i32,
        border_thickness: i32,
    ) -> Result<(), RenderError> {
        if border_thickness == 0 || rect.is_empty() {
            return Ok(());
        }
        assert!(
            rect.width > 0 && rect.height > 0,
            "rect dimensions must be non-negative"
        );

        let model = Mat3::project_box(rect, OutputTransform::Normal, 0.0, output_matrix);
        let gl_matrix = self.projection.multiply(&model).transpose();

        if color.is_opaque() && radius == 0 {
            self.gl.disable(Capability::Blend);
        } else {
            self.gl.enable(Capability::Blend);
        }

        let shader = &self.shaders.corner;
        self.gl.use_program(Some(shader.program));
        self.gl.uniform_matrix_3f(shader.proj, &gl_matrix);
        self.gl
            .uniform_4f(shader.color, color.r, color.g, color.b, color.a);

        self.gl.uniform_1f(
            shader.is_top_left,
            flag(corner_location == CornerLocation::TopLeft),
        );
        self.gl.uniform_1f(
            shader.is_top_right,
            flag(corner_location == CornerLocation::TopRight),
        );
        self.gl.uniform_1f(
            shader.is_bottom_left,
            flag(corner_location == CornerLocation::BottomLeft),
        );
        self.gl.uniform_1f(
            shader.is_bottom_right,
            flag(corner_location == CornerLocation::BottomRight),
        );

        self.gl
            .uniform_2f(shader.position, rect.x as f32, rect.y as f32);
        self.gl.uniform_1f(shader.radius, radius as f32);
        self.gl.uniform_2f(
            shader.half_size,
            rect.width as f32 / 2.0,
            rect.height as f32 / 2.0,
        );
        self.gl
            .uniform_1f(shader.half_thickness, border_thickness as f32 / 2.0);

        self.draw_quad(shader.pos_attrib);
        Ok(())
    }

    /// Draw a box shadow with a Gaussian falloff.
    ///
    /// Phase 1 stamps the inner (un-blurred) rounded rectangle — the shadow
    /// box inset by the blur sigma on each side — into the stencil buffer
    /// with color writes off; phase 2 draws the falloff quad with the
    /// stencil test rejecting everything inside that mask, so the shadow
    /// never covers the window it belongs to. On exit the stencil buffer is
    /// cleared to zero and the stencil test disabled, unconditionally: any
    /// leaked mask state would corrupt unrelated draws.
    ///
    /// The destination box must be at least `2 * blur_sigma` wide and tall;
    /// a smaller box makes the inner mask negative, which is a caller bug.
    pub fn render_box_shadow(
        &mut self,
        rect: &Rect,
        color: Color,
        output_matrix: &Mat3,
        corner_radius: i32,
        blur_sigma: f32,
    ) -> Result<(), RenderError> {
        if rect.is_empty() {
            return Ok(());
        }
        assert!(
            rect.width > 0 && rect.height > 0,
            "rect dimensions must be non-negative"
        );

        let model = Mat3::project_box(rect, OutputTransform::Normal, 0.0, output_matrix);
        let gl_matrix = self.projection.multiply(&model).transpose();

        let inner = rect.inset(blur_sigma as i32);

        self.gl.enable(Capability::StencilTest);
        self.gl.clear_stencil(0);
        self.gl.clear(false, true);

        self.gl.stencil_func(StencilFunc::Always, 1, 0xFF);
        self.gl
            .stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Replace);
        self.gl.color_mask(false, false, false, false);
        // The mask color's alpha must be 1.0 so the mask shader only
        // discards pixels outside the rounded outline.
        self.render_rounded_rect(
            &inner,
            Color::BLACK,
            output_matrix,
            corner_radius,
            CornerLocation::All,
        )?;
        self.gl.stencil_func(StencilFunc::NotEqual, 1, 0xFF);
        self.gl
            .stencil_op(StencilOp::Keep, StencilOp::Keep, StencilOp::Keep);
        self.gl.color_mask(true, true, true, true);

        // A shadow without blending would have to be opaque with zero
        // sigma; not worth a special case.
        self.gl.enable(Capability::Blend);
        self.gl
            .blend_func(BlendFactor::SrcAlpha, BlendFactor::OneMinusSrcAlpha);

        let shader = &self.shaders.box_shadow;
        self.gl.use_program(Some(shader.program));
        self.gl.uniform_matrix_3f(shader.proj, &gl_matrix);
        self.gl
            .uniform_4f(shader.color, color.r, color.g, color.b, color.a);
        self.gl.uniform_1f(shader.blur_sigma, blur_sigma);
        self.gl
            .uniform_1f(shader.corner_radius, corner_radius as f32);
        self.gl
            .uniform_2f(shader.size, rect.width as f32, rect.height as f32);
        self.gl
            .uniform_2f(shader.position, rect.x as f32, rect.y as f32);

        self.draw_quad(shader.pos_attrib);

        self.gl
            .blend_func(BlendFactor::One, BlendFactor::OneMinusSrcAlpha);

        self.gl.clear_stencil(0);
        self.gl.clear(false, true);
        self.gl.disable(Capability::StencilTest);
        Ok(())
    }

    /// Draw a sub-rectangle of a texture into `dst` with the decoration
    /// effects applied.
    ///
    /// `matrix` is the model matrix for `dst` as composed by the scene
    /// walker. Fails recoverably when the texture needs external sampling
    /// and the context lacks the extension; the caller skips the element
    /// for this frame.
    pub fn render_subtexture(
        &mut self,
        texture: &FxTexture,
        src: &SrcRect,
        dst: &Rect,
        matrix: &Mat3,
        deco: &DecorationData,
    ) -> Result<(), RenderError> {
        if dst.is_empty() {
            return Ok(());
        }
        assert!(
            dst.width > 0 && dst.height > 0,
            "rect dimensions must be non-negative"
        );

        let shader = match texture.target {
            TextureTarget::Texture2d => {
                if texture.has_alpha {
                    &self.shaders.tex_rgba
                } else {
                    &self.shaders.tex_rgbx
                }
            }
            TextureTarget::External => {
                if !self.external_textures {
                    tracing::error!(
                        "cannot render texture: GL_OES_EGL_image_external not supported"
                    );
                    return Err(RenderError::ExternalTexturesUnsupported);
                }
                &self.shaders.tex_ext
            }
        };

        let gl_matrix = self.projection.multiply(matrix).transpose();

        // Fully opaque and unrounded content needs no blending.
        if !texture.has_alpha && deco.alpha == 1.0 && deco.corner_radius == 0 {
            self.gl.disable(Capability::Blend);
        } else {
            self.gl.enable(Capability::Blend);
        }
        self.gl
            .blend_func(BlendFactor::One, BlendFactor::OneMinusSrcAlpha);

        self.gl.active_texture(0);
        self.gl.bind_texture(texture.target, Some(texture.id));
        self.gl.tex_min_filter_linear(texture.target);

        self.gl.use_program(Some(shader.program));
        self.gl.uniform_matrix_3f(shader.proj, &gl_matrix);
        self.gl.uniform_1i(shader.tex, 0);
        self.gl
            .uniform_2f(shader.size, dst.width as f32, dst.height as f32);
        self.gl
            .uniform_2f(shader.position, dst.x as f32, dst.y as f32);
        self.gl.uniform_1f(shader.alpha, deco.alpha);
        self.gl.uniform_1f(shader.dim, deco.dim);
        self.gl.uniform_4f(
            shader.dim_color,
            deco.dim_color.r,
            deco.dim_color.g,
            deco.dim_color.b,
            deco.dim_color.a,
        );
        self.gl
            .uniform_1f(shader.has_titlebar, flag(deco.has_titlebar));
        self.gl.uniform_1f(shader.saturation, deco.saturation);
        self.gl.uniform_1f(shader.radius, deco.corner_radius as f32);

        // Normalize the source sub-rectangle against the texture extent.
        let x1 = src.x / texture.width as f32;
        let y1 = src.y / texture.height as f32;
        let x2 = (src.x + src.width) / texture.width as f32;
        let y2 = (src.y + src.height) / texture.height as f32;
        let texcoord = [
            x2, y1, // top right
            x1, y1, // top left
            x2, y2, // bottom right
            x1, y2, // bottom left
        ];

        self.gl.bind_array_buffer(Some(self.quad_vbo));
        self.gl.vertex_attrib_pointer(shader.pos_attrib, 2);
        self.gl.bind_array_buffer(Some(self.texcoord_vbo));
        self.gl
            .array_buffer_data(&texcoord, BufferUsage::StreamDraw);
        self.gl.vertex_attrib_pointer(shader.tex_attrib, 2);

        self.gl.enable_vertex_attrib_array(shader.pos_attrib);
        self.gl.enable_vertex_attrib_array(shader.tex_attrib);

        self.gl.draw_triangle_strip(4);

        self.gl.disable_vertex_attrib_array(shader.pos_attrib);
        self.gl.disable_vertex_attrib_array(shader.tex_attrib);

        self.gl.bind_array_buffer(None);
        self.gl.bind_texture(texture.target, None);

        Ok(())
    }

    /// Draw a whole texture into `dst`; see [`FxRenderer::render_subtexture`].
    pub fn render_texture(
        &mut self,
        texture: &FxTexture,
        dst: &Rect,
        matrix: &Mat3,
        deco: &DecorationData,
    ) -> Result<(), RenderError> {
        let src = SrcRect::new(0.0, 0.0, texture.width as f32, texture.height as f32);
        self.render_subtexture(texture, &src, dst, matrix, deco)
    }

    /// Run one blur pass, sampling `source` into the currently bound
    /// target.
    ///
    /// The pass kind selects the program and its half-pixel offset
    /// convention: `Down` expects a target at half the source resolution,
    /// `Up` at double. The caller owns the iteration loop, alternating the
    /// ping-pong buffers and the two passes. Blending and stencil testing
    /// are switched off — blur reads whole buffers, never masked
    /// composites.
    pub fn render_blur_pass(
        &mut self,
        matrix: &Mat3,
        source: &FxTexture,
        pass: BlurPass,
        blur_radius: i32,
    ) -> Result<(), RenderError> {
        let (width, height) = self.frame_size;
        assert!(
            width > 0 && height > 0,
            "blur passes require an active frame"
        );

        self.gl.disable(Capability::Blend);
        self.gl.disable(Capability::StencilTest);

        self.gl.active_texture(0);
        self.gl.bind_texture(source.target, Some(source.id));
        self.gl.tex_min_filter_linear(source.target);

        let shader = match pass {
            BlurPass::Down => &self.shaders.blur_down,
            BlurPass::Up => &self.shaders.blur_up,
        };
        self.gl.use_program(Some(shader.program));

        let gl_matrix = matrix.transpose();
        self.gl.uniform_matrix_3f(shader.proj, &gl_matrix);
        self.gl.uniform_1i(shader.tex, 0);
        self.gl.uniform_1f(shader.radius, blur_radius as f32);

        let (half_x, half_y) = match pass {
            BlurPass::Down => (0.5 / (width as f32 / 2.0), 0.5 / (height as f32 / 2.0)),
            BlurPass::Up => (0.5 / (width as f32 * 2.0), 0.5 / (height as f32 * 2.0)),
        };
        self.gl.uniform_2f(shader.halfpixel, half_x, half_y);

        // The unit quad serves as both positions and texcoords.
        self.gl.bind_array_buffer(Some(self.quad_vbo));
        self.gl.vertex_attrib_pointer(shader.pos_attrib, 2);
        self.gl.vertex_attrib_pointer(shader.tex_attrib, 2);

        self.gl.enable_vertex_attrib_array(shader.pos_attrib);
        self.gl.enable_vertex_attrib_array(shader.tex_attrib);

        self.gl.draw_triangle_strip(4);

        self.gl.disable_vertex_attrib_array(shader.pos_attrib);
        self.gl.disable_vertex_attrib_array(shader.tex_attrib);
        self.gl.bind_array_buffer(None);

        Ok(())
    }

    /// Release every GPU resource this renderer created and hand the
    /// context back.
    pub fn destroy(mut self) -> G {
        self.main_buffer.release(&self.gl);
        self.blur_buffer.release(&self.gl);
        self.effects_buffer.release(&self.gl);
        self.effects_buffer_swapped.release(&self.gl);
        self.stencil_buffer.release(&self.gl);
        self.shaders.destroy(&self.gl);
        self.gl.delete_buffer(self.quad_vbo);
        self.gl.delete_buffer(self.texcoord_vbo);
        self.gl
    }

    /// Issue the unit quad with a single position attribute.
    fn draw_quad(&self, pos_attrib: AttribLocation) {
        self.gl.bind_array_buffer(Some(self.quad_vbo));
        self.gl.vertex_attrib_pointer(pos_attrib, 2);
        self.gl.enable_vertex_attrib_array(pos_attrib);

        self.gl.draw_triangle_strip(4);

        self.gl.disable_vertex_attrib_array(pos_attrib);
        self.gl.bind_array_buffer(None);
    }
}
