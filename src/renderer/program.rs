//! Compilation and linking of the fixed program set, with uniform and
//! attribute locations resolved once and cached.
//!
//! Construction is all-or-nothing: if any program in the set fails to
//! compile or link, everything created so far is deleted and the error
//! propagates, failing renderer construction. Uniform fields hold
//! `Option<UniformLocation>` — a driver may eliminate an unused uniform in
//! one variant, and uploads to an absent location are silently dropped at
//! the [`GlContext`] boundary, matching GL's treatment of location -1.
//! Attributes are required: a missing one means the vertex stage itself is
//! broken.

use crate::error::RenderError;
use crate::gl::{AttribLocation, GlContext, ProgramId, ShaderId, ShaderStage, UniformLocation};

use super::shaders::{FragmentSource, RoundedQuadSource, TexSource, COMMON_VERT_SRC};

#[derive(Debug)]
pub(crate) struct QuadShader {
    pub program: ProgramId,
    pub proj: Option<UniformLocation>,
    pub color: Option<UniformLocation>,
    pub pos_attrib: AttribLocation,
}

#[derive(Debug)]
pub(crate) struct RoundedQuadShader {
    pub program: ProgramId,
    pub proj: Option<UniformLocation>,
    pub color: Option<UniformLocation>,
    pub size: Option<UniformLocation>,
    pub position: Option<UniformLocation>,
    pub radius: Option<UniformLocation>,
    pub pos_attrib: AttribLocation,
}

#[derive(Debug)]
pub(crate) struct CornerShader {
    pub program: ProgramId,
    pub proj: Option<UniformLocation>,
    pub color: Option<UniformLocation>,
    pub is_top_left: Option<UniformLocation>,
    pub is_top_right: Option<UniformLocation>,
    pub is_bottom_left: Option<UniformLocation>,
    pub is_bottom_right: Option<UniformLocation>,
    pub position: Option<UniformLocation>,
    pub radius: Option<UniformLocation>,
    pub half_size: Option<UniformLocation>,
    pub half_thickness: Option<UniformLocation>,
    pub pos_attrib: AttribLocation,
}

#[derive(Debug)]
pub(crate) struct BoxShadowShader {
    pub program: ProgramId,
    pub proj: Option<UniformLocation>,
    pub color: Option<UniformLocation>,
    pub position: Option<UniformLocation>,
    pub size: Option<UniformLocation>,
    pub blur_sigma: Option<UniformLocation>,
    pub corner_radius: Option<UniformLocation>,
    pub pos_attrib: AttribLocation,
}

#[derive(Debug)]
pub(crate) struct BlurShader {
    pub program: ProgramId,
    pub proj: Option<UniformLocation>,
    pub tex: Option<UniformLocation>,
    pub radius: Option<UniformLocation>,
    pub halfpixel: Option<UniformLocation>,
    pub pos_attrib: AttribLocation,
    pub tex_attrib: AttribLocation,
}

#[derive(Debug)]
pub(crate) struct TexShader {
    pub program: ProgramId,
    pub proj: Option<UniformLocation>,
    pub tex: Option<UniformLocation>,
    pub alpha: Option<UniformLocation>,
    pub dim: Option<UniformLocation>,
    pub dim_color: Option<UniformLocation>,
    pub size: Option<UniformLocation>,
    pub position: Option<UniformLocation>,
    pub radius: Option<UniformLocation>,
    pub saturation: Option<UniformLocation>,
    pub has_titlebar: Option<UniformLocation>,
    pub pos_attrib: AttribLocation,
    pub tex_attrib: AttribLocation,
}

/// The eleven linked programs the renderer draws with.
#[derive(Debug)]
pub(crate) struct ShaderSet {
    pub quad: QuadShader,
    pub rounded_quad: RoundedQuadShader,
    pub rounded_tl_quad: RoundedQuadShader,
    pub rounded_tr_quad: RoundedQuadShader,
    pub corner: CornerShader,
    pub box_shadow: BoxShadowShader,
    pub blur_down: BlurShader,
    pub blur_up: BlurShader,
    pub tex_rgba: TexShader,
    pub tex_rgbx: TexShader,
    pub tex_ext: TexShader,
}

/// Tracks programs linked so far so a mid-set failure can unwind them.
struct Linker<'a, G: GlContext> {
    gl: &'a G,
    vertex: ShaderId,
    linked: Vec<ProgramId>,
}

impl<'a, G: GlContext> Linker<'a, G> {
    fn new(gl: &'a G) -> Result<Self, RenderError> {
        let vertex = gl
            .compile_shader(ShaderStage::Vertex, COMMON_VERT_SRC)
            .map_err(|e| RenderError::ShaderCompile {
                stage: ShaderStage::Vertex,
                log: e.to_string(),
            })?;
        Ok(Self {
            gl,
            vertex,
            linked: Vec::new(),
        })
    }

    fn link(&mut self, fragment: FragmentSource) -> Result<ProgramId, RenderError> {
        let source = fragment.source();
        let frag = self
            .gl
            .compile_shader(ShaderStage::Fragment, &source)
            .map_err(|e| RenderError::ShaderCompile {
                stage: ShaderStage::Fragment,
                log: e.to_string(),
            })?;
        let result = self.gl.link_program(self.vertex, frag);
        self.gl.delete_shader(frag);
        let program = result.map_err(|e| RenderError::ProgramLink { log: e.to_string() })?;
        self.linked.push(program);
        Ok(program)
    }

    fn attrib(
        &self,
        program: ProgramId,
        name: &'static str,
    ) -> Result<AttribLocation, RenderError> {
        self.gl
            .attrib_location(program, name)
            .ok_or(RenderError::MissingAttribute { name })
    }

    fn finish(self) {
        self.gl.delete_shader(self.vertex);
    }

    fn unwind(self) {
        for program in &self.linked {
            self.gl.delete_program(*program);
        }
        self.gl.delete_shader(self.vertex);
    }
}

impl ShaderSet {
    pub(crate) fn link_all<G: GlContext>(gl: &G) -> Result<Self, RenderError> {
        let mut linker = Linker::new(gl)?;
        match Self::link_set(gl, &mut linker) {
            Ok(set) => {
                linker.finish();
                Ok(set)
            }
            Err(err) => {
                linker.unwind();
                Err(err)
            }
        }
    }

    fn link_set<G: GlContext>(gl: &G, linker: &mut Linker<'_, G>) -> Result<Self, RenderError> {
        Ok(Self {
            quad: Self::link_quad(gl, linker)?,
            rounded_quad: Self::link_rounded_quad(gl, linker, RoundedQuadSource::All)?,
            rounded_tl_quad: Self::link_rounded_quad(gl, linker, RoundedQuadSource::TopLeft)?,
            rounded_tr_quad: Self::link_rounded_quad(gl, linker, RoundedQuadSource::TopRight)?,
            corner: Self::link_corner(gl, linker)?,
            box_shadow: Self::link_box_shadow(gl, linker)?,
            blur_down: Self::link_blur(gl, linker, FragmentSource::BlurDown)?,
            blur_up: Self::link_blur(gl, linker, FragmentSource::BlurUp)?,
            tex_rgba: Self::link_tex(gl, linker, TexSource::Rgba)?,
            tex_rgbx: Self::link_tex(gl, linker, TexSource::Rgbx)?,
            tex_ext: Self::link_tex(gl, linker, TexSource::External)?,
        })
    }

    fn link_quad<G: GlContext>(
        gl: &G,
        linker: &mut Linker<'_, G>,
    ) -> Result<QuadShader, RenderError> {
        let program = linker.link(FragmentSource::Quad)?;
        Ok(QuadShader {
            program,
            proj: gl.uniform_location(program, "proj"),
            color: gl.uniform_location(program, "color"),
            pos_attrib: linker.attrib(program, "pos")?,
        })
    }

    fn link_rounded_quad<G: GlContext>(
        gl: &G,
        linker: &mut Linker<'_, G>,
        variant: RoundedQuadSource,
    ) -> Result<RoundedQuadShader, RenderError> {
        let program = linker.link(FragmentSource::RoundedQuad(variant))?;
        Ok(RoundedQuadShader {
            program,
            proj: gl.uniform_location(program, "proj"),
            color: gl.uniform_location(program, "color"),
            size: gl.uniform_location(program, "size"),
            position: gl.uniform_location(program, "position"),
            radius: gl.uniform_location(program, "radius"),
            pos_attrib: linker.attrib(program, "pos")?,
        })
    }

    fn link_corner<G: GlContext>(
        gl: &G,
        linker: &mut Linker<'_, G>,
    ) -> Result<CornerShader, RenderError> {
        let program = linker.link(FragmentSource::Corner)?;
        Ok(CornerShader {
            program,
            proj: gl.uniform_location(program, "proj"),
            color: gl.uniform_location(program, "color"),
            is_top_left: gl.uniform_location(program, "is_top_left"),
            is_top_right: gl.uniform_location(program, "is_top_right"),
            is_bottom_left: gl.uniform_location(program, "is_bottom_left"),
            is_bottom_right: gl.uniform_location(program, "is_bottom_right"),
            position: gl.uniform_location(program, "position"),
            radius: gl.uniform_location(program, "radius"),
            half_size: gl.uniform_location(program, "half_size"),
            half_thickness: gl.uniform_location(program, "half_thickness"),
            pos_attrib: linker.attrib(program, "pos")?,
        })
    }

    fn link_box_shadow<G: GlContext>(
        gl: &G,
        linker: &mut Linker<'_, G>,
    ) -> Result<BoxShadowShader, RenderError> {
        let program = linker.link(FragmentSource::BoxShadow)?;
        Ok(BoxShadowShader {
            program,
            proj: gl.uniform_location(program, "proj"),
            color: gl.uniform_location(program, "color"),
            position: gl.uniform_location(program, "position"),
            size: gl.uniform_location(program, "size"),
            blur_sigma: gl.uniform_location(program, "blur_sigma"),
            corner_radius: gl.uniform_location(program, "corner_radius"),
            pos_attrib: linker.attrib(program, "pos")?,
        })
    }

    fn link_blur<G: GlContext>(
        gl: &G,
        linker: &mut Linker<'_, G>,
        fragment: FragmentSource,
    ) -> Result<BlurShader, RenderError> {
        let program = linker.link(fragment)?;
        Ok(BlurShader {
            program,
            proj: gl.uniform_location(program, "proj"),
            tex: gl.uniform_location(program, "tex"),
            radius: gl.uniform_location(program, "radius"),
            halfpixel: gl.uniform_location(program, "halfpixel"),
            pos_attrib: linker.attrib(program, "pos")?,
            tex_attrib: linker.attrib(program, "texcoord")?,
        })
    }

    fn link_tex<G: GlContext>(
        gl: &G,
        linker: &mut Linker<'_, G>,
        variant: TexSource,
    ) -> Result<TexShader, RenderError> {
        let program = linker.link(FragmentSource::Tex(variant))?;
        Ok(TexShader {
            program,
            proj: gl.uniform_location(program, "proj"),
            tex: gl.uniform_location(program, "tex"),
            alpha: gl.uniform_location(program, "alpha"),
            dim: gl.uniform_location(program, "dim"),
            dim_color: gl.uniform_location(program, "dim_color"),
            size: gl.uniform_location(program, "size"),
            position: gl.uniform_location(program, "position"),
            radius: gl.uniform_location(program, "radius"),
            saturation: gl.uniform_location(program, "saturation"),
            has_titlebar: gl.uniform_location(program, "has_titlebar"),
            pos_attrib: linker.attrib(program, "pos")?,
            tex_attrib: linker.attrib(program, "texcoord")?,
        })
    }

    /// Delete every linked program. Part of renderer teardown.
    pub(crate) fn destroy<G: GlContext>(&self, gl: &G) {
        for program in [
            self.quad.program,
            self.rounded_quad.program,
            self.rounded_tl_quad.program,
            self.rounded_tr_quad.program,
            self.corner.program,
            self.box_shadow.program,
            self.blur_down.program,
            self.blur_up.program,
            self.tex_rgba.program,
            self.tex_rgbx.program,
            self.tex_ext.program,
        ] {
            gl.delete_program(program);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl::recording::RecordingContext;

    #[test]
    fn links_the_full_fixed_set() {
        let gl = RecordingContext::new();
        let set = ShaderSet::link_all(&gl).expect("link");
        // Eleven programs and no leftover shader objects.
        assert_ne!(set.quad.program, set.rounded_quad.program);
        assert_eq!(gl.live_object_count(), 11);
    }

    #[test]
    fn compile_failure_unwinds_everything() {
        let gl = RecordingContext::new();
        let ok = ShaderSet::link_all(&gl).expect("link");
        ok.destroy(&gl);
        assert_eq!(gl.live_object_count(), 0);

        gl.fail_next_compile();
        let err = ShaderSet::link_all(&gl).expect_err("must fail");
        assert!(err.is_fatal());
        assert_eq!(gl.live_object_count(), 0, "partial objects must be deleted");
    }

    #[test]
    fn link_failure_mid_set_unwinds_earlier_programs() {
        let gl = RecordingContext::new();
        gl.fail_next_link();
        let err = ShaderSet::link_all(&gl).expect_err("must fail");
        assert!(matches!(err, RenderError::ProgramLink { .. }));
        assert_eq!(gl.live_object_count(), 0);
    }

    #[test]
    fn tex_programs_resolve_decoration_uniforms() {
        let gl = RecordingContext::new();
        let set = ShaderSet::link_all(&gl).expect("link");
        for shader in [&set.tex_rgba, &set.tex_rgbx, &set.tex_ext] {
            assert!(shader.alpha.is_some());
            assert!(shader.dim.is_some());
            assert!(shader.saturation.is_some());
            assert!(shader.has_titlebar.is_some());
        }
        // The flat quad has no radius uniform at all.
        assert!(gl.uniform_location(set.quad.program, "radius").is_none());
    }
}
