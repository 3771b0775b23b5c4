//! A software double for [`GlContext`]: simulates the GL object and state
//! machine and records every call, so the draw algorithms can be exercised
//! and asserted on without a GPU.
//!
//! Uniform and attribute locations are resolved by scanning the shader
//! source text for `uniform`/`attribute` declarations, which mirrors what a
//! driver resolves at link time closely enough for the fixed shader set.
//! Cloning the context shares the underlying state, so a test can keep a
//! handle for inspection after moving a clone into the renderer.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use crate::geometry::Color;
use crate::matrix::Mat3;
use crate::texture::TextureTarget;

use super::{
    AttribLocation, BlendFactor, BufferId, BufferUsage, Capability, DriverInfo, FramebufferId,
    GlContext, GlError, ProgramId, RenderbufferId, ShaderId, ShaderStage, StencilFunc, StencilOp,
    TextureId, UniformLocation,
};

#[derive(Clone, Debug, PartialEq)]
pub enum UniformValue {
    I32(i32),
    F32(f32),
    Vec2([f32; 2]),
    Vec4([f32; 4]),
    Mat3([f32; 9]),
}

#[derive(Clone, Debug)]
struct ShaderInfo {
    stage: ShaderStage,
    source: String,
}

#[derive(Clone, Debug, Default)]
struct ProgramInfo {
    fragment_source: String,
    uniforms: HashMap<String, UniformLocation>,
    attribs: HashMap<String, AttribLocation>,
}

#[derive(Debug)]
struct State {
    next_id: u32,
    shaders: HashMap<u32, ShaderInfo>,
    programs: HashMap<u32, ProgramInfo>,
    textures: HashSet<u32>,
    renderbuffers: HashSet<u32>,
    framebuffers: HashSet<u32>,
    buffers: HashSet<u32>,

    bound_framebuffer: i32,
    bound_renderbuffer: Option<RenderbufferId>,
    bound_textures: HashMap<TextureTarget, TextureId>,
    bound_array_buffer: Option<BufferId>,
    current_program: Option<ProgramId>,
    enabled: HashSet<Capability>,
    enabled_attribs: HashSet<u32>,

    blend_func: (BlendFactor, BlendFactor),
    stencil_func: (StencilFunc, i32, u32),
    stencil_op: (StencilOp, StencilOp, StencilOp),
    color_mask: (bool, bool, bool, bool),
    clear_color: Color,
    clear_stencil_value: i32,
    viewport: (i32, i32, i32, i32),
    scissor_box: (i32, i32, i32, i32),

    // True while the stencil buffer holds only zeros: set by a stencil clear
    // with clear value 0, unset by any draw that can write the stencil.
    stencil_zeroed: bool,

    color_attachments: HashMap<u32, TextureId>,
    stencil_attachments: HashMap<u32, RenderbufferId>,
    uniform_values: HashMap<(u32, u32), UniformValue>,
    buffer_contents: HashMap<u32, Vec<f32>>,
    last_buffer_upload: Option<Vec<f32>>,

    external_textures: bool,
    fail_completeness: bool,
    fail_next_compile: bool,
    fail_next_link: bool,

    calls: Vec<String>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            next_id: 1,
            shaders: HashMap::new(),
            programs: HashMap::new(),
            textures: HashSet::new(),
            renderbuffers: HashSet::new(),
            framebuffers: HashSet::new(),
            buffers: HashSet::new(),
            bound_framebuffer: 0,
            bound_renderbuffer: None,
            bound_textures: HashMap::new(),
            bound_array_buffer: None,
            current_program: None,
            enabled: HashSet::new(),
            enabled_attribs: HashSet::new(),
            blend_func: (BlendFactor::One, BlendFactor::OneMinusSrcAlpha),
            stencil_func: (StencilFunc::Always, 0, u32::MAX),
            stencil_op: (StencilOp::Keep, StencilOp::Keep, StencilOp::Keep),
            color_mask: (true, true, true, true),
            clear_color: Color::TRANSPARENT,
            clear_stencil_value: 0,
            viewport: (0, 0, 0, 0),
            scissor_box: (0, 0, 0, 0),
            stencil_zeroed: true,
            color_attachments: HashMap::new(),
            stencil_attachments: HashMap::new(),
            uniform_values: HashMap::new(),
            buffer_contents: HashMap::new(),
            last_buffer_upload: None,
            external_textures: true,
            fail_completeness: false,
            fail_next_compile: false,
            fail_next_link: false,
            calls: Vec::new(),
        }
    }
}

impl State {
    fn allocate(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn record(&mut self, call: String) {
        self.calls.push(call);
    }
}

/// Scan shader source text for declarations introduced by `keyword`
/// (`"uniform"` or `"attribute"`) and return the declared names.
fn declared_names(source: &str, keyword: &str) -> Vec<String> {
    let mut names = Vec::new();
    for line in source.lines() {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(keyword) else {
            continue;
        };
        // "uniform vec4 color;" -> "color"
        let rest = rest.trim().trim_end_matches(';');
        if let Some(name) = rest.split_whitespace().last() {
            names.push(name.to_string());
        }
    }
    names
}

#[derive(Clone, Default)]
pub struct RecordingContext {
    state: Rc<RefCell<State>>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context reporting `GL_OES_EGL_image_external` as unavailable.
    pub fn without_external_textures() -> Self {
        let ctx = Self::new();
        ctx.state.borrow_mut().external_textures = false;
        ctx
    }

    /// Make every subsequent completeness check report an incomplete
    /// framebuffer.
    pub fn fail_framebuffer_completeness(&self, fail: bool) {
        self.state.borrow_mut().fail_completeness = fail;
    }

    pub fn fail_next_compile(&self) {
        self.state.borrow_mut().fail_next_compile = true;
    }

    pub fn fail_next_link(&self) {
        self.state.borrow_mut().fail_next_link = true;
    }

    /// Prime the framebuffer binding the renderer will observe at frame
    /// begin, as if the platform had bound its own target.
    pub fn set_framebuffer_binding(&self, raw: i32) {
        self.state.borrow_mut().bound_framebuffer = raw;
    }

    // Inspection.

    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.borrow().calls.len()
    }

    pub fn draw_count(&self) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| c.starts_with("draw_triangle_strip"))
            .count()
    }

    pub fn is_enabled(&self, cap: Capability) -> bool {
        self.state.borrow().enabled.contains(&cap)
    }

    pub fn blend_func(&self) -> (BlendFactor, BlendFactor) {
        self.state.borrow().blend_func
    }

    pub fn bound_framebuffer(&self) -> i32 {
        self.state.borrow().bound_framebuffer
    }

    pub fn bound_texture(&self, target: TextureTarget) -> Option<TextureId> {
        self.state.borrow().bound_textures.get(&target).copied()
    }

    pub fn current_program(&self) -> Option<ProgramId> {
        self.state.borrow().current_program
    }

    pub fn viewport(&self) -> (i32, i32, i32, i32) {
        self.state.borrow().viewport
    }

    pub fn scissor_box(&self) -> (i32, i32, i32, i32) {
        self.state.borrow().scissor_box
    }

    pub fn color_mask(&self) -> (bool, bool, bool, bool) {
        self.state.borrow().color_mask
    }

    pub fn clear_color_value(&self) -> Color {
        self.state.borrow().clear_color
    }

    pub fn stencil_func_state(&self) -> (StencilFunc, i32, u32) {
        self.state.borrow().stencil_func
    }

    pub fn bound_renderbuffer(&self) -> Option<RenderbufferId> {
        self.state.borrow().bound_renderbuffer
    }

    /// True while the stencil buffer is known to contain only zeros.
    pub fn stencil_cleared_to_zero(&self) -> bool {
        self.state.borrow().stencil_zeroed
    }

    pub fn enabled_attrib_count(&self) -> usize {
        self.state.borrow().enabled_attribs.len()
    }

    /// Total count of live GL objects (for leak checks around `destroy`).
    pub fn live_object_count(&self) -> usize {
        let s = self.state.borrow();
        s.shaders.len()
            + s.programs.len()
            + s.textures.len()
            + s.renderbuffers.len()
            + s.framebuffers.len()
            + s.buffers.len()
    }

    pub fn fragment_source(&self, program: ProgramId) -> Option<String> {
        self.state
            .borrow()
            .programs
            .get(&program.0)
            .map(|p| p.fragment_source.clone())
    }

    pub fn uniform(&self, program: ProgramId, name: &str) -> Option<UniformValue> {
        let state = self.state.borrow();
        let info = state.programs.get(&program.0)?;
        let location = info.uniforms.get(name)?;
        state.uniform_values.get(&(program.0, location.0)).cloned()
    }

    pub fn uniform_f32(&self, program: ProgramId, name: &str) -> Option<f32> {
        match self.uniform(program, name)? {
            UniformValue::F32(v) => Some(v),
            _ => None,
        }
    }

    pub fn uniform_i32(&self, program: ProgramId, name: &str) -> Option<i32> {
        match self.uniform(program, name)? {
            UniformValue::I32(v) => Some(v),
            _ => None,
        }
    }

    pub fn uniform_vec2(&self, program: ProgramId, name: &str) -> Option<[f32; 2]> {
        match self.uniform(program, name)? {
            UniformValue::Vec2(v) => Some(v),
            _ => None,
        }
    }

    pub fn uniform_vec4(&self, program: ProgramId, name: &str) -> Option<[f32; 4]> {
        match self.uniform(program, name)? {
            UniformValue::Vec4(v) => Some(v),
            _ => None,
        }
    }

    pub fn uniform_mat3(&self, program: ProgramId, name: &str) -> Option<Mat3> {
        match self.uniform(program, name)? {
            UniformValue::Mat3(v) => Some(Mat3(v)),
            _ => None,
        }
    }

    pub fn buffer_contents(&self, buffer: BufferId) -> Option<Vec<f32>> {
        self.state.borrow().buffer_contents.get(&buffer.0).cloned()
    }

    /// The data of the most recent `array_buffer_data` upload.
    pub fn last_array_buffer_upload(&self) -> Option<Vec<f32>> {
        self.state.borrow().last_buffer_upload.clone()
    }

    pub fn color_attachment(&self, framebuffer: FramebufferId) -> Option<TextureId> {
        self.state
            .borrow()
            .color_attachments
            .get(&framebuffer.0)
            .copied()
    }

    pub fn stencil_attachment(&self, framebuffer: FramebufferId) -> Option<RenderbufferId> {
        self.state
            .borrow()
            .stencil_attachments
            .get(&framebuffer.0)
            .copied()
    }
}

impl GlContext for RecordingContext {
    fn driver_info(&self) -> DriverInfo {
        DriverInfo {
            version: "OpenGL ES 2.0 (recording)".into(),
            vendor: "fx-renderer".into(),
            renderer: "software double".into(),
        }
    }

    fn supports_external_textures(&self) -> bool {
        self.state.borrow().external_textures
    }

    fn current_framebuffer_binding(&self) -> i32 {
        self.state.borrow().bound_framebuffer
    }

    fn enable(&self, cap: Capability) {
        let mut s = self.state.borrow_mut();
        s.enabled.insert(cap);
        s.record(format!("enable({cap:?})"));
    }

    fn disable(&self, cap: Capability) {
        let mut s = self.state.borrow_mut();
        s.enabled.remove(&cap);
        s.record(format!("disable({cap:?})"));
    }

    fn blend_func(&self, src: BlendFactor, dst: BlendFactor) {
        let mut s = self.state.borrow_mut();
        s.blend_func = (src, dst);
        s.record(format!("blend_func({src:?}, {dst:?})"));
    }

    fn viewport(&self, x: i32, y: i32, width: i32, height: i32) {
        let mut s = self.state.borrow_mut();
        s.viewport = (x, y, width, height);
        s.record(format!("viewport({x}, {y}, {width}, {height})"));
    }

    fn scissor(&self, x: i32, y: i32, width: i32, height: i32) {
        let mut s = self.state.borrow_mut();
        s.scissor_box = (x, y, width, height);
        s.record(format!("scissor({x}, {y}, {width}, {height})"));
    }

    fn clear_color(&self, color: Color) {
        let mut s = self.state.borrow_mut();
        s.clear_color = color;
        s.record(format!("clear_color({color:?})"));
    }

    fn clear_stencil(&self, value: i32) {
        let mut s = self.state.borrow_mut();
        s.clear_stencil_value = value;
        s.record(format!("clear_stencil({value})"));
    }

    fn clear(&self, color: bool, stencil: bool) {
        let mut s = self.state.borrow_mut();
        if stencil {
            s.stencil_zeroed = s.clear_stencil_value == 0;
        }
        s.record(format!("clear(color: {color}, stencil: {stencil})"));
    }

    fn color_mask(&self, r: bool, g: bool, b: bool, a: bool) {
        let mut s = self.state.borrow_mut();
        s.color_mask = (r, g, b, a);
        s.record(format!("color_mask({r}, {g}, {b}, {a})"));
    }

    fn stencil_func(&self, func: StencilFunc, reference: i32, mask: u32) {
        let mut s = self.state.borrow_mut();
        s.stencil_func = (func, reference, mask);
        s.record(format!("stencil_func({func:?}, {reference}, {mask:#x})"));
    }

    fn stencil_op(&self, on_fail: StencilOp, on_depth_fail: StencilOp, on_pass: StencilOp) {
        let mut s = self.state.borrow_mut();
        s.stencil_op = (on_fail, on_depth_fail, on_pass);
        s.record(format!(
            "stencil_op({on_fail:?}, {on_depth_fail:?}, {on_pass:?})"
        ));
    }

    fn compile_shader(&self, stage: ShaderStage, source: &str) -> Result<ShaderId, GlError> {
        let mut s = self.state.borrow_mut();
        s.record(format!("compile_shader({stage:?})"));
        if s.fail_next_compile {
            s.fail_next_compile = false;
            return Err(GlError("forced compile failure".into()));
        }
        let id = s.allocate();
        s.shaders.insert(
            id,
            ShaderInfo {
                stage,
                source: source.to_string(),
            },
        );
        Ok(ShaderId(id))
    }

    fn delete_shader(&self, shader: ShaderId) {
        let mut s = self.state.borrow_mut();
        s.shaders.remove(&shader.0);
        s.record(format!("delete_shader({})", shader.0));
    }

    fn link_program(&self, vertex: ShaderId, fragment: ShaderId) -> Result<ProgramId, GlError> {
        let mut s = self.state.borrow_mut();
        s.record(format!("link_program({}, {})", vertex.0, fragment.0));
        if s.fail_next_link {
            s.fail_next_link = false;
            return Err(GlError("forced link failure".into()));
        }
        let vert = s
            .shaders
            .get(&vertex.0)
            .ok_or_else(|| GlError("unknown vertex shader".into()))?
            .clone();
        let frag = s
            .shaders
            .get(&fragment.0)
            .ok_or_else(|| GlError("unknown fragment shader".into()))?
            .clone();
        if vert.stage != ShaderStage::Vertex || frag.stage != ShaderStage::Fragment {
            return Err(GlError("mismatched shader stages".into()));
        }

        let mut info = ProgramInfo {
            fragment_source: frag.source.clone(),
            ..Default::default()
        };
        let mut next_location = 0u32;
        for source in [&vert.source, &frag.source] {
            for name in declared_names(source, "uniform") {
                info.uniforms
                    .entry(name)
                    .or_insert_with(|| {
                        let loc = UniformLocation(next_location);
                        next_location += 1;
                        loc
                    });
            }
        }
        let mut next_attrib = 0u32;
        for name in declared_names(&vert.source, "attribute") {
            info.attribs.entry(name).or_insert_with(|| {
                let loc = AttribLocation(next_attrib);
                next_attrib += 1;
                loc
            });
        }

        let id = s.allocate();
        s.programs.insert(id, info);
        Ok(ProgramId(id))
    }

    fn delete_program(&self, program: ProgramId) {
        let mut s = self.state.borrow_mut();
        s.programs.remove(&program.0);
        s.record(format!("delete_program({})", program.0));
    }

    fn use_program(&self, program: Option<ProgramId>) {
        let mut s = self.state.borrow_mut();
        s.current_program = program;
        s.record(format!("use_program({:?})", program.map(|p| p.0)));
    }

    fn uniform_location(&self, program: ProgramId, name: &str) -> Option<UniformLocation> {
        self.state
            .borrow()
            .programs
            .get(&program.0)?
            .uniforms
            .get(name)
            .copied()
    }

    fn attrib_location(&self, program: ProgramId, name: &str) -> Option<AttribLocation> {
        self.state
            .borrow()
            .programs
            .get(&program.0)?
            .attribs
            .get(name)
            .copied()
    }

    fn uniform_1i(&self, location: Option<UniformLocation>, x: i32) {
        self.store_uniform(location, UniformValue::I32(x));
    }

    fn uniform_1f(&self, location: Option<UniformLocation>, x: f32) {
        self.store_uniform(location, UniformValue::F32(x));
    }

    fn uniform_2f(&self, location: Option<UniformLocation>, x: f32, y: f32) {
        self.store_uniform(location, UniformValue::Vec2([x, y]));
    }

    fn uniform_4f(&self, location: Option<UniformLocation>, x: f32, y: f32, z: f32, w: f32) {
        self.store_uniform(location, UniformValue::Vec4([x, y, z, w]));
    }

    fn uniform_matrix_3f(&self, location: Option<UniformLocation>, matrix: &Mat3) {
        self.store_uniform(location, UniformValue::Mat3(matrix.0));
    }

    fn create_texture(&self) -> Result<TextureId, GlError> {
        let mut s = self.state.borrow_mut();
        let id = s.allocate();
        s.textures.insert(id);
        s.record(format!("create_texture() -> {id}"));
        Ok(TextureId(id))
    }

    fn delete_texture(&self, texture: TextureId) {
        let mut s = self.state.borrow_mut();
        s.textures.remove(&texture.0);
        s.record(format!("delete_texture({})", texture.0));
    }

    fn active_texture(&self, unit: u32) {
        self.state
            .borrow_mut()
            .record(format!("active_texture({unit})"));
    }

    fn bind_texture(&self, target: TextureTarget, texture: Option<TextureId>) {
        let mut s = self.state.borrow_mut();
        match texture {
            Some(t) => {
                s.bound_textures.insert(target, t);
            }
            None => {
                s.bound_textures.remove(&target);
            }
        }
        s.record(format!("bind_texture({target:?}, {:?})", texture.map(|t| t.0)));
    }

    fn alloc_rgba_storage(&self, width: i32, height: i32) {
        self.state
            .borrow_mut()
            .record(format!("alloc_rgba_storage({width}, {height})"));
    }

    fn tex_min_filter_linear(&self, target: TextureTarget) {
        self.state
            .borrow_mut()
            .record(format!("tex_min_filter_linear({target:?})"));
    }

    fn tex_mag_filter_linear(&self, target: TextureTarget) {
        self.state
            .borrow_mut()
            .record(format!("tex_mag_filter_linear({target:?})"));
    }

    fn create_renderbuffer(&self) -> Result<RenderbufferId, GlError> {
        let mut s = self.state.borrow_mut();
        let id = s.allocate();
        s.renderbuffers.insert(id);
        s.record(format!("create_renderbuffer() -> {id}"));
        Ok(RenderbufferId(id))
    }

    fn delete_renderbuffer(&self, renderbuffer: RenderbufferId) {
        let mut s = self.state.borrow_mut();
        s.renderbuffers.remove(&renderbuffer.0);
        s.record(format!("delete_renderbuffer({})", renderbuffer.0));
    }

    fn bind_renderbuffer(&self, renderbuffer: Option<RenderbufferId>) {
        let mut s = self.state.borrow_mut();
        s.bound_renderbuffer = renderbuffer;
        s.record(format!(
            "bind_renderbuffer({:?})",
            renderbuffer.map(|r| r.0)
        ));
    }

    fn renderbuffer_stencil_storage(&self, width: i32, height: i32) {
        self.state
            .borrow_mut()
            .record(format!("renderbuffer_stencil_storage({width}, {height})"));
    }

    fn attach_stencil_renderbuffer(&self, renderbuffer: RenderbufferId) {
        let mut s = self.state.borrow_mut();
        let fb = s.bound_framebuffer;
        if fb >= 0 {
            s.stencil_attachments.insert(fb as u32, renderbuffer);
        }
        s.record(format!("attach_stencil_renderbuffer({})", renderbuffer.0));
    }

    fn create_framebuffer(&self) -> Result<FramebufferId, GlError> {
        let mut s = self.state.borrow_mut();
        let id = s.allocate();
        s.framebuffers.insert(id);
        s.record(format!("create_framebuffer() -> {id}"));
        Ok(FramebufferId(id))
    }

    fn delete_framebuffer(&self, framebuffer: FramebufferId) {
        let mut s = self.state.borrow_mut();
        s.framebuffers.remove(&framebuffer.0);
        s.color_attachments.remove(&framebuffer.0);
        s.stencil_attachments.remove(&framebuffer.0);
        s.record(format!("delete_framebuffer({})", framebuffer.0));
    }

    fn bind_framebuffer(&self, framebuffer: FramebufferId) {
        let mut s = self.state.borrow_mut();
        s.bound_framebuffer = framebuffer.0 as i32;
        s.record(format!("bind_framebuffer({})", framebuffer.0));
    }

    fn attach_color_texture(&self, texture: TextureId) {
        let mut s = self.state.borrow_mut();
        let fb = s.bound_framebuffer;
        if fb >= 0 {
            s.color_attachments.insert(fb as u32, texture);
        }
        s.record(format!("attach_color_texture({})", texture.0));
    }

    fn framebuffer_complete(&self) -> bool {
        !self.state.borrow().fail_completeness
    }

    fn create_buffer(&self) -> Result<BufferId, GlError> {
        let mut s = self.state.borrow_mut();
        let id = s.allocate();
        s.buffers.insert(id);
        s.record(format!("create_buffer() -> {id}"));
        Ok(BufferId(id))
    }

    fn delete_buffer(&self, buffer: BufferId) {
        let mut s = self.state.borrow_mut();
        s.buffers.remove(&buffer.0);
        s.buffer_contents.remove(&buffer.0);
        s.record(format!("delete_buffer({})", buffer.0));
    }

    fn bind_array_buffer(&self, buffer: Option<BufferId>) {
        let mut s = self.state.borrow_mut();
        s.bound_array_buffer = buffer;
        s.record(format!("bind_array_buffer({:?})", buffer.map(|b| b.0)));
    }

    fn array_buffer_data(&self, data: &[f32], usage: BufferUsage) {
        let mut s = self.state.borrow_mut();
        if let Some(buffer) = s.bound_array_buffer {
            s.buffer_contents.insert(buffer.0, data.to_vec());
        }
        s.last_buffer_upload = Some(data.to_vec());
        s.record(format!("array_buffer_data(len: {}, {usage:?})", data.len()));
    }

    fn vertex_attrib_pointer(&self, attrib: AttribLocation, components: i32) {
        self.state.borrow_mut().record(format!(
            "vertex_attrib_pointer({}, {components})",
            attrib.0
        ));
    }

    fn enable_vertex_attrib_array(&self, attrib: AttribLocation) {
        let mut s = self.state.borrow_mut();
        s.enabled_attribs.insert(attrib.0);
        s.record(format!("enable_vertex_attrib_array({})", attrib.0));
    }

    fn disable_vertex_attrib_array(&self, attrib: AttribLocation) {
        let mut s = self.state.borrow_mut();
        s.enabled_attribs.remove(&attrib.0);
        s.record(format!("disable_vertex_attrib_array({})", attrib.0));
    }

    fn draw_triangle_strip(&self, vertices: i32) {
        let mut s = self.state.borrow_mut();
        // A draw with the stencil test enabled and a Replace pass op writes
        // the stencil buffer; anything else leaves it untouched.
        if s.enabled.contains(&Capability::StencilTest) && s.stencil_op.2 == StencilOp::Replace {
            s.stencil_zeroed = false;
        }
        s.record(format!("draw_triangle_strip({vertices})"));
    }
}

impl RecordingContext {
    fn store_uniform(&self, location: Option<UniformLocation>, value: UniformValue) {
        let mut s = self.state.borrow_mut();
        let Some(program) = s.current_program else {
            s.record("uniform(<no program>)".into());
            return;
        };
        match location {
            Some(loc) => {
                s.uniform_values.insert((program.0, loc.0), value.clone());
                s.record(format!("uniform({}, {value:?})", loc.0));
            }
            // GL ignores uploads to location -1.
            None => s.record("uniform(<absent>)".into()),
        }
    }
}
