//! Draw-call contracts for every primitive, exercised against the recording
//! context.

use fx_renderer::gl::recording::RecordingContext;
use fx_renderer::gl::Capability;
use fx_renderer::{
    BlurPass, Color, CornerLocation, DecorationData, FxRenderer, FxTexture, Mat3, Output,
    OutputTransform, Rect, RenderError, Severity, SrcRect, TextureTarget,
};

const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);
const TRANSLUCENT: Color = Color::new(1.0, 0.0, 0.0, 0.5);

fn renderer_with_frame() -> (RecordingContext, FxRenderer<RecordingContext>) {
    let gl = RecordingContext::new();
    let mut renderer = FxRenderer::new(gl.clone()).expect("create renderer");
    renderer.begin(&Output::new(800, 600, OutputTransform::Normal));
    (gl, renderer)
}

fn output_matrix() -> Mat3 {
    Mat3::projection(800, 600, OutputTransform::Normal)
}

fn texture(gl: &RecordingContext, target: TextureTarget, has_alpha: bool) -> FxTexture {
    use fx_renderer::gl::GlContext;
    let id = gl.create_texture().expect("texture id");
    FxTexture::new(id, target, 64, 32, has_alpha)
}

#[test]
fn zero_area_boxes_are_silent_noops() {
    let (gl, mut renderer) = renderer_with_frame();
    let matrix = output_matrix();
    let tex = texture(&gl, TextureTarget::Texture2d, true);
    let deco = DecorationData::default();

    for rect in [Rect::new(10, 10, 0, 5), Rect::new(10, 10, 5, 0)] {
        let baseline = gl.call_count();

        renderer.render_rect(&rect, RED, &matrix).unwrap();
        renderer
            .render_rounded_rect(&rect, RED, &matrix, 8, CornerLocation::All)
            .unwrap();
        renderer
            .render_border_corner(&rect, RED, &matrix, CornerLocation::TopLeft, 8, 2)
            .unwrap();
        renderer
            .render_box_shadow(&rect, RED, &matrix, 8, 2.0)
            .unwrap();
        renderer
            .render_texture(&tex, &rect, &matrix, &deco)
            .unwrap();

        assert_eq!(gl.call_count(), baseline, "zero-area draw touched GL state");
    }
}

#[test]
#[should_panic(expected = "non-negative")]
fn negative_dimensions_are_a_contract_violation() {
    let (_gl, mut renderer) = renderer_with_frame();
    let _ = renderer.render_rect(&Rect::new(0, 0, -5, 10), RED, &output_matrix());
}

#[test]
#[should_panic(expected = "bottom-corner")]
fn bottom_corner_selector_is_a_contract_violation() {
    let (_gl, mut renderer) = renderer_with_frame();
    let _ = renderer.render_rounded_rect(
        &Rect::new(0, 0, 10, 10),
        RED,
        &output_matrix(),
        4,
        CornerLocation::BottomLeft,
    );
}

#[test]
fn opaque_rect_disables_blending_and_translucent_enables_it() {
    let (gl, mut renderer) = renderer_with_frame();
    let matrix = output_matrix();
    let rect = Rect::new(100, 100, 50, 50);

    renderer.render_rect(&rect, RED, &matrix).unwrap();
    assert!(!gl.is_enabled(Capability::Blend));

    renderer.render_rect(&rect, TRANSLUCENT, &matrix).unwrap();
    assert!(gl.is_enabled(Capability::Blend));
}

#[test]
fn rounded_rect_always_blends() {
    let (gl, mut renderer) = renderer_with_frame();
    renderer
        .render_rounded_rect(
            &Rect::new(0, 0, 40, 40),
            RED,
            &output_matrix(),
            0,
            CornerLocation::All,
        )
        .unwrap();
    assert!(gl.is_enabled(Capability::Blend));
}

#[test]
fn rounded_rect_variant_selects_the_matching_program() {
    let (gl, mut renderer) = renderer_with_frame();
    let matrix = output_matrix();
    let rect = Rect::new(10, 10, 40, 40);

    for (corner, selector) in [
        (CornerLocation::All, "#define SOURCE 0\n"),
        (CornerLocation::TopLeft, "#define SOURCE 1\n"),
        (CornerLocation::TopRight, "#define SOURCE 2\n"),
    ] {
        renderer
            .render_rounded_rect(&rect, RED, &matrix, 9, corner)
            .unwrap();
        let program = gl.current_program().expect("program bound");
        let source = gl.fragment_source(program).expect("fragment source");
        assert!(source.starts_with(selector), "{corner:?} used {source:.40}");
        assert_eq!(gl.uniform_f32(program, "radius"), Some(9.0));
        assert_eq!(gl.uniform_vec2(program, "size"), Some([40.0, 40.0]));
        assert_eq!(gl.uniform_vec2(program, "position"), Some([10.0, 10.0]));
    }
}

#[test]
fn uploaded_matrix_is_the_transposed_composition() {
    let (gl, mut renderer) = renderer_with_frame();
    let matrix = output_matrix();
    let rect = Rect::new(100, 100, 50, 50);
    renderer.render_rect(&rect, RED, &matrix).unwrap();

    let program = gl.current_program().unwrap();
    let uploaded = gl.uniform_mat3(program, "proj").expect("matrix uploaded");

    let frame_projection = Mat3::projection(800, 600, OutputTransform::Flipped180);
    let model = Mat3::project_box(&rect, OutputTransform::Normal, 0.0, &matrix);
    let expected = frame_projection.multiply(&model).transpose();
    assert_eq!(uploaded, expected);
}

#[test]
fn border_corner_with_zero_thickness_is_a_noop() {
    let (gl, mut renderer) = renderer_with_frame();
    let baseline = gl.call_count();
    renderer
        .render_border_corner(
            &Rect::new(0, 0, 20, 20),
            RED,
            &output_matrix(),
            CornerLocation::BottomRight,
            8,
            0,
        )
        .unwrap();
    assert_eq!(gl.call_count(), baseline);
}

#[test]
fn border_corner_sets_exactly_one_location_flag() {
    let (gl, mut renderer) = renderer_with_frame();
    renderer
        .render_border_corner(
            &Rect::new(0, 0, 20, 20),
            RED,
            &output_matrix(),
            CornerLocation::BottomRight,
            8,
            2,
        )
        .unwrap();

    let program = gl.current_program().unwrap();
    let flags = [
        gl.uniform_f32(program, "is_top_left").unwrap(),
        gl.uniform_f32(program, "is_top_right").unwrap(),
        gl.uniform_f32(program, "is_bottom_left").unwrap(),
        gl.uniform_f32(program, "is_bottom_right").unwrap(),
    ];
    assert_eq!(flags.iter().sum::<f32>(), 1.0);
    assert_eq!(flags[3], 1.0);
    assert_eq!(gl.uniform_vec2(program, "half_size"), Some([10.0, 10.0]));
    assert_eq!(gl.uniform_f32(program, "half_thickness"), Some(1.0));
}

#[test]
fn box_shadow_resets_stencil_state_for_any_radius() {
    for radius in [0, 8] {
        let (gl, mut renderer) = renderer_with_frame();
        renderer
            .render_box_shadow(&Rect::new(90, 90, 70, 70), RED, &output_matrix(), radius, 4.0)
            .unwrap();

        assert!(
            !gl.is_enabled(Capability::StencilTest),
            "stencil test leaked (radius {radius})"
        );
        assert!(
            gl.stencil_cleared_to_zero(),
            "stencil buffer not cleared (radius {radius})"
        );
        assert_eq!(
            gl.blend_func(),
            (
                fx_renderer::gl::BlendFactor::One,
                fx_renderer::gl::BlendFactor::OneMinusSrcAlpha
            ),
            "premultiplied blend func not restored"
        );
        assert_eq!(gl.color_mask(), (true, true, true, true));
    }
}

#[test]
fn box_shadow_masks_the_inner_rect_before_filling() {
    let (gl, mut renderer) = renderer_with_frame();
    let matrix = output_matrix();

    // Learn which program the all-corners mask variant uses.
    renderer
        .render_rounded_rect(&Rect::new(0, 0, 10, 10), RED, &matrix, 1, CornerLocation::All)
        .unwrap();
    let mask_program = gl.current_program().unwrap();

    let start = gl.call_count();
    renderer
        .render_box_shadow(&Rect::new(90, 90, 70, 70), RED, &matrix, 8, 4.0)
        .unwrap();

    // Two draws in order: the color-masked stencil stamp, then the falloff
    // quad with color writes restored.
    let interesting: Vec<String> = gl.calls()[start..]
        .iter()
        .filter(|c| c.starts_with("draw_triangle_strip") || c.starts_with("color_mask"))
        .cloned()
        .collect();
    assert_eq!(
        interesting,
        vec![
            "color_mask(false, false, false, false)",
            "draw_triangle_strip(4)",
            "color_mask(true, true, true, true)",
            "draw_triangle_strip(4)",
        ]
    );

    // The mask quad is the shadow box inset by the sigma on each side.
    assert_eq!(gl.uniform_vec2(mask_program, "position"), Some([94.0, 94.0]));
    assert_eq!(gl.uniform_vec2(mask_program, "size"), Some([62.0, 62.0]));
    assert_eq!(gl.uniform_f32(mask_program, "radius"), Some(8.0));

    // The falloff quad covers the full shadow box.
    let shadow_program = gl.current_program().unwrap();
    assert_eq!(gl.uniform_f32(shadow_program, "blur_sigma"), Some(4.0));
    assert_eq!(gl.uniform_vec2(shadow_program, "size"), Some([70.0, 70.0]));
    assert_eq!(gl.uniform_vec2(shadow_program, "position"), Some([90.0, 90.0]));
}

#[test]
fn subtexture_normalizes_source_coordinates() {
    let (gl, mut renderer) = renderer_with_frame();
    let tex = texture(&gl, TextureTarget::Texture2d, true);
    let src = SrcRect::new(16.0, 8.0, 32.0, 16.0);
    let dst = Rect::new(0, 0, 100, 100);

    renderer
        .render_subtexture(&tex, &src, &dst, &output_matrix(), &DecorationData::default())
        .unwrap();

    // Texture is 64x32: x spans 0.25..0.75, y spans 0.25..0.75.
    let texcoord = gl.last_array_buffer_upload().expect("texcoord upload");
    assert_eq!(
        texcoord,
        vec![0.75, 0.25, 0.25, 0.25, 0.75, 0.75, 0.25, 0.75]
    );
}

#[test]
fn texture_variant_tracks_format_and_alpha() {
    let (gl, mut renderer) = renderer_with_frame();
    let matrix = output_matrix();
    let dst = Rect::new(0, 0, 10, 10);
    let deco = DecorationData::default();

    let opaque = texture(&gl, TextureTarget::Texture2d, false);
    renderer.render_texture(&opaque, &dst, &matrix, &deco).unwrap();
    let source = gl.fragment_source(gl.current_program().unwrap()).unwrap();
    assert!(source.starts_with("#define SOURCE 2\n"), "expected RGBX");
    // Opaque, unrounded, full alpha: blending off.
    assert!(!gl.is_enabled(Capability::Blend));

    let alpha = texture(&gl, TextureTarget::Texture2d, true);
    renderer.render_texture(&alpha, &dst, &matrix, &deco).unwrap();
    let source = gl.fragment_source(gl.current_program().unwrap()).unwrap();
    assert!(source.starts_with("#define SOURCE 1\n"), "expected RGBA");
    assert!(gl.is_enabled(Capability::Blend));

    let external = texture(&gl, TextureTarget::External, true);
    renderer
        .render_texture(&external, &dst, &matrix, &deco)
        .unwrap();
    let source = gl.fragment_source(gl.current_program().unwrap()).unwrap();
    assert!(source.starts_with("#define SOURCE 3\n"), "expected external");
}

#[test]
fn decoration_uniforms_reach_the_shader() {
    let (gl, mut renderer) = renderer_with_frame();
    let tex = texture(&gl, TextureTarget::Texture2d, true);
    let deco = DecorationData {
        alpha: 0.8,
        dim: 0.25,
        dim_color: Color::new(0.1, 0.2, 0.3, 1.0),
        corner_radius: 12,
        saturation: 0.5,
        has_titlebar: true,
    };

    renderer
        .render_texture(&tex, &Rect::new(5, 6, 70, 80), &output_matrix(), &deco)
        .unwrap();

    let program = gl.current_program().unwrap();
    assert_eq!(gl.uniform_f32(program, "alpha"), Some(0.8));
    assert_eq!(gl.uniform_f32(program, "dim"), Some(0.25));
    assert_eq!(
        gl.uniform_vec4(program, "dim_color"),
        Some([0.1, 0.2, 0.3, 1.0])
    );
    assert_eq!(gl.uniform_f32(program, "radius"), Some(12.0));
    assert_eq!(gl.uniform_f32(program, "saturation"), Some(0.5));
    assert_eq!(gl.uniform_f32(program, "has_titlebar"), Some(1.0));
    assert_eq!(gl.uniform_vec2(program, "size"), Some([70.0, 80.0]));
    assert_eq!(gl.uniform_vec2(program, "position"), Some([5.0, 6.0]));

    // The texture is unbound again afterwards.
    assert_eq!(gl.bound_texture(TextureTarget::Texture2d), None);
}

#[test]
fn external_textures_fail_recoverably_when_unsupported() {
    let gl = RecordingContext::without_external_textures();
    let mut renderer = FxRenderer::new(gl.clone()).expect("create renderer");
    renderer.begin(&Output::new(800, 600, OutputTransform::Normal));
    let tex = texture(&gl, TextureTarget::External, true);

    let baseline = gl.draw_count();
    let err = renderer
        .render_texture(&tex, &Rect::new(0, 0, 10, 10), &output_matrix(), &DecorationData::default())
        .expect_err("external sampling must fail");

    assert!(matches!(err, RenderError::ExternalTexturesUnsupported));
    assert_eq!(err.severity(), Severity::Recoverable);
    assert_eq!(gl.draw_count(), baseline, "failed draw must not draw");

    // Subsequent unrelated draws still work.
    renderer
        .render_rect(&Rect::new(0, 0, 10, 10), RED, &output_matrix())
        .unwrap();
}

#[test]
fn blur_passes_disable_blend_and_stencil_and_pick_offsets() {
    let (gl, mut renderer) = renderer_with_frame();
    let source = renderer.effects_buffer.texture().expect("effects texture");
    let matrix = Mat3::projection(800, 600, OutputTransform::Flipped180);

    renderer
        .render_blur_pass(&matrix, &source, BlurPass::Down, 5)
        .unwrap();
    assert!(!gl.is_enabled(Capability::Blend));
    assert!(!gl.is_enabled(Capability::StencilTest));

    let program = gl.current_program().unwrap();
    let fragment = gl.fragment_source(program).unwrap();
    assert!(fragment.contains("v_texcoord * 2.0"), "down-pass kernel");
    assert_eq!(gl.uniform_f32(program, "radius"), Some(5.0));
    assert_eq!(
        gl.uniform_vec2(program, "halfpixel"),
        Some([0.5 / 400.0, 0.5 / 300.0])
    );

    renderer
        .render_blur_pass(&matrix, &source, BlurPass::Up, 5)
        .unwrap();
    let program = gl.current_program().unwrap();
    let fragment = gl.fragment_source(program).unwrap();
    assert!(fragment.contains("v_texcoord / 2.0"), "up-pass kernel");
    assert_eq!(
        gl.uniform_vec2(program, "halfpixel"),
        Some([0.5 / 1600.0, 0.5 / 1200.0])
    );
}

#[test]
fn blur_radius_zero_uploads_an_identity_kernel_radius() {
    // With radius 0 every tap in both kernels lands on the source texel, so
    // a down/up round trip reproduces the input; the draw side of that
    // contract is a zero radius uniform.
    let (gl, mut renderer) = renderer_with_frame();
    let source = renderer.effects_buffer.texture().unwrap();
    let matrix = Mat3::projection(800, 600, OutputTransform::Flipped180);

    for pass in [BlurPass::Down, BlurPass::Up] {
        renderer.render_blur_pass(&matrix, &source, pass, 0).unwrap();
        let program = gl.current_program().unwrap();
        assert_eq!(gl.uniform_f32(program, "radius"), Some(0.0));
    }
}
