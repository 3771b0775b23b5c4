//! Frame lifecycle: begin/end buffer management, clearing, scissor, and the
//! full composite scenario.

use fx_renderer::gl::recording::RecordingContext;
use fx_renderer::gl::Capability;
use fx_renderer::{
    Color, CornerLocation, FxRenderer, Mat3, Output, OutputTransform, Rect,
};

const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

fn new_renderer() -> (RecordingContext, FxRenderer<RecordingContext>) {
    let gl = RecordingContext::new();
    let renderer = FxRenderer::new(gl.clone()).expect("create renderer");
    (gl, renderer)
}

#[test]
fn begin_provisions_buffers_and_binds_the_main_target() {
    let (gl, mut renderer) = new_renderer();
    renderer.begin(&Output::new(800, 600, OutputTransform::Normal));

    let main_fb = renderer.main_buffer.id().expect("main buffer allocated");
    assert_eq!(gl.bound_framebuffer(), main_fb.0 as i32);
    assert_eq!(gl.viewport(), (0, 0, 800, 600));
    assert_eq!(renderer.main_buffer.size(), (800, 600));
    assert_eq!(renderer.effects_buffer.size(), (800, 600));
    assert_eq!(renderer.effects_buffer_swapped.size(), (800, 600));
    assert!(gl.stencil_attachment(main_fb).is_some(), "stencil attached");
}

#[test]
fn begin_respects_the_output_transform_resolution() {
    let (_gl, mut renderer) = new_renderer();
    renderer.begin(&Output::new(1920, 1080, OutputTransform::Rotate90));
    assert_eq!(renderer.main_buffer.size(), (1080, 1920));
}

#[test]
fn end_restores_the_platform_framebuffer_and_releases_buffers() {
    let (gl, mut renderer) = new_renderer();
    gl.set_framebuffer_binding(42);

    renderer.begin(&Output::new(800, 600, OutputTransform::Normal));
    assert_ne!(gl.bound_framebuffer(), 42);

    renderer.end();
    assert_eq!(gl.bound_framebuffer(), 42, "platform target is active again");
    assert_eq!(gl.viewport(), (0, 0, 800, 600));
    assert!(renderer.main_buffer.id().is_none(), "main buffer released");
}

#[test]
#[should_panic(expected = "platform framebuffer binding is invalid")]
fn begin_with_a_broken_platform_binding_is_fatal() {
    let (gl, mut renderer) = new_renderer();
    gl.set_framebuffer_binding(-1);
    renderer.begin(&Output::new(800, 600, OutputTransform::Normal));
}

#[test]
fn resize_reallocates_and_marks_the_cached_blur_dirty() {
    let (_gl, mut renderer) = new_renderer();
    renderer.begin(&Output::new(800, 600, OutputTransform::Normal));
    renderer.end();

    renderer.blur_buffer_dirty = false;
    renderer.begin(&Output::new(1024, 768, OutputTransform::Normal));
    assert!(renderer.blur_buffer_dirty, "resize must invalidate the blur");
    assert_eq!(renderer.main_buffer.size(), (1024, 768));
}

#[test]
fn effects_buffers_survive_frames_at_a_stable_size() {
    let (_gl, mut renderer) = new_renderer();
    renderer.begin(&Output::new(800, 600, OutputTransform::Normal));
    let ping = renderer.effects_buffer.texture().unwrap();
    renderer.end();

    renderer.begin(&Output::new(800, 600, OutputTransform::Normal));
    assert_eq!(
        renderer.effects_buffer.texture().unwrap(),
        ping,
        "same size, same backing texture"
    );
}

#[test]
fn clear_clears_color_and_stencil_together() {
    let (gl, mut renderer) = new_renderer();
    renderer.begin(&Output::new(800, 600, OutputTransform::Normal));

    renderer.clear(Color::new(0.0, 0.5, 0.0, 1.0));
    assert!(gl.stencil_cleared_to_zero());
    assert!(
        gl.calls()
            .iter()
            .any(|c| c == "clear(color: true, stencil: true)"),
        "color and stencil must clear in one call"
    );
}

#[test]
fn scissor_toggles_clipping() {
    let (gl, mut renderer) = new_renderer();
    renderer.begin(&Output::new(800, 600, OutputTransform::Normal));

    renderer.set_scissor(Some(Rect::new(10, 20, 300, 200)));
    assert!(gl.is_enabled(Capability::ScissorTest));
    assert_eq!(gl.scissor_box(), (10, 20, 300, 200));

    renderer.set_scissor(None);
    assert!(!gl.is_enabled(Capability::ScissorTest));
}

#[test]
fn destroy_releases_every_gpu_object() {
    let (gl, mut renderer) = new_renderer();
    renderer.begin(&Output::new(800, 600, OutputTransform::Normal));
    renderer.end();
    renderer.destroy();
    assert_eq!(gl.live_object_count(), 0, "destroy leaked GL objects");
}

/// The composite scenario: a frame with a flat rect, a rounded rect, and a
/// box shadow, each checking the pipeline state it leaves behind.
#[test]
fn full_frame_scenario_leaves_clean_state() {
    let (gl, mut renderer) = new_renderer();
    let output = Output::new(800, 600, OutputTransform::Normal);
    let matrix = Mat3::projection(800, 600, OutputTransform::Normal);

    renderer.begin(&output);
    renderer.clear(Color::TRANSPARENT);

    renderer
        .render_rect(&Rect::new(100, 100, 50, 50), RED, &matrix)
        .unwrap();
    assert!(
        !gl.is_enabled(Capability::Blend),
        "opaque rect leaves blending off"
    );

    renderer
        .render_rounded_rect(&Rect::new(100, 100, 50, 50), RED, &matrix, 8, CornerLocation::All)
        .unwrap();

    renderer
        .render_box_shadow(&Rect::new(90, 90, 70, 70), RED, &matrix, 8, 4.0)
        .unwrap();
    assert!(!gl.is_enabled(Capability::StencilTest));
    assert!(gl.stencil_cleared_to_zero());

    // Nothing but the frame's own main buffer is left bound, and no vertex
    // attribute arrays leak out of the draws.
    assert_eq!(
        gl.bound_framebuffer(),
        renderer.main_buffer.id().unwrap().0 as i32
    );
    assert_eq!(gl.enabled_attrib_count(), 0);
    assert_eq!(gl.draw_count(), 4, "three primitives, one stencil mask");
}
