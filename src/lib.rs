//! GPU rendering backend for a compositor's visual-effects layer.
//!
//! This crate draws window contents and decorations — rounded corners,
//! borders, drop shadows, background blur — into output framebuffers with a
//! fixed GLES2 shader pipeline. It is driven by the compositor's scene-graph
//! walk, which issues one draw call per visible item between
//! [`FxRenderer::begin`] and [`FxRenderer::end`]; scene composition, input,
//! window placement, texture import, and presentation all live elsewhere.
//!
//! The graphics API is abstracted behind [`gl::GlContext`]:
//! [`gl::glow_backend::GlowContext`] talks to a real context, while
//! [`gl::recording::RecordingContext`] simulates the GL state machine so the
//! draw algorithms can be exercised headlessly:
//!
//! ```
//! use fx_renderer::gl::recording::RecordingContext;
//! use fx_renderer::{Color, FxRenderer, Mat3, Output, OutputTransform, Rect};
//!
//! let mut renderer = FxRenderer::new(RecordingContext::new()).unwrap();
//! let output = Output::new(800, 600, OutputTransform::Normal);
//!
//! renderer.begin(&output);
//! renderer.clear(Color::TRANSPARENT);
//! let matrix = Mat3::projection(800, 600, OutputTransform::Normal);
//! renderer
//!     .render_rect(&Rect::new(100, 100, 50, 50), Color::BLACK, &matrix)
//!     .unwrap();
//! renderer.end();
//! ```

pub mod error;
pub mod geometry;
pub mod gl;
pub mod matrix;
pub mod renderer;
pub mod texture;

pub use error::{RenderError, Severity};
pub use geometry::{Color, Output, OutputTransform, Rect, SrcRect};
pub use matrix::Mat3;
pub use renderer::framebuffer::{Framebuffer, StencilBuffer};
pub use renderer::{BlurPass, CornerLocation, DecorationData, FxRenderer};
pub use texture::{FxTexture, TextureTarget};
