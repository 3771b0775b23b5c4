//! Descriptors for externally produced textures.
//!
//! The renderer never uploads surface content itself; the compositor's
//! buffer-import subsystem hands it ready textures described by these
//! values. Only the properties the draw algorithms need are exposed: the
//! handle, the sampling target, the pixel size, and whether the format
//! carries meaningful alpha.

use crate::gl::TextureId;

/// The GL sampling target a texture was imported for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureTarget {
    /// A regular two-dimensional texture.
    Texture2d,
    /// An EGLImage-backed external texture (`GL_OES_EGL_image_external`);
    /// sampling it requires a context extension and may be unsupported.
    External,
}

/// A borrowed handle to a texture owned by the buffer-import subsystem.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FxTexture {
    pub id: TextureId,
    pub target: TextureTarget,
    pub width: i32,
    pub height: i32,
    pub has_alpha: bool,
}

impl FxTexture {
    pub const fn new(
        id: TextureId,
        target: TextureTarget,
        width: i32,
        height: i32,
        has_alpha: bool,
    ) -> Self {
        Self {
            id,
            target,
            width,
            height,
            has_alpha,
        }
    }
}
