//! Display-sized render targets and the shared stencil renderbuffer.
//!
//! Every off-screen target is an (FBO, RGBA texture) pair allocated at the
//! output's transformed resolution and recreated when that changes. The
//! platform-presented framebuffer is never represented here: it is a
//! borrowed raw id the frame controller captures and rebinds.
//!
//! Completeness checks are advisory. An incomplete target is logged and
//! rendering continues; a compositor dropping a frame's effects is
//! acceptable, crashing mid-frame is not.

use crate::gl::{FramebufferId, GlContext, RenderbufferId, TextureId};
use crate::texture::{FxTexture, TextureTarget};

/// An owned off-screen render target.
///
/// Starts out unallocated; [`Framebuffer::create`] allocates or resizes it,
/// [`Framebuffer::release`] returns it to the unallocated state. Both are
/// idempotent. There is no `Drop` glue — GPU objects can only be deleted
/// while the owning context is current, so teardown is explicit.
#[derive(Debug, Default)]
pub struct Framebuffer {
    fb: Option<FramebufferId>,
    texture: Option<TextureId>,
    width: i32,
    height: i32,
}

impl Framebuffer {
    pub const fn unallocated() -> Self {
        Self {
            fb: None,
            texture: None,
            width: 0,
            height: 0,
        }
    }

    /// The underlying framebuffer id, if allocated.
    pub fn id(&self) -> Option<FramebufferId> {
        self.fb
    }

    /// Descriptor of the color attachment, for sampling the buffer's
    /// contents (blur ping-pong reads go through this).
    pub fn texture(&self) -> Option<FxTexture> {
        self.texture.map(|id| {
            FxTexture::new(id, TextureTarget::Texture2d, self.width, self.height, true)
        })
    }

    pub const fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    /// Allocate the target at `width` x `height`, or resize it if the size
    /// changed. Calling this again with the same size performs no GL work.
    /// With `bind` set the buffer additionally becomes the active render
    /// target.
    ///
    /// Returns `true` when storage was (re)allocated.
    pub fn create<G: GlContext>(&mut self, gl: &G, width: i32, height: i32, bind: bool) -> bool {
        let mut first_alloc = false;

        if self.fb.is_none() {
            match gl.create_framebuffer() {
                Ok(fb) => {
                    self.fb = Some(fb);
                    first_alloc = true;
                }
                Err(err) => {
                    tracing::error!("failed to allocate framebuffer object: {err}");
                    return false;
                }
            }
        }

        if self.texture.is_none() {
            match gl.create_texture() {
                Ok(texture) => {
                    self.texture = Some(texture);
                    first_alloc = true;
                    gl.bind_texture(TextureTarget::Texture2d, Some(texture));
                    gl.tex_min_filter_linear(TextureTarget::Texture2d);
                    gl.tex_mag_filter_linear(TextureTarget::Texture2d);
                }
                Err(err) => {
                    tracing::error!("failed to allocate framebuffer texture: {err}");
                    return false;
                }
            }
        }

        let resized = first_alloc || self.width != width || self.height != height;
        if resized {
            let texture = self.texture.expect("texture allocated above");
            gl.bind_texture(TextureTarget::Texture2d, Some(texture));
            gl.alloc_rgba_storage(width, height);
            gl.bind_framebuffer(self.fb.expect("framebuffer allocated above"));
            gl.attach_color_texture(texture);
            if !gl.framebuffer_complete() {
                tracing::error!(
                    width,
                    height,
                    "framebuffer incomplete after resize; output may render incorrectly"
                );
            }
            gl.bind_texture(TextureTarget::Texture2d, None);
            self.width = width;
            self.height = height;
            tracing::debug!(width, height, "allocated display-sized framebuffer");
        }

        if bind {
            self.bind(gl, width, height);
        }
        resized
    }

    /// Make the buffer the active render target and size the viewport to it.
    pub fn bind<G: GlContext>(&self, gl: &G, width: i32, height: i32) {
        let Some(fb) = self.fb else {
            tracing::error!("attempted to bind an unallocated framebuffer");
            return;
        };
        gl.bind_framebuffer(fb);
        gl.viewport(0, 0, width, height);
    }

    /// Free the GPU resources. Safe to call repeatedly.
    pub fn release<G: GlContext>(&mut self, gl: &G) {
        if let Some(fb) = self.fb.take() {
            gl.delete_framebuffer(fb);
        }
        if let Some(texture) = self.texture.take() {
            gl.delete_texture(texture);
        }
        self.width = 0;
        self.height = 0;
    }
}

/// The shared stencil renderbuffer, attached to whichever framebuffer is
/// bound when [`StencilBuffer::ensure`] runs.
#[derive(Debug, Default)]
pub struct StencilBuffer {
    rb: Option<RenderbufferId>,
    width: i32,
    height: i32,
}

impl StencilBuffer {
    pub const fn unallocated() -> Self {
        Self {
            rb: None,
            width: 0,
            height: 0,
        }
    }

    pub fn id(&self) -> Option<RenderbufferId> {
        self.rb
    }

    /// Create the stencil storage at the output resolution and attach it to
    /// the currently bound framebuffer. The desired render target must
    /// already be bound. No-op when already allocated at that size;
    /// reallocates after a resize.
    pub fn ensure<G: GlContext>(&mut self, gl: &G, width: i32, height: i32) {
        if self.rb.is_some() {
            if self.width == width && self.height == height {
                return;
            }
            self.release(gl);
        }

        let rb = match gl.create_renderbuffer() {
            Ok(rb) => rb,
            Err(err) => {
                tracing::error!("failed to allocate stencil renderbuffer: {err}");
                return;
            }
        };
        gl.bind_renderbuffer(Some(rb));
        gl.renderbuffer_stencil_storage(width, height);
        gl.attach_stencil_renderbuffer(rb);
        if !gl.framebuffer_complete() {
            tracing::error!(
                width,
                height,
                "stencil attachment left the framebuffer incomplete"
            );
        } else {
            tracing::debug!(width, height, "stencil buffer attached");
        }
        self.rb = Some(rb);
        self.width = width;
        self.height = height;
    }

    /// Free the renderbuffer. Safe to call repeatedly.
    pub fn release<G: GlContext>(&mut self, gl: &G) {
        if let Some(rb) = self.rb.take() {
            gl.delete_renderbuffer(rb);
        }
        self.width = 0;
        self.height = 0;
    }
}
