//! Row-major 3x3 matrices for projecting pixel-space boxes into normalized
//! device coordinates.
//!
//! The convention throughout the crate is row-major with post-multiplied
//! column vectors. GLES2 requires the transpose flag of `glUniformMatrix3fv`
//! to be `GL_FALSE`, so every matrix is transposed explicitly right before
//! upload; anything read back from the upload boundary is column-major.

use bytemuck::{Pod, Zeroable};

use crate::geometry::{OutputTransform, Rect};

/// A row-major 3x3 matrix over `f32`.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct Mat3(pub [f32; 9]);

impl Mat3 {
    pub const IDENTITY: Self = Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// Matrix product `self * other`.
    pub fn multiply(&self, other: &Mat3) -> Mat3 {
        let a = &self.0;
        let b = &other.0;
        let mut out = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                out[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        Mat3(out)
    }

    pub fn transpose(&self) -> Mat3 {
        let m = &self.0;
        Mat3([m[0], m[3], m[6], m[1], m[4], m[7], m[2], m[5], m[8]])
    }

    pub fn translate(&self, x: f32, y: f32) -> Mat3 {
        self.multiply(&Mat3([1.0, 0.0, x, 0.0, 1.0, y, 0.0, 0.0, 1.0]))
    }

    pub fn scale(&self, x: f32, y: f32) -> Mat3 {
        self.multiply(&Mat3([x, 0.0, 0.0, 0.0, y, 0.0, 0.0, 0.0, 1.0]))
    }

    pub fn rotate(&self, rad: f32) -> Mat3 {
        let (sin, cos) = rad.sin_cos();
        self.multiply(&Mat3([cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0]))
    }

    fn apply_transform(&self, transform: OutputTransform) -> Mat3 {
        let t = transform.coefficients();
        self.multiply(&Mat3([t[0], t[1], 0.0, t[2], t[3], 0.0, 0.0, 0.0, 1.0]))
    }

    /// Build the projection from output pixel space onto normalized device
    /// coordinates for one of the eight output transforms.
    ///
    /// `width` and `height` are the output's native (untransformed) mode
    /// size; boxes handed to [`Mat3::project_box`] live in the transformed
    /// coordinate space, whose extent is the transposed size for the four
    /// quarter-turn variants. For every variant, the full-output box lands
    /// exactly on the NDC corners.
    pub fn projection(width: i32, height: i32, transform: OutputTransform) -> Mat3 {
        let t = transform.coefficients();
        let x = 2.0 / width as f32;
        let y = 2.0 / height as f32;

        let mut m = [0.0f32; 9];

        // Rotation + reflection. The second row is negated: pixel space runs
        // top-down while NDC runs bottom-up.
        m[0] = x * t[0];
        m[1] = x * t[1];
        m[3] = y * -t[2];
        m[4] = y * -t[3];

        // Translation; exactly one coefficient per row is nonzero, so the
        // row sum carries its sign.
        m[2] = -1.0f32.copysign(m[0] + m[1]);
        m[5] = -1.0f32.copysign(m[3] + m[4]);

        m[8] = 1.0;
        Mat3(m)
    }

    /// Model-to-clip matrix for drawing the unit quad into `rect`, optionally
    /// rotated by `rotation` radians about the rect center, composed with
    /// `projection`.
    pub fn project_box(
        rect: &Rect,
        transform: OutputTransform,
        rotation: f32,
        projection: &Mat3,
    ) -> Mat3 {
        let x = rect.x as f32;
        let y = rect.y as f32;
        let width = rect.width as f32;
        let height = rect.height as f32;

        let mut mat = Mat3::IDENTITY.translate(x, y);

        if rotation != 0.0 {
            mat = mat
                .translate(width / 2.0, height / 2.0)
                .rotate(rotation)
                .translate(-width / 2.0, -height / 2.0);
        }

        mat = mat.scale(width, height);

        if transform != OutputTransform::Normal {
            mat = mat
                .translate(0.5, 0.5)
                .apply_transform(transform)
                .translate(-0.5, -0.5);
        }

        projection.multiply(&mat)
    }

    /// Apply the matrix to a 2D point (homogeneous w = 1).
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.0;
        (
            m[0] * x + m[1] * y + m[2],
            m[3] * x + m[4] * y + m[5],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::OutputTransform;

    fn assert_close(actual: (f32, f32), expected: (f32, f32)) {
        assert!(
            (actual.0 - expected.0).abs() < 1e-5 && (actual.1 - expected.1).abs() < 1e-5,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn normal_projection_maps_pixel_corners_to_ndc() {
        let proj = Mat3::projection(800, 600, OutputTransform::Normal);
        assert_close(proj.transform_point(0.0, 0.0), (-1.0, 1.0));
        assert_close(proj.transform_point(800.0, 0.0), (1.0, 1.0));
        assert_close(proj.transform_point(0.0, 600.0), (-1.0, -1.0));
        assert_close(proj.transform_point(800.0, 600.0), (1.0, -1.0));
    }

    #[test]
    fn flipped_180_projection_inverts_y() {
        // The frame controller renders into offscreen textures with this
        // transform so that sampling them later comes out upright.
        let proj = Mat3::projection(800, 600, OutputTransform::Flipped180);
        assert_close(proj.transform_point(0.0, 0.0), (-1.0, -1.0));
        assert_close(proj.transform_point(800.0, 600.0), (1.0, 1.0));
    }

    #[test]
    fn multiply_identity_is_noop() {
        let m = Mat3::projection(123, 77, OutputTransform::Rotate90);
        assert_eq!(m.multiply(&Mat3::IDENTITY), m);
        assert_eq!(Mat3::IDENTITY.multiply(&m), m);
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        let m = Mat3([0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(
            m.transpose(),
            Mat3([0.0, 3.0, 6.0, 1.0, 4.0, 7.0, 2.0, 5.0, 8.0])
        );
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn project_box_maps_unit_quad_onto_rect() {
        let proj = Mat3::projection(800, 600, OutputTransform::Normal);
        let rect = Rect::new(100, 100, 50, 50);
        let model = Mat3::project_box(&rect, OutputTransform::Normal, 0.0, &proj);

        // Unit-quad corners land on the rect corners in NDC.
        assert_close(
            model.transform_point(0.0, 0.0),
            proj.transform_point(100.0, 100.0),
        );
        assert_close(
            model.transform_point(1.0, 1.0),
            proj.transform_point(150.0, 150.0),
        );
    }
}
