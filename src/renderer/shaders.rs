//! The fixed GLES2 shader set, embedded as compile-time constants.
//!
//! One vertex shader is shared by every program. Fragment shaders that come
//! in several variants (corner selection for the rounded quad, sampling
//! source for the textured quad) are templates: a `#define SOURCE <n>`
//! line is prepended before compilation and the template branches on it
//! with the preprocessor. [`FragmentSource`] is the closed set of fragment
//! shaders the renderer links.

use std::borrow::Cow;

/// Corner set selector baked into the rounded-quad fragment shader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum RoundedQuadSource {
    All = 0,
    TopLeft = 1,
    TopRight = 2,
}

/// Sampling source selector baked into the textured-quad fragment shader.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TexSource {
    Rgba = 1,
    Rgbx = 2,
    External = 3,
}

/// Every fragment shader the renderer links, tagged with its variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FragmentSource {
    Quad,
    RoundedQuad(RoundedQuadSource),
    Corner,
    BoxShadow,
    BlurDown,
    BlurUp,
    Tex(TexSource),
}

impl FragmentSource {
    /// The GLSL text to compile: either a plain constant or a template with
    /// its variant selector substituted in.
    pub(crate) fn source(self) -> Cow<'static, str> {
        match self {
            Self::Quad => Cow::Borrowed(QUAD_FRAG_SRC),
            Self::RoundedQuad(variant) => {
                Cow::Owned(with_source_define(variant as i32, QUAD_ROUND_FRAG_SRC))
            }
            Self::Corner => Cow::Borrowed(CORNER_FRAG_SRC),
            Self::BoxShadow => Cow::Borrowed(BOX_SHADOW_FRAG_SRC),
            Self::BlurDown => Cow::Borrowed(BLUR_DOWN_FRAG_SRC),
            Self::BlurUp => Cow::Borrowed(BLUR_UP_FRAG_SRC),
            Self::Tex(variant) => Cow::Owned(with_source_define(variant as i32, TEX_FRAG_SRC)),
        }
    }
}

/// Prepend the variant selector constant to a fragment template.
fn with_source_define(selector: i32, template: &str) -> String {
    format!("#define SOURCE {selector}\n{template}")
}

/// Shared vertex shader: projects the unit quad and forwards texture
/// coordinates.
pub(crate) const COMMON_VERT_SRC: &str = r#"
uniform mat3 proj;
attribute vec2 pos;
attribute vec2 texcoord;
varying vec2 v_texcoord;

void main() {
	gl_Position = vec4(proj * vec3(pos, 1.0), 1.0);
	v_texcoord = texcoord;
}
"#;

pub(crate) const QUAD_FRAG_SRC: &str = r#"
precision mediump float;

uniform vec4 color;

void main() {
	gl_FragColor = color;
}
"#;

/// Template: `SOURCE` selects which corners the signed-distance rounding
/// applies to. Fully transparent fragments are discarded so the quad can
/// double as a stencil mask.
pub(crate) const QUAD_ROUND_FRAG_SRC: &str = r#"
#define SOURCE_ALL 0
#define SOURCE_TOP_LEFT 1
#define SOURCE_TOP_RIGHT 2

precision mediump float;

uniform vec4 color;
uniform vec2 size;
uniform vec2 position;
uniform float radius;

void main() {
#if SOURCE == SOURCE_ALL
	vec2 q = abs(gl_FragCoord.xy - position - size * 0.5) - size * 0.5 + radius;
	float dist = min(max(q.x, q.y), 0.0) + length(max(q, vec2(0.0))) - radius;
#else
	vec2 local = gl_FragCoord.xy - position;
#if SOURCE == SOURCE_TOP_LEFT
	vec2 q = vec2(radius) - local;
#elif SOURCE == SOURCE_TOP_RIGHT
	vec2 q = vec2(local.x - size.x + radius, radius - local.y);
#endif
	float dist = -1.0;
	if (q.x > 0.0 && q.y > 0.0) {
		dist = length(q) - radius;
	}
#endif
	float blend_amount = 1.0 - smoothstep(-1.0, 0.5, dist);
	vec4 frag_color = mix(vec4(0.0), color, blend_amount);
	if (frag_color.a == 0.0) {
		discard;
	}
	gl_FragColor = frag_color;
}
"#;

/// One L-shaped border corner. The active corner arrives as four
/// one-of-four float flags instead of a branch selector.
pub(crate) const CORNER_FRAG_SRC: &str = r#"
precision mediump float;

uniform vec4 color;
uniform float is_top_left;
uniform float is_top_right;
uniform float is_bottom_left;
uniform float is_bottom_right;
uniform vec2 position;
uniform float radius;
uniform vec2 half_size;
uniform float half_thickness;

float rounded_box_sdf(vec2 point, vec2 box, float corner) {
	return length(max(abs(point) - box + corner, 0.0)) - corner;
}

void main() {
	vec2 center = gl_FragCoord.xy - position - half_size;

	// keep only the quadrant this corner owns (y grows downward)
	if (is_top_left == 1.0 && (center.x > 0.0 || center.y > 0.0)) {
		discard;
	}
	if (is_top_right == 1.0 && (center.x < 0.0 || center.y > 0.0)) {
		discard;
	}
	if (is_bottom_left == 1.0 && (center.x > 0.0 || center.y < 0.0)) {
		discard;
	}
	if (is_bottom_right == 1.0 && (center.x < 0.0 || center.y < 0.0)) {
		discard;
	}

	float dist = rounded_box_sdf(center, half_size - half_thickness, radius);
	float outer = 1.0 - smoothstep(-1.0, 0.5, dist - half_thickness);
	float inner = 1.0 - smoothstep(-1.0, 0.5, dist + half_thickness);
	gl_FragColor = mix(vec4(0.0), color, outer - inner);
}
"#;

/// Gaussian box-shadow falloff, integrated analytically along x and sampled
/// along y.
pub(crate) const BOX_SHADOW_FRAG_SRC: &str = r#"
precision mediump float;

uniform vec4 color;
uniform vec2 position;
uniform vec2 size;
uniform float blur_sigma;
uniform float corner_radius;

float gaussian(float x, float sigma) {
	const float pi = 3.141592653589793;
	return exp(-(x * x) / (2.0 * sigma * sigma)) / (sqrt(2.0 * pi) * sigma);
}

// rational approximation of the error function
vec2 erf(vec2 x) {
	vec2 s = sign(x), a = abs(x);
	x = 1.0 + (0.278393 + (0.230389 + 0.078108 * (a * a)) * a) * a;
	x *= x;
	return s - s / (x * x);
}

// blurred coverage along the x axis for one scanline of the rounded box
float shadow_x(float x, float y, float sigma, float corner, vec2 half_size) {
	float delta = min(half_size.y - corner - abs(y), 0.0);
	float curved = half_size.x - corner
		+ sqrt(max(0.0, corner * corner - delta * delta));
	vec2 integral = 0.5 + 0.5 * erf((x + vec2(-curved, curved)) * (sqrt(0.5) / sigma));
	return integral.y - integral.x;
}

float shadow(vec2 lower, vec2 upper, vec2 point, float sigma, float corner) {
	vec2 center = (lower + upper) * 0.5;
	vec2 half_size = (upper - lower) * 0.5;
	point -= center;

	// the falloff is negligible past three sigma, so only sample there
	float low = point.y - half_size.y;
	float high = point.y + half_size.y;
	float start = clamp(-3.0 * sigma, low, high);
	float end = clamp(3.0 * sigma, low, high);

	float step = (end - start) / 4.0;
	float y = start + step * 0.5;
	float value = 0.0;
	for (int i = 0; i < 4; i++) {
		value += shadow_x(point.x, point.y - y, sigma, corner, half_size)
			* gaussian(y, sigma) * step;
		y += step;
	}
	return value;
}

void main() {
	float frag_alpha = color.a * shadow(position + blur_sigma,
		position + size - blur_sigma, gl_FragCoord.xy, blur_sigma, corner_radius);
	gl_FragColor = vec4(color.rgb, frag_alpha);
}
"#;

/// Blur down-pass: sample toward the half resolution with a diagonal cross.
pub(crate) const BLUR_DOWN_FRAG_SRC: &str = r#"
precision mediump float;

varying vec2 v_texcoord;
uniform sampler2D tex;
uniform float radius;
uniform vec2 halfpixel;

void main() {
	vec2 uv = v_texcoord * 2.0;
	vec4 sum = texture2D(tex, uv) * 4.0;
	sum += texture2D(tex, uv - halfpixel.xy * radius);
	sum += texture2D(tex, uv + halfpixel.xy * radius);
	sum += texture2D(tex, uv + vec2(halfpixel.x, -halfpixel.y) * radius);
	sum += texture2D(tex, uv - vec2(halfpixel.x, -halfpixel.y) * radius);
	gl_FragColor = sum / 8.0;
}
"#;

/// Blur up-pass: sample back toward the doubled resolution.
pub(crate) const BLUR_UP_FRAG_SRC: &str = r#"
precision mediump float;

varying vec2 v_texcoord;
uniform sampler2D tex;
uniform float radius;
uniform vec2 halfpixel;

void main() {
	vec2 uv = v_texcoord / 2.0;
	vec4 sum = texture2D(tex, uv + vec2(-halfpixel.x * 2.0, 0.0) * radius);
	sum += texture2D(tex, uv + vec2(-halfpixel.x, halfpixel.y) * radius) * 2.0;
	sum += texture2D(tex, uv + vec2(0.0, halfpixel.y * 2.0) * radius);
	sum += texture2D(tex, uv + vec2(halfpixel.x, halfpixel.y) * radius) * 2.0;
	sum += texture2D(tex, uv + vec2(halfpixel.x * 2.0, 0.0) * radius);
	sum += texture2D(tex, uv + vec2(halfpixel.x, -halfpixel.y) * radius) * 2.0;
	sum += texture2D(tex, uv + vec2(0.0, -halfpixel.y * 2.0) * radius);
	sum += texture2D(tex, uv + vec2(-halfpixel.x, -halfpixel.y) * radius) * 2.0;
	gl_FragColor = sum / 12.0;
}
"#;

/// Template: `SOURCE` selects the sampler type and whether the texture's
/// alpha channel is meaningful. Applies saturation, inactive-window dimming,
/// and the per-pixel corner rounding mask.
pub(crate) const TEX_FRAG_SRC: &str = r#"
#define SOURCE_TEXTURE_RGBA 1
#define SOURCE_TEXTURE_RGBX 2
#define SOURCE_TEXTURE_EXTERNAL 3

#if SOURCE == SOURCE_TEXTURE_EXTERNAL
#extension GL_OES_EGL_image_external : require
#endif

precision mediump float;

#if SOURCE == SOURCE_TEXTURE_EXTERNAL
uniform samplerExternalOES tex;
#else
uniform sampler2D tex;
#endif

varying vec2 v_texcoord;

uniform float alpha;
uniform float dim;
uniform vec4 dim_color;
uniform vec2 size;
uniform vec2 position;
uniform float radius;
uniform float saturation;
uniform float has_titlebar;

const vec3 saturation_weight = vec3(0.2125, 0.7154, 0.0721);

void main() {
#if SOURCE == SOURCE_TEXTURE_RGBX
	vec4 frag_color = vec4(texture2D(tex, v_texcoord).rgb, 1.0) * alpha;
#else
	vec4 frag_color = texture2D(tex, v_texcoord) * alpha;
#endif

	if (saturation != 1.0) {
		vec3 luminance = vec3(dot(frag_color.rgb, saturation_weight));
		frag_color = vec4(mix(luminance, frag_color.rgb, saturation), frag_color.a);
	}

	frag_color = mix(frag_color, dim_color * frag_color.a, dim);

	if (radius > 0.0) {
		vec2 corner_dist = min(gl_FragCoord.xy - position,
			position + size - gl_FragCoord.xy);
		// with a titlebar above, the top corners stay square
		if (corner_dist.x < radius && corner_dist.y < radius
				&& (has_titlebar == 0.0 || gl_FragCoord.y > position.y + radius)) {
			float dist = length(vec2(radius) - corner_dist) - radius;
			frag_color *= 1.0 - smoothstep(-1.0, 0.5, dist);
		}
	}

	gl_FragColor = frag_color;
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_define_is_prepended() {
        let source = FragmentSource::Tex(TexSource::Rgbx).source();
        assert!(source.starts_with("#define SOURCE 2\n"));
        assert!(source.contains("SOURCE_TEXTURE_RGBX"));
    }

    #[test]
    fn rounded_quad_variants_get_distinct_selectors() {
        let all = FragmentSource::RoundedQuad(RoundedQuadSource::All).source();
        let tl = FragmentSource::RoundedQuad(RoundedQuadSource::TopLeft).source();
        let tr = FragmentSource::RoundedQuad(RoundedQuadSource::TopRight).source();
        assert!(all.starts_with("#define SOURCE 0\n"));
        assert!(tl.starts_with("#define SOURCE 1\n"));
        assert!(tr.starts_with("#define SOURCE 2\n"));
        // one template serves all three
        fn body(source: &str) -> &str {
            &source[source.find('\n').unwrap()..]
        }
        assert_eq!(body(&all), body(&tl));
        assert_eq!(body(&all), body(&tr));
    }

    #[test]
    fn external_variant_requires_the_extension() {
        let source = FragmentSource::Tex(TexSource::External).source();
        assert!(source.contains("GL_OES_EGL_image_external"));
        assert!(source.contains("samplerExternalOES"));
    }

    #[test]
    fn every_fragment_source_has_an_entrypoint() {
        let sources = [
            FragmentSource::Quad,
            FragmentSource::RoundedQuad(RoundedQuadSource::All),
            FragmentSource::RoundedQuad(RoundedQuadSource::TopLeft),
            FragmentSource::RoundedQuad(RoundedQuadSource::TopRight),
            FragmentSource::Corner,
            FragmentSource::BoxShadow,
            FragmentSource::BlurDown,
            FragmentSource::BlurUp,
            FragmentSource::Tex(TexSource::Rgba),
            FragmentSource::Tex(TexSource::Rgbx),
            FragmentSource::Tex(TexSource::External),
        ];
        for fragment in sources {
            let text = fragment.source();
            assert!(text.contains("void main()"), "{fragment:?} has no main");
            assert!(text.contains("gl_FragColor"), "{fragment:?} writes nothing");
        }
    }

    #[test]
    fn blur_passes_share_uniform_names_but_not_kernels() {
        for source in [BLUR_DOWN_FRAG_SRC, BLUR_UP_FRAG_SRC] {
            assert!(source.contains("uniform float radius;"));
            assert!(source.contains("uniform vec2 halfpixel;"));
        }
        assert!(BLUR_DOWN_FRAG_SRC.contains("v_texcoord * 2.0"));
        assert!(BLUR_UP_FRAG_SRC.contains("v_texcoord / 2.0"));
    }
}
