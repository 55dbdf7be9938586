use std::{
    fs,
    path::{
        Path,
        PathBuf,
    },
};

use ab_glyph::{
    point,
    Font,
    FontVec,
    GlyphId,
    PxScale,
    ScaleFont,
};
use image::{
    Rgba,
    RgbaImage,
};

use crate::core::CloudError;

/// Tried in order when no `--font-path` is given. CJK-capable fonts come first.
const FALLBACK_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "C:\\Windows\\Fonts\\meiryo.ttc",
    "C:\\Windows\\Fonts\\msgothic.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "C:\\Windows\\Fonts\\arial.ttf",
];

pub struct CloudFont {
    font: FontVec,
    path: PathBuf,
}

impl CloudFont {
    pub fn load(path: &Path) -> Result<Self, CloudError> {
        let data = fs::read(path)
            .map_err(|e| CloudError::FailedToLoadFile(format!("{}: {}", path.display(), e)))?;
        let font = FontVec::try_from_vec(data)?;
        Ok(Self { font, path: path.to_path_buf() })
    }

    /// Loads `explicit` if given, otherwise the first fallback font that parses.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self, CloudError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        for candidate in FALLBACK_FONTS.iter().map(Path::new).filter(|p| p.exists()) {
            match Self::load(candidate) {
                Ok(font) => {
                    tracing::info!("Using font {}", candidate.display());
                    return Ok(font);
                }
                Err(e) => tracing::debug!("Skipping font {}: {}", candidate.display(), e),
            }
        }

        Err(CloudError::MissingFont)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// False if any non-whitespace character maps to the missing glyph.
    pub fn can_render(&self, text: &str) -> bool {
        text.chars().filter(|c| !c.is_whitespace()).all(|c| self.font.glyph_id(c) != GlyphId(0))
    }

    /// Pixel width and line height of `text` at `size`.
    pub fn measure(&self, text: &str, size: f32) -> (u32, u32) {
        let scaled = self.font.as_scaled(PxScale::from(size));
        let mut width = 0.0f32;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            let id = self.font.glyph_id(c);
            if let Some(prev) = previous {
                width += scaled.kern(prev, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }

        let height = scaled.ascent() - scaled.descent();
        (width.ceil().max(0.0) as u32, height.ceil().max(0.0) as u32)
    }

    /// Draws `text` with its line box's top-left corner at (`x`, `y`), alpha-blended over `canvas`.
    pub fn draw(&self, canvas: &mut RgbaImage, text: &str, size: f32, x: u32, y: u32, color: Rgba<u8>) {
        let scale = PxScale::from(size);
        let scaled = self.font.as_scaled(scale);
        let baseline = y as f32 + scaled.ascent();
        let mut caret = x as f32;
        let mut previous: Option<GlyphId> = None;

        for c in text.chars() {
            let id = self.font.glyph_id(c);
            if let Some(prev) = previous {
                caret += scaled.kern(prev, id);
            }
            previous = Some(id);

            let glyph = id.with_scale_and_position(scale, point(caret, baseline));
            caret += scaled.h_advance(id);

            let Some(outlined) = self.font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outlined.px_bounds();
            outlined.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i64 + gx as i64;
                let py = bounds.min.y as i64 + gy as i64;
                if px < 0 || py < 0 || px >= canvas.width() as i64 || py >= canvas.height() as i64 {
                    return;
                }
                let pixel = canvas.get_pixel_mut(px as u32, py as u32);
                *pixel = blend(*pixel, color, coverage);
            });
        }
    }
}

/// Source-over compositing of `color` at `coverage` onto `dst`.
fn blend(dst: Rgba<u8>, color: Rgba<u8>, coverage: f32) -> Rgba<u8> {
    let src_a = coverage.clamp(0.0, 1.0) * color[3] as f32 / 255.0;
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let value = (color[i] as f32 * src_a + dst[i] as f32 * dst_a * (1.0 - src_a)) / out_a;
        value.round().clamp(0.0, 255.0) as u8
    };
    Rgba([channel(0), channel(1), channel(2), (out_a * 255.0).round() as u8])
}
