pub mod color;
pub mod font;
pub mod layout;

use std::path::Path;

pub use color::parse_color;
pub use font::CloudFont;
use image::{
    Rgba,
    RgbaImage,
};
pub use layout::{
    layout_words,
    LayoutOptions,
    PlacedWord,
};
use rand::{
    rngs::StdRng,
    SeedableRng,
};

use crate::{
    core::CloudError,
    segmentation::contains_japanese,
    tools::analysis::TermEntry,
};

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    pub background: Rgba<u8>,
    /// Defaults to a third of the canvas height.
    pub max_font_size: Option<f32>,
    pub relative_scaling: f32,
    pub seed: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 900,
            height: 600,
            background: Rgba([255, 255, 255, 255]),
            max_font_size: None,
            relative_scaling: 0.5,
            seed: 42,
        }
    }
}

impl RenderOptions {
    fn layout_options(&self) -> LayoutOptions {
        let mut layout = LayoutOptions::new(self.width, self.height);
        if let Some(max) = self.max_font_size {
            layout.max_font_size = max;
        }
        layout.relative_scaling = self.relative_scaling;
        layout
    }
}

pub struct WordCloud {
    font: CloudFont,
    options: RenderOptions,
}

impl WordCloud {
    pub fn new(font: CloudFont, options: RenderOptions) -> Self {
        Self { font, options }
    }

    /// Fails with `MissingGlyphs` if a Japanese term contains characters the font lacks.
    pub fn check_glyphs(&self, entries: &[TermEntry]) -> Result<(), CloudError> {
        for entry in entries.iter().filter(|e| !self.font.can_render(&e.term)) {
            if contains_japanese(&entry.term) {
                return Err(CloudError::MissingGlyphs(entry.term.clone()));
            }
            tracing::warn!("Font {} cannot draw every character of '{}'", self.font.path().display(), entry.term);
        }
        Ok(())
    }

    pub fn render(&self, entries: &[TermEntry]) -> Result<RgbaImage, CloudError> {
        if self.options.width == 0 || self.options.height == 0 {
            return Err(CloudError::Custom("Image width and height must be positive".to_string()));
        }
        self.check_glyphs(entries)?;

        let mut rng = StdRng::seed_from_u64(self.options.seed);
        let placed = layout_words(entries, &self.options.layout_options(), &mut rng, |text, size| {
            self.font.measure(text, size)
        });
        if placed.len() < entries.len() {
            tracing::warn!("{} of {} words did not fit on the canvas", entries.len() - placed.len(), entries.len());
        }

        let mut canvas = RgbaImage::from_pixel(self.options.width, self.options.height, self.options.background);
        for word in &placed {
            let color = color::random_word_color(&mut rng);
            self.font.draw(&mut canvas, &word.term, word.font_size, word.x, word.y, color);
        }

        Ok(canvas)
    }

    /// Renders and writes a PNG to `path`.
    pub fn save(&self, entries: &[TermEntry], path: &Path) -> Result<(), CloudError> {
        let canvas = self.render(entries)?;
        canvas.save_with_format(path, image::ImageFormat::Png)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cloud(options: RenderOptions) -> Option<WordCloud> {
        match CloudFont::resolve(None) {
            Ok(font) => Some(WordCloud::new(font, options)),
            Err(_) => {
                eprintln!("Skipping test, no system font found");
                None
            }
        }
    }

    fn entries() -> Vec<TermEntry> {
        vec![TermEntry::new("rust", 10), TermEntry::new("cloud", 6), TermEntry::new("markdown", 3)]
    }

    #[test]
    fn test_layout_options_follow_render_options() {
        let options = RenderOptions { max_font_size: Some(80.0), relative_scaling: 1.0, ..Default::default() };
        let layout = options.layout_options();
        assert_eq!(layout.max_font_size, 80.0);
        assert_eq!(layout.relative_scaling, 1.0);
        assert_eq!(RenderOptions::default().layout_options().max_font_size, 200.0);
    }

    #[test]
    fn test_render_is_seeded_and_sized() {
        let options = RenderOptions { width: 300, height: 200, ..Default::default() };
        let Some(cloud) = cloud(options) else { return };

        let a = cloud.render(&entries()).unwrap();
        let b = cloud.render(&entries()).unwrap();
        assert_eq!(a.dimensions(), (300, 200));
        assert_eq!(a, b);
        assert!(a.pixels().any(|p| *p != Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn test_save_writes_png() {
        let options = RenderOptions { width: 200, height: 120, background: color::TRANSPARENT, ..Default::default() };
        let Some(cloud) = cloud(options) else { return };

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cloud.png");
        cloud.save(&entries(), &path).unwrap();

        let saved = image::open(&path).unwrap().to_rgba8();
        assert_eq!(saved.dimensions(), (200, 120));
    }

    fn latin_only_cloud() -> Option<WordCloud> {
        let path = ["/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf", "/usr/share/fonts/TTF/DejaVuSans.ttf"]
            .into_iter()
            .map(Path::new)
            .find(|p| p.exists());
        let Some(path) = path else {
            eprintln!("Skipping test, DejaVuSans not installed");
            return None;
        };
        Some(WordCloud::new(CloudFont::load(path).unwrap(), RenderOptions::default()))
    }

    #[test]
    fn test_japanese_term_needs_japanese_font() {
        let Some(cloud) = latin_only_cloud() else { return };
        assert!(!cloud.font.can_render("日本語"));

        let entries = vec![TermEntry::new("rust", 3), TermEntry::new("日本語", 2)];
        let err = cloud.check_glyphs(&entries).unwrap_err();
        assert!(matches!(err, CloudError::MissingGlyphs(ref term) if term == "日本語"));
        assert!(matches!(cloud.render(&entries), Err(CloudError::MissingGlyphs(_))));
    }

    #[test]
    fn test_undrawable_latin_term_only_warns() {
        let Some(cloud) = latin_only_cloud() else { return };
        let entries = vec![TermEntry::new("crab\u{1F980}", 2), TermEntry::new("cloud", 1)];
        assert!(cloud.check_glyphs(&entries).is_ok());
    }

    #[test]
    fn test_zero_sized_canvas_is_rejected() {
        let options = RenderOptions { width: 0, ..Default::default() };
        let Some(cloud) = cloud(options) else { return };
        assert!(matches!(cloud.render(&entries()), Err(CloudError::Custom(_))));
    }
}
