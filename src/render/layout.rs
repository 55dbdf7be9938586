use std::f32::consts::TAU;

use rand::Rng;

use crate::tools::analysis::TermEntry;

/// Distance between spiral turns, in pixels.
const SPIRAL_PITCH: f32 = 4.0;
/// Arc length between two probed positions on the spiral, in pixels.
const SPIRAL_STEP: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct LayoutOptions {
    pub width: u32,
    pub height: u32,
    pub max_font_size: f32,
    pub min_font_size: f32,
    pub relative_scaling: f32,
    pub margin: u32,
}

impl LayoutOptions {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            max_font_size: height as f32 / 3.0,
            min_font_size: 4.0,
            relative_scaling: 0.5,
            margin: 2,
        }
    }

    /// Size for a word seen `frequency` times when the most common one was seen `max_frequency` times.
    /// Never taller than the canvas.
    pub fn font_size(&self, frequency: u32, max_frequency: u32) -> f32 {
        let ratio = frequency as f32 / max_frequency.max(1) as f32;
        let max_font_size = self.max_font_size.min(self.height as f32);
        (max_font_size * ratio.powf(self.relative_scaling)).max(self.min_font_size)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub term: String,
    pub font_size: f32,
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Which pixels are already covered, with a summed-area table for O(1) box queries.
pub struct OccupancyMap {
    width: u32,
    height: u32,
    occupied: Vec<bool>,
    integral: Vec<u32>,
}

impl OccupancyMap {
    pub fn new(width: u32, height: u32) -> Self {
        let cells = (width as usize) * (height as usize);
        let integral = (width as usize + 1) * (height as usize + 1);
        Self { width, height, occupied: vec![false; cells], integral: vec![0; integral] }
    }

    fn integral_at(&self, x: u32, y: u32) -> u32 {
        self.integral[y as usize * (self.width as usize + 1) + x as usize]
    }

    /// True when the `w`×`h` box at (`x`, `y`) lies inside the canvas and overlaps nothing.
    pub fn is_free(&self, x: u32, y: u32, w: u32, h: u32) -> bool {
        if x.saturating_add(w) > self.width || y.saturating_add(h) > self.height {
            return false;
        }
        let (x1, y1) = (x + w, y + h);
        let covered = self.integral_at(x1, y1) + self.integral_at(x, y)
            - self.integral_at(x1, y)
            - self.integral_at(x, y1);
        covered == 0
    }

    pub fn mark(&mut self, x: u32, y: u32, w: u32, h: u32) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        if x >= x_end || y >= y_end {
            return;
        }
        for row in y..y_end {
            let start = row as usize * self.width as usize;
            for cell in &mut self.occupied[start + x as usize..start + x_end as usize] {
                *cell = true;
            }
        }
        self.rebuild_integral();
    }

    fn rebuild_integral(&mut self) {
        let stride = self.width as usize + 1;
        for y in 0..self.height as usize {
            let mut row_sum = 0u32;
            for x in 0..self.width as usize {
                row_sum += self.occupied[y * self.width as usize + x] as u32;
                self.integral[(y + 1) * stride + x + 1] = self.integral[y * stride + x + 1] + row_sum;
            }
        }
    }

    /// Walks an Archimedean spiral out from (`cx`, `cy`) and returns the first free top-left
    /// corner for a `w`×`h` box.
    pub fn find_position(&self, w: u32, h: u32, cx: f32, cy: f32) -> Option<(u32, u32)> {
        if w == 0 || h == 0 || w > self.width || h > self.height {
            return None;
        }

        let a = SPIRAL_PITCH / TAU;
        let max_radius = (self.width as f32).hypot(self.height as f32);
        let mut theta = 0.0f32;

        loop {
            let radius = a * theta;
            if radius > max_radius {
                return None;
            }

            let left = cx + radius * theta.cos() - w as f32 / 2.0;
            let top = cy + radius * theta.sin() - h as f32 / 2.0;
            if left >= 0.0 && top >= 0.0 {
                let (x, y) = (left as u32, top as u32);
                if self.is_free(x, y, w, h) {
                    return Some((x, y));
                }
            }

            theta += SPIRAL_STEP / radius.max(SPIRAL_STEP);
        }
    }
}

/// Places words from most to least frequent. `measure(text, size)` returns the pixel box of
/// `text` at `size`; a word that does not fit shrinks until `min_font_size` and is skipped
/// after that.
pub fn layout_words<R, M>(
    entries: &[TermEntry],
    options: &LayoutOptions,
    rng: &mut R,
    measure: M,
) -> Vec<PlacedWord>
where
    R: Rng,
    M: Fn(&str, f32) -> (u32, u32),
{
    let mut occupancy = OccupancyMap::new(options.width, options.height);
    let max_frequency = entries.iter().map(|e| e.frequency).max().unwrap_or(1);
    let mut placed = Vec::with_capacity(entries.len());

    for entry in entries {
        let mut size = options.font_size(entry.frequency, max_frequency);

        // Jittered start so the cloud is not a perfect rosette around the centre
        let cx = options.width as f32 * rng.random_range(0.4f32..0.6);
        let cy = options.height as f32 * rng.random_range(0.4f32..0.6);

        while size >= options.min_font_size {
            let (w, h) = measure(&entry.term, size);
            let padding = options.margin.saturating_mul(2);
            let (box_w, box_h) = (w.saturating_add(padding), h.saturating_add(padding));

            if let Some((x, y)) = occupancy.find_position(box_w, box_h, cx, cy) {
                occupancy.mark(x, y, box_w, box_h);
                placed.push(PlacedWord {
                    term: entry.term.clone(),
                    font_size: size,
                    x: x + options.margin,
                    y: y + options.margin,
                    width: w,
                    height: h,
                });
                break;
            }

            size -= (size * 0.1).max(1.0);
        }

        if size < options.min_font_size {
            tracing::debug!("No room left for '{}', skipping", entry.term);
        }
    }

    placed
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::StdRng,
        SeedableRng,
    };

    use super::*;

    // Monospace stand-in for a real font: 0.6em per char, 1.2em line height
    fn mono(text: &str, size: f32) -> (u32, u32) {
        ((text.chars().count() as f32 * size * 0.6).ceil() as u32, (size * 1.2).ceil() as u32)
    }

    fn overlaps(a: &PlacedWord, b: &PlacedWord) -> bool {
        a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
    }

    #[test]
    fn test_occupancy_queries() {
        let mut map = OccupancyMap::new(10, 10);
        assert!(map.is_free(0, 0, 10, 10));
        map.mark(2, 2, 3, 3);
        assert!(!map.is_free(0, 0, 3, 3));
        assert!(!map.is_free(4, 4, 2, 2));
        assert!(map.is_free(5, 0, 5, 10));
        assert!(map.is_free(0, 5, 10, 5));
        assert!(!map.is_free(8, 8, 3, 3));
    }

    #[test]
    fn test_first_position_is_centred() {
        let map = OccupancyMap::new(100, 100);
        assert_eq!(map.find_position(20, 10, 50.0, 50.0), Some((40, 45)));
        assert_eq!(map.find_position(200, 10, 50.0, 50.0), None);
    }

    #[test]
    fn test_font_size_scaling() {
        let options = LayoutOptions::new(900, 600);
        assert_eq!(options.font_size(10, 10), 200.0);
        assert!((options.font_size(1, 4) - 100.0).abs() < 1e-3);
        assert_eq!(options.font_size(0, 10), options.min_font_size);
    }

    #[test]
    fn test_huge_font_size_is_capped_by_canvas() {
        let mut options = LayoutOptions::new(120, 100);
        options.max_font_size = 1e10;
        assert_eq!(options.font_size(1, 1), 100.0);

        let entries = vec![TermEntry::new("cloud", 1)];
        let placed = layout_words(&entries, &options, &mut StdRng::seed_from_u64(5), mono);
        assert_eq!(placed.len(), 1);
        assert!(placed[0].x + placed[0].width <= 120 && placed[0].y + placed[0].height <= 100);
    }

    #[test]
    fn test_saturated_measurement_is_skipped() {
        let entries = vec![TermEntry::new("wide", 1)];
        let options = LayoutOptions::new(120, 100);
        let placed =
            layout_words(&entries, &options, &mut StdRng::seed_from_u64(5), |_, _| (u32::MAX, u32::MAX));
        assert!(placed.is_empty());

        let map = OccupancyMap::new(10, 10);
        assert!(!map.is_free(u32::MAX, 0, 1, 1));
        assert!(!map.is_free(0, 5, 1, u32::MAX));
    }

    #[test]
    fn test_words_do_not_overlap_and_stay_inside() {
        let entries: Vec<TermEntry> = (0..40)
            .map(|i| TermEntry::new(format!("word{i}"), 40 - i as u32))
            .collect();
        let options = LayoutOptions::new(400, 300);
        let placed = layout_words(&entries, &options, &mut StdRng::seed_from_u64(1), mono);

        assert!(!placed.is_empty());
        assert_eq!(placed[0].term, "word0");
        for (i, a) in placed.iter().enumerate() {
            assert!(a.x + a.width <= options.width && a.y + a.height <= options.height);
            for b in &placed[i + 1..] {
                assert!(!overlaps(a, b), "{} overlaps {}", a.term, b.term);
            }
        }
    }

    #[test]
    fn test_layout_is_deterministic_for_a_seed() {
        let entries = vec![TermEntry::new("rust", 5), TermEntry::new("cloud", 3), TermEntry::new("word", 1)];
        let options = LayoutOptions::new(300, 200);
        let a = layout_words(&entries, &options, &mut StdRng::seed_from_u64(9), mono);
        let b = layout_words(&entries, &options, &mut StdRng::seed_from_u64(9), mono);
        assert_eq!(a, b);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_oversized_word_shrinks_to_fit() {
        let entries = vec![TermEntry::new("supercalifragilistic", 1)];
        let options = LayoutOptions::new(120, 100);
        let placed = layout_words(&entries, &options, &mut StdRng::seed_from_u64(3), mono);
        assert_eq!(placed.len(), 1);
        assert!(placed[0].font_size < options.max_font_size);
        assert!(placed[0].width <= 120);
    }
}
