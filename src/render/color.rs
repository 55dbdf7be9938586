use image::Rgba;
use rand::Rng;

use crate::core::CloudError;

pub const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// Parses `transparent`, a basic CSS colour name, or `#rgb` / `#rrggbb` / `#rrggbbaa`.
pub fn parse_color(value: &str) -> Result<Rgba<u8>, CloudError> {
    let value = value.trim().to_lowercase();

    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| CloudError::Custom(format!("Invalid colour '#{}'", hex)));
    }

    let rgb = match value.as_str() {
        "transparent" | "none" => return Ok(TRANSPARENT),
        "white" => [255, 255, 255],
        "black" => [0, 0, 0],
        "silver" => [192, 192, 192],
        "gray" | "grey" => [128, 128, 128],
        "red" => [255, 0, 0],
        "maroon" => [128, 0, 0],
        "orange" => [255, 165, 0],
        "yellow" => [255, 255, 0],
        "olive" => [128, 128, 0],
        "lime" => [0, 255, 0],
        "green" => [0, 128, 0],
        "aqua" | "cyan" => [0, 255, 255],
        "teal" => [0, 128, 128],
        "blue" => [0, 0, 255],
        "navy" => [0, 0, 128],
        "fuchsia" | "magenta" => [255, 0, 255],
        "purple" => [128, 0, 128],
        _ => return Err(CloudError::Custom(format!("Unknown colour '{}'", value))),
    };

    Ok(Rgba([rgb[0], rgb[1], rgb[2], 255]))
}

fn parse_hex(hex: &str) -> Option<Rgba<u8>> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some(Rgba([nibble(0)?, nibble(1)?, nibble(2)?, 255]))
        }
        6 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, 255])),
        8 => Some(Rgba([byte(0)?, byte(2)?, byte(4)?, byte(6)?])),
        _ => None,
    }
}

/// `hue` in degrees, `saturation` and `lightness` in `0.0..=1.0`.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> [u8; 3] {
    let c = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = (hue.rem_euclid(360.0)) / 60.0;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = lightness - c / 2.0;
    let channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    [channel(r), channel(g), channel(b)]
}

/// Random hue at 80% saturation and 50% lightness.
pub fn random_word_color<R: Rng>(rng: &mut R) -> Rgba<u8> {
    let hue = rng.random_range(0..360) as f32;
    let [r, g, b] = hsl_to_rgb(hue, 0.8, 0.5);
    Rgba([r, g, b, 255])
}
