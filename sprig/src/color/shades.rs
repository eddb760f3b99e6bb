//! Shade generation.

use log::warn;
use palette::Srgb;

use crate::error::ColorError;

/// Levels produced for every palette, lightest first.
pub const SHADE_LEVELS: [u16; 11] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900, 950];

/// Level that reproduces the base color.
const BASE_LEVEL: u16 = 500;

/// One lightness variant of a base color.
#[derive(Debug, Clone, PartialEq)]
pub struct Shade {
    /// Level in `50..=950`.
    pub level: u16,
    /// The color itself.
    pub color: Srgb<u8>,
    /// `#RRGGBB`, uppercase.
    pub hex: String,
    /// `rgb(r, g, b)`.
    pub rgb: String,
}

impl Shade {
    fn new(level: u16, color: Srgb<u8>) -> Self {
        let (r, g, b) = color.into_components();
        Self {
            level,
            color,
            hex: format!("#{:02X}{:02X}{:02X}", r, g, b),
            rgb: format!("rgb({}, {}, {})", r, g, b),
        }
    }

    /// Mean of the three channels, a cheap lightness proxy.
    pub fn average(&self) -> f32 {
        let (r, g, b) = self.color.into_components();
        (f32::from(r) + f32::from(g) + f32::from(b)) / 3.0
    }
}

/// Parse `#RRGGBB`, `RRGGBB`, `#RGB` or `RGB`.
pub fn parse_hex(input: &str) -> Result<Srgb<u8>, ColorError> {
    let trimmed = input.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if !matches!(digits.len(), 3 | 6) {
        return Err(ColorError::invalid_hex(input, "expected 3 or 6 hex digits"));
    }
    // palette slices by byte offset, so only ASCII may reach it
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::invalid_hex(input, "non-hex character"));
    }
    digits
        .parse::<Srgb<u8>>()
        .map_err(|e| ColorError::invalid_hex(input, e))
}

/// Generate the 11 shades of a base color.
///
/// Malformed input falls back to black rather than failing.
pub fn generate_shades(base: &str) -> Vec<Shade> {
    try_generate_shades(base).unwrap_or_else(|e| {
        warn!("{}, using black", e);
        shades_of(Srgb::new(0, 0, 0))
    })
}

/// Generate the 11 shades of a base color, reporting malformed input.
pub fn try_generate_shades(base: &str) -> Result<Vec<Shade>, ColorError> {
    parse_hex(base).map(shades_of)
}

fn shades_of(base: Srgb<u8>) -> Vec<Shade> {
    SHADE_LEVELS
        .iter()
        .map(|&level| Shade::new(level, shade(base, level)))
        .collect()
}

/// Interpolate each channel toward white (below 500) or black (above 500).
fn shade(base: Srgb<u8>, level: u16) -> Srgb<u8> {
    let (r, g, b) = base.into_components();
    match level.cmp(&BASE_LEVEL) {
        std::cmp::Ordering::Equal => base,
        std::cmp::Ordering::Less => {
            let factor = f32::from(BASE_LEVEL - level) / f32::from(BASE_LEVEL);
            Srgb::new(tint(r, factor), tint(g, factor), tint(b, factor))
        }
        std::cmp::Ordering::Greater => {
            let factor = f32::from(level - BASE_LEVEL) / f32::from(BASE_LEVEL);
            Srgb::new(darken(r, factor), darken(g, factor), darken(b, factor))
        }
    }
}

fn tint(channel: u8, factor: f32) -> u8 {
    let c = f32::from(channel);
    to_channel(c + (255.0 - c) * factor)
}

fn darken(channel: u8, factor: f32) -> u8 {
    to_channel(f32::from(channel) * (1.0 - factor))
}

fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

/// A named set of shades.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    /// Name used as the CSS variable prefix (e.g. `primary`).
    pub name: String,
    /// Parsed base color.
    pub base: Srgb<u8>,
    /// Shades in [`SHADE_LEVELS`] order.
    pub shades: Vec<Shade>,
}

impl Palette {
    /// Build a palette from a hex base color.
    pub fn new(name: impl Into<String>, base: &str) -> Result<Self, ColorError> {
        let base = parse_hex(base)?;
        Ok(Self {
            name: name.into(),
            base,
            shades: shades_of(base),
        })
    }

    /// Shade at a level, if it is one of [`SHADE_LEVELS`].
    pub fn get(&self, level: u16) -> Option<&Shade> {
        self.shades.iter().find(|s| s.level == level)
    }

    /// Iterate shades lightest first.
    pub fn iter(&self) -> impl Iterator<Item = &Shade> {
        self.shades.iter()
    }

    /// CSS custom properties for this palette.
    ///
    /// Yields `--{name}-{level}: #RRGGBB` and `--{name}-{level}-rgb: r, g, b`
    /// pairs. Applying them is left to the caller.
    pub fn css_variables(&self) -> Vec<(String, String)> {
        let mut vars = Vec::with_capacity(self.shades.len() * 2);
        for shade in &self.shades {
            let (r, g, b) = shade.color.into_components();
            vars.push((format!("--{}-{}", self.name, shade.level), shade.hex.clone()));
            vars.push((
                format!("--{}-{}-rgb", self.name, shade.level),
                format!("{}, {}, {}", r, g, b),
            ));
        }
        vars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tint_and_darken_bounds() {
        assert_eq!(tint(0, 1.0), 255);
        assert_eq!(tint(255, 0.5), 255);
        assert_eq!(darken(255, 1.0), 0);
        assert_eq!(darken(200, 0.0), 200);
    }

    #[test]
    fn test_parse_hex_rejects_non_ascii() {
        assert!(parse_hex("#aébcd").is_err());
        assert!(parse_hex("ééé").is_err());
        assert_eq!(parse_hex(" #0a0 "), Ok(Srgb::new(0, 0xAA, 0)));
    }

    #[test]
    fn test_shade_levels_arithmetic() {
        let base = Srgb::new(0x33u8, 0x66, 0xCC);
        // 50 -> factor 0.9 toward white
        assert_eq!(shade(base, 50), Srgb::new(235, 240, 250));
        // 900 -> factor 0.8 toward black
        assert_eq!(shade(base, 900), Srgb::new(10, 20, 41));
    }
}
