//! Gradient color themes.
//!
//! Each theme is a palette of five HSL colors. Colors are brightened for dark
//! backgrounds and darkened for light ones before being assigned.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// An HSL color with integer components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hsl {
    /// Hue in degrees, 0-359
    pub h: u16,
    /// Saturation percent, 0-100
    pub s: u8,
    /// Lightness percent, 0-100
    pub l: u8,
}

impl Hsl {
    /// Create a color.
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h, s, l }
    }

    /// Convert to 8-bit RGB.
    pub fn to_rgb(self) -> (u8, u8, u8) {
        let h = f64::from(self.h % 360) / 360.0;
        let s = f64::from(self.s.min(100)) / 100.0;
        let l = f64::from(self.l.min(100)) / 100.0;

        if s == 0.0 {
            let v = (l * 255.0).round() as u8;
            return (v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        let channel = |t: f64| (hue_to_rgb(p, q, t) * 255.0).round() as u8;
        (channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
    }

    /// Hex notation, e.g. `#4da6cc`.
    pub fn to_hex(self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

fn hue_to_rgb(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// Named gradient theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GradientTheme {
    /// No tinting
    #[default]
    None,
    Ocean,
    Sunset,
    Forest,
    Berry,
    Lavender,
    Autumn,
    Mint,
    Twilight,
    Coffee,
    Monochrome,
}

impl GradientTheme {
    /// All themes in menu order.
    pub const ALL: [GradientTheme; 11] = [
        GradientTheme::None,
        GradientTheme::Ocean,
        GradientTheme::Sunset,
        GradientTheme::Forest,
        GradientTheme::Berry,
        GradientTheme::Lavender,
        GradientTheme::Autumn,
        GradientTheme::Mint,
        GradientTheme::Twilight,
        GradientTheme::Coffee,
        GradientTheme::Monochrome,
    ];

    /// Look up a theme by its settings name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|theme| theme.name().eq_ignore_ascii_case(name.trim()))
    }

    /// Settings name (lowercase).
    pub fn name(self) -> &'static str {
        match self {
            GradientTheme::None => "none",
            GradientTheme::Ocean => "ocean",
            GradientTheme::Sunset => "sunset",
            GradientTheme::Forest => "forest",
            GradientTheme::Berry => "berry",
            GradientTheme::Lavender => "lavender",
            GradientTheme::Autumn => "autumn",
            GradientTheme::Mint => "mint",
            GradientTheme::Twilight => "twilight",
            GradientTheme::Coffee => "coffee",
            GradientTheme::Monochrome => "monochrome",
        }
    }

    /// Human-readable name.
    pub fn display_name(self) -> &'static str {
        match self {
            GradientTheme::None => "None",
            GradientTheme::Ocean => "Ocean",
            GradientTheme::Sunset => "Sunset",
            GradientTheme::Forest => "Forest",
            GradientTheme::Berry => "Berry",
            GradientTheme::Lavender => "Lavender",
            GradientTheme::Autumn => "Autumn",
            GradientTheme::Mint => "Mint",
            GradientTheme::Twilight => "Twilight",
            GradientTheme::Coffee => "Coffee",
            GradientTheme::Monochrome => "Monochrome",
        }
    }

    /// Base palette, before light/dark adjustment.
    pub fn colors(self) -> &'static [Hsl] {
        match self {
            GradientTheme::None => &[],
            GradientTheme::Ocean => &OCEAN,
            GradientTheme::Sunset => &SUNSET,
            GradientTheme::Forest => &FOREST,
            GradientTheme::Berry => &BERRY,
            GradientTheme::Lavender => &LAVENDER,
            GradientTheme::Autumn => &AUTUMN,
            GradientTheme::Mint => &MINT,
            GradientTheme::Twilight => &TWILIGHT,
            GradientTheme::Coffee => &COFFEE,
            GradientTheme::Monochrome => &MONOCHROME,
        }
    }

    /// Palette adjusted for the background.
    pub fn adjusted_colors(self, dark: bool) -> Vec<Hsl> {
        self.colors()
            .iter()
            .map(|&color| adjust_for_theme(color, dark))
            .collect()
    }

    /// Swatch colors shown in the settings menu.
    pub fn preview_colors(self) -> &'static [&'static str] {
        match self {
            GradientTheme::None => &[],
            GradientTheme::Ocean => &["#4da6cc", "#5ca8b8", "#52b0b8", "#5cb8cc", "#4a9999"],
            GradientTheme::Sunset => &["#cc5c5c", "#cc704d", "#cc8533", "#ccab3d", "#b89940"],
            GradientTheme::Forest => &["#5c8f5c", "#6b8f52", "#528a52", "#6b996b", "#5c7352"],
            GradientTheme::Berry => &["#cc5c99", "#995c80", "#8a5c99", "#cc6699", "#b85c80"],
            GradientTheme::Lavender => &["#8a7acc", "#8f7ab8", "#8a8acc", "#8a6699", "#7a80b8"],
            GradientTheme::Autumn => &["#b87333", "#cc8f40", "#994d33", "#b89940", "#803333"],
            GradientTheme::Mint => &["#5cb88f", "#5ca87a", "#5cc2a8", "#5c996b", "#5cb8b8"],
            GradientTheme::Twilight => &["#6666b3", "#7a66a8", "#73528f", "#5c80cc", "#8a5280"],
            GradientTheme::Coffee => &["#6b5c4d", "#5c4d40", "#736652", "#4d3d33", "#806b52"],
            GradientTheme::Monochrome => &["#4d4d4d", "#666666", "#808080", "#737373", "#595959"],
        }
    }

    /// Whether this theme tints anything.
    pub fn is_none(self) -> bool {
        self.colors().is_empty()
    }
}

impl fmt::Display for GradientTheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GradientTheme {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| Error::UnknownTheme(s.to_string()))
    }
}

const OCEAN: [Hsl; 5] = [
    Hsl::new(200, 70, 50),
    Hsl::new(180, 60, 45),
    Hsl::new(190, 65, 48),
    Hsl::new(210, 75, 52),
    Hsl::new(170, 55, 42),
];
const SUNSET: [Hsl; 5] = [
    Hsl::new(0, 70, 55),
    Hsl::new(20, 80, 55),
    Hsl::new(35, 85, 50),
    Hsl::new(45, 90, 52),
    Hsl::new(55, 75, 48),
];
const FOREST: [Hsl; 5] = [
    Hsl::new(120, 45, 40),
    Hsl::new(90, 50, 42),
    Hsl::new(140, 40, 38),
    Hsl::new(100, 55, 44),
    Hsl::new(80, 35, 36),
];
const BERRY: [Hsl; 5] = [
    Hsl::new(330, 60, 50),
    Hsl::new(300, 50, 45),
    Hsl::new(280, 55, 48),
    Hsl::new(320, 65, 52),
    Hsl::new(340, 58, 47),
];
const LAVENDER: [Hsl; 5] = [
    Hsl::new(260, 50, 55),
    Hsl::new(270, 45, 52),
    Hsl::new(250, 55, 58),
    Hsl::new(280, 40, 50),
    Hsl::new(240, 48, 54),
];
const AUTUMN: [Hsl; 5] = [
    Hsl::new(25, 75, 45),
    Hsl::new(35, 80, 48),
    Hsl::new(15, 70, 42),
    Hsl::new(45, 65, 50),
    Hsl::new(5, 60, 40),
];
const MINT: [Hsl; 5] = [
    Hsl::new(160, 50, 48),
    Hsl::new(150, 45, 45),
    Hsl::new(170, 55, 50),
    Hsl::new(140, 40, 42),
    Hsl::new(180, 48, 46),
];
const TWILIGHT: [Hsl; 5] = [
    Hsl::new(250, 50, 45),
    Hsl::new(270, 45, 48),
    Hsl::new(290, 40, 42),
    Hsl::new(230, 55, 50),
    Hsl::new(310, 35, 46),
];
const COFFEE: [Hsl; 5] = [
    Hsl::new(30, 40, 35),
    Hsl::new(25, 35, 38),
    Hsl::new(35, 45, 40),
    Hsl::new(20, 30, 32),
    Hsl::new(40, 50, 42),
];
const MONOCHROME: [Hsl; 5] = [
    Hsl::new(0, 0, 30),
    Hsl::new(0, 0, 40),
    Hsl::new(0, 0, 50),
    Hsl::new(0, 0, 45),
    Hsl::new(0, 0, 35),
];

/// Brighten a color for dark backgrounds, darken it for light ones.
pub fn adjust_for_theme(color: Hsl, dark: bool) -> Hsl {
    if dark {
        Hsl::new(color.h, (color.s + 10).min(100), (color.l + 25).min(75))
    } else {
        Hsl::new(color.h, color.s, color.l.saturating_sub(10).max(25))
    }
}

/// Whether a computed CSS color (`rgb(..)` / `rgba(..)`) is dark.
///
/// Unparseable values and `transparent` count as light.
pub fn is_dark_background(css_color: &str) -> bool {
    let color = css_color.trim();
    if color.is_empty() || color.eq_ignore_ascii_case("transparent") {
        return false;
    }
    let Some(args) = color
        .strip_prefix("rgba(")
        .or_else(|| color.strip_prefix("rgb("))
    else {
        return false;
    };

    let channels: Vec<f64> = args
        .trim_end_matches(')')
        .split(',')
        .take(3)
        .filter_map(|part| part.trim().parse::<u8>().ok())
        .map(f64::from)
        .collect();
    let [r, g, b] = channels[..] else {
        return false;
    };

    let luminance = (0.299 * r + 0.587 * g + 0.114 * b) / 255.0;
    luminance < 0.5
}

/// Settings names of all themes.
pub fn theme_names() -> Vec<&'static str> {
    GradientTheme::ALL.iter().map(|t| t.name()).collect()
}

/// Display name for a settings name; unknown names are returned as given.
pub fn display_name(name: &str) -> String {
    match GradientTheme::from_name(name) {
        Some(theme) => theme.display_name().to_string(),
        None => name.to_string(),
    }
}

/// Menu swatches for a settings name; unknown names have none.
pub fn preview_colors(name: &str) -> &'static [&'static str] {
    GradientTheme::from_name(name)
        .map(GradientTheme::preview_colors)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hsl_display() {
        assert_eq!(Hsl::new(200, 70, 50).to_string(), "hsl(200, 70%, 50%)");
    }

    #[test]
    fn test_hsl_to_rgb() {
        assert_eq!(Hsl::new(0, 100, 50).to_rgb(), (255, 0, 0));
        assert_eq!(Hsl::new(120, 100, 50).to_rgb(), (0, 255, 0));
        assert_eq!(Hsl::new(0, 0, 50).to_rgb(), (128, 128, 128));
        assert_eq!(Hsl::new(240, 100, 50).to_hex(), "#0000ff");
    }

    #[test]
    fn test_adjust_for_theme() {
        let c = Hsl::new(200, 95, 60);
        assert_eq!(adjust_for_theme(c, true), Hsl::new(200, 100, 75));
        assert_eq!(adjust_for_theme(c, false), Hsl::new(200, 95, 50));
        assert_eq!(adjust_for_theme(Hsl::new(0, 0, 30), false), Hsl::new(0, 0, 25));
        assert_eq!(adjust_for_theme(Hsl::new(0, 0, 5), false), Hsl::new(0, 0, 25));
    }

    #[test]
    fn test_theme_lookup() {
        assert_eq!(GradientTheme::from_name("Ocean"), Some(GradientTheme::Ocean));
        assert_eq!(GradientTheme::from_name("neon"), None);
        assert!("neon".parse::<GradientTheme>().is_err());
        assert_eq!(theme_names().len(), 11);
        assert_eq!(theme_names()[0], "none");
    }

    #[test]
    fn test_palettes() {
        assert!(GradientTheme::None.is_none());
        for theme in GradientTheme::ALL.iter().skip(1) {
            assert_eq!(theme.colors().len(), 5, "{}", theme);
            assert_eq!(theme.preview_colors().len(), 5, "{}", theme);
        }
    }

    #[test]
    fn test_display_name_fallback() {
        assert_eq!(display_name("mint"), "Mint");
        assert_eq!(display_name("custom"), "custom");
        assert!(preview_colors("custom").is_empty());
    }

    #[test]
    fn test_dark_background() {
        assert!(is_dark_background("rgb(0, 0, 0)"));
        assert!(is_dark_background("rgba(30, 30, 30, 0.9)"));
        assert!(!is_dark_background("rgb(255, 255, 255)"));
        assert!(!is_dark_background("transparent"));
        assert!(!is_dark_background("#000"));
        assert!(!is_dark_background("rgb(0, 0)"));
    }
}
