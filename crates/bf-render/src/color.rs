use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

use crate::RenderError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

/// Matplotlib's default property cycle, addressed as `C0`..`C9`.
pub const TAB10: &[&str] = &[
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

const NAMED: &[(&str, &str)] = &[
    ("black", "#000000"),
    ("k", "#000000"),
    ("white", "#ffffff"),
    ("w", "#ffffff"),
    ("red", "#ff0000"),
    ("r", "#bf0000"),
    ("green", "#008000"),
    ("g", "#008000"),
    ("blue", "#0000ff"),
    ("b", "#0000ff"),
    ("cyan", "#00ffff"),
    ("c", "#00bfbf"),
    ("magenta", "#ff00ff"),
    ("m", "#bf00bf"),
    ("yellow", "#ffff00"),
    ("y", "#bfbf00"),
    ("orange", "#ffa500"),
    ("purple", "#800080"),
    ("brown", "#a52a2a"),
    ("pink", "#ffc0cb"),
    ("gray", "#808080"),
    ("grey", "#808080"),
    ("olive", "#808000"),
    ("navy", "#000080"),
    ("teal", "#008080"),
];

static HEX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#([0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").unwrap());
static CYCLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^C([0-9])$").unwrap());
static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*\)$").unwrap()
});

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parse a color specification.
    ///
    /// Accepts cycle references (`C0`..`C9`), hex (`#rgb`, `#rrggbb`,
    /// `#rrggbbaa`), `rgb(r, g, b)` and a small set of named colors.
    pub fn parse(spec: &str) -> Result<Self, RenderError> {
        let s = spec.trim();
        if let Some(caps) = CYCLE_RE.captures(s) {
            let idx: usize = caps[1].parse().unwrap_or(0);
            return Self::parse_hex(TAB10[idx]).ok_or_else(|| malformed(spec));
        }
        if HEX_RE.is_match(s) {
            return Self::parse_hex(s).ok_or_else(|| malformed(spec));
        }
        if let Some(caps) = RGB_RE.captures(s) {
            let channel = |i: usize| caps[i].parse::<u8>().map_err(|_| malformed(spec));
            return Ok(Self::rgb(channel(1)?, channel(2)?, channel(3)?));
        }
        let lower = s.to_ascii_lowercase();
        NAMED
            .iter()
            .find(|(name, _)| *name == lower)
            .and_then(|(_, hex)| Self::parse_hex(hex))
            .ok_or_else(|| malformed(spec))
    }

    fn parse_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#')?;
        let byte = |i: usize| u8::from_str_radix(s.get(i..i + 2)?, 16).ok();
        match s.len() {
            3 => {
                let nib = |i: usize| u8::from_str_radix(s.get(i..i + 1)?, 16).ok().map(|v| v * 17);
                Some(Self::rgb(nib(0)?, nib(1)?, nib(2)?))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)? as f64 / 255.0)),
            _ => None,
        }
    }

    pub const fn with_alpha(mut self, a: f64) -> Self {
        self.a = a;
        self
    }

    pub fn to_svg_fill(&self) -> String {
        if (self.a - 1.0).abs() < 1e-6 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("rgba({},{},{},{:.3})", self.r, self.g, self.b, self.a)
        }
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

fn malformed(spec: &str) -> RenderError {
    RenderError::Parameter {
        name: "colors".to_string(),
        reason: format!("unrecognized color specification '{spec}'"),
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_fill())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}
