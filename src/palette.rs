use crate::gfx::prelude::{ParseError, Rgba8};

/// The fill colors offered to the user, in display order.
///
/// Values follow the CSS named colors, so `green` here is `#008000`, darker
/// than [`Rgba8::GREEN`].
pub const COLORS: &[(&str, Rgba8)] = &[
    ("red", Rgba8::new(0xff, 0x00, 0x00, 0xff)),
    ("blue", Rgba8::new(0x00, 0x00, 0xff, 0xff)),
    ("green", Rgba8::new(0x00, 0x80, 0x00, 0xff)),
    ("yellow", Rgba8::new(0xff, 0xff, 0x00, 0xff)),
    ("orange", Rgba8::new(0xff, 0xa5, 0x00, 0xff)),
    ("purple", Rgba8::new(0x80, 0x00, 0x80, 0xff)),
    ("cyan", Rgba8::new(0x00, 0xff, 0xff, 0xff)),
    ("pink", Rgba8::new(0xff, 0xc0, 0xcb, 0xff)),
    ("brown", Rgba8::new(0xa5, 0x2a, 0x2a, 0xff)),
    ("gray", Rgba8::new(0x80, 0x80, 0x80, 0xff)),
    ("white", Rgba8::new(0xff, 0xff, 0xff, 0xff)),
];

#[derive(Debug, Clone)]
pub struct Palette {
    pub colors: Vec<(String, Rgba8)>,
    /// Currently selected color.
    pub selected: Rgba8,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: COLORS
                .iter()
                .map(|(name, color)| (name.to_string(), *color))
                .collect(),
            selected: COLORS[0].1,
        }
    }
}

impl Palette {
    /// Look up a color by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<Rgba8> {
        self.colors
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }

    /// Resolve a color name or a hex code. Colors outside the palette are
    /// allowed, as long as they're valid hex codes.
    pub fn resolve(&self, input: &str) -> Result<Rgba8, ParseError> {
        match self.get(input) {
            Some(color) => Ok(color),
            None => input.parse(),
        }
    }

    /// Select a color by name or hex code. The selection is unchanged on error.
    pub fn select(&mut self, input: &str) -> Result<Rgba8, ParseError> {
        let color = self.resolve(input)?;
        self.selected = color;

        Ok(color)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Rgba8)> + '_ {
        self.colors.iter().map(|(n, c)| (n.as_str(), *c))
    }
}
