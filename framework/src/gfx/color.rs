use std::fmt;
use std::str::FromStr;

/// Default per-channel tolerance used when comparing colors.
pub const DEFAULT_TOLERANCE: u8 = 10;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid color `{0}`, expected `#RGB` or `#RRGGBB`")]
pub struct ParseError(pub String);

///////////////////////////////////////////////////////////////////////////
// Rgba8
///////////////////////////////////////////////////////////////////////////

/// RGBA color with 8-bit channels.
#[repr(C)]
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Hash, Debug, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0, 0, 0, 0xff);
    pub const RED: Self = Self::new(0xff, 0, 0, 0xff);
    pub const GREEN: Self = Self::new(0, 0xff, 0, 0xff);
    pub const BLUE: Self = Self::new(0, 0, 0xff, 0xff);

    /// Create a new [`Rgba8`] color from individual channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Return the color with a changed alpha.
    ///
    /// ```
    /// use colorbook_framework::gfx::color::Rgba8;
    ///
    /// let c = Rgba8::WHITE;
    /// assert_eq!(c.alpha(0x88), Rgba8::new(c.r, c.g, c.b, 0x88))
    /// ```
    pub fn alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Channels in `[r, g, b, a]` order.
    pub const fn channels(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Whether every channel of `self` is within `tolerance` of the same channel
    /// of `other`. Absorbs anti-aliasing noise along line-art edges.
    ///
    /// ```
    /// use colorbook_framework::gfx::color::Rgba8;
    ///
    /// let c = Rgba8::new(100, 100, 100, 255);
    /// assert!(c.matches(Rgba8::new(110, 100, 100, 255), 10));
    /// assert!(!c.matches(Rgba8::new(111, 100, 100, 255), 10));
    /// ```
    pub fn matches(self, other: Rgba8, tolerance: u8) -> bool {
        self.channels()
            .iter()
            .zip(other.channels().iter())
            .all(|(a, b)| a.abs_diff(*b) <= tolerance)
    }

    /// Composite this color over an opaque background. The result is always opaque.
    ///
    /// ```
    /// use colorbook_framework::gfx::color::Rgba8;
    ///
    /// assert_eq!(Rgba8::TRANSPARENT.over(Rgba8::WHITE), Rgba8::WHITE);
    /// assert_eq!(Rgba8::RED.over(Rgba8::WHITE), Rgba8::RED);
    /// ```
    pub fn over(self, bg: Rgba8) -> Rgba8 {
        let a = self.a as u32;
        let blend = |fg: u8, bg: u8| -> u8 {
            ((fg as u32 * a + bg as u32 * (255 - a) + 127) / 255) as u8
        };

        Rgba8::new(
            blend(self.r, bg.r),
            blend(self.g, bg.g),
            blend(self.b, bg.b),
            0xff,
        )
    }

    /// Six-digit upper-case hex code of the color. Alpha is dropped.
    ///
    /// ```
    /// use colorbook_framework::gfx::color::Rgba8;
    ///
    /// assert_eq!(Rgba8::new(0xab, 0xcd, 0xef, 0xff).hex(), "#ABCDEF");
    /// ```
    pub fn hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// ```
/// use colorbook_framework::gfx::color::Rgba8;
///
/// assert_eq!(format!("{}", Rgba8::new(0xff, 0x0, 0xa, 0xff)), "#ff000a");
/// assert_eq!(format!("{}", Rgba8::new(0xff, 0x0, 0xa, 0x80)), "#ff000a80");
/// ```
impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 0xff {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl From<[u8; 4]> for Rgba8 {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl FromStr for Rgba8 {
    type Err = ParseError;

    /// Parse a color code of the form `#rgb` or `#rrggbb`, in any case, into an
    /// instance of `Rgba8`. The alpha is always `0xff`.
    fn from_str(hex_code: &str) -> Result<Self, Self::Err> {
        let err = || ParseError(hex_code.to_owned());
        let digits = hex_code.strip_prefix('#').ok_or_else(err)?;

        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        // Digits are ASCII from here on, so byte slicing is safe.
        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| err());

        match digits.len() {
            3 => {
                let r = channel(&digits[0..1])?;
                let g = channel(&digits[1..2])?;
                let b = channel(&digits[2..3])?;

                Ok(Rgba8::new(r * 0x11, g * 0x11, b * 0x11, 0xff))
            }
            6 => Ok(Rgba8::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
                0xff,
            )),
            _ => Err(err()),
        }
    }
}
