//! Background themes
//!
//! A fixed palette cycled on every new quote, never repeating the previous
//! entry.

use rand::Rng;

/// One palette entry, as `#rrggbb` strings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub from: &'static str,
    pub mid: &'static str,
    pub to: &'static str,
    pub orb1: &'static str,
    pub orb2: &'static str,
    pub accent: &'static str,
}

const fn theme(
    from: &'static str,
    mid: &'static str,
    to: &'static str,
    orb1: &'static str,
    orb2: &'static str,
    accent: &'static str,
) -> Theme {
    Theme { from, mid, to, orb1, orb2, accent }
}

pub const THEMES: [Theme; 10] = [
    theme("#0d1b3e", "#0a2a4a", "#0d3b4f", "#5ee7c8", "#7b9ef0", "#5ee7c8"),
    theme("#1a0a2e", "#2d1060", "#1a0540", "#c084fc", "#818cf8", "#c084fc"),
    theme("#1a0a00", "#3d1a00", "#2a0f00", "#fb923c", "#fbbf24", "#fb923c"),
    theme("#001a10", "#003d20", "#001a12", "#34d399", "#6ee7b7", "#34d399"),
    theme("#1a0020", "#3d0048", "#200020", "#f472b6", "#c084fc", "#f472b6"),
    theme("#001220", "#002d48", "#001830", "#38bdf8", "#818cf8", "#38bdf8"),
    theme("#1f1000", "#3d2200", "#291500", "#fcd34d", "#fb923c", "#fcd34d"),
    theme("#001a1a", "#003d3d", "#001f1f", "#2dd4bf", "#34d399", "#2dd4bf"),
    theme("#0f0a1a", "#1e1040", "#120a25", "#a78bfa", "#60a5fa", "#a78bfa"),
    theme("#1a0808", "#3d1010", "#250808", "#f87171", "#fb923c", "#f87171"),
];

/// Parse `#rrggbb` (leading `#` optional)
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Picks the next theme, never the same index twice in a row
#[derive(Debug, Clone)]
pub struct ThemeCycler {
    last: usize,
}

impl Default for ThemeCycler {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeCycler {
    /// Start at the first palette entry
    pub fn new() -> Self {
        Self { last: 0 }
    }

    pub fn index(&self) -> usize {
        self.last
    }

    pub fn current(&self) -> &'static Theme {
        &THEMES[self.last]
    }

    /// Advance to a random theme other than the current one
    pub fn advance_with<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &'static Theme {
        if THEMES.len() > 1 {
            let pick = rng.random_range(0..THEMES.len() - 1);
            self.last = if pick >= self.last { pick + 1 } else { pick };
        }
        self.current()
    }
}
