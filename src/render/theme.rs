use serde::{Deserialize, Serialize};

use crate::error::{TimelineError, TimelineResult};
use crate::render::Color;

/// Colors used by the scene builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub background: Color,
    pub text: Color,
    pub accent: Color,
    pub lifeline: Color,
    pub event_line: Color,
    pub grid: Color,
    /// Bar colors, cycled by palette index.
    pub palette: Vec<Color>,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    #[must_use]
    pub fn dark() -> Self {
        Self {
            name: "dark".to_owned(),
            background: Color::from_rgb_u32(0x11_18_27),
            text: Color::from_rgb_u32(0xf3_f4_f6),
            accent: Color::from_rgb_u32(0x60_a5_fa),
            lifeline: Color::from_rgb_u32(0xfa_cc_15),
            event_line: Color::from_rgb_u32(0xf4_72_b6),
            grid: Color::from_rgb_u32(0x4b_55_63),
            palette: [0x3b_82_f6, 0x1d_4e_d8, 0x08_91_b2, 0x05_96_69, 0x7c_3a_ed, 0xdb_27_77]
                .into_iter()
                .map(Color::from_rgb_u32)
                .collect(),
        }
    }

    #[must_use]
    pub fn light() -> Self {
        Self {
            name: "light".to_owned(),
            background: Color::from_rgb_u32(0xf9_fa_fb),
            text: Color::from_rgb_u32(0x1f_29_37),
            accent: Color::from_rgb_u32(0x3b_82_f6),
            lifeline: Color::from_rgb_u32(0xca_8a_04),
            event_line: Color::from_rgb_u32(0xdb_27_77),
            grid: Color::from_rgb_u32(0xd1_d5_db),
            palette: [0x60_a5_fa, 0x25_63_eb, 0x10_b9_81, 0xf5_9e_0b, 0x8b_5c_f6, 0xec_48_99]
                .into_iter()
                .map(Color::from_rgb_u32)
                .collect(),
        }
    }

    /// Replaces the palette with `#rrggbb` strings.
    pub fn with_hex_palette<I, S>(mut self, colors: I) -> TimelineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let palette = colors
            .into_iter()
            .map(|hex| Color::from_hex(hex.as_ref()))
            .collect::<TimelineResult<Vec<_>>>()?;
        if palette.is_empty() {
            return Err(TimelineError::InvalidConfig(
                "theme palette must not be empty".to_owned(),
            ));
        }
        self.palette = palette;
        Ok(self)
    }

    /// `palette[index % len]`; the accent color when the palette is empty.
    #[must_use]
    pub fn palette_color(&self, index: usize) -> Color {
        if self.palette.is_empty() {
            return self.accent;
        }
        self.palette[index % self.palette.len()]
    }
}
