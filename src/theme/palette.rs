use crossterm::style::Color;

/// Foreground colors for each part of the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    pub user: Color,
    pub assistant: Color,
    pub loading: Color,
}

impl Palette {
    pub const fn light() -> Self {
        Self {
            text: Color::Rgb { r: 0x34, g: 0x47, b: 0x68 },
            muted: Color::Rgb { r: 0x6b, g: 0x7a, b: 0x99 },
            accent: Color::Rgb { r: 0xd3, g: 0xae, b: 0x1a },
            border: Color::Rgb { r: 0xaa, g: 0xb3, b: 0xc2 },
            user: Color::Rgb { r: 0x90, g: 0x53, b: 0xa0 },
            assistant: Color::Rgb { r: 0x34, g: 0x47, b: 0x68 },
            loading: Color::Rgb { r: 0x34, g: 0x47, b: 0x68 },
        }
    }

    pub const fn dark() -> Self {
        Self {
            text: Color::Rgb { r: 0xf1, g: 0xf5, b: 0xfb },
            muted: Color::Rgb { r: 0xcb, g: 0xd5, b: 0xf5 },
            accent: Color::Rgb { r: 0xd3, g: 0xae, b: 0x1a },
            border: Color::Rgb { r: 0x5c, g: 0x65, b: 0x77 },
            user: Color::Rgb { r: 0xc9, g: 0xa0, b: 0xd6 },
            assistant: Color::Rgb { r: 0xc0, g: 0xcf, b: 0xfb },
            loading: Color::Rgb { r: 0x8a, g: 0x97, b: 0xb4 },
        }
    }
}
