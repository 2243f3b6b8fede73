#![allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use ratatui::style::Color;

use crate::{cli::ColorArg, domain::chart::Rgb};

mod capability;

use capability::detect_color_capability_from;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorCapability {
    TrueColor,
    Xterm256,
    Basic16,
}

pub fn detect_color_capability(mode: ColorArg) -> ColorCapability {
    let term = std::env::var("TERM").ok();
    let colorterm = std::env::var("COLORTERM").ok();
    let no_color = std::env::var("NO_COLOR").ok();
    detect_color_capability_from(
        mode,
        term.as_deref(),
        colorterm.as_deref(),
        no_color.as_deref(),
    )
}

/// Segment of the local day that drives the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPhase {
    Dawn,
    Morning,
    Midday,
    Evening,
    Dusk,
    Night,
}

impl DayPhase {
    #[must_use]
    pub fn for_hour(hour: u32) -> Self {
        match hour {
            5 | 6 => Self::Dawn,
            7..=9 => Self::Morning,
            10..=15 => Self::Midday,
            16..=18 => Self::Evening,
            19 | 20 => Self::Dusk,
            _ => Self::Night,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Dawn => "Dawn",
            Self::Morning => "Morning",
            Self::Midday => "Midday",
            Self::Evening => "Evening",
            Self::Dusk => "Dusk",
            Self::Night => "Night",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub text: Color,
    pub muted_text: Color,
    pub subtle_text: Color,
    pub border: Color,
    pub accent: Color,
    pub sun: Color,
    pub moon: Color,
    pub track: Color,
    pub rain: Color,
    pub warning: Color,
    pub danger: Color,
    capability: ColorCapability,
}

struct PhaseSeeds {
    background: (u8, u8, u8),
    surface: (u8, u8, u8),
    text: (u8, u8, u8),
    muted: (u8, u8, u8),
    subtle: (u8, u8, u8),
}

fn phase_seeds(phase: DayPhase) -> PhaseSeeds {
    let light_text = ((26, 26, 46), (90, 90, 122), (136, 136, 168));
    let (background, surface, (text, muted, subtle)) = match phase {
        DayPhase::Dawn => ((253, 232, 208), (255, 246, 238), light_text),
        DayPhase::Morning => ((232, 240, 254), (247, 249, 255), light_text),
        DayPhase::Midday => ((232, 244, 253), (248, 251, 254), light_text),
        DayPhase::Evening => ((252, 228, 214), (255, 245, 238), light_text),
        DayPhase::Dusk => (
            (201, 184, 212),
            (232, 226, 238),
            ((26, 26, 46), (74, 74, 106), (120, 120, 160)),
        ),
        DayPhase::Night => (
            (26, 26, 62),
            (30, 32, 60),
            ((224, 224, 240), (160, 160, 192), (112, 112, 160)),
        ),
    };
    PhaseSeeds {
        background,
        surface,
        text,
        muted,
        subtle,
    }
}

#[must_use]
pub fn theme_for(phase: DayPhase, capability: ColorCapability) -> Theme {
    if capability == ColorCapability::Basic16 {
        return basic16_theme(phase);
    }
    let seeds = phase_seeds(phase);
    let rgb = |(r, g, b): (u8, u8, u8)| quantize(Color::Rgb(r, g, b), capability);
    Theme {
        background: rgb(seeds.background),
        surface: rgb(seeds.surface),
        text: rgb(seeds.text),
        muted_text: rgb(seeds.muted),
        subtle_text: rgb(seeds.subtle),
        border: rgb(seeds.subtle),
        accent: rgb((59, 130, 246)),
        sun: rgb((245, 158, 11)),
        moon: rgb((124, 141, 181)),
        track: rgb(seeds.subtle),
        rain: rgb((96, 165, 250)),
        warning: rgb((217, 119, 6)),
        danger: rgb((220, 38, 38)),
        capability,
    }
}

fn basic16_theme(phase: DayPhase) -> Theme {
    let night = phase == DayPhase::Night;
    Theme {
        background: Color::Reset,
        surface: Color::Reset,
        text: if night { Color::White } else { Color::Reset },
        muted_text: Color::Gray,
        subtle_text: Color::DarkGray,
        border: Color::DarkGray,
        accent: Color::Cyan,
        sun: Color::Yellow,
        moon: Color::LightBlue,
        track: Color::DarkGray,
        rain: Color::LightBlue,
        warning: Color::Yellow,
        danger: Color::LightRed,
        capability: ColorCapability::Basic16,
    }
}

impl Theme {
    /// A chart colour reduced to what the terminal can show.
    #[must_use]
    pub fn chart_color(&self, rgb: Rgb) -> Color {
        quantize(Color::Rgb(rgb.r, rgb.g, rgb.b), self.capability)
    }

    #[must_use]
    pub fn celestial(&self, is_daytime: bool) -> Color {
        if is_daytime { self.sun } else { self.moon }
    }
}

pub fn quantize(color: Color, capability: ColorCapability) -> Color {
    match (capability, color) {
        (ColorCapability::TrueColor, c) => c,
        (ColorCapability::Xterm256, Color::Rgb(r, g, b)) => {
            let to_cube = |v: u8| -> u8 { ((f32::from(v) / 255.0) * 5.0).round() as u8 };
            let index = 16 + 36 * to_cube(r) + 6 * to_cube(g) + to_cube(b);
            Color::Indexed(index)
        }
        (ColorCapability::Basic16, Color::Rgb(r, g, b)) => basic16_from_rgb(r, g, b),
        (_, c) => c,
    }
}

fn basic16_from_rgb(r: u8, g: u8, b: u8) -> Color {
    let rf = f32::from(r) / 255.0;
    let gf = f32::from(g) / 255.0;
    let bf = f32::from(b) / 255.0;

    let max = rf.max(gf.max(bf));
    let min = rf.min(gf.min(bf));
    let delta = max - min;
    let light = (max + min) / 2.0;

    if delta < 0.08 {
        return match light {
            l if l < 0.20 => Color::Black,
            l if l < 0.40 => Color::DarkGray,
            l if l < 0.72 => Color::Gray,
            _ => Color::White,
        };
    }

    let hue = if (max - rf).abs() < f32::EPSILON {
        60.0 * ((gf - bf) / delta).rem_euclid(6.0)
    } else if (max - gf).abs() < f32::EPSILON {
        60.0 * (((bf - rf) / delta) + 2.0)
    } else {
        60.0 * (((rf - gf) / delta) + 4.0)
    };

    let bright = light >= 0.55;
    let (dim, lit) = match hue {
        h if !(30.0..330.0).contains(&h) => (Color::Red, Color::LightRed),
        h if h < 90.0 => (Color::Yellow, Color::LightYellow),
        h if h < 150.0 => (Color::Green, Color::LightGreen),
        h if h < 210.0 => (Color::Cyan, Color::LightCyan),
        h if h < 270.0 => (Color::Blue, Color::LightBlue),
        _ => (Color::Magenta, Color::LightMagenta),
    };
    if bright { lit } else { dim }
}
