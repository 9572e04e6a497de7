use std::num::IntErrorKind;
use std::ops::RangeInclusive;

use poise::serenity_prelude::Colour;

use crate::modules::colors::service::ColorError;

pub const NAME_LENGTH: RangeInclusive<usize> = 3..=10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `r * 65536 + g * 256 + b`, the value Discord expects for role and embed colors.
    pub const fn packed(self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// Inverse of [`Rgb::packed`]; bits above the low 24 are ignored.
    pub const fn from_packed(value: u32) -> Self {
        Self {
            r: (value >> 16) as u8,
            g: (value >> 8) as u8,
            b: value as u8,
        }
    }

    pub fn colour(self) -> Colour {
        Colour::new(self.packed())
    }
}

/// Raw text submitted through the create form.
#[derive(Debug, Clone, Default)]
pub struct ColorDraft {
    pub name: String,
    pub red: String,
    pub green: String,
    pub blue: String,
}

/// A draft that passed every check and can be turned into a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidColor {
    pub name: String,
    pub rgb: Rgb,
}

impl ColorDraft {
    /// Numbers are parsed for all channels before anything else is checked,
    /// so `"abc"` is always `InvalidFormat` even next to an out-of-range value.
    pub fn validate(&self) -> Result<ValidColor, ColorError> {
        let red = parse_channel(&self.red)?;
        let green = parse_channel(&self.green)?;
        let blue = parse_channel(&self.blue)?;

        let length = self.name.chars().count();
        if !NAME_LENGTH.contains(&length) {
            return Err(ColorError::InvalidName { length });
        }

        Ok(ValidColor {
            name: self.name.clone(),
            rgb: Rgb::new(in_range(red)?, in_range(green)?, in_range(blue)?),
        })
    }
}

enum Channel {
    Value(i64),
    Overflow,
}

fn parse_channel(input: &str) -> Result<Channel, ColorError> {
    match input.trim().parse::<i64>() {
        Ok(value) => Ok(Channel::Value(value)),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Ok(Channel::Overflow)
        }
        Err(_) => Err(ColorError::InvalidFormat),
    }
}

fn in_range(channel: Channel) -> Result<u8, ColorError> {
    match channel {
        Channel::Value(value) => u8::try_from(value).map_err(|_| ColorError::OutOfRange),
        Channel::Overflow => Err(ColorError::OutOfRange),
    }
}
