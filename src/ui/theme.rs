use std::str::FromStr;

use ratatui::style::Color;

use crate::config::ThemeConfig;
use crate::error::AppError;

/// Colors for the measured values; everything else uses terminal defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub time: Color,
    pub word_count: Color,
    pub wpm: Color,
}

impl Theme {
    pub fn from_config(cfg: &ThemeConfig) -> Result<Self, AppError> {
        Ok(Self {
            time: parse_color("time", &cfg.time)?,
            word_count: parse_color("word_count", &cfg.word_count)?,
            wpm: parse_color("wpm", &cfg.wpm)?,
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            time: Color::Rgb(0x33, 0xff, 0x57),
            word_count: Color::Rgb(0xff, 0xd7, 0x00),
            wpm: Color::Rgb(0xef, 0x7c, 0x8e),
        }
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, AppError> {
    Color::from_str(value)
        .map_err(|_| AppError::Config(format!("theme.{field}: unknown color '{value}'")))
}
