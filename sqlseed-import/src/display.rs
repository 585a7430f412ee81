//! Colour helpers that honour `RunConfig::color_enabled`.

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use sqlseed_core::RunConfig;

pub fn failure(config: &RunConfig, text: &str) -> String {
    if config.color_enabled {
        text.if_supports_color(Stdout, |t| t.red()).to_string()
    } else {
        text.to_string()
    }
}

pub fn success(config: &RunConfig, text: &str) -> String {
    if config.color_enabled {
        text.if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        text.to_string()
    }
}

pub fn warning(config: &RunConfig, text: &str) -> String {
    if config.color_enabled {
        text.if_supports_color(Stdout, |t| t.yellow()).to_string()
    } else {
        text.to_string()
    }
}

pub fn emphasis(config: &RunConfig, text: &str) -> String {
    if config.color_enabled {
        text.if_supports_color(Stdout, |t| t.bold()).to_string()
    } else {
        text.to_string()
    }
}

pub fn dimmed(config: &RunConfig, text: &str) -> String {
    if config.color_enabled {
        text.if_supports_color(Stdout, |t| t.dimmed()).to_string()
    } else {
        text.to_string()
    }
}
