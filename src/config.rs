use anyhow::Result;
use crossterm::style::Stylize;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::default_colors::*;

#[derive(Debug, Serialize, Deserialize)]
pub struct StyleConfig {
    bold:   bool,
    italic: bool,
    color:  crossterm::style::Color,
}

impl StyleConfig {
    fn style(&self, s: impl ToString) -> String {
        let mut s = s.to_string().with(self.color);
        if self.bold {
            s = s.bold();
        }
        if self.italic {
            s = s.italic();
        }
        s.to_string()
    }
}

pub trait Styleable {
    fn style(&self, c: &StyleConfig) -> String;
}

impl<T> Styleable for T
where
    T: ToString + std::fmt::Display,
{
    fn style(&self, c: &StyleConfig) -> String {
        c.style(self)
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color:  COLOR_WHITE,
            bold:   false,
            italic: false,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OutputConfig {
    pub prefix:            String,
    pub suffix:            String,
    pub description:       String,
    pub style_prefix:      StyleConfig,
    pub style_suffix:      StyleConfig,
    pub style_description: StyleConfig,
    pub style_content:     StyleConfig,
}

impl OutputConfig {
    pub fn format(&self, content: impl ToString) -> String {
        let prefix = self.prefix.style(&self.style_prefix);
        let suffix = self.suffix.style(&self.style_suffix);
        let description = self.description.style(&self.style_description);
        let content = content.to_string().style(&self.style_content);
        format!("{prefix}{description}{content}{suffix}")
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            prefix:            "".into(),
            suffix:            "".into(),
            description:       "".into(),
            style_prefix:      StyleConfig::default(),
            style_suffix:      StyleConfig::default(),
            style_description: StyleConfig {
                italic: true,
                ..StyleConfig::default()
            },
            style_content:     StyleConfig::default(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the book service, with a trailing slash. The list
    /// endpoint lives at `{base}books`, item endpoints at `{base}{isbn}`.
    pub api_base_url:   String,
    pub output_book:    OutputConfig,
    pub output_author:  OutputConfig,
    pub output_isbn:    OutputConfig,
    pub output_info:    OutputConfig,
    pub output_success: OutputConfig,
    pub output_error:   OutputConfig,
}

impl Config {
    pub fn default_as_string() -> Result<String> {
        Ok(toml::to_string(&Self::default())?)
    }

    pub fn read_config() -> Result<Self> {
        Ok(Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("HYLLA_"))
            .extract()?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url:   "http://localhost:3000/".into(),
            output_book:    OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_BOOK,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_author:  OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_AUTHOR,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_isbn:    OutputConfig {
                prefix: "(".into(),
                suffix: ")".into(),
                style_content: StyleConfig {
                    color: COLOR_DIMMED,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_info:    OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_INFO,
                    italic: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_success: OutputConfig {
                style_content: StyleConfig {
                    color: COLOR_SUCCESS,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
            output_error:   OutputConfig {
                description: "Error: ".into(),
                style_content: StyleConfig {
                    color: COLOR_ERROR,
                    bold: true,
                    ..StyleConfig::default()
                },
                ..OutputConfig::default()
            },
        }
    }
}
