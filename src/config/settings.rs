use crate::core::ConfigProvider;
use crate::domain::target::TargetApp;
use crate::qr::render::{parse_color, RenderOptions};
use crate::qr::{EcLevel, Version};
use crate::utils::error::{ExportError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, validate_range, Validate};

pub const DEFAULT_INPUT: &str = "data.json";
pub const DEFAULT_OUTPUT_DIR: &str = "Generated QR Codes into .png";

/// Unresolved option values from one source (command line or config file).
/// `None` means "not set here".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportOptions {
    pub input: Option<String>,
    pub target: Option<String>,
    pub render_qr: Option<bool>,
    pub output_dir: Option<String>,
    pub box_size: Option<u32>,
    pub border: Option<u32>,
    pub ec_level: Option<String>,
    pub min_version: Option<u8>,
    pub foreground: Option<String>,
    pub background: Option<String>,
}

impl ExportOptions {
    /// Fills every unset value from `fallback`.
    pub fn or(self, fallback: ExportOptions) -> Self {
        Self {
            input: self.input.or(fallback.input),
            target: self.target.or(fallback.target),
            render_qr: self.render_qr.or(fallback.render_qr),
            output_dir: self.output_dir.or(fallback.output_dir),
            box_size: self.box_size.or(fallback.box_size),
            border: self.border.or(fallback.border),
            ec_level: self.ec_level.or(fallback.ec_level),
            min_version: self.min_version.or(fallback.min_version),
            foreground: self.foreground.or(fallback.foreground),
            background: self.background.or(fallback.background),
        }
    }
}

/// Fully resolved configuration for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub input_path: String,
    pub output_dir: String,
    pub target: TargetApp,
    /// `None` leaves the decision to the caller (usually a prompt).
    pub render_qr: Option<bool>,
    pub render: RenderOptions,
}

impl Settings {
    /// Applies defaults and parses every textual value. `choose_target` is
    /// only called when no target was configured.
    pub fn resolve<F>(options: ExportOptions, choose_target: F) -> Result<Self>
    where
        F: FnOnce() -> Result<TargetApp>,
    {
        let defaults = RenderOptions::default();

        let ec_level = match options.ec_level {
            Some(level) => level.parse::<EcLevel>()?,
            None => defaults.ec_level,
        };
        let min_version = match options.min_version {
            Some(value) => Version::new(value).ok_or_else(|| ExportError::InvalidConfigValueError {
                field: "min_version".to_string(),
                value: value.to_string(),
                reason: format!("Value must be between {} and {}", Version::MIN, Version::MAX),
            })?,
            None => defaults.min_version,
        };
        let foreground = match options.foreground {
            Some(color) => parse_color(&color)?,
            None => defaults.foreground,
        };
        let background = match options.background {
            Some(color) => parse_color(&color)?,
            None => defaults.background,
        };

        let target = match options.target {
            Some(target) => {
                validate_non_empty_string("target", &target)?;
                target.parse::<TargetApp>()?
            }
            None => choose_target()?,
        };

        let settings = Self {
            input_path: options.input.unwrap_or_else(|| DEFAULT_INPUT.to_string()),
            output_dir: options
                .output_dir
                .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            target,
            render_qr: options.render_qr,
            render: RenderOptions {
                box_size: options.box_size.unwrap_or(defaults.box_size),
                border: options.border.unwrap_or(defaults.border),
                ec_level,
                min_version,
                foreground,
                background,
            },
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_dir(&self) -> &str {
        &self.output_dir
    }

    fn target(&self) -> TargetApp {
        self.target
    }

    fn render_options(&self) -> &RenderOptions {
        &self.render
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("input", &self.input_path)?;
        validate_path("output_dir", &self.output_dir)?;
        validate_range("box_size", self.render.box_size, 1, 100)?;
        validate_range("border", self.render.border, 0, 100)?;

        if self.render.foreground == self.render.background {
            return Err(ExportError::ConfigValidationError {
                field: "foreground".to_string(),
                message: "foreground and background colors must differ".to_string(),
            });
        }

        Ok(())
    }
}
