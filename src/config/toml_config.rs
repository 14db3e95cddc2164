use crate::config::settings::ExportOptions;
use crate::utils::error::{ExportError, Result};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

/// Optional options file. Every key may be omitted; command-line flags win.
///
/// ```toml
/// [input]
/// path = "${HOME}/exports/data.json"
/// target = "aegis"
///
/// [output]
/// dir = "codes"
/// qr = true
///
/// [render]
/// box_size = 8
/// border = 4
/// ec_level = "M"
/// min_version = 1
/// foreground = "#000000"
/// background = "white"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TomlConfig {
    pub input: InputSection,
    pub output: OutputSection,
    pub render: RenderSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InputSection {
    pub path: Option<String>,
    pub target: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub dir: Option<String>,
    pub qr: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    pub box_size: Option<u32>,
    pub border: Option<u32>,
    pub ec_level: Option<String>,
    pub min_version: Option<u8>,
    pub foreground: Option<String>,
    pub background: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ExportError::unreadable(path, e))?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ExportError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOME})，未設定的變數視為錯誤
    fn substitute_env_vars(content: &str) -> Result<String> {
        let mut missing = None;
        let result = ENV_VAR.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                missing.get_or_insert_with(|| var_name.to_string());
                String::new()
            })
        });

        match missing {
            Some(field) => Err(ExportError::MissingConfigError { field }),
            None => Ok(result.into_owned()),
        }
    }

    pub fn to_options(&self) -> ExportOptions {
        ExportOptions {
            input: self.input.path.clone(),
            target: self.input.target.clone(),
            render_qr: self.output.qr,
            output_dir: self.output.dir.clone(),
            box_size: self.render.box_size,
            border: self.render.border,
            ec_level: self.render.ec_level.clone(),
            min_version: self.render.min_version,
            foreground: self.render.foreground.clone(),
            background: self.render.background.clone(),
        }
    }
}
