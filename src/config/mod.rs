pub mod cli;
pub mod prompt;
pub mod settings;
pub mod toml_config;

pub use settings::{ExportOptions, Settings};
pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "otpauth-export", version)]
#[command(about = "Convert a decrypted authenticator export into otpauth:// URIs and QR codes")]
pub struct CliConfig {
    /// Decrypted JSON export [default: data.json]
    #[arg(long, short = 'i')]
    pub input: Option<String>,

    /// Target app: aegis, google, microsoft, 2fa (or 1-4). Prompts when omitted.
    #[arg(long, short = 't')]
    pub target: Option<String>,

    /// Write one QR code PNG per token without asking
    #[arg(long, overrides_with = "no_qr")]
    pub qr: bool,

    /// Only print the URIs
    #[arg(long, overrides_with = "qr")]
    pub no_qr: bool,

    /// Directory for the PNG files [default: "Generated QR Codes into .png"]
    #[arg(long, short = 'o')]
    pub output_dir: Option<String>,

    /// Pixels per QR module [default: 10]
    #[arg(long)]
    pub box_size: Option<u32>,

    /// Quiet zone width in modules [default: 4]
    #[arg(long)]
    pub border: Option<u32>,

    /// Error correction level: L, M, Q or H [default: L]
    #[arg(long)]
    pub ec_level: Option<String>,

    /// Smallest QR version to use, 1-40 [default: 1]
    #[arg(long)]
    pub min_version: Option<u8>,

    /// Module color: black, white or #rrggbb [default: black]
    #[arg(long)]
    pub foreground: Option<String>,

    /// Background color: black, white or #rrggbb [default: white]
    #[arg(long)]
    pub background: Option<String>,

    /// TOML options file; command-line flags take precedence
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,

    #[arg(long, short = 'v', help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn render_qr(&self) -> Option<bool> {
        if self.qr {
            Some(true)
        } else if self.no_qr {
            Some(false)
        } else {
            None
        }
    }

    pub fn to_options(&self) -> ExportOptions {
        ExportOptions {
            input: self.input.clone(),
            target: self.target.clone(),
            render_qr: self.render_qr(),
            output_dir: self.output_dir.clone(),
            box_size: self.box_size,
            border: self.border,
            ec_level: self.ec_level.clone(),
            min_version: self.min_version,
            foreground: self.foreground.clone(),
            background: self.background.clone(),
        }
    }

    /// Command-line values layered over the config file, if one was given.
    pub fn merged_options(&self) -> crate::utils::error::Result<ExportOptions> {
        let file = match &self.config {
            Some(path) => {
                tracing::debug!("Loading options from: {}", path.display());
                TomlConfig::from_file(path)?.to_options()
            }
            None => ExportOptions::default(),
        };
        Ok(self.to_options().or(file))
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_qr_flags() {
        let parse = |args: &[&str]| {
            CliConfig::parse_from(std::iter::once("otpauth-export").chain(args.iter().copied()))
        };

        assert_eq!(parse(&[]).render_qr(), None);
        assert_eq!(parse(&["--qr"]).render_qr(), Some(true));
        assert_eq!(parse(&["--no-qr"]).render_qr(), Some(false));
        assert_eq!(parse(&["--qr", "--no-qr"]).render_qr(), Some(false));
    }

    #[test]
    fn test_flags_map_to_options() {
        let config = CliConfig::parse_from([
            "otpauth-export",
            "--input",
            "export.json",
            "-t",
            "aegis",
            "--box-size",
            "5",
            "--ec-level",
            "M",
        ]);
        let options = config.to_options();

        assert_eq!(options.input.as_deref(), Some("export.json"));
        assert_eq!(options.target.as_deref(), Some("aegis"));
        assert_eq!(options.box_size, Some(5));
        assert_eq!(options.ec_level.as_deref(), Some("M"));
        assert_eq!(options.border, None);
    }

    #[test]
    fn test_config_file_fills_gaps() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(
            &mut file,
            b"[input]\ntarget = \"google\"\n[render]\nborder = 1\nbox_size = 7\n",
        )
        .unwrap();

        let config = CliConfig::parse_from([
            "otpauth-export",
            "--box-size",
            "3",
            "--config",
            file.path().to_str().unwrap(),
        ]);
        let options = config.merged_options().unwrap();

        assert_eq!(options.target.as_deref(), Some("google"));
        assert_eq!(options.border, Some(1));
        assert_eq!(options.box_size, Some(3));
    }
}
