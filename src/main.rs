use std::io;
use std::process::ExitCode;

use clap::Parser;
use otpauth_export::config::prompt;
use otpauth_export::utils::error::{ErrorSeverity, ExportError};
use otpauth_export::utils::logger;
use otpauth_export::{CliConfig, ExportEngine, ExportPipeline, LocalStorage, Settings};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!("CLI config: {:?}", config);

    match run(config).await {
        Ok(code) => code,
        Err(err) => match err.downcast_ref::<ExportError>() {
            Some(e) => {
                tracing::error!(
                    "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
                    e,
                    e.category(),
                    e.severity()
                );
                eprintln!("❌ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());

                // 根據錯誤嚴重程度決定退出碼
                match e.severity() {
                    ErrorSeverity::Low => ExitCode::SUCCESS,
                    ErrorSeverity::Medium => ExitCode::from(2),
                    ErrorSeverity::High => ExitCode::from(1),
                    ErrorSeverity::Critical => ExitCode::from(3),
                }
            }
            None => {
                eprintln!("❌ {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}

async fn run(config: CliConfig) -> anyhow::Result<ExitCode> {
    let options = config.merged_options()?;
    let settings = Settings::resolve(options, || {
        prompt::select_target(&mut io::stdin().lock(), &mut io::stdout())
    })?;
    tracing::info!("🎯 Target app: {}", settings.target);

    let render_qr = settings.render_qr;
    let pipeline = ExportPipeline::new(LocalStorage::new("."), settings);
    let engine = ExportEngine::new(pipeline);

    let uris = engine.convert().await?;
    for record in &uris {
        println!("{}", record.uri);
    }
    if uris.is_empty() {
        tracing::info!("No tokens to export");
        return Ok(ExitCode::SUCCESS);
    }

    let render = match render_qr {
        Some(render) => render,
        None => prompt::confirm_qr(&mut io::stdin().lock(), &mut io::stdout())?,
    };
    if !render {
        return Ok(ExitCode::SUCCESS);
    }

    let report = engine.render(&uris).await?;
    for path in &report.written {
        println!("QR code generated: {}", path.display());
    }
    for failure in &report.failures {
        eprintln!(
            "❌ {}: {}",
            failure.display_name,
            failure.error.user_friendly_message()
        );
        eprintln!("💡 {}", failure.error.recovery_suggestion());
    }

    if report.is_success() {
        tracing::info!("✅ Export completed successfully!");
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::warn!(
            "{} of {} QR codes failed",
            report.failures.len(),
            uris.len()
        );
        Ok(ExitCode::from(2))
    }
}
