//! Interactive questions asked when a choice was not made on the command
//! line or in the config file. Generic over the streams so tests can script
//! the answers.

use std::io::{BufRead, Write};

use crate::domain::target::TargetApp;
use crate::utils::error::{ExportError, Result};

/// Shows the numbered app menu until a valid choice is entered. Accepts the
/// menu number or an app name.
pub fn select_target<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<TargetApp> {
    loop {
        write_line(output, "Select the authenticator app to export for:")?;
        for (i, app) in TargetApp::ALL.iter().enumerate() {
            write_line(output, &format!("  {}. {}", i + 1, app))?;
        }
        write_flush(output, &format!("Enter choice [1-{}]: ", TargetApp::ALL.len()))?;

        let answer = read_answer(input)?;
        match answer.parse::<TargetApp>() {
            Ok(app) => return Ok(app),
            Err(_) => {
                tracing::debug!("Rejected target choice: {:?}", answer);
                write_line(output, "Invalid choice, please try again.")?;
            }
        }
    }
}

/// Y/n question. An empty answer means yes.
pub fn confirm_qr<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<bool> {
    loop {
        write_flush(output, "Generate QR codes? (Y/n): ")?;
        match read_answer(input)?.to_ascii_lowercase().as_str() {
            "" | "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => write_line(output, "Please answer y or n.")?,
        }
    }
}

fn read_answer<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| ExportError::unreadable("<stdin>", e))?;
    if read == 0 {
        return Err(ExportError::MissingConfigError {
            field: "interactive answer (input closed)".to_string(),
        });
    }
    Ok(line.trim().to_string())
}

fn write_line<W: Write>(output: &mut W, text: &str) -> Result<()> {
    writeln!(output, "{}", text).map_err(|e| ExportError::io("<stdout>", e))
}

fn write_flush<W: Write>(output: &mut W, text: &str) -> Result<()> {
    write!(output, "{}", text)
        .and_then(|_| output.flush())
        .map_err(|e| ExportError::io("<stdout>", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask_target(answers: &str) -> (Result<TargetApp>, String) {
        let mut input = Cursor::new(answers.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = select_target(&mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_menu_lists_apps_in_order() {
        let (result, shown) = ask_target("2\n");
        assert_eq!(result.unwrap(), TargetApp::GoogleAuthenticator);
        assert!(shown.contains("  1. Aegis"));
        assert!(shown.contains("  2. Google Authenticator"));
        assert!(shown.contains("  3. Microsoft Authenticator"));
        assert!(shown.contains("  4. 2FA"));
    }

    #[test]
    fn test_invalid_choice_reprompts() {
        let (result, shown) = ask_target("9\nfoo\n\n3\n");
        assert_eq!(result.unwrap(), TargetApp::MicrosoftAuthenticator);
        assert_eq!(shown.matches("Invalid choice").count(), 3);
    }

    #[test]
    fn test_names_are_accepted() {
        let (result, _) = ask_target("  Aegis \n");
        assert_eq!(result.unwrap(), TargetApp::Aegis);
    }

    #[test]
    fn test_closed_input_is_an_error() {
        let (result, _) = ask_target("7\n");
        assert!(matches!(result, Err(ExportError::MissingConfigError { .. })));
    }

    #[test]
    fn test_confirm_defaults_to_yes() {
        let confirm = |answers: &str| {
            let mut input = Cursor::new(answers.as_bytes().to_vec());
            confirm_qr(&mut input, &mut Vec::new())
        };

        assert!(confirm("\n").unwrap());
        assert!(confirm("Y\n").unwrap());
        assert!(confirm("yes\n").unwrap());
        assert!(!confirm("n\n").unwrap());
        assert!(!confirm("maybe\nNO\n").unwrap());
        assert!(confirm("").is_err());
    }
}
