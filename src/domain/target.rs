//! Target authenticator apps and the `otpauth://` layout each one expects.
//!
//! Every app maps to one [`UriTemplate`]. The templates only differ in where
//! the issuer goes: as a trailing `issuer=` parameter, or as an
//! `issuer:name` prefix in the path.

use std::fmt;
use std::str::FromStr;

use crate::domain::model::{TokenRecord, UriRecord};
use crate::utils::error::ExportError;

pub const ALGORITHM: &str = "SHA1";
pub const PERIOD_SECONDS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetApp {
    Aegis,
    GoogleAuthenticator,
    MicrosoftAuthenticator,
    TwoFa,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UriTemplate {
    /// `otpauth://totp/{name}?...&issuer={issuer}`
    IssuerParam,
    /// `otpauth://totp/{issuer}:{name}?...`
    IssuerPrefix,
}

impl TargetApp {
    /// Menu order.
    pub const ALL: [TargetApp; 4] = [
        TargetApp::Aegis,
        TargetApp::GoogleAuthenticator,
        TargetApp::MicrosoftAuthenticator,
        TargetApp::TwoFa,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            TargetApp::Aegis => "Aegis",
            TargetApp::GoogleAuthenticator => "Google Authenticator",
            TargetApp::MicrosoftAuthenticator => "Microsoft Authenticator",
            TargetApp::TwoFa => "2FA",
        }
    }

    pub fn template(&self) -> UriTemplate {
        match self {
            TargetApp::Aegis | TargetApp::TwoFa => UriTemplate::IssuerParam,
            TargetApp::GoogleAuthenticator | TargetApp::MicrosoftAuthenticator => {
                UriTemplate::IssuerPrefix
            }
        }
    }

    pub fn build_uri(&self, token: &TokenRecord) -> UriRecord {
        UriRecord {
            uri: self.template().render(token),
            display_name: token.name.clone(),
        }
    }
}

impl fmt::Display for TargetApp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for TargetApp {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase();
        let app = match key.as_str() {
            "1" | "aegis" => TargetApp::Aegis,
            "2" | "google" | "google authenticator" | "google-authenticator" => {
                TargetApp::GoogleAuthenticator
            }
            "3" | "microsoft" | "microsoft authenticator" | "microsoft-authenticator" => {
                TargetApp::MicrosoftAuthenticator
            }
            "4" | "2fa" | "2fas" => TargetApp::TwoFa,
            _ => {
                return Err(ExportError::UnknownTarget {
                    target: s.to_string(),
                })
            }
        };
        Ok(app)
    }
}

impl UriTemplate {
    pub fn render(&self, token: &TokenRecord) -> String {
        let name = encode_component(&sanitize(&token.name));
        let issuer = token
            .issuer
            .as_deref()
            .filter(|issuer| !issuer.is_empty())
            .map(|issuer| encode_component(&sanitize(issuer)));

        let path = match (self, &issuer) {
            (UriTemplate::IssuerPrefix, Some(issuer)) => format!("{}:{}", issuer, name),
            _ => name,
        };

        let mut params = vec![
            format!("secret={}", encode_component(&token.secret)),
            format!("digits={}", token.digits),
            format!("algorithm={}", ALGORITHM),
            format!("period={}", PERIOD_SECONDS),
        ];
        if let (UriTemplate::IssuerParam, Some(issuer)) = (self, &issuer) {
            params.push(format!("issuer={}", issuer));
        }

        format!("otpauth://totp/{}?{}", path, params.join("&"))
    }
}

/// Replaces spaces and colons with `_`. Idempotent.
pub fn sanitize(value: &str) -> String {
    value.replace([' ', ':'], "_")
}

/// Percent-encodes only the bytes that would change how the URI splits into
/// path and query.
fn encode_component(value: &str) -> String {
    let mut output = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'%' | b'&' | b'?' | b'#' | b'/' | b'=' | b'+' => {
                output.push_str(&format!("%{:02X}", byte))
            }
            0x21..=0x7E => output.push(byte as char),
            _ => output.push_str(&format!("%{:02X}", byte)),
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_token() -> TokenRecord {
        TokenRecord::new("user@example.com", "JBSWY3DPEHPK3PXP").with_issuer("Example")
    }

    #[test]
    fn test_google_authenticator_places_issuer_in_path() {
        let record = TargetApp::GoogleAuthenticator.build_uri(&example_token());
        assert_eq!(
            record.uri,
            "otpauth://totp/Example:user@example.com?secret=JBSWY3DPEHPK3PXP&digits=6&algorithm=SHA1&period=30"
        );
        assert_eq!(record.display_name, "user@example.com");
    }

    #[test]
    fn test_microsoft_matches_google_layout() {
        let token = example_token();
        assert_eq!(
            TargetApp::MicrosoftAuthenticator.build_uri(&token).uri,
            TargetApp::GoogleAuthenticator.build_uri(&token).uri
        );
    }

    #[test]
    fn test_aegis_places_issuer_in_query() {
        let record = TargetApp::Aegis.build_uri(&example_token());
        assert_eq!(
            record.uri,
            "otpauth://totp/user@example.com?secret=JBSWY3DPEHPK3PXP&digits=6&algorithm=SHA1&period=30&issuer=Example"
        );
        assert_eq!(record.uri, TargetApp::TwoFa.build_uri(&example_token()).uri);
    }

    #[test]
    fn test_missing_issuer_leaves_no_artifacts() {
        let token = TokenRecord::new("alice", "ABCDEF");
        let aegis = TargetApp::Aegis.build_uri(&token).uri;
        assert_eq!(
            aegis,
            "otpauth://totp/alice?secret=ABCDEF&digits=6&algorithm=SHA1&period=30"
        );
        assert!(!aegis.contains("issuer="));

        let google = TargetApp::GoogleAuthenticator.build_uri(&token).uri;
        assert!(google.starts_with("otpauth://totp/alice?"));
        assert!(!google.contains("totp/:"));
    }

    #[test]
    fn test_empty_issuer_is_treated_as_missing() {
        let token = TokenRecord::new("alice", "ABCDEF").with_issuer("");
        assert!(!TargetApp::TwoFa.build_uri(&token).uri.contains("issuer="));
    }

    #[test]
    fn test_spaces_and_colons_are_replaced() {
        let token = TokenRecord::new("Work: alice smith", "ABCDEF").with_issuer("Big Corp:EU");
        let google = TargetApp::GoogleAuthenticator.build_uri(&token);
        assert!(google
            .uri
            .starts_with("otpauth://totp/Big_Corp_EU:Work__alice_smith?"));
        assert_eq!(google.display_name, "Work: alice smith");

        let aegis = TargetApp::Aegis.build_uri(&token);
        assert!(aegis.uri.ends_with("&issuer=Big_Corp_EU"));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for value in ["a b:c", "::  ::", "plain", "", "x_y z"] {
            let once = sanitize(value);
            assert_eq!(sanitize(&once), once);
            assert!(!once.contains(' '));
            assert!(!once.contains(':'));
        }
    }

    #[test]
    fn test_reserved_characters_are_escaped() {
        let token = TokenRecord::new("a&b?c#d/e", "SECRET").with_issuer("R&D=1");
        let uri = TargetApp::Aegis.build_uri(&token).uri;
        assert!(uri.starts_with("otpauth://totp/a%26b%3Fc%23d%2Fe?"));
        assert!(uri.ends_with("&issuer=R%26D%3D1"));
    }

    #[test]
    fn test_uri_is_well_formed_for_every_target() {
        let token = TokenRecord::new("Jane Doe", "JBSWY3DPEHPK3PXP")
            .with_issuer("Acme Inc")
            .with_digits(8);
        for app in TargetApp::ALL {
            let uri = app.build_uri(&token).uri;
            let parsed = url::Url::parse(&uri).unwrap();
            assert_eq!(parsed.scheme(), "otpauth");
            assert_eq!(parsed.host_str(), Some("totp"));

            let pairs: Vec<(String, String)> = parsed
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            assert!(pairs.contains(&("secret".to_string(), "JBSWY3DPEHPK3PXP".to_string())));
            assert!(pairs.contains(&("digits".to_string(), "8".to_string())));
            assert!(pairs.contains(&("algorithm".to_string(), "SHA1".to_string())));
            assert!(pairs.contains(&("period".to_string(), "30".to_string())));
        }
    }

    #[test]
    fn test_parse_target_names_aliases_and_indexes() {
        assert_eq!("Aegis".parse::<TargetApp>().unwrap(), TargetApp::Aegis);
        assert_eq!(
            "google authenticator".parse::<TargetApp>().unwrap(),
            TargetApp::GoogleAuthenticator
        );
        assert_eq!(
            "Microsoft".parse::<TargetApp>().unwrap(),
            TargetApp::MicrosoftAuthenticator
        );
        assert_eq!("2FA".parse::<TargetApp>().unwrap(), TargetApp::TwoFa);
        assert_eq!(" 4 ".parse::<TargetApp>().unwrap(), TargetApp::TwoFa);
        for app in TargetApp::ALL {
            assert_eq!(app.display_name().parse::<TargetApp>().unwrap(), app);
        }
    }

    #[test]
    fn test_unknown_target_is_rejected() {
        let err = "Authy".parse::<TargetApp>().unwrap_err();
        assert!(matches!(err, ExportError::UnknownTarget { ref target } if target == "Authy"));
        assert!("5".parse::<TargetApp>().is_err());
        assert!("".parse::<TargetApp>().is_err());
    }
}
