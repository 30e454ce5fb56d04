use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

use crate::error::HttpError;

pub const FLASH_COOKIE: &str = "phish_flash";

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Success,
    Danger,
}

impl FlashLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Danger => "danger",
        }
    }
}

/// One-shot notices shown on the page a form redirects to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashNotice {
    TrainingRecorded,
    ReportReceived,
    ParticipantAdded,
    ParticipantExists,
}

impl FlashNotice {
    const ALL: [FlashNotice; 4] = [
        FlashNotice::TrainingRecorded,
        FlashNotice::ReportReceived,
        FlashNotice::ParticipantAdded,
        FlashNotice::ParticipantExists,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            FlashNotice::TrainingRecorded => "training_recorded",
            FlashNotice::ReportReceived => "report_received",
            FlashNotice::ParticipantAdded => "participant_added",
            FlashNotice::ParticipantExists => "participant_exists",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FlashNotice::TrainingRecorded => "Thanks for completing the quiz! Your result has been recorded.",
            FlashNotice::ReportReceived => "We received your report. Thank you for helping keep us safe.",
            FlashNotice::ParticipantAdded => "Participant added.",
            FlashNotice::ParticipantExists => "Could not add participant (the email may already be registered).",
        }
    }

    pub fn level(&self) -> FlashLevel {
        match self {
            FlashNotice::ParticipantExists => FlashLevel::Danger,
            _ => FlashLevel::Success,
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|notice| notice.code() == code)
    }
}

pub fn set_flash_cookie(secret: &str, notice: FlashNotice) -> Result<HeaderValue, HttpError> {
    let signature = sign(secret, notice.code())?;
    let cookie = format!(
        "{}={}.{}; Path=/; HttpOnly; SameSite=Lax",
        FLASH_COOKIE,
        notice.code(),
        signature
    );
    HeaderValue::from_str(&cookie).map_err(|err| HttpError::Internal(err.to_string()))
}

pub fn clear_flash_cookie() -> HeaderValue {
    HeaderValue::from_static("phish_flash=; Path=/; Max-Age=0; HttpOnly; SameSite=Lax")
}

/// Reads the notice from the request cookies. Unsigned, tampered or unknown
/// values are dropped.
pub fn read_flash(secret: &str, headers: &HeaderMap) -> Option<FlashNotice> {
    let raw = extract_cookie(headers, FLASH_COOKIE)?;
    let (code, signature) = raw.split_once('.')?;
    if !verify(secret, code, signature) {
        warn!("discarding flash cookie with bad signature");
        return None;
    }
    FlashNotice::from_code(code)
}

fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn mac_for(secret: &str, code: &str) -> Result<HmacSha256, HttpError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|err| HttpError::Internal(format!("hmac init failed: {err}")))?;
    mac.update(FLASH_COOKIE.as_bytes());
    mac.update(b"|");
    mac.update(code.as_bytes());
    Ok(mac)
}

fn sign(secret: &str, code: &str) -> Result<String, HttpError> {
    let digest = mac_for(secret, code)?.finalize().into_bytes();
    let mut out = String::with_capacity(digest.len() * 2);
    for byte in digest {
        out.push_str(&format!("{byte:02x}"));
    }
    Ok(out)
}

fn verify(secret: &str, code: &str, signature: &str) -> bool {
    let Some(expected) = decode_hex(signature) else {
        return false;
    };
    match mac_for(secret, code) {
        Ok(mac) => mac.verify_slice(&expected).is_ok(),
        Err(_) => false,
    }
}

fn decode_hex(value: &str) -> Option<Vec<u8>> {
    if value.len() % 2 != 0 {
        return None;
    }
    (0..value.len())
        .step_by(2)
        .map(|idx| u8::from_str_radix(value.get(idx..idx + 2)?, 16).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_with(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(COOKIE, HeaderValue::from_str(cookie).expect("cookie"));
        headers
    }

    fn cookie_pair(secret: &str, notice: FlashNotice) -> String {
        let header = set_flash_cookie(secret, notice).expect("cookie");
        let text = header.to_str().expect("ascii");
        text.split(';').next().expect("pair").to_string()
    }

    #[test]
    fn signed_notice_reads_back() {
        let pair = cookie_pair("secret", FlashNotice::ReportReceived);
        let headers = request_with(&format!("other=1; {}", pair));
        assert_eq!(read_flash("secret", &headers), Some(FlashNotice::ReportReceived));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let pair = cookie_pair("secret", FlashNotice::ParticipantAdded);
        let headers = request_with(&pair);
        assert_eq!(read_flash("another", &headers), None);
    }

    #[test]
    fn swapped_code_is_rejected() {
        let pair = cookie_pair("secret", FlashNotice::ParticipantExists);
        let forged = pair.replace("participant_exists", "participant_added");
        assert_eq!(read_flash("secret", &request_with(&forged)), None);
    }

    #[test]
    fn malformed_values_are_ignored() {
        assert_eq!(read_flash("secret", &request_with("phish_flash=")), None);
        assert_eq!(read_flash("secret", &request_with("phish_flash=nodot")), None);
        assert_eq!(read_flash("secret", &request_with("phish_flash=x.zz")), None);
        assert_eq!(read_flash("secret", &HeaderMap::new()), None);
    }

    #[test]
    fn duplicate_notice_is_danger() {
        assert_eq!(FlashNotice::ParticipantExists.level(), FlashLevel::Danger);
        assert_eq!(FlashNotice::TrainingRecorded.level(), FlashLevel::Success);
    }
}
