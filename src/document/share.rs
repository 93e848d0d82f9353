/*!
 * Share payloads.
 *
 * A document is shared as base64 (standard alphabet) of its JSON, usually in
 * the fragment of a link. Decoding is forgiving about where the payload comes
 * from and silent about what it cannot read: a malformed payload yields `None`
 * and the caller proceeds without loading anything.
 */

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::warn;

use crate::document::model::ExamDocument;
use crate::errors::ShareError;

/// Encode a document as a share payload
pub fn encode(document: &ExamDocument) -> Result<String, ShareError> {
    let json = serde_json::to_string(document)?;
    Ok(STANDARD.encode(json.as_bytes()))
}

/// Build a share link by appending the payload as the URL fragment
pub fn share_url(base_url: &str, document: &ExamDocument) -> Result<String, ShareError> {
    let base = base_url.split('#').next().unwrap_or(base_url);
    Ok(format!("{}#{}", base, encode(document)?))
}

/// Decode a bare payload or a link carrying the payload in its fragment
pub fn decode(payload: &str) -> Option<ExamDocument> {
    let encoded = match payload.rsplit_once('#') {
        Some((_, fragment)) => fragment,
        None => payload,
    }
    .trim();

    if encoded.is_empty() {
        return None;
    }

    let bytes = match STANDARD.decode(encoded) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Shared payload is not valid base64: {}", e);
            return None;
        }
    };

    match serde_json::from_slice::<ExamDocument>(&bytes) {
        Ok(document) => Some(document),
        Err(e) => {
            warn!("Shared payload parsing failed: {}", e);
            None
        }
    }
}
