use log::{debug, trace};
use pcl_engine::pcl_api::kyc_objects::DocumentUpload;

use crate::{data_objects::DocumentPayload, errors::ServerError};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Decodes a document sent by the web client.
///
/// The data may be plain base64, or a `data:<content type>;base64,<data>` URL as produced by the browser's
/// `FileReader`. In the latter case, the content type in the URL is used unless the request names one explicitly.
pub fn decode_document(doc: &DocumentPayload) -> Result<DocumentUpload, ServerError> {
    let (url_content_type, encoded) = match doc.data.strip_prefix("data:").and_then(|rest| rest.split_once(',')) {
        Some((meta, data)) => (meta.strip_suffix(";base64").filter(|s| !s.is_empty()), data),
        None => (None, doc.data.as_str()),
    };
    let data = base64::decode(encoded.trim()).map_err(|e| {
        debug!("Could not decode {}. {e}", doc.file_name);
        ServerError::ValidationError(format!("Invalid file data for {}", doc.file_name))
    })?;
    let content_type = doc
        .content_type
        .as_deref()
        .filter(|s| !s.is_empty())
        .or(url_content_type)
        .unwrap_or(DEFAULT_CONTENT_TYPE)
        .to_string();
    trace!("Decoded {} ({content_type}, {} bytes)", doc.file_name, data.len());
    Ok(DocumentUpload { file_name: doc.file_name.clone(), content_type, data })
}

pub fn decode_documents(docs: &[DocumentPayload]) -> Result<Vec<DocumentUpload>, ServerError> {
    docs.iter().map(decode_document).collect()
}
