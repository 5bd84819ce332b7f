//! Size-capped body reading.

use crate::config::MAX_RESPONSE_BODY_SIZE;

/// Appends as much of `chunk` as fits under `limit`.
///
/// Returns `true` once the buffer is full and the rest of `chunk` was dropped.
fn push_capped(buf: &mut Vec<u8>, chunk: &[u8], limit: usize) -> bool {
    let room = limit.saturating_sub(buf.len());
    if chunk.len() > room {
        buf.extend_from_slice(&chunk[..room]);
        true
    } else {
        buf.extend_from_slice(chunk);
        false
    }
}

/// Reads a response body as text, keeping at most [`MAX_RESPONSE_BODY_SIZE`]
/// bytes.
///
/// Returns the text and whether it was truncated. Invalid UTF-8 (including a
/// character split by truncation) is replaced, not rejected. reqwest has
/// already undone any content encoding.
pub(crate) async fn read_body_capped(
    mut response: reqwest::Response,
) -> Result<(String, bool), reqwest::Error> {
    let mut buf = Vec::with_capacity(
        response
            .content_length()
            .map_or(0, |len| len as usize)
            .min(MAX_RESPONSE_BODY_SIZE),
    );
    let mut truncated = false;

    while let Some(chunk) = response.chunk().await? {
        if push_capped(&mut buf, &chunk, MAX_RESPONSE_BODY_SIZE) {
            truncated = true;
            break;
        }
    }

    Ok((String::from_utf8_lossy(&buf).into_owned(), truncated))
}
