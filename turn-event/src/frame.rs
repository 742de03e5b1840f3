//! SSE framing for turn events: `event: <kind>` + `data: <json>` + blank line.

use serde_json::Value;

/// Frames one event as a Server-Sent Events message.
///
/// The payload is serialized compactly on a single `data:` line. SSE forbids
/// raw newlines inside a data line; JSON string escaping already guarantees
/// none are produced.
pub fn sse_frame(kind: &str, payload: &Value) -> String {
    format!("event: {}\ndata: {}\n\n", kind, payload)
}
