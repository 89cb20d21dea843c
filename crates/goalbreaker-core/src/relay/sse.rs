//! Decoder for OpenAI-style SSE completion streams.
//!
//! Network reads may split a logical `data: ` line across chunk
//! boundaries, so the decoder keeps a carry-over buffer and only parses
//! complete lines. Malformed lines (heartbeats, partial JSON) are skipped
//! rather than aborting the whole stream.

use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};
use serde_json::Value;

use goalbreaker_types::RelayError;

/// One decoded unit of the upstream stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseEvent {
    /// An incremental text delta.
    Delta(String),
    /// The explicit `[DONE]` end-of-stream marker.
    Done,
}

/// Line-oriented decoder with carry-over across chunks.
#[derive(Default)]
pub struct SseLineDecoder {
    buffer: BytesMut,
}

impl SseLineDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk; returns the events it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<SseEvent> {
        self.buffer.extend_from_slice(chunk);

        let mut events = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line_raw = self.buffer.split_to(pos + 1);
            if let Ok(line_str) = std::str::from_utf8(&line_raw) {
                if let Some(event) = parse_line(line_str.trim()) {
                    events.push(event);
                }
            }
        }
        events
    }
}

fn parse_line(line: &str) -> Option<SseEvent> {
    if line.is_empty() {
        return None;
    }
    let payload = line.strip_prefix("data: ")?.trim();
    if payload == "[DONE]" {
        return Some(SseEvent::Done);
    }

    let json: Value = serde_json::from_str(payload).ok()?;
    let content = json.get("choices")?.get(0)?.get("delta")?.get("content")?.as_str()?;
    if content.is_empty() {
        None
    } else {
        Some(SseEvent::Delta(content.to_string()))
    }
}

/// Decode an upstream byte stream into fragment results.
///
/// Ends cleanly on `[DONE]` or upstream EOF; a transport error mid-stream
/// is surfaced as one final `Err` so the caller can tell an interrupted
/// stream from a finished one. Control yields back to the scheduler after
/// each chunk so a slow stream cannot starve sibling requests.
pub fn decode_sse_stream<S, E>(
    upstream: S,
) -> impl Stream<Item = Result<String, RelayError>> + Send
where
    S: Stream<Item = Result<Bytes, E>> + Send,
    E: std::fmt::Display + Send,
{
    async_stream::stream! {
        futures::pin_mut!(upstream);
        let mut decoder = SseLineDecoder::new();
        while let Some(chunk) = upstream.next().await {
            match chunk {
                Ok(bytes) => {
                    for event in decoder.push(&bytes) {
                        match event {
                            SseEvent::Delta(text) => yield Ok(text),
                            SseEvent::Done => return,
                        }
                    }
                    tokio::task::yield_now().await;
                },
                Err(e) => {
                    yield Err(RelayError::Stream { message: e.to_string() });
                    return;
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn delta_line(content: &str) -> String {
        format!(r#"data: {{"choices":[{{"delta":{{"content":"{}"}}}}]}}"#, content)
    }

    #[test]
    fn test_round_trip_of_canned_transcript() {
        let mut decoder = SseLineDecoder::new();
        let transcript =
            format!("{}\n\n{}\n\ndata: [DONE]\n\n", delta_line("Hello"), delta_line(" world"));

        let events = decoder.push(transcript.as_bytes());
        assert_eq!(
            events,
            vec![
                SseEvent::Delta("Hello".into()),
                SseEvent::Delta(" world".into()),
                SseEvent::Done,
            ]
        );
    }

    #[test]
    fn test_line_split_across_chunks() {
        let mut decoder = SseLineDecoder::new();
        let line = delta_line("carried over") + "\n";
        let (head, tail) = line.split_at(17);

        assert!(decoder.push(head.as_bytes()).is_empty());
        let events = decoder.push(tail.as_bytes());
        assert_eq!(events, vec![SseEvent::Delta("carried over".into())]);
    }

    #[test]
    fn test_malformed_and_heartbeat_lines_are_skipped() {
        let mut decoder = SseLineDecoder::new();
        let chunk = format!(
            ": keep-alive\ndata: {{not json\nevent: ping\n{}\n",
            delta_line("survived")
        );

        let events = decoder.push(chunk.as_bytes());
        assert_eq!(events, vec![SseEvent::Delta("survived".into())]);
    }

    #[test]
    fn test_empty_delta_is_not_yielded() {
        let mut decoder = SseLineDecoder::new();
        let chunk = format!("{}\n", delta_line(""));
        assert!(decoder.push(chunk.as_bytes()).is_empty());
    }

    #[tokio::test]
    async fn test_mid_stream_error_after_fragments() {
        // Three fragments arrive, then the connection resets: the caller
        // sees exactly those three followed by one terminal error.
        let chunks: Vec<Result<Bytes, String>> = vec![
            Ok(Bytes::from(format!("{}\n", delta_line("one")))),
            Ok(Bytes::from(format!("{}\n{}\n", delta_line("two"), delta_line("three")))),
            Err("connection reset by peer".to_string()),
        ];
        let fragments: Vec<_> =
            decode_sse_stream(futures::stream::iter(chunks)).collect().await;

        assert_eq!(fragments.len(), 4);
        assert_eq!(fragments[0].as_deref(), Ok("one"));
        assert_eq!(fragments[1].as_deref(), Ok("two"));
        assert_eq!(fragments[2].as_deref(), Ok("three"));
        assert!(matches!(fragments[3], Err(RelayError::Stream { .. })));
    }

    #[tokio::test]
    async fn test_done_marker_ends_stream_before_later_chunks() {
        let chunks: Vec<Result<Bytes, String>> = vec![
            Ok(Bytes::from(format!("{}\ndata: [DONE]\n", delta_line("final")))),
            Ok(Bytes::from(format!("{}\n", delta_line("ignored")))),
        ];
        let fragments: Vec<_> =
            decode_sse_stream(futures::stream::iter(chunks)).collect().await;

        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].as_deref(), Ok("final"));
    }
}
