// Correction pipeline: validate → compose instruction → one completion call → unwrap.
// The completion call goes through `CompletionProvider`; nothing here talks HTTP upstream.

pub mod handlers;
pub mod service;
