//! Request extractors whose rejections render as the JSON error envelope.

mod json;
mod user_id;

pub use json::JsonBody;
pub use user_id::UserId;
