use super::ReplyGenerator;
use async_trait::async_trait;

/// Deterministic stand-in for a chat model: echoes the message back.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockReplyGenerator;

#[async_trait]
impl ReplyGenerator for MockReplyGenerator {
    async fn generate_reply(&self, message: &str) -> String {
        format!("AI Reply for: {}", message)
    }

    fn name(&self) -> &str {
        "mock"
    }
}
