use std::collections::VecDeque;

use tokio::sync::RwLock;

const MAX_STATUS_LINES: usize = 200;

/// The "Logs and Status" sidebar. Oldest lines drop off once it is full.
#[derive(Debug, Default)]
pub struct StatusPanel {
    lines: RwLock<VecDeque<String>>,
}

impl StatusPanel {
    pub async fn push(&self, line: impl Into<String>) {
        let mut lines = self.lines.write().await;
        if lines.len() == MAX_STATUS_LINES {
            lines.pop_front();
        }
        lines.push_back(line.into());
    }

    pub async fn lines(&self) -> Vec<String> {
        self.lines.read().await.iter().cloned().collect()
    }
}
