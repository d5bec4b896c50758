// src/host/buffer.rs

use anyhow::Result;

use super::EditorHost;

/// A presented result, standing in for an editor scratch view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScratchBuffer {
    pub text: String,
    pub is_error: bool,
}

/// In-memory document with optional selections.
#[derive(Debug, Clone, Default)]
pub struct BufferHost {
    document: String,
    selections: Vec<String>,
    scratch: Vec<ScratchBuffer>,
}

impl BufferHost {
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            ..Self::default()
        }
    }

    pub fn with_selections<I, S>(mut self, selections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selections = selections.into_iter().map(Into::into).collect();
        self
    }

    /// Scratch buffers created so far, oldest first.
    pub fn scratch_buffers(&self) -> &[ScratchBuffer] {
        &self.scratch
    }

    pub fn last_scratch(&self) -> Option<&ScratchBuffer> {
        self.scratch.last()
    }
}

impl EditorHost for BufferHost {
    fn selections(&self) -> Vec<String> {
        self.selections.clone()
    }

    fn document_text(&self) -> String {
        self.document.clone()
    }

    fn present_result(&mut self, text: &str, is_error: bool) -> Result<()> {
        self.scratch.push(ScratchBuffer {
            text: text.to_string(),
            is_error,
        });
        Ok(())
    }
}
