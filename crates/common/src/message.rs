//! The message record that flows through the dispatch pipeline.

use {
    serde::{Deserialize, Serialize},
    serde_json::{Map, Value},
};

/// Platform-defined attachment payload. The dispatcher never inspects it.
pub type Attachment = Value;

/// An inbound or outbound chat message.
///
/// The dispatcher mutates a message in place while it runs: on a command
/// match `command` and `full_text` are filled in and `text` is reduced to
/// the argument part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
    /// Adapter-specific fields (sender, channel, ...) carried through untouched.
    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl Message {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    #[must_use]
    pub fn with_attachments(mut self, attachments: Vec<Attachment>) -> Self {
        self.attachments = Some(attachments);
        self
    }

    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    /// Make the singular and plural attachment fields agree.
    ///
    /// A lone `attachment` becomes a one-element `attachments`; a non-empty
    /// `attachments` without `attachment` mirrors its first element. When
    /// both or neither are set nothing changes.
    pub fn normalize_incoming(&mut self) {
        match (&self.attachment, self.attachments.as_deref()) {
            (Some(attachment), None | Some([])) => {
                self.attachments = Some(vec![attachment.clone()]);
            },
            (None, Some([first, ..])) => {
                self.attachment = Some(first.clone());
            },
            _ => {},
        }
    }

    /// Collapse attachments into the plural field only.
    pub fn normalize_outgoing(&mut self) {
        if let Some(attachment) = self.attachment.take()
            && self.attachments.as_ref().is_none_or(Vec::is_empty)
        {
            self.attachments = Some(vec![attachment]);
        }
    }

    /// Number of attachments after normalization.
    pub fn attachment_count(&self) -> usize {
        self.attachments.as_ref().map_or(0, Vec::len)
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
