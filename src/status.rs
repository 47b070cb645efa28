use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Transient feedback shown after an operation. Overwritten, never queued;
/// the controller clears it at the start of each submit/delete/refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

#[derive(Debug, Default)]
pub struct StatusNotifier {
    current: Option<StatusMessage>,
}

impl StatusNotifier {
    pub fn info(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Info, text);
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Success, text);
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.set(StatusKind::Error, text);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&StatusMessage> {
        self.current.as_ref()
    }

    fn set(&mut self, kind: StatusKind, text: impl Into<String>) {
        self.current = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }
}

impl StatusMessage {
    pub fn styled(&self, config: &Config) -> String {
        match self.kind {
            StatusKind::Info => config.output_info.format(&self.text),
            StatusKind::Success => config.output_success.format(&self.text),
            StatusKind::Error => config.output_error.format(&self.text),
        }
    }
}
