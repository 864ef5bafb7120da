//! Single-slot notification shown after a submission completes.
//!
//! Showing a message replaces whatever is visible; there is no queue.

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

/// Severity of a notification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastKind {
    #[default]
    Success,
    Error,
}

impl ToastKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A notification to display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: ToastKind::Success }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self { message: message.into(), kind: ToastKind::Error }
    }
}

/// Notification channel state, owned by the screen that shows it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ToastState {
    pub message: String,
    pub visible: bool,
    pub kind: ToastKind,
}

impl ToastState {
    /// Replace any visible message.
    pub fn show(&mut self, message: impl Into<String>, kind: ToastKind) {
        self.message = message.into();
        self.kind = kind;
        self.visible = true;
    }

    pub fn show_toast(&mut self, toast: Toast) {
        self.show(toast.message, toast.kind);
    }

    /// Hide the message; its text is kept until the next `show` or `reset`.
    pub fn dismiss(&mut self) {
        self.visible = false;
    }

    /// Back to the empty, hidden state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// The visible toast, if any.
    #[must_use]
    pub fn current(&self) -> Option<Toast> {
        self.visible.then(|| Toast { message: self.message.clone(), kind: self.kind })
    }
}
