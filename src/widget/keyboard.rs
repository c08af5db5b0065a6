/// What a keydown in the message input should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Submit and suppress the browser's default (newline) handling.
    Submit,
    /// Leave the event alone.
    Default,
}

/// Enter submits; Shift+Enter is left to the browser.
pub fn key_action(key: &str, shift: bool) -> KeyAction {
    if key == "Enter" && !shift {
        KeyAction::Submit
    } else {
        KeyAction::Default
    }
}
