use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateButton {
    pub label: String,
    pub emoji: Option<String>,
    pub style: ButtonStyle,
    pub button_id: ButtonId,
}

impl CreateButton {
    #[instrument(level = "trace", skip(label, button_id))]
    pub fn new(label: impl Into<String>, button_id: ButtonId) -> Self {
        CreateButton {
            label: label.into(),
            emoji: None,
            style: ButtonStyle::Primary,
            button_id,
        }
    }

    pub fn emoji(mut self, emoji: impl Into<String>) -> Self {
        self.emoji = Some(emoji.into());
        self
    }

    pub fn style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonStyle {
    Primary,
    Secondary,
}

#[derive(Debug, Clone, PartialEq, Eq, Ord, PartialOrd, Hash)]
pub struct ButtonId(pub String);
