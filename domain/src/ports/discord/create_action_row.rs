use crate::ports::discord::CreateButton;

/// Discord allows at most five buttons in a single action row.
pub const MAX_BUTTONS_PER_ROW: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateActionRow {
    Buttons { components: Vec<CreateButton> },
}

impl CreateActionRow {
    pub fn buttons(components: Vec<CreateButton>) -> Self {
        CreateActionRow::Buttons { components }
    }
}
