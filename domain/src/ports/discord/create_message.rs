use crate::ports::discord::{CreateActionRow, CreateEmbed};

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CreateMessage {
    pub embeds: Vec<CreateEmbed>,
    pub action_rows: Vec<CreateActionRow>,
}

impl CreateMessage {
    pub fn embed(mut self, embed: CreateEmbed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn action_rows(mut self, action_rows: Vec<CreateActionRow>) -> Self {
        self.action_rows = action_rows;
        self
    }
}
