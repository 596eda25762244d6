#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct CreateEmbed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub colour: Option<u32>,
}

impl CreateEmbed {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn colour(mut self, colour: u32) -> Self {
        self.colour = Some(colour);
        self
    }
}
