//! Test fixtures for integration tests.

use veracity::ReferenceContent;

pub const PASSAGE: &str = "The merchant caravan departed the eastern gate at first light, \
    its camels laden with silk, spice, and cedar. For twelve days the drivers followed \
    the dry riverbed north, resting only when the heat forced them beneath canvas. \
    When the walls of the city finally rose from the haze, the lead driver allowed \
    himself a smile, for no cargo had been lost.";

pub const UNRELATED_PASSAGE: &str = "Deep beneath the polar ice, the research submarine \
    drifted in silence while its instruments mapped currents no human eye had ever seen. \
    Months would pass before the crew surfaced again.";

#[derive(Default)]
pub struct ReferenceBuilder {
    id: Option<String>,
    title: Option<String>,
    content: Option<String>,
    embedding: Option<Vec<f32>>,
}

impl ReferenceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    pub fn content(mut self, content: &str) -> Self {
        self.content = Some(content.to_string());
        self
    }

    pub fn embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn build(self) -> ReferenceContent {
        let mut reference = ReferenceContent::new(
            self.id.unwrap_or_else(|| "ref-1".to_string()),
            self.content.unwrap_or_else(|| PASSAGE.to_string()),
        );
        reference.title = self.title;
        reference.embedding = self.embedding;
        reference
    }
}
