use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Author {
    id: u64,
    name: String,
    screen_name: String,
    avatar_url: String,
}

impl Author {
    pub fn new(id: u64, name: String, screen_name: String, avatar_url: String) -> Self {
        Self {
            id,
            name,
            screen_name,
            avatar_url,
        }
    }

    // Public getter methods
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &String {
        &self.name
    }

    pub fn screen_name(&self) -> &String {
        &self.screen_name
    }

    pub fn avatar_url(&self) -> &String {
        &self.avatar_url
    }
}
