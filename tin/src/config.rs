/// Engine configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Tag of the container created when [`crate::Engine::render`] is called
    /// without a host node.
    pub container_tag: String,
    /// `id` attribute of that container.
    pub container_id: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            container_tag: "div".to_string(),
            container_id: "root".to_string(),
        }
    }
}

impl Config {
    pub fn container_tag(mut self, tag: impl Into<String>) -> Self {
        self.container_tag = tag.into();
        self
    }

    pub fn container_id(mut self, id: impl Into<String>) -> Self {
        self.container_id = id.into();
        self
    }
}
