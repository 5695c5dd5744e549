//! Renderable component

/// Mesh and optional texture the rendering system draws for an entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderableComponent {
    /// Mesh asset path
    pub mesh: String,

    /// Texture asset path
    pub texture: Option<String>,
}

impl RenderableComponent {
    /// Create a renderable from a mesh path
    pub fn new(mesh: impl Into<String>) -> Self {
        Self {
            mesh: mesh.into(),
            texture: None,
        }
    }

    /// Attach a texture (builder pattern)
    pub fn with_texture(mut self, texture: impl Into<String>) -> Self {
        self.texture = Some(texture.into());
        self
    }
}
