use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A furniture record from the catalog
///
/// The typed fields cover what every consumer reads. Anything else found in
/// the source record lands in `attributes` and stays filterable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(alias = "ID", alias = "Id")]
    pub id: String,
    #[serde(alias = "Name")]
    pub name: String,
    #[serde(alias = "Furniture_Type", alias = "category")]
    pub furniture_type: String,
    /// Style tag, called "feel" in the catalog
    #[serde(alias = "Style", alias = "style", alias = "Feel")]
    pub feel: String,
    #[serde(default, alias = "Description")]
    pub description: String,
    #[serde(default, alias = "Room_Type", skip_serializing_if = "Option::is_none")]
    pub room_type: Option<String>,
    #[serde(default, alias = "Dimensions", skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,
    #[serde(default, alias = "Material", skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, alias = "Color", skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Similarity to the current query; zero outside of a search
    #[serde(default)]
    pub relevance_score: f32,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl CatalogItem {
    #[inline]
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        furniture_type: impl Into<String>,
        feel: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            furniture_type: furniture_type.into(),
            feel: feel.into(),
            description: String::new(),
            room_type: None,
            dimensions: None,
            material: None,
            color: None,
            relevance_score: 0.0,
            attributes: Map::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn with_room_type(mut self, room_type: impl Into<String>) -> Self {
        self.room_type = Some(room_type.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = Some(material.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_dimensions(mut self, dimensions: impl Into<String>) -> Self {
        self.dimensions = Some(dimensions.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Look up an attribute by name for filtering.
    ///
    /// Names are matched case-insensitively. `style` resolves to the feel tag
    /// and `category` to the furniture type.
    pub fn attribute(&self, name: &str) -> Option<Value> {
        let key = name.to_ascii_lowercase();
        let typed = match key.as_str() {
            "id" => Some(&self.id),
            "name" => Some(&self.name),
            "furniture_type" | "category" => Some(&self.furniture_type),
            "feel" | "style" => Some(&self.feel),
            "description" => Some(&self.description),
            "room_type" => return self.room_type.clone().map(Value::String),
            "dimensions" => return self.dimensions.clone().map(Value::String),
            "material" => return self.material.clone().map(Value::String),
            "color" => return self.color.clone().map(Value::String),
            _ => None,
        };
        if let Some(value) = typed {
            return Some(Value::String(value.clone()));
        }

        self.attributes
            .get(name)
            .or_else(|| {
                self.attributes
                    .iter()
                    .find(|(k, _)| k.eq_ignore_ascii_case(name))
                    .map(|(_, v)| v)
            })
            .cloned()
    }

    /// Text fed to the embedder when the catalog is opened
    pub fn searchable_text(&self) -> String {
        let mut parts: Vec<&str> = vec![
            self.name.as_str(),
            self.furniture_type.as_str(),
            self.feel.as_str(),
        ];
        for extra in [&self.room_type, &self.material, &self.color].into_iter().flatten() {
            parts.push(extra.as_str());
        }
        parts.push(&self.description);
        parts.retain(|p| !p.is_empty());
        parts.join(" ")
    }
}
