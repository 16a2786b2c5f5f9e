//! JSON content documents
//!
//! Adapts stored JSON content documents to the route index: reads the owning
//! item's flags and autoroute part, and resolves aspects by reading the
//! `AutoroutePart` and configured container parts of each nested item.

use crate::content::{AutoroutePart, ContentItem};
use crate::error::{AspectError, IndexError};
use crate::route::aspect::{
    AspectResolver, ContainedItemsAspect, ContainerAccessor, ContentNode, RouteHandlerAspect,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const CONTENT_ITEM_ID: &str = "ContentItemId";
const PUBLISHED: &str = "Published";
const LATEST: &str = "Latest";
const AUTOROUTE_PART: &str = "AutoroutePart";

/// A JSON object within a content document
#[derive(Debug, Clone, PartialEq)]
pub struct JsonNode {
    pub content_item_id: String,
    /// JSON token path from the document root, empty for the root
    pub locator: String,
    pub value: Value,
}

impl JsonNode {
    pub fn root(content_item_id: impl Into<String>, value: Value) -> Self {
        Self {
            content_item_id: content_item_id.into(),
            locator: String::new(),
            value,
        }
    }
}

impl ContentNode for JsonNode {
    fn content_item_id(&self) -> &str {
        &self.content_item_id
    }

    fn locator(&self) -> &str {
        &self.locator
    }
}

/// Content item backed by a JSON document
pub type JsonContentItem = ContentItem<JsonNode>;

impl ContentItem<JsonNode> {
    /// Read a content item from its stored JSON document.
    pub fn from_value(value: Value) -> Result<Self, IndexError> {
        let object = value.as_object().ok_or_else(|| {
            IndexError::InvalidContentItem("content item document must be a JSON object".to_string())
        })?;

        let content_item_id = object
            .get(CONTENT_ITEM_ID)
            .and_then(Value::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                IndexError::InvalidContentItem(format!("missing {}", CONTENT_ITEM_ID))
            })?
            .to_string();

        let published = read_flag(object, PUBLISHED);
        let latest = read_flag(object, LATEST);

        let autoroute = match object.get(AUTOROUTE_PART) {
            None | Some(Value::Null) => None,
            Some(part) => Some(serde_json::from_value::<AutoroutePart>(part.clone())?),
        };

        Ok(ContentItem {
            content: JsonNode::root(content_item_id.clone(), value),
            content_item_id,
            published,
            latest,
            autoroute,
        })
    }

    /// The document with the current autoroute part written back.
    ///
    /// Only the modelled part fields are overwritten; any other settings stored
    /// on the part are preserved.
    pub fn to_value(&self) -> Result<Value, IndexError> {
        let mut value = self.content.value.clone();
        let Some(part) = &self.autoroute else {
            return Ok(value);
        };
        let Value::Object(fields) = serde_json::to_value(part)? else {
            return Ok(value);
        };
        if let Some(object) = value.as_object_mut() {
            match object.get_mut(AUTOROUTE_PART) {
                Some(Value::Object(stored)) => stored.extend(fields),
                _ => {
                    object.insert(AUTOROUTE_PART.to_string(), Value::Object(fields));
                }
            }
        }
        Ok(value)
    }
}

fn read_flag(object: &Map<String, Value>, key: &str) -> bool {
    object.get(key).and_then(Value::as_bool).unwrap_or(false)
}

/// A container part and the field holding its item list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerField {
    /// Part name, e.g. `BagPart`
    pub part: String,
    /// Array field within the part, e.g. `ContentItems`
    pub items: String,
}

impl ContainerField {
    pub fn new(part: impl Into<String>, items: impl Into<String>) -> Self {
        Self {
            part: part.into(),
            items: items.into(),
        }
    }

    /// Containers recognised when none are configured.
    pub fn defaults() -> Vec<ContainerField> {
        vec![
            ContainerField::new("FlowPart", "Widgets"),
            ContainerField::new("BagPart", "ContentItems"),
        ]
    }

    fn items_of<'v>(&self, value: &'v Value) -> Option<&'v Value> {
        value.get(&self.part).and_then(|part| part.get(&self.items))
    }

    fn accessor(&self) -> ContainerAccessor<JsonNode> {
        let field = self.clone();
        ContainerAccessor::new(format!("{}.{}", self.part, self.items), move |payload: &JsonNode| {
            field.children(payload)
        })
    }

    fn children(&self, payload: &JsonNode) -> Result<Vec<JsonNode>, AspectError> {
        let Some(items) = self.items_of(&payload.value) else {
            return Ok(Vec::new());
        };
        let items = items.as_array().ok_or_else(|| AspectError::Malformed {
            locator: self.locator(&payload.locator, None),
            reason: "container items must be an array".to_string(),
        })?;

        items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let locator = self.locator(&payload.locator, Some(index));
                if !item.is_object() {
                    return Err(AspectError::Malformed {
                        locator,
                        reason: "contained item must be a JSON object".to_string(),
                    });
                }
                let content_item_id = item
                    .get(CONTENT_ITEM_ID)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                Ok(JsonNode {
                    content_item_id,
                    locator,
                    value: item.clone(),
                })
            })
            .collect()
    }

    fn locator(&self, parent: &str, index: Option<usize>) -> String {
        let mut locator = String::new();
        if !parent.is_empty() {
            locator.push_str(parent);
            locator.push('.');
        }
        locator.push_str(&self.part);
        locator.push('.');
        locator.push_str(&self.items);
        if let Some(index) = index {
            locator.push_str(&format!("[{}]", index));
        }
        locator
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
struct RouteHandlerFields {
    #[serde(deserialize_with = "crate::content::null_as_empty")]
    path: String,
    disabled: bool,
    absolute: bool,
}

/// Resolves aspects directly from JSON content documents.
#[derive(Debug, Clone)]
pub struct JsonAspectResolver {
    containers: Vec<ContainerField>,
}

impl JsonAspectResolver {
    pub fn new(containers: Vec<ContainerField>) -> Self {
        Self { containers }
    }
}

impl Default for JsonAspectResolver {
    fn default() -> Self {
        Self::new(ContainerField::defaults())
    }
}

#[async_trait]
impl AspectResolver for JsonAspectResolver {
    type Node = JsonNode;

    async fn route_handler(&self, node: &JsonNode) -> Result<RouteHandlerAspect, AspectError> {
        let part = match node.value.get(AUTOROUTE_PART) {
            None | Some(Value::Null) => return Ok(RouteHandlerAspect::disabled()),
            Some(part) => part,
        };
        let fields: RouteHandlerFields =
            serde_json::from_value(part.clone()).map_err(|e| AspectError::Malformed {
                locator: node.locator.clone(),
                reason: format!("invalid {}: {}", AUTOROUTE_PART, e),
            })?;
        Ok(RouteHandlerAspect {
            path: fields.path,
            disabled: fields.disabled,
            absolute: fields.absolute,
        })
    }

    async fn contained_items(
        &self,
        node: &JsonNode,
    ) -> Result<ContainedItemsAspect<JsonNode>, AspectError> {
        let accessors = self
            .containers
            .iter()
            .filter(|field| field.items_of(&node.value).is_some())
            .map(ContainerField::accessor)
            .collect();
        Ok(ContainedItemsAspect::new(accessors))
    }
}
