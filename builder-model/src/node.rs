use crate::{ModelAttribute, StructuredType};
use builder_types::NodeId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A JSON scalar accepted as the value of a basic or enumeration attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl Scalar {
    /// Converts a JSON value into a scalar. Objects, arrays and `null`
    /// return `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Scalar::String(s.clone())),
            Value::Number(n) => Some(Scalar::Number(n.clone())),
            Value::Bool(b) => Some(Scalar::Bool(*b)),
            Value::Null | Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.into())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Number(n.into())
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::String(s) => Value::String(s),
            Scalar::Number(n) => Value::Number(n),
            Scalar::Bool(b) => Value::Bool(b),
        }
    }
}

/// Value of a scalar node: one scalar, or every instance in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeValue {
    Single(Scalar),
    List(Vec<Scalar>),
}

impl NodeValue {
    /// Builds a value from instances in order: a lone scalar stays single,
    /// several become a list. Returns `None` for an empty input.
    pub fn collapse(mut scalars: Vec<Scalar>) -> Option<Self> {
        match scalars.len() {
            0 => None,
            1 => scalars.pop().map(NodeValue::Single),
            _ => Some(NodeValue::List(scalars)),
        }
    }

    pub fn as_single(&self) -> Option<&Scalar> {
        match self {
            NodeValue::Single(s) => Some(s),
            NodeValue::List(_) => None,
        }
    }

    /// All scalars, whether single or listed.
    pub fn scalars(&self) -> &[Scalar] {
        match self {
            NodeValue::Single(s) => std::slice::from_ref(s),
            NodeValue::List(list) => list,
        }
    }
}

impl From<Scalar> for NodeValue {
    fn from(s: Scalar) -> Self {
        NodeValue::Single(s)
    }
}

impl From<&str> for NodeValue {
    fn from(s: &str) -> Self {
        NodeValue::Single(s.into())
    }
}

impl From<Vec<Scalar>> for NodeValue {
    fn from(list: Vec<Scalar>) -> Self {
        NodeValue::List(list)
    }
}

/// Exactly one of a scalar value or child nodes.
///
/// Flattened into [`Node`], so JSON shows either a `value` or a `children`
/// key, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeContent {
    Value(NodeValue),
    Children(Vec<Node>),
}

/// One attribute instance in an imported tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub definition: ModelAttribute,
    #[serde(flatten)]
    pub content: NodeContent,
}

impl Node {
    pub fn leaf(id: NodeId, definition: ModelAttribute, value: NodeValue) -> Self {
        Self {
            id,
            definition,
            content: NodeContent::Value(value),
        }
    }

    pub fn branch(id: NodeId, definition: ModelAttribute, children: Vec<Node>) -> Self {
        Self {
            id,
            definition,
            content: NodeContent::Children(children),
        }
    }

    /// The attribute name this node instantiates.
    pub fn name(&self) -> &str {
        &self.definition.name
    }

    pub fn value(&self) -> Option<&NodeValue> {
        match &self.content {
            NodeContent::Value(v) => Some(v),
            NodeContent::Children(_) => None,
        }
    }

    /// Child nodes, or an empty slice for a scalar node.
    pub fn children(&self) -> &[Node] {
        match &self.content {
            NodeContent::Children(c) => c,
            NodeContent::Value(_) => &[],
        }
    }

    /// First child instantiating the attribute `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children().iter().find(|n| n.name() == name)
    }

    /// Number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self.children().iter().map(Node::node_count).sum::<usize>()
    }
}

/// Result of importing a JSON document against a structured type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootNode {
    #[serde(rename = "type", with = "tagged_structured")]
    pub ty: StructuredType,
    pub children: Vec<Node>,
}

impl RootNode {
    pub fn new(ty: StructuredType, children: Vec<Node>) -> Self {
        Self { ty, children }
    }

    /// First child instantiating the attribute `name`.
    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.iter().find(|n| n.name() == name)
    }

    /// Every top-level child instantiating the attribute `name`.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.children.iter().filter(move |n| n.name() == name)
    }

    /// Total number of nodes below the root.
    pub fn node_count(&self) -> usize {
        self.children.iter().map(Node::node_count).sum()
    }
}

/// Serializes a structured type with its `typeCategory` tag, the same shape
/// it has inside an attribute's `type`.
mod tagged_structured {
    use crate::{ModelType, StructuredType};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(ty: &StructuredType, serializer: S) -> Result<S::Ok, S::Error> {
        ModelType::StructuredType(ty.clone()).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<StructuredType, D::Error> {
        match ModelType::deserialize(deserializer)? {
            ModelType::StructuredType(ty) => Ok(ty),
            other => Err(D::Error::custom(format!(
                "root type must be a structured type, found `{}`",
                other.name()
            ))),
        }
    }
}
