//! Element descriptors: the tree before anything is instantiated.

use crate::component::{CompositeType, FunctionComponent};
use crate::id::ComponentId;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// What kind of thing an element instantiates into.
#[derive(Clone)]
pub enum ElementType {
    /// An intrinsic host element identified by its tag (`"div"`, `"span"`).
    Host(Arc<str>),
    /// A fragment marker; renders its children in place.
    Fragment,
    /// A context-provider marker; renders its children in place.
    Provider,
    /// A context-consumer marker; renders its children in place.
    Consumer,
    /// A stateless function component.
    Function(FunctionComponent),
    /// A stateful component that must be instantiated.
    Composite(CompositeType),
}

impl ElementType {
    /// Shorthand for a host element type.
    pub fn host(tag: impl Into<Arc<str>>) -> Self {
        Self::Host(tag.into())
    }

    /// The identity of this type, if it is a declared component.
    pub fn component_id(&self) -> Option<ComponentId> {
        match self {
            Self::Function(f) => Some(f.id()),
            Self::Composite(c) => Some(c.id()),
            _ => None,
        }
    }

    /// A human-readable name, used in logs and display names.
    pub fn name(&self) -> &str {
        match self {
            Self::Host(tag) => &**tag,
            Self::Fragment => "Fragment",
            Self::Provider => "Provider",
            Self::Consumer => "Consumer",
            Self::Function(f) => f.name(),
            Self::Composite(c) => c.name(),
        }
    }
}

impl fmt::Debug for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host(tag) => f.debug_tuple("Host").field(tag).finish(),
            Self::Fragment => f.write_str("Fragment"),
            Self::Provider => f.write_str("Provider"),
            Self::Consumer => f.write_str("Consumer"),
            Self::Function(c) => f.debug_tuple("Function").field(c).finish(),
            Self::Composite(c) => f.debug_tuple("Composite").field(c).finish(),
        }
    }
}

impl From<FunctionComponent> for ElementType {
    fn from(f: FunctionComponent) -> Self {
        Self::Function(f)
    }
}

impl From<CompositeType> for ElementType {
    fn from(c: CompositeType) -> Self {
        Self::Composite(c)
    }
}

/// Properties passed to an element, plus its nested children.
#[derive(Debug, Clone, Default)]
pub struct Props {
    /// Named values.
    pub values: Map<String, Value>,
    /// Nested children.
    pub children: Node,
}

impl Props {
    /// Empty props with no children.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set a named value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Builder: replace the children.
    pub fn with_children(mut self, children: impl Into<Node>) -> Self {
        self.children = children.into();
        self
    }

    /// Look up a named value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }
}

/// An immutable element descriptor: a type plus its props.
#[derive(Debug, Clone)]
pub struct Element {
    /// What this element instantiates into.
    pub ty: ElementType,
    /// Its props, including children.
    pub props: Props,
}

impl Element {
    /// Create an element from a type and props.
    pub fn new(ty: impl Into<ElementType>, props: Props) -> Self {
        Self {
            ty: ty.into(),
            props,
        }
    }

    /// A host element with no props.
    pub fn host(tag: impl Into<Arc<str>>) -> Self {
        Self::new(ElementType::host(tag), Props::new())
    }

    /// A fragment wrapping the given children.
    pub fn fragment(children: impl Into<Node>) -> Self {
        Self::new(ElementType::Fragment, Props::new().with_children(children))
    }

    /// An element of a declared component with empty props.
    pub fn of(ty: impl Into<ElementType>) -> Self {
        Self::new(ty, Props::new())
    }

    /// Builder: set a named prop.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.values.insert(key.into(), value.into());
        self
    }

    /// Builder: append a child, keeping existing children in order.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        let existing = std::mem::take(&mut self.props.children);
        self.props.children = match existing {
            Node::Empty => child.into(),
            Node::List(mut items) => {
                items.push(child.into());
                Node::List(items)
            }
            other => Node::List(vec![other, child.into()]),
        };
        self
    }
}

/// A child slot in the tree.
#[derive(Debug, Clone, Default)]
pub enum Node {
    /// Nothing (`null`, `false`, or an absent child).
    #[default]
    Empty,
    /// A primitive text leaf.
    Text(String),
    /// A nested element.
    Element(Box<Element>),
    /// An ordered sequence of children.
    List(Vec<Node>),
}

impl Node {
    /// Normalize into an ordered sequence of non-empty children.
    ///
    /// Nested lists are flattened and `Empty` entries dropped.
    pub fn into_children(self) -> Vec<Node> {
        let mut out = Vec::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(self, out: &mut Vec<Node>) {
        match self {
            Self::Empty => {}
            Self::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
            other => out.push(other),
        }
    }

    /// Returns true for `Node::Empty`.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Borrow the element, if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(e) => Some(&**e),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Self::Element(Box::new(e))
    }
}

impl From<Option<Element>> for Node {
    fn from(e: Option<Element>) -> Self {
        e.map_or(Self::Empty, Self::from)
    }
}

impl From<Vec<Node>> for Node {
    fn from(items: Vec<Node>) -> Self {
        Self::List(items)
    }
}

impl From<Vec<Element>> for Node {
    fn from(items: Vec<Element>) -> Self {
        Self::List(items.into_iter().map(Self::from).collect())
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}
