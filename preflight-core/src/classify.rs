//! Element classification: the single place that looks at element shapes.

use crate::element::{ElementType, Node};

/// Which wrapper an element or node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapperKind {
    /// A fragment marker.
    Fragment,
    /// A context-provider marker.
    Provider,
    /// A context-consumer marker.
    Consumer,
    /// A bare list of children.
    List,
}

/// The shape of a node, as far as traversal is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Nothing to do: empty slot or primitive text.
    Null,
    /// An intrinsic host element.
    Host,
    /// A wrapper that renders its children in place.
    Wrapper(WrapperKind),
    /// A stateless function component.
    Function,
    /// A stateful component that must be instantiated.
    Composite,
}

impl Variant {
    /// Whether this variant passes its props' children through unchanged.
    pub fn is_pass_through(self) -> bool {
        matches!(self, Self::Host | Self::Wrapper(_))
    }
}

/// Classify a node. Never fails: anything unrecognised is `Null`.
pub fn classify(node: &Node) -> Variant {
    match node {
        Node::Empty | Node::Text(_) => Variant::Null,
        Node::List(_) => Variant::Wrapper(WrapperKind::List),
        Node::Element(el) => classify_type(&el.ty),
    }
}

/// Classify an element type.
pub fn classify_type(ty: &ElementType) -> Variant {
    match ty {
        ElementType::Host(_) => Variant::Host,
        ElementType::Fragment => Variant::Wrapper(WrapperKind::Fragment),
        ElementType::Provider => Variant::Wrapper(WrapperKind::Provider),
        ElementType::Consumer => Variant::Wrapper(WrapperKind::Consumer),
        ElementType::Function(_) => Variant::Function,
        ElementType::Composite(_) => Variant::Composite,
    }
}
