//! render_to_string: a synchronous static render for assertions.

use crate::context::Context;
use crate::element::{ElementType, Node};

/// Render a tree to markup, synchronously, without running any prepare hook.
///
/// Host elements become `<tag>...</tag>`, text is emitted verbatim, and
/// wrappers render their children in place. Composites get the same
/// `child_context` / `will_mount` / `render` sequence a traversal uses.
pub fn render_to_string(node: &Node, context: &Context) -> String {
    let mut out = String::new();
    render_into(node, context, &mut out);
    out
}

fn render_into(node: &Node, context: &Context, out: &mut String) {
    match node {
        Node::Empty => {}
        Node::Text(text) => out.push_str(text),
        Node::List(items) => {
            for item in items {
                render_into(item, context, out);
            }
        }
        Node::Element(el) => match &el.ty {
            ElementType::Host(tag) => {
                out.push('<');
                out.push_str(tag);
                out.push('>');
                render_into(&el.props.children, context, out);
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            ElementType::Fragment | ElementType::Provider | ElementType::Consumer => {
                render_into(&el.props.children, context, out);
            }
            ElementType::Function(f) => {
                let children = f.call(&el.props, context);
                render_into(&children, context, out);
            }
            ElementType::Composite(c) => {
                let mut instance = c.instantiate(&el.props, context);
                let child_context = match instance.child_context() {
                    Some(patch) => context.merge(patch),
                    None => context.clone(),
                };
                instance.will_mount();
                let children = instance.render();
                render_into(&children, &child_context, out);
            }
        },
    }
}
