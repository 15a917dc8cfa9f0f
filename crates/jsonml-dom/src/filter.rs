//! Filters applied to JsonML arrays as they are produced.

use jsonml_core::JsonMl;

use crate::node::Node;

/// Post-processing hook for JsonML arrays.
///
/// Called on every array result (elements, document and fragment wrappers,
/// declarations) with the node it was built from, before the result is handed
/// to the parent. Returning `None` drops the result. Plain strings never reach
/// a filter.
pub trait Filter {
    fn apply(&self, jml: JsonMl, node: &Node) -> Option<JsonMl>;

    /// Run `next` on whatever this filter keeps
    fn then<F>(self, next: F) -> Then<Self, F>
    where
        Self: Sized,
        F: Filter,
    {
        Then { first: self, next }
    }
}

/// Create a filter from a closure
pub fn from_fn<F>(f: F) -> FromFn<F>
where
    F: Fn(JsonMl, &Node) -> Option<JsonMl>,
{
    FromFn(f)
}

/// Filter backed by a closure, see [`from_fn`]
#[derive(Clone)]
pub struct FromFn<F>(F);

impl<F> Filter for FromFn<F>
where
    F: Fn(JsonMl, &Node) -> Option<JsonMl>,
{
    fn apply(&self, jml: JsonMl, node: &Node) -> Option<JsonMl> {
        (self.0)(jml, node)
    }
}

/// Two filters run in sequence, see [`Filter::then`]
#[derive(Debug, Clone)]
pub struct Then<A, B> {
    first: A,
    next: B,
}

impl<A: Filter, B: Filter> Filter for Then<A, B> {
    fn apply(&self, jml: JsonMl, node: &Node) -> Option<JsonMl> {
        let jml = self.first.apply(jml, node)?;
        self.next.apply(jml, node)
    }
}

/// Removes a properties map that is present but empty
#[derive(Debug, Clone, Copy, Default)]
pub struct StripEmptyProps;

impl Filter for StripEmptyProps {
    fn apply(&self, mut jml: JsonMl, _node: &Node) -> Option<JsonMl> {
        if let JsonMl::Element { props, .. } = &mut jml {
            if props.as_ref().is_some_and(|p| p.is_empty()) {
                *props = None;
            }
        }
        Some(jml)
    }
}

impl<F: Filter + ?Sized> Filter for &F {
    fn apply(&self, jml: JsonMl, node: &Node) -> Option<JsonMl> {
        (**self).apply(jml, node)
    }
}

impl<F: Filter + ?Sized> Filter for Box<F> {
    fn apply(&self, jml: JsonMl, node: &Node) -> Option<JsonMl> {
        (**self).apply(jml, node)
    }
}
