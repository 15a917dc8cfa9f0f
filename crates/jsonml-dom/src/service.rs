//! JsonMlService - the configured entry point for DOM to JsonML conversion.

use jsonml_core::{JsonMl, SerializeOptions};

use crate::convert::Converter;
use crate::filter::Filter;
use crate::node::Node;
use crate::{JsonMlError, Result};

/// Options for JsonMlService
#[derive(Debug, Clone, Default)]
pub struct JsonMlOptions {
    /// Deepest node level to visit below the root, `None` for no limit.
    /// Exceeding it fails with [`JsonMlError::DepthExceeded`].
    pub max_depth: Option<usize>,

    /// JSON rendering used by [`JsonMlService::to_json`]
    pub json: SerializeOptions,
}

/// The main service for converting DOM trees to JsonML
#[derive(Default)]
pub struct JsonMlService {
    options: JsonMlOptions,
    filter: Option<Box<dyn Filter + Send + Sync>>,
}

impl JsonMlService {
    /// Create a new JsonMlService with default options and no filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a JsonMlService with custom options
    pub fn with_options(options: JsonMlOptions) -> Self {
        Self {
            options,
            filter: None,
        }
    }

    /// Install the filter run on every array result
    pub fn set_filter<F>(&mut self, filter: F) -> &mut Self
    where
        F: Filter + Send + Sync + 'static,
    {
        self.filter = Some(Box::new(filter));
        self
    }

    /// Remove the installed filter
    pub fn clear_filter(&mut self) -> &mut Self {
        self.filter = None;
        self
    }

    /// Get the current options
    pub fn options(&self) -> &JsonMlOptions {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut JsonMlOptions {
        &mut self.options
    }

    /// Convert a node tree. `None` means the node has no JsonML form.
    pub fn parse_tree(&self, node: &Node) -> Result<Option<JsonMl>> {
        self.converter().convert(node, 0)
    }

    /// Parse an HTML fragment and convert it.
    ///
    /// Markup holding a single unattributed node yields that node's value;
    /// anything else yields a `["", ...]` fragment array.
    #[cfg(feature = "html")]
    pub fn parse_markup(&self, html: &str) -> Result<JsonMl> {
        let container = crate::html::parse_html(html);
        unwrap_container(self.parse_tree(&container)?)
    }

    /// Parse a full HTML document, including its doctype, and convert it
    #[cfg(feature = "html")]
    pub fn parse_document(&self, html: &str) -> Result<Option<JsonMl>> {
        let document = crate::html::parse_document(html);
        self.parse_tree(&document)
    }

    /// Render a JsonML value as JSON text using the configured options
    pub fn to_json(&self, value: &JsonMl) -> Result<String> {
        Ok(jsonml_core::to_string(value, &self.options.json)?)
    }

    fn converter(&self) -> Converter<'_> {
        let filter = self.filter.as_deref().map(|f| f as &dyn Filter);
        Converter::new(filter, self.options.max_depth)
    }
}

/// Turn the converted markup container into the wrapper's result
pub(crate) fn unwrap_container(result: Option<JsonMl>) -> Result<JsonMl> {
    match result {
        None => Err(JsonMlError::EmptyResult),
        Some(JsonMl::Element {
            props: None,
            mut children,
            ..
        }) if children.len() == 1 => Ok(children.remove(0)),
        Some(mut jml @ JsonMl::Element { .. }) => {
            jml.set_tag("");
            Ok(jml)
        }
        Some(other) => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{from_fn, StripEmptyProps};
    use serde_json::json;

    fn make_p(text: &str) -> Node {
        let mut p = Node::element("p");
        p.add_child(Node::text(text));
        p
    }

    #[test]
    fn test_parse_tree() {
        let service = JsonMlService::new();
        let result = service.parse_tree(&make_p("Hello World")).unwrap();
        assert_eq!(
            result,
            Some(JsonMl::element("p").with_child(JsonMl::text("Hello World")))
        );
    }

    #[test]
    fn test_parse_tree_absent() {
        let service = JsonMlService::new();
        assert_eq!(service.parse_tree(&Node::comment("note")).unwrap(), None);
    }

    #[test]
    fn test_filter_is_used() {
        let mut service = JsonMlService::new();
        service.set_filter(from_fn(|mut jml, _| {
            jml.set_prop("data-seen", "yes");
            Some(jml)
        }));
        let result = service.parse_tree(&make_p("x")).unwrap().unwrap();
        assert_eq!(result.prop("data-seen"), Some("yes"));

        service.clear_filter();
        let result = service.parse_tree(&make_p("x")).unwrap().unwrap();
        assert!(result.props().is_none());
    }

    #[test]
    fn test_max_depth_option() {
        let mut outer = Node::element("div");
        outer.add_child(make_p("deep"));

        let mut service = JsonMlService::new();
        service.options_mut().max_depth = Some(1);
        assert!(matches!(
            service.parse_tree(&outer),
            Err(JsonMlError::DepthExceeded { limit: 1 })
        ));

        service.options_mut().max_depth = Some(2);
        assert!(service.parse_tree(&outer).is_ok());
    }

    #[test]
    fn test_to_json() {
        let service = JsonMlService::new();
        let node = Node::element_with_attrs("a", vec![("href", "/")]);
        let jml = service.parse_tree(&node).unwrap().unwrap();
        assert_eq!(service.to_json(&jml).unwrap(), r#"["a",{"href":"/"}]"#);

        let pretty = JsonMlService::with_options(JsonMlOptions {
            json: SerializeOptions::pretty(),
            ..Default::default()
        });
        assert!(pretty.to_json(&jml).unwrap().contains('\n'));
    }

    #[test]
    fn test_unwrap_single_child() {
        let container = JsonMl::element("div").with_child(JsonMl::element("p"));
        assert_eq!(unwrap_container(Some(container)).unwrap(), JsonMl::element("p"));

        let text = JsonMl::element("div").with_child(JsonMl::text("plain"));
        assert_eq!(unwrap_container(Some(text)).unwrap(), JsonMl::text("plain"));
    }

    #[test]
    fn test_unwrap_keeps_fragment() {
        let container = JsonMl::element("div")
            .with_child(JsonMl::element("a"))
            .with_child(JsonMl::element("b"));
        assert_eq!(
            serde_json::to_value(unwrap_container(Some(container)).unwrap()).unwrap(),
            json!(["", ["a"], ["b"]])
        );

        assert_eq!(
            unwrap_container(Some(JsonMl::element("div"))).unwrap(),
            JsonMl::element("")
        );
    }

    #[test]
    fn test_unwrap_attributed_container_stays_wrapped() {
        let container = JsonMl::element("div")
            .with_prop("id", "wrap")
            .with_child(JsonMl::text("x"));
        assert_eq!(
            serde_json::to_value(unwrap_container(Some(container)).unwrap()).unwrap(),
            json!(["", {"id": "wrap"}, "x"])
        );
    }

    #[test]
    fn test_unwrap_non_element_results() {
        assert_eq!(
            unwrap_container(Some(JsonMl::text("replaced"))).unwrap(),
            JsonMl::text("replaced")
        );
        assert!(matches!(
            unwrap_container(None),
            Err(JsonMlError::EmptyResult)
        ));
    }

    #[test]
    fn test_service_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<JsonMlService>();

        let mut service = JsonMlService::new();
        service.set_filter(StripEmptyProps);
        let node = make_p("shared");
        std::thread::scope(|scope| {
            for _ in 0..2 {
                scope.spawn(|| {
                    let jml = service.parse_tree(&node).unwrap().unwrap();
                    assert_eq!(jml.text_content(), "shared");
                });
            }
        });
    }
}
