//! Screen-graph drawing walk
//!
//! One pre-order pass over the finalized tree per frame. Parents draw before
//! their children and siblings draw in insertion order, so the last-declared
//! sibling ends up on top — the same order hit-testing resolves in reverse.
//!
//! Each widget gets a fresh [`Painter`]; paint state never leaks from one
//! widget into the next.

use brim_core::{PaintEngine, Painter, Style};
use tracing::trace;

use crate::graph::ScreenGraph;
use crate::node::NodeId;

pub struct Drawer;

impl Drawer {
    /// Draw the whole tree through `engine`. Widgets may update derived
    /// visual state while drawing, hence the mutable graph.
    pub fn draw_tree(graph: &mut ScreenGraph, engine: &mut dyn PaintEngine, style: &Style) {
        trace!(nodes = graph.len(), "drawing tree");
        Self::draw_subtree(graph, graph.root(), engine, style);
    }

    /// Draw one node and everything below it.
    pub fn draw_subtree(
        graph: &mut ScreenGraph,
        id: NodeId,
        engine: &mut dyn PaintEngine,
        style: &Style,
    ) {
        if let Some(node) = graph.get_mut(id) {
            let mut painter = Painter::new(engine);
            node.widget_mut().draw(&mut painter, style);
        }
        for child in graph.children_of(id) {
            Self::draw_subtree(graph, child, engine, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TreeBuilder;
    use crate::graph::ScreenGraph;
    use crate::node::{widget_cast, NodeId, Widget, WidgetBase};
    use crate::handler::{DefaultHandler, EventHandler};
    use brim_core::{
        Color, PaintState, Polygon, Rect, TextAlignment,
    };
    use std::any::Any;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct CountingEngine {
        texts: Vec<String>,
    }

    impl PaintEngine for CountingEngine {
        fn setup_viewport(&mut self, _rect: Rect, _clear_color: Color) {}
        fn draw_polygon(&mut self, _state: &PaintState, _polygon: &Polygon) {}
        fn draw_text(
            &mut self,
            _state: &PaintState,
            text: &str,
            _rect: Rect,
            _alignment: TextAlignment,
        ) {
            self.texts.push(text.to_string());
        }
    }

    /// Widget that emits its tag as text when drawn.
    struct Stamp {
        base: WidgetBase,
        tag: &'static str,
        draws: Rc<RefCell<u32>>,
    }

    impl Widget for Stamp {
        fn base(&self) -> &WidgetBase {
            &self.base
        }
        fn base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }
        fn draw(&mut self, painter: &mut Painter<'_>, _style: &Style) {
            *self.draws.borrow_mut() += 1;
            painter.draw_text(self.tag, self.base.rectangle, TextAlignment::Left);
        }
        fn matches(&self, other: &dyn Widget) -> bool {
            widget_cast::<Stamp>(other).is_some_and(|other| other.tag == self.tag)
        }
        fn create_handler(&self, node: NodeId) -> Box<dyn EventHandler> {
            Box::new(DefaultHandler::new(node))
        }
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
    }

    #[test]
    fn test_draw_order_is_preorder_insertion() {
        let draws = Rc::new(RefCell::new(0));
        let stamp = |tag| {
            Box::new(Stamp {
                base: WidgetBase::default(),
                tag,
                draws: Rc::clone(&draws),
            })
        };

        let mut graph = ScreenGraph::new();
        let mut builder = TreeBuilder::begin(&mut graph);
        let root = builder.root();
        let panel = builder.add(root, stamp("panel")).unwrap();
        builder.add(panel, stamp("first")).unwrap();
        builder.add(panel, stamp("second")).unwrap();
        builder.add(root, stamp("after")).unwrap();
        builder.finish();

        let mut engine = CountingEngine::default();
        Drawer::draw_tree(&mut graph, &mut engine, &Style::default());

        assert_eq!(engine.texts, vec!["panel", "first", "second", "after"]);
        assert_eq!(*draws.borrow(), 4);
    }
}
