//! Formula network.
//!
//! The four formula arcroles are merged into one graph: a node's children
//! are its assertion-set members, then variable-set members, then
//! variable-set filters, then variable filters. Objects are identified by
//! arena index, so two resources with the same label never merge.
//!
//! Roots are not `sources − targets`. A resource is a root when nothing in
//! the formula network points at it and it is either a kind that anchors a
//! formula tree (assertion, assertion set, formula) or the source of some
//! formula arc. An assertion with no arcs at all is still listed.

use taxview_core::arcrole::{FormulaArc, NetworkKind};
use taxview_core::source::RelationshipSource;
use tracing::{debug, info, instrument};

use crate::builder::HierarchyBuilder;
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::edge::{NodeNaming, edges_from_relationships};
use crate::network::{NodeData, RawNetwork};
use crate::tree::Hierarchy;

pub const FORMULA_SCOPE: &str = "formula";

#[instrument(skip_all)]
pub fn extract_formulas<S: RelationshipSource + ?Sized>(
    model: &S,
    builder: &HierarchyBuilder,
    sink: &mut dyn DiagnosticSink,
) -> Hierarchy {
    let mut relationships = Vec::new();
    for arc in FormulaArc::ALL {
        let found = model.relationships(arc.arcrole(), None);
        if found.is_empty() {
            sink.record(Diagnostic::EmptyNetwork {
                network: NetworkKind::Formula,
                arcrole: arc.arcrole().to_string(),
            });
        }
        relationships.extend(found);
    }

    let edges = edges_from_relationships(model, &relationships, NodeNaming::ObjectLabel, sink);
    let mut network = RawNetwork::from_edges(FORMULA_SCOPE, &edges);

    let mut roots = Vec::new();
    for (id, resource) in model.resources() {
        let existing = network.node_index(id);
        let has_parents = existing.is_some_and(|idx| network.has_parents(idx));
        let has_children = existing.is_some_and(|idx| network.has_children(idx));
        if has_parents || !(has_children || resource.is_root_kind()) {
            continue;
        }

        let idx = match existing {
            Some(idx) => idx,
            None => network.ensure_node(NodeData {
                object: id,
                name: resource
                    .xlink_label
                    .clone()
                    .unwrap_or_else(|| id.synthesized_name()),
                is_abstract: false,
            }),
        };
        debug!(root = %network.name(idx), kind = %resource.kind, "formula root");
        roots.push(idx);
    }

    if roots.is_empty() && network.edge_count() > 0 {
        sink.record(Diagnostic::NoNaturalRoot {
            scope: FORMULA_SCOPE.to_string(),
        });
    }

    let hierarchy = Hierarchy::from(builder.expand_all(&network, &roots, 0, sink));
    info!(roots = hierarchy.len(), "formulas extracted");
    hierarchy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Diagnostics;
    use crate::test_support::{Fixture, ROLE_A};
    use taxview_core::arcrole;
    use taxview_core::model::{ArcAttributes, FormulaArcAttributes};

    #[test]
    fn children_merge_all_formula_arcroles_in_order() {
        let mut fx = Fixture::new();
        fx.resource("va1", "valueAssertion");
        fx.resource("fv1", "factVariable");
        fx.resource("gf1", "conceptName");
        fx.resource("vf1", "conceptName");
        fx.edge(arcrole::VARIABLE_FILTER, ROLE_A, "fv1", "vf1");
        fx.edge(arcrole::VARIABLE_SET_FILTER, ROLE_A, "va1", "gf1");
        fx.edge(arcrole::VARIABLE_SET, ROLE_A, "va1", "fv1");
        let model = fx.build();

        let mut sink = Diagnostics::new();
        let formulas = extract_formulas(&model, &HierarchyBuilder::default(), &mut sink);

        assert_eq!(formulas.len(), 1);
        let va1 = formulas.get("va1").expect("assertion root");
        let children: Vec<&str> = va1.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(children, vec!["fv1", "gf1"]);
        assert!(va1.child("fv1").and_then(|fv| fv.child("vf1")).is_some());
        assert_eq!(sink.count("empty_network"), 1);
    }

    #[test]
    fn isolated_assertion_is_a_root_but_isolated_variable_is_not() {
        let mut fx = Fixture::new();
        fx.resource("ea1", "existenceAssertion");
        fx.resource("orphan", "factVariable");
        let model = fx.build();

        let mut sink = Diagnostics::new();
        let formulas = extract_formulas(&model, &HierarchyBuilder::default(), &mut sink);

        let ids: Vec<&str> = formulas.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["ea1"]);
        assert!(formulas.roots()[0].children.is_empty());
    }

    #[test]
    fn same_label_objects_stay_distinct() {
        let mut fx = Fixture::new();
        fx.resource("va1", "valueAssertion");
        let first = fx.unlabeled_resource("v_a", "factVariable");
        let second = fx.unlabeled_resource("v_b", "factVariable");
        fx.edge(arcrole::VARIABLE_SET, ROLE_A, "va1", "v_a");
        fx.edge(arcrole::VARIABLE_SET, ROLE_A, "va1", "v_b");
        let model = fx.build();

        let mut sink = Diagnostics::new();
        let formulas = extract_formulas(&model, &HierarchyBuilder::default(), &mut sink);

        let va1 = formulas.get("va1").expect("root");
        let children: Vec<String> = va1.children.iter().map(|c| c.id.clone()).collect();
        assert_eq!(
            children,
            vec![first.synthesized_name(), second.synthesized_name()]
        );
        assert_ne!(children[0], children[1]);
    }

    #[test]
    fn cover_and_complement_ride_on_filter_children() {
        let mut fx = Fixture::new();
        fx.resource("fo1", "formula");
        fx.resource("fv1", "factVariable");
        fx.resource("f1", "conceptName");
        fx.edge(arcrole::VARIABLE_SET, ROLE_A, "fo1", "fv1");
        fx.edge_with(
            arcrole::VARIABLE_FILTER,
            ROLE_A,
            "fv1",
            "f1",
            ArcAttributes::Formula(FormulaArcAttributes {
                arc: FormulaArc::VariableFilter,
                cover: true,
                complement: false,
            }),
        );
        let model = fx.build();

        let mut sink = Diagnostics::new();
        let formulas = extract_formulas(&model, &HierarchyBuilder::default(), &mut sink);
        let filter = formulas
            .get("fo1")
            .and_then(|fo| fo.child("fv1"))
            .and_then(|fv| fv.child("f1"))
            .expect("fo1/fv1/f1");
        let attrs = filter.arc.as_formula().expect("formula arc");
        assert!(attrs.cover);
        assert!(!attrs.complement);
    }

    #[test]
    fn assertion_set_cycle_terminates() {
        let mut fx = Fixture::new();
        fx.resource("set", "assertionSet");
        fx.resource("va1", "valueAssertion");
        fx.edge(arcrole::ASSERTION_SET, ROLE_A, "set", "va1");
        fx.edge(arcrole::VARIABLE_SET, ROLE_A, "va1", "set");
        let model = fx.build();

        let mut sink = Diagnostics::new();
        let formulas = extract_formulas(&model, &HierarchyBuilder::default(), &mut sink);

        assert!(formulas.is_empty());
        assert_eq!(sink.count("no_natural_root"), 1);
    }
}
