use oxnets::vocab::owl;
use oxnets::OwlNets;
use oxrdf::vocab::{rdf, rdfs};
use oxrdf::{BlankNode, Graph, NamedNode, SubjectRef, TermRef, Triple, TripleRef};

fn obo(id: &str) -> NamedNode {
    NamedNode::new(format!("http://purl.obolibrary.org/obo/{id}")).unwrap()
}

fn declare_class(graph: &mut Graph, class: &NamedNode) {
    graph.insert(TripleRef::new(class.as_ref(), rdf::TYPE, owl::CLASS));
}

fn declare_object_property(graph: &mut Graph, property: &NamedNode) {
    graph.insert(TripleRef::new(property.as_ref(), rdf::TYPE, owl::OBJECT_PROPERTY));
}

fn some_values_from(
    graph: &mut Graph,
    class: &NamedNode,
    property: &NamedNode,
    filler: &NamedNode,
) -> BlankNode {
    let restriction = BlankNode::default();
    graph.insert(TripleRef::new(class.as_ref(), rdfs::SUB_CLASS_OF, restriction.as_ref()));
    graph.insert(TripleRef::new(restriction.as_ref(), rdf::TYPE, owl::RESTRICTION));
    graph.insert(TripleRef::new(restriction.as_ref(), owl::ON_PROPERTY, property.as_ref()));
    graph.insert(TripleRef::new(restriction.as_ref(), owl::SOME_VALUES_FROM, filler.as_ref()));
    restriction
}

fn union_list(graph: &mut Graph, members: &[&NamedNode]) -> BlankNode {
    let head = BlankNode::default();
    graph.insert(TripleRef::new(head.as_ref(), rdf::TYPE, owl::CLASS));
    let mut cell = BlankNode::default();
    graph.insert(TripleRef::new(head.as_ref(), owl::UNION_OF, cell.as_ref()));
    for (i, member) in members.iter().enumerate() {
        graph.insert(TripleRef::new(cell.as_ref(), rdf::FIRST, member.as_ref()));
        if i + 1 == members.len() {
            graph.insert(TripleRef::new(cell.as_ref(), rdf::REST, rdf::NIL));
        } else {
            let next = BlankNode::default();
            graph.insert(TripleRef::new(cell.as_ref(), rdf::REST, next.as_ref()));
            cell = next;
        }
    }
    head
}

fn triples(graph: &Graph) -> Vec<Triple> {
    sorted(graph.iter().map(TripleRef::into_owned).collect())
}

fn sorted(mut triples: Vec<Triple>) -> Vec<Triple> {
    triples.sort_unstable_by_key(ToString::to_string);
    triples
}

#[test]
fn existential_restriction_decodes_to_one_edge() {
    let class = obo("GO_0000785");
    let part_of = obo("BFO_0000050");
    let filler = obo("GO_0005694");

    let mut graph = Graph::new();
    declare_class(&mut graph, &class);
    declare_class(&mut graph, &filler);
    declare_object_property(&mut graph, &part_of);
    some_values_from(&mut graph, &class, &part_of, &filler);

    let output = OwlNets::new(graph).unwrap().run();
    assert_eq!(
        triples(&output.graph),
        vec![Triple::new(class.clone(), part_of, filler)]
    );
    // the original OWL encoding is preserved verbatim in the ledger
    let records = &output.ledger.decoded_classes()[class.as_str()];
    assert_eq!(records.len(), 4);
    assert!(records.iter().all(|record| record.subject == *class.as_str()
        || record.subject.starts_with("_:")));
}

#[test]
fn union_without_property_decodes_to_sub_class_edges() {
    let class = obo("CL_0000995");
    let a = obo("CL_0001021");
    let b = obo("CL_0001026");

    let mut graph = Graph::new();
    declare_class(&mut graph, &class);
    declare_class(&mut graph, &a);
    declare_class(&mut graph, &b);
    let head = union_list(&mut graph, &[&a, &b]);
    graph.insert(TripleRef::new(class.as_ref(), owl::EQUIVALENT_CLASS, head.as_ref()));

    let output = OwlNets::new(graph).unwrap().run();
    assert_eq!(
        triples(&output.graph),
        sorted(vec![
            Triple::new(class.clone(), rdfs::SUB_CLASS_OF.into_owned(), a),
            Triple::new(class.clone(), rdfs::SUB_CLASS_OF.into_owned(), b),
        ])
    );
}

#[test]
fn complement_of_produces_no_edges_and_one_ledger_entry() {
    let class = obo("GO_0000785");
    let other = obo("GO_0005694");

    let mut graph = Graph::new();
    declare_class(&mut graph, &class);
    declare_class(&mut graph, &other);
    let node = BlankNode::default();
    graph.insert(TripleRef::new(class.as_ref(), rdfs::SUB_CLASS_OF, node.as_ref()));
    graph.insert(TripleRef::new(node.as_ref(), rdf::TYPE, owl::CLASS));
    graph.insert(TripleRef::new(node.as_ref(), owl::COMPLEMENT_OF, other.as_ref()));

    let output = OwlNets::new(graph).unwrap().run();
    assert!(output.graph.is_empty());
    assert!(output.ledger.complement_of_removed().contains_key(class.as_str()));
    assert!(output.ledger.decoded_classes().is_empty());
}

#[test]
fn restriction_nested_in_union_attaches_to_the_class() {
    let class = obo("UBERON_0002107");
    let a = obo("UBERON_0002368");
    let part_of = obo("BFO_0000050");
    let filler = obo("UBERON_0002365");

    let mut graph = Graph::new();
    declare_class(&mut graph, &class);
    declare_class(&mut graph, &a);
    declare_class(&mut graph, &filler);
    declare_object_property(&mut graph, &part_of);

    let restriction = BlankNode::default();
    graph.insert(TripleRef::new(restriction.as_ref(), rdf::TYPE, owl::RESTRICTION));
    graph.insert(TripleRef::new(restriction.as_ref(), owl::ON_PROPERTY, part_of.as_ref()));
    graph.insert(TripleRef::new(restriction.as_ref(), owl::SOME_VALUES_FROM, filler.as_ref()));

    let head = BlankNode::default();
    let cell1 = BlankNode::default();
    let cell2 = BlankNode::default();
    graph.insert(TripleRef::new(head.as_ref(), rdf::TYPE, owl::CLASS));
    graph.insert(TripleRef::new(head.as_ref(), owl::UNION_OF, cell1.as_ref()));
    graph.insert(TripleRef::new(cell1.as_ref(), rdf::FIRST, a.as_ref()));
    graph.insert(TripleRef::new(cell1.as_ref(), rdf::REST, cell2.as_ref()));
    graph.insert(TripleRef::new(cell2.as_ref(), rdf::FIRST, restriction.as_ref()));
    graph.insert(TripleRef::new(cell2.as_ref(), rdf::REST, rdf::NIL));
    graph.insert(TripleRef::new(class.as_ref(), owl::EQUIVALENT_CLASS, head.as_ref()));

    let output = OwlNets::new(graph).unwrap().run();
    assert_eq!(
        triples(&output.graph),
        sorted(vec![
            Triple::new(class.clone(), rdfs::SUB_CLASS_OF.into_owned(), a),
            Triple::new(class.clone(), part_of, filler),
        ])
    );
}

#[test]
fn union_filler_spreads_the_restriction_property() {
    let class = obo("GO_0000785");
    let part_of = obo("BFO_0000050");
    let a = obo("GO_0005694");
    let b = obo("GO_0005634");

    let mut graph = Graph::new();
    declare_class(&mut graph, &class);
    declare_class(&mut graph, &a);
    declare_class(&mut graph, &b);
    declare_object_property(&mut graph, &part_of);

    let head = union_list(&mut graph, &[&a, &b]);
    let restriction = BlankNode::default();
    graph.insert(TripleRef::new(class.as_ref(), rdfs::SUB_CLASS_OF, restriction.as_ref()));
    graph.insert(TripleRef::new(restriction.as_ref(), rdf::TYPE, owl::RESTRICTION));
    graph.insert(TripleRef::new(restriction.as_ref(), owl::ON_PROPERTY, part_of.as_ref()));
    graph.insert(TripleRef::new(restriction.as_ref(), owl::SOME_VALUES_FROM, head.as_ref()));

    let output = OwlNets::new(graph).unwrap().run();
    assert_eq!(
        triples(&output.graph),
        sorted(vec![
            Triple::new(class.clone(), part_of.clone(), a),
            Triple::new(class.clone(), part_of, b),
        ])
    );
}

#[test]
fn has_self_loops_back_to_the_class() {
    let class = obo("GO_0042803");
    let binds = obo("RO_0002436");

    let mut graph = Graph::new();
    declare_class(&mut graph, &class);
    declare_object_property(&mut graph, &binds);
    let restriction = BlankNode::default();
    graph.insert(TripleRef::new(class.as_ref(), rdfs::SUB_CLASS_OF, restriction.as_ref()));
    graph.insert(TripleRef::new(restriction.as_ref(), rdf::TYPE, owl::RESTRICTION));
    graph.insert(TripleRef::new(restriction.as_ref(), owl::ON_PROPERTY, binds.as_ref()));
    graph.insert(TripleRef::new(
        restriction.as_ref(),
        owl::HAS_SELF,
        &oxrdf::Literal::new_typed_literal("true", oxrdf::vocab::xsd::BOOLEAN),
    ));

    let output = OwlNets::new(graph).unwrap().run();
    assert_eq!(triples(&output.graph), vec![Triple::new(class.clone(), binds, class.clone())]);
}

#[test]
fn qualified_cardinality_still_decodes_through_on_class() {
    let class = obo("UBERON_0000062");
    let has_part = obo("BFO_0000051");
    let filler = obo("UBERON_0004923");

    let mut graph = Graph::new();
    declare_class(&mut graph, &class);
    declare_class(&mut graph, &filler);
    declare_object_property(&mut graph, &has_part);
    let restriction = BlankNode::default();
    graph.insert(TripleRef::new(class.as_ref(), rdfs::SUB_CLASS_OF, restriction.as_ref()));
    graph.insert(TripleRef::new(restriction.as_ref(), rdf::TYPE, owl::RESTRICTION));
    graph.insert(TripleRef::new(restriction.as_ref(), owl::ON_PROPERTY, has_part.as_ref()));
    graph.insert(TripleRef::new(
        restriction.as_ref(),
        owl::MIN_QUALIFIED_CARDINALITY,
        &oxrdf::Literal::new_typed_literal("2", oxrdf::vocab::xsd::NON_NEGATIVE_INTEGER),
    ));
    graph.insert(TripleRef::new(restriction.as_ref(), owl::ON_CLASS, filler.as_ref()));

    let output = OwlNets::new(graph).unwrap().run();
    assert_eq!(triples(&output.graph), vec![Triple::new(class.clone(), has_part, filler)]);
    assert!(output.ledger.cardinality_ignored().contains_key(class.as_str()));
}

#[test]
fn negation_property_skips_the_class() {
    let class = obo("CL_0000562");
    let lacks_part = NamedNode::new("http://purl.obolibrary.org/obo/cl#lacks_part").unwrap();
    let filler = obo("GO_0005634");

    let mut graph = Graph::new();
    declare_class(&mut graph, &class);
    declare_class(&mut graph, &filler);
    declare_object_property(&mut graph, &lacks_part);
    some_values_from(&mut graph, &class, &lacks_part, &filler);

    let output = OwlNets::new(graph).unwrap().run();
    assert!(output.graph.is_empty());
    assert!(output.ledger.negation_removed().contains_key(class.as_str()));
    assert!(output.ledger.decoded_classes().is_empty());
}

#[test]
fn restriction_filler_keeps_the_restriction_property() {
    let class = obo("UBERON_0000062");
    let part_of = obo("BFO_0000050");
    let quality = obo("PATO_0000586");

    let mut graph = Graph::new();
    declare_class(&mut graph, &class);
    declare_class(&mut graph, &quality);
    declare_object_property(&mut graph, &part_of);
    some_values_from(&mut graph, &class, &part_of, &quality);

    // even a quality filler: the asserted onProperty is the relation
    let output = OwlNets::new(graph).unwrap().run();
    assert_eq!(triples(&output.graph), vec![Triple::new(class, part_of, quality)]);
}

#[test]
fn quality_union_member_gets_the_quality_relation() {
    let class = obo("UBERON_0000062");
    let member = obo("CL_0000066");
    let quality = obo("PATO_0000586");
    let has_quality = obo("RO_0000086");

    let mut graph = Graph::new();
    declare_class(&mut graph, &class);
    declare_class(&mut graph, &member);
    declare_class(&mut graph, &quality);
    declare_object_property(&mut graph, &has_quality);
    let head = union_list(&mut graph, &[&member, &quality]);
    graph.insert(TripleRef::new(class.as_ref(), owl::EQUIVALENT_CLASS, head.as_ref()));

    let output = OwlNets::new(graph).unwrap().run();
    assert_eq!(
        triples(&output.graph),
        sorted(vec![
            Triple::new(class.clone(), rdfs::SUB_CLASS_OF.into_owned(), member),
            Triple::new(class, has_quality, quality),
        ])
    );
}

#[test]
fn cyclic_list_cells_terminate_without_leaking() {
    let class = obo("GO_0000785");
    let a = obo("GO_0005694");

    let mut graph = Graph::new();
    declare_class(&mut graph, &class);
    declare_class(&mut graph, &a);
    let head = BlankNode::default();
    let cell = BlankNode::default();
    graph.insert(TripleRef::new(class.as_ref(), owl::EQUIVALENT_CLASS, head.as_ref()));
    graph.insert(TripleRef::new(head.as_ref(), rdf::TYPE, owl::CLASS));
    graph.insert(TripleRef::new(head.as_ref(), owl::UNION_OF, cell.as_ref()));
    graph.insert(TripleRef::new(cell.as_ref(), rdf::FIRST, a.as_ref()));
    // a malformed list whose tail points back at itself
    graph.insert(TripleRef::new(cell.as_ref(), rdf::REST, cell.as_ref()));

    let output = OwlNets::new(graph).unwrap().run();
    assert_eq!(
        triples(&output.graph),
        vec![Triple::new(class, rdfs::SUB_CLASS_OF.into_owned(), a)]
    );
}

#[test]
fn output_never_contains_anonymous_nodes() {
    let class = obo("GO_0000785");
    let part_of = obo("BFO_0000050");
    let filler = obo("GO_0005694");

    let mut graph = Graph::new();
    declare_class(&mut graph, &class);
    declare_class(&mut graph, &filler);
    declare_object_property(&mut graph, &part_of);
    some_values_from(&mut graph, &class, &part_of, &filler);
    graph.insert(TripleRef::new(class.as_ref(), rdfs::SUB_CLASS_OF, filler.as_ref()));

    let output = OwlNets::new(graph).unwrap().run();
    for triple in output.graph.iter() {
        assert!(matches!(triple.subject, SubjectRef::NamedNode(_)));
        assert!(matches!(triple.object, TermRef::NamedNode(_)));
    }
}

#[test]
fn unrecognized_frames_are_ledgered_as_misc() {
    let class = obo("PR_000000001");
    let one_of = NamedNode::new("http://www.w3.org/2002/07/owl#oneOf").unwrap();

    let mut graph = Graph::new();
    declare_class(&mut graph, &class);
    let node = BlankNode::default();
    graph.insert(TripleRef::new(class.as_ref(), owl::EQUIVALENT_CLASS, node.as_ref()));
    graph.insert(TripleRef::new(node.as_ref(), rdf::TYPE, owl::CLASS));
    graph.insert(TripleRef::new(node.as_ref(), one_of.as_ref(), rdf::NIL));

    let output = OwlNets::new(graph).unwrap().run();
    assert!(output.graph.is_empty());
    // misc skips are keyed by the class they belong to
    assert_eq!(output.ledger.misc_ignored()[class.as_str()], vec!["oneOf"]);
    // the class still reached decoding, so its encoding is accounted for
    assert_eq!(output.ledger.decoded_classes()[class.as_str()].len(), 3);
}

#[test]
fn insertion_order_does_not_change_the_result() {
    let class = obo("CL_0000995");
    let a = obo("CL_0001021");
    let b = obo("CL_0001026");

    let mut forward = Graph::new();
    declare_class(&mut forward, &class);
    declare_class(&mut forward, &a);
    declare_class(&mut forward, &b);
    let head = union_list(&mut forward, &[&a, &b]);
    forward.insert(TripleRef::new(class.as_ref(), owl::EQUIVALENT_CLASS, head.as_ref()));

    let mut reversed = Graph::new();
    let mut statements: Vec<_> = forward.iter().map(TripleRef::into_owned).collect();
    statements.reverse();
    for triple in &statements {
        reversed.insert(triple);
    }

    let forward_output = OwlNets::new(forward).unwrap().run();
    let reversed_output = OwlNets::new(reversed).unwrap().run();
    assert_eq!(triples(&forward_output.graph), triples(&reversed_output.graph));
}
