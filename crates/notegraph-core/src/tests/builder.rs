use crate::*;

fn note(id: &str, title: &str, labels: &[&str]) -> Note {
    Note::new(id, title).with_entities(
        labels
            .iter()
            .enumerate()
            .map(|(i, label)| Entity::new(format!("{id}-e{i}"), *label)),
    )
}

fn ids(graph: &Graph) -> Vec<&str> {
    graph.nodes().iter().map(|n| n.id.as_str()).collect()
}

#[test]
fn empty_notes_build_empty_graph() {
    let graph = GraphBuilder::default().build(&[]);
    assert!(graph.is_empty());
    assert!(graph.edges().is_empty());
}

#[test]
fn duplicate_label_in_one_note_collapses_to_one_edge() {
    let notes = vec![note("n1", "Only note", &["PERSON", "PERSON", "ORG"])];
    let graph = GraphBuilder::default().build(&notes);

    let note_nodes = graph.nodes().iter().filter(|n| n.is_note()).count();
    assert_eq!(note_nodes, 1);
    assert_eq!(ids(&graph), vec!["entity-PERSON", "entity-ORG", "note-n1"]);
    assert_eq!(
        graph.edge_ids().collect::<Vec<_>>(),
        vec![
            ("note-n1", "entity-PERSON"),
            ("note-n1", "entity-ORG")
        ]
    );
    assert!(graph.edges().iter().all(|e| e.weight == 1.0));
}

#[test]
fn misc_labels_never_become_nodes() {
    let notes = vec![
        note("a", "A", &["misc", "MISC", "Miscellaneous", "DATE"]),
        note("b", "B", &["miscellaneous"]),
    ];
    let graph = GraphBuilder::default().build(&notes);
    assert_eq!(ids(&graph), vec!["entity-DATE", "note-a", "note-b"]);
    assert_eq!(graph.edges().len(), 1);
}

#[test]
fn labels_are_case_sensitive() {
    let notes = vec![note("a", "A", &["org", "ORG"])];
    let graph = GraphBuilder::default().build(&notes);
    assert_eq!(ids(&graph), vec!["entity-org", "entity-ORG", "note-a"]);
    assert_eq!(graph.edges().len(), 2);
}

#[test]
fn occurrence_count_is_distinct_note_count_by_default() {
    let notes = vec![
        note("a", "A", &["PERSON", "PERSON", "PERSON"]),
        note("b", "B", &["PERSON"]),
    ];
    let graph = GraphBuilder::default().build(&notes);
    let person = graph.node(graph.index_of("entity-PERSON").unwrap()).unwrap();
    assert_eq!(person.occurrence_count(), Some(2));
    assert_eq!(person.label, "Person");
    assert_eq!(person.entity_label(), Some("PERSON"));
}

#[test]
fn raw_occurrence_count_is_an_alternate_configuration() {
    let notes = vec![
        note("a", "A", &["PERSON", "PERSON", "PERSON"]),
        note("b", "B", &["PERSON"]),
    ];
    let builder = GraphBuilder::new(GraphConfig {
        occurrence_count: OccurrenceCount::RawOccurrences,
        ..Default::default()
    });
    let graph = builder.build(&notes);
    let person = graph.node(graph.index_of("entity-PERSON").unwrap()).unwrap();
    assert_eq!(person.occurrence_count(), Some(4));
    assert_eq!(graph.edges().len(), 2);
}

#[test]
fn inclusion_threshold_filters_rare_labels() {
    let notes = vec![
        note("a", "A", &["PERSON", "ORG", "ORG"]),
        note("b", "B", &["PERSON"]),
    ];
    let builder = GraphBuilder::new(GraphConfig {
        inclusion_threshold: 2,
        ..Default::default()
    });
    let graph = builder.build(&notes);
    assert_eq!(ids(&graph), vec!["entity-PERSON", "note-a", "note-b"]);
    assert_eq!(
        graph.edge_ids().collect::<Vec<_>>(),
        vec![
            ("note-a", "entity-PERSON"),
            ("note-b", "entity-PERSON")
        ]
    );
}

#[test]
fn note_titles_are_truncated_with_ellipsis() {
    let notes = vec![
        note("a", "A title that is definitely longer than allowed", &[]),
        note("b", "Exactly twenty-five chars", &[]),
    ];
    let graph = GraphBuilder::default().build(&notes);
    assert_eq!(graph.nodes()[0].label, "A title that is definitel...");
    assert_eq!(graph.nodes()[1].label, "Exactly twenty-five chars");
    assert_eq!(graph.nodes()[0].note_id(), Some("a"));
}

#[test]
fn blank_labels_keep_their_own_entity_nodes() {
    let notes = vec![
        note("a", "A", &["", "  ", "ORG"]),
        note("b", "B", &["", "misc"]),
    ];
    let graph = GraphBuilder::default().build(&notes);
    assert_eq!(
        ids(&graph),
        vec!["entity-", "entity-  ", "entity-ORG", "note-a", "note-b"]
    );
    assert_eq!(graph.edges().len(), 4);
    assert_eq!(graph.nodes()[0].occurrence_count(), Some(2));

    let related: Vec<&str> = related_notes(&notes, "").iter().map(|n| n.id.as_str()).collect();
    let blank = graph.index_of("entity-").unwrap();
    let linked: Vec<&str> = graph
        .edges()
        .iter()
        .filter(|e| e.entity == blank)
        .filter_map(|e| graph.node(e.note)?.note_id())
        .collect();
    assert_eq!(linked, related);
}

#[test]
fn repeated_note_ids_produce_one_note_node() {
    let notes = vec![
        note("a", "First", &["ORG"]),
        note("a", "Second", &["PERSON"]),
    ];
    let graph = GraphBuilder::default().build(&notes);
    assert_eq!(ids(&graph), vec!["entity-ORG", "note-a"]);
    assert_eq!(graph.nodes()[1].label, "First");
}

#[test]
fn rebuilding_is_structurally_idempotent() {
    let notes = vec![
        note("a", "A", &["PERSON", "ORG", "misc"]),
        note("b", "B", &["ORG", "DATE"]),
        note("c", "C", &[]),
    ];
    let builder = GraphBuilder::default();
    assert_eq!(builder.build(&notes), builder.build(&notes));
}

#[test]
fn related_notes_are_exact_and_deduplicated() {
    let notes = vec![
        note("a", "A", &["X", "X", "Y"]),
        note("b", "B", &["Y"]),
        note("c", "C", &["x", "X"]),
        note("a", "A again", &["X"]),
    ];
    let related: Vec<&str> = related_notes(&notes, "X")
        .into_iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(related, vec!["a", "c"]);
    assert!(related_notes(&notes, "Z").is_empty());
}
