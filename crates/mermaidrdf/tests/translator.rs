//! Diagram→graph translation scenarios

use mermaidrdf::prelude::*;
use mermaidrdf::translate;

fn statements(graph: &Graph) -> Vec<String> {
    graph.triples().map(Triple::to_string).collect()
}

#[test]
fn test_empty_body_yields_empty_graph() {
    for header in ["graph", "graph TD", "graph LR", "flowchart BT", "flowchart RL"] {
        let graph = translate(header).unwrap();
        assert!(graph.is_empty(), "{}", header);
    }
}

#[test]
fn test_chain_yields_two_edges_and_three_nodes() {
    let graph = translate("graph LR\n  A-->B-->C").unwrap();
    assert_eq!(
        statements(&graph),
        vec![
            ":A d3f:accesses :B .",
            ":A a :Node .",
            ":B d3f:accesses :C .",
            ":B a :Node .",
            ":C a :Node .",
        ]
    );
}

#[test]
fn test_database_shape_with_mysql_label() {
    let graph = translate("graph LR\n  A[(mysql)]").unwrap();
    assert!(graph.contains(&Triple::typed(":A", ":Node")));
    assert!(graph.contains(&Triple::typed(":A", "d3f:DatabaseServer")));
    assert!(graph.contains(&Triple::with_literal(":A", "rdfs:label", "mysql")));
    assert_eq!(graph.len(), 3);
}

#[test]
fn test_repeated_node_with_shape_is_classified() {
    let graph = translate("graph LR\n  A --> B --> A[(mysql)]").unwrap();
    assert!(graph.contains(&Triple::typed(":A", "d3f:DatabaseServer")));
    assert!(graph.contains(&Triple::with_literal(":A", "rdfs:label", "mysql")));
    assert!(graph.contains(&Triple::named(":A", "d3f:accesses", ":B")));
    assert!(graph.contains(&Triple::named(":B", "d3f:accesses", ":A")));
}

#[test]
fn test_repeated_bare_node_adds_nothing() {
    let graph = translate("graph LR\n  A --> B --> A").unwrap();
    assert_eq!(
        statements(&graph),
        vec![
            ":A d3f:accesses :B .",
            ":A a :Node .",
            ":B d3f:accesses :A .",
            ":B a :Node .",
        ]
    );
}

#[test]
fn test_annotation_may_contain_pipes() {
    let graph = translate("graph LR\n  A --> |a|b| B").unwrap();
    assert!(graph.contains(&Triple::named(":A", "d3f:accesses", ":B")));
    assert!(graph.contains(&Triple::typed(":B", ":Node")));
}

#[test]
fn test_arrow_defaults() {
    let graph = translate("graph LR\n  A --o B\n  C --- D\n  E -.-> F").unwrap();
    assert!(graph.contains(&Triple::named(":A", "d3f:reads", ":B")));
    assert!(graph.contains(&Triple::named(":C", ":connected", ":D")));
    assert!(graph.contains(&Triple::named(":E", "d3f:accesses", ":F")));
}

#[test]
fn test_whitelisted_predicate_replaces_default() {
    let graph = translate("graph LR\n  A -->|d3f:reads| B").unwrap();
    assert!(graph.contains(&Triple::named(":A", "d3f:reads", ":B")));
    assert!(!graph.contains(&Triple::named(":A", "d3f:accesses", ":B")));
}

#[test]
fn test_non_predicate_term_falls_through_to_artifacts() {
    let graph = translate("graph LR\n  A -->|d3f:Email| B").unwrap();
    assert!(!graph.contains(&Triple::named(":A", "d3f:Email", ":B")));
    assert!(graph.contains(&Triple::named(":A", "d3f:accesses", ":B")));
    assert!(graph.contains(&Triple::named(":A", "d3f:produces", "d3f:Email")));
    assert!(graph.contains(&Triple::named(":B", "d3f:uses", "d3f:Email")));
}

#[test]
fn test_only_first_artifact_is_used() {
    let graph = translate("graph LR\n  A -->|d3f:Email d3f:UserAccount| B").unwrap();
    assert!(graph.contains(&Triple::named(":A", "d3f:produces", "d3f:Email")));
    assert!(!graph.contains(&Triple::named(":A", "d3f:produces", "d3f:UserAccount")));
    assert!(!graph.contains(&Triple::named(":B", "d3f:uses", "d3f:UserAccount")));
}

#[test]
fn test_icon_annotation_exchanges_artifact() {
    let graph = translate("graph LR\n  smtp -->|fa:fa-envelope| imap").unwrap();
    assert!(graph.contains(&Triple::named(":smtp", "d3f:accesses", ":imap")));
    assert!(graph.contains(&Triple::named(":smtp", "d3f:produces", "d3f:Email")));
    assert!(graph.contains(&Triple::named(":imap", "d3f:uses", "d3f:Email")));
}

#[test]
fn test_authenticates_expands_exactly() {
    let graph = translate("graph LR\n  Client -->|d3f:authenticates| Auth").unwrap();
    assert_eq!(
        statements(&graph),
        vec![
            ":Auth d3f:uses d3f:LoginSession .",
            ":Auth a :Node .",
            ":Client d3f:authenticates :Auth .",
            ":Client d3f:produces d3f:AuthenticationLog .",
            ":Client d3f:produces d3f:LoginSession .",
            ":Client a :Node .",
        ]
    );
}

#[test]
fn test_keyword_classes_from_label_or_id() {
    let graph = translate("graph LR\n  web[Frontend NGINX] --> kafka").unwrap();
    assert!(graph.contains(&Triple::typed(":web", "d3f:WebServer")));
    assert!(graph.contains(&Triple::typed(":kafka", "d3f:DatabaseServer")));
    assert!(graph.contains(&Triple::typed(":kafka", "d3f:Server")));
}

#[test]
fn test_inline_class_and_related_artifact() {
    let graph = translate("graph LR\n  mx[fa:fa-envelope relay d3f:MessageTransferAgent]").unwrap();
    assert!(graph.contains(&Triple::typed(":mx", "d3f:MessageTransferAgent")));
    assert!(graph.contains(&Triple::named(":mx", "d3f:related", "d3f:Email")));
}

#[test]
fn test_quoted_label_keeps_brackets() {
    let graph = translate("graph LR\n  db[(\"primary (eu-west)\")]").unwrap();
    assert!(graph.contains(&Triple::with_literal(":db", "rdfs:label", "primary (eu-west)")));
}

#[test]
fn test_bad_lines_are_skipped() {
    let mut graph = Graph::new();
    let report = mermaidrdf::translate_into(
        "graph LR\n  A --> B\n  --> C\n  classDef red fill:#f00\n  C --> D",
        &mut graph,
    )
    .unwrap();
    assert_eq!(report.lines_parsed, 2);
    let skipped: Vec<usize> = report.notable_skips().map(|skip| skip.line).collect();
    assert_eq!(skipped, vec![3, 4]);
    assert!(graph.contains(&Triple::named(":C", "d3f:accesses", ":D")));
}

#[test]
fn test_translating_twice_is_idempotent() {
    let diagram = "graph LR\n  web[nginx] -->|d3f:authenticates| idp[keycloak]\n  web --o db[(mysql)]";
    let once = translate(diagram).unwrap();

    let mut twice = Graph::new();
    mermaidrdf::translate_into(diagram, &mut twice).unwrap();
    let report = mermaidrdf::translate_into(diagram, &mut twice).unwrap();
    assert_eq!(report.triples_added, 0);
    assert_eq!(once, twice);
}

#[test]
fn test_markdown_document_unions_diagrams() {
    let doc = "# Mail\n\n```mermaid\ngraph LR\n  smtp --> imap\n```\n\n## Auth\n\n```mermaid\nflowchart TD\n  imap -->|d3f:authenticates| ldap\n```\n";
    let graph = translate(doc).unwrap();
    assert!(graph.contains(&Triple::named(":smtp", "d3f:accesses", ":imap")));
    assert!(graph.contains(&Triple::named(":imap", "d3f:authenticates", ":ldap")));
    assert!(graph.contains(&Triple::named(":ldap", "d3f:uses", "d3f:LoginSession")));
}

#[test]
fn test_substituted_tables_from_json() {
    let json = r#"{
        "class_keywords": [{"keywords": ["redis"], "classes": ["d3f:DatabaseServer"]}],
        "artifact_keywords": [],
        "predicates": ["reads"],
        "inferred": {}
    }"#;
    let tables = OntologyTables::from_json(json).unwrap();
    let orchestrator = Orchestrator::with_tables(std::sync::Arc::new(tables));

    let (graph, _) = orchestrator
        .translate("graph LR\n  cache[redis] -->|d3f:authenticates| app")
        .unwrap();
    assert!(graph.contains(&Triple::typed(":cache", "d3f:DatabaseServer")));
    assert!(graph.contains(&Triple::named(":cache", "d3f:accesses", ":app")));
    assert!(!graph.contains(&Triple::named(":cache", "d3f:authenticates", ":app")));
}
