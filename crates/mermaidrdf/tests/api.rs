//! Integration tests for the public API

use mermaidrdf::prelude::*;
use mermaidrdf::{extract_diagrams, render, translate, translate_into};

#[test]
fn test_translate_simple_chain() {
    let graph = translate("graph LR; A-->B-->C").unwrap();
    assert!(graph.contains(&Triple::named(":A", "d3f:accesses", ":B")));
    assert!(graph.contains(&Triple::named(":B", "d3f:accesses", ":C")));
}

#[test]
fn test_translate_with_labels() {
    let graph = translate("graph LR\n  A[Start] --> B[End]").unwrap();
    assert!(graph.contains(&Triple::with_literal(":A", "rdfs:label", "Start")));
    assert!(graph.contains(&Triple::with_literal(":B", "rdfs:label", "End")));
}

#[test]
fn test_flowchart_keyword_header() {
    let graph = translate("flowchart TD\n  A --o B").unwrap();
    assert!(graph.contains(&Triple::named(":A", "d3f:reads", ":B")));
}

#[test]
fn test_leading_blank_lines_before_header() {
    let input = r#"
        graph TD
        A --> B
        B --> C
    "#;
    let graph = translate(input).unwrap();
    assert_eq!(graph.len(), 5);
}

#[test]
fn test_semicolon_separated() {
    let graph = translate("graph LR; A-->B; B-->C; C-->D").unwrap();
    assert_eq!(graph.triples_with_predicate("d3f:accesses").count(), 3);
}

#[test]
fn test_translate_into_reports_lines() {
    let mut graph = Graph::new();
    let report = translate_into("graph LR\n  A --> B\n  %% note\n  subgraph x", &mut graph).unwrap();
    assert_eq!(report.lines_parsed, 1);
    assert_eq!(report.skipped.len(), 2);
    assert_eq!(report.notable_skips().count(), 1);
}

#[test]
fn test_turtle_output() {
    let graph = translate("graph LR\n  db[(mysql)]").unwrap();
    let turtle = graph.to_turtle();
    assert!(turtle.starts_with("@prefix : <https://par-tec.it/example#> ."));
    assert!(turtle.contains("@prefix d3f: <http://d3fend.mitre.org/ontologies/d3fend.owl#> ."));
    assert!(turtle.contains(":db a d3f:DatabaseServer ."));
    assert!(turtle.contains(":db rdfs:label \"\"\"mysql\"\"\" ."));
}

#[test]
fn test_turtle_reads_back() {
    let graph = translate("graph LR\n  web[nginx] -->|fa:fa-envelope| mail").unwrap();
    let again = Graph::parse_statements(&graph.to_turtle()).unwrap();
    assert_eq!(graph, again);
}

#[test]
fn test_render_typed_graph() {
    let graph = translate("graph TD\n  db[(mysql)]\n  app[nginx] --> db").unwrap();
    let diagram = render(&graph).unwrap();
    assert!(diagram.starts_with("graph LR\n"));
    assert!(diagram.contains("app --> |accesses| db"));
}

#[test]
fn test_extract_diagrams_from_markdown() {
    let doc = "# Title\n\n```mermaid\ngraph LR\n  A --> B\n```\n\nprose\n";
    assert_eq!(extract_diagrams(doc), vec!["graph LR\n  A --> B"]);
}

#[test]
fn test_prelude_imports() {
    let parser = FlowchartParser::new();
    let renderer = FlowchartRenderer::with_config(RenderConfig::new(Direction::BottomUp));
    let mut graph = Graph::new();

    let report = parser.parse("graph LR; A-->B", &mut graph).unwrap();
    assert_eq!(report.triples_added, 3);

    let output = renderer.render(&graph).unwrap();
    assert!(output.starts_with("graph BT\n"));
    assert_eq!(Parser::<Graph>::name(&parser), "flowchart");
    assert_eq!(Renderer::<Graph>::format(&renderer), "mermaid");
}

#[test]
fn test_orchestrator_process() {
    let output = Orchestrator::new()
        .process("graph LR\n  db[(postgresql)] --> cache[(redis)]")
        .unwrap();
    assert!(output.contains("db --> |accesses| cache"));
    assert!(output.contains("cache[(fa:fa-database cache<br>redis)]"));
}

#[test]
fn test_empty_input_is_rejected() {
    assert!(translate("").is_err());
}

#[test]
fn test_kinds_are_exposed() {
    assert_eq!(
        ResourceKind::from_type_term("d3f:DatabaseServer"),
        Some(ResourceKind::DatabaseServer)
    );
    assert_eq!(
        ResourceKind::from_type_term("<urn:k8s:Pod>"),
        Some(ResourceKind::Pod)
    );
    assert_eq!(ResourceKind::from_type_term("d3f:Email"), None);
}
