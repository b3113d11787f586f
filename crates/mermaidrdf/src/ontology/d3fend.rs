//! Built-in D3FEND tables

use std::collections::{BTreeMap, BTreeSet};

use super::{KeywordGroup, OntologyTables, TemplateTerm, TripleTemplate};
use crate::core::vocab::d3f;

/// Software and icon keywords mapped to the classes they imply.
const CLASS_KEYWORDS: &[(&[&str], &[&str])] = &[
    (&["nginx", "apache", "httpd"], &["d3f:WebServer"]),
    (
        &["mysql", "mariadb", "postgresql", "mongodb"],
        &["d3f:DatabaseServer"],
    ),
    (
        &["rabbitmq", "kafka", "pulsar"],
        &["d3f:DatabaseServer", "d3f:Server"],
    ),
    (&["elasticsearch", "solr"], &["d3f:DatabaseServer"]),
    (
        &["postfix", "smtp"],
        &["d3f:MailService", "d3f:MessageTransferAgent"],
    ),
    (&["dns", "bind"], &["d3f:DNSServer"]),
    (
        &["auth0", "okta", "keycloak", "oauth"],
        &["d3f:AuthorizationServer", "d3f:AuthenticationService"],
    ),
    (
        &["avas", "clamav", "antispam"],
        &["d3f:ApplicationLayerFirewall", "d3f:MailService"],
    ),
    (&["imap", "lmtp", "dovecot"], &["d3f:MailService"]),
    (
        &[
            "gitlab",
            "github",
            "bitbucket",
            "fab:fa-github",
            "fab:fa-gitlab",
            "fab:fa-git",
        ],
        &["d3f:VersionControlSystem"],
    ),
    (
        &["jenkins", "gitlab-ci", "github"],
        &["d3f:SoftwareDeploymentTool"],
    ),
    (
        &["docker", "kubernetes"],
        &["d3f:ContainerOrchestrationSoftware"],
    ),
    (&["fab:fa-docker"], &["d3f:ContainerProcess"]),
    (&["fa-server"], &["d3f:Server"]),
    (&["fab:fa-python", "fab:fa-php"], &["d3f:ExecutableScript"]),
    (&["fa-folder"], &["d3f:FileSystem"]),
    (
        &["fa-desktop"],
        &["d3f:WebServerApplication", "d3f:GraphicalUserInterface"],
    ),
    (
        &["fab:fa-linux", "fab:fa-ubuntu", "fab:fa-redhat"],
        &["d3f:OperatingSystem"],
    ),
    (
        &["fab:fa-angular", "fab:fa-react", "fab:fa-vuejs"],
        &["d3f:WebServerApplication", "d3f:GraphicalUserInterface"],
    ),
];

/// Font-icon keywords mapped to the artifacts a node handles.
const ARTIFACT_KEYWORDS: &[(&[&str], &[&str])] = &[
    (&["fa-envelope"], &["d3f:Email"]),
    (&["fa-user-secret"], &["d3f:UserAccount"]),
    (&["fa-globe"], &["d3f:InternetNetworkTraffic"]),
    (&["fa-docker"], &["d3f:ContainerOrchestrationSoftware"]),
    (&["fa-clock"], &["d3f:TaskSchedule"]),
];

/// D3FEND object properties usable as `|d3f:name|` edge annotations.
const PREDICATES: &[&str] = &[
    "abuses",
    "accessed-by",
    "broader",
    "broader-transitive",
    "cited-by",
    "claimed-by",
    "contained-by",
    "created-by",
    "deceives",
    "depends-on",
    "employed-by",
    "evaluated-by",
    "evaluator",
    "exactly",
    "expected-latency",
    "impairs",
    "inventoried-by",
    "invoked-by",
    "loaded-by",
    "mapped-by",
    "may-be-deceived-by",
    "may-be-detected-by",
    "may-be-evicted-by",
    "may-be-hardened-against-by",
    "may-be-isolated-by",
    "modified-by",
    "modifies-part",
    "narrower",
    "narrower-transitive",
    "process-parent",
    "produced-by",
    "producer",
    "publisher",
    "recorded-in",
    "related",
    "seller",
    "submitter",
    "used-by",
    "validator",
    "writes",
    "addressed-by",
    "attached-to",
    "authorizes",
    "configures",
    "connects",
    "creator",
    "deceives-with",
    "dependent",
    "extends",
    "has-account",
    "has-dependent",
    "has-feature",
    "has-implementation",
    "has-location",
    "has-recipient",
    "has-sender",
    "hides",
    "installs",
    "kb-reference",
    "license",
    "limits",
    "may-be-contained-by",
    "may-be-created-by",
    "may-be-invoked-by",
    "may-be-modified-by",
    "may-deceive",
    "may-detect",
    "may-disable",
    "may-execute",
    "may-harden",
    "may-isolate",
    "neutralizes",
    "owns",
    "process-ancestor",
    "process-image-path",
    "process-user",
    "provider",
    "provides",
    "publishes",
    "summarizes",
    "terminates",
    "unmounts",
    "updates",
    "use-limits",
    "assessed-by",
    "deletes",
    "detects",
    "drives",
    "enabled-by",
    "features",
    "forges",
    "implemented-by",
    "implements",
    "injects",
    "interprets",
    "kb-reference-of",
    "may-be-accessed-by",
    "may-be-tactically-associated-with",
    "may-counter",
    "may-interpret",
    "may-map",
    "may-run",
    "obfuscates",
    "originates-from",
    "queries",
    "sells",
    "strengthens",
    "validates",
    "author",
    "cites",
    "copies",
    "encrypts",
    "has-evidence",
    "manages",
    "may-evict",
    "may-query",
    "process-property",
    "records",
    "addresses",
    "assesses",
    "claims",
    "d3fend-kb-object-property",
    "disables",
    "evicts",
    "has-member",
    "isolates",
    "latency",
    "member-of",
    "attack-may-be-countered-by",
    "d3fend-tactical-verb-property",
    "evaluates",
    "may-counter-attack",
    "may-transfer",
    "verifies",
    "counters",
    "runs",
    "loads",
    "may-add",
    "reads",
    "blocks",
    "filters",
    "semantic-relation",
    "spoofs",
    "hardens",
    "inventories",
    "uses",
    "authenticates",
    "may-produce",
    "adds",
    "executes",
    "monitors",
    "restricts",
    "maps",
    "may-create",
    "may-be-associated-with",
    "invokes",
    "may-access",
    "d3fend-catalog-object-property",
    "may-contain",
    "may-invoke",
    "creates",
    "enables",
    "contains",
    "analyzes",
    "accesses",
    "may-modify",
    "associated-with",
    "produces",
    "modifies",
];

fn groups(table: &[(&[&str], &[&str])]) -> Vec<KeywordGroup> {
    table
        .iter()
        .map(|(keywords, classes)| KeywordGroup::new(keywords, classes))
        .collect()
}

/// An authentication implies a login session and an authentication log.
fn authenticates_rule() -> Vec<TripleTemplate> {
    vec![
        TripleTemplate::new(
            TemplateTerm::Subject,
            d3f::PRODUCES,
            TemplateTerm::fixed(d3f::LOGIN_SESSION),
        ),
        TripleTemplate::new(
            TemplateTerm::Object,
            d3f::USES,
            TemplateTerm::fixed(d3f::LOGIN_SESSION),
        ),
        TripleTemplate::new(
            TemplateTerm::Subject,
            d3f::PRODUCES,
            TemplateTerm::fixed(d3f::AUTHENTICATION_LOG),
        ),
    ]
}

pub(super) fn tables() -> OntologyTables {
    let predicates: BTreeSet<String> = PREDICATES.iter().map(|p| p.to_string()).collect();
    let inferred = BTreeMap::from([(d3f::AUTHENTICATES.to_string(), authenticates_rule())]);

    OntologyTables {
        class_keywords: groups(CLASS_KEYWORDS),
        artifact_keywords: groups(ARTIFACT_KEYWORDS),
        predicates,
        inferred,
    }
}
