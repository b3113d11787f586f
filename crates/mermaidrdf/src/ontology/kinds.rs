//! Resource kinds recognized by the renderer
//!
//! Each kind is resolved once from its type term and then drives icon, shape
//! and nesting decisions through [`KindProfile`].

use std::fmt;

use crate::core::vocab::{d3f, local_name, NODE};
use crate::core::NodeShape;

/// Child id fragments that never nest under a namespace
pub const NAMESPACE_EXCLUDED_KINDS: &[&str] = &["Application", "Deployment", "StatefulSet"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    Namespace,
    Application,
    DeploymentConfig,
    Deployment,
    Pod,
    Container,
    Service,
    Route,
    Port,
    Volume,
    Image,
    Host,
    DatabaseServer,
    Server,
    Node,
}

/// Rendering behaviour of a kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindProfile {
    pub kind: ResourceKind,
    /// Type term in prefixed form
    pub type_term: &'static str,
    /// Icon prefix for labels; `None` uses the type's local name
    pub icon: Option<&'static str>,
    pub shape: NodeShape,
    /// Whether the kind gets its own node declaration
    pub standalone: bool,
    /// Whether children are drawn inside a subgraph of this node
    pub nests_children: bool,
}

const fn profile(
    kind: ResourceKind,
    type_term: &'static str,
    icon: Option<&'static str>,
    shape: NodeShape,
    standalone: bool,
    nests_children: bool,
) -> KindProfile {
    KindProfile {
        kind,
        type_term,
        icon,
        shape,
        standalone,
        nests_children,
    }
}

use NodeShape::{Cylinder, Hexagon, Rectangle, RoundedRect, Subroutine};
use ResourceKind::*;

static PROFILES: &[KindProfile] = &[
    profile(Namespace, "k8s:Namespace", Some("⬚"), Rectangle, true, true),
    profile(Application, "k8s:Application", Some("fa:fa-cubes"), Rectangle, false, true),
    profile(DeploymentConfig, "k8s:DeploymentConfig", Some("⟳"), Hexagon, true, false),
    profile(Deployment, "k8s:Deployment", Some("fa:fa-cubes"), Hexagon, true, false),
    profile(Pod, "k8s:Pod", Some("fa:fa-cube"), Hexagon, true, true),
    profile(Container, "k8s:Container", Some("fa:fa-cube"), Hexagon, true, true),
    profile(Service, "k8s:Service", Some("fa:fa-network-wired"), RoundedRect, true, true),
    profile(Route, "k8s:Route", None, RoundedRect, true, true),
    profile(Port, "k8s:Port", Some("fa:fa-ethernet"), RoundedRect, true, true),
    profile(Volume, "k8s:PersistentVolumeClaim", Some("fa:fa-hdd"), Cylinder, true, true),
    profile(Image, "k8s:Image", Some("fa:fa-docker"), Cylinder, false, true),
    profile(Host, "k8s:Host", None, Rectangle, false, true),
    profile(DatabaseServer, d3f::DATABASE_SERVER, Some("fa:fa-database"), Cylinder, true, true),
    profile(Server, d3f::SERVER, Some("fa:fa-server"), Subroutine, true, true),
    profile(Node, NODE, None, Rectangle, true, true),
];

const K8S_IRI: &str = "<urn:k8s:";

impl ResourceKind {
    /// Resolve a type term, accepting `k8s:X` and `<urn:k8s:X>` spellings
    pub fn from_type_term(term: &str) -> Option<Self> {
        let normalized;
        let term = match term
            .strip_prefix(K8S_IRI)
            .and_then(|rest| rest.strip_suffix('>'))
        {
            Some(name) => {
                normalized = format!("k8s:{}", name);
                normalized.as_str()
            }
            None => term,
        };
        PROFILES
            .iter()
            .find(|profile| profile.type_term == term)
            .map(|profile| profile.kind)
    }

    pub fn profile(&self) -> &'static KindProfile {
        // PROFILES lists every variant in declaration order
        &PROFILES[*self as usize]
    }

    /// Higher wins when a subject carries several recognized types
    pub fn specificity(&self) -> u8 {
        match self {
            Node => 0,
            DatabaseServer | Server => 1,
            _ => 2,
        }
    }

    /// Icon shown in front of labels
    pub fn icon(&self) -> &'static str {
        let profile = self.profile();
        profile.icon.unwrap_or_else(|| local_name(profile.type_term))
    }

    /// True if a child with this sanitized id may be drawn inside this kind's subgraph
    pub fn admits_child(&self, child_id: &str) -> bool {
        match self {
            Namespace => !NAMESPACE_EXCLUDED_KINDS
                .iter()
                .any(|fragment| child_id.contains(fragment)),
            _ => self.profile().nests_children,
        }
    }

    /// Every recognized kind
    pub fn all() -> impl Iterator<Item = ResourceKind> {
        PROFILES.iter().map(|profile| profile.kind)
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", local_name(self.profile().type_term))
    }
}
