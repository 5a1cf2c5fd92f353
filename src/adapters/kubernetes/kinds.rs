//! Built-in Kubernetes resource kinds.

/// Namespaced kinds, polled by the sharded core agent.
pub const NAMESPACED_KINDS: &[&str] = &[
    "deployment",
    "replicaSet",
    "statefulSet",
    "daemonSet",
    "pod",
    "service",
    "ingress",
    "configMap",
    "secret",
    "job",
    "cronJob",
    "horizontalPodAutoscaler",
    "persistentVolumeClaim",
    "networkPolicy",
    "serviceAccount",
    "role",
    "roleBinding",
];

/// Cluster-scoped kinds, polled by a single agent per account.
pub const CLUSTER_SCOPED_KINDS: &[&str] = &[
    "namespace",
    "clusterRole",
    "clusterRoleBinding",
    "persistentVolume",
    "storageClass",
    "customResourceDefinition",
];

pub fn is_namespaced(kind: &str) -> bool {
    NAMESPACED_KINDS.iter().any(|k| k.eq_ignore_ascii_case(kind))
}

pub fn is_cluster_scoped(kind: &str) -> bool {
    CLUSTER_SCOPED_KINDS.iter().any(|k| k.eq_ignore_ascii_case(kind))
}

pub fn is_builtin(kind: &str) -> bool {
    is_namespaced(kind) || is_cluster_scoped(kind)
}

/// Canonical spelling of a built-in kind, matched case-insensitively.
pub fn canonical(kind: &str) -> Option<&'static str> {
    NAMESPACED_KINDS
        .iter()
        .chain(CLUSTER_SCOPED_KINDS)
        .find(|k| k.eq_ignore_ascii_case(kind))
        .copied()
}
