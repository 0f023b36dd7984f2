//! Target registry
//!
//! Targets are registered once before anything runs and looked up by name.
//! Declaration order is preserved because the resolver uses it as the
//! tie-break between otherwise unordered prerequisites.

use std::collections::HashMap;

use petgraph::algo::kosaraju_scc;
use petgraph::prelude::*;

use crate::configs::targets::Target;
use crate::types::{LifecycleError, LifecycleResult};

#[derive(Debug, Default)]
pub struct TargetRegistry {
    targets: Vec<Target>,
    index: HashMap<String, usize>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every target, then check that all prerequisites resolve
    pub fn from_targets(targets: impl IntoIterator<Item = Target>) -> LifecycleResult<Self> {
        let mut registry = Self::new();
        for target in targets {
            registry.register(target)?;
        }
        registry.validate()?;
        Ok(registry)
    }

    pub fn register(&mut self, target: Target) -> LifecycleResult<()> {
        if self.index.contains_key(&target.name) {
            return Err(LifecycleError::DuplicateTarget(target.name));
        }
        self.index.insert(target.name.clone(), self.targets.len());
        self.targets.push(target);
        Ok(())
    }

    pub fn get(&self, name: &str) -> LifecycleResult<&Target> {
        self.index
            .get(name)
            .map(|&i| &self.targets[i])
            .ok_or_else(|| LifecycleError::UnknownTarget {
                name: name.to_string(),
                required_by: None,
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Fail on the first prerequisite, in declaration order, that names no target
    pub fn validate(&self) -> LifecycleResult<()> {
        for target in &self.targets {
            if let Some(missing) = target
                .prerequisites
                .iter()
                .find(|prerequisite| !self.contains(prerequisite))
            {
                return Err(LifecycleError::UnknownTarget {
                    name: missing.clone(),
                    required_by: Some(target.name.clone()),
                });
            }
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Target> {
        self.targets.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(|t| t.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Graph of declared targets with an edge from each target to its prerequisites.
    /// Unresolved prerequisites are skipped.
    pub fn dependency_graph(&self) -> DiGraph<String, ()> {
        let mut graph = DiGraph::<String, ()>::new();
        let nodes: Vec<NodeIndex> = self
            .targets
            .iter()
            .map(|target| graph.add_node(target.name.clone()))
            .collect();

        for (from, target) in self.targets.iter().enumerate() {
            for prerequisite in &target.prerequisites {
                if let Some(&to) = self.index.get(prerequisite) {
                    graph.add_edge(nodes[from], nodes[to], ());
                }
            }
        }
        graph
    }

    /// Strongly connected components that form cycles, each sorted by name
    pub fn cycles(&self) -> Vec<Vec<String>> {
        let graph = self.dependency_graph();
        let mut cycles: Vec<Vec<String>> = kosaraju_scc(&graph)
            .into_iter()
            .filter_map(|component| {
                if component.len() > 1 {
                    let mut cycle = component
                        .iter()
                        .map(|node| graph[*node].clone())
                        .collect::<Vec<_>>();
                    cycle.sort();
                    Some(cycle)
                } else {
                    let node = component[0];
                    if graph.contains_edge(node, node) {
                        Some(vec![graph[node].clone()])
                    } else {
                        None
                    }
                }
            })
            .collect();
        cycles.sort();
        cycles
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_get() {
        let mut registry = TargetRegistry::new();
        registry.register(Target::new("build")).unwrap();
        registry.register(Target::new("publish").requires(["build"])).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("publish").unwrap().prerequisites, vec!["build"]);
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["build", "publish"]);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = TargetRegistry::new();
        registry.register(Target::new("clean")).unwrap();
        let err = registry.register(Target::new("clean")).unwrap_err();
        assert!(matches!(err, LifecycleError::DuplicateTarget(name) if name == "clean"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_lookup_fails() {
        let registry = TargetRegistry::new();
        let err = registry.get("deploy").unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::UnknownTarget { ref name, required_by: None } if name == "deploy"
        ));
    }

    #[test]
    fn test_unresolved_prerequisite_fails_registration() {
        let err = TargetRegistry::from_targets([
            Target::new("build"),
            Target::new("publish").requires(["build", "sign"]),
        ])
        .unwrap_err();
        match err {
            LifecycleError::UnknownTarget { name, required_by } => {
                assert_eq!(name, "sign");
                assert_eq!(required_by.as_deref(), Some("publish"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_forward_references_are_allowed() {
        let registry = TargetRegistry::from_targets([
            Target::new("docs").requires(["docs-html"]),
            Target::new("docs-html"),
        ])
        .unwrap();
        assert!(registry.contains("docs-html"));
    }

    #[test]
    fn test_cycles_are_reported() {
        let registry = TargetRegistry::from_targets([
            Target::new("a").requires(["b"]),
            Target::new("b").requires(["a"]),
            Target::new("c").requires(["c"]),
            Target::new("d").requires(["a"]),
        ])
        .unwrap();

        assert_eq!(
            registry.cycles(),
            vec![
                vec!["a".to_string(), "b".to_string()],
                vec!["c".to_string()],
            ]
        );
    }

    #[test]
    fn test_dependency_graph_edges_point_at_prerequisites() {
        let registry = TargetRegistry::from_targets([
            Target::new("clean"),
            Target::new("build").requires(["clean"]),
        ])
        .unwrap();
        let graph = registry.dependency_graph();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
        assert!(registry.cycles().is_empty());
    }
}
