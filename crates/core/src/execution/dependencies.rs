//! Target dependency resolution
//!
//! This module expands a requested target into a linear [`ExecutionPlan`]:
//! a depth-first, post-order walk of its prerequisites in declaration order.

use std::collections::HashSet;

use crate::configs::targets::Target;
use crate::registry::TargetRegistry;
use crate::types::{LifecycleError, LifecycleResult};

/// Ordered, duplicate-free list of targets to run, requested target last
#[derive(Debug, Clone)]
pub struct ExecutionPlan<'a> {
    pub requested: String,
    pub targets: Vec<&'a Target>,
}

impl<'a> ExecutionPlan<'a> {
    pub fn names(&self) -> Vec<&'a str> {
        self.targets.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Target> + '_ {
        self.targets.iter().copied()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.targets.iter().position(|t| t.name == name)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}

pub struct DependencyResolver<'a> {
    registry: &'a TargetRegistry,
}

impl<'a> DependencyResolver<'a> {
    pub fn new(registry: &'a TargetRegistry) -> Self {
        Self { registry }
    }

    /// Build the plan for `name`. Nothing is cached between calls.
    pub fn resolve(&self, name: &str) -> LifecycleResult<ExecutionPlan<'a>> {
        let root = self.registry.get(name)?;
        let mut walk = Walk::default();
        self.visit(root, &mut walk)?;
        Ok(ExecutionPlan {
            requested: name.to_string(),
            targets: walk.order,
        })
    }

    fn visit(&self, target: &'a Target, walk: &mut Walk<'a>) -> LifecycleResult<()> {
        if walk.visited.contains(target.name.as_str()) {
            return Ok(());
        }
        if let Some(start) = walk.stack.iter().position(|n| *n == target.name) {
            let mut cycle: Vec<String> = walk.stack[start..].iter().map(|n| n.to_string()).collect();
            cycle.push(target.name.clone());
            return Err(LifecycleError::CyclicDependency { cycle });
        }

        walk.stack.push(&target.name);
        for prerequisite in &target.prerequisites {
            let dependency = self.registry.get(prerequisite).map_err(|_| {
                LifecycleError::UnknownTarget {
                    name: prerequisite.clone(),
                    required_by: Some(target.name.clone()),
                }
            })?;
            self.visit(dependency, walk)?;
        }
        walk.stack.pop();

        walk.visited.insert(&target.name);
        walk.order.push(target);
        Ok(())
    }
}

/// DFS state: `stack` holds the targets currently being visited
#[derive(Default)]
struct Walk<'a> {
    stack: Vec<&'a str>,
    visited: HashSet<&'a str>,
    order: Vec<&'a Target>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry(targets: Vec<Target>) -> TargetRegistry {
        let mut registry = TargetRegistry::new();
        for target in targets {
            registry.register(target).unwrap();
        }
        registry
    }

    fn resolve_names(registry: &TargetRegistry, name: &str) -> Vec<String> {
        DependencyResolver::new(registry)
            .resolve(name)
            .unwrap()
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_docs_uses_declaration_order() {
        let registry = registry(vec![
            Target::new("docs").requires(["docs-html", "docs-pdf"]),
            Target::new("docs-pdf"),
            Target::new("docs-html"),
        ]);
        assert_eq!(resolve_names(&registry, "docs"), vec!["docs-html", "docs-pdf", "docs"]);
    }

    #[test]
    fn test_clean_all_order() {
        let registry = registry(vec![
            Target::new("clean-all").requires(["clean", "clean-cfg", "clean-test"]),
            Target::new("clean"),
            Target::new("clean-cfg"),
            Target::new("clean-test"),
        ]);
        assert_eq!(
            resolve_names(&registry, "clean-all"),
            vec!["clean", "clean-cfg", "clean-test", "clean-all"]
        );
    }

    #[test]
    fn test_shared_prerequisite_runs_once() {
        // release -> (a, b), a -> base, b -> base
        let registry = registry(vec![
            Target::new("base"),
            Target::new("a").requires(["base"]),
            Target::new("b").requires(["base"]),
            Target::new("release").requires(["a", "b"]),
        ]);
        assert_eq!(resolve_names(&registry, "release"), vec!["base", "a", "b", "release"]);
    }

    #[test]
    fn test_nested_prerequisites_come_first() {
        let registry = registry(vec![
            Target::new("clean"),
            Target::new("build").requires(["clean"]),
            Target::new("publish").requires(["build"]),
        ]);
        assert_eq!(resolve_names(&registry, "publish"), vec!["clean", "build", "publish"]);
    }

    #[test]
    fn test_prerequisites_precede_dependents_in_diamond_graph() {
        let registry = registry(vec![
            Target::new("e"),
            Target::new("d").requires(["e"]),
            Target::new("c").requires(["e", "d"]),
            Target::new("b").requires(["d"]),
            Target::new("a").requires(["b", "c", "e"]),
        ]);
        let plan = DependencyResolver::new(&registry).resolve("a").unwrap();
        let names = plan.names();

        let unique: HashSet<_> = names.iter().collect();
        assert_eq!(unique.len(), names.len());
        assert_eq!(names.last(), Some(&"a"));
        for target in plan.iter() {
            let index = plan.position(&target.name).unwrap();
            for prerequisite in &target.prerequisites {
                assert!(plan.position(prerequisite).unwrap() < index);
            }
        }
    }

    #[test]
    fn test_cycle_is_reported_with_path() {
        let registry = registry(vec![
            Target::new("a").requires(["b"]),
            Target::new("b").requires(["c"]),
            Target::new("c").requires(["a"]),
        ]);
        let err = DependencyResolver::new(&registry).resolve("a").unwrap_err();
        match err {
            LifecycleError::CyclicDependency { cycle } => {
                assert_eq!(cycle, vec!["a", "b", "c", "a"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_cycle_below_requested_target() {
        let registry = registry(vec![
            Target::new("top").requires(["x"]),
            Target::new("x").requires(["y"]),
            Target::new("y").requires(["x"]),
        ]);
        let err = DependencyResolver::new(&registry).resolve("top").unwrap_err();
        assert!(
            matches!(err, LifecycleError::CyclicDependency { ref cycle } if cycle == &["x", "y", "x"])
        );
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let registry = registry(vec![Target::new("loop").requires(["loop"])]);
        let err = DependencyResolver::new(&registry).resolve("loop").unwrap_err();
        assert!(
            matches!(err, LifecycleError::CyclicDependency { ref cycle } if cycle == &["loop", "loop"])
        );
    }

    #[test]
    fn test_undeclared_prerequisite_is_unknown() {
        let registry = registry(vec![Target::new("build").requires(["lint"])]);
        let err = DependencyResolver::new(&registry).resolve("build").unwrap_err();
        assert!(matches!(
            err,
            LifecycleError::UnknownTarget { ref name, ref required_by }
                if name == "lint" && required_by.as_deref() == Some("build")
        ));
    }

    #[test]
    fn test_unknown_requested_target() {
        let registry = registry(vec![Target::new("build")]);
        let err = DependencyResolver::new(&registry).resolve("deploy").unwrap_err();
        assert!(err.is_resolution_error());
    }
}
