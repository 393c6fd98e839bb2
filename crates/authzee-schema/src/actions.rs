//! I compute the deterministic action-name union used by the grant schema.
//!

use authzee_model::ResourceDef;

/// The ordered union of every action across `resource_defs`, de-duplicated
/// preserving first occurrence (§3 invariant, §8 boundary behavior: "resource
/// -def order, then action-def order").
#[must_use]
pub fn action_union(resource_defs: &[ResourceDef]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut union = Vec::new();
    for def in resource_defs {
        for action in &def.actions {
            if seen.insert(action.clone()) {
                union.push(action.clone());
            }
        }
    }
    union
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn resource(resource_type: &str, actions: &[&str]) -> ResourceDef {
        ResourceDef {
            resource_type: resource_type.to_string(),
            actions: actions.iter().map(|a| a.to_string()).collect(),
            schema: json!({"type": "object"}),
            parent_types: Default::default(),
            child_types: Default::default(),
        }
    }

    #[test]
    fn dedupes_preserving_first_occurrence() {
        // S6: two resource defs with actions ["read","write"] and
        // ["write","exec"] ⇒ ["read","write","exec"].
        let defs = vec![
            resource("Doc", &["read", "write"]),
            resource("Folder", &["write", "exec"]),
        ];
        assert_eq!(
            action_union(&defs),
            vec!["read".to_string(), "write".to_string(), "exec".to_string()]
        );
    }

    #[test]
    fn empty_defs_yield_empty_union() {
        assert!(action_union(&[]).is_empty());
    }
}
