//! Synthetic schema trees for benchmarks.

use modelgen_schema::{Identity, SchemaError, SchemaTree, SchemaType, TypeKind};

/// Builds a tree with `interfaces` list entries shaped like an interface model.
///
/// Each entry carries integers, a string, a shared enumeration, a per-entry
/// enumeration, an identity reference, a nested union and a leaf reference.
///
/// # Errors
/// Returns `SchemaError` if an element cannot be added.
pub fn interface_tree(interfaces: usize) -> Result<SchemaTree, SchemaError> {
    let mut tree = SchemaTree::new();
    let family = Identity::new("oc-types", "ADDRESS_FAMILY");
    tree.add_identity(family.clone());

    let root = tree.add_container(None, "interfaces")?;
    for index in 0..interfaces {
        let interface = tree.add_list(Some(root), &format!("interface-{index}"))?;
        tree.add_leaf(Some(interface), "name", SchemaType::leafref("../config/name"))?;

        let config = tree.add_container(Some(interface), "config")?;
        tree.add_leaf(Some(config), "name", SchemaType::new(TypeKind::String))?;
        tree.add_leaf(
            Some(config),
            "mtu",
            SchemaType::new(TypeKind::Uint16).with_default("1500"),
        )?;
        tree.add_leaf(
            Some(config),
            "admin-status",
            SchemaType::enumeration(["UP", "DOWN", "TESTING"]).with_default("UP"),
        )?;
        tree.add_leaf(
            Some(config),
            "speed",
            SchemaType::enumeration([format!("SPEED_{index}G"), "AUTO".to_string()]),
        )?;
        tree.add_leaf(
            Some(config),
            "family",
            SchemaType::identityref(family.clone()),
        )?;
        tree.add_leaf(
            Some(config),
            "vlan",
            SchemaType::union(vec![
                SchemaType::new(TypeKind::Uint16),
                SchemaType::union(vec![
                    SchemaType::new(TypeKind::String),
                    SchemaType::new(TypeKind::Uint16),
                ]),
            ]),
        )?;
    }

    Ok(tree)
}
