//! Example lowering of a small interface model.
//!
//! Run with: `RUST_LOG=debug cargo run --example lower_schema`

use modelgen::prelude::*;
use tracing_subscriber::EnvFilter;

fn build_tree() -> Result<SchemaTree, SchemaError> {
    let mut tree = SchemaTree::new();
    let address_family = Identity::new("oc-types", "ADDRESS_FAMILY");
    tree.add_identity(address_family.clone());

    let interfaces = tree.add_container(None, "interfaces")?;
    let interface = tree.add_list(Some(interfaces), "interface")?;
    tree.add_leaf(
        Some(interface),
        "name",
        SchemaType::leafref("../config/name"),
    )?;

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
        "duplex",
        SchemaType::enumeration(["FULL", "HALF"])
            .with_typedef("duplex-mode")
            .with_default("FULL"),
    )?;
    tree.add_leaf(
        Some(config),
        "family",
        SchemaType::identityref(address_family).with_default("oc-types:IPV4"),
    )?;
    tree.add_leaf(
        Some(config),
        "vlan",
        SchemaType::union(vec![
            SchemaType::new(TypeKind::Uint16),
            SchemaType::union(vec![
                SchemaType::new(TypeKind::String),
                SchemaType::enumeration(["TRUNK"]),
            ]),
        ]),
    )?;
    tree.add_leaf(Some(config), "loop", SchemaType::leafref("../loop"))?;

    Ok(tree)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let tree = build_tree()?;

    for compress in [false, true] {
        let config = LoweringConfig::new().compress_paths(compress);
        let report = lower_schema(&tree, config);

        tracing::info!("compress_paths = {}", compress);
        for (path, mapped) in &report.mapped {
            println!(
                "{:<45} {:<35} zero={:<4} default={}",
                path,
                mapped.native_type,
                mapped.zero_value,
                mapped.default_value.as_deref().unwrap_or("-")
            );
        }
        for failure in &report.failures {
            println!("{:<45} error: {}", failure.path, failure.error);
        }
        println!();
    }

    let report = lower_schema(&tree, LoweringConfig::default());
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
