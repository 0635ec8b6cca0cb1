use anyhow::Context;
use sobject_explorer::config::loader::ConfigLoader;
use sobject_explorer::models::{Node, NodeAddress, ObjectNode};
use sobject_explorer::observability::init_logging;
use sobject_explorer::{SObjectExplorer, create_explorer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ConfigLoader::load().context("failed to load configuration")?;
    let _guard = init_logging(&config.logging)?;
    info!("Configuration loaded successfully");

    let explorer = create_explorer(&config)?;
    info!("sObject Explorer initialized");

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.as_slice() {
        [] => print_roots(&explorer).await,
        [cmd] if cmd == "refresh" => {
            explorer.refresh().await?;
            print_roots(&explorer).await
        }
        [object] => print_fields(&explorer, object).await,
        [object, field] => {
            let catalog = explorer.catalog().await?;
            let entry = catalog
                .get(object)
                .with_context(|| format!("unknown sObject {}", object))?;
            let address = NodeAddress::field(entry.resource_id(), field);
            print!("{}", explorer.render_address(&address.to_string()).await?);
            Ok(())
        }
        _ => anyhow::bail!("usage: sobject-explorer [refresh | <sObject> [<field>]]"),
    }
}

async fn print_roots(explorer: &SObjectExplorer) -> anyhow::Result<()> {
    let children = explorer.children(None).await;
    if let Some(reason) = children.degraded {
        anyhow::bail!("sObjects unavailable: {}", reason);
    }
    for node in children.nodes {
        println!("{}", node.label());
    }
    Ok(())
}

async fn print_fields(explorer: &SObjectExplorer, object: &str) -> anyhow::Result<()> {
    let catalog = explorer.catalog().await?;
    let entry = catalog
        .get(object)
        .with_context(|| format!("unknown sObject {}", object))?;

    let node = Node::Object(ObjectNode::new(entry.clone()));
    let children = explorer.children(Some(&node)).await;
    if let Some(reason) = children.degraded {
        anyhow::bail!("cannot describe {}: {}", object, reason);
    }
    for field in children.nodes {
        if let Node::Field(field) = field {
            println!("{}\t{}", field.name(), field.field_type());
        }
    }
    Ok(())
}
