//! Command execution.
//!
//! Each function takes the [`App`] context plus its parsed arguments and
//! renders results according to the selected [`OutputMode`]. Errors bubble
//! up as `anyhow::Error`; the binary maps them to a non-zero exit code.

use super::args::{
    DepsArgs, ImpactArgs, InfoArgs, InitArgs, ItemAction, ItemArgs, LinkAction, LinkArgs,
    PathArgs, ViewArgs,
};
use crate::app::App;
use crate::commands::init;
use crate::domain::{RelationshipType, WorkItemRef};
use crate::output::{self, color, OutputMode};
use crate::resolver::ItemRecord;
use anyhow::Result;
use std::collections::HashSet;

/// Execute `skein init`.
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let result = init::init(&cwd).await?;
    if !args.quiet {
        println!(
            "{} Initialized skein workspace at {}",
            color::success("ok:"),
            result.skein_dir.display()
        );
    }
    Ok(())
}

/// Execute `skein info`.
pub async fn execute_info(app: &App, _args: &InfoArgs, mode: OutputMode) -> Result<()> {
    let items = app.registry().len().await;
    let edges = app.store().edges().await.len();
    let analyzer = app.store().analyzer();
    let path_len = analyzer.find_critical_path().await.len();
    let blocker_count = analyzer.find_blocking_items().await.len();

    match mode {
        OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "skein_dir": app.skein_dir().display().to_string(),
                "items": items,
                "stored_edges": edges,
                "critical_path_length": path_len,
                "blocking_items": blocker_count,
            }))?;
        }
        OutputMode::Text => {
            println!("Workspace: {}", app.skein_dir().display());
            println!("  items:                {items}");
            println!("  stored edges:         {edges} (complements included)");
            println!("  critical path length: {path_len}");
            println!("  blocking items:       {blocker_count}");
        }
    }
    Ok(())
}

/// Execute `skein item <action>`.
pub async fn execute_item(app: &App, args: &ItemArgs, mode: OutputMode) -> Result<()> {
    match &args.action {
        ItemAction::Add { id, title } => {
            let added = app
                .registry()
                .register(ItemRecord::new(id.as_str(), title.clone()))
                .await;
            app.save().await?;

            match mode {
                OutputMode::Json => output::print_json(&serde_json::json!({
                    "action": "add",
                    "id": id,
                    "added": added,
                }))?,
                OutputMode::Text => {
                    if added {
                        println!("Registered item {}", color::item_id(id));
                    } else {
                        println!("Item {} was already registered", color::item_id(id));
                    }
                }
            }
        }
        ItemAction::Rm { id } => {
            let removed = app.remove_item(&WorkItemRef::new(id.as_str())).await?;
            app.save().await?;

            match mode {
                OutputMode::Json => output::print_json(&serde_json::json!({
                    "action": "rm",
                    "id": id,
                    "removed": removed,
                }))?,
                OutputMode::Text => {
                    if removed {
                        println!("Removed item {}", color::item_id(id));
                    } else {
                        println!("Item {} was not registered", color::item_id(id));
                    }
                }
            }
        }
        ItemAction::List => {
            let records = app.registry().all().await;
            match mode {
                OutputMode::Json => output::print_json(&records)?,
                OutputMode::Text => {
                    if records.is_empty() {
                        println!("No items registered");
                    } else {
                        println!("Registered items ({}):", records.len());
                        for record in &records {
                            let title = record.title.as_deref().unwrap_or("");
                            println!(
                                "  {}  {}  {}",
                                color::item_id(record.id.as_str()),
                                record.registered_at.format("%Y-%m-%d"),
                                title
                            );
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

/// Execute `skein link <action>`.
pub async fn execute_link(app: &App, args: &LinkArgs, mode: OutputMode) -> Result<()> {
    match &args.action {
        LinkAction::Add {
            source,
            target,
            relationship,
        } => {
            let relationship = RelationshipType::from(*relationship);
            let created = app
                .store()
                .add_dependency(
                    &WorkItemRef::new(source.as_str()),
                    &WorkItemRef::new(target.as_str()),
                    relationship,
                )
                .await?;
            app.save().await?;

            match mode {
                OutputMode::Json => output::print_json(&serde_json::json!({
                    "action": "add",
                    "source": source,
                    "target": target,
                    "type": relationship.to_string(),
                    "created": created,
                }))?,
                OutputMode::Text => {
                    if created {
                        println!(
                            "Linked {} --[{}]--> {}",
                            color::item_id(source),
                            color::relationship(relationship),
                            color::item_id(target)
                        );
                    } else {
                        println!("Link already exists");
                    }
                }
            }
        }
        LinkAction::Rm {
            source,
            target,
            relationship,
        } => {
            let relationship = RelationshipType::from(*relationship);
            let removed = app
                .store()
                .remove_dependency(
                    &WorkItemRef::new(source.as_str()),
                    &WorkItemRef::new(target.as_str()),
                    relationship,
                )
                .await?;
            app.save().await?;

            match mode {
                OutputMode::Json => output::print_json(&serde_json::json!({
                    "action": "rm",
                    "source": source,
                    "target": target,
                    "type": relationship.to_string(),
                    "removed": removed,
                }))?,
                OutputMode::Text => {
                    if removed {
                        println!(
                            "Unlinked {} --[{}]--> {}",
                            color::item_id(source),
                            color::relationship(relationship),
                            color::item_id(target)
                        );
                    } else {
                        println!("No such link");
                    }
                }
            }
        }
        LinkAction::List { id } => {
            let edges = app.store().edges_of(&WorkItemRef::new(id.as_str())).await?;
            match mode {
                OutputMode::Json => output::print_json(&edges)?,
                OutputMode::Text => {
                    if edges.is_empty() {
                        println!("No relationships for {}", color::item_id(id));
                    } else {
                        println!("Relationships of {} ({}):", color::item_id(id), edges.len());
                        for edge in &edges {
                            println!("  {}", output::format_edge(edge));
                        }
                    }
                }
            }
        }
        LinkAction::Check { source, target } => {
            let linked = app
                .store()
                .has_dependency(
                    &WorkItemRef::new(source.as_str()),
                    &WorkItemRef::new(target.as_str()),
                )
                .await?;
            match mode {
                OutputMode::Json => output::print_json(&serde_json::json!({
                    "source": source,
                    "target": target,
                    "linked": linked,
                }))?,
                OutputMode::Text => {
                    if linked {
                        println!("{} is linked to {}", color::item_id(source), color::item_id(target));
                    } else {
                        println!(
                            "{} has no link to {}",
                            color::item_id(source),
                            color::item_id(target)
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

/// Execute `skein deps`.
pub async fn execute_deps(app: &App, args: &DepsArgs, mode: OutputMode) -> Result<()> {
    let id = WorkItemRef::new(args.id.as_str());
    let items = if args.reverse {
        app.store().dependents(&id).await?
    } else {
        app.store().direct_dependencies(&id).await?
    };

    match mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "item": args.id,
            "direction": if args.reverse { "dependents" } else { "dependencies" },
            "items": items,
        }))?,
        OutputMode::Text => {
            if items.is_empty() {
                if args.reverse {
                    println!("{} blocks nothing", color::item_id(&args.id));
                } else {
                    println!("{} is not blocked by anything", color::item_id(&args.id));
                }
            } else {
                if args.reverse {
                    println!("Items blocked by {} ({}):", color::item_id(&args.id), items.len());
                } else {
                    println!("Items blocking {} ({}):", color::item_id(&args.id), items.len());
                }
                for item in &items {
                    println!("  {}", color::item_id(item.as_str()));
                }
            }
        }
    }
    Ok(())
}

/// Execute `skein path`.
pub async fn execute_path(app: &App, args: &PathArgs, mode: OutputMode) -> Result<()> {
    let analyzer = app.store().analyzer();

    if args.blockers {
        let blockers = analyzer.find_blocking_items().await;
        match mode {
            OutputMode::Json => output::print_json(&serde_json::json!({
                "blockers": blockers,
                "count": blockers.len(),
            }))?,
            OutputMode::Text => {
                if blockers.is_empty() {
                    println!("No blocking items");
                } else {
                    println!("Blocking items ({}):", blockers.len());
                    for item in &blockers {
                        println!("  {}", color::item_id(item.as_str()));
                    }
                }
            }
        }
    } else {
        let path = analyzer.find_critical_path().await;
        match mode {
            OutputMode::Json => output::print_json(&serde_json::json!({
                "critical_path": path,
                "length": path.len(),
            }))?,
            OutputMode::Text => {
                if path.is_empty() {
                    println!("No blocking dependencies; the critical path is empty");
                } else {
                    println!("Critical path ({} items):", path.len());
                    println!("  {}", output::format_chain(&path));
                }
            }
        }
    }
    Ok(())
}

/// Execute `skein impact`.
pub async fn execute_impact(app: &App, args: &ImpactArgs, mode: OutputMode) -> Result<()> {
    let id = WorkItemRef::new(args.id.as_str());
    let items = app.store().analyzer().find_items_depending_on(&id).await?;

    match mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "item": args.id,
            "blocks": items,
        }))?,
        OutputMode::Text => {
            if items.is_empty() {
                println!("{} blocks nothing", color::item_id(&args.id));
            } else {
                println!(
                    "If {} slips, these items cannot proceed ({}):",
                    color::item_id(&args.id),
                    items.len()
                );
                for item in &items {
                    println!("  {}", color::item_id(item.as_str()));
                }
            }
        }
    }
    Ok(())
}

/// Execute `skein view`.
pub async fn execute_view(app: &App, args: &ViewArgs, mode: OutputMode) -> Result<()> {
    let id = WorkItemRef::new(args.id.as_str());
    let depth = args.depth.unwrap_or(app.config().view_depth);
    let visible: HashSet<RelationshipType> = if args.types.is_empty() {
        RelationshipType::ALL.into_iter().collect()
    } else {
        args.types.iter().map(|&ty| ty.into()).collect()
    };

    let hood = app
        .store()
        .neighborhoods()
        .neighborhood(&id, depth, &visible)
        .await?;

    match mode {
        OutputMode::Json => output::print_json(&hood)?,
        OutputMode::Text => print!("{}", output::render_neighborhood(&hood)),
    }
    Ok(())
}
