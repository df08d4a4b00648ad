use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use clap::Parser;
use dnd_tree::config::GestureArgs;
use dnd_tree::gesture::{
    BoundsHost, DragEventType, DragNotification, DropOutcome, GestureConfig, GestureController,
    PointerEvent,
};
use dnd_tree::hit_test::Point;
use dnd_tree::layout::RowLayout;
use dnd_tree::tree::{DragType, NodeDescription, NodeKey, NodeTree, Properties, load_list};
use serde::Serialize;

mod script;

use script::{ReplayError, Script};

#[derive(Parser, Debug)]
#[command(
    name = "dnd-replay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Replay a pointer script over a node tree and print the resulting tree"
)]
struct ReplayCli {
    /// JSON array of node descriptions.
    #[arg(short = 't', long = "tree", value_name = "FILE")]
    tree: PathBuf,

    /// JSON pointer script: `{ "elements"?: [...], "events": [...] }`.
    #[arg(short = 's', long = "script", value_name = "FILE")]
    script: PathBuf,

    /// Append debug logs to this file.
    #[arg(long = "log", value_name = "FILE")]
    log: Option<PathBuf>,

    #[command(flatten)]
    gesture: GestureArgs,
}

fn main() -> io::Result<()> {
    let cli = ReplayCli::parse();
    let config = GestureConfig::try_from(&cli.gesture)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;
    dnd_tree::tracing_sub::init_default(cli.log.as_deref())?;

    let list = load_list::<Properties>(&cli.tree).map_err(ReplayError::from)?;
    let script = Script::load(&cli.script)?;
    let report = replay(list, &script, config);
    let json = serde_json::to_string_pretty(&report).map_err(ReplayError::Report)?;
    println!("{json}");
    Ok(())
}

#[derive(Debug, Serialize)]
struct DropReport {
    serial: u64,
    outcome: String,
}

#[derive(Debug, Serialize)]
struct Report {
    notifications: Vec<String>,
    drops: Vec<DropReport>,
    tree: Vec<NodeDescription<Properties>>,
}

fn replay(
    list: Vec<NodeDescription<Properties>>,
    script: &Script,
    config: GestureConfig,
) -> Report {
    let mut tree = NodeTree::new();
    let root = tree.from_list(list);
    let mut controller = GestureController::new(config);
    let notifications = record_notifications(&mut controller);

    let fixed: Option<BoundsHost> = script.elements.as_ref().map(|elements| {
        elements
            .iter()
            .map(|element| (element.id.clone(), element.bounds))
            .collect()
    });

    tracing::debug!(
        steps = script.events.len(),
        fixed_geometry = fixed.is_some(),
        "replaying script"
    );
    let base = Instant::now();
    let mut drops = Vec::new();
    for (index, step) in script.events.iter().enumerate() {
        let serial = index as u64 + 1;
        let position = Point::new(step.x, step.y);
        let event = PointerEvent::new(
            step.kind.into(),
            position,
            base + Duration::from_millis(step.at_ms),
            position,
            serial,
        );
        let host = match &fixed {
            Some(host) => host.clone(),
            None => RowLayout::default().host(&tree, root),
        };
        if let Some(outcome) = controller.handle(&mut tree, &host, &event) {
            drops.push(DropReport {
                serial,
                outcome: describe_outcome(&tree, outcome),
            });
        }
    }

    let notifications = notifications.borrow().clone();
    Report {
        notifications,
        drops,
        tree: tree.to_list(root),
    }
}

fn record_notifications(
    controller: &mut GestureController<Properties>,
) -> Rc<RefCell<Vec<String>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    for kind in [
        DragEventType::DragStart,
        DragEventType::Dragging,
        DragEventType::DragEnd,
    ] {
        let log = Rc::clone(&log);
        controller.subscribe(kind, move |n: &DragNotification<'_, Properties>| {
            let node = n
                .node
                .map_or_else(|| "-".to_string(), |node| node.id().to_string());
            log.borrow_mut().push(format!("{} {node}", n.kind));
        });
    }
    log
}

fn id_of(tree: &NodeTree<Properties>, key: Option<NodeKey>) -> String {
    key.and_then(|key| tree.get(key))
        .map_or_else(|| "nothing".to_string(), |node| node.id().to_string())
}

fn describe_outcome(tree: &NodeTree<Properties>, outcome: DropOutcome) -> String {
    match outcome {
        DropOutcome::IntoContainer {
            container,
            inserted,
        } => format!(
            "copied {} into {}",
            id_of(tree, inserted),
            id_of(tree, Some(container))
        ),
        DropOutcome::Sibling {
            target,
            inserted,
            insert_before,
            drag_type,
        } => format!(
            "{} {} {} {}",
            match drag_type {
                DragType::Move => "moved",
                DragType::Copy => "copied",
            },
            id_of(tree, inserted),
            if insert_before { "before" } else { "after" },
            id_of(tree, Some(target))
        ),
        DropOutcome::Nothing => "nothing".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnd_tree::tree::parse_list;
    use indoc::indoc;

    fn labels(list: &[NodeDescription<Properties>]) -> Vec<String> {
        list.iter()
            .map(|desc| desc.id.as_ref().map(ToString::to_string).unwrap_or_default())
            .collect()
    }

    #[test]
    fn row_layout_reorder() {
        // rows: synthetic root 0..20, a 20..40, b 40..60 (indent 10)
        let list = parse_list(r#"[{ "id": "a" }, { "id": "b" }]"#).unwrap();
        let script = Script::parse(indoc! {r#"
            { "events": [
                { "kind": "down", "x": 20, "y": 25 },
                { "kind": "move", "x": 80, "y": 55, "atMs": 20 },
                { "kind": "up", "x": 80, "y": 55, "atMs": 30 }
            ] }
        "#})
        .unwrap();
        let report = replay(list, &script, GestureConfig::default());

        assert_eq!(report.drops.len(), 1);
        assert_eq!(report.drops[0].serial, 3);
        assert!(report.drops[0].outcome.starts_with("moved "));
        assert!(report.drops[0].outcome.ends_with(" after b"));
        assert_eq!(report.tree.len(), 2);
        assert_eq!(report.tree[0].id.as_ref().unwrap().as_str(), "b");
        assert_ne!(report.tree[1].id.as_ref().unwrap().as_str(), "a");
        assert_eq!(
            report.notifications.first().map(String::as_str),
            Some("dragstart a")
        );
        assert_eq!(
            report.notifications.last().map(String::as_str),
            Some("dragend b")
        );
    }

    #[test]
    fn fixed_elements_container_drop_keeps_source() {
        let list = parse_list(r#"[{ "id": "a" }, { "id": "box", "droppable": true }]"#).unwrap();
        let script = Script::parse(indoc! {r#"
            {
              "elements": [
                { "id": "a", "left": 0, "top": 0, "width": 100, "height": 20 },
                { "id": "box", "left": 0, "top": 20, "width": 100, "height": 20 }
              ],
              "events": [
                { "kind": "down", "x": 10, "y": 5 },
                { "kind": "move", "x": 50, "y": 30, "atMs": 20 },
                { "kind": "up", "x": 50, "y": 30, "atMs": 30 }
              ]
            }
        "#})
        .unwrap();
        let report = replay(list, &script, GestureConfig::default());

        assert_eq!(labels(&report.tree), vec!["a", "box"]);
        assert_eq!(report.tree[1].children.len(), 1);
        assert!(report.drops[0].outcome.ends_with("into box"));
    }

    #[test]
    fn click_without_drag_changes_nothing() {
        let list = parse_list(r#"[{ "id": "a" }, { "id": "b" }]"#).unwrap();
        let script = Script::parse(indoc! {r#"
            { "events": [
                { "kind": "down", "x": 20, "y": 25 },
                { "kind": "move", "x": 22, "y": 26, "atMs": 50 },
                { "kind": "up", "x": 22, "y": 26, "atMs": 60 }
            ] }
        "#})
        .unwrap();
        let report = replay(list, &script, GestureConfig::default());

        assert!(report.drops.is_empty());
        assert!(report.notifications.is_empty());
        assert_eq!(labels(&report.tree), vec!["a", "b"]);
    }
}
