use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use dnd_tree::gesture::{
    BoundsHost, DragEventType, DragNotification, DragStatus, DropOutcome, GestureConfig,
    GestureController, PointerEvent, PointerKind,
};
use dnd_tree::hit_test::{Bounds, Point};
use dnd_tree::layout::RowLayout;
use dnd_tree::tree::{DragType, NodeDescription, NodeId, NodeKey, NodeTree};

type Log = Rc<RefCell<Vec<(DragEventType, Option<String>)>>>;

struct Session {
    tree: NodeTree<String>,
    roots: Vec<NodeKey>,
    host: BoundsHost,
    controller: GestureController<String>,
    log: Log,
    base: Instant,
    serial: u64,
}

impl Session {
    fn new(lists: Vec<Vec<NodeDescription<String>>>, elements: &[(&str, Bounds)]) -> Self {
        let mut tree = NodeTree::new();
        let roots = lists.into_iter().map(|list| tree.from_list(list)).collect();
        let host = elements
            .iter()
            .map(|(id, bounds)| (NodeId::new(*id), *bounds))
            .collect();
        let mut controller = GestureController::new(GestureConfig::default());
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        for kind in [
            DragEventType::DragStart,
            DragEventType::Dragging,
            DragEventType::DragEnd,
        ] {
            let log = Rc::clone(&log);
            controller.subscribe(kind, move |n: &DragNotification<'_, String>| {
                log.borrow_mut()
                    .push((n.kind, n.node.map(|node| node.properties().clone())));
            });
        }
        Self {
            tree,
            roots,
            host,
            controller,
            log,
            base: Instant::now(),
            serial: 0,
        }
    }

    fn send(&mut self, kind: PointerKind, x: f64, y: f64, ms: u64) -> Option<DropOutcome> {
        self.serial += 1;
        let position = Point::new(x, y);
        let event = PointerEvent::new(
            kind,
            position,
            self.base + Duration::from_millis(ms),
            position,
            self.serial,
        );
        self.controller.handle(&mut self.tree, &self.host, &event)
    }

    fn drag(&mut self, from: (f64, f64), to: (f64, f64)) -> Option<DropOutcome> {
        self.send(PointerKind::Down, from.0, from.1, 0);
        self.send(PointerKind::Move, to.0, to.1, 20);
        self.send(PointerKind::Up, to.0, to.1, 30)
    }

    fn payloads(&self, parent: NodeKey) -> Vec<String> {
        self.tree
            .children(parent)
            .iter()
            .map(|k| self.tree.get(*k).unwrap().properties().clone())
            .collect()
    }

    fn count(&self, kind: DragEventType) -> usize {
        self.log.borrow().iter().filter(|(k, _)| *k == kind).count()
    }
}

fn leaf(id: &str) -> NodeDescription<String> {
    NodeDescription::new(id.to_string()).with_id(id)
}

fn row(i: usize) -> Bounds {
    Bounds::new(0.0, i as f64 * 20.0, 100.0, 20.0)
}

#[test]
fn drop_on_right_half_moves_after() {
    let mut s = Session::new(vec![vec![leaf("a"), leaf("b")]], &[("a", row(0)), ("b", row(1))]);
    let outcome = s.drag((10.0, 5.0), (80.0, 35.0)).unwrap();

    assert!(matches!(
        outcome,
        DropOutcome::Sibling {
            insert_before: false,
            drag_type: DragType::Move,
            ..
        }
    ));
    assert_eq!(s.payloads(s.roots[0]), vec!["b", "a"]);
    assert_eq!(s.controller.status(), DragStatus::Normal);
    assert_eq!(s.controller.dragged(), None);
}

#[test]
fn drop_on_top_left_quadrant_inserts_before() {
    let mut s = Session::new(
        vec![vec![leaf("a"), leaf("b"), leaf("c")]],
        &[("a", row(0)), ("b", row(1)), ("c", row(2))],
    );
    s.drag((10.0, 5.0), (20.0, 42.0));
    assert_eq!(s.payloads(s.roots[0]), vec!["b", "a", "c"]);
}

#[test]
fn bottom_left_quadrant_inserts_after() {
    let mut s = Session::new(
        vec![vec![leaf("a"), leaf("b"), leaf("c")]],
        &[("a", row(0)), ("b", row(1)), ("c", row(2))],
    );
    s.drag((10.0, 5.0), (20.0, 58.0));
    assert_eq!(s.payloads(s.roots[0]), vec!["b", "c", "a"]);
}

#[test]
fn container_drop_copies_and_keeps_source() {
    let mut s = Session::new(
        vec![vec![leaf("a"), leaf("box").droppable(true)]],
        &[("a", row(0)), ("box", row(1))],
    );
    let outcome = s.drag((10.0, 5.0), (50.0, 30.0)).unwrap();
    let container = s.tree.key_of(&NodeId::new("box")).unwrap();

    assert!(matches!(outcome, DropOutcome::IntoContainer { .. }));
    assert_eq!(s.payloads(s.roots[0]), vec!["a", "box"]);
    assert_eq!(s.payloads(container), vec!["a"]);
}

#[test]
fn cross_tree_drop_copies() {
    let mut s = Session::new(
        vec![vec![leaf("a")], vec![leaf("x")]],
        &[("a", row(0)), ("x", row(1))],
    );
    let outcome = s.drag((10.0, 5.0), (80.0, 35.0)).unwrap();

    assert!(matches!(
        outcome,
        DropOutcome::Sibling {
            drag_type: DragType::Copy,
            ..
        }
    ));
    assert_eq!(s.payloads(s.roots[0]), vec!["a"]);
    assert_eq!(s.payloads(s.roots[1]), vec!["x", "a"]);
}

#[test]
fn copy_only_nodes_are_never_moved() {
    let mut s = Session::new(
        vec![vec![leaf("a").with_drag_type(DragType::Copy), leaf("b")]],
        &[("a", row(0)), ("b", row(1))],
    );
    s.drag((10.0, 5.0), (80.0, 35.0));
    assert_eq!(s.payloads(s.roots[0]), vec!["a", "b", "a"]);
}

#[test]
fn exactly_one_drag_start_per_gesture() {
    let mut s = Session::new(vec![vec![leaf("a"), leaf("b")]], &[("a", row(0)), ("b", row(1))]);
    s.send(PointerKind::Down, 10.0, 5.0, 0);
    for (i, y) in [12.0, 18.0, 25.0, 32.0].into_iter().enumerate() {
        s.send(PointerKind::Move, 40.0, y, 20 + i as u64);
    }
    s.send(PointerKind::Up, 40.0, 32.0, 40);

    assert_eq!(s.count(DragEventType::DragStart), 1);
    assert_eq!(s.count(DragEventType::Dragging), 4);
    assert_eq!(s.count(DragEventType::DragEnd), 1);
    let log = s.log.borrow();
    assert_eq!(log[0], (DragEventType::DragStart, Some("a".to_string())));
    assert_eq!(
        log.last().cloned(),
        Some((DragEventType::DragEnd, Some("b".to_string())))
    );
}

#[test]
fn threshold_boundary_is_exclusive() {
    let mut s = Session::new(vec![vec![leaf("a")]], &[("a", row(0))]);
    s.send(PointerKind::Down, 10.0, 5.0, 0);
    s.send(PointerKind::Move, 13.0, 9.0, 20);
    assert_eq!(s.controller.status(), DragStatus::Normal);
    s.send(PointerKind::Move, 10.0, 5.0, 10);
    assert_eq!(s.controller.status(), DragStatus::Normal);
    s.send(PointerKind::Move, 16.0, 5.0, 10);
    assert_eq!(s.controller.status(), DragStatus::Normal);
    s.send(PointerKind::Move, 16.0, 5.0, 11);
    assert_eq!(s.controller.status(), DragStatus::Dragging);
    assert_eq!(s.count(DragEventType::DragStart), 1);
}

#[test]
fn release_outside_every_element_changes_nothing() {
    let mut s = Session::new(vec![vec![leaf("a"), leaf("b")]], &[("a", row(0)), ("b", row(1))]);
    let outcome = s.drag((10.0, 5.0), (300.0, 300.0));

    assert_eq!(outcome, Some(DropOutcome::Nothing));
    assert_eq!(s.payloads(s.roots[0]), vec!["a", "b"]);
    assert_eq!(s.log.borrow().last().cloned(), Some((DragEventType::DragEnd, None)));
}

#[test]
fn release_after_click_is_not_a_drop() {
    let mut s = Session::new(vec![vec![leaf("a"), leaf("b")]], &[("a", row(0)), ("b", row(1))]);
    s.send(PointerKind::Down, 10.0, 5.0, 0);
    assert_eq!(s.send(PointerKind::Up, 10.0, 5.0, 50), None);
    // the press is gone, so a later move cannot start a drag
    s.send(PointerKind::Move, 80.0, 35.0, 100);
    assert_eq!(s.controller.status(), DragStatus::Normal);
    assert!(s.log.borrow().is_empty());
}

#[test]
fn listener_removed_with_off_stops_firing() {
    let mut s = Session::new(vec![vec![leaf("a"), leaf("b")]], &[("a", row(0)), ("b", row(1))]);
    let hits = Rc::new(RefCell::new(0));
    let counter = Rc::clone(&hits);
    let listener = s
        .controller
        .subscribe(DragEventType::DragEnd, move |_: &DragNotification<'_, String>| {
            *counter.borrow_mut() += 1;
        });
    assert!(!s.controller.on(DragEventType::DragEnd, listener.clone()));

    s.drag((10.0, 5.0), (80.0, 35.0));
    assert_eq!(*hits.borrow(), 1);

    assert!(s.controller.off(DragEventType::DragEnd, &listener));
    s.drag((10.0, 25.0), (80.0, 5.0));
    assert_eq!(*hits.borrow(), 1);
}

#[test]
fn row_layout_drives_a_nested_move() {
    let mut tree = NodeTree::new();
    let root = tree.from_list(vec![
        leaf("a"),
        leaf("box").droppable(true).with_child(leaf("inner")),
    ]);
    let mut controller: GestureController<String> = GestureController::default();
    let layout = RowLayout::default();
    let base = Instant::now();
    // rows: root 0..20, a 20..40, box 40..60, inner 60..80 (indent 10)
    let steps = [
        (PointerKind::Down, 50.0, 25.0, 0),
        (PointerKind::Move, 30.0, 62.0, 20),
        (PointerKind::Up, 30.0, 62.0, 30),
    ];
    for (serial, (kind, x, y, ms)) in steps.into_iter().enumerate() {
        let host = layout.host(&tree, root);
        let p = Point::new(x, y);
        let event = PointerEvent::new(kind, p, base + Duration::from_millis(ms), p, serial as u64);
        controller.handle(&mut tree, &host, &event);
    }

    let container = tree.key_of(&NodeId::new("box")).unwrap();
    let inside: Vec<_> = tree
        .children(container)
        .iter()
        .map(|k| tree.get(*k).unwrap().properties().clone())
        .collect();
    assert_eq!(inside, vec!["a", "inner"]);
    assert_eq!(tree.children(root).len(), 1);
    let moved = tree.children(container)[0];
    assert_eq!(tree.get(moved).unwrap().depth(), 2);
}
