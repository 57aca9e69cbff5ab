//! Property-style invariants for the navigation tree and the dashboard grid.
//!
//! Random edit streams are applied to a navigation collection and random
//! dashboards are packed; structural invariants are checked after every step.

use std::collections::{HashMap, HashSet};

use builder_core::{
    add_node, apply_move, pack_group, pack_layout, remove_node, reorder_siblings, reparent, DashboardLayout,
    DropSlot, GridSlot, Group, MoveEvent, NavEdit, NavNode, NewNavNode, Rejection, SpanBounds, WidgetDefinition,
    WidgetPlacement, MAX_DEPTH,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Lcg {
    state: u64,
}

impl Lcg {
    fn new(seed: u64) -> Self {
        Self { state: seed ^ 0x9E37_79B9_7F4A_7C15 }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        self.state >> 11
    }

    fn below(&mut self, n: usize) -> usize {
        debug_assert!(n > 0);
        (self.next_u64() % n as u64) as usize
    }

    fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max);
        min + (self.next_u64() % u64::from(max - min + 1)) as u32
    }
}

fn depth_of(nodes: &[NavNode], id: &str) -> usize {
    let by_id: HashMap<&str, &NavNode> = nodes.iter().map(|n| (n.id.as_str(), n)).collect();
    let mut depth = 0;
    let mut cur = by_id[id];
    while let Some(parent) = cur.parent_id.as_deref() {
        depth += 1;
        assert!(depth <= nodes.len(), "cycle through '{}'", id);
        cur = by_id[parent];
    }
    depth
}

fn assert_tree_invariants(nodes: &[NavNode]) {
    let ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(ids.len(), nodes.len(), "duplicate ids");
    for n in nodes {
        if let Some(p) = n.parent_id.as_deref() {
            assert!(ids.contains(p), "'{}' points at missing parent '{}'", n.id, p);
        }
        assert!(depth_of(nodes, &n.id) <= MAX_DEPTH, "'{}' is too deep", n.id);
    }
}

fn assert_dense_siblings(nodes: &[NavNode], parent: Option<&str>) {
    let mut orders: Vec<i64> = nodes
        .iter()
        .filter(|n| n.parent_id.as_deref() == parent)
        .map(|n| n.order)
        .collect();
    orders.sort_unstable();
    let expected: Vec<i64> = (0..orders.len() as i64).collect();
    assert_eq!(orders, expected, "siblings under {:?} are not 0..k-1", parent);
}

fn assert_unique_sibling_orders(nodes: &[NavNode]) {
    let mut seen: HashSet<(Option<&str>, i64)> = HashSet::new();
    for n in nodes {
        assert!(
            seen.insert((n.parent_id.as_deref(), n.order)),
            "duplicate sibling order {} under {:?} ('{}')",
            n.order,
            n.parent_id,
            n.id
        );
    }
}

fn random_edit(nodes: &[NavNode], rng: &mut Lcg, step: usize) -> (Result<NavEdit, Rejection>, Option<Option<String>>) {
    let pick = |rng: &mut Lcg| nodes[rng.below(nodes.len())].id.clone();
    match (nodes.is_empty(), rng.below(10)) {
        (true, _) | (false, 0..=2) => {
            let parent = if nodes.is_empty() || rng.below(3) == 0 { None } else { Some(pick(rng)) };
            let new = NewNavNode { id: format!("n{step}"), name: String::new(), parent_id: parent, is_visible: true };
            (add_node(nodes, new), None)
        }
        (false, 3..=5) => {
            let dragged = pick(rng);
            let parent = nodes.iter().find(|n| n.id == dragged).and_then(|n| n.parent_id.clone());
            let dest = rng.below(nodes.len() + 1);
            (reorder_siblings(nodes, &dragged, dest, &HashSet::new()), Some(parent))
        }
        (false, 6..=8) => {
            let dragged = pick(rng);
            let target = if rng.below(4) == 0 { None } else { Some(pick(rng)) };
            (reparent(nodes, &dragged, target.as_deref()), None)
        }
        _ => {
            let victim = pick(rng);
            (remove_node(nodes, &victim), None)
        }
    }
}

fn run_nav_sequence(seed: u64, steps: usize) -> Vec<NavNode> {
    let mut nodes: Vec<NavNode> = Vec::new();
    let mut rng = Lcg::new(seed);

    for step in 0..steps {
        let before = nodes.clone();
        let (result, reordered_parent) = random_edit(&nodes, &mut rng, step);
        match result {
            Ok(edit) => {
                assert_tree_invariants(&edit.nodes);
                assert_unique_sibling_orders(&edit.nodes);
                if let Some(parent) = reordered_parent {
                    assert_dense_siblings(&edit.nodes, parent.as_deref());
                }
                nodes = edit.nodes;
            }
            Err(_) => assert_eq!(nodes, before, "rejected edit changed the input at step {step}"),
        }
    }
    nodes
}

fn random_defs(rng: &mut Lcg, count: usize, columns: u32) -> Vec<WidgetDefinition> {
    (0..count)
        .map(|i| {
            let min = rng.range_u32(1, columns);
            let max = rng.range_u32(min, columns);
            let default = rng.range_u32(1, columns);
            WidgetDefinition::new(&format!("w{i}"), Some(min), Some(max), Some(default))
        })
        .collect()
}

fn assert_rows_fit(slots: &[GridSlot], columns: u32) {
    let mut per_row: HashMap<u32, u32> = HashMap::new();
    for s in slots {
        assert!(s.col + s.col_span <= columns, "{:?} runs past the grid", s);
        *per_row.entry(s.row).or_default() += s.col_span;
    }
    for (row, used) in per_row {
        assert!(used <= columns, "row {row} uses {used} of {columns} columns");
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn nav_random_edit_streams_keep_tree_valid(seed in any::<u64>(), steps in 10usize..120) {
        let nodes = run_nav_sequence(seed, steps);
        assert_tree_invariants(&nodes);
    }

    #[test]
    fn packed_groups_fit_rows_and_respect_bounds(
        seed in any::<u64>(),
        count in 0usize..16,
        columns in 1u32..7,
    ) {
        let mut rng = Lcg::new(seed);
        let defs = random_defs(&mut rng, count, columns);
        let placements: Vec<WidgetPlacement> = (0..count)
            .map(|i| WidgetPlacement::new(&format!("w{i}"), None, rng.below(count.max(1)) as i64))
            .collect();

        let packed = pack_group(&placements, &defs, columns);
        assert_rows_fit(&packed.slots, columns);

        let bounds: HashMap<&str, SpanBounds> =
            defs.iter().map(|d| (d.id.as_str(), SpanBounds::resolve(d, columns))).collect();
        for p in &packed.placements {
            let span = p.col_span.expect("every placement with a definition gets a span");
            let b = bounds[p.widget_id.as_str()];
            prop_assert!(b.min <= span && span <= b.max, "{} has span {} outside {:?}", p.widget_id, span, b);
        }
    }

    #[test]
    fn packing_is_idempotent(seed in any::<u64>(), count in 0usize..16, columns in 1u32..7) {
        let mut rng = Lcg::new(seed);
        let defs = random_defs(&mut rng, count, columns);
        let placements: Vec<WidgetPlacement> = (0..count)
            .map(|i| WidgetPlacement::new(&format!("w{i}"), None, i as i64))
            .collect();

        let first = pack_group(&placements, &defs, columns);
        let second = pack_group(&first.placements, &defs, columns);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn moves_keep_destination_dense(seed in any::<u64>(), moves in 1usize..30) {
        let mut rng = Lcg::new(seed);
        let defs = random_defs(&mut rng, 8, 4);
        let mut layout = DashboardLayout {
            groups: vec![Group::new("a", 0), Group::new("b", 1)],
            widgets: (0..8)
                .map(|i| WidgetPlacement::new(&format!("w{i}"), None, i as i64))
                .collect(),
        };
        layout = pack_layout(&layout, &defs, 4).layout;

        for _ in 0..moves {
            let widget_id = format!("w{}", rng.below(8));
            let group_id = match rng.below(3) {
                0 => None,
                1 => Some("a".to_string()),
                _ => Some("b".to_string()),
            };
            let event = MoveEvent {
                widget_id: widget_id.clone(),
                source: DropSlot { group_id: None, index: 0 },
                destination: Some(DropSlot { group_id: group_id.clone(), index: rng.below(9) }),
            };
            let edit = apply_move(&layout, &event, &defs, 4).expect("known widget and group");
            assert_eq!(edit.layout.placement(&widget_id).map(|p| &p.group_id), Some(&group_id));

            let mut orders: Vec<i64> = edit
                .layout
                .widgets
                .iter()
                .filter(|w| w.group_id == group_id)
                .map(|w| w.order)
                .collect();
            orders.sort_unstable();
            prop_assert_eq!(orders.clone(), (0..orders.len() as i64).collect::<Vec<_>>());
            assert_rows_fit(&edit.grids[0].slots, 4);
            layout = edit.layout;
        }
    }
}

#[test]
fn reparent_onto_current_parent_keeps_orders_unique() {
    let nodes = vec![
        NavNode::new("P", None, 0),
        NavNode::new("d", Some("P"), 0),
        NavNode::new("x", Some("P"), 1),
        NavNode::new("y", Some("P"), 2),
    ];
    let edit = reparent(&nodes, "d", Some("P")).expect("same folder is allowed");
    assert_unique_sibling_orders(&edit.nodes);
    assert_dense_siblings(&edit.nodes, Some("P"));
}

#[test]
fn nav_seed_corpus_keeps_tree_valid() {
    let seeds = [0_u64, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, u32::MAX as u64, u64::MAX];
    for seed in seeds {
        let nodes = run_nav_sequence(seed, 200);
        assert_tree_invariants(&nodes);
    }
}
