// tests/walker_tests.rs

use query_walker::ast::{Tag, TreeNode};
use query_walker::handlers::{Event, EventRecorder, Hook};
use query_walker::{QueryError, WalkOptions, Walker, walk};

fn eq(column: &str, value: &str) -> TreeNode {
    TreeNode::binary(Tag::Eq, TreeNode::column(column), TreeNode::number(value))
}

fn record(tree: &TreeNode) -> EventRecorder {
    let mut recorder = EventRecorder::new();
    walk(Some(tree), &mut recorder).unwrap();
    recorder
}

fn ops(items: &[&str]) -> Vec<Option<String>> {
    items.iter().map(|s| Some(s.to_string())).collect()
}

fn ev(hook: Hook, operands: &[&str]) -> Event {
    Event {
        hook,
        operands: ops(operands),
    }
}

fn nested_nots(levels: usize) -> TreeNode {
    let mut tree = TreeNode::unary(Tag::IsNull, TreeNode::column("a"));
    for _ in 0..levels {
        tree = TreeNode::unary(Tag::Not, tree);
    }
    tree
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_absent_root_fires_nothing() {
    let mut recorder = EventRecorder::new();
    walk(None::<&TreeNode>, &mut recorder).unwrap();
    assert!(recorder.events().is_empty());
}

#[test]
fn test_start_and_stop_bracket_the_walk() {
    let recorder = record(&eq("a", "1"));
    let hooks = recorder.hooks();
    assert_eq!(hooks.first(), Some(&Hook::StartProcessing));
    assert_eq!(hooks.last(), Some(&Hook::StopProcessing));
    assert_eq!(recorder.events()[0].operands, ops(&["EQ"]));
}

#[test]
fn test_where_marker_is_skipped() {
    let tree = TreeNode::unary(Tag::Where, eq("a", "1"));
    let recorder = record(&tree);
    assert_eq!(
        recorder.hooks(),
        vec![Hook::StartProcessing, Hook::StopProcessing]
    );
}

#[test]
fn test_leaf_root_produces_no_callback_and_no_error() {
    for leaf in [
        TreeNode::column("a"),
        TreeNode::number("1"),
        TreeNode::list(vec![TreeNode::number("1")]),
        TreeNode::leaf(Tag::Identifier, "d"),
    ] {
        let recorder = record(&leaf);
        assert_eq!(
            recorder.hooks(),
            vec![Hook::StartProcessing, Hook::StopProcessing]
        );
    }
}

// ============================================================================
// In-order dispatch
// ============================================================================

#[test]
fn test_comparison_callback_sits_between_operands() {
    // EQ(AND(EQ(a,1), EQ(b,2)), EQ(c,3))
    let tree = TreeNode::binary(
        Tag::Eq,
        TreeNode::binary(Tag::And, eq("a", "1"), eq("b", "2")),
        eq("c", "3"),
    );
    let recorder = record(&tree);

    assert_eq!(
        recorder.events(),
        &[
            ev(Hook::StartProcessing, &["EQ"]),
            ev(Hook::PreAnd, &["EQ", "EQ"]),
            ev(Hook::Equals, &["a", "1"]),
            ev(Hook::And, &["EQ", "EQ"]),
            ev(Hook::Equals, &["b", "2"]),
            ev(Hook::PostAnd, &["EQ", "EQ"]),
            ev(Hook::Equals, &["AND", "EQ"]),
            ev(Hook::Equals, &["c", "3"]),
            ev(Hook::StopProcessing, &[]),
        ]
    );
}

#[test]
fn test_each_binary_tag_maps_to_its_callback() {
    let cases = [
        (Tag::Eq, Hook::Equals),
        (Tag::Neq, Hook::NotEquals),
        (Tag::Gt, Hook::GreaterThan),
        (Tag::Gteq, Hook::GreaterOrEquals),
        (Tag::Lt, Hook::LessThan),
        (Tag::Lteq, Hook::LessOrEquals),
        (Tag::Like, Hook::IsLike),
        (Tag::NotLike, Hook::IsNotLike),
        (Tag::In, Hook::In),
        (Tag::NotIn, Hook::NotIn),
        (Tag::InAny, Hook::InAny),
        (Tag::NotInAny, Hook::NotInAny),
        (Tag::EqAny, Hook::EqAny),
    ];

    for (tag, hook) in cases {
        let tree = TreeNode::binary(tag, TreeNode::column("x"), TreeNode::string("'v'"));
        let recorder = record(&tree);
        assert_eq!(
            recorder.hooks(),
            vec![Hook::StartProcessing, hook, Hook::StopProcessing],
            "tag {}",
            tag
        );
        assert_eq!(recorder.events()[1].operands, ops(&["x", "'v'"]));
    }
}

#[test]
fn test_or_brackets_its_operands() {
    let tree = TreeNode::binary(Tag::Or, eq("a", "1"), eq("b", "2"));
    assert_eq!(
        record(&tree).hooks(),
        vec![
            Hook::StartProcessing,
            Hook::PreOr,
            Hook::Equals,
            Hook::Or,
            Hook::Equals,
            Hook::PostOr,
            Hook::StopProcessing,
        ]
    );
}

#[test]
fn test_not_wraps_its_operand() {
    let tree = TreeNode::unary(Tag::Not, TreeNode::binary(Tag::Or, eq("a", "1"), eq("b", "2")));
    assert_eq!(
        record(&tree).hooks(),
        vec![
            Hook::StartProcessing,
            Hook::PreNot,
            Hook::Not,
            Hook::PreOr,
            Hook::Equals,
            Hook::Or,
            Hook::Equals,
            Hook::PostOr,
            Hook::PostNot,
            Hook::StopProcessing,
        ]
    );
}

#[test]
fn test_bracketing_hooks_fire_once_per_node() {
    // (a=1 AND b=2) AND (c=3 OR NOT d=4)
    let tree = TreeNode::binary(
        Tag::And,
        TreeNode::binary(Tag::And, eq("a", "1"), eq("b", "2")),
        TreeNode::binary(
            Tag::Or,
            eq("c", "3"),
            TreeNode::unary(Tag::Not, eq("d", "4")),
        ),
    );
    let hooks = record(&tree).hooks();
    let count = |h: Hook| hooks.iter().filter(|x| **x == h).count();

    assert_eq!(count(Hook::PreAnd), 2);
    assert_eq!(count(Hook::PostAnd), 2);
    assert_eq!(count(Hook::PreOr), 1);
    assert_eq!(count(Hook::PostOr), 1);
    assert_eq!(count(Hook::PreNot), 1);
    assert_eq!(count(Hook::PostNot), 1);

    // Outer AND opens first and closes last.
    assert_eq!(hooks[1], Hook::PreAnd);
    assert_eq!(hooks[hooks.len() - 2], Hook::PostAnd);
}

#[test]
fn test_null_tests_fire_before_their_operand() {
    let tree = TreeNode::binary(
        Tag::And,
        TreeNode::unary(Tag::IsNull, TreeNode::column("a")),
        TreeNode::unary(Tag::IsNotNull, TreeNode::column("b")),
    );
    let recorder = record(&tree);
    let events = recorder.events();
    assert_eq!(events[2], ev(Hook::IsNull, &["a"]));
    assert_eq!(events[4], ev(Hook::IsNotNull, &["b"]));
}

#[test]
fn test_eq_any_passes_literal_first() {
    let tree = TreeNode::binary(Tag::EqAny, TreeNode::string("'red'"), TreeNode::column("colors"));
    assert_eq!(record(&tree).events()[1].operands, ops(&["'red'", "colors"]));
}

// ============================================================================
// Functions
// ============================================================================

#[test]
fn test_single_argument_function_has_no_column() {
    for (tag, hook) in [
        (Tag::Contains, Hook::Contains),
        (Tag::InFolder, Hook::InFolder),
        (Tag::InTree, Hook::InTree),
    ] {
        let tree = TreeNode::unary(tag, TreeNode::string("'abc'"));
        let recorder = record(&tree);
        assert_eq!(
            recorder.events()[1],
            Event {
                hook,
                operands: vec![None, Some("'abc'".to_string())],
            }
        );
    }
}

#[test]
fn test_qualified_function_passes_both_children() {
    let tree = TreeNode::binary(
        Tag::InFolder,
        TreeNode::leaf(Tag::Identifier, "d"),
        TreeNode::string("'folder-1'"),
    );
    assert_eq!(record(&tree).events()[1].operands, ops(&["d", "'folder-1'"]));
}

#[test]
fn test_function_evaluation_order() {
    // Children that produce callbacks of their own make the order visible.
    let one = TreeNode::unary(Tag::Contains, TreeNode::unary(Tag::IsNull, TreeNode::column("a")));
    assert_eq!(
        record(&one).hooks(),
        vec![Hook::StartProcessing, Hook::Contains, Hook::IsNull, Hook::StopProcessing]
    );

    let two = TreeNode::binary(
        Tag::InTree,
        TreeNode::branch(Tag::Score, vec![]),
        TreeNode::unary(Tag::IsNull, TreeNode::column("a")),
    );
    assert_eq!(
        record(&two).hooks(),
        vec![
            Hook::StartProcessing,
            Hook::Score,
            Hook::InTree,
            Hook::IsNull,
            Hook::StopProcessing,
        ]
    );
}

#[test]
fn test_score_has_no_operands() {
    let recorder = record(&TreeNode::branch(Tag::Score, vec![]));
    assert_eq!(recorder.events()[1], ev(Hook::Score, &[]));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_handler_error_aborts_without_stop() {
    let tree = TreeNode::binary(Tag::And, eq("a", "1"), eq("b", "2"));
    let mut recorder = EventRecorder::failing_at(Hook::And);
    let err = walk(Some(&tree), &mut recorder).unwrap_err();

    assert!(matches!(err, QueryError::Handler(_)));
    assert_eq!(
        recorder.hooks(),
        vec![Hook::StartProcessing, Hook::PreAnd, Hook::Equals, Hook::And]
    );
}

#[test]
fn test_failing_start_fires_nothing_else() {
    let mut recorder = EventRecorder::failing_at(Hook::StartProcessing);
    assert!(walk(Some(&eq("a", "1")), &mut recorder).is_err());
    assert_eq!(recorder.hooks(), vec![Hook::StartProcessing]);
}

// ============================================================================
// Depth guard
// ============================================================================

#[test]
fn test_depth_at_limit_is_accepted() {
    let tree = eq("a", "1");
    assert_eq!(tree.depth(), 2);

    let walker = Walker::new(WalkOptions::new().with_max_depth(2));
    let mut recorder = EventRecorder::new();
    walker.walk(Some(&tree), &mut recorder).unwrap();
    assert_eq!(recorder.hooks().len(), 3);
}

#[test]
fn test_depth_over_limit_is_rejected() {
    let walker = Walker::new(WalkOptions::new().with_max_depth(1));
    let mut recorder = EventRecorder::new();
    let err = walker.walk(Some(&eq("a", "1")), &mut recorder).unwrap_err();

    assert_eq!(err, QueryError::QueryTooComplex { limit: 1 });
    assert_eq!(recorder.hooks(), vec![Hook::StartProcessing]);
}

#[test]
fn test_default_limit_rejects_deep_nesting() {
    let tree = nested_nots(300);
    let mut recorder = EventRecorder::new();
    let err = walk(Some(&tree), &mut recorder).unwrap_err();
    assert_eq!(err, QueryError::QueryTooComplex { limit: 256 });
}

#[test]
fn test_unbounded_walker_accepts_deep_nesting() {
    let tree = nested_nots(300);
    let walker = Walker::new(WalkOptions::new().unbounded());
    let mut recorder = EventRecorder::new();
    walker.walk(Some(&tree), &mut recorder).unwrap();

    let nots = recorder.hooks().iter().filter(|h| **h == Hook::Not).count();
    assert_eq!(nots, 300);
}

// ============================================================================
// Reentrancy
// ============================================================================

#[test]
fn test_one_walker_many_threads() {
    let walker = Walker::default();
    let trees: Vec<TreeNode> = (0..4).map(|i| eq("a", &i.to_string())).collect();

    std::thread::scope(|s| {
        for tree in &trees {
            let walker = &walker;
            s.spawn(move || {
                let mut recorder = EventRecorder::new();
                walker.walk(Some(tree), &mut recorder).unwrap();
                assert_eq!(recorder.hooks().len(), 3);
            });
        }
    });
}
