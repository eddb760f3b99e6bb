//! Tests for search filtering and derived views.

use sprig::prelude::*;

fn library() -> Vec<TreeNode> {
    vec![
        TreeNode::new("src", "src").with_children(vec![
            TreeNode::new("widgets", "widgets").with_children(vec![
                TreeNode::new("tree", "tree.rs"),
                TreeNode::new("sheet", "bottom_sheet.rs"),
            ]),
            TreeNode::new("lib", "lib.rs"),
        ]),
        TreeNode::new("docs", "Docs")
            .expanded()
            .with_children(vec![
                TreeNode::new("guide", "Guide").child(TreeNode::new("intro", "Intro")),
            ]),
        TreeNode::new("readme", "README.md"),
    ]
}

fn ids(state: &TreeState, view: &TreeView) -> Vec<String> {
    fn walk(state: &TreeState, nodes: &[ViewNode], out: &mut Vec<String>) {
        for node in nodes {
            out.push(state.get(node.index).unwrap().id.to_string());
            walk(state, &node.children, out);
        }
    }
    let mut out = Vec::new();
    walk(state, &view.roots, &mut out);
    out
}

#[test]
fn test_empty_query_is_identity() {
    let state = TreeState::from_forest(library()).unwrap();
    for query in ["", "   ", "\t\n"] {
        let view = state.filter(query);
        assert_eq!(view.query(), None);
        assert_eq!(view.to_forest(&state), state.to_forest());
        assert_eq!(view.len(), state.len());
        assert!(view.matches().is_empty());
    }
}

#[test]
fn test_ancestors_of_matches_expanded() {
    let state = TreeState::from_forest(library()).unwrap();
    let view = state.filter("tree");

    assert_eq!(ids(&state, &view), vec!["src", "widgets", "tree"]);
    let tree = state.index_of("tree").unwrap();
    for ancestor in state.ancestors(tree) {
        assert!(view.find(ancestor).unwrap().expanded);
    }
    // The canonical flags are untouched.
    assert!(!state.node("src").unwrap().expanded);
}

#[test]
fn test_matching_node_keeps_subtree() {
    let state = TreeState::from_forest(library()).unwrap();
    let view = state.filter("widgets");

    assert_eq!(ids(&state, &view), vec!["src", "widgets", "tree", "sheet"]);
    let widgets = view.find(state.index_of("widgets").unwrap()).unwrap();
    assert!(widgets.matched);
    assert!(!widgets.expanded);
}

#[test]
fn test_no_match_is_empty() {
    let state = TreeState::from_forest(library()).unwrap();
    let view = state.filter("nothing like this");
    assert!(view.is_empty());
    assert!(view.rows().is_empty());
    assert_eq!(view.query(), Some("nothing like this"));
}

#[test]
fn test_query_trimmed() {
    let state = TreeState::from_forest(library()).unwrap();
    assert_eq!(state.filter("  intro ").query(), Some("intro"));
    assert_eq!(state.filter("  intro ").len(), 3);
}

#[test]
fn test_multiple_matches_in_preorder() {
    let state = TreeState::from_forest(library()).unwrap();
    let view = state.filter(".rs");
    let matched: Vec<String> = view
        .matches()
        .into_iter()
        .map(|i| state.get(i).unwrap().id.to_string())
        .collect();
    assert_eq!(matched, vec!["tree", "sheet", "lib"]);
}

#[test]
fn test_rows_of_identity_view() {
    let state = TreeState::from_forest(library()).unwrap();
    let rows = state.full_view().rows();
    let visible: Vec<(String, u16)> = rows
        .iter()
        .map(|r| (state.get(r.index).unwrap().id.to_string(), r.depth))
        .collect();
    assert_eq!(
        visible,
        vec![
            ("src".to_string(), 0),
            ("docs".to_string(), 0),
            ("guide".to_string(), 1),
            ("readme".to_string(), 0),
        ]
    );
    assert!(rows[0].has_children && !rows[0].is_expanded);
    assert!(rows[1].is_expanded);
}

#[test]
fn test_mutation_through_view_reaches_canonical_tree() {
    let mut state = TreeState::new(library(), TreeConfig::new(SelectionMode::Checkbox)).unwrap();
    let view = state.filter("bottom");
    let hit = view.matches()[0];
    let id = state.get(hit).unwrap().id.clone();

    state.set_checked(id, true).unwrap();
    assert!(state.node("sheet").unwrap().checked);
    assert!(state.node("widgets").unwrap().indeterminate);

    let forest = view.to_forest(&state);
    assert!(forest[0].children[0].children[0].checked);
}

#[test]
fn test_filter_through_handle() {
    let tree = Tree::with_items(library(), TreeConfig::default()).unwrap();
    let view = tree.filter("GUIDE");
    assert_eq!(view.len(), 3);
    assert!(!tree.is_dirty());
}
