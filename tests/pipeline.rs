//! End-to-end tests: formatted log lines in, rendered tree out

use std::collections::HashSet;

use branchtree::git::LogEntry;
use branchtree::tree::{Status, Tree};
use branchtree::ui::render;
use branchtree::{Error, Result};

fn parse(lines: &[&str]) -> Vec<Result<LogEntry>> {
    lines.iter().map(|line| line.parse()).collect()
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|n| n.to_string()).collect()
}

fn build(head: &str, tracked: &[&str], lines: &[&str], include_commits: bool) -> Tree {
    let remote = HashSet::new();
    Tree::from_history(Some(head), &names(tracked), &remote, parse(lines), include_commits)
        .unwrap()
}

fn commit_ids(tree: &Tree, name: &str) -> Vec<String> {
    tree.find_by_name(name)
        .unwrap()
        .commits
        .iter()
        .map(|c| c.id.clone())
        .collect()
}

fn child_names(tree: &Tree, name: &str) -> Vec<String> {
    let branch = tree.find_by_name(name).unwrap();
    tree.children(branch).map(|b| b.display_name()).collect()
}

const LINEAR: &[&str] = &[
    "[C:d43991b][P:e5b122a][R:HEAD -> fixes][M:Fix the parser]",
    "[C:e5b122a][P:7a1113e][R:][M:Add parser tests]",
    "[C:7a1113e][P:b299199][R:][M:Start fixes]",
    "[C:96a5deb][P:7f55dee][R:feature, origin/feature][M:Feature done]",
    "[C:7f55dee][P:b299199][R:][M:Start feature]",
    "[C:b299199][P:2248903][R:master, tag: v1.0][M:Release]",
    "[C:2248903][P:][R:][M:Initial commit]",
];

#[test]
fn test_single_branch_single_commit() {
    let lines = ["[C:210d73e][P:][R:HEAD -> master][M:Commit message]"];
    let tree = build("210d73e", &["master"], &lines, true);

    assert_eq!(tree.len(), 1);
    assert_eq!(tree.root().id, "210d73e");
    assert_eq!(tree.active().map(|b| b.id.as_str()), Some("210d73e"));
    assert_eq!(commit_ids(&tree, "master"), ["210d73e"]);
    assert_eq!(render(&tree, false), ["╭●  [master]"]);
}

#[test]
fn test_linear_history_with_feature_branch() {
    let tree = build("d43991b", &["master", "feature", "fixes"], LINEAR, true);

    assert_eq!(tree.root().id, "b299199");
    assert_eq!(commit_ids(&tree, "master"), ["b299199"]);
    assert_eq!(commit_ids(&tree, "fixes"), ["d43991b", "e5b122a", "7a1113e"]);
    assert_eq!(commit_ids(&tree, "feature"), ["96a5deb", "7f55dee"]);
    assert_eq!(child_names(&tree, "master"), ["fixes", "feature"]);

    assert_eq!(
        render(&tree, false),
        ["  ╭●  [fixes]", "  ├○  [feature]", "╭○╯ [master]"]
    );
}

#[test]
fn test_render_with_commits_and_status() {
    let mut tree = build("d43991b", &["master", "feature", "fixes"], LINEAR, true);
    tree.set_status(Status {
        staged: false,
        unstaged: true,
        untracked: true,
    });

    assert_eq!(
        render(&tree, true),
        [
            "  ╭●  [fixes]",
            "  │   ~ unstaged changes",
            "  │   ? untracked files",
            "  │   ‣ d43991b Fix the parser",
            "  │   ‣ e5b122a Add parser tests",
            "  │   ‣ 7a1113e Start fixes",
            "  ├○  [feature]",
            "  │   ‣ 96a5deb Feature done",
            "  │   ‣ 7f55dee Start feature",
            "╭○╯ [master]",
            "│   ‣ b299199 Release",
        ]
    );
}

#[test]
fn test_reading_stops_at_root() {
    // Anything past the root would fail to parse if it were read
    let mut lines = LINEAR[..6].to_vec();
    lines.push("not a log line");

    let tree = build("d43991b", &["master", "feature", "fixes"], &lines, false);

    assert_eq!(tree.root().id, "b299199");
    assert!(!tree.contains("2248903"));
}

#[test]
fn test_merge_commits_follow_first_discovered_path() {
    let lines = [
        "[C:6b261a7][P:541b298][R:HEAD -> fixes][M:Fixed the CLI]",
        "[C:541b298][P:76094a4 0ef17ac][R:][M:Merge all]",
        "[C:18dcc52][P:e85997d][R:feature][M:Feature]",
        "[C:0ef17ac][P:e85997d][R:][M:Right side]",
        "[C:76094a4][P:e85997d][R:][M:Left side]",
        "[C:e85997d][P:][R:master][M:Initial commit]",
    ];

    let tree = build("6b261a7", &["master", "feature", "fixes"], &lines, true);

    assert_eq!(tree.root().id, "e85997d");
    assert_eq!(
        commit_ids(&tree, "fixes"),
        ["6b261a7", "541b298", "0ef17ac", "76094a4"]
    );
    assert_eq!(child_names(&tree, "master"), ["feature", "fixes"]);
    assert_eq!(tree.len(), 3);
}

#[test]
fn test_detached_head_between_named_commits() {
    let lines = [
        "[C:d43991b][P:e5b122a][R:fixes][M:Fix the parser]",
        "[C:e5b122a][P:7a1113e][R:][M:Add parser tests]",
        "[C:7a1113e][P:b299199][R:HEAD][M:Start fixes]",
        "[C:b299199][P:][R:master][M:Release]",
    ];

    let tree = build("7a1113e", &["master", "fixes"], &lines, false);

    let active = tree.active().unwrap();
    assert_eq!(active.id, "7a1113e");
    assert!(active.names.is_empty());
    assert_eq!(tree.parent(active).map(|b| b.id.as_str()), Some("b299199"));
    let fixes = tree.find_by_name("fixes").unwrap();
    assert_eq!(tree.parent(fixes).map(|b| b.id.as_str()), Some("7a1113e"));

    assert_eq!(
        render(&tree, false),
        ["    ╭○  [fixes]", "  ╭●╯ [7a1113e]", "╭○╯ [master]"]
    );
}

#[test]
fn test_building_twice_gives_the_same_tree() {
    let tracked = ["master", "feature", "fixes"];
    let first = build("d43991b", &tracked, LINEAR, true);
    let second = build("d43991b", &tracked, LINEAR, true);

    let shape = |tree: &Tree| -> Vec<(String, Vec<String>, Vec<String>, Vec<String>)> {
        tree.branches()
            .map(|b| {
                (
                    b.id.clone(),
                    b.names.iter().cloned().collect(),
                    b.commits.iter().map(|c| c.id.clone()).collect(),
                    tree.children(b).map(|c| c.id.clone()).collect(),
                )
            })
            .collect()
    };
    assert_eq!(shape(&first), shape(&second));
    assert_eq!(render(&first, true), render(&second, true));
}

#[test]
fn test_forest_invariant_and_coverage() {
    let tracked = ["master", "feature", "fixes"];
    let tree = build("d43991b", &tracked, LINEAR, true);

    // Every branch reaches the root without repeating itself
    for branch in tree.branches() {
        let mut seen = HashSet::from([branch.id.clone()]);
        let mut last = branch;
        for ancestor in tree.ancestors(branch) {
            assert!(seen.insert(ancestor.id.clone()), "cycle through {}", ancestor.id);
            last = ancestor;
        }
        assert_eq!(last.id, tree.root().id);
    }

    // Each tracked name lives on exactly one branch
    for name in tracked {
        assert_eq!(tree.branches().filter(|b| b.names.contains(name)).count(), 1, "{name}");
    }

    // Commits between root and tips are each listed exactly once
    let mut listed: Vec<&str> = tree
        .branches()
        .flat_map(|b| b.commits.iter().map(|c| c.id.as_str()))
        .collect();
    listed.sort_unstable();
    assert_eq!(
        listed,
        ["7a1113e", "7f55dee", "96a5deb", "b299199", "d43991b", "e5b122a"]
    );
}

#[test]
fn test_remote_only_names_are_flagged() {
    let lines = [
        "[C:96a5deb][P:b299199][R:origin/feature][M:Feature done]",
        "[C:b299199][P:][R:HEAD -> master][M:Release]",
    ];
    let remote = HashSet::from(["origin/feature".to_string()]);

    let tree = Tree::from_history(
        Some("b299199"),
        &names(&["master", "origin/feature"]),
        &remote,
        parse(&lines),
        false,
    )
    .unwrap();

    assert!(tree.find_by_name("origin/feature").unwrap().is_remote);
    assert!(!tree.root().is_remote);
}

#[test]
fn test_untracked_remote_forking_mid_run() {
    let lines = [
        "[C:c3c3c3c][P:b2b2b2b][R:HEAD -> master][M:Third]",
        "[C:d4d4d4d][P:b2b2b2b][R:origin/wip][M:Wip]",
        "[C:b2b2b2b][P:a1a1a1a][R:][M:Second]",
        "[C:f6f6f6f][P:a1a1a1a][R:feature][M:Feature]",
        "[C:a1a1a1a][P:][R:][M:First]",
    ];

    let tree = build("c3c3c3c", &["master", "feature"], &lines, true);

    assert_eq!(tree.len(), 3);
    assert_eq!(commit_ids(&tree, "master"), ["c3c3c3c", "b2b2b2b"]);
    assert_eq!(
        render(&tree, false),
        ["  ╭●  [master]", "  ├○  [feature]", "╭○╯ [a1a1a1a]"]
    );
}

#[test]
fn test_failures_are_reported() {
    let remote = HashSet::new();

    let tracked = names(&["master", "gone"]);
    let result = Tree::from_history(Some("d43991b"), &tracked, &remote, parse(LINEAR), false);
    assert!(matches!(result, Err(Error::UnresolvedBranch { name }) if name == "gone"));

    let tracked = names(&["fixes", "master"]);
    let lines = ["[C:d43991b][P:e5b122a][R:HEAD -> fixes][M:Fix]", "garbage"];
    let result = Tree::from_history(Some("d43991b"), &tracked, &remote, parse(&lines), false);
    assert!(matches!(result, Err(Error::MalformedEntry { .. })));
}
