// tests/common/mod.rs
#![allow(dead_code)]

use git2::{Oid, Repository, Signature};
use tempfile::TempDir;

/// Commits of the fixture repository.
pub struct Fixture {
    pub dir: TempDir,
    pub first: Oid,
    pub second: Oid,
    pub next_tip: Oid,
    pub beta_tip: Oid,
}

/// Build a repository with this history:
///
/// ```text
/// master: first (v1.0.0, not-a-release) -- second (v1.1.0, annotated)
/// next:                                     \-- next_tip (v1.2.0@next)
/// beta:                                     \-- beta_tip (v2.0.0-beta.1@beta)
/// ```
///
/// plus a `tree-tag` pointing at a tree instead of a commit.
pub fn setup_test_repo() -> Fixture {
    let dir = TempDir::new().expect("Could not create temp dir");
    let repo = Repository::init(dir.path()).expect("Could not init git repo");
    let sig = Signature::now("Test User", "test@example.com").expect("Could not create sig");

    let tree_id = repo
        .treebuilder(None)
        .and_then(|builder| builder.write())
        .expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");

    let commit = |update_ref: &str, message: &str, parents: &[Oid]| -> Oid {
        let parents: Vec<git2::Commit> = parents
            .iter()
            .map(|oid| repo.find_commit(*oid).expect("Could not find parent"))
            .collect();
        let parents: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some(update_ref), &sig, &sig, message, &tree, &parents)
            .expect("Could not create commit")
    };

    let first = commit("refs/heads/master", "Initial commit", &[]);
    let second = commit("refs/heads/master", "feat: second", &[first]);
    let next_tip = commit("refs/heads/next", "feat: next", &[second]);
    let beta_tip = commit("refs/heads/beta", "feat!: beta", &[second]);

    let object = |oid: Oid| repo.find_object(oid, None).expect("Could not find object");

    repo.tag_lightweight("v1.0.0", &object(first), false)
        .expect("Could not create tag");
    repo.tag_lightweight("not-a-release", &object(first), false)
        .expect("Could not create tag");
    repo.tag("v1.1.0", &object(second), &sig, "Release 1.1.0", false)
        .expect("Could not create annotated tag");
    repo.tag_lightweight("v1.2.0@next", &object(next_tip), false)
        .expect("Could not create tag");
    repo.tag_lightweight("v2.0.0-beta.1@beta", &object(beta_tip), false)
        .expect("Could not create tag");
    repo.tag_lightweight("tree-tag", &object(tree_id), false)
        .expect("Could not create tag");

    Fixture {
        dir,
        first,
        second,
        next_tip,
        beta_tip,
    }
}

/// Branch configuration matching the fixture repository.
pub const CONFIG: &str = r#"
branches = ["master", "next", { name = "beta", prerelease = true }]
"#;
