//! Common test utilities and fixtures for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Creates a temporary directory for test fixtures.
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Writes `files` (relative path, content) below `dir` and returns its root.
pub fn create_mock_corpus(dir: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let root = dir.path().to_path_buf();

    for (path, content) in files {
        let file_path = root.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    root
}

/// Writes `files` below `dir`, commits them to a fresh git repository and
/// returns its root, usable as a clone URL.
pub fn create_git_corpus(dir: &TempDir, files: &[(&str, &str)]) -> PathBuf {
    let root = create_mock_corpus(dir, files);
    let repo = git2::Repository::init(&root).expect("Failed to init repository");

    let mut index = repo.index().expect("Failed to open index");
    index
        .add_all(["*"], git2::IndexAddOption::DEFAULT, None)
        .expect("Failed to stage files");
    index.write().expect("Failed to write index");
    let tree_id = index.write_tree().expect("Failed to write tree");
    let tree = repo.find_tree(tree_id).expect("Failed to find tree");
    let signature =
        git2::Signature::now("tester", "tester@example.com").expect("Failed to create signature");
    repo.commit(Some("HEAD"), &signature, &signature, "init", &tree, &[])
        .expect("Failed to commit");

    root
}

/// Names of `sigma-index-*` clone directories left in `dir`.
pub fn leftover_clones(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .expect("Failed to read directory")
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("sigma-index-"))
        .collect()
}

/// A small Sigma-style corpus: three valid rules, one without a title, one
/// that is not valid YAML, and files outside the rules directory or with
/// other extensions that must be ignored.
pub fn sigma_corpus_files() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "rules/windows/process_creation/proc_creation_win_whoami.yml",
            r"title: Whoami Execution
id: 502b42de-4306-40b4-9596-6f590c81f073
status: test
description: Detects the execution of whoami
author: Florian Roth (Nextron Systems)
date: 2018/08/13
logsource:
    category: process_creation
    product: windows
detection:
    selection:
        Image|endswith: whoami.exe
    condition: selection
tags:
    - attack.discovery
    - attack.t1033
level: High
",
        ),
        (
            "rules/linux/auditd/lnx_auditd_susp_c2.yml",
            r"title: auditd Suspicious C2 Activity
id: f7158a64-6204-4d6d-868a-6e6378b467e0
status: Experimental
author: Marie Euler
logsource:
    product: linux
    service: auditd
detection:
    selection:
        key: susp_activity
    condition: selection
tags:
    - Attack.Command_And_Control
    - 42
level: medium
",
        ),
        (
            "rules/cloud/aws/aws_root_login.yml",
            r"title: AWS Root Credentials
status: stable
description: Détection de l'utilisation du compte root
logsource:
    product: aws
    service: cloudtrail
detection:
    selection:
        userIdentity.type: Root
    condition: selection
level: critical
",
        ),
        ("rules/windows/no_title.yml", "id: 123\nlevel: low\n"),
        ("rules/windows/broken.yml", "title: [unclosed\n  level: high\n"),
        ("rules/README.md", "# not a rule\n"),
        ("deprecated/old_rule.yml", "title: Deprecated Rule\n"),
    ]
}

/// Path to the compiled CLI binary.
pub fn sigma_index_bin() -> &'static str {
    env!("CARGO_BIN_EXE_sigma-index")
}

/// Runs the CLI from `cwd` with the given arguments and captures output.
pub fn run_cli(cwd: &Path, args: &[&str]) -> std::process::Output {
    run_cli_with_env(cwd, args, &[])
}

/// Like [`run_cli`], with extra environment variables set for the child.
pub fn run_cli_with_env(
    cwd: &Path,
    args: &[&str],
    envs: &[(&str, &Path)],
) -> std::process::Output {
    let mut command = std::process::Command::new(sigma_index_bin());
    command
        .args(args)
        .current_dir(cwd)
        .env_remove("RUST_LOG")
        .env_remove("SIGMA_INDEX_REPO");
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().expect("Failed to execute command")
}
