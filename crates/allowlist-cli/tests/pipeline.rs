//! End-to-end CLI workflow: build an allowlist, generate and verify proofs.

#![allow(
    missing_docs,
    clippy::indexing_slicing,
    reason = "Tests index JSON values directly for concise assertions"
)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use serde_json::Value;

const MEMBERS: [&str; 3] = [
    "0x3733bDCA4daBf8aFE2C7fd513812d8343165E8ed",
    "0x06A3D819149D719D267Afa9FCDC5Eb192A0431CB",
    "0x27159D4B8D7E9d6B9f4Bb8F5A2A6Bf9C1e0e3dC1",
];
const OUTSIDER: &str = "0x1111111111111111111111111111111111111111";

struct Workspace {
    _dir: tempfile::TempDir,
    input: PathBuf,
    config: PathBuf,
    proofs: PathBuf,
    tree: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let input = dir.path().join("allowlist.txt");
        fs::write(&input, format!("# holders\n{}\n", MEMBERS.join("\n"))).expect("write input");
        Self {
            config: dir.path().join("allowlist-config.json"),
            proofs: dir.path().join("allowlist-proofs.json"),
            tree: dir.path().join("allowlist-tree.bin"),
            input,
            _dir: dir,
        }
    }

    fn file(&self, name: &str) -> PathBuf {
        self.input.with_file_name(name)
    }
}

fn s(path: &Path) -> &str {
    path.to_str().expect("path is valid UTF-8")
}

fn allowlist() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("allowlist");
    cmd.env_remove("ALLOWLIST_INPUT_FILE")
        .env_remove("ALLOWLIST_TREE_FILE")
        .env_remove("ALLOWLIST_ADDRESS");
    cmd
}

fn build(ws: &Workspace, hash: &str) {
    allowlist()
        .args([
            "config",
            "build",
            "--input",
            s(&ws.input),
            "--hash",
            hash,
            "--config-out",
            s(&ws.config),
            "--proofs-out",
            s(&ws.proofs),
            "--tree-out",
            s(&ws.tree),
        ])
        .assert()
        .success();
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).expect("read json")).expect("parse json")
}

#[test]
fn build_generate_verify() {
    let ws = Workspace::new();
    build(&ws, "keccak256");

    let config = read_json(&ws.config);
    assert_eq!(config["hash_function"], "keccak256");
    assert_eq!(config["leaf_count"], 3);
    let bundle = read_json(&ws.proofs);
    assert_eq!(bundle["root"], config["root"]);
    assert_eq!(bundle["proofs"].as_array().map(Vec::len), Some(3));

    allowlist()
        .args(["proof", "verify", "--config", s(&ws.config), "--proofs", s(&ws.proofs)])
        .assert()
        .success();

    let from_input = ws.file("proof-input.json");
    let from_tree = ws.file("proof-tree.json");
    for (flag, source, out) in [
        ("--input", &ws.input, &from_input),
        ("--tree", &ws.tree, &from_tree),
    ] {
        allowlist()
            .args([
                "proof",
                "generate",
                "--address",
                MEMBERS[1],
                "--config",
                s(&ws.config),
                flag,
                s(source),
                "--proof-out",
                s(out),
            ])
            .assert()
            .success();

        allowlist()
            .args([
                "proof",
                "verify",
                "--config",
                s(&ws.config),
                "--proofs",
                s(out),
                "--address",
                MEMBERS[1],
            ])
            .assert()
            .success();
    }
    assert_eq!(read_json(&from_input), read_json(&from_tree));
}

#[test]
fn generate_prints_to_stdout() {
    let ws = Workspace::new();
    build(&ws, "sha256");

    let output = allowlist()
        .args([
            "proof",
            "generate",
            "--address",
            MEMBERS[0],
            "--config",
            s(&ws.config),
            "--tree",
            s(&ws.tree),
        ])
        .output()
        .expect("run proof generate");
    assert!(output.status.success());

    let bundle: Value = serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(bundle["hash_function"], "sha256");
    assert_eq!(
        bundle["proofs"][0]["address"],
        MEMBERS[0].to_lowercase().as_str()
    );
}

#[test]
fn root_prints_hex_and_base64() {
    let ws = Workspace::new();
    build(&ws, "keccak256");
    let config = read_json(&ws.config);

    let output = allowlist()
        .args(["config", "root", "--config", s(&ws.config)])
        .output()
        .expect("run config root");
    assert!(output.status.success());
    let hex_root = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert_eq!(Some(hex_root.trim()), config["root"].as_str());

    let output = allowlist()
        .args(["config", "root", "--config", s(&ws.config), "--encoding", "base64"])
        .output()
        .expect("run config root");
    assert!(output.status.success());
    let base64_root = String::from_utf8(output.stdout).expect("utf8 stdout");
    assert_eq!(base64_root.trim().len(), 44);
}

#[test]
fn non_member_has_no_proof() {
    let ws = Workspace::new();
    build(&ws, "keccak256");

    allowlist()
        .args([
            "proof",
            "generate",
            "--address",
            OUTSIDER,
            "--config",
            s(&ws.config),
            "--input",
            s(&ws.input),
        ])
        .assert()
        .failure();

    allowlist()
        .args([
            "proof",
            "verify",
            "--config",
            s(&ws.config),
            "--proofs",
            s(&ws.proofs),
            "--address",
            OUTSIDER,
        ])
        .assert()
        .failure();
}

#[test]
fn tampered_bundle_fails_verification() {
    let ws = Workspace::new();
    build(&ws, "keccak256");

    let mut bundle = read_json(&ws.proofs);
    bundle["proofs"][0]["proof"][0] = Value::String(format!("0x{}", "00".repeat(32)));
    let tampered = ws.file("tampered.json");
    fs::write(&tampered, bundle.to_string()).expect("write tampered bundle");

    allowlist()
        .args(["proof", "verify", "--config", s(&ws.config), "--proofs", s(&tampered)])
        .assert()
        .failure();
}

#[test]
fn rejects_invalid_address_list() {
    let ws = Workspace::new();
    fs::write(&ws.input, "0x1234\n").expect("write input");

    allowlist()
        .args([
            "config",
            "build",
            "--input",
            s(&ws.input),
            "--config-out",
            s(&ws.config),
            "--proofs-out",
            s(&ws.proofs),
        ])
        .assert()
        .failure();
    assert!(!ws.config.exists());
}
