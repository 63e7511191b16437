// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serial_test::serial;

#[test]
#[serial(env)]
fn explicit_state_dir_wins() {
    std::env::set_var("RL_STATE_DIR", "/tmp/rl-explicit");
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");
    let dir = state_dir().unwrap();
    std::env::remove_var("RL_STATE_DIR");
    std::env::remove_var("XDG_STATE_HOME");
    assert_eq!(dir, PathBuf::from("/tmp/rl-explicit"));
}

#[test]
#[serial(env)]
fn xdg_state_home_gets_runlane_subdir() {
    std::env::remove_var("RL_STATE_DIR");
    std::env::set_var("XDG_STATE_HOME", "/tmp/xdg");
    let dir = state_dir().unwrap();
    std::env::remove_var("XDG_STATE_HOME");
    assert_eq!(dir, PathBuf::from("/tmp/xdg/runlane"));
}

#[test]
#[serial(env)]
fn ipc_timeout_override() {
    std::env::set_var("RL_TIMEOUT_IPC_MS", "250");
    let timeout = timeout_ipc();
    std::env::remove_var("RL_TIMEOUT_IPC_MS");
    assert_eq!(timeout, Duration::from_millis(250));
}
