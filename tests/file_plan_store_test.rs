// ABOUTME: Tests for the on-disk plan store used by the command-line client
// ABOUTME: Covers round trips, missing entries, clearing, corrupt files and session integration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Fitcoach Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::fs;

use fitcoach::constants::storage::{PLAN_KEY, PROFILE_KEY};
use fitcoach::errors::ErrorCode;
use fitcoach::plans::{FilePlanStore, PlanSession, PlanStore, SavedSession, SessionPhase};
use helpers::fixtures::{ana_profile, ana_submission, sample_plan, StubGateway};
use tempfile::TempDir;

fn saved() -> SavedSession {
    SavedSession {
        profile: ana_profile(),
        plan: sample_plan(),
    }
}

#[tokio::test]
async fn test_empty_directory_loads_nothing() {
    let dir = TempDir::new().unwrap();
    let store = FilePlanStore::new(dir.path().join("never-created"));

    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let store = FilePlanStore::new(dir.path().join("data"));

    store.save(&saved()).await.unwrap();

    assert!(store.entry_path(PLAN_KEY).exists());
    assert!(store.entry_path(PROFILE_KEY).exists());
    assert_eq!(store.load().await.unwrap(), Some(saved()));
}

#[tokio::test]
async fn test_entries_are_camel_case_json() {
    let dir = TempDir::new().unwrap();
    let store = FilePlanStore::new(dir.path());
    store.save(&saved()).await.unwrap();

    let plan = fs::read_to_string(store.entry_path(PLAN_KEY)).unwrap();
    let profile = fs::read_to_string(store.entry_path(PROFILE_KEY)).unwrap();

    assert!(plan.contains("\"workoutPlan\""));
    assert!(profile.contains("\"fitnessGoal\""));
}

#[tokio::test]
async fn test_save_replaces_previous_pair() {
    let dir = TempDir::new().unwrap();
    let store = FilePlanStore::new(dir.path());
    store.save(&saved()).await.unwrap();

    let mut next = saved();
    next.plan.motivation = "One more rep".into();
    store.save(&next).await.unwrap();

    let loaded = store.load().await.unwrap().unwrap();
    assert_eq!(loaded.plan.motivation, "One more rep");
}

#[tokio::test]
async fn test_one_missing_entry_means_no_state() {
    let dir = TempDir::new().unwrap();
    let store = FilePlanStore::new(dir.path());
    store.save(&saved()).await.unwrap();

    fs::remove_file(store.entry_path(PROFILE_KEY)).unwrap();

    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_corrupt_entry_is_a_serialization_error() {
    let dir = TempDir::new().unwrap();
    let store = FilePlanStore::new(dir.path());
    store.save(&saved()).await.unwrap();

    fs::write(store.entry_path(PLAN_KEY), "{ truncated").unwrap();

    let error = store.load().await.unwrap_err();
    assert_eq!(error.code, ErrorCode::SerializationError);
}

#[tokio::test]
async fn test_clear_removes_entries_and_is_repeatable() {
    let dir = TempDir::new().unwrap();
    let store = FilePlanStore::new(dir.path());
    store.save(&saved()).await.unwrap();

    store.clear().await.unwrap();
    store.clear().await.unwrap();

    assert!(!store.entry_path(PLAN_KEY).exists());
    assert!(store.load().await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_profile_write_keeps_previous_pair() {
    let dir = TempDir::new().unwrap();
    let store = FilePlanStore::new(dir.path());
    store.save(&saved()).await.unwrap();

    let mut next = saved();
    next.profile.name = "Bea".to_owned();
    next.plan.motivation = "A different week".to_owned();

    // A directory where the profile is staged makes that write fail
    fs::create_dir(store.staging_path(PROFILE_KEY)).unwrap();
    assert!(store.save(&next).await.is_err());

    assert_eq!(store.load().await.unwrap(), Some(saved()));
    assert!(!store.staging_path(PLAN_KEY).exists());

    fs::remove_dir(store.staging_path(PROFILE_KEY)).unwrap();
    store.save(&next).await.unwrap();
    assert_eq!(store.load().await.unwrap(), Some(next));
}

#[tokio::test]
async fn test_no_temporary_files_left_behind() {
    let dir = TempDir::new().unwrap();
    let store = FilePlanStore::new(dir.path());
    store.save(&saved()).await.unwrap();

    let names: Vec<String> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();

    assert_eq!(names.len(), 2, "unexpected files: {names:?}");
    assert!(names.iter().all(|name| !name.ends_with(".tmp")));
}

#[tokio::test]
async fn test_session_survives_restart() {
    let dir = TempDir::new().unwrap();

    let mut first = PlanSession::new(StubGateway::succeeding(), FilePlanStore::new(dir.path()));
    first.request_plan(&ana_submission()).await.unwrap();
    drop(first);

    let mut second = PlanSession::new(StubGateway::failing(), FilePlanStore::new(dir.path()));
    assert_eq!(second.load_persisted().await, SessionPhase::Ready);
    assert_eq!(second.plan(), Some(&sample_plan()));
    assert_eq!(second.profile().map(|p| p.name.as_str()), Some("Ana"));
    assert_eq!(second.gateway().plan_calls(), 0);
}
