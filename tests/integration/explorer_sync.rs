//! Integration tests for explorer state synchronization.

mod helpers;

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use reqdeck_core::error::{AppError, ErrorKind};
use reqdeck_core::types::{CollectionId, EnvironmentId, FolderId, RequestId};
use reqdeck_entity::{
    Collection, CreateCollection, CreateRequest, Environment, Folder, Request, UpdateCollection,
    UpdateFolder, UpdateRequest,
};
use reqdeck_gateway::MemoryGateway;
use reqdeck_tree::{MemoryTreeProvider, TreeCall, outline};

use helpers::{GatedGateway, TestApp};

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test]
async fn test_snapshot_and_tree_stay_in_sync() {
    let app = TestApp::new().await;

    let users = app.collection("Users").await;
    let billing = app.collection("Billing").await;
    let accounts = app.folder(&users, None, "Accounts").await;
    let profiles = app.folder(&users, Some(&accounts), "Profiles").await;
    let invoices = app.folder(&billing, None, "Invoices").await;
    app.assert_in_sync();

    let get_profile = app.request_in(&profiles, "Get profile").await;
    app.request_in(&invoices, "List invoices").await;
    let ping = app
        .store
        .create_request(CreateRequest {
            name: "Ping".to_string(),
            method: "HEAD".to_string(),
            url: "/ping".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(ping.is_workspace_root());
    app.assert_in_sync();

    app.store
        .update_request(
            get_profile.id,
            UpdateRequest {
                name: Some("Fetch profile".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    app.store.delete_folder(accounts.id).await.unwrap();
    app.assert_in_sync();

    app.store.delete_collection(billing.id).await.unwrap();
    app.store.delete_request(ping.id).await.unwrap();
    app.assert_in_sync();
    assert_eq!(app.store.select(|s| s.len()), 1);

    let remote = app.gateway.artifacts(app.workspace_id).await.unwrap();
    assert_eq!(remote.collections, app.store.snapshot().collections);
    assert!(remote.folders.is_empty());
    assert!(remote.requests.is_empty());
}

#[tokio::test]
async fn test_create_collection_commits_once_to_both_sides() {
    let app = TestApp::new().await;

    let demo = app.collection("Demo").await;

    let snapshot = app.store.snapshot();
    assert_eq!(snapshot.collections.len(), 1);
    assert_eq!(snapshot.collections[0].name, "Demo");
    assert_eq!(snapshot.collections[0].workspace_id, app.workspace_id);
    assert_eq!(app.tree.calls(), [TreeCall::AddCollection(demo.clone())]);
    assert_eq!(snapshot.collections[0], demo);
}

#[tokio::test]
async fn test_progress_flag_clears_after_each_outcome() {
    let app = TestApp::new().await;
    assert!(!app.store.is_progressing());

    let users = app.collection("Users").await;
    assert!(!app.store.is_progressing());

    app.gateway.fail_next(AppError::network("Network Error")).await;
    assert!(app.store.delete_collection(users.id).await.is_err());
    assert!(!app.store.is_progressing());

    assert!(
        app.store
            .update_collection(CollectionId::new(), UpdateCollection::default())
            .await
            .is_err()
    );
    assert!(!app.store.is_progressing());

    app.store.fetch_explorer(app.workspace_id).await.unwrap();
    assert!(!app.store.is_progressing());
}

#[tokio::test]
async fn test_progress_flag_holds_until_last_overlapping_call() {
    let backing = Arc::new(MemoryGateway::new());
    let gated = Arc::new(GatedGateway::new(backing.clone()));
    let app = TestApp::with_gateway(backing, gated.clone()).await;

    let first = tokio::spawn({
        let store = app.store.clone();
        async move {
            store
                .create_collection(CreateCollection {
                    name: "First".to_string(),
                    description: None,
                })
                .await
        }
    });
    let second = tokio::spawn({
        let store = app.store.clone();
        async move {
            store
                .create_collection(CreateCollection {
                    name: "Second".to_string(),
                    description: None,
                })
                .await
        }
    });
    settle().await;
    assert!(app.store.is_progressing());

    gated.release(1);
    let finished = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if first.is_finished() || second.is_finished() {
                break;
            }
            tokio::task::yield_now().await;
        }
    })
    .await;
    assert!(finished.is_ok());
    assert!(app.store.is_progressing());

    gated.release(1);
    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();
    assert!(!app.store.is_progressing());
    assert_eq!(app.store.select(|s| s.collections.len()), 2);
}

#[tokio::test]
async fn test_concurrent_creates_lose_nothing() {
    let app = TestApp::new().await;
    let users = app.collection("Users").await;
    let folder = app.folder(&users, None, "Accounts").await;

    let (a, b, c, d) = futures::join!(
        app.store.create_collection(CreateCollection {
            name: "Orders".to_string(),
            description: None,
        }),
        app.store.create_request(CreateRequest {
            name: "List accounts".to_string(),
            method: "GET".to_string(),
            folder_id: Some(folder.id),
            ..Default::default()
        }),
        app.store.create_request(CreateRequest {
            name: "Create account".to_string(),
            method: "POST".to_string(),
            folder_id: Some(folder.id),
            ..Default::default()
        }),
        app.store.delete_collection(CollectionId::new()),
    );
    a.unwrap();
    b.unwrap();
    c.unwrap();
    d.unwrap();

    assert_eq!(app.store.select(|s| s.collections.len()), 2);
    assert_eq!(app.store.select(|s| s.requests.len()), 2);
    assert!(!app.store.is_progressing());
    app.assert_in_sync();
}

#[tokio::test]
async fn test_delete_missing_id_is_a_no_op() {
    let app = TestApp::new().await;
    let users = app.collection("Users").await;
    let accounts = app.folder(&users, None, "Accounts").await;
    app.request_in(&accounts, "Get account").await;
    let before = app.store.snapshot();

    app.store.delete_collection(CollectionId::new()).await.unwrap();
    app.store.delete_folder(FolderId::new()).await.unwrap();
    app.store.delete_request(RequestId::new()).await.unwrap();

    assert_eq!(app.store.snapshot(), before);
    assert!(app.notifier.alerts().is_empty());
    app.assert_in_sync();
}

#[tokio::test]
async fn test_update_merges_only_given_fields() {
    let app = TestApp::new().await;
    let users = app.collection("Users").await;
    let accounts = app.folder(&users, None, "Accounts").await;
    let request = app.request_in(&accounts, "Get account").await;

    let updated = app
        .store
        .update_request(
            request.id,
            UpdateRequest {
                url: Some("/v2/accounts/{id}".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.url, "/v2/accounts/{id}");
    assert_eq!(updated.name, request.name);
    assert_eq!(updated.method, request.method);
    assert_eq!(updated.folder_id, request.folder_id);
    assert_eq!(app.store.select(|s| s.request(request.id).cloned()), Some(updated));

    let posted = app
        .store
        .update_request(
            request.id,
            UpdateRequest {
                method: Some("post".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(posted.method, "POST");
    assert_eq!(posted.url, "/v2/accounts/{id}");
    assert_eq!(app.tree.get(request.id.into_uuid()).unwrap().method.as_deref(), Some("POST"));

    let renamed = app
        .store
        .update_folder(
            accounts.id,
            UpdateFolder {
                name: None,
                description: Some("Account endpoints".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.name, "Accounts");
    assert_eq!(renamed.description.as_deref(), Some("Account endpoints"));
}

#[tokio::test]
async fn test_failed_delete_keeps_folder_and_alerts() {
    let app = TestApp::new().await;
    let users = app.collection("Users").await;
    let folder = app.folder(&users, None, "Accounts").await;
    app.tree.clear_calls();

    app.gateway.fail_next(AppError::network("Network Error")).await;
    let err = app.store.delete_folder(folder.id).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Network);
    assert!(app.store.select(|s| s.folder(folder.id).is_some()));
    assert!(app.tree.get(folder.id.into_uuid()).is_some());
    assert!(app.tree.calls().is_empty());

    let alerts = app.notifier.alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].message, "Network Error");
    assert_eq!(alerts[0].labels.get("operation").map(String::as_str), Some("delete_folder"));
}

#[tokio::test]
async fn test_delete_collection_drops_requests_filed_only_under_its_folders() {
    let collection_id = CollectionId::new();
    let folder_id = FolderId::new();
    let request_id = RequestId::new();
    let app = TestApp::with_artifacts(|artifacts| {
        let workspace_id = artifacts.workspace.id;
        artifacts.collections.push(Collection {
            id: collection_id,
            name: "Users API".to_string(),
            description: None,
            workspace_id,
        });
        artifacts.folders.push(Folder {
            id: folder_id,
            name: "Profiles".to_string(),
            description: None,
            collection_id,
            folder_id: None,
        });
        artifacts.requests.push(Request {
            id: request_id,
            name: "Get User Profile".to_string(),
            method: "GET".to_string(),
            url: "/users/{id}".to_string(),
            description: None,
            workspace_id,
            collection_id: None,
            folder_id: Some(folder_id),
        });
    })
    .await;
    app.assert_in_sync();

    app.store.delete_collection(collection_id).await.unwrap();

    app.assert_in_sync();
    assert!(app.store.select(|s| s.request(request_id).is_none()));
    assert!(app.store.snapshot().is_empty());
    assert!(app.tree.is_empty());
}

#[tokio::test]
async fn test_failed_create_and_update_leave_no_trace() {
    let app = TestApp::new().await;
    let users = app.collection("Users").await;

    app.gateway
        .fail_next(AppError::remote("Collection limit reached"))
        .await;
    let err = app
        .store
        .create_collection(CreateCollection {
            name: "Orders".to_string(),
            description: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.message, "Collection limit reached");

    app.gateway.fail_next(AppError::conflict("Name taken")).await;
    app.store
        .update_collection(
            users.id,
            UpdateCollection {
                name: Some("Accounts".to_string()),
                description: None,
            },
        )
        .await
        .unwrap_err();

    let snapshot = app.store.snapshot();
    assert_eq!(snapshot.collections, [users.clone()]);
    assert_eq!(app.tree.get(users.id.into_uuid()).unwrap().title, "Users");
    let messages: Vec<String> = app.notifier.alerts().into_iter().map(|n| n.message).collect();
    assert_eq!(messages, ["Collection limit reached", "Name taken"]);
}

#[tokio::test]
async fn test_fetch_replaces_state_and_environments() {
    let collection_id = CollectionId::new();
    let folder_id = FolderId::new();
    let app = TestApp::with_artifacts(|artifacts| {
        let workspace_id = artifacts.workspace.id;
        artifacts.collections.push(Collection {
            id: collection_id,
            name: "Users API".to_string(),
            description: None,
            workspace_id,
        });
        artifacts.folders.push(Folder {
            id: folder_id,
            name: "Profiles".to_string(),
            description: None,
            collection_id,
            folder_id: None,
        });
        artifacts.requests.push(Request {
            id: RequestId::new(),
            name: "Get User Profile".to_string(),
            method: "GET".to_string(),
            url: "/users/{id}".to_string(),
            description: None,
            workspace_id,
            collection_id: Some(collection_id),
            folder_id: Some(folder_id),
        });
        artifacts.environments.push(Environment {
            id: EnvironmentId::new(),
            name: "Staging".to_string(),
            workspace_id,
            variables: BTreeMap::from([("host".to_string(), "staging.test".to_string())]),
        });
    })
    .await;

    assert_eq!(app.store.select(|s| s.len()), 3);
    assert_eq!(app.environments.environments().len(), 1);
    app.assert_in_sync();
    assert_eq!(
        outline(&app.tree, Some("user")),
        "▾ [-] [User]s API\n  ▾ [-] Profiles\n    GET Get [User] Profile\n"
    );

    app.reload_with(|_| {}).await;
    assert!(app.store.snapshot().is_empty());
    assert!(app.environments.environments().is_empty());
    assert!(app.tree.is_empty());
}

#[tokio::test]
async fn test_fetch_initializes_tree_in_one_call() {
    let app = TestApp::new().await;
    app.collection("Users").await;
    app.tree.clear_calls();

    app.store.fetch_explorer(app.workspace_id).await.unwrap();

    assert_eq!(
        app.tree.calls(),
        [TreeCall::Init {
            collections: 1,
            folders: 0,
            requests: 0
        }]
    );
}

#[tokio::test]
async fn test_failed_fetch_keeps_current_explorer() {
    let app = TestApp::new().await;
    let users = app.collection("Users").await;

    app.gateway.fail_next(AppError::network("Network Error")).await;
    assert!(app.store.fetch_explorer(app.workspace_id).await.is_err());

    assert_eq!(app.store.snapshot().collections, [users]);
    assert_eq!(app.notifier.alerts().len(), 1);
    assert!(!app.store.is_progressing());
}

#[tokio::test]
async fn test_switch_workspace_loads_the_other_one() {
    let app = TestApp::new().await;
    app.collection("Users").await;

    let other = app
        .gateway
        .artifacts(app.workspace_id)
        .await
        .map(|mut a| {
            a.workspace.id = reqdeck_core::types::WorkspaceId::new();
            a.workspace.name = "Other".to_string();
            a.collections.clear();
            a
        })
        .unwrap();
    let other_id = other.workspace.id;
    app.gateway.seed(other).await;

    app.store.switch_workspace(other_id).await.unwrap();

    assert_eq!(app.store.workspace_id(), other_id);
    assert_eq!(app.store.workspace().name, "Other");
    assert!(app.store.snapshot().is_empty());
    assert!(app.tree.is_empty());
}

#[tokio::test]
async fn test_failed_switch_keeps_current_workspace() {
    let app = TestApp::new().await;
    let users = app.collection("Users").await;
    app.folder(&users, None, "Accounts").await;
    let name = app.store.workspace().name;

    app.gateway.fail_next(AppError::network("Network Error")).await;
    let err = app
        .store
        .switch_workspace(reqdeck_core::types::WorkspaceId::new())
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Network);
    assert_eq!(app.store.workspace_id(), app.workspace_id);
    assert_eq!(app.store.workspace().name, name);
    assert_eq!(app.store.select(|s| s.len()), 2);
    assert!(app.tree.get(users.id.into_uuid()).is_some());
    app.assert_in_sync();
}

#[tokio::test]
async fn test_late_registration_sees_current_state() {
    let app = TestApp::new().await;
    let users = app.collection("Users").await;
    app.folder(&users, None, "Accounts").await;

    let late = Arc::new(MemoryTreeProvider::new());
    app.store.register_tree_provider(late.clone());

    assert_eq!(late.node_ids(), app.store.select(|s| s.node_ids()));
    app.collection("Billing").await;
    assert_eq!(late.len(), 3);
    assert_eq!(app.tree.len(), 2);
}

#[tokio::test]
async fn test_mutations_without_provider_still_commit() {
    let app = TestApp::new().await;
    app.store.unregister_tree_provider();

    let users = app.collection("Users").await;
    app.store.delete_collection(users.id).await.unwrap();
    app.collection("Billing").await;

    assert_eq!(app.store.select(|s| s.collections.len()), 1);
    assert!(app.tree.is_empty());
}

#[tokio::test]
async fn test_subscribers_see_committed_changes() {
    let app = TestApp::new().await;
    let mut rx = app.store.subscribe();
    rx.borrow_and_update();

    let users = app.collection("Users").await;

    assert!(rx.has_changed().unwrap());
    let seen = rx.borrow_and_update().clone();
    assert_eq!(seen.collections, [users]);
    assert!(!seen.progressing);
}

#[tokio::test]
async fn test_dispose_resets_to_a_fresh_workspace() {
    let app = TestApp::new().await;
    app.collection("Users").await;

    app.store.dispose();

    assert_ne!(app.store.workspace_id(), app.workspace_id);
    assert_eq!(app.store.workspace().name, "My Workspace");
    assert!(app.store.snapshot().is_empty());
    assert!(app.tree.is_empty());
    assert!(matches!(
        app.tree.calls().last(),
        Some(TreeCall::Init {
            collections: 0,
            folders: 0,
            requests: 0
        })
    ));
}
