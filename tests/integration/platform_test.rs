//! Integration tests for the agent preference and workspace calls.

use std::sync::Arc;

use reqdeck_core::config::AppConfig;
use reqdeck_core::error::ErrorKind;
use reqdeck_core::traits::preferences::PreferenceStore;
use reqdeck_entity::{CreateOrganization, CreateWorkspace};
use reqdeck_gateway::MemoryGateway;
use reqdeck_service::platform::AGENT_PREFERENCE_KEY;
use reqdeck_service::{
    Agent, EnvironmentStore, ExplorerStore, FilePreferenceStore, MemoryNotifier, PlatformStore,
    WorkspaceService,
};

fn scratch_preferences() -> std::path::PathBuf {
    std::env::temp_dir()
        .join(format!("reqdeck-platform-{}", uuid::Uuid::new_v4()))
        .join("preferences.json")
}

#[tokio::test]
async fn test_agent_choice_survives_restart() {
    let path = scratch_preferences();
    let config = AppConfig::default();
    let default_agent: Agent = config.platform.default_agent.parse().unwrap();

    let first = PlatformStore::load(Arc::new(FilePreferenceStore::new(&path)), default_agent)
        .await
        .unwrap();
    assert_eq!(first.agent(), Agent::Proxy);
    first.change_agent(Agent::Desktop).await.unwrap();

    let second = PlatformStore::load(Arc::new(FilePreferenceStore::new(&path)), default_agent)
        .await
        .unwrap();
    assert_eq!(second.agent(), Agent::Desktop);

    let raw = std::fs::read_to_string(&path).unwrap();
    let map: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(map[AGENT_PREFERENCE_KEY], "\"desktop\"");

    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[tokio::test]
async fn test_stored_web_agent_starts_as_proxy() {
    let path = scratch_preferences();
    let prefs = Arc::new(FilePreferenceStore::new(&path));
    prefs.save(AGENT_PREFERENCE_KEY, "\"web\"").await.unwrap();

    let platform = PlatformStore::load(prefs, Agent::Extension).await.unwrap();
    assert_eq!(platform.agent(), Agent::Proxy);

    if let Some(dir) = path.parent() {
        let _ = std::fs::remove_dir_all(dir);
    }
}

#[tokio::test]
async fn test_invalid_configured_agent_is_rejected() {
    let err = "mainframe".parse::<Agent>().unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
}

#[tokio::test]
async fn test_created_workspace_can_be_explored() {
    let gateway = Arc::new(MemoryGateway::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let workspaces = WorkspaceService::new(gateway.clone(), notifier.clone());

    let org = workspaces
        .create_organization(CreateOrganization {
            name: "Acme".to_string(),
            default_workspace_name: "General".to_string(),
        })
        .await
        .unwrap();
    let workspace = workspaces
        .create_workspace(CreateWorkspace {
            name: "Payments".to_string(),
            description: Some("Payment APIs".to_string()),
            organization_id: Some(org.id),
        })
        .await
        .unwrap();
    assert!(workspace.is_organizational());
    assert_eq!(notifier.successes().len(), 2);

    let store = ExplorerStore::new(gateway, notifier.clone(), Arc::new(EnvironmentStore::new()));
    store.fetch_explorer(workspace.id).await.unwrap();
    assert_eq!(store.workspace(), workspace);
    assert!(store.snapshot().is_empty());
    assert!(notifier.alerts().is_empty());
}

#[tokio::test]
async fn test_duplicate_workspace_name_is_a_conflict() {
    let gateway = Arc::new(MemoryGateway::new());
    let workspaces = WorkspaceService::new(gateway, Arc::new(MemoryNotifier::new()));
    let payload = CreateWorkspace {
        name: "Team".to_string(),
        ..Default::default()
    };

    workspaces.create_workspace(payload.clone()).await.unwrap();
    let err = workspaces.create_workspace(payload).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}
