use hostflow::model::{Classification, InventoryEntry, OsFamily};
use hostflow::{Classifier, Inventory};
use test_utils::{create_test_engine, ScriptedProber};

mod test_utils;

#[tokio::test]
async fn test_scenario_a_linux_with_ssh_closed_is_restricted() {
    let prober = ScriptedProber::new()
        .with_ping("srv01", Some(64))
        .with_dns("srv01", "10.0.0.11", Some("srv01.domain.biz"))
        .with_open_port("10.0.0.11", 3389);
    let (_, engine) = create_test_engine(prober, Inventory::new());

    let record = engine.analyze("srv01").await;

    assert_eq!(record.pinging_host.as_deref(), Some("srv01"));
    assert_eq!(record.ttl, Some(64));
    assert_eq!(record.os_family, OsFamily::Linux);
    assert!(record.rdp_open);
    assert!(!record.ssh_open);
    assert_eq!(Classifier::default().classify(&record), Classification::Restricted);
}

#[tokio::test]
async fn test_scenario_b_alternate_identity_is_compared_literally() {
    let prober = ScriptedProber::new()
        .with_ping("dbxx", Some(200))
        .with_dns("dbxx", "10.0.0.12", Some("dbx.domain.biz"))
        .with_open_port("10.0.0.12", 3389);
    let (prober, engine) = create_test_engine(prober, Inventory::new());

    let record = engine.analyze("dbx").await;

    assert_eq!(record.pinging_host.as_deref(), Some("dbxx"));
    assert_eq!(record.os_family, OsFamily::Windows);
    assert!(prober.calls().contains(&"dns dbxx".to_string()));
    // "dbx.domain.biz" stripped is "dbx", which is not the pinging host "dbxx"
    assert_eq!(Classifier::default().classify(&record), Classification::DnsMismatch);
}

#[tokio::test]
async fn test_scenario_c_unreachable_and_unresolvable() {
    let (prober, engine) = create_test_engine(ScriptedProber::new(), Inventory::new());

    let record = engine.analyze("unreach01").await;

    assert_eq!(record.pinging_host, None);
    assert_eq!(record.reachable_ip, None);
    assert_eq!(record.reverse_dns_name, None);
    assert_eq!(record.os_family, OsFamily::Unknown);
    assert!(!record.ssh_open);
    assert!(!record.rdp_open);
    assert_eq!(Classifier::default().classify(&record), Classification::UnknownError);
    // DNS is still attempted against the original name
    assert!(prober.calls().contains(&"dns unreach01".to_string()));
}

#[tokio::test]
async fn test_scenario_d_reverse_name_of_another_host() {
    let prober = ScriptedProber::new()
        .with_ping("misnamed", Some(128))
        .with_dns("misnamed", "10.0.0.13", Some("other-host.domain.biz"));
    let (_, engine) = create_test_engine(prober, Inventory::new());

    let record = engine.analyze("misnamed").await;

    assert_eq!(Classifier::default().classify(&record), Classification::DnsMismatch);
}

#[tokio::test]
async fn test_scenario_e_missing_inventory_entry() {
    let mut inventory = Inventory::new();
    inventory.insert(
        "srv01",
        InventoryEntry {
            location: Some("HQ".into()),
            ..Default::default()
        },
    );
    let (_, engine) = create_test_engine(ScriptedProber::new(), inventory);

    let record = engine.analyze("srv99").await;

    assert!(record.inventory.is_not_found());
    assert_eq!(record.inventory.display_fields(), ["not found"; 6]);
}

#[tokio::test]
async fn test_both_identities_are_pinged_and_original_wins() {
    let prober = ScriptedProber::new()
        .with_ping("web01", Some(120))
        .with_ping("web01x", Some(60))
        .with_dns("web01", "10.0.0.14", None);
    let (prober, engine) = create_test_engine(prober, Inventory::new());

    let record = engine.analyze("web01").await;

    let calls = prober.calls();
    assert!(calls.contains(&"ping web01".to_string()));
    assert!(calls.contains(&"ping web01x".to_string()));
    assert_eq!(record.pinging_host.as_deref(), Some("web01"));
    // TTL and OS come from the reply of the identity that won
    assert_eq!(record.ttl, Some(120));
    assert_eq!(record.os_family, OsFamily::Windows);
}

#[tokio::test]
async fn test_alternate_ttl_used_when_only_alternate_replies() {
    let prober = ScriptedProber::new().with_ping("app07x", Some(63));
    let (_, engine) = create_test_engine(prober, Inventory::new());

    let record = engine.analyze("app07").await;

    assert_eq!(record.pinging_host.as_deref(), Some("app07x"));
    assert_eq!(record.alternate_host(), "app07x");
    assert_eq!(record.ttl, Some(63));
    assert_eq!(record.os_family, OsFamily::Linux);
}

#[tokio::test]
async fn test_reply_without_ttl_counts_as_reachable() {
    let prober = ScriptedProber::new().with_ping("quiet", None);
    let (_, engine) = create_test_engine(prober, Inventory::new());

    let record = engine.analyze("quiet").await;

    assert!(record.responded());
    assert_eq!(record.ttl, None);
    assert_eq!(record.os_family, OsFamily::Unknown);
}

#[tokio::test]
async fn test_unreachable_host_still_port_checked_on_resolved_ip() {
    let prober = ScriptedProber::new()
        .with_dns("dark", "10.0.0.15", Some("dark.domain.biz"))
        .with_open_port("10.0.0.15", 22);
    let (_, engine) = create_test_engine(prober, Inventory::new());

    let record = engine.analyze("dark").await;

    assert_eq!(record.pinging_host, None);
    assert_eq!(record.reachable_ip, Some("10.0.0.15".parse().unwrap()));
    assert!(record.ssh_open);
    assert!(!record.rdp_open);
    assert_eq!(record.os_family, OsFamily::Unknown);
}

#[tokio::test]
async fn test_silent_host_with_matching_ptr_is_unknown_error() {
    let prober = ScriptedProber::new().with_dns("srv01", "10.0.0.11", Some("srv01.domain.biz"));
    let (_, engine) = create_test_engine(prober, Inventory::new());

    let record = engine.analyze("srv01").await;

    assert_eq!(record.pinging_host, None);
    assert_eq!(record.os_family, OsFamily::Unknown);
    assert_eq!(Classifier::default().classify(&record), Classification::UnknownError);
}

#[tokio::test]
async fn test_inventory_keyed_by_original_host() {
    let mut inventory = Inventory::new();
    inventory.insert(
        "lab3",
        InventoryEntry {
            building: Some("B2".into()),
            floor: Some("3".into()),
            ..Default::default()
        },
    );
    let prober = ScriptedProber::new().with_ping("lab3x", Some(64));
    let (_, engine) = create_test_engine(prober, inventory);

    let record = engine.analyze("lab3").await;

    assert_eq!(record.pinging_host.as_deref(), Some("lab3x"));
    assert_eq!(record.inventory.building.as_deref(), Some("B2"));
    assert_eq!(record.inventory.location, None);
}
