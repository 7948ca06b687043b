use hostflow::validate::{ensure_valid, validate};
use hostflow::{HostBatch, HostFlowError};

#[test]
fn test_ip_literals_accepted() {
    assert!(validate("192.168.1.10"));
    assert!(validate("::1"));
    assert!(validate("fe80::1:2"));
}

#[test]
fn test_hostnames_accepted() {
    assert!(validate("srv01"));
    assert!(validate("srv-01.domain.biz"));
    assert!(validate("A1"));
}

#[test]
fn test_malformed_hosts_rejected() {
    assert!(!validate(""));
    assert!(!validate("   "));
    assert!(!validate("srv 01"));
    assert!(!validate("srv_01"));
    assert!(!validate("host;rm"));
    assert!(!validate("bücher"));
}

#[test]
fn test_ensure_valid_reports_host() {
    match ensure_valid("bad host") {
        Err(HostFlowError::InvalidHost(host)) => assert_eq!(host, "bad host"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_batch_from_lines_trims_and_filters() {
    let batch = HostBatch::from_lines("srv01\r\n  srv02  \n\nbad host\n10.0.0.1\n");

    assert_eq!(batch.hosts(), ["srv01", "srv02", "10.0.0.1"]);
    assert_eq!(batch.rejected(), ["bad host"]);
    assert_eq!(batch.len(), 3);
}

#[test]
fn test_batch_keeps_duplicates_in_order() {
    let batch = HostBatch::from_hosts(["b", "a", "b"]);
    assert_eq!(batch.into_hosts(), vec!["b", "a", "b"]);
}
