mod common;

use common::{Call, FakeApi, device, restricted_device};
use spotify_cli::{Error, cli, types::DevicesResponse};

#[test]
fn test_find_device_by_id() {
    let devices = vec![device("abc", "Laptop", false), device("def", "Phone", false)];
    let found = cli::find_device(&devices, "def").unwrap();
    assert_eq!(found.name, "Phone");
}

#[test]
fn test_find_device_by_name_substring_case_insensitive() {
    let devices = vec![
        device("abc", "Laptop", false),
        device("def", "Kitchen Speaker", false),
    ];
    let found = cli::find_device(&devices, "kitchen").unwrap();
    assert_eq!(found.id.as_deref(), Some("def"));
}

#[test]
fn test_find_device_id_wins_over_earlier_name_match() {
    let devices = vec![
        device("1", "studio desk", false),
        device("desk", "Office", false),
    ];
    let found = cli::find_device(&devices, "desk").unwrap();
    assert_eq!(found.name, "Office");
}

#[test]
fn test_find_device_first_name_match_wins() {
    let devices = vec![
        device("1", "Living Room TV", false),
        device("2", "Living Room Speaker", false),
    ];
    assert_eq!(
        cli::find_device(&devices, "living").unwrap().id.as_deref(),
        Some("1")
    );
}

#[test]
fn test_find_device_no_match() {
    let devices = vec![device("abc", "Laptop", false)];
    assert!(cli::find_device(&devices, "Phone").is_none());
    assert!(cli::find_device(&[], "anything").is_none());
}

#[test]
fn test_find_device_skips_devices_without_id() {
    let devices = vec![
        restricted_device("Living Room TV", false),
        device("tv2", "Bedroom TV", false),
    ];
    assert_eq!(cli::find_device(&devices, "tv").unwrap().name, "Bedroom TV");
    assert!(cli::find_device(&devices, "").is_some_and(|d| d.id.is_some()));
    assert!(cli::find_device(&devices[..1], "living").is_none());
}

#[tokio::test]
async fn test_ensure_device_explicit_transfers() {
    let api = FakeApi::new().with_devices(vec![
        device("abc", "Laptop", true),
        device("def", "Kitchen Speaker", false),
    ]);

    let chosen = cli::ensure_device(&api, Some("kitchen"), true).await.unwrap();

    assert_eq!(chosen.as_deref(), Some("def"));
    assert_eq!(
        api.calls(),
        vec![
            Call::Devices,
            Call::Transfer {
                device_id: "def".to_string(),
                play: true
            }
        ]
    );
}

#[tokio::test]
async fn test_ensure_device_explicit_not_found() {
    let api = FakeApi::new().with_devices(vec![device("abc", "Laptop", true)]);

    let err = cli::ensure_device(&api, Some("Phone"), true)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::DeviceNotFound(ref q) if q == "Phone"));
    assert_eq!(
        err.to_string(),
        "No device matching 'Phone' found. Use `devices` to list."
    );
    assert_eq!(api.calls(), vec![Call::Devices]);
}

#[tokio::test]
async fn test_ensure_device_prefers_active() {
    let api = FakeApi::new().with_devices(vec![
        device("abc", "Laptop", false),
        device("def", "Phone", true),
    ]);

    let chosen = cli::ensure_device(&api, None, true).await.unwrap();

    assert_eq!(chosen.as_deref(), Some("def"));
    assert_eq!(api.calls(), vec![Call::Devices]);
}

#[tokio::test]
async fn test_ensure_device_falls_back_to_first() {
    let api = FakeApi::new().with_devices(vec![
        device("abc", "Laptop", false),
        device("def", "Phone", false),
    ]);

    let chosen = cli::ensure_device(&api, None, false).await.unwrap();
    assert_eq!(chosen.as_deref(), Some("abc"));
}

#[tokio::test]
async fn test_ensure_device_restricted_active_lets_spotify_choose() {
    let api = FakeApi::new().with_devices(vec![
        restricted_device("Car", true),
        device("abc", "Laptop", false),
    ]);

    let chosen = cli::ensure_device(&api, None, true).await.unwrap();
    assert!(chosen.is_none());
}

#[tokio::test]
async fn test_play_on_restricted_device_sends_no_device_id() {
    let json = r#"{"devices": [
        {"id": null, "name": "Restricted TV", "type": "TV", "is_active": true, "volume_percent": 20}
    ]}"#;
    let listing: DevicesResponse = serde_json::from_str(json).unwrap();
    let api = FakeApi::new().with_devices(listing.devices);

    cli::play(&api, None, None).await.unwrap();

    assert_eq!(
        api.calls(),
        vec![
            Call::Devices,
            Call::Start {
                device_id: None,
                target: None
            }
        ]
    );
}

#[tokio::test]
async fn test_switch_to_restricted_device_is_rejected() {
    let devices = vec![restricted_device("Car", false)];
    let api = FakeApi::new().with_devices(devices.clone());

    assert!(matches!(
        cli::switch_to(&api, &devices, 1).await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_ensure_device_none_available() {
    let api = FakeApi::new();
    let chosen = cli::ensure_device(&api, None, true).await.unwrap();
    assert!(chosen.is_none());
}

#[tokio::test]
async fn test_set_device_transfers_with_play_flag() {
    let api = FakeApi::new().with_devices(vec![device("abc", "Laptop", false)]);

    cli::set_device(&api, "abc", false).await.unwrap();

    assert_eq!(
        api.calls(),
        vec![
            Call::Devices,
            Call::Transfer {
                device_id: "abc".to_string(),
                play: false
            }
        ]
    );
}

#[tokio::test]
async fn test_switch_to_rejects_out_of_range() {
    let devices = vec![device("abc", "Laptop", false)];
    let api = FakeApi::new().with_devices(devices.clone());

    assert!(matches!(
        cli::switch_to(&api, &devices, 0).await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        cli::switch_to(&api, &devices, 2).await,
        Err(Error::InvalidArgument(_))
    ));
    assert!(api.calls().is_empty());

    cli::switch_to(&api, &devices, 1).await.unwrap();
    assert_eq!(
        api.calls(),
        vec![Call::Transfer {
            device_id: "abc".to_string(),
            play: false
        }]
    );
}
